//! Integration tests for error types

#[cfg(test)]
mod tests {
    use hat_errors::*;

    #[test]
    fn test_error_conversion() {
        let version_err = VersionError::InvalidVersion { input: "".into() };
        let err: Error = version_err.into();
        assert!(matches!(err, Error::Version(_)));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            field: "HAT_LOADER_VERSION".into(),
            value: "one".into(),
        };
        assert_eq!(err.to_string(), "invalid value for HAT_LOADER_VERSION: one");
    }

    #[test]
    fn test_error_clone() {
        let err = MetadataError::EmptyDependencyName {
            name: "FezMultiplayer".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test");
        let err = Error::io_with_path(&io_err, "Mods/priority.txt");
        match err {
            Error::Io { kind, path, .. } => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert_eq!(path.unwrap().to_str(), Some("Mods/priority.txt"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_facing_codes() {
        let err: Error = ActivationError::LibraryNotFound {
            name: "Speedrun".into(),
            library: "Speedrun.dll".into(),
        }
        .into();
        assert_eq!(err.user_code(), Some("activation.library_not_found"));
        assert!(err.user_hint().is_some());
        assert!(!err.is_retryable());
    }

    fn check_dependency(name: &str) -> std::result::Result<(), MetadataError> {
        Err(MetadataError::EmptyDependencyName { name: name.into() })
    }

    fn read_manifest(name: &str) -> Result<()> {
        check_dependency(name)?;
        Ok(())
    }

    #[test]
    fn test_domain_errors_propagate_with_question_mark() {
        let err = read_manifest("FezMultiplayer").unwrap_err();
        assert!(matches!(err, Error::Metadata(_)));
        assert_eq!(err.user_code(), Some("metadata.empty_dependency_name"));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(&io_err, "Mods/mods.toml");
        assert_eq!(err.user_code(), Some("error.io"));
        assert!(err.is_retryable());
        assert!(err.user_hint().is_none());
    }
}
