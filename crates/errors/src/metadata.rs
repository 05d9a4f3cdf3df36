//! Mod metadata error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MetadataError {
    #[error("mod metadata has an empty name")]
    EmptyName,

    #[error("mod '{name}' has an invalid version: {message}")]
    InvalidVersion { name: String, message: String },

    #[error("mod '{name}' declares a dependency with an empty name")]
    EmptyDependencyName { name: String },

    #[error("invalid candidate manifest {path}: {message}")]
    InvalidManifest { path: String, message: String },
}

impl UserFacingError for MetadataError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidManifest { .. } => {
                Some("Each [[mod]] entry needs a name and a dotted numeric version.")
            }
            _ => Some("Fix the mod metadata and reload."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::EmptyName => "metadata.empty_name",
            Self::InvalidVersion { .. } => "metadata.invalid_version",
            Self::EmptyDependencyName { .. } => "metadata.empty_dependency_name",
            Self::InvalidManifest { .. } => "metadata.invalid_manifest",
        };
        Some(code)
    }
}
