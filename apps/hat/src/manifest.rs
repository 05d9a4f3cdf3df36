//! Candidate manifest loading
//!
//! Discovery of mods on disk happens elsewhere; the CLI reads its output as
//! a TOML file with one `[[mod]]` table per candidate.

use crate::error::CliError;
use hat_errors::{Error, MetadataError};
use hat_types::{DependencyRequirement, PackageMetadata, Version};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CandidateManifest {
    #[serde(default, rename = "mod")]
    mods: Vec<RawMod>,
}

#[derive(Debug, Deserialize)]
struct RawMod {
    name: String,
    version: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
    library: Option<String>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    name: String,
    minimum_version: Option<String>,
}

impl RawMod {
    fn into_metadata(self) -> Result<PackageMetadata, MetadataError> {
        let version = parse_version(&self.name, &self.version)?;
        let mut dependencies = Vec::with_capacity(self.dependencies.len());
        for dependency in self.dependencies {
            let minimum_version = match dependency.minimum_version {
                Some(text) => parse_version(&self.name, &text)?,
                None => Version::default(),
            };
            dependencies.push(DependencyRequirement::new(dependency.name, minimum_version));
        }

        let metadata = PackageMetadata {
            name: self.name,
            version,
            author: self.author,
            description: self.description,
            library_name: self.library.filter(|library| !library.is_empty()),
            dependencies,
        };
        metadata.validate()?;
        Ok(metadata)
    }
}

fn parse_version(name: &str, text: &str) -> Result<Version, MetadataError> {
    Version::parse(text).map_err(|e| MetadataError::InvalidVersion {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Parse manifest text; `origin` is only used in error messages
pub fn parse_candidates(text: &str, origin: &Path) -> Result<Vec<PackageMetadata>, MetadataError> {
    let manifest: CandidateManifest =
        toml::from_str(text).map_err(|e| MetadataError::InvalidManifest {
            path: origin.display().to_string(),
            message: e.to_string(),
        })?;

    manifest
        .mods
        .into_iter()
        .map(RawMod::into_metadata)
        .collect()
}

/// Read and parse a manifest file
pub async fn load_candidates(path: &Path) -> Result<Vec<PackageMetadata>, CliError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;
    let candidates = parse_candidates(&text, path)?;
    tracing::debug!(path = %path.display(), candidates = candidates.len(), "loaded candidate manifest");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MANIFEST: &str = r#"
[[mod]]
name = "FezMultiplayer"
version = "0.9.2"
author = "Jenna"
library = "FezMultiplayer.dll"
dependencies = [
    { name = "HAT", minimum_version = "1.1" },
    { name = "FezCore", minimum_version = "2.0" },
]

[[mod]]
name = "FezCore"
version = "2.1"
dependencies = [{ name = "HAT" }]
"#;

    #[test]
    fn test_parse_manifest() {
        let mods = parse_candidates(MANIFEST, &PathBuf::from("mods.toml")).unwrap();
        assert_eq!(mods.len(), 2);

        let multiplayer = &mods[0];
        assert_eq!(multiplayer.version, Version::new(0, 9, 2, 0));
        assert!(multiplayer.is_code_mod());
        assert_eq!(multiplayer.dependencies[1].name, "FezCore");
        assert_eq!(
            multiplayer.dependencies[1].minimum_version,
            Version::new(2, 0, 0, 0)
        );

        assert_eq!(mods[1].dependencies[0].minimum_version, Version::default());
        assert!(!mods[1].is_code_mod());
    }

    #[test]
    fn test_empty_manifest_has_no_candidates() {
        assert!(parse_candidates("", &PathBuf::from("mods.toml"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bad_version_names_the_mod() {
        let text = "[[mod]]\nname = \"Broken\"\nversion = \"1.beta\"\n";
        match parse_candidates(text, &PathBuf::from("mods.toml")) {
            Err(MetadataError::InvalidVersion { name, .. }) => assert_eq!(name, "Broken"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_candidates("[[mod]\n", &PathBuf::from("bad.toml")),
            Err(MetadataError::InvalidManifest { path, .. }) if path == "bad.toml"
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let text = "[[mod]]\nname = \"\"\nversion = \"1.0\"\n";
        assert!(matches!(
            parse_candidates(text, &PathBuf::from("mods.toml")),
            Err(MetadataError::EmptyName)
        ));
    }
}
