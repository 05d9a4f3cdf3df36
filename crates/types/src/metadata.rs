//! Mod metadata as produced by candidate discovery

use crate::Version;
use hat_errors::MetadataError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fold a mod name into the key used for identity comparisons
///
/// Mod names compare case-insensitively everywhere in the loader.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Case-insensitive mod name equality
#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || name_key(a) == name_key(b)
}

/// A named dependency with a minimum version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequirement {
    pub name: String,
    #[serde(default)]
    pub minimum_version: Version,
}

impl DependencyRequirement {
    /// Create a new requirement
    #[must_use]
    pub fn new(name: impl Into<String>, minimum_version: Version) -> Self {
        Self {
            name: name.into(),
            minimum_version,
        }
    }

    /// Whether `version` meets the minimum
    #[must_use]
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        *version >= self.minimum_version
    }
}

impl fmt::Display for DependencyRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>={}", self.name, self.minimum_version)
    }
}

/// Declared metadata of one discovered mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: Version,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Library shipped by code mods, absent for asset-only mods
    #[serde(default, rename = "library", skip_serializing_if = "Option::is_none")]
    pub library_name: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRequirement>,
}

impl PackageMetadata {
    /// Create metadata with only a name and version
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            author: String::new(),
            description: String::new(),
            library_name: None,
            dependencies: Vec::new(),
        }
    }

    /// Set the author
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the library name
    #[must_use]
    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library_name = Some(library.into());
        self
    }

    /// Append a dependency requirement
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, minimum_version: Version) -> Self {
        self.dependencies
            .push(DependencyRequirement::new(name, minimum_version));
        self
    }

    /// Identity key of this mod
    #[must_use]
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Whether this mod ships a library
    #[must_use]
    pub fn is_code_mod(&self) -> bool {
        self.library_name.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// First declared requirement on `name`, compared case-insensitively
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&DependencyRequirement> {
        self.dependencies.iter().find(|dep| names_match(&dep.name, name))
    }

    /// Check the invariants discovery must guarantee before resolution
    ///
    /// # Errors
    ///
    /// Returns `MetadataError` if the name or any dependency name is blank.
    pub fn validate(&self) -> Result<(), MetadataError> {
        if self.name.trim().is_empty() {
            return Err(MetadataError::EmptyName);
        }
        if self.dependencies.iter().any(|dep| dep.name.trim().is_empty()) {
            return Err(MetadataError::EmptyDependencyName {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PackageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
