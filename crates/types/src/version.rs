//! Four-component mod versions
//!
//! Versions are dotted numeric strings with up to four components:
//! `major.minor.build.revision`. Missing trailing components are zero, so
//! `1.2` and `1.2.0.0` are the same version.

use hat_errors::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of dotted components in a version string
pub const MAX_COMPONENTS: usize = 4;

/// An ordered `major.minor.build.revision` version
///
/// Ordering is lexicographic over the four components, major first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl Version {
    /// Create a version from all four components
    #[must_use]
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Parse a dotted numeric version string
    ///
    /// # Errors
    ///
    /// Returns `VersionError` if the string is empty, has more than four
    /// components, or any component is not a non-negative integer.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::InvalidVersion {
                input: input.to_string(),
            });
        }

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() > MAX_COMPONENTS {
            return Err(VersionError::TooManyComponents {
                input: input.to_string(),
                max: MAX_COMPONENTS,
            });
        }

        let mut components = [0u32; MAX_COMPONENTS];
        for (slot, part) in components.iter_mut().zip(&parts) {
            // u32::from_str accepts a leading '+', metadata never does
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidComponent {
                    input: input.to_string(),
                    component: (*part).to_string(),
                });
            }
            *slot = part.parse().map_err(|_| VersionError::InvalidComponent {
                input: input.to_string(),
                component: (*part).to_string(),
            })?;
        }

        let [major, minor, build, revision] = components;
        Ok(Self::new(major, minor, build, revision))
    }

    /// The components as an array, major first
    #[must_use]
    pub const fn components(&self) -> [u32; MAX_COMPONENTS] {
        [self.major, self.minor, self.build, self.revision]
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl fmt::Display for Version {
    /// Always prints `major.minor`; build and revision only when needed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.build != 0 || self.revision != 0 {
            write!(f, ".{}", self.build)?;
        }
        if self.revision != 0 {
            write!(f, ".{}", self.revision)?;
        }
        Ok(())
    }
}
