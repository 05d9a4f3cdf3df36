//! Version parsing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VersionError {
    #[error("invalid version: {input}")]
    InvalidVersion { input: String },

    #[error("invalid version component '{component}' in {input}")]
    InvalidComponent { input: String, component: String },

    #[error("too many version components in {input} (at most {max})")]
    TooManyComponents { input: String, max: usize },
}

impl UserFacingError for VersionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("Use dotted numeric versions such as 1.2 or 1.2.3.4.")
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidVersion { .. } => "version.invalid_version",
            Self::InvalidComponent { .. } => "version.invalid_component",
            Self::TooManyComponents { .. } => "version.too_many_components",
        };
        Some(code)
    }
}
