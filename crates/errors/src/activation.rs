//! Mod activation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ActivationError {
    #[error("library '{library}' of mod '{name}' not found")]
    LibraryNotFound { name: String, library: String },

    #[error("failed to instantiate components of mod '{name}': {message}")]
    ComponentFailed { name: String, message: String },
}

impl UserFacingError for ActivationError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::LibraryNotFound { .. } => {
                Some("Make sure the mod ships the library named in its metadata.")
            }
            Self::ComponentFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::LibraryNotFound { .. } => "activation.library_not_found",
            Self::ComponentFailed { .. } => "activation.component_failed",
        };
        Some(code)
    }
}
