use serde::{Deserialize, Serialize};

use crate::EventSource;

// Declare all domain modules
pub mod activation;
pub mod resolver;

// Re-export all domain events
pub use activation::*;
pub use resolver::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Dependency resolution events
    Resolver(ResolverEvent),

    /// Mod activation events
    Activation(ActivationEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::Resolver(_) => EventSource::RESOLVER,
            Self::Activation(_) => EventSource::ACTIVATION,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Activation(ActivationEvent::ModFailed { .. }) => Level::ERROR,

            Self::Resolver(
                ResolverEvent::ModRejected { .. } | ResolverEvent::DuplicateDiscarded { .. },
            ) => Level::WARN,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::Resolver(_) => "hat::events::resolver",
            Self::Activation(_) => "hat::events::activation",
        }
    }
}
