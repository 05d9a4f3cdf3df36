//! Structured logging integration for events
//!
//! Converts domain events into tracing records with structured fields.

use hat_events::{ActivationEvent, AppEvent, EventMessage, ResolverEvent};
use tracing::{error, info, warn};

/// Log an `EventMessage` using the tracing infrastructure
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;
    let source = meta.source.as_str();
    let correlation = meta.correlation_id.as_deref().unwrap_or("-");

    match &message.event {
        AppEvent::Resolver(resolver) => match resolver {
            ResolverEvent::ResolutionStarted {
                candidates,
                priority_entries,
                loader_version,
            } => {
                info!(
                    source,
                    correlation,
                    candidates,
                    priority_entries,
                    loader_version = %loader_version,
                    "Resolution started"
                );
            }
            ResolverEvent::ModDisabled { name, version } => {
                info!(source, correlation, name = %name, version = %version, "Mod disabled");
            }
            ResolverEvent::DuplicateDiscarded {
                name,
                kept_version,
                discarded_version,
            } => {
                info!(
                    source,
                    correlation,
                    name = %name,
                    kept_version = %kept_version,
                    discarded_version = %discarded_version,
                    "Duplicate mod discarded"
                );
            }
            ResolverEvent::ModRejected {
                name,
                version,
                kind,
                diagnostic,
            } => {
                warn!(
                    source,
                    correlation,
                    name = %name,
                    version = %version,
                    kind = ?kind,
                    diagnostic = %diagnostic,
                    "Mod rejected"
                );
            }
            ResolverEvent::ResolutionCompleted {
                load_order,
                rejected,
                duration_ms,
            } => {
                info!(
                    source,
                    correlation,
                    loaded = load_order.len(),
                    rejected,
                    duration_ms,
                    "Resolution completed"
                );
            }
        },

        AppEvent::Activation(activation) => match activation {
            ActivationEvent::ModActivated {
                name,
                version,
                components,
            } => {
                info!(source, correlation, name = %name, version = %version, components, "Mod activated");
            }
            ActivationEvent::ModFailed { name, error } => {
                error!(source, correlation, name = %name, error = %error, "Mod activation failed");
            }
        },
    }
}
