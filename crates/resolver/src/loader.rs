//! Resolution pipeline for one loader run

use crate::graph::HostLoader;
use crate::selection::{filter_disabled, select_unique};
use crate::{resolver, ResolverResult};
use hat_config::{Config, PriorityList};
use hat_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use hat_types::{name_key, PackageMetadata};
use std::collections::HashSet;
use std::time::Instant;

/// Runs disabled filtering, duplicate selection and dependency resolution
///
/// Every step reports through `tracing` and, when a sender is attached,
/// through resolver events stamped with this run's correlation id.
#[derive(Clone, Debug)]
pub struct ModLoader {
    host: HostLoader,
    priority: PriorityList,
    disabled: HashSet<String>,
    event_sender: Option<EventSender>,
    run_id: Option<String>,
}

impl ModLoader {
    /// Create a loader with an empty priority list and nothing disabled
    #[must_use]
    pub fn new(host: HostLoader) -> Self {
        Self {
            host,
            priority: PriorityList::default(),
            disabled: HashSet::new(),
            event_sender: None,
            run_id: None,
        }
    }

    /// Create a loader from configuration and an already loaded priority list
    #[must_use]
    pub fn from_config(config: &Config, priority: PriorityList) -> Self {
        Self {
            disabled: config.disabled_keys(),
            ..Self::new(HostLoader::from(&config.loader)).with_priority(priority)
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: PriorityList) -> Self {
        self.priority = priority;
        self
    }

    /// Disable mods by name, compared case-insensitively
    #[must_use]
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disabled
            .extend(names.into_iter().map(|name| name_key(name.as_ref())));
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    /// Stamp every event of this loader with a correlation id
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    #[must_use]
    pub fn host(&self) -> &HostLoader {
        &self.host
    }

    /// Turn discovered candidates into a load order
    #[must_use]
    pub fn prepare(&self, candidates: Vec<PackageMetadata>) -> ResolverResult {
        let started = Instant::now();
        tracing::info!(
            candidates = candidates.len(),
            loader = %self.host.name,
            loader_version = %self.host.version,
            "resolving mods"
        );
        self.emit(AppEvent::Resolver(ResolverEvent::ResolutionStarted {
            candidates: candidates.len(),
            priority_entries: self.priority.len(),
            loader_version: self.host.version.to_string(),
        }));

        let (enabled, disabled) = filter_disabled(candidates, &self.disabled);
        for metadata in &disabled {
            tracing::info!(name = %metadata.name, version = %metadata.version, "mod disabled");
            self.emit(AppEvent::Resolver(ResolverEvent::ModDisabled {
                name: metadata.name.clone(),
                version: metadata.version.to_string(),
            }));
        }

        let selection = select_unique(enabled, &self.priority);
        for discarded in &selection.discarded {
            self.emit(AppEvent::Resolver(ResolverEvent::DuplicateDiscarded {
                name: discarded.metadata.name.clone(),
                kept_version: discarded.kept_version.to_string(),
                discarded_version: discarded.metadata.version.to_string(),
            }));
        }

        let result = resolver::resolve(selection.kept, &self.host);

        for invalid in &result.invalid {
            tracing::warn!(
                name = %invalid.metadata.name,
                version = %invalid.metadata.version,
                diagnostic = %invalid.diagnostic,
                "mod rejected"
            );
            if let Some(kind) = invalid.status.rejection_kind() {
                self.emit(AppEvent::Resolver(ResolverEvent::ModRejected {
                    name: invalid.metadata.name.clone(),
                    version: invalid.metadata.version.to_string(),
                    kind,
                    diagnostic: invalid.diagnostic.clone(),
                }));
            }
        }

        tracing::info!("Mods in their order of appearance:");
        for resolved in &result.load_order {
            let metadata = &resolved.metadata;
            tracing::info!(
                "{} by {} version {}",
                metadata.name,
                metadata.author,
                metadata.version
            );
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.emit(AppEvent::Resolver(ResolverEvent::ResolutionCompleted {
            load_order: result.load_order_names(),
            rejected: result.invalid.len(),
            duration_ms,
        }));

        result
    }
}

impl EventEmitter for ModLoader {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }
}
