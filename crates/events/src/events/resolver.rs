use serde::{Deserialize, Serialize};

/// Resolver domain events for one resolution run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    /// Resolution started over the discovered candidates
    ResolutionStarted {
        candidates: usize,
        priority_entries: usize,
        loader_version: String,
    },

    /// A candidate was excluded by configuration
    ModDisabled { name: String, version: String },

    /// A duplicate candidate lost to another copy of the same mod
    DuplicateDiscarded {
        name: String,
        kept_version: String,
        discarded_version: String,
    },

    /// A mod was rejected and will not be activated
    ModRejected {
        name: String,
        version: String,
        kind: RejectionKind,
        diagnostic: String,
    },

    /// Resolution finished
    ResolutionCompleted {
        load_order: Vec<String>,
        rejected: usize,
        duration_ms: u64,
    },
}

/// Why a mod was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// A dependency exists but is older than required
    VersionMismatch,
    /// A required dependency has no candidate
    NotFound,
    /// The mod is part of a dependency cycle
    CircularDependency,
    /// A (transitive) dependency is itself rejected
    DependencyTree,
}
