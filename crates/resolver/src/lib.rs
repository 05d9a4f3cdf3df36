#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Dependency resolution for the HAT mod loader
//!
//! This crate turns discovered mod metadata into a deterministic load order.
//! Duplicates are reduced to one candidate per name, every mod is checked
//! against the running loader, and a topological walk orders the survivors
//! while rejecting missing, outdated and circular dependencies with a
//! diagnostic for each rejected mod.

mod activation;
pub mod diagnostics;
mod graph;
mod loader;
mod resolver;
mod selection;

pub use activation::{activate, ActivatedMod, ActivationReport, ComponentFactory, FailedMod};
pub use graph::{DependencyGraph, GraphNode, HostLoader, NodeId, NodeStatus};
pub use loader::ModLoader;
pub use resolver::{resolve, topological_order};
pub use selection::{filter_disabled, select_unique, DiscardedDuplicate, Selection};

use hat_types::{names_match, PackageMetadata};
use serde::{Deserialize, Serialize};

/// A mod cleared for activation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMod {
    pub metadata: PackageMetadata,
    /// Names of the mods this one depends on, in declaration order
    pub dependencies: Vec<String>,
}

/// A mod that will not be activated
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidMod {
    pub metadata: PackageMetadata,
    pub status: NodeStatus,
    pub diagnostic: String,
}

/// Outcome of one resolution run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverResult {
    /// Valid mods, every dependency before its dependents
    pub load_order: Vec<ResolvedMod>,
    pub invalid: Vec<InvalidMod>,
}

impl ResolverResult {
    /// Names of the load order
    #[must_use]
    pub fn load_order_names(&self) -> Vec<String> {
        self.load_order
            .iter()
            .map(|resolved| resolved.metadata.name.clone())
            .collect()
    }

    /// Position of a mod in the load order
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.load_order
            .iter()
            .position(|resolved| names_match(&resolved.metadata.name, name))
    }

    /// Status of a rejected mod
    #[must_use]
    pub fn invalid_status(&self, name: &str) -> Option<&NodeStatus> {
        self.invalid
            .iter()
            .find(|invalid| names_match(&invalid.metadata.name, name))
            .map(|invalid| &invalid.status)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.load_order.is_empty() && self.invalid.is_empty()
    }
}
