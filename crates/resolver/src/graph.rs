//! Dependency graph types and construction
//!
//! Nodes live in an arena and refer to each other by [`NodeId`], so cyclic
//! dependencies are plain data rather than reference cycles.

use hat_config::LoaderConfig;
use hat_events::RejectionKind;
use hat_types::{name_key, names_match, DependencyRequirement, PackageMetadata, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of a node in a [`DependencyGraph`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resolution status of a node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NodeStatus {
    Valid,
    /// A dependency exists but is older than required
    InvalidVersionMismatch {
        requirement: DependencyRequirement,
        found: Version,
    },
    /// A required dependency has no surviving candidate
    InvalidNotFound { requirement: String },
    /// The node is part of a dependency cycle
    InvalidRecursive { chain: Vec<String> },
    /// The node depends on an invalid node
    InvalidDependencyTree { culprit: String },
}

impl NodeStatus {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Rejection category, `None` for valid nodes
    #[must_use]
    pub fn rejection_kind(&self) -> Option<RejectionKind> {
        match self {
            Self::Valid => None,
            Self::InvalidVersionMismatch { .. } => Some(RejectionKind::VersionMismatch),
            Self::InvalidNotFound { .. } => Some(RejectionKind::NotFound),
            Self::InvalidRecursive { .. } => Some(RejectionKind::CircularDependency),
            Self::InvalidDependencyTree { .. } => Some(RejectionKind::DependencyTree),
        }
    }
}

/// One deduplicated mod inside the graph
#[derive(Clone, Debug)]
pub struct GraphNode {
    metadata: PackageMetadata,
    dependencies: Vec<NodeId>,
    status: NodeStatus,
}

impl GraphNode {
    fn new(metadata: PackageMetadata) -> Self {
        Self {
            metadata,
            dependencies: Vec::new(),
            status: NodeStatus::Valid,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    #[must_use]
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Outgoing edges in declaration order
    #[must_use]
    pub fn dependencies(&self) -> &[NodeId] {
        &self.dependencies
    }

    #[must_use]
    pub fn status(&self) -> &NodeStatus {
        &self.status
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Record an invalid status; only the first one sticks
    ///
    /// Returns `true` if the status changed.
    pub fn mark_invalid(&mut self, status: NodeStatus) -> bool {
        if !self.status.is_valid() || status.is_valid() {
            return false;
        }
        self.status = status;
        true
    }
}

/// The loader identity every mod must declare a dependency on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostLoader {
    pub name: String,
    pub version: Version,
}

impl HostLoader {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Whether a requirement refers to the loader rather than another mod
    #[must_use]
    pub fn is_host_requirement(&self, requirement: &DependencyRequirement) -> bool {
        names_match(&requirement.name, &self.name)
    }

    /// Check a mod's declared requirement on the loader
    #[must_use]
    pub fn validate(&self, metadata: &PackageMetadata) -> NodeStatus {
        let Some(requirement) = metadata.requirement(&self.name) else {
            return NodeStatus::InvalidNotFound {
                requirement: self.name.clone(),
            };
        };

        if requirement.is_satisfied_by(&self.version) {
            NodeStatus::Valid
        } else {
            NodeStatus::InvalidVersionMismatch {
                requirement: requirement.clone(),
                found: self.version,
            }
        }
    }
}

impl From<&LoaderConfig> for HostLoader {
    fn from(config: &LoaderConfig) -> Self {
        Self::new(config.name.clone(), config.version)
    }
}

/// Dependency graph over deduplicated mods
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    /// Resolvable nodes in insertion order
    nodes: Vec<GraphNode>,
    /// Folded name -> node
    index: HashMap<String, NodeId>,
    /// Mods that failed the loader check; never part of any edge
    rejected: Vec<GraphNode>,
}

impl DependencyGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph and run first-pass validation
    ///
    /// Mods failing the loader check are kept aside as rejected. Every other
    /// mod becomes a node whose declared dependencies are linked in
    /// declaration order; the first missing or too-old dependency marks the
    /// node invalid and stops linking it.
    #[must_use]
    pub fn build(candidates: Vec<PackageMetadata>, host: &HostLoader) -> Self {
        let mut graph = Self::new();

        for metadata in candidates {
            let status = host.validate(&metadata);
            if status.is_valid() {
                graph.add_node(metadata);
            } else {
                tracing::debug!(name = %metadata.name, ?status, "mod failed loader check");
                let mut node = GraphNode::new(metadata);
                node.mark_invalid(status);
                graph.rejected.push(node);
            }
        }

        graph.link(host);
        graph
    }

    /// Add a node, keeping the newer version on a name collision
    pub fn add_node(&mut self, metadata: PackageMetadata) -> NodeId {
        let key = metadata.key();
        if let Some(&id) = self.index.get(&key) {
            let existing = &mut self.nodes[id.0];
            if metadata.version > existing.metadata.version {
                tracing::debug!(
                    name = %metadata.name,
                    replaced = %existing.metadata.version,
                    version = %metadata.version,
                    "replacing older node with the same name"
                );
                *existing = GraphNode::new(metadata);
            }
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode::new(metadata));
        self.index.insert(key, id);
        id
    }

    fn link(&mut self, host: &HostLoader) {
        for position in 0..self.nodes.len() {
            let mut edges = Vec::new();
            let mut failure = None;

            for requirement in &self.nodes[position].metadata.dependencies {
                if host.is_host_requirement(requirement) {
                    continue;
                }

                let Some(&target) = self.index.get(&name_key(&requirement.name)) else {
                    failure = Some(NodeStatus::InvalidNotFound {
                        requirement: requirement.name.clone(),
                    });
                    break;
                };

                let found = self.nodes[target.0].metadata.version;
                if !requirement.is_satisfied_by(&found) {
                    failure = Some(NodeStatus::InvalidVersionMismatch {
                        requirement: requirement.clone(),
                        found,
                    });
                    break;
                }

                edges.push(target);
            }

            let node = &mut self.nodes[position];
            node.dependencies = edges;
            if let Some(status) = failure {
                tracing::debug!(name = %node.metadata.name, ?status, "dependency check failed");
                node.mark_invalid(status);
            }
        }
    }

    /// Look up a node by name, case-insensitively
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.index.get(&name_key(name)).copied()
    }

    /// Get a node by id
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut GraphNode {
        &mut self.nodes[id.0]
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Resolvable nodes in insertion order
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Mods rejected by the loader check
    #[must_use]
    pub fn rejected(&self) -> &[GraphNode] {
        &self.rejected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
