//! Human-readable explanations for invalid nodes

use crate::graph::NodeStatus;

/// Short category label of a status
#[must_use]
pub fn label(status: &NodeStatus) -> &'static str {
    match status {
        NodeStatus::Valid => "Valid",
        NodeStatus::InvalidVersionMismatch { .. } => "Version mismatch",
        NodeStatus::InvalidNotFound { .. } => "Not found",
        NodeStatus::InvalidRecursive { .. } => "Circular dependency",
        NodeStatus::InvalidDependencyTree { .. } => "Dependency tree error",
    }
}

/// Detail sentence of a status
#[must_use]
pub fn detail(status: &NodeStatus) -> String {
    match status {
        NodeStatus::Valid => "no problems".to_string(),
        NodeStatus::InvalidVersionMismatch { requirement, found } => format!(
            "requires {} version >= {}, found {}",
            requirement.name, requirement.minimum_version, found
        ),
        NodeStatus::InvalidNotFound { requirement } => {
            format!("dependency '{requirement}' not found")
        }
        NodeStatus::InvalidRecursive { chain } => {
            format!("circular dependency: {}", chain.join(" -> "))
        }
        NodeStatus::InvalidDependencyTree { culprit } => {
            format!("depends on '{culprit}' which is invalid")
        }
    }
}

/// One-line `"<label> - <detail>"` description
#[must_use]
pub fn describe(status: &NodeStatus) -> String {
    format!("{} - {}", label(status), detail(status))
}
