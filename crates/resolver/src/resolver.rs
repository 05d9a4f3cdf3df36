//! Topological ordering with cycle detection and invalidity propagation

use crate::diagnostics;
use crate::graph::{DependencyGraph, GraphNode, HostLoader, NodeId, NodeStatus};
use crate::{InvalidMod, ResolvedMod, ResolverResult};
use hat_types::PackageMetadata;

#[derive(Clone, Copy, Debug)]
enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

/// Traversal state of one ordering run
struct Walk {
    visited: Vec<bool>,
    on_path: Vec<bool>,
    path: Vec<NodeId>,
    stack: Vec<Frame>,
    order: Vec<NodeId>,
}

impl Walk {
    fn new(len: usize) -> Self {
        Self {
            visited: vec![false; len],
            on_path: vec![false; len],
            path: Vec::new(),
            stack: Vec::new(),
            order: Vec::with_capacity(len),
        }
    }

    fn enter(&mut self, graph: &mut DependencyGraph, id: NodeId) {
        if self.visited[id.index()] {
            return;
        }

        if !graph.node(id).is_valid() {
            let culprit = graph.node(id).name().to_string();
            for &ancestor in &self.path {
                graph
                    .node_mut(ancestor)
                    .mark_invalid(NodeStatus::InvalidDependencyTree {
                        culprit: culprit.clone(),
                    });
            }
            return;
        }

        if self.on_path[id.index()] {
            self.mark_cycle(graph, id);
            return;
        }

        self.path.push(id);
        self.on_path[id.index()] = true;
        self.stack.push(Frame::Exit(id));
        // reversed so the first declared dependency is explored first
        for &dependency in graph.node(id).dependencies().iter().rev() {
            if !self.visited[dependency.index()] {
                self.stack.push(Frame::Enter(dependency));
            }
        }
    }

    fn exit(&mut self, graph: &mut DependencyGraph, id: NodeId) {
        self.path.pop();
        self.on_path[id.index()] = false;

        let culprit = graph
            .node(id)
            .dependencies()
            .iter()
            .map(|&dependency| graph.node(dependency))
            .find(|dependency| !dependency.is_valid())
            .map(|dependency| dependency.name().to_string());
        if let Some(culprit) = culprit {
            graph
                .node_mut(id)
                .mark_invalid(NodeStatus::InvalidDependencyTree { culprit });
        }

        if graph.node(id).is_valid() {
            self.visited[id.index()] = true;
            self.order.push(id);
        }
    }

    /// `id` was reached again while still on the path
    fn mark_cycle(&self, graph: &mut DependencyGraph, id: NodeId) {
        let Some(start) = self.path.iter().position(|&member| member == id) else {
            return;
        };

        let mut chain: Vec<String> = self.path[start..]
            .iter()
            .map(|&member| graph.node(member).name().to_string())
            .collect();
        chain.push(graph.node(id).name().to_string());
        tracing::debug!(chain = ?chain, "dependency cycle detected");

        for &member in &self.path[start..] {
            graph
                .node_mut(member)
                .mark_invalid(NodeStatus::InvalidRecursive {
                    chain: chain.clone(),
                });
        }

        for pair in self.path[..=start].windows(2) {
            let culprit = graph.node(pair[1]).name().to_string();
            graph
                .node_mut(pair[0])
                .mark_invalid(NodeStatus::InvalidDependencyTree { culprit });
        }
    }
}

/// Order the valid nodes of `graph`, dependencies first
///
/// Invalid statuses discovered on the way (cycles, dependents of invalid
/// nodes) are written back into the graph. The returned ids are exactly the
/// nodes that are still valid afterwards.
pub fn topological_order(graph: &mut DependencyGraph) -> Vec<NodeId> {
    let roots: Vec<NodeId> = graph.node_ids().collect();
    let mut walk = Walk::new(roots.len());

    for root in roots {
        if walk.visited[root.index()] || !graph.node(root).is_valid() {
            continue;
        }

        walk.stack.push(Frame::Enter(root));
        while let Some(frame) = walk.stack.pop() {
            match frame {
                Frame::Enter(id) => walk.enter(graph, id),
                Frame::Exit(id) => walk.exit(graph, id),
            }
        }
    }

    walk.order
}

/// Resolve deduplicated candidates against the running loader
///
/// Candidates must already be unique by case-insensitive name. The result
/// lists valid mods in activation order and invalid mods with a diagnostic:
/// loader-check rejects first, then graph nodes in discovery order.
#[must_use]
pub fn resolve(candidates: Vec<PackageMetadata>, host: &HostLoader) -> ResolverResult {
    let mut graph = DependencyGraph::build(candidates, host);
    let order = topological_order(&mut graph);

    let load_order = order
        .into_iter()
        .map(|id| {
            let node = graph.node(id);
            ResolvedMod {
                metadata: node.metadata().clone(),
                dependencies: node
                    .dependencies()
                    .iter()
                    .map(|&dependency| graph.node(dependency).name().to_string())
                    .collect(),
            }
        })
        .collect();

    let invalid = graph
        .rejected()
        .iter()
        .chain(graph.nodes().iter().filter(|node| !node.is_valid()))
        .map(invalid_mod)
        .collect();

    ResolverResult {
        load_order,
        invalid,
    }
}

fn invalid_mod(node: &GraphNode) -> InvalidMod {
    InvalidMod {
        metadata: node.metadata().clone(),
        status: node.status().clone(),
        diagnostic: diagnostics::describe(node.status()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hat_types::Version;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn mod_(name: &str, deps: &[&str]) -> PackageMetadata {
        deps.iter().fold(
            PackageMetadata::new(name, v("1.0")).with_dependency("HAT", v("1.0")),
            |meta, dep| meta.with_dependency(*dep, v("1.0")),
        )
    }

    fn order_names(graph: &DependencyGraph, order: &[NodeId]) -> Vec<String> {
        order
            .iter()
            .map(|&id| graph.node(id).name().to_string())
            .collect()
    }

    fn host() -> HostLoader {
        HostLoader::new("HAT", v("1.1.1"))
    }

    #[test]
    fn test_dependencies_explored_in_declaration_order() {
        let mut graph = DependencyGraph::build(
            vec![mod_("A", &["B", "C"]), mod_("C", &[]), mod_("B", &[])],
            &host(),
        );
        let order = topological_order(&mut graph);
        assert_eq!(order_names(&graph, &order), ["B", "C", "A"]);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut graph = DependencyGraph::build(vec![mod_("Loop", &["loop"])], &host());
        let order = topological_order(&mut graph);
        assert!(order.is_empty());
        assert_eq!(
            graph.node(graph.find("Loop").unwrap()).status(),
            &NodeStatus::InvalidRecursive {
                chain: vec!["Loop".into(), "Loop".into()]
            }
        );
    }

    #[test]
    fn test_nodes_leading_into_cycle_blame_next_on_path() {
        // Root -> Mid -> X -> Y -> X
        let mut graph = DependencyGraph::build(
            vec![
                mod_("Root", &["Mid"]),
                mod_("Mid", &["X"]),
                mod_("X", &["Y"]),
                mod_("Y", &["X"]),
            ],
            &host(),
        );
        let order = topological_order(&mut graph);
        assert!(order.is_empty());

        let status = |name: &str| graph.node(graph.find(name).unwrap()).status().clone();
        assert_eq!(
            status("Root"),
            NodeStatus::InvalidDependencyTree {
                culprit: "Mid".into()
            }
        );
        assert_eq!(
            status("Mid"),
            NodeStatus::InvalidDependencyTree {
                culprit: "X".into()
            }
        );
        let chain = vec!["X".to_string(), "Y".to_string(), "X".to_string()];
        assert_eq!(status("X"), NodeStatus::InvalidRecursive { chain: chain.clone() });
        assert_eq!(status("Y"), NodeStatus::InvalidRecursive { chain });
    }

    #[test]
    fn test_invalid_dependency_propagates_to_all_ancestors() {
        let mut graph = DependencyGraph::build(
            vec![
                mod_("Top", &["Middle"]),
                mod_("Middle", &["Broken"]),
                mod_("Broken", &["Missing"]),
                mod_("Fine", &[]),
            ],
            &host(),
        );
        let order = topological_order(&mut graph);
        assert_eq!(order_names(&graph, &order), ["Fine"]);

        let status = |name: &str| graph.node(graph.find(name).unwrap()).status().clone();
        assert_eq!(
            status("Broken"),
            NodeStatus::InvalidNotFound {
                requirement: "Missing".into()
            }
        );
        assert_eq!(
            status("Middle"),
            NodeStatus::InvalidDependencyTree {
                culprit: "Broken".into()
            }
        );
        assert!(matches!(
            status("Top"),
            NodeStatus::InvalidDependencyTree { .. }
        ));
    }

    #[test]
    fn test_resolve_reports_rejects_before_graph_nodes() {
        let result = resolve(
            vec![
                mod_("Needy", &["Gone"]),
                PackageMetadata::new("NoLoader", v("1.0")),
            ],
            &host(),
        );
        let names: Vec<_> = result
            .invalid
            .iter()
            .map(|m| m.metadata.name.as_str())
            .collect();
        assert_eq!(names, ["NoLoader", "Needy"]);
        assert!(result.invalid[0].diagnostic.starts_with("Not found - "));
    }

    #[test]
    fn test_resolved_mod_lists_dependency_names() {
        let result = resolve(vec![mod_("App", &["lib"]), mod_("Lib", &[])], &host());
        assert_eq!(result.load_order_names(), ["Lib", "App"]);
        assert_eq!(result.load_order[1].dependencies, ["Lib"]);
    }
}
