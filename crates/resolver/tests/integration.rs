//! Integration tests for resolver crate

#[cfg(test)]
mod tests {
    use hat_config::{Config, PriorityList};
    use hat_resolver::*;
    use hat_types::{PackageMetadata, Version};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn host() -> HostLoader {
        HostLoader::new("HAT", v("1.1.1"))
    }

    fn package(name: &str, version: &str) -> PackageMetadata {
        PackageMetadata::new(name, v(version))
            .with_author("tester")
            .with_dependency("HAT", v("1.0"))
    }

    fn loader() -> ModLoader {
        ModLoader::new(host())
    }

    #[test]
    fn test_scenario_a_dependency_loads_first() {
        let result = loader().prepare(vec![
            package("X", "1.0").with_dependency("Y", v("1.0")),
            package("Y", "1.2"),
        ]);
        assert_eq!(result.load_order_names(), ["Y", "X"]);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_scenario_b_outdated_dependency() {
        let result = loader().prepare(vec![
            package("X", "1.0").with_dependency("Y", v("2.0")),
            package("Y", "1.0"),
        ]);
        assert_eq!(result.load_order_names(), ["Y"]);
        assert_eq!(result.invalid.len(), 1);
        match result.invalid_status("X") {
            Some(NodeStatus::InvalidVersionMismatch { requirement, found }) => {
                assert_eq!(requirement.name, "Y");
                assert_eq!(requirement.minimum_version, v("2.0"));
                assert_eq!(*found, v("1.0"));
            }
            other => panic!("unexpected status {other:?}"),
        }
        assert!(result.invalid[0].diagnostic.starts_with("Version mismatch - "));
    }

    #[test]
    fn test_scenario_c_mutual_cycle() {
        let result = loader().prepare(vec![
            package("A", "1.0").with_dependency("B", v("1.0")),
            package("B", "1.0").with_dependency("A", v("1.0")),
        ]);
        assert!(result.load_order.is_empty());

        let chain = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        for name in ["A", "B"] {
            assert_eq!(
                result.invalid_status(name),
                Some(&NodeStatus::InvalidRecursive {
                    chain: chain.clone()
                })
            );
        }
        assert!(result
            .invalid
            .iter()
            .all(|m| m.diagnostic == "Circular dependency - circular dependency: A -> B -> A"));
    }

    #[test]
    fn test_scenario_d_newest_duplicate_wins() {
        let result = loader().prepare(vec![package("Z", "1.0"), package("Z", "2.0")]);
        assert_eq!(result.load_order.len(), 1);
        assert_eq!(result.load_order[0].metadata.version, v("2.0"));
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn test_scenario_e_missing_loader_requirement() {
        let orphan = PackageMetadata::new("Orphan", v("1.0")).with_dependency("Y", v("1.0"));
        let result = loader().prepare(vec![orphan, package("Y", "1.0")]);

        assert_eq!(result.load_order_names(), ["Y"]);
        assert_eq!(
            result.invalid_status("orphan"),
            Some(&NodeStatus::InvalidNotFound {
                requirement: "HAT".into()
            })
        );
    }

    #[test]
    fn test_loader_too_old() {
        let modern = PackageMetadata::new("Modern", v("1.0")).with_dependency("hat", v("1.2"));
        let result = loader().prepare(vec![
            modern,
            package("Dependent", "1.0").with_dependency("Modern", v("1.0")),
        ]);

        assert!(result.load_order.is_empty());
        assert!(matches!(
            result.invalid_status("Modern"),
            Some(NodeStatus::InvalidVersionMismatch { found, .. }) if *found == v("1.1.1")
        ));
        // loader rejects never become graph nodes
        assert_eq!(
            result.invalid_status("Dependent"),
            Some(&NodeStatus::InvalidNotFound {
                requirement: "Modern".into()
            })
        );
    }

    #[test]
    fn test_dependency_tree_names_culprit() {
        let result = loader().prepare(vec![
            package("App", "1.0").with_dependency("Lib", v("1.0")),
            package("Lib", "1.0").with_dependency("Missing", v("1.0")),
        ]);

        assert!(result.load_order.is_empty());
        assert_eq!(
            result.invalid_status("App"),
            Some(&NodeStatus::InvalidDependencyTree {
                culprit: "Lib".into()
            })
        );
        assert!(matches!(
            result.invalid_status("Lib"),
            Some(NodeStatus::InvalidNotFound { .. })
        ));
    }

    #[test]
    fn test_diamond_loads_shared_dependency_once() {
        let result = loader().prepare(vec![
            package("Top", "1.0")
                .with_dependency("Left", v("1.0"))
                .with_dependency("Right", v("1.0")),
            package("Left", "1.0").with_dependency("Base", v("1.0")),
            package("Right", "1.0").with_dependency("Base", v("1.0")),
            package("Base", "1.0"),
        ]);
        assert_eq!(result.load_order_names(), ["Base", "Left", "Right", "Top"]);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let result = loader().prepare(vec![
            package("FezMultiplayer", "1.0").with_dependency("fezcore", v("1.0")),
            package("FEZCORE", "1.0"),
        ]);
        assert_eq!(result.load_order_names(), ["FEZCORE", "FezMultiplayer"]);
        assert_eq!(result.position("fezmultiplayer"), Some(1));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 50_000;
        let candidates: Vec<_> = (0..depth)
            .map(|i| {
                let meta = package(&format!("m{i}"), "1.0");
                if i + 1 < depth {
                    meta.with_dependency(format!("m{}", i + 1), v("1.0"))
                } else {
                    meta
                }
            })
            .collect();

        let result = loader().prepare(candidates);
        assert_eq!(result.load_order.len(), depth);
        assert_eq!(result.load_order[0].metadata.name, format!("m{}", depth - 1));
        assert_eq!(result.load_order[depth - 1].metadata.name, "m0");
    }

    #[test]
    fn test_priority_list_and_disabled_from_config() {
        let mut config = Config::default();
        config.mods.disabled = vec!["Cheats".into()];
        let priority = PriorityList::parse("# prefer the stable build\nCore@1.5\n");

        let result = ModLoader::from_config(&config, priority).prepare(vec![
            package("Core", "2.0"),
            package("Core", "1.5"),
            package("Cheats", "1.0"),
            package("Addon", "1.0").with_dependency("Core", v("1.5")),
        ]);

        assert_eq!(result.load_order_names(), ["Core", "Addon"]);
        assert_eq!(result.load_order[0].metadata.version, v("1.5"));
        assert!(result.invalid_status("Cheats").is_none());
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = loader().prepare(vec![
            package("A", "1.0").with_dependency("B", v("1.0")),
            package("B", "1.0").with_dependency("A", v("1.0")),
            package("C", "1.0.0.3"),
        ]);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["load_order"][0]["metadata"]["version"], "1.0.0.3");
        assert_eq!(json["invalid"][0]["status"]["status"], "invalid_recursive");

        let back: ResolverResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    /// Random graphs over `count` mods; each mod may depend on any mod,
    /// including itself and ones that do not exist
    fn arb_candidates() -> impl Strategy<Value = Vec<PackageMetadata>> {
        (1usize..12).prop_flat_map(|count| {
            prop::collection::vec(
                (
                    0u32..4,
                    prop::collection::vec((0usize..count + 2, 0u32..4), 0..4),
                    any::<bool>(),
                ),
                count,
            )
            .prop_map(|specs| {
                specs
                    .into_iter()
                    .enumerate()
                    .map(|(i, (minor, deps, with_loader))| {
                        let mut meta = PackageMetadata::new(format!("m{i}"), Version::new(1, minor, 0, 0));
                        if with_loader {
                            meta = meta.with_dependency("HAT", Version::new(1, 0, 0, 0));
                        }
                        for (target, min_minor) in deps {
                            meta = meta.with_dependency(
                                format!("m{target}"),
                                Version::new(1, min_minor, 0, 0),
                            );
                        }
                        meta
                    })
                    .collect()
            })
        })
    }

    proptest! {
        #[test]
        fn prop_load_order_is_topological(candidates in arb_candidates()) {
            let result = resolve(candidates, &host());
            let mut loaded = HashSet::new();
            for resolved in &result.load_order {
                for dependency in &resolved.dependencies {
                    prop_assert!(loaded.contains(&dependency.to_lowercase()));
                }
                loaded.insert(resolved.metadata.key());
            }
        }

        #[test]
        fn prop_every_candidate_reported_once(candidates in arb_candidates()) {
            let expected: HashSet<String> = candidates.iter().map(PackageMetadata::key).collect();
            let result = resolve(candidates, &host());

            let mut seen = HashSet::new();
            for metadata in result
                .load_order
                .iter()
                .map(|m| &m.metadata)
                .chain(result.invalid.iter().map(|m| &m.metadata))
            {
                prop_assert!(seen.insert(metadata.key()));
            }
            prop_assert_eq!(seen, expected);
            prop_assert!(result.invalid.iter().all(|m| !m.status.is_valid()));
        }

        #[test]
        fn prop_resolution_is_idempotent(candidates in arb_candidates()) {
            let first = resolve(candidates.clone(), &host());
            let second = resolve(candidates, &host());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_cycle_members_appear_in_their_chain(candidates in arb_candidates()) {
            let result = resolve(candidates, &host());
            for invalid in &result.invalid {
                if let NodeStatus::InvalidRecursive { chain } = &invalid.status {
                    prop_assert!(chain.len() >= 2);
                    prop_assert_eq!(chain.first(), chain.last());
                    prop_assert!(chain.contains(&invalid.metadata.name));
                }
            }
        }
    }
}
