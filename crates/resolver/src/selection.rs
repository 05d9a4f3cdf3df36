//! Candidate filtering and duplicate selection

use hat_config::PriorityList;
use hat_types::{PackageMetadata, Version};
use std::collections::{HashMap, HashSet};

/// A candidate dropped because another copy of the same mod won
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscardedDuplicate {
    pub metadata: PackageMetadata,
    /// Version of the copy that was kept
    pub kept_version: Version,
}

/// Output of duplicate selection
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// At most one candidate per name, in order of first discovery
    pub kept: Vec<PackageMetadata>,
    pub discarded: Vec<DiscardedDuplicate>,
}

/// Remove candidates whose folded name is in `disabled`
///
/// Returns `(kept, disabled)`, both in input order.
#[must_use]
pub fn filter_disabled(
    candidates: Vec<PackageMetadata>,
    disabled: &HashSet<String>,
) -> (Vec<PackageMetadata>, Vec<PackageMetadata>) {
    if disabled.is_empty() {
        return (candidates, Vec::new());
    }
    candidates
        .into_iter()
        .partition(|candidate| !disabled.contains(&candidate.key()))
}

/// Keep one candidate per case-insensitive name
///
/// Within a group the winner is the candidate with the lowest priority list
/// rank (unlisted candidates rank after every listed one), then the highest
/// version, then the earliest discovered.
#[must_use]
pub fn select_unique(candidates: Vec<PackageMetadata>, priority: &PriorityList) -> Selection {
    let mut groups: Vec<Vec<PackageMetadata>> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = candidate.key();
        if let Some(&group) = by_key.get(&key) {
            groups[group].push(candidate);
        } else {
            by_key.insert(key, groups.len());
            groups.push(vec![candidate]);
        }
    }

    let mut selection = Selection::default();
    for mut group in groups {
        if group.len() > 1 {
            // stable: equal keys keep discovery order
            group.sort_by_cached_key(|candidate| {
                (
                    priority.rank(candidate).unwrap_or(usize::MAX),
                    std::cmp::Reverse(candidate.version),
                )
            });
        }

        let mut members = group.into_iter();
        let Some(winner) = members.next() else {
            continue;
        };
        for loser in members {
            tracing::info!(
                name = %loser.name,
                kept = %winner.version,
                discarded = %loser.version,
                "discarding duplicate mod"
            );
            selection.discarded.push(DiscardedDuplicate {
                metadata: loser,
                kept_version: winner.version,
            });
        }
        selection.kept.push(winner);
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn names(mods: &[PackageMetadata]) -> Vec<String> {
        mods.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_highest_version_wins_without_priority() {
        let selection = select_unique(
            vec![
                PackageMetadata::new("Z", v("1.0")),
                PackageMetadata::new("z", v("2.0")),
            ],
            &PriorityList::default(),
        );
        assert_eq!(names(&selection.kept), ["z 2.0"]);
        assert_eq!(selection.discarded.len(), 1);
        assert_eq!(selection.discarded[0].metadata.version, v("1.0"));
        assert_eq!(selection.discarded[0].kept_version, v("2.0"));
    }

    #[test]
    fn test_pinned_priority_beats_version() {
        let priority = PriorityList::parse("Core@1.0\n");
        let selection = select_unique(
            vec![
                PackageMetadata::new("Core", v("2.0")),
                PackageMetadata::new("Core", v("1.0")),
            ],
            &priority,
        );
        assert_eq!(names(&selection.kept), ["Core 1.0"]);
    }

    #[test]
    fn test_equal_candidates_keep_first_discovered() {
        let selection = select_unique(
            vec![
                PackageMetadata::new("Dup", v("1.0")).with_author("first"),
                PackageMetadata::new("DUP", v("1.0")).with_author("second"),
            ],
            &PriorityList::default(),
        );
        assert_eq!(selection.kept[0].author, "first");
    }

    #[test]
    fn test_output_follows_first_discovery() {
        let selection = select_unique(
            vec![
                PackageMetadata::new("B", v("1.0")),
                PackageMetadata::new("A", v("1.0")),
                PackageMetadata::new("b", v("3.0")),
                PackageMetadata::new("C", v("1.0")),
            ],
            &PriorityList::default(),
        );
        assert_eq!(names(&selection.kept), ["b 3.0", "A 1.0", "C 1.0"]);
    }

    #[test]
    fn test_filter_disabled_is_case_insensitive() {
        let disabled: HashSet<String> = ["speedrun".to_string()].into_iter().collect();
        let (kept, dropped) = filter_disabled(
            vec![
                PackageMetadata::new("SpeedRun", v("1.0")),
                PackageMetadata::new("Other", v("1.0")),
            ],
            &disabled,
        );
        assert_eq!(names(&kept), ["Other 1.0"]);
        assert_eq!(names(&dropped), ["SpeedRun 1.0"]);
    }
}
