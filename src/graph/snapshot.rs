use crate::errors::Result;
use crate::git::GitRepository;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// An immutable snapshot of the branch dependency graph.
///
/// Each local branch may point at one parent via git configuration; the
/// graph is the implied edge set branch -> parent. The snapshot is taken
/// once per command invocation, so every traversal runs over a consistent
/// view instead of re-reading live configuration mid-walk.
///
/// Mainline branches (e.g. `origin/main`) are valid terminating ancestors
/// even though they are not part of the local-branch universe; traversals
/// never walk past them. A configured parent that is neither a local branch
/// nor a mainline name is dangling and treated as "no parent".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchGraph {
    /// Local branches, sorted so sibling ordering is reproducible
    branches: Vec<String>,
    /// Configured parent pointer per branch, exactly as read from config
    parents: BTreeMap<String, String>,
    /// Names that terminate ancestor walks
    mainline: BTreeSet<String>,
}

impl BranchGraph {
    /// Create a graph from in-memory data.
    ///
    /// Branches are sorted and deduplicated; parent entries for names
    /// outside the branch universe are discarded.
    pub fn new(
        branches: Vec<String>,
        parents: BTreeMap<String, String>,
        mainline: BTreeSet<String>,
    ) -> Self {
        let mut branches = branches;
        branches.sort();
        branches.dedup();

        let parents = parents
            .into_iter()
            .filter(|(branch, _)| branches.binary_search(branch).is_ok())
            .collect();

        Self {
            branches,
            parents,
            mainline,
        }
    }

    /// Snapshot the graph from a repository: one branch enumeration plus one
    /// parent-config read per branch.
    pub fn from_repository(repo: &GitRepository, mainline: &[String]) -> Result<Self> {
        let branches = repo.list_branches()?;

        let mut parents = BTreeMap::new();
        for branch in &branches {
            if let Some(parent) = repo.get_branch_parent(branch) {
                parents.insert(branch.clone(), parent);
            }
        }

        tracing::debug!(
            "Snapshotted {} branches ({} with parents)",
            branches.len(),
            parents.len()
        );

        Ok(Self::new(
            branches,
            parents,
            mainline.iter().cloned().collect(),
        ))
    }

    /// All local branches, sorted
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// The configured mainline set
    pub fn mainline(&self) -> &BTreeSet<String> {
        &self.mainline
    }

    /// Check if a name is a local branch
    pub fn is_local(&self, name: &str) -> bool {
        self.branches.binary_search_by(|b| b.as_str().cmp(name)).is_ok()
    }

    /// Check if a name is in the mainline set
    pub fn is_mainline(&self, name: &str) -> bool {
        self.mainline.contains(name)
    }

    /// The parent pointer exactly as configured, if any
    pub fn configured_parent(&self, branch: &str) -> Option<&str> {
        self.parents.get(branch).map(String::as_str)
    }

    /// The effective parent of a branch: the configured pointer when it
    /// resolves to a local branch or a mainline name, otherwise none.
    pub fn parent_of(&self, branch: &str) -> Option<&str> {
        let parent = self.configured_parent(branch)?;
        if self.is_local(parent) || self.is_mainline(parent) {
            Some(parent)
        } else {
            None
        }
    }

    /// Every branch whose effective parent is `parent`, in lexicographic
    /// order. Linear scan over the branch universe.
    pub fn children_of(&self, parent: &str) -> Vec<&str> {
        self.branches
            .iter()
            .filter(|branch| self.parent_of(branch) == Some(parent))
            .map(String::as_str)
            .collect()
    }

    /// Branches whose configured parent resolves to neither a local branch
    /// nor a mainline name, paired with the unresolvable pointer. These are
    /// tolerated (treated as parent-less) by every traversal; surfacing
    /// them is left to doctor-style consumers.
    pub fn dangling_parents(&self) -> Vec<(String, String)> {
        self.parents
            .iter()
            .filter(|(_, parent)| !self.is_local(parent) && !self.is_mainline(parent))
            .map(|(branch, parent)| (branch.clone(), parent.clone()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::BranchGraph;

    /// Build a graph from borrowed test data
    pub(crate) fn graph(
        branches: &[&str],
        parents: &[(&str, &str)],
        mainline: &[&str],
    ) -> BranchGraph {
        BranchGraph::new(
            branches.iter().map(|b| b.to_string()).collect(),
            parents
                .iter()
                .map(|(b, p)| (b.to_string(), p.to_string()))
                .collect(),
            mainline.iter().map(|m| m.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::graph;

    #[test]
    fn test_branches_are_sorted_and_deduplicated() {
        let g = graph(&["zeta", "alpha", "mid", "alpha"], &[], &[]);
        assert_eq!(g.branches(), &["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_parent_resolution() {
        let g = graph(
            &["feature-a", "feature-b", "feature-c"],
            &[
                ("feature-a", "origin/main"),
                ("feature-b", "feature-a"),
                ("feature-c", "origin/feature-ghost"),
            ],
            &["origin/main"],
        );

        // local parent
        assert_eq!(g.parent_of("feature-b"), Some("feature-a"));
        // mainline parent
        assert_eq!(g.parent_of("feature-a"), Some("origin/main"));
        // dangling parent: configured but not effective
        assert_eq!(g.configured_parent("feature-c"), Some("origin/feature-ghost"));
        assert_eq!(g.parent_of("feature-c"), None);
        // no parent at all
        assert_eq!(g.parent_of("unknown"), None);
    }

    #[test]
    fn test_children_are_lexicographic() {
        let g = graph(
            &["base", "z-child", "a-child", "m-child"],
            &[
                ("z-child", "base"),
                ("a-child", "base"),
                ("m-child", "base"),
            ],
            &[],
        );

        assert_eq!(g.children_of("base"), vec!["a-child", "m-child", "z-child"]);
        assert!(g.children_of("z-child").is_empty());
    }

    #[test]
    fn test_parent_entries_outside_universe_are_discarded() {
        let g = graph(&["feature-a"], &[("ghost", "feature-a")], &[]);
        assert_eq!(g.configured_parent("ghost"), None);
        assert!(g.children_of("feature-a").is_empty());
    }

    #[test]
    fn test_dangling_parents() {
        let g = graph(
            &["feature-a", "feature-b"],
            &[
                ("feature-a", "origin/main"),
                ("feature-b", "origin/feature-ghost"),
            ],
            &["origin/main"],
        );

        assert_eq!(
            g.dangling_parents(),
            vec![(
                "feature-b".to_string(),
                "origin/feature-ghost".to_string()
            )]
        );
    }

    #[test]
    fn test_is_local_and_is_mainline() {
        let g = graph(&["feature-a"], &[], &["origin/main"]);
        assert!(g.is_local("feature-a"));
        assert!(!g.is_local("origin/main"));
        assert!(g.is_mainline("origin/main"));
        assert!(!g.is_mainline("feature-a"));
    }
}
