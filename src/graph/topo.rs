use super::BranchGraph;
use crate::errors::{Result, TerraceError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// A whole-repository update order plus the parent map it was derived
/// from, so callers can act on both without re-reading configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologicalOrder {
    /// Every branch participating in a dependency edge, parents before
    /// children
    pub branches: Vec<String>,
    /// Effective parent for each branch that has one
    pub parents: BTreeMap<String, String>,
}

impl BranchGraph {
    /// Order every branch that participates in a dependency edge so that
    /// parents precede children.
    ///
    /// The node set is every branch with an effective parent plus every
    /// name referenced as one; mainline names referenced as parents seed
    /// the order. Children are visited in lexicographic order, so the
    /// result is reproducible for an unchanged configuration. Any
    /// unresolved remainder is a cycle and fails with the stuck set.
    pub fn topological_sort(&self) -> Result<TopologicalOrder> {
        let mut parents: BTreeMap<String, String> = BTreeMap::new();
        for branch in self.branches() {
            if let Some(parent) = self.parent_of(branch) {
                parents.insert(branch.clone(), parent.to_string());
            }
        }

        let mut nodes: BTreeSet<String> = BTreeSet::new();
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut in_degree: BTreeMap<String, usize> = BTreeMap::new();

        // edge direction is parent -> child; iterating the parent map in
        // child order keeps every adjacency list lexicographic
        for (child, parent) in &parents {
            nodes.insert(child.clone());
            nodes.insert(parent.clone());
            children
                .entry(parent.clone())
                .or_default()
                .push(child.clone());
            *in_degree.entry(child.clone()).or_insert(0) += 1;
            in_degree.entry(parent.clone()).or_insert(0);
        }

        let mut queue: VecDeque<String> = nodes
            .iter()
            .filter(|node| in_degree.get(*node) == Some(&0))
            .cloned()
            .collect();

        let mut sorted: Vec<String> = Vec::with_capacity(nodes.len());
        while let Some(node) = queue.pop_front() {
            sorted.push(node.clone());
            if let Some(child_list) = children.get(&node) {
                for child in child_list {
                    if let Some(degree) = in_degree.get_mut(child) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(child.clone());
                        }
                    }
                }
            }
        }

        if sorted.len() < nodes.len() {
            let emitted: HashSet<&str> = sorted.iter().map(String::as_str).collect();
            let stuck: Vec<String> = nodes
                .into_iter()
                .filter(|node| !emitted.contains(node.as_str()))
                .collect();
            return Err(TerraceError::cycle(stuck));
        }

        Ok(TopologicalOrder {
            branches: sorted,
            parents,
        })
    }

    /// Check the whole configuration for dependency cycles
    pub fn validate(&self) -> Result<()> {
        self.topological_sort().map(|_| ())
    }
}
