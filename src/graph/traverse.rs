use super::BranchGraph;
use crate::errors::{Result, TerraceError};
use std::collections::{BTreeSet, HashSet, VecDeque};

impl BranchGraph {
    /// Trace the ancestors of `start`: `[parent, grandparent, .., root]`.
    ///
    /// The walk stops at a mainline branch, a parent-less branch, or a
    /// dangling pointer; neither `start` nor the mainline terminator is
    /// included. A revisited branch is a cycle and fails with the repeated
    /// edge; the walk therefore takes at most one step per local branch.
    pub fn ancestors(&self, start: &str) -> Result<Vec<String>> {
        let mut ancestors = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(start);

        let mut current = start;
        while let Some(parent) = self.parent_of(current) {
            if self.is_mainline(parent) {
                break;
            }
            if !visited.insert(parent) {
                return Err(TerraceError::cycle([current, parent]));
            }
            ancestors.push(parent.to_string());
            current = parent;
        }

        Ok(ancestors)
    }

    /// Discover all descendants of `start` in level order, nearest first.
    /// `start` itself is not included.
    pub fn descendants(&self, start: &str) -> Result<Vec<String>> {
        let seeds = self
            .children_of(start)
            .into_iter()
            .map(String::from)
            .collect();
        self.walk_level_order(seeds)
    }

    /// The maximal connected set around `start`: the branch itself, its
    /// ancestors, and its descendants, as a sorted set. A `start` that is
    /// not a local branch yields the empty set.
    pub fn connected_branches(&self, start: &str) -> Result<BTreeSet<String>> {
        let mut connected = BTreeSet::new();
        if !self.is_local(start) {
            return Ok(connected);
        }

        connected.insert(start.to_string());
        connected.extend(self.ancestors(start)?);
        connected.extend(self.descendants(start)?);
        Ok(connected)
    }

    /// The most-ancestral branch of `start`'s stack: the last ancestor, or
    /// `start` itself when it has none. Cycle errors propagate unchanged.
    pub fn stack_base(&self, start: &str) -> Result<String> {
        let ancestors = self.ancestors(start)?;
        Ok(ancestors
            .last()
            .cloned()
            .unwrap_or_else(|| start.to_string()))
    }

    /// Every branch of `start`'s stack in parent-before-child order,
    /// beginning with the stack base. Returns an empty list when the base
    /// is not a local branch.
    ///
    /// If `start` is never reached while walking from its own base the
    /// configuration is locally inconsistent; this is logged as a warning
    /// and the computed order is still returned.
    pub fn stack_branches(&self, start: &str) -> Result<Vec<String>> {
        let base = self.stack_base(start)?;
        if !self.is_local(&base) {
            return Ok(Vec::new());
        }

        let order = self.walk_level_order(vec![base.clone()])?;

        if !order.iter().any(|branch| branch == start) {
            tracing::warn!(
                "Branch '{}' was not reached while walking its own stack from base '{}'; \
                 parent configuration may be inconsistent",
                start,
                base
            );
        }

        Ok(order)
    }

    /// Breadth-first walk over child edges from the given seed branches,
    /// emitting each branch at most once in level order. Each queue entry
    /// carries its path from the seed; a child already on the path is a
    /// cycle and fails with that path.
    fn walk_level_order(&self, seeds: Vec<String>) -> Result<Vec<String>> {
        let mut order = Vec::new();
        let mut queue: VecDeque<(String, Vec<String>)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut processed: HashSet<String> = HashSet::new();

        for seed in seeds {
            visited.insert(seed.clone());
            queue.push_back((seed.clone(), vec![seed]));
        }

        while let Some((branch, path)) = queue.pop_front() {
            // double-emission guard
            if processed.contains(&branch) {
                continue;
            }
            processed.insert(branch.clone());
            order.push(branch.clone());

            for child in self.children_of(&branch) {
                if path.iter().any(|step| step == child) {
                    let mut cycle = path;
                    cycle.push(child.to_string());
                    return Err(TerraceError::cycle(cycle));
                }
                if !visited.contains(child) {
                    visited.insert(child.to_string());
                    let mut child_path = path.clone();
                    child_path.push(child.to_string());
                    queue.push_back((child.to_string(), child_path));
                }
            }
        }

        Ok(order)
    }
}
