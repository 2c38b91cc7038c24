//! Branch dependency graph
//!
//! This module implements the dependency-tracking core of the toolkit:
//! - An immutable snapshot of branch -> parent pointers ([`BranchGraph`])
//! - Ancestor and descendant traversal with cycle detection
//! - Stack boundary discovery and parent-before-child ordering
//! - Whole-repository topological sorting for bulk operations

pub mod snapshot;
pub mod topo;
pub mod traverse;

pub use snapshot::BranchGraph;
pub use topo::TopologicalOrder;

use crate::config;
use crate::errors::Result;
use crate::git::GitRepository;
use std::path::Path;

/// Build a branch graph for the repository at `path`, using the mainline
/// set from the repository's Terrace settings (or the defaults when the
/// repository is not initialized).
pub fn snapshot_repository(path: &Path) -> Result<BranchGraph> {
    let repo = GitRepository::open(path)?;
    let settings = config::load_repo_settings(repo.path())?;
    settings.validate()?;
    BranchGraph::from_repository(&repo, &settings.git.mainline_branches)
}
