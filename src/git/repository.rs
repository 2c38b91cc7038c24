use crate::errors::{Result, TerraceError};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Read-only wrapper around git2::Repository.
///
/// The graph engine only ever reads repository state: it enumerates local
/// branches and reads per-branch parent pointers from git configuration.
/// Everything that mutates the repository (checkout, merge, push, writing
/// config) belongs to the surrounding commands, not here.
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl GitRepository {
    /// Open a Git repository at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| TerraceError::config(format!("Not a git repository: {}", e)))?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| TerraceError::config("Repository has no working directory"))?
            .to_path_buf();

        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Get repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current branch name
    pub fn get_current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| TerraceError::branch(format!("Could not get HEAD: {}", e)))?;

        if let Some(name) = head.shorthand() {
            Ok(name.to_string())
        } else {
            // Detached HEAD - return commit hash
            let commit = head
                .peel_to_commit()
                .map_err(|e| TerraceError::branch(format!("Could not get HEAD commit: {}", e)))?;
            Ok(format!("HEAD@{}", commit.id()))
        }
    }

    /// Check if a local branch exists
    pub fn branch_exists(&self, name: &str) -> bool {
        self.repo.find_branch(name, git2::BranchType::Local).is_ok()
    }

    /// List all local branches.
    ///
    /// The list is materialized fresh on every call; snapshotting is the
    /// caller's job (see `BranchGraph::from_repository`).
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let branches = self
            .repo
            .branches(Some(git2::BranchType::Local))
            .map_err(TerraceError::Git)?;

        let mut branch_names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(TerraceError::Git)?;
            if let Some(name) = branch.name().map_err(TerraceError::Git)? {
                branch_names.push(name.to_string());
            }
        }

        Ok(branch_names)
    }

    /// Read the configured parent of a branch from `branch.<name>.parent`.
    ///
    /// Absence is normal, not fatal, and a failed config read degrades to
    /// "no parent" as well; whether a missing parent matters is the calling
    /// command's decision. An empty or whitespace-only value also reads as
    /// "no parent".
    pub fn get_branch_parent(&self, branch: &str) -> Option<String> {
        let config = self.repo.config().ok()?;
        let key = format!("branch.{}.parent", branch);

        match config.get_string(&key) {
            Ok(value) => {
                let value = value.trim();
                if value.is_empty() {
                    tracing::debug!("Empty parent configured for branch '{}'", branch);
                    None
                } else {
                    Some(value.to_string())
                }
            }
            Err(_) => None,
        }
    }
}
