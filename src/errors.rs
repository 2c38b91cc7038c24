/// Terrace Error Types
#[derive(Debug, thiserror::Error)]
pub enum TerraceError {
    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Branch management errors
    #[error("Branch error: {0}")]
    Branch(String),

    /// A loop in the branch parent chain. Carries the offending branch
    /// names: the repeated edge for ancestor walks, the walked path for
    /// descendant walks, the stuck set for the whole-repository sort.
    #[error("Branch dependency cycle detected: {}", branches.join(" -> "))]
    CycleDetected { branches: Vec<String> },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TerraceError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TerraceError::Config(msg.into())
    }

    pub fn branch<S: Into<String>>(msg: S) -> Self {
        TerraceError::Branch(msg.into())
    }

    pub fn cycle<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TerraceError::CycleDetected {
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TerraceError>;
