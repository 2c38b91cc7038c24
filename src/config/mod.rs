pub mod settings;

pub use settings::{GitConfig, Settings};

use crate::errors::{Result, TerraceError};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the Terrace configuration directory (~/.terrace/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| TerraceError::config("Could not find home directory"))?;
    Ok(home_dir.join(".terrace"))
}

/// Get the Terrace configuration directory for a specific repository
pub fn get_repo_config_dir(repo_path: &Path) -> Result<PathBuf> {
    let config_dir = repo_path.join(".terrace");
    Ok(config_dir)
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        fs::create_dir_all(config_dir).map_err(|e| {
            TerraceError::config(format!("Failed to create config directory: {}", e))
        })?;
    }

    Ok(())
}

/// Check if a repository is initialized for Terrace
pub fn is_repo_initialized(repo_path: &Path) -> bool {
    let config_dir = repo_path.join(".terrace");
    config_dir.exists() && config_dir.join("config.json").exists()
}

/// Load the settings for a repository, falling back to defaults when the
/// repository has no config file yet.
pub fn load_repo_settings(repo_path: &Path) -> Result<Settings> {
    let config_dir = get_repo_config_dir(repo_path)?;
    Settings::load_from_file(&config_dir.join("config.json"))
}

/// Initialize a repository for Terrace
pub fn initialize_repo(repo_path: &Path, default_branch: Option<String>) -> Result<()> {
    let config_dir = get_repo_config_dir(repo_path)?;
    ensure_config_dir(&config_dir)?;

    let settings = Settings::default_for_repo(default_branch);
    settings.save_to_file(&config_dir.join("config.json"))?;

    tracing::info!("Initialized Terrace repository at {}", repo_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_config_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = get_repo_config_dir(tmp.path()).unwrap();
        assert_eq!(dir, tmp.path().join(".terrace"));
    }

    #[test]
    fn test_initialize_and_load() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_repo_initialized(tmp.path()));

        initialize_repo(tmp.path(), Some("develop".to_string())).unwrap();
        assert!(is_repo_initialized(tmp.path()));

        let settings = load_repo_settings(tmp.path()).unwrap();
        assert_eq!(settings.git.default_branch, "develop");
    }

    #[test]
    fn test_load_missing_settings_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load_repo_settings(tmp.path()).unwrap();
        assert_eq!(settings.git.default_branch, "main");
        assert!(!settings.git.mainline_branches.is_empty());
    }
}
