use crate::errors::{Result, TerraceError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub git: GitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Default base branch for new stacks
    pub default_branch: String,
    /// Branch names that terminate ancestor walks (usually remote-tracking
    /// refs like `origin/main`). Traversals never walk past these.
    pub mainline_branches: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            git: GitConfig::default(),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            default_branch: "main".to_string(),
            mainline_branches: vec!["origin/main".to_string(), "origin/master".to_string()],
        }
    }
}

impl Settings {
    /// Create default settings for a repository
    pub fn default_for_repo(default_branch: Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(branch) = default_branch {
            settings.git.default_branch = branch;
        }
        settings
    }

    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| TerraceError::config(format!("Failed to read config file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| TerraceError::config(format!("Failed to parse config file: {}", e)))?;

        Ok(settings)
    }

    /// Save settings to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TerraceError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| TerraceError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Update a configuration value by key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(TerraceError::config(format!(
                "Invalid config key format: {}",
                key
            )));
        }

        match (parts[0], parts[1]) {
            ("git", "default_branch") => self.git.default_branch = value.to_string(),
            ("git", "mainline_branches") => {
                self.git.mainline_branches = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => return Err(TerraceError::config(format!("Unknown config key: {}", key))),
        }

        Ok(())
    }

    /// Get a configuration value by key
    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(TerraceError::config(format!(
                "Invalid config key format: {}",
                key
            )));
        }

        match (parts[0], parts[1]) {
            ("git", "default_branch") => Ok(self.git.default_branch.clone()),
            ("git", "mainline_branches") => Ok(self.git.mainline_branches.join(",")),
            _ => Err(TerraceError::config(format!("Unknown config key: {}", key))),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.git.default_branch.trim().is_empty() {
            return Err(TerraceError::config("Default branch must not be empty"));
        }

        if self
            .git
            .mainline_branches
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(TerraceError::config(
                "Mainline branch names must not be empty",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.git.default_branch, "main");
        assert_eq!(
            settings.git.mainline_branches,
            vec!["origin/main", "origin/master"]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");

        let mut settings = Settings::default();
        settings.git.default_branch = "trunk".to_string();
        settings.git.mainline_branches = vec!["origin/trunk".to_string()];
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.git.default_branch, "trunk");
        assert_eq!(loaded.git.mainline_branches, vec!["origin/trunk"]);
    }

    #[test]
    fn test_set_and_get_values() {
        let mut settings = Settings::default();

        settings.set_value("git.default_branch", "develop").unwrap();
        assert_eq!(settings.get_value("git.default_branch").unwrap(), "develop");

        settings
            .set_value("git.mainline_branches", "origin/develop, origin/main")
            .unwrap();
        assert_eq!(
            settings.git.mainline_branches,
            vec!["origin/develop", "origin/main"]
        );

        assert!(settings.set_value("nope", "x").is_err());
        assert!(settings.set_value("git.unknown", "x").is_err());
        assert!(settings.get_value("git.unknown").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let mut settings = Settings::default();
        settings.git.mainline_branches.push("  ".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.git.default_branch = String::new();
        assert!(settings.validate().is_err());
    }
}
