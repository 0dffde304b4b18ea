//! Path resolution for serenity configuration and data files.
//!
//! All serenity data is stored in `~/.serenity/` (or `$SERENITY_HOME`):
//! - `config.yaml` - Main configuration file
//! - `serenity.db` - SQLite database holding the mood and journal logs

use std::path::PathBuf;

use crate::error::SerenityError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "SERENITY_HOME";

/// Paths to serenity configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.serenity/`
    pub root: PathBuf,
    /// Config file: `~/.serenity/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.serenity/serenity.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$SERENITY_HOME`, falling back to `~/.serenity`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, SerenityError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            SerenityError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".serenity")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("serenity.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), SerenityError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                SerenityError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-serenity");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("serenity.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join(".serenity"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
