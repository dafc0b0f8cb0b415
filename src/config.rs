//! Tracker configuration read from `employee-tracker.yaml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "employee-tracker.yaml";
pub const DEFAULT_DATABASE: &str = "employee_tracker.db";
pub const DATABASE_ENV: &str = "EMPLOYEE_TRACKER_DB";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// SQLite database file.
    pub database: PathBuf,
    /// Insert the demo dataset into an empty database on startup.
    pub seed: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            seed: false,
        }
    }
}

fn read_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(TrackerConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicit config file, or `employee-tracker.yaml` in `dir` when it
/// exists, or the defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<TrackerConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let default_path = dir.join(CONFIG_FILE);
    if default_path.is_file() {
        read_config(&default_path)
    } else {
        Ok(TrackerConfig::default())
    }
}

/// Pick the database path: command-line flag, then environment, then config.
pub fn resolve_database(
    config: &TrackerConfig,
    env_value: Option<String>,
    flag: Option<PathBuf>,
) -> PathBuf {
    flag.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| config.database.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.database, PathBuf::from("employee_tracker.db"));
    }

    #[test]
    fn test_default_file_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "database: staff.db\nseed: true\n").unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config.database, PathBuf::from("staff.db"));
        assert!(config.seed);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "seed: true\n").unwrap();
        let config = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        assert!(config.seed);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "").unwrap();
        assert_eq!(
            load_config(Some(&path), dir.path()).unwrap(),
            TrackerConfig::default()
        );
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(
            load_config(Some(&path), dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "seed: [not, a, bool]\n").unwrap();
        assert!(matches!(
            load_config(None, dir.path()),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn test_resolve_database_precedence() {
        let config = TrackerConfig {
            database: PathBuf::from("from-config.db"),
            seed: false,
        };
        assert_eq!(
            resolve_database(&config, None, None),
            PathBuf::from("from-config.db")
        );
        assert_eq!(
            resolve_database(&config, Some("from-env.db".to_string()), None),
            PathBuf::from("from-env.db")
        );
        assert_eq!(
            resolve_database(&config, Some(String::new()), None),
            PathBuf::from("from-config.db")
        );
        assert_eq!(
            resolve_database(
                &config,
                Some("from-env.db".to_string()),
                Some(PathBuf::from("from-flag.db"))
            ),
            PathBuf::from("from-flag.db")
        );
    }
}
