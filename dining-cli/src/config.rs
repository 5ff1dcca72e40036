use anyhow::{Context, Result};
use dining_core::TableConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub table: TableConfig,
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dining")
            .join("config.json")
    }

    /// Load from `path`, or from the default location when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: CliConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.table.validate()?;

        tracing::debug!(
            "Loaded config: {} cryptographers, payer {:?}",
            config.table.participants,
            config.table.payer
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dining_core::PayerPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_load_partial_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"table":{"participants":5,"payer":"nobody"}}"#).unwrap();

        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.table.participants, 5);
        assert_eq!(config.table.payer, PayerPolicy::Nobody);
        assert_eq!(config.table.seed, None);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("absent.json");

        assert!(CliConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"table":{"participants":2}}"#).unwrap();

        assert!(CliConfig::load(Some(&path)).is_err());
    }
}
