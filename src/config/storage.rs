//! Result storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where ranked result files are written
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for `result_<timestamp>.csv` files, created on first write
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyOutputDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("uploads")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("uploads"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_output_dir() {
        let config = StorageConfig {
            output_dir: PathBuf::new(),
        };
        assert!(matches!(config.validate(), Err(ValidationError::EmptyOutputDir)));
    }
}
