//! File-based application configuration

use crate::error::{CarPriceError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    pub base_directory: PathBuf,
    pub models_directory: PathBuf,
}

impl PathsConfig {
    /// Models directory resolved against the base directory
    pub fn models_path(&self) -> PathBuf {
        self.base_directory.join(&self.models_directory)
    }
}

/// Listen address of the prediction API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlsConfig {
    pub api_host: String,
    pub api_port: u16,
}

/// Top-level YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub urls: UrlsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                base_directory: PathBuf::from("."),
                models_directory: PathBuf::from("models"),
            },
            urls: UrlsConfig {
                api_host: "0.0.0.0".to_string(),
                api_port: 8000,
            },
        }
    }
}

/// Load and parse a YAML configuration file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CarPriceError::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let config: AppConfig = serde_yaml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config() {
        let f = write_yaml(
            r#"
paths:
  base_directory: /srv/cars
  models_directory: models
urls:
  api_host: 127.0.0.1
  api_port: 9000
"#,
        );
        let config = load_config(f.path()).unwrap();
        assert_eq!(config.urls.api_port, 9000);
        assert_eq!(config.urls.api_host, "127.0.0.1");
        assert_eq!(config.paths.models_path(), PathBuf::from("/srv/cars/models"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_config(Path::new("/nonexistent/car-price.yaml")).unwrap_err();
        assert!(matches!(err, CarPriceError::ConfigError(_)));
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let f = write_yaml("paths:\n  base_directory: .\n  models_directory: models\n");
        let err = load_config(f.path()).unwrap_err();
        assert!(matches!(err, CarPriceError::ConfigError(_)));
    }
}
