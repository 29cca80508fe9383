use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub backend: BackendConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 300000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Optional TOML catalog file replacing the builtin tool set
    pub path: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { path: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            backend: BackendConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path)
                .context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.log_level.is_none());
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.timeout_ms, 300000);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("botdesk.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log_level: debug\nbackend:\n  base_url: https://bots.example.edu\n  timeout_ms: 60000\ncatalog:\n  path: /etc/botdesk/catalog.toml"
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.backend.base_url, "https://bots.example.edu");
        assert_eq!(config.backend.timeout_ms, 60000);
        assert_eq!(
            config.catalog.path.as_deref(),
            Some(Path::new("/etc/botdesk/catalog.toml"))
        );
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("botdesk.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "backend:\n  base_url: http://10.0.0.5:9000").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:9000");
        // Unspecified values keep their defaults.
        assert_eq!(config.backend.timeout_ms, 300000);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_config_explicit_missing_file_is_an_error() {
        let result = Config::load(Some(&PathBuf::from("/nonexistent/botdesk.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("botdesk.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "backend: [not, a, mapping]").unwrap();

        let result = Config::load(Some(&path));
        assert!(result.is_err());
    }
}
