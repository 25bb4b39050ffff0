//! Resolved run configuration.

use figgen_client::{ClientConfig, RetryPolicy};
use figgen_model::snapshot;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public URL prefix of the PNG renders.
pub const FIGMA_PUBLIC_ROOT: &str = "/assets/figma";

/// Public URL prefix of the component SVG renders.
pub const ICONS_PUBLIC_ROOT: &str = "/assets/icons";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not set (pass {flag} or set it in the environment or .env)")]
    Missing {
        var: &'static str,
        flag: &'static str,
    },

    #[error("invalid file id `{0}`: only letters, digits, `_` and `-` are allowed")]
    InvalidFileId(String),
}

/// Everything a subcommand needs, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub file_id: String,
    token: Option<String>,
    pub paths: Paths,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    pub api_base: String,
    pub concurrency: usize,
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            api_base: figgen_client::DEFAULT_API_BASE.to_string(),
            concurrency: 8,
            timeout: Duration::from_secs(30),
            retries: 3,
        }
    }
}

impl Config {
    pub fn new(
        file_id: Option<String>,
        token: Option<String>,
        root: &Path,
        http: HttpSettings,
    ) -> Result<Self, ConfigError> {
        let file_id = non_empty(file_id).ok_or(ConfigError::Missing {
            var: "FIGMA_FILE_ID",
            flag: "--file-id",
        })?;
        if !is_valid_file_id(&file_id) {
            return Err(ConfigError::InvalidFileId(file_id));
        }
        Ok(Self {
            file_id,
            token: non_empty(token),
            paths: Paths::new(root),
            http,
        })
    }

    /// The access token, for commands that talk to the API.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::Missing {
            var: "FIGMA_ACCESS_TOKEN",
            flag: "--token",
        })
    }

    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut cfg = ClientConfig::new(self.require_token()?);
        cfg.api_base = self.http.api_base.clone();
        cfg.timeout = self.http.timeout;
        cfg.retry = RetryPolicy {
            max_retries: self.http.retries,
            ..RetryPolicy::default()
        };
        Ok(cfg)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        snapshot::snapshot_path(&self.paths.json_dir, &self.file_id)
    }
}

/// On-disk layout under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub json_dir: PathBuf,
    pub figma_assets_dir: PathBuf,
    pub icons_dir: PathBuf,
    pub images_dir: PathBuf,
    pub generated_dir: PathBuf,
    pub icon_components_dir: PathBuf,
}

impl Paths {
    pub fn new(root: &Path) -> Self {
        let assets = root.join("public").join("assets");
        let components = root.join("src").join("components");
        Self {
            json_dir: root.join("json"),
            figma_assets_dir: assets.join("figma"),
            icons_dir: assets.join("icons"),
            images_dir: assets.join("images"),
            generated_dir: components.join("generated"),
            icon_components_dir: components.join("icons"),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_valid_file_id(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(file_id: Option<&str>, token: Option<&str>) -> Result<Config, ConfigError> {
        Config::new(
            file_id.map(str::to_string),
            token.map(str::to_string),
            Path::new("site"),
            HttpSettings::default(),
        )
    }

    #[test]
    fn test_missing_file_id() {
        assert_eq!(
            config(None, Some("t")).unwrap_err(),
            ConfigError::Missing {
                var: "FIGMA_FILE_ID",
                flag: "--file-id"
            }
        );
        assert!(matches!(
            config(Some("  "), Some("t")),
            Err(ConfigError::Missing { .. })
        ));
    }

    #[test]
    fn test_invalid_file_id() {
        assert_eq!(
            config(Some("../etc"), None).unwrap_err(),
            ConfigError::InvalidFileId("../etc".into())
        );
        assert!(config(Some("AbC_12-x"), None).is_ok());
    }

    #[test]
    fn test_token_only_required_on_demand() {
        let cfg = config(Some("key"), None).unwrap();
        assert_eq!(
            cfg.require_token().unwrap_err(),
            ConfigError::Missing {
                var: "FIGMA_ACCESS_TOKEN",
                flag: "--token"
            }
        );
        assert!(cfg.client_config().is_err());

        let cfg = config(Some("key"), Some("secret")).unwrap();
        assert_eq!(cfg.require_token().unwrap(), "secret");
    }

    #[test]
    fn test_client_config_carries_http_settings() {
        let mut cfg = config(Some("key"), Some("secret")).unwrap();
        cfg.http.retries = 0;
        cfg.http.timeout = Duration::from_secs(5);
        let client = cfg.client_config().unwrap();
        assert_eq!(client.token, "secret");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.retry.max_retries, 0);
    }

    #[test]
    fn test_paths() {
        let cfg = config(Some("key"), None).unwrap();
        assert_eq!(cfg.snapshot_path(), PathBuf::from("site/json/figma-file-key.json"));
        assert_eq!(cfg.paths.figma_assets_dir, PathBuf::from("site/public/assets/figma"));
        assert_eq!(cfg.paths.icons_dir, PathBuf::from("site/public/assets/icons"));
        assert_eq!(cfg.paths.images_dir, PathBuf::from("site/public/assets/images"));
        assert_eq!(cfg.paths.generated_dir, PathBuf::from("site/src/components/generated"));
        assert_eq!(cfg.paths.icon_components_dir, PathBuf::from("site/src/components/icons"));
    }
}
