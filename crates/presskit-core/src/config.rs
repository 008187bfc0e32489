//! Configuration management for Presskit.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/presskit/config.toml` (or platform equivalent)
/// unless an explicit path is given. If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listing source and its filter profile
    pub discovery: DiscoveryConfig,
    /// HTTP request settings
    pub fetch: FetchConfig,
    /// Politeness delays
    pub pacing: PacingConfig,
    /// Enrichment behavior
    pub enrichment: EnrichmentConfig,
    /// Record store location and persistence policy
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PRESSKIT_STORE_PATH`: Override the record store path
    /// - `PRESSKIT_ENTITY_DELAY_MS`: Override the delay between entities
    /// - `PRESSKIT_OFFSETS`: Override discovery offsets (comma separated)
    /// - `PRESSKIT_SKIP_POLICY`: Override the skip policy (`has-emails`, `has-any-contact`, `never`)
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<()> {
        if let Some(val) = lookup("PRESSKIT_STORE_PATH") {
            tracing::debug!("Override store.path from env: {}", val);
            self.store.path = PathBuf::from(val);
        }

        if let Some(val) = lookup("PRESSKIT_ENTITY_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                self.pacing.entity_delay_ms = delay;
                tracing::debug!("Override pacing.entity_delay_ms from env: {}", delay);
            }
        }

        if let Some(val) = lookup("PRESSKIT_OFFSETS") {
            self.discovery.offsets = parse_offsets(&val)?;
            tracing::debug!("Override discovery.offsets from env: {:?}", self.discovery.offsets);
        }

        if let Some(val) = lookup("PRESSKIT_SKIP_POLICY") {
            self.enrichment.skip_policy = val.parse()?;
            tracing::debug!("Override enrichment.skip_policy from env: {}", val);
        }

        Ok(())
    }

    /// Reject values the crawler cannot run with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.discovery.offsets.is_empty() {
            return Err(invalid("discovery.offsets", "must contain at least one offset"));
        }
        if self.discovery.page_size == 0 {
            return Err(invalid("discovery.page_size", "must be greater than zero"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs", "must be greater than zero"));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(invalid("store.path", "must not be empty"));
        }
        Ok(())
    }

    /// Serialize the effective configuration.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/presskit/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/presskit`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("dev", "presskit", "presskit").ok_or(ConfigError::NoConfigDir)
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a comma separated offset list such as `0,50,100`.
pub fn parse_offsets(value: &str) -> ConfigResult<Vec<u32>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|e| invalid("discovery.offsets", &format!("'{part}': {e}")))
        })
        .collect()
}

/// Storefront search endpoint and the fixed filter profile sent with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Search results endpoint
    pub base_url: String,
    /// Result offsets to request, in order
    pub offsets: Vec<u32>,
    /// Rows per page
    pub page_size: u32,
    /// Store category filter
    pub category: String,
    /// Platform filter
    pub platform: String,
    /// Supported-language filter
    pub language: String,
    /// Restrict to "coming soon" listings
    pub coming_soon: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://store.steampowered.com/search/results/".to_string(),
            offsets: vec![0, 50, 100],
            page_size: 50,
            category: "998".to_string(),
            platform: "win".to_string(),
            language: "english".to_string(),
            coming_soon: true,
        }
    }
}

/// HTTP request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// `Accept-Language` header
    pub accept_language: String,
    /// Cookie sent to pass the storefront's age gate
    pub age_gate_cookie: String,
    /// Bodies beyond this size are truncated
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            age_gate_cookie:
                "birthtime=0; lastagecheckage=1-0-1900; wants_mature_content=1; mature_content=1"
                    .to_string(),
            max_body_bytes: 4 * 1024 * 1024,
        }
    }
}

/// Politeness delays, all in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each entity that did network work
    pub entity_delay_ms: u64,
    /// Pause before fetching a contact/about page
    pub secondary_delay_ms: u64,
    /// Pause between discovery pages
    pub page_delay_ms: u64,
    /// Upper bound of the random jitter added to each pause
    pub jitter_ms: u64,
    /// Minimum gap between two requests to the same host
    pub per_host_interval_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            entity_delay_ms: 1500,
            secondary_delay_ms: 750,
            page_delay_ms: 2000,
            jitter_ms: 500,
            per_host_interval_ms: 1000,
        }
    }
}

/// Enrichment behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// When an already-known listing is left alone
    pub skip_policy: SkipPolicy,
}

/// Rule deciding which known listings get no network work at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipPolicy {
    /// Skip listings that already have at least one email
    #[default]
    HasEmails,
    /// Skip listings with any contact channel
    HasAnyContact,
    /// Re-enrich everything
    Never,
}

impl std::str::FromStr for SkipPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "has-emails" => Ok(Self::HasEmails),
            "has-any-contact" => Ok(Self::HasAnyContact),
            "never" => Ok(Self::Never),
            other => Err(invalid(
                "enrichment.skip_policy",
                &format!("unknown policy '{other}'"),
            )),
        }
    }
}

/// What to do when the store file exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorruptStorePolicy {
    /// Move the unreadable file aside and start empty
    #[default]
    BackupAndReset,
    /// Refuse to run
    Abort,
}

/// Record store location and persistence policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Record store JSON file
    pub path: PathBuf,
    /// Run summary JSON file
    pub summary_path: PathBuf,
    /// "Last active" marker, written at run start
    pub heartbeat_path: Option<PathBuf>,
    /// Save every N processed entities (0 = only at the end)
    pub checkpoint_every: usize,
    /// Corrupt store handling
    pub on_corrupt: CorruptStorePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = AppConfig::data_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            path: data_dir.join("records.json"),
            summary_path: data_dir.join("run_summary.json"),
            heartbeat_path: Some(data_dir.join("last_run.txt")),
            checkpoint_every: 25,
            on_corrupt: CorruptStorePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.discovery.offsets, vec![0, 50, 100]);
        assert_eq!(config.discovery.page_size, 50);
        assert!(config.discovery.coming_soon);
        assert_eq!(config.enrichment.skip_policy, SkipPolicy::HasEmails);
        assert_eq!(config.store.on_corrupt, CorruptStorePolicy::BackupAndReset);
        assert!(config.fetch.age_gate_cookie.contains("birthtime"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = config.to_toml().expect("serialize default config");
        assert!(toml_str.contains("[discovery]"));
        assert!(toml_str.contains("[pacing]"));
        assert!(toml_str.contains("skip_policy = \"has-emails\""));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.discovery.base_url, config.discovery.base_url);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[discovery]
offsets = [0, 25]

[store]
path = "data/records.json"
checkpoint_every = 5
on_corrupt = "abort"
"#,
        )
        .expect("write config file");

        let config = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(config.discovery.offsets, vec![0, 25]);
        assert_eq!(config.store.path, PathBuf::from("data/records.json"));
        assert_eq!(config.store.checkpoint_every, 5);
        assert_eq!(config.store.on_corrupt, CorruptStorePolicy::Abort);
        // Untouched sections keep defaults
        assert_eq!(config.pacing.entity_delay_ms, 1500);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = AppConfig::load_from(Path::new("/nonexistent/presskit.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PRESSKIT_STORE_PATH", "/tmp/records.json"),
            ("PRESSKIT_ENTITY_DELAY_MS", "0"),
            ("PRESSKIT_OFFSETS", "0, 50"),
            ("PRESSKIT_SKIP_POLICY", "never"),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| env.get(key).map(ToString::to_string))
            .expect("apply overrides");

        assert_eq!(config.store.path, PathBuf::from("/tmp/records.json"));
        assert_eq!(config.pacing.entity_delay_ms, 0);
        assert_eq!(config.discovery.offsets, vec![0, 50]);
        assert_eq!(config.enrichment.skip_policy, SkipPolicy::Never);
    }

    #[test]
    fn test_env_override_rejects_bad_policy() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "PRESSKIT_SKIP_POLICY").then(|| "sometimes".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_offsets() {
        let mut config = AppConfig::default();
        config.discovery.offsets.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!(parse_offsets("0,50,100").expect("parse"), vec![0, 50, 100]);
        assert_eq!(parse_offsets(" 10 , ").expect("parse"), vec![10]);
        assert!(parse_offsets("0,abc").is_err());
    }
}
