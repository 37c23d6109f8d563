///! CLI configuration management
///!
///! Resolution order: built-in defaults, then a TOML file, then `PTR_*`
///! environment variables.

use anyhow::{Context, Result};
use awesome_ptr_core::PullToRefreshConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_output: String,
    pub pull: PullToRefreshConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_output: "table".to_string(),
            pull: PullToRefreshConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration, preferring `explicit` over the standard locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit.map(Path::to_path_buf).or_else(Self::find_config_file) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config
            .pull
            .validate()
            .context("invalid pull-to-refresh configuration")?;

        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            Some(PathBuf::from("./ptr.toml")),
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config/awesome-ptr/config.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply `PTR_*` overrides read through `lookup`. Unparseable values are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("PTR_TRIGGER_HEIGHT") {
            override_with(&mut self.pull.trigger_height, "PTR_TRIGGER_HEIGHT", &value);
        }
        if let Some(value) = lookup("PTR_PROGRESS_HEIGHT") {
            override_with(&mut self.pull.progress_height, "PTR_PROGRESS_HEIGHT", &value);
        }
        if let Some(value) = lookup("PTR_TENSION") {
            override_with(&mut self.pull.tension, "PTR_TENSION", &value);
        }
        if let Some(value) = lookup("PTR_BOUNCE") {
            override_with(&mut self.pull.is_bounce_supported, "PTR_BOUNCE", &value);
        }
        if let Some(value) = lookup("PTR_COMPLETE_DELAY_MS") {
            override_with(&mut self.pull.complete_delay_ms, "PTR_COMPLETE_DELAY_MS", &value);
        }
        if let Some(value) = lookup("PTR_REFRESH_DELAY_MS") {
            override_with(&mut self.pull.refresh_delay_ms, "PTR_REFRESH_DELAY_MS", &value);
        }
    }
}

fn override_with<T: std::str::FromStr>(field: &mut T, key: &str, value: &str) {
    match value.trim().parse() {
        Ok(parsed) => *field = parsed,
        Err(_) => tracing::warn!("Ignoring {}: cannot parse '{}'", key, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_output, "table");
        assert_eq!(config.pull.trigger_height, 80.0);
        assert!(!config.pull.is_bounce_supported);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("PTR_TRIGGER_HEIGHT", "120"),
            ("PTR_TENSION", "0.9"),
            ("PTR_BOUNCE", "true"),
            ("PTR_COMPLETE_DELAY_MS", "400"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());

        assert_eq!(config.pull.trigger_height, 120.0);
        assert_eq!(config.pull.tension, 0.9);
        assert!(config.pull.is_bounce_supported);
        assert_eq!(config.pull.complete_delay_ms, 400);
        assert_eq!(config.pull.refresh_delay_ms, 0);
    }

    #[test]
    fn test_bad_override_keeps_value() {
        let vars = env(&[("PTR_PROGRESS_HEIGHT", "tall")]);
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.pull.progress_height, 50.0);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("ptr-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "default_output = \"json\"\n\n[pull]\ntriggerHeight = 96.0\nisBounceSupported = true\ncompleteDelayMs = 300"
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.default_output, "json");
        assert_eq!(config.pull.trigger_height, 96.0);
        assert!(config.pull.is_bounce_supported);
        assert_eq!(config.pull.complete_delay_ms, 300);
        assert_eq!(config.pull.tension, 0.82);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Config::load_from_file(Path::new("/nonexistent/ptr.toml")).is_err());
    }
}
