use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::scores::FileScoreStore;

const CONFIG_FILE: &str = "space-attack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Runtime settings. Gameplay tuning lives in `game::tuning`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub scores_path: PathBuf,
    pub log_path: PathBuf,
    pub leaderboard_size: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16, // ~60 FPS
            scores_path: FileScoreStore::default_path(),
            log_path: beside_executable("space-attack.log"),
            leaderboard_size: 8,
            seed: None,
        }
    }
}

impl Config {
    /// Defaults, then the config file if present, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var_os("SPACE_ATTACK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| beside_executable(CONFIG_FILE));
        let mut config = Self::from_file(&path)?;
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(ms) = var("SPACE_ATTACK_TICK_MS").and_then(|v| v.parse().ok()) {
            self.tick_rate_ms = ms;
        }
        if let Some(path) = var("SPACE_ATTACK_SCORES") {
            self.scores_path = PathBuf::from(path);
        }
        if let Some(path) = var("SPACE_ATTACK_LOG") {
            self.log_path = PathBuf::from(path);
        }
        if let Some(seed) = var("SPACE_ATTACK_SEED").and_then(|v| v.parse().ok()) {
            self.seed = Some(seed);
        }
    }
}

fn beside_executable(name: &str) -> PathBuf {
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join(name);
        }
    }
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_rate_ms, 16);
        assert_eq!(config.leaderboard_size, 8);
    }

    #[test]
    fn file_overrides_only_what_it_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "tick_rate_ms = 33\nseed = 42\nscores_path = \"/tmp/x.scores\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.tick_rate_ms, 33);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.scores_path, PathBuf::from("/tmp/x.scores"));
        assert_eq!(config.leaderboard_size, 8);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "tick_rate_ms = \"fast\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn environment_wins_over_file() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "SPACE_ATTACK_TICK_MS" => Some("20".into()),
            "SPACE_ATTACK_SEED" => Some("not a number".into()),
            "SPACE_ATTACK_LOG" => Some("/tmp/sa.log".into()),
            _ => None,
        });
        assert_eq!(config.tick_rate_ms, 20);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_path, PathBuf::from("/tmp/sa.log"));
    }
}
