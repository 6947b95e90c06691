use crate::app_dirs::AppDirs;
use crate::settings::{CountRange, Mode, RoundConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk shape of the settings. Missing keys take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub flash_ms: u64,
    pub min_dots: u32,
    pub max_dots: u32,
    pub distractors: bool,
    pub min_distractors: u32,
    pub max_distractors: u32,
    pub separation: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(&RoundConfig::default())
    }
}

impl From<&RoundConfig> for Config {
    fn from(rc: &RoundConfig) -> Self {
        Self {
            mode: rc.mode,
            flash_ms: rc.flash_duration_ms,
            min_dots: rc.target_range.min,
            max_dots: rc.target_range.max,
            distractors: rc.distractors_enabled,
            min_distractors: rc.distractor_range.min,
            max_distractors: rc.distractor_range.max,
            separation: rc.min_separation,
        }
    }
}

impl From<&Config> for RoundConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            mode: cfg.mode,
            flash_duration_ms: cfg.flash_ms,
            target_range: CountRange::new(cfg.min_dots, cfg.max_dots),
            distractors_enabled: cfg.distractors,
            distractor_range: CountRange::new(cfg.min_distractors, cfg.max_distractors),
            min_separation: cfg.separation,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("subitize_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => {
                log::info!("loaded settings from {}", self.path.display());
                cfg
            }
            Err(e) => {
                log::warn!(
                    "ignoring unreadable config {}: {e}",
                    self.path.display()
                );
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config {
            mode: Mode::Flash,
            flash_ms: 400,
            min_dots: 3,
            max_dots: 12,
            distractors: true,
            min_distractors: 2,
            max_distractors: 4,
            separation: 20.0,
        };
        fs::write(&path, serde_json::to_vec_pretty(&cfg).unwrap()).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg, loaded);

        let rc = RoundConfig::from(&loaded);
        assert_eq!(rc.target_range, CountRange::new(3, 12));
        assert_eq!(rc.flash_duration_ms, 400);
        assert!(rc.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mode": "flash", "max_dots": 6 }"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.mode, Mode::Flash);
        assert_eq!(loaded.max_dots, 6);
        assert_eq!(loaded.min_dots, 1);
        assert_eq!(loaded.flash_ms, Config::default().flash_ms);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn round_config_roundtrips_through_file_shape() {
        let rc = RoundConfig::default();
        assert_eq!(RoundConfig::from(&Config::from(&rc)), rc);
    }
}
