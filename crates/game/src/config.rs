//! Game configuration (window, script, stage tuning). Loaded from config.ron at startup.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::PathBuf;

/// Settings read once at startup from `config.ron` in the current directory.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Directory holding the script and sound samples.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Script file name inside `data_dir`, one message per line.
    #[serde(default = "default_script")]
    pub script: String,
    /// Fixed seed for letter jitter. Unset means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub stage: StageConfig,
}

/// Layout, pacing and volume of the letter stage.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Idle seconds after the screen clears before the next word appears.
    pub pacing_seconds: f32,
    /// Largest vertical step between neighbouring letters of a word.
    pub max_letter_offset: f32,
    pub x_bound_min: f32,
    pub x_bound_max: f32,
    /// Letters stay within `[-y_bound, y_bound]`.
    pub y_bound: f32,
    /// Cue volume; the ambient loop plays at half of it.
    pub volume: f32,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_script() -> String {
    "message.txt".to_string()
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            pacing_seconds: 1.5,
            max_letter_offset: 2.0,
            x_bound_min: -3.75,
            x_bound_max: 4.0,
            y_bound: 3.0,
            volume: 10.0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            data_dir: default_data_dir(),
            script: default_script(),
            seed: None,
            stage: StageConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::from_ron(&data).unwrap_or_else(|e| {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No config at {:?}, using defaults", path);
                Self::default()
            }
        }
    }

    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }

    pub fn script_path(&self) -> PathBuf {
        self.data_dir.join(&self.script)
    }

    /// Random source for letter jitter.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn empty_ron_gives_defaults() {
        let config = GameConfig::from_ron("()").unwrap();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.script_path(), PathBuf::from("data").join("message.txt"));
        assert_eq!(config.seed, None);
        assert_eq!(config.stage, StageConfig::default());
    }

    #[test]
    fn partial_stage_keeps_other_defaults() {
        let config = GameConfig::from_ron("(seed: Some(42), stage: (pacing_seconds: 0.5))").unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stage.pacing_seconds, 0.5);
        assert_eq!(config.stage.y_bound, 3.0);
        assert_eq!(config.stage.volume, 10.0);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = GameConfig { seed: Some(9), ..Default::default() };
        let a: f32 = config.rng().gen();
        let b: f32 = config.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(GameConfig::from_ron("(window_width: \"wide\")").is_err());
    }
}
