use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::{Difficulty, GenerationParams};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_lessons_dir")]
    pub lessons_dir: String,
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_min_exercises")]
    pub min_exercises: usize,
    #[serde(default = "default_max_exercises")]
    pub max_exercises: usize,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("satzbau")
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_lessons_dir() -> String {
    data_dir().join("lessons").to_string_lossy().to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    data_dir().join("logs").to_string_lossy().to_string()
}
fn default_difficulty() -> String {
    Difficulty::default().as_str().to_string()
}
fn default_min_exercises() -> usize {
    1
}
fn default_max_exercises() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            lessons_dir: default_lessons_dir(),
            shuffle_seed: None,
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            difficulty: default_difficulty(),
            min_exercises: default_min_exercises(),
            max_exercises: default_max_exercises(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write the config back to the user's config file and return its path.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("satzbau")
            .join("config.toml")
    }

    pub fn normalize(&mut self) {
        self.normalize_difficulty();
        self.min_exercises = self.min_exercises.max(1);
        if self.max_exercises < self.min_exercises {
            self.max_exercises = self.min_exercises;
        }
    }

    /// Unknown CEFR levels fall back to the default.
    pub fn normalize_difficulty(&mut self) {
        match Difficulty::from_name(&self.difficulty) {
            Some(level) => self.difficulty = level.as_str().to_string(),
            None => self.difficulty = default_difficulty(),
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            difficulty: Difficulty::from_name(&self.difficulty).unwrap_or_default(),
            min_exercises: self.min_exercises,
            max_exercises: self.max_exercises,
            ..GenerationParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.shuffle_seed, None);
        assert_eq!(config.log_level, "info");
        assert!(config.lessons_dir.contains("lessons"));
        assert!(config.log_dir.contains("logs"));
    }

    #[test]
    fn test_config_serde_partial_file() {
        let toml_str = r#"
theme = "gruvbox-dark"
shuffle_seed = 17
difficulty = "b1"
"#;
        let mut config: Config = toml::from_str(toml_str).unwrap();
        config.normalize();
        assert_eq!(config.theme, "gruvbox-dark");
        assert_eq!(config.shuffle_seed, Some(17));
        assert_eq!(config.difficulty, "B1");
        assert_eq!(config.max_exercises, 10);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.shuffle_seed = Some(5);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.shuffle_seed, deserialized.shuffle_seed);
        assert_eq!(config.lessons_dir, deserialized.lessons_dir);
        assert_eq!(config.difficulty, deserialized.difficulty);
    }

    #[test]
    fn test_config_save_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().theme, "catppuccin-mocha");

        let mut config = Config::default();
        config.theme = "gruvbox-dark".to_string();
        config.shuffle_seed = Some(42);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "gruvbox-dark");
        assert_eq!(loaded.shuffle_seed, Some(42));
        assert_eq!(loaded.max_exercises, config.max_exercises);
    }

    #[test]
    fn test_normalize_unknown_difficulty_resets() {
        let mut config = Config::default();
        config.difficulty = "C2".to_string();
        config.normalize_difficulty();
        assert_eq!(config.difficulty, "A1");
    }

    #[test]
    fn test_normalize_exercise_bounds() {
        let mut config = Config::default();
        config.min_exercises = 0;
        config.max_exercises = 0;
        config.normalize();
        assert_eq!(config.min_exercises, 1);
        assert_eq!(config.max_exercises, 1);

        let params = config.generation_params();
        assert_eq!(params.min_exercises, 1);
        assert_eq!(params.target_language, "de");
    }
}
