// File: ./src/config.rs
use crate::harmony::GenerationMode;
use crate::model::{PALETTE_SIZE, Preset};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 0.0 reuses liked colors, 1.0 explores freely.
    pub creativity: f64,
    pub mode: GenerationMode,
    pub palette_size: usize,
    pub preset: Option<Preset>,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
    /// Where learning and session files live. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            creativity: 0.5,
            mode: GenerationMode::Random,
            palette_size: PALETTE_SIZE,
            preset: None,
            seed: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "hueloom", "hueloom")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Loads the user config. A missing file is not an error.
    pub fn load() -> Result<Self> {
        match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.creativity = config.creativity.clamp(0.0, 1.0);
        config.palette_size = config.palette_size.max(1);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn fields_parse_and_clamp() {
        let config = Config::parse(
            r#"
            creativity = 3.5
            mode = "triadic"
            palette_size = 0
            preset = "pastel"
            seed = 42
            data_dir = "/tmp/hueloom"
            "#,
        )
        .unwrap();
        assert_eq!(config.creativity, 1.0);
        assert_eq!(config.mode, GenerationMode::Triadic);
        assert_eq!(config.palette_size, 1);
        assert_eq!(config.preset, Some(Preset::Pastel));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/hueloom")));
    }

    #[test]
    fn bad_mode_is_an_error() {
        assert!(Config::parse("mode = \"sepia\"").is_err());
    }
}
