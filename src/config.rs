use crate::error::{ClipError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base directory for downloads and clips; timestamped subdirectories
    /// are created under it.
    pub output_dir: Option<PathBuf>,
    /// Caption language requested from the downloader.
    pub caption_lang: String,
    /// Original-language text above the translation in bilingual output.
    pub primary_first: bool,
    /// Cap for filenames derived from video titles.
    pub max_filename_length: usize,
    /// Cues per translation request batch.
    pub translation_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            caption_lang: "en".to_string(),
            primary_first: true,
            max_filename_length: 100,
            translation_batch_size: crate::translate::DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(dir) = std::env::var("YTCLIP_OUTPUT_DIR") {
            config.output_dir = Some(PathBuf::from(dir));
        }
        if let Ok(lang) = std::env::var("YTCLIP_CAPTION_LANG") {
            config.caption_lang = lang;
        }
        if let Ok(order) = std::env::var("YTCLIP_PRIMARY_FIRST") {
            if let Ok(b) = order.parse() {
                config.primary_first = b;
            }
        }
        if let Ok(batch) = std::env::var("YTCLIP_TRANSLATION_BATCH_SIZE") {
            if let Ok(n) = batch.parse() {
                config.translation_batch_size = n;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.caption_lang.is_empty() {
            return Err(ClipError::Config(
                "caption_lang must not be empty".to_string(),
            ));
        }
        if self.max_filename_length == 0 {
            return Err(ClipError::Config(
                "max_filename_length must be greater than 0".to_string(),
            ));
        }
        if self.translation_batch_size == 0 {
            return Err(ClipError::Config(
                "translation_batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ytclip").join("config.toml"))
    }
}
