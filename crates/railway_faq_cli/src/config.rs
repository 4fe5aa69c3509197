use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use railway_faq_core::{
    DEFAULT_ENDPOINT, DEFAULT_TARGET_LANG, DEFAULT_THRESHOLD, DEFAULT_TIMEOUT_SECS,
};
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub threshold: f32,
    pub extended: bool,
    pub log_dir: PathBuf,
    pub corpus: Option<PathBuf>,
    pub translate: TranslateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub target_lang: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            extended: false,
            log_dir: PathBuf::from("."),
            corpus: None,
            translate: TranslateConfig::default(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: DEFAULT_ENDPOINT.into(),
            target_lang: DEFAULT_TARGET_LANG.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Reads the file named by `--config`, or the per-user default when it exists,
    /// then applies command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => load_config(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => load_config(&path)?,
                _ => Config::default(),
            },
        };

        if let Some(threshold) = cli.threshold {
            config.threshold = threshold;
        }
        if cli.extended {
            config.extended = true;
        }
        if let Some(dir) = &cli.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(corpus) = &cli.corpus {
            config.corpus = Some(corpus.clone());
        }
        if cli.no_translate {
            config.translate.enabled = false;
        }

        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("railway-faq").join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse config {}", path.display()))
}
