use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::context::{DEFAULT_ADMIN_PATH_MARKER, DEFAULT_LANGUAGE};
use crate::language_utils::{get_language_name, primary_subtag};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// SQLite database file; the user data directory when absent
    #[serde(default)]
    pub database_path: Option<String>,

    /// Language used when negotiation finds no match
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Languages the site serves
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Request path fragment of the administrative edit interface
    #[serde(default = "default_admin_path_marker")]
    pub admin_path_marker: String,

    /// Models whose fields can be translated
    #[serde(default)]
    pub models: Vec<ModelConfig>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation declaration of one model
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model name, e.g. "post"
    pub name: String,

    /// Related collection holding the translations, e.g. "posttranslation_set"
    pub translation_set: String,

    /// Fields eligible for translation
    #[serde(default)]
    pub translated_fields: Vec<String>,
}

impl ModelConfig {
    pub fn new(name: &str, translation_set: &str, translated_fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            translation_set: translation_set.to_string(),
            translated_fields: translated_fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_supported_languages() -> Vec<String> {
    vec![DEFAULT_LANGUAGE.to_string()]
}

fn default_admin_path_marker() -> String {
    DEFAULT_ADMIN_PATH_MARKER.to_string()
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a configuration file, writing a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        get_language_name(&primary_subtag(&self.default_language))
            .with_context(|| format!("Invalid default language: {}", self.default_language))?;

        if self.supported_languages.is_empty() {
            return Err(anyhow!("At least one supported language is required"));
        }

        for language in &self.supported_languages {
            get_language_name(&primary_subtag(language))
                .with_context(|| format!("Invalid supported language: {}", language))?;
        }

        if !self.supported_languages.contains(&self.default_language) {
            return Err(anyhow!(
                "Default language '{}' is not in the supported languages",
                self.default_language
            ));
        }

        if self.admin_path_marker.trim().is_empty() {
            return Err(anyhow!("Admin path marker must not be empty"));
        }

        let mut names = HashSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(anyhow!("Model name must not be empty"));
            }
            if !names.insert(model.name.as_str()) {
                return Err(anyhow!("Model '{}' is declared twice", model.name));
            }
            if model.translation_set.trim().is_empty() {
                return Err(anyhow!("Model '{}' has no translation set", model.name));
            }
        }

        Ok(())
    }

    /// Look up a model declaration by name
    pub fn model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.iter().find(|model| model.name == name)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            default_language: default_language(),
            supported_languages: default_supported_languages(),
            admin_path_marker: default_admin_path_marker(),
            models: Vec::new(),
            log_level: LogLevel::default(),
        }
    }
}
