//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only modified section is changed)
//! - Validation on load (unknown sections trigger a clean re-save)
//! - Preserves comments and formatting with toml_edit

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the engine's settings file.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Changes are only in memory until `save()` or `update_section()`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", self.config_path.display());
        Ok(())
    }

    /// Load config from file, creating it with defaults if missing.
    ///
    /// A file with unknown sections or missing keys is saved back cleaned.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = parse_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::info!("Rewriting cleaned config {}", self.config_path.display());
                self.save()?;
            }
        } else {
            tracing::info!("Creating default config {}", self.config_path.display());
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Create the logs and replacement list folders.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        for dir in [self.logs_folder(), self.replacements_dir()] {
            if !dir.exists() {
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }

    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.logging.logs_folder)
    }

    pub fn replacements_dir(&self) -> PathBuf {
        self.settings.spell_check.replacements_dir()
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk and replaces only that section, so other
    /// sections and their comments stay as they are on disk.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_doc: DocumentMut = section_toml(&self.settings, section)?.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        tracing::debug!("Updated config section [{}]", section.table_name());
        Ok(())
    }

    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();
        output.push_str("# Subtitle document engine configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n",
        );

        for section in ConfigSection::ALL {
            output.push('\n');
            output.push_str(&format!("# {}\n", section.comment()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in section_toml(&self.settings, section)?.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }
        Ok(output)
    }

    /// Write to a temp file in the same folder, then rename over the config.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.config_path)?;
        Ok(())
    }
}

/// Parse settings and tell whether the file needs rewriting.
fn parse_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let has_unknown = doc.iter().any(|(key, _)| {
        !ConfigSection::ALL
            .iter()
            .any(|section| section.table_name() == key)
    });

    // Defaults filled in for missing keys make a section longer than on disk.
    let mut missing_keys = false;
    for section in ConfigSection::ALL {
        let expected: DocumentMut = section_toml(&settings, section)?.parse()?;
        let found = doc
            .get(section.table_name())
            .and_then(Item::as_table)
            .map_or(0, |table| table.len());
        if found != expected.as_table().len() {
            missing_keys = true;
        }
    }

    Ok((settings, has_unknown || missing_keys))
}

/// Serialize one section without its table header.
fn section_toml(settings: &Settings, section: ConfigSection) -> ConfigResult<String> {
    Ok(match section {
        ConfigSection::Files => toml::to_string_pretty(&settings.files)?,
        ConfigSection::Editor => toml::to_string_pretty(&settings.editor)?,
        ConfigSection::Durations => toml::to_string_pretty(&settings.durations)?,
        ConfigSection::SpellCheck => toml::to_string_pretty(&settings.spell_check)?,
        ConfigSection::Logging => toml::to_string_pretty(&settings.logging)?,
    })
}
