//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calc::DEFAULT_FRAMERATE;
use crate::files::{Encoding, Newline, SubtitleFormat};
use crate::logging::LogLevel;
use crate::project::Mode;
use crate::transform::DurationOptions;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// File format defaults.
    #[serde(default)]
    pub files: FileSettings,

    /// Editing defaults.
    #[serde(default)]
    pub editor: EditorSettings,

    /// Duration adjustment defaults.
    #[serde(default)]
    pub durations: DurationSettings,

    /// Spell-check settings.
    #[serde(default)]
    pub spell_check: SpellCheckSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults for opening and saving subtitle files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Character encoding.
    #[serde(default)]
    pub encoding: Encoding,

    /// Line ending used when writing.
    #[serde(default)]
    pub newline: Newline,

    /// Format used when saving a new document.
    #[serde(default)]
    pub format: SubtitleFormat,
}

/// Defaults for new projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Framerate of new projects.
    #[serde(default = "default_framerate")]
    pub framerate: f64,

    /// Position mode of new projects.
    #[serde(default)]
    pub mode: Mode,
}

fn default_framerate() -> f64 {
    DEFAULT_FRAMERATE
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            framerate: default_framerate(),
            mode: Mode::default(),
        }
    }
}

/// Duration adjustment defaults.
///
/// Each bound is only applied when its `use_*` switch is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationSettings {
    #[serde(default = "default_true")]
    pub use_optimal: bool,

    /// Seconds per character.
    #[serde(default = "default_optimal")]
    pub optimal: f64,

    #[serde(default = "default_true")]
    pub lengthen: bool,

    #[serde(default)]
    pub shorten: bool,

    #[serde(default = "default_true")]
    pub use_minimum: bool,

    #[serde(default = "default_minimum")]
    pub minimum: f64,

    #[serde(default)]
    pub use_maximum: bool,

    #[serde(default = "default_maximum")]
    pub maximum: f64,

    #[serde(default)]
    pub use_gap: bool,

    #[serde(default)]
    pub gap: f64,
}

fn default_true() -> bool {
    true
}

fn default_optimal() -> f64 {
    0.065
}

fn default_minimum() -> f64 {
    1.5
}

fn default_maximum() -> f64 {
    6.0
}

impl Default for DurationSettings {
    fn default() -> Self {
        Self {
            use_optimal: true,
            optimal: default_optimal(),
            lengthen: true,
            shorten: false,
            use_minimum: true,
            minimum: default_minimum(),
            use_maximum: false,
            maximum: default_maximum(),
            use_gap: false,
            gap: 0.0,
        }
    }
}

impl DurationSettings {
    /// Options for [`Project::adjust_durations`](crate::project::Project::adjust_durations).
    pub fn to_options(&self) -> DurationOptions {
        let enabled = |on: bool, value: f64| on.then_some(value);
        DurationOptions {
            optimal: enabled(self.use_optimal, self.optimal),
            lengthen: self.lengthen,
            shorten: self.shorten,
            minimum: enabled(self.use_minimum, self.minimum),
            maximum: enabled(self.use_maximum, self.maximum),
            gap: enabled(self.use_gap, self.gap),
        }
    }
}

/// Spell-check configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckSettings {
    /// Language code, e.g. `en_US`.
    #[serde(default = "default_language")]
    pub language: String,

    /// Folder for replacement lists. Empty uses the platform config folder.
    #[serde(default)]
    pub replacements_folder: String,
}

fn default_language() -> String {
    "en_US".to_string()
}

impl Default for SpellCheckSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            replacements_folder: String::new(),
        }
    }
}

impl SpellCheckSettings {
    /// Folder replacement lists are read from and written to.
    ///
    /// Falls back to `spell-check` in the current folder when the platform
    /// has no config folder.
    pub fn replacements_dir(&self) -> PathBuf {
        if !self.replacements_folder.is_empty() {
            return PathBuf::from(&self.replacements_folder);
        }
        directories::ProjectDirs::from("", "", "subdoc")
            .map(|dirs| dirs.config_dir().join("spell-check"))
            .unwrap_or_else(|| PathBuf::from("spell-check"))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Also write logs to a daily file in `logs_folder`.
    #[serde(default)]
    pub log_to_file: bool,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_to_file: false,
            logs_folder: default_logs_folder(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Files,
    Editor,
    Durations,
    SpellCheck,
    Logging,
}

impl ConfigSection {
    pub const ALL: [Self; 5] = [
        Self::Files,
        Self::Editor,
        Self::Durations,
        Self::SpellCheck,
        Self::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Files => "files",
            ConfigSection::Editor => "editor",
            ConfigSection::Durations => "durations",
            ConfigSection::SpellCheck => "spell_check",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub(crate) fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Files => "Subtitle file defaults",
            ConfigSection::Editor => "New project defaults",
            ConfigSection::Durations => "Duration adjustment defaults",
            ConfigSection::SpellCheck => "Spell-check",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
