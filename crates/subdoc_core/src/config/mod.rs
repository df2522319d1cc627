//! Configuration for the subtitle document engine.
//!
//! This module provides:
//! - TOML-based settings with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Defaults for missing keys on load
//!
//! # Example
//!
//! ```no_run
//! use subdoc_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/subdoc.toml");
//! config.load_or_create().unwrap();
//!
//! let options = config.settings().durations.to_options();
//! println!("Minimum duration: {:?}", options.minimum);
//!
//! config.settings_mut().editor.framerate = 25.0;
//! config.update_section(ConfigSection::Editor).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, DurationSettings, EditorSettings, FileSettings, LoggingSettings, Settings,
    SpellCheckSettings,
};
