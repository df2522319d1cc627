//! Error types for the subtitle document engine.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SubdocError>;

/// Top-level error wrapping every failure the engine can report.
#[derive(Debug, thiserror::Error)]
pub enum SubdocError {
    /// Position calculation error.
    #[error("Calculation error: {0}")]
    Calc(#[from] CalcError),

    /// File read/write error.
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Batch transform error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Spell-check error.
    #[error("Spell-check error: {0}")]
    Spell(#[from] SpellError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from time/frame/seconds conversions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// Framerate is zero, negative or not a finite number.
    #[error("Invalid framerate: {0}")]
    InvalidFrameRate(f64),

    /// Time string is not of the form `[-]HH:MM:SS.mmm`.
    #[error("Invalid time: '{0}'")]
    InvalidTime(String),
}

/// Errors from reading or writing subtitle files.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// File could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Bytes are not valid in the configured encoding.
    #[error("Failed to decode '{path}' as {encoding}")]
    Decode { path: PathBuf, encoding: String },

    /// Text contains a character the configured encoding cannot represent.
    #[error("Failed to encode {character:?} for '{path}' as {encoding}")]
    Encode {
        path: PathBuf,
        encoding: String,
        character: char,
    },

    /// Format could not be determined from extension or content.
    #[error("Unknown subtitle format for file '{0}'")]
    UnknownFormat(PathBuf),
}

/// Errors from batch position/duration transforms.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// A requested index is not in the collection.
    #[error("Index {index} out of range for {len} subtitles")]
    IndexOutOfRange { index: usize, len: usize },

    /// The two reference points share the same current position.
    #[error("Reference subtitles {first} and {second} have the same position")]
    DegenerateTransform { first: usize, second: usize },

    /// The two reference points use different position representations.
    #[error("Reference points use different position kinds")]
    MixedPositionKinds,

    /// Underlying calculation failed.
    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Errors from the spell-check subsystem.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    /// Operation needs a flagged word but the navigator has none.
    #[error("No word is currently flagged")]
    NoCurrentWord,

    /// Replacement list could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FileError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, encoding: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            encoding: encoding.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(path: impl Into<PathBuf>, encoding: impl Into<String>, character: char) -> Self {
        Self::Encode {
            path: path.into(),
            encoding: encoding.into(),
            character,
        }
    }
}

impl SpellError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
