//! Subtitle file formats.
//!
//! Readers produce [`RawCues`], three parallel sequences of show times, hide
//! times and texts, and writers consume them. Times are in the internal
//! `HH:MM:SS.mmm` form; text keeps the file's own markup.
//!
//! Reading only fails when the file cannot be read or decoded. Structure
//! the parser does not recognise is skipped line by line.
//!
//! # Components
//!
//! - **encoding**: character encodings and line endings
//! - **subrip**: SubRip (.srt)
//! - **tmplayer**: TMPlayer (.txt)

mod encoding;
pub mod subrip;
pub mod tmplayer;

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use encoding::{split_lines, Encoding, Newline};

use crate::error::FileError;
use crate::project::Mode;
use crate::tags::TagFormat;

/// Show times, hide times and texts of a document, always of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCues {
    shows: Vec<String>,
    hides: Vec<String>,
    texts: Vec<String>,
}

impl RawCues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one cue.
    pub fn push(
        &mut self,
        show: impl Into<String>,
        hide: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.shows.push(show.into());
        self.hides.push(hide.into());
        self.texts.push(text.into());
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn shows(&self) -> &[String] {
        &self.shows
    }

    pub fn hides(&self) -> &[String] {
        &self.hides
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Iterate `(show, hide, text)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.shows
            .iter()
            .zip(&self.hides)
            .zip(&self.texts)
            .map(|((show, hide), text)| (show.as_str(), hide.as_str(), text.as_str()))
    }
}

/// Supported subtitle file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    SubRip,
    TMPlayer,
}

impl SubtitleFormat {
    pub const ALL: [Self; 2] = [Self::SubRip, Self::TMPlayer];

    /// Typical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::SubRip => "srt",
            Self::TMPlayer => "txt",
        }
    }

    /// Native position representation of the format.
    pub fn mode(&self) -> Mode {
        match self {
            Self::SubRip | Self::TMPlayer => Mode::Time,
        }
    }

    /// Markup syntax used in cue text.
    pub fn tag_format(&self) -> TagFormat {
        match self {
            Self::SubRip => TagFormat::SubRip,
            Self::TMPlayer => TagFormat::Internal,
        }
    }

    /// Pattern matching a line that only this format produces.
    pub fn identifier(&self) -> &'static Regex {
        match self {
            Self::SubRip => &subrip::TIME_LINE,
            Self::TMPlayer => &tmplayer::CUE_LINE,
        }
    }

    /// Detect the format from the extension of `path`.
    ///
    /// `.txt` is not mapped since too many formats share it.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "srt" => Some(Self::SubRip),
            _ => None,
        }
    }

    /// Detect the format from the first line any identifier matches.
    pub fn detect<S: AsRef<str>>(lines: &[S]) -> Option<Self> {
        lines.iter().find_map(|line| {
            Self::ALL
                .into_iter()
                .find(|format| format.identifier().is_match(line.as_ref()))
        })
    }

    /// Parse lines of this format.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> RawCues {
        match self {
            Self::SubRip => subrip::parse(lines),
            Self::TMPlayer => tmplayer::parse(lines),
        }
    }

    /// Format cues as text of this format.
    pub fn format(&self, cues: &RawCues, newline: Newline) -> String {
        match self {
            Self::SubRip => subrip::format(cues, newline),
            Self::TMPlayer => tmplayer::format(cues, newline),
        }
    }
}

/// A subtitle file on disk and how to read and write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleFile {
    pub path: PathBuf,
    pub format: SubtitleFormat,
    pub encoding: Encoding,
    pub newline: Newline,
}

impl SubtitleFile {
    /// A UTF-8 file with Unix line endings.
    pub fn new(path: impl Into<PathBuf>, format: SubtitleFormat) -> Self {
        Self {
            path: path.into(),
            format,
            encoding: Encoding::default(),
            newline: Newline::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_newline(mut self, newline: Newline) -> Self {
        self.newline = newline;
        self
    }

    /// Open an existing file, detecting its format.
    ///
    /// The extension is tried first, then the content.
    pub fn open(path: impl Into<PathBuf>, encoding: Encoding) -> Result<Self, FileError> {
        let path = path.into();
        let format = match SubtitleFormat::from_extension(&path) {
            Some(format) => format,
            None => {
                let lines = read_lines(&path, encoding)?;
                SubtitleFormat::detect(&lines).ok_or_else(|| FileError::UnknownFormat(path.clone()))?
            }
        };
        Ok(Self::new(path, format).with_encoding(encoding))
    }

    /// Read the file into cues.
    pub fn read(&self) -> Result<RawCues, FileError> {
        let lines = read_lines(&self.path, self.encoding)?;
        let cues = self.format.parse(&lines);
        tracing::info!(
            "Read {} cues from {} ({:?})",
            cues.len(),
            self.path.display(),
            self.format
        );
        Ok(cues)
    }

    /// Write cues to the file, replacing it.
    ///
    /// A failed write may leave a partial file behind.
    pub fn write(&self, cues: &RawCues) -> Result<(), FileError> {
        let text = self.format.format(cues, self.newline);
        let bytes = self
            .encoding
            .encode(&text)
            .map_err(|c| FileError::encode(&self.path, self.encoding.name(), c))?;
        fs::write(&self.path, bytes).map_err(|e| FileError::io(&self.path, e))?;
        tracing::info!(
            "Wrote {} cues to {} ({:?})",
            cues.len(),
            self.path.display(),
            self.format
        );
        Ok(())
    }
}

fn read_lines(path: &Path, encoding: Encoding) -> Result<Vec<String>, FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::io(path, e))?;
    let text = encoding
        .decode(&bytes)
        .ok_or_else(|| FileError::decode(path, encoding.name()))?;
    Ok(split_lines(&text))
}
