//! Position values and representation modes.

use serde::{Deserialize, Serialize};

use crate::calc::Calculator;
use crate::error::CalcError;

/// A point in time, in one of three representations.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// Time string, `[-]HH:MM:SS.mmm`.
    Time(String),
    /// Frame number.
    Frame(i64),
    /// Seconds.
    Seconds(f64),
}

impl Position {
    /// Value in seconds at the framerate of `calc`.
    pub fn to_seconds(&self, calc: &Calculator) -> Result<f64, CalcError> {
        match self {
            Self::Time(time) => calc.time_to_seconds(time),
            Self::Frame(frame) => Ok(calc.frame_to_seconds(*frame)),
            Self::Seconds(seconds) => Ok(*seconds),
        }
    }

    /// Value as the nearest frame at the framerate of `calc`.
    pub fn to_frame(&self, calc: &Calculator) -> Result<i64, CalcError> {
        match self {
            Self::Frame(frame) => Ok(*frame),
            other => Ok(calc.seconds_to_frame(other.to_seconds(calc)?)),
        }
    }

    /// Whether both positions use the same representation.
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<f64> for Position {
    fn from(seconds: f64) -> Self {
        Self::Seconds(seconds)
    }
}

impl From<i64> for Position {
    fn from(frame: i64) -> Self {
        Self::Frame(frame)
    }
}

impl From<&str> for Position {
    fn from(time: &str) -> Self {
        Self::Time(time.to_string())
    }
}

/// Representation subtitles store their positions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Time,
    Frame,
}
