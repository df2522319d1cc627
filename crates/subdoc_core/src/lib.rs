//! Subtitle document engine.
//!
//! An ordered collection of timed cues with SubRip and TMPlayer readers and
//! writers, time/frame/seconds conversion, revertible batch transforms,
//! inline markup translation and a spell-check navigator. The crate has no
//! UI dependencies.
//!
//! # Example
//!
//! ```no_run
//! use subdoc_core::files::{Encoding, SubtitleFile};
//! use subdoc_core::project::{Mode, Position, Project};
//!
//! let mut project = Project::new(23.976, Mode::Time)?;
//! project.open_main(SubtitleFile::open("movie.srt", Encoding::Utf8)?)?;
//! let outcome = project.shift_positions(None, &Position::Seconds(1.5))?;
//! if let Some(action) = outcome.action {
//!     project.revert(action)?;
//! }
//! # Ok::<(), subdoc_core::SubdocError>(())
//! ```

pub mod calc;
pub mod config;
pub mod error;
pub mod files;
pub mod logging;
pub mod project;
pub mod spell;
pub mod tags;
pub mod transform;

pub use calc::Calculator;
pub use error::{CalcError, FileError, Result, SpellError, SubdocError, TransformError};
pub use project::{Position, Project, RevertibleAction, Subtitle};
pub use transform::{DurationOptions, TransformOutcome};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
