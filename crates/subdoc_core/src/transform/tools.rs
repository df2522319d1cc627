//! Splitting and appending projects.

use super::TransformOutcome;
use crate::error::TransformError;
use crate::project::{Position, Project, Subtitle};

impl Project {
    /// Move subtitles from `index` on into a new project.
    ///
    /// The new project has this project's framerate and mode but no files.
    pub fn split(&mut self, index: usize) -> Result<(Project, TransformOutcome), TransformError> {
        if index > self.len() {
            return Err(TransformError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let mut other = Project::new(self.framerate(), self.mode())?;
        if index == self.len() {
            return Ok((other, TransformOutcome::default()));
        }

        let moved: Vec<usize> = (index..self.len()).collect();
        let subtitles = self.subtitles()[index..].to_vec();
        let action = self.remove_subtitles(&moved)?.described("Splitting project");
        other.insert_subtitles(subtitles.into_iter().enumerate().collect())?;

        tracing::debug!("Split {} subtitles into a new project", moved.len());
        Ok((
            other,
            TransformOutcome {
                changed: moved,
                action: Some(action),
            },
        ))
    }

    /// Append copies of `other`'s subtitles, optionally shifted by `shift`.
    ///
    /// Positions carry over by seconds, so they keep their time when the
    /// framerates differ.
    pub fn append(
        &mut self,
        other: &Project,
        shift: Option<&Position>,
    ) -> Result<TransformOutcome, TransformError> {
        if other.is_empty() {
            return Ok(TransformOutcome::default());
        }

        let mut items = Vec::with_capacity(other.len());
        for (offset, source) in other.subtitles().iter().enumerate() {
            let mut subtitle = self.adapt(source)?;
            if let Some(shift) = shift {
                subtitle.shift_positions(shift)?;
            }
            items.push((self.len() + offset, subtitle));
        }

        let changed: Vec<usize> = items.iter().map(|(index, _)| *index).collect();
        let action = self.insert_subtitles(items)?.described("Appending file");
        tracing::debug!("Appended {} subtitles", changed.len());
        Ok(TransformOutcome {
            changed,
            action: Some(action),
        })
    }

    /// Copy of `source` in this project's mode and framerate.
    fn adapt(&self, source: &Subtitle) -> Result<Subtitle, TransformError> {
        let mut subtitle = self.new_subtitle();
        subtitle.set_start(Position::Seconds(source.start_seconds()))?;
        subtitle.set_end(Position::Seconds(source.end_seconds()))?;
        subtitle.main_text = source.main_text.clone();
        subtitle.tran_text = source.tran_text.clone();
        Ok(subtitle)
    }
}
