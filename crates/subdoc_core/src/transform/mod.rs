//! Batch position and duration transforms.
//!
//! Every transform works the same way: validate the selected indices,
//! compute replacement copies of the affected subtitles, drop copies that
//! did not actually change, and commit the rest as one revertible batch.
//! Nothing is mutated when validation fails.
//!
//! # Components
//!
//! - **durations**: lengthening and shortening end positions
//! - **framerate**: setting and converting framerates
//! - **linear**: shifting and two-point linear correction
//! - **tools**: splitting and appending projects

mod durations;
mod framerate;
mod linear;
mod tools;

pub use durations::DurationOptions;
pub use linear::LinearTransform;

use crate::error::TransformError;
use crate::project::{Project, RevertibleAction, Subtitle};

/// Result of a batch transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutcome {
    /// Indices whose subtitles actually changed.
    pub changed: Vec<usize>,
    /// Action undoing the transform, `None` if nothing changed.
    pub action: Option<RevertibleAction>,
}

impl TransformOutcome {
    pub fn is_noop(&self) -> bool {
        self.action.is_none()
    }
}

impl Project {
    /// Selected indices, sorted and unique; `None` or empty selects all.
    pub(crate) fn resolve_indices(
        &self,
        indices: Option<&[usize]>,
    ) -> Result<Vec<usize>, TransformError> {
        match indices {
            Some(indices) if !indices.is_empty() => {
                self.validate_indices(indices)?;
                let mut indices = indices.to_vec();
                indices.sort_unstable();
                indices.dedup();
                Ok(indices)
            }
            _ => Ok((0..self.len()).collect()),
        }
    }

    /// Commit the candidates whose positions differ from the current ones.
    fn commit_positions(
        &mut self,
        candidates: Vec<(usize, Subtitle)>,
        description: &str,
    ) -> Result<TransformOutcome, TransformError> {
        let changes: Vec<(usize, Subtitle)> = candidates
            .into_iter()
            .filter(|(index, new)| {
                let old = &self.subtitles()[*index];
                old.start() != new.start() || old.end() != new.end()
            })
            .collect();
        if changes.is_empty() {
            tracing::debug!("{description}: nothing changed");
            return Ok(TransformOutcome::default());
        }

        let changed: Vec<usize> = changes.iter().map(|(index, _)| *index).collect();
        let action = self.replace_positions(changes)?.described(description);
        tracing::debug!("{description}: changed {} subtitles", changed.len());
        Ok(TransformOutcome {
            changed,
            action: Some(action),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::project::Position;

    /// A time-mode project at 25 fps with one cue per `(start, end)`.
    pub(crate) fn project(cues: &[(f64, f64)]) -> Project {
        let subtitles = cues
            .iter()
            .map(|&(start, end)| {
                let mut sub = Subtitle::default();
                sub.set_start(Position::Seconds(start)).unwrap();
                sub.set_end(Position::Seconds(end)).unwrap();
                sub
            })
            .collect();
        Project::with_subtitles(25.0, subtitles).unwrap()
    }

    #[test]
    fn resolve_indices_defaults_to_all() {
        let project = project(&[(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(project.resolve_indices(None).unwrap(), vec![0, 1]);
        assert_eq!(project.resolve_indices(Some(&[])).unwrap(), vec![0, 1]);
        assert_eq!(project.resolve_indices(Some(&[1, 1, 0])).unwrap(), vec![0, 1]);
        assert_eq!(
            project.resolve_indices(Some(&[2])).unwrap_err(),
            TransformError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn unchanged_candidates_are_dropped() {
        let mut project = project(&[(0.0, 1.0), (2.0, 3.0)]);
        let same = project.subtitles()[0].clone();
        let mut moved = project.subtitles()[1].clone();
        moved.shift_positions(&Position::Seconds(1.0)).unwrap();

        let outcome = project
            .commit_positions(vec![(0, same), (1, moved)], "Testing")
            .unwrap();
        assert_eq!(outcome.changed, vec![1]);
        assert_eq!(outcome.action.unwrap().description, "Testing");

        let same = project.subtitles()[0].clone();
        assert!(project.commit_positions(vec![(0, same)], "Testing").unwrap().is_noop());
    }
}
