//! Framerate changes.

use super::TransformOutcome;
use crate::calc::validate_framerate;
use crate::error::TransformError;
use crate::project::{Project, RevertibleAction};

impl Project {
    /// Set the framerate of the project and all its subtitles.
    ///
    /// Native positions stay put, so frame-mode subtitles move in time.
    pub fn set_framerate(&mut self, framerate: f64) -> Result<TransformOutcome, TransformError> {
        validate_framerate(framerate)?;
        if framerate == self.framerate() {
            return Ok(TransformOutcome::default());
        }
        let action = self.apply_framerate(framerate)?;
        tracing::debug!("Set framerate to {framerate}");
        Ok(TransformOutcome {
            changed: (0..self.len()).collect(),
            action: Some(action),
        })
    }

    /// Treat positions as being at `current` and convert them to `correct`.
    ///
    /// The project ends up at `correct`. Framerate changes and the
    /// converted positions form one undo unit.
    pub fn convert_framerate(
        &mut self,
        indices: Option<&[usize]>,
        current: f64,
        correct: f64,
    ) -> Result<TransformOutcome, TransformError> {
        let indices = self.resolve_indices(indices)?;
        validate_framerate(current)?;
        validate_framerate(correct)?;

        let mut actions: Vec<RevertibleAction> = Vec::with_capacity(3);
        if current != self.framerate() {
            actions.push(self.apply_framerate(current)?);
        }

        let mut candidates = Vec::with_capacity(indices.len());
        for index in indices {
            let mut copy = self.subtitles()[index].clone();
            copy.convert_framerate(correct)?;
            candidates.push((index, copy));
        }

        if correct != self.framerate() {
            actions.push(self.apply_framerate(correct)?);
        }
        let positions = self.commit_positions(candidates, "Converting framerate")?;
        actions.extend(positions.action);

        if actions.is_empty() {
            return Ok(TransformOutcome::default());
        }
        tracing::debug!("Converted framerate from {current} to {correct}");
        Ok(TransformOutcome {
            changed: positions.changed,
            action: Some(RevertibleAction::group("Converting framerate", actions)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::project::{Mode, Position, Subtitle};
    use crate::transform::tests::project;

    fn ends(project: &Project) -> Vec<f64> {
        project.subtitles().iter().map(Subtitle::end_seconds).collect()
    }

    #[test]
    fn set_framerate_is_revertible() {
        let mut project = project(&[(0.0, 1.0), (1.0, 2.0)]);
        let outcome = project.set_framerate(30.0).unwrap();
        assert_eq!(outcome.changed, vec![0, 1]);
        assert!((project.subtitles()[1].framerate() - 30.0).abs() < 1e-9);

        project.revert(outcome.action.unwrap()).unwrap();
        assert!((project.framerate() - 25.0).abs() < 1e-9);
        assert!(project.set_framerate(25.0).unwrap().is_noop());
    }

    #[test]
    fn set_framerate_rejects_invalid() {
        let mut project = project(&[(0.0, 1.0)]);
        assert_eq!(
            project.set_framerate(0.0).unwrap_err(),
            TransformError::Calc(CalcError::InvalidFrameRate(0.0))
        );
    }

    #[test]
    fn convert_scales_positions_and_groups() {
        let mut project = project(&[(0.0, 10.0), (20.0, 25.0)]);
        let outcome = project.convert_framerate(Some(&[1]), 24.0, 30.0).unwrap();
        assert_eq!(outcome.changed, vec![1]);
        assert!((project.framerate() - 30.0).abs() < 1e-9);
        assert_eq!(ends(&project), vec![10.0, 20.0]);

        let action = outcome.action.unwrap();
        assert_eq!(action.description, "Converting framerate");
        project.revert(action).unwrap();
        assert!((project.framerate() - 25.0).abs() < 1e-9);
        assert_eq!(ends(&project), vec![10.0, 25.0]);
    }

    #[test]
    fn convert_validates_before_changing() {
        let mut project = project(&[(0.0, 10.0)]);
        assert!(project.convert_framerate(None, 24.0, -1.0).is_err());
        assert!(project.convert_framerate(Some(&[4]), 24.0, 25.0).is_err());
        assert!((project.framerate() - 25.0).abs() < 1e-9);
        assert_eq!(ends(&project), vec![10.0]);
    }

    #[test]
    fn frame_mode_moves_with_framerate() {
        let mut sub = Subtitle::new(Mode::Frame, 25.0).unwrap();
        sub.set_end(Position::Frame(50)).unwrap();
        let mut project = Project::with_subtitles(25.0, vec![sub]).unwrap();
        project.set_framerate(50.0).unwrap();
        assert_eq!(project.subtitles()[0].end(), Position::Frame(50));
        assert!((ends(&project)[0] - 1.0).abs() < 1e-9);
    }
}
