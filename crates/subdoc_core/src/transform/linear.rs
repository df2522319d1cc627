//! Shifting and two-point linear correction.

use super::TransformOutcome;
use crate::error::TransformError;
use crate::project::{Position, Project};

/// `new = coefficient * old + constant`.
///
/// The constant is in frames for frame corrections and in seconds
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTransform {
    pub coefficient: f64,
    pub constant: Position,
}

impl Project {
    /// Move the selected subtitles earlier or later by `value`.
    pub fn shift_positions(
        &mut self,
        indices: Option<&[usize]>,
        value: &Position,
    ) -> Result<TransformOutcome, TransformError> {
        let indices = self.resolve_indices(indices)?;
        let mut candidates = Vec::with_capacity(indices.len());
        for index in indices {
            let mut copy = self.subtitles()[index].clone();
            copy.shift_positions(value)?;
            candidates.push((index, copy));
        }
        self.commit_positions(candidates, "Shifting positions")
    }

    /// Linear correction mapping the current start of each point's subtitle
    /// to the point's target position.
    ///
    /// Frames are fitted on start frames with an integer constant; times and
    /// seconds are fitted on start seconds.
    pub fn linear_transform(
        &self,
        point_1: &(usize, Position),
        point_2: &(usize, Position),
    ) -> Result<LinearTransform, TransformError> {
        let (first, target_1) = point_1;
        let (second, target_2) = point_2;
        self.validate_indices(&[*first, *second])?;
        if !target_1.same_kind(target_2) {
            return Err(TransformError::MixedPositionKinds);
        }

        let reference_1 = &self.subtitles()[*first];
        let reference_2 = &self.subtitles()[*second];
        let degenerate = TransformError::DegenerateTransform {
            first: *first,
            second: *second,
        };

        if let (Position::Frame(y_1), Position::Frame(y_2)) = (target_1, target_2) {
            let x_1 = reference_1.start_frame();
            let x_2 = reference_2.start_frame();
            if x_1 == x_2 {
                return Err(degenerate);
            }
            let coefficient = (y_2 - y_1) as f64 / (x_2 - x_1) as f64;
            let constant = (*y_1 as f64 - coefficient * x_1 as f64).round() as i64;
            return Ok(LinearTransform {
                coefficient,
                constant: Position::Frame(constant),
            });
        }

        let x_1 = reference_1.start_seconds();
        let x_2 = reference_2.start_seconds();
        if x_1 == x_2 {
            return Err(degenerate);
        }
        let y_1 = target_1.to_seconds(self.calc())?;
        let y_2 = target_2.to_seconds(self.calc())?;
        let coefficient = (y_2 - y_1) / (x_2 - x_1);
        Ok(LinearTransform {
            coefficient,
            constant: Position::Seconds(y_1 - coefficient * x_1),
        })
    }

    /// Scale and shift the selected subtitles by the two-point correction
    /// of `point_1` and `point_2`.
    pub fn transform_positions(
        &mut self,
        indices: Option<&[usize]>,
        point_1: (usize, Position),
        point_2: (usize, Position),
    ) -> Result<TransformOutcome, TransformError> {
        let indices = self.resolve_indices(indices)?;
        let transform = self.linear_transform(&point_1, &point_2)?;
        tracing::debug!(
            "Linear correction: coefficient {}, constant {:?}",
            transform.coefficient,
            transform.constant
        );

        let mut candidates = Vec::with_capacity(indices.len());
        for index in indices {
            let mut copy = self.subtitles()[index].clone();
            copy.scale_positions(transform.coefficient);
            copy.shift_positions(&transform.constant)?;
            candidates.push((index, copy));
        }
        self.commit_positions(candidates, "Transforming positions")
    }
}
