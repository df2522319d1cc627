//! Duration adjustment.

use serde::{Deserialize, Serialize};

use super::TransformOutcome;
use crate::error::TransformError;
use crate::project::{Position, Project};
use crate::tags::strip;

/// End position ceiling for the last subtitle when keeping a gap.
const NO_NEXT_START: f64 = 360_000.0;

/// How to adjust durations. Unset bounds are not applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationOptions {
    /// Optimal duration per character, in seconds.
    pub optimal: Option<f64>,
    /// Lengthen durations shorter than optimal.
    pub lengthen: bool,
    /// Shorten durations longer than optimal.
    pub shorten: bool,
    /// Minimum duration, in seconds.
    pub minimum: Option<f64>,
    /// Maximum duration, in seconds.
    pub maximum: Option<f64>,
    /// Seconds to leave before the next subtitle's start.
    pub gap: Option<f64>,
}

impl DurationOptions {
    /// New end for a subtitle, in seconds.
    ///
    /// Passes run in order: optimal length, minimum, maximum, gap. The gap
    /// never pulls the end before `start`.
    fn end_for(&self, start: f64, end: f64, text_length: usize, next_start: f64) -> f64 {
        let mut end = end;
        if let Some(per_char) = self.optimal {
            let optimal = per_char * text_length as f64;
            if end - start < optimal && self.lengthen {
                end = start + optimal;
            }
            if end - start > optimal && self.shorten {
                end = start + optimal;
            }
        }
        if let Some(minimum) = self.minimum {
            if end - start < minimum {
                end = start + minimum;
            }
        }
        if let Some(maximum) = self.maximum {
            if end - start > maximum {
                end = start + maximum;
            }
        }
        if let Some(gap) = self.gap {
            if next_start - end < gap {
                end = start.max(next_start - gap);
            }
        }
        end
    }
}

/// Visible characters of internal markup, line breaks not counted.
pub fn text_length(text: &str) -> usize {
    strip(text).chars().filter(|&c| c != '\n').count()
}

impl Project {
    /// Lengthen or shorten durations by moving end positions.
    pub fn adjust_durations(
        &mut self,
        indices: Option<&[usize]>,
        options: &DurationOptions,
    ) -> Result<TransformOutcome, TransformError> {
        let indices = self.resolve_indices(indices)?;
        let subtitles = self.subtitles();

        let mut candidates = Vec::with_capacity(indices.len());
        for index in indices {
            let subtitle = &subtitles[index];
            let next_start = subtitles
                .get(index + 1)
                .map_or(NO_NEXT_START, |next| next.start_seconds());
            let end = options.end_for(
                subtitle.start_seconds(),
                subtitle.end_seconds(),
                text_length(&subtitle.main_text),
                next_start,
            );
            let mut copy = subtitle.clone();
            copy.set_end(Position::Seconds(end))?;
            candidates.push((index, copy));
        }

        self.commit_positions(candidates, "Adjusting durations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Subtitle;
    use crate::transform::tests::project;

    fn ends(project: &Project) -> Vec<f64> {
        project.subtitles().iter().map(Subtitle::end_seconds).collect()
    }

    #[test]
    fn lengthens_to_optimal() {
        let sub = Subtitle::from_times("00:00:00.000", "00:00:01.000", "hi").unwrap();
        let mut project = Project::with_subtitles(25.0, vec![sub]).unwrap();

        let options = DurationOptions {
            optimal: Some(1.0),
            lengthen: true,
            ..DurationOptions::default()
        };
        let outcome = project.adjust_durations(None, &options).unwrap();
        assert_eq!(outcome.changed, vec![0]);
        assert!((ends(&project)[0] - 2.0).abs() < 1e-9);
        assert_eq!(outcome.action.unwrap().description, "Adjusting durations");
    }

    #[test]
    fn shorten_only_when_asked() {
        let mut project = project(&[(0.0, 5.0)]);
        let options = DurationOptions {
            optimal: Some(0.5),
            lengthen: true,
            ..DurationOptions::default()
        };
        assert!(project.adjust_durations(None, &options).unwrap().is_noop());

        let options = DurationOptions {
            shorten: true,
            ..options
        };
        project.adjust_durations(None, &options).unwrap();
        assert!((ends(&project)[0] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_apply_in_order() {
        let mut project = project(&[(0.0, 0.5), (10.0, 30.0)]);
        let options = DurationOptions {
            minimum: Some(1.5),
            maximum: Some(6.0),
            ..DurationOptions::default()
        };
        let outcome = project.adjust_durations(None, &options).unwrap();
        assert_eq!(outcome.changed, vec![0, 1]);
        assert_eq!(ends(&project), vec![1.5, 16.0]);
    }

    #[test]
    fn gap_is_applied_last_and_floored_at_start() {
        let mut project = project(&[(0.0, 2.0), (2.1, 3.0), (2.2, 4.0)]);
        let options = DurationOptions {
            minimum: Some(3.0),
            gap: Some(0.5),
            ..DurationOptions::default()
        };
        project.adjust_durations(Some(&[0, 1]), &options).unwrap();
        let ends = ends(&project);
        assert!((ends[0] - 1.6).abs() < 1e-9);
        assert!((ends[1] - 2.1).abs() < 1e-9);
        assert!((ends[2] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn last_subtitle_gap_uses_ceiling() {
        let mut project = project(&[(0.0, 2.0)]);
        let options = DurationOptions {
            gap: Some(1.0),
            ..DurationOptions::default()
        };
        assert!(project.adjust_durations(None, &options).unwrap().is_noop());
    }

    #[test]
    fn out_of_range_fails_untouched() {
        let mut project = project(&[(0.0, 1.0)]);
        let options = DurationOptions {
            minimum: Some(5.0),
            ..DurationOptions::default()
        };
        assert!(project.adjust_durations(Some(&[0, 3]), &options).is_err());
        assert_eq!(ends(&project), vec![1.0]);
    }

    #[test]
    fn text_length_ignores_tags_and_breaks() {
        assert_eq!(text_length("<i>ab</i>\ncd"), 4);
        assert_eq!(text_length(""), 0);
    }

    #[test]
    fn revert_restores_ends() {
        let mut project = project(&[(0.0, 1.0)]);
        let options = DurationOptions {
            minimum: Some(2.0),
            ..DurationOptions::default()
        };
        let outcome = project.adjust_durations(None, &options).unwrap();
        project.revert(outcome.action.unwrap()).unwrap();
        assert_eq!(ends(&project), vec![1.0]);
    }
}
