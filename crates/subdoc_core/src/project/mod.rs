//! Subtitle documents.
//!
//! A [`Project`] is an ordered collection of [`Subtitle`]s sharing one
//! framerate, with a main and a translation text per cue. The collection is
//! only changed in whole batches; each batch returns a [`RevertibleAction`]
//! that undoes it.
//!
//! # Components
//!
//! - **position**: position values and modes
//! - **subtitle**: a single cue
//! - **action**: revertible action records
//! - **file**: opening and saving documents

mod action;
mod file;
mod position;
mod subtitle;

pub use action::{Document, RevertOp, RevertibleAction};
pub use position::{Mode, Position};
pub use subtitle::Subtitle;

use crate::calc::Calculator;
use crate::error::{CalcError, TransformError};
use crate::files::SubtitleFile;

/// An ordered collection of subtitles and the files they came from.
#[derive(Debug, Clone, Default)]
pub struct Project {
    subtitles: Vec<Subtitle>,
    calc: Calculator,
    mode: Mode,
    main_file: Option<SubtitleFile>,
    tran_file: Option<SubtitleFile>,
}

impl Project {
    /// An empty project.
    pub fn new(framerate: f64, mode: Mode) -> Result<Self, CalcError> {
        Ok(Self {
            calc: Calculator::new(framerate)?,
            mode,
            ..Self::default()
        })
    }

    /// A project holding `subtitles`, which adopt its framerate.
    ///
    /// The mode is taken from the first subtitle.
    pub fn with_subtitles(framerate: f64, subtitles: Vec<Subtitle>) -> Result<Self, CalcError> {
        let mode = subtitles.first().map_or(Mode::default(), Subtitle::mode);
        let mut project = Self::new(framerate, mode)?;
        project.subtitles = subtitles;
        for subtitle in &mut project.subtitles {
            subtitle.adopt_calc(project.calc);
        }
        Ok(project)
    }

    pub fn subtitles(&self) -> &[Subtitle] {
        &self.subtitles
    }

    pub fn subtitle(&self, index: usize) -> Option<&Subtitle> {
        self.subtitles.get(index)
    }

    pub fn len(&self) -> usize {
        self.subtitles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subtitles.is_empty()
    }

    pub fn framerate(&self) -> f64 {
        self.calc.framerate()
    }

    pub fn calc(&self) -> &Calculator {
        &self.calc
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn main_file(&self) -> Option<&SubtitleFile> {
        self.main_file.as_ref()
    }

    pub fn tran_file(&self) -> Option<&SubtitleFile> {
        self.tran_file.as_ref()
    }

    /// An empty subtitle in this project's mode and framerate.
    pub fn new_subtitle(&self) -> Subtitle {
        Subtitle::with_calc(self.mode, self.calc)
    }

    /// Fail with `IndexOutOfRange` for the first index not in the project.
    pub fn validate_indices(&self, indices: &[usize]) -> Result<(), TransformError> {
        match indices.iter().find(|&&index| index >= self.subtitles.len()) {
            Some(&index) => Err(TransformError::IndexOutOfRange {
                index,
                len: self.subtitles.len(),
            }),
            None => Ok(()),
        }
    }

    /// Copy the positions of each given subtitle onto the one at its index.
    ///
    /// Texts are left alone.
    pub fn replace_positions(
        &mut self,
        changes: Vec<(usize, Subtitle)>,
    ) -> Result<RevertibleAction, TransformError> {
        let indices: Vec<usize> = changes.iter().map(|(index, _)| *index).collect();
        self.validate_indices(&indices)?;

        let mut originals = Vec::with_capacity(changes.len());
        for (index, new) in &changes {
            let subtitle = &mut self.subtitles[*index];
            originals.push(subtitle.clone());
            subtitle.copy_positions_from(new);
        }

        tracing::debug!("Replaced positions of {} subtitles", indices.len());
        Ok(RevertibleAction::new(
            "Replacing positions",
            RevertOp::ReplacePositions {
                indices,
                subtitles: originals,
            },
        ))
    }

    /// Insert subtitles so that each ends up at its given index.
    pub fn insert_subtitles(
        &mut self,
        mut items: Vec<(usize, Subtitle)>,
    ) -> Result<RevertibleAction, TransformError> {
        items.sort_by_key(|(index, _)| *index);
        for (k, (index, _)) in items.iter().enumerate() {
            let len = self.subtitles.len() + k;
            if *index > len {
                return Err(TransformError::IndexOutOfRange { index: *index, len });
            }
        }

        let mut indices = Vec::with_capacity(items.len());
        for (index, mut subtitle) in items {
            subtitle.adopt_calc(self.calc);
            self.subtitles.insert(index, subtitle);
            indices.push(index);
        }

        tracing::debug!("Inserted {} subtitles", indices.len());
        Ok(RevertibleAction::new(
            "Inserting subtitles",
            RevertOp::RemoveSubtitles { indices },
        ))
    }

    /// Remove the subtitles at `indices`.
    pub fn remove_subtitles(&mut self, indices: &[usize]) -> Result<RevertibleAction, TransformError> {
        self.validate_indices(indices)?;
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();

        let mut removed: Vec<Subtitle> = indices
            .iter()
            .rev()
            .map(|&index| self.subtitles.remove(index))
            .collect();
        removed.reverse();

        tracing::debug!("Removed {} subtitles", indices.len());
        Ok(RevertibleAction::new(
            "Removing subtitles",
            RevertOp::InsertSubtitles {
                indices,
                subtitles: removed,
            },
        ))
    }

    /// Set the framerate of the project and every subtitle.
    pub(crate) fn apply_framerate(&mut self, framerate: f64) -> Result<RevertibleAction, CalcError> {
        let calc = Calculator::new(framerate)?;
        let original = self.calc.framerate();
        self.calc = calc;
        for subtitle in &mut self.subtitles {
            subtitle.adopt_calc(calc);
        }
        Ok(RevertibleAction::new(
            "Setting framerate",
            RevertOp::SetFramerate {
                framerate: original,
            },
        ))
    }

    /// Reorder subtitles by start position.
    ///
    /// Returns `None` if they already are in order.
    pub fn sort_by_start(&mut self) -> Option<RevertibleAction> {
        let sorted = self
            .subtitles
            .windows(2)
            .all(|pair| pair[0].start_seconds() <= pair[1].start_seconds());
        if sorted {
            return None;
        }

        let mut ordered = self.subtitles.clone();
        ordered.sort_by(|a, b| a.start_seconds().total_cmp(&b.start_seconds()));
        let all: Vec<usize> = (0..self.subtitles.len()).collect();
        let removal = self.remove_subtitles(&all).ok()?;
        let insertion = self
            .insert_subtitles(ordered.into_iter().enumerate().collect())
            .ok()?;
        Some(RevertibleAction::group(
            "Sorting subtitles",
            vec![removal, insertion],
        ))
    }

    /// Apply `action` and return the action that redoes what it undid.
    pub fn revert(&mut self, action: RevertibleAction) -> Result<RevertibleAction, TransformError> {
        tracing::debug!("Reverting '{}'", action.description);
        let inverse = match action.op {
            RevertOp::ReplacePositions { indices, subtitles } => {
                self.replace_positions(indices.into_iter().zip(subtitles).collect())?
            }
            RevertOp::SetFramerate { framerate } => self.apply_framerate(framerate)?,
            RevertOp::InsertSubtitles { indices, subtitles } => {
                self.insert_subtitles(indices.into_iter().zip(subtitles).collect())?
            }
            RevertOp::RemoveSubtitles { indices } => self.remove_subtitles(&indices)?,
            RevertOp::Group(actions) => {
                let mut inverses = Vec::with_capacity(actions.len());
                for action in actions.into_iter().rev() {
                    inverses.push(self.revert(action)?);
                }
                RevertibleAction::group(String::new(), inverses)
            }
        };
        Ok(RevertibleAction {
            description: action.description,
            documents: action.documents,
            op: inverse.op,
        })
    }
}
