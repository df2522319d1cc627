//! Revertible action records.
//!
//! Every batch mutation of a [`Project`](super::Project) returns an action
//! describing how to undo it. Applying an action with
//! [`Project::revert`](super::Project::revert) returns the action that
//! redoes it, so a history stack only needs to store these values.

use super::subtitle::Subtitle;

/// Which text channel of a project an action affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Main,
    Translation,
}

impl Document {
    pub const ALL: [Self; 2] = [Self::Main, Self::Translation];
}

/// Operation restoring the state before an action.
#[derive(Debug, Clone, PartialEq)]
pub enum RevertOp {
    /// Put back the positions of `subtitles` at `indices`.
    ReplacePositions {
        indices: Vec<usize>,
        subtitles: Vec<Subtitle>,
    },
    /// Put back the framerate.
    SetFramerate { framerate: f64 },
    /// Re-insert removed subtitles at `indices`, ascending.
    InsertSubtitles {
        indices: Vec<usize>,
        subtitles: Vec<Subtitle>,
    },
    /// Remove inserted subtitles at `indices`.
    RemoveSubtitles { indices: Vec<usize> },
    /// Several actions performed in order, reverted last first.
    Group(Vec<RevertibleAction>),
}

/// An undoable change to a project.
#[derive(Debug, Clone, PartialEq)]
pub struct RevertibleAction {
    pub description: String,
    pub documents: Vec<Document>,
    pub op: RevertOp,
}

impl RevertibleAction {
    /// An action affecting both documents.
    pub fn new(description: impl Into<String>, op: RevertOp) -> Self {
        Self {
            description: description.into(),
            documents: Document::ALL.to_vec(),
            op,
        }
    }

    /// Combine `actions`, performed in order, into one undo unit.
    pub fn group(description: impl Into<String>, actions: Vec<RevertibleAction>) -> Self {
        let mut documents: Vec<Document> = Vec::new();
        for document in actions.iter().flat_map(|a| a.documents.iter().copied()) {
            if !documents.contains(&document) {
                documents.push(document);
            }
        }
        Self {
            description: description.into(),
            documents,
            op: RevertOp::Group(actions),
        }
    }

    /// Replace the description, keeping everything else.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
