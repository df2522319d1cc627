//! Spell-checking of cue text.
//!
//! The engine does not ship a dictionary backend. Anything implementing
//! [`WordChecker`] can be plugged in; [`WordListChecker`] is a simple
//! in-memory one and [`SpellChecker`] adds persisted replacements on top of
//! any backend.

mod checker;
mod navigator;
mod tokenizer;

pub use checker::{ReplacementList, SpellChecker, WordChecker, WordListChecker, MAX_REPLACEMENTS};
pub use navigator::SpellCheckNavigator;
pub use tokenizer::{SpellCheckTokenizer, Tokens};
