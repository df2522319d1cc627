//! Walking spelling errors in a text buffer.
//!
//! The navigator owns the text and a byte cursor. Every edit goes through a
//! method that moves the cursor with it, so the two never disagree.

use std::collections::HashMap;

use super::checker::WordChecker;
use super::tokenizer::SpellCheckTokenizer;
use crate::error::SpellError;

/// Iterates spelling errors, applying edits in place.
///
/// Each call to [`Iterator::next`] yields the byte offset and text of the
/// next misspelled word. `None` means the end of the text was reached.
#[derive(Debug)]
pub struct SpellCheckNavigator<C> {
    checker: C,
    text: String,
    pos: usize,
    word: Option<String>,
    replacements: HashMap<String, String>,
}

impl<C: WordChecker> SpellCheckNavigator<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            text: String::new(),
            pos: 0,
            word: None,
            replacements: HashMap::new(),
        }
    }

    /// Start over on `text`. Session replacements are kept.
    pub fn reset(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.pos = 0;
        self.word = None;
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn checker_mut(&mut self) -> &mut C {
        &mut self.checker
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Byte offset of the current word, or of the scan position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The currently flagged word.
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Byte offset just past the current word.
    pub fn endpos(&self) -> Result<usize, SpellError> {
        Ok(self.pos + self.current_word()?.len())
    }

    /// Skip the current word.
    pub fn ignore(&mut self) -> Result<(), SpellError> {
        self.pos = self.endpos()?;
        self.word = None;
        Ok(())
    }

    /// Skip the current word and accept it for the rest of the session.
    pub fn ignore_all(&mut self) -> Result<(), SpellError> {
        let word = self.current_word()?.to_string();
        self.checker.add_to_session(&word);
        self.ignore()
    }

    /// Add the current word to the personal word list.
    pub fn add(&mut self) -> Result<(), SpellError> {
        let word = self.current_word()?.to_string();
        self.checker.add_to_personal(&word);
        Ok(())
    }

    /// Suggestions for the current word.
    pub fn suggest(&self) -> Result<Vec<String>, SpellError> {
        Ok(self.checker.suggest(self.current_word()?))
    }

    /// Replace the current word and move past the replacement.
    pub fn replace(&mut self, replacement: &str) -> Result<(), SpellError> {
        let end = self.endpos()?;
        self.text.replace_range(self.pos..end, replacement);
        self.pos += replacement.len();
        self.word = None;
        Ok(())
    }

    /// Replace the current word and every later occurrence of it.
    ///
    /// Later occurrences are replaced as [`Iterator::next`] reaches them,
    /// without being flagged.
    pub fn replace_all(&mut self, replacement: &str) -> Result<(), SpellError> {
        let word = self.current_word()?.to_string();
        self.checker.set_correction(&word, replacement);
        self.replacements.insert(word, replacement.to_string());
        self.replace(replacement)
    }

    /// Delete whitespace between the current word and the one after it.
    ///
    /// The joined word is picked up by the next call to [`Iterator::next`].
    pub fn join_with_next(&mut self) -> Result<(), SpellError> {
        let end = self.endpos()?;
        while let Some(c) = self.text[end..].chars().next().filter(|c| c.is_whitespace()) {
            self.text.replace_range(end..end + c.len_utf8(), "");
        }
        self.word = None;
        Ok(())
    }

    /// Delete whitespace between the current word and the one before it.
    ///
    /// The cursor moves back to the start of the joined word, which is
    /// picked up by the next call to [`Iterator::next`].
    pub fn join_with_previous(&mut self) -> Result<(), SpellError> {
        self.current_word()?;
        while let Some(c) = self.char_before().filter(|c| c.is_whitespace()) {
            let start = self.pos - c.len_utf8();
            self.text.replace_range(start..self.pos, "");
            self.pos = start;
        }
        while let Some(c) = self.char_before().filter(|c| c.is_alphanumeric()) {
            self.pos -= c.len_utf8();
        }
        self.word = None;
        Ok(())
    }

    /// Up to `n` characters before the current word.
    pub fn leading_context(&self, n: usize) -> Result<&str, SpellError> {
        self.current_word()?;
        let before = &self.text[..self.pos];
        let start = before
            .char_indices()
            .rev()
            .take(n)
            .last()
            .map_or(self.pos, |(i, _)| i);
        Ok(&before[start..])
    }

    /// Up to `n` characters after the current word.
    pub fn trailing_context(&self, n: usize) -> Result<&str, SpellError> {
        let after = &self.text[self.endpos()?..];
        let end = after.char_indices().nth(n).map_or(after.len(), |(i, _)| i);
        Ok(&after[..end])
    }

    fn current_word(&self) -> Result<&str, SpellError> {
        self.word.as_deref().ok_or(SpellError::NoCurrentWord)
    }

    fn char_before(&self) -> Option<char> {
        self.text[..self.pos].chars().next_back()
    }

    fn find_error(&self) -> Option<(usize, String)> {
        SpellCheckTokenizer::new(&self.text[self.pos..])
            .tokenize()
            .find(|(_, word)| !self.checker.check(word))
            .map(|(offset, word)| (self.pos + offset, word.to_string()))
    }
}

impl<C: WordChecker> Iterator for SpellCheckNavigator<C> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((pos, word)) = self.find_error() else {
                self.word = None;
                return None;
            };
            self.pos = pos;
            let replacement = self.replacements.get(&word).cloned();
            self.word = Some(word);

            match replacement {
                Some(replacement) => {
                    tracing::trace!("Auto-replacing at {}", pos);
                    if self.replace(&replacement).is_err() {
                        return None;
                    }
                }
                None => return Some((pos, self.word.clone()?)),
            }
        }
    }
}
