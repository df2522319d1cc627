//! Word checkers and the persisted replacement list.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SpellError;

/// Maximum number of replacement pairs kept on disk.
pub const MAX_REPLACEMENTS: usize = 10_000;

/// Capability needed from a spell-check backend.
pub trait WordChecker {
    /// Whether the backend can check anything at all.
    fn is_available(&self) -> bool {
        true
    }

    /// `true` if `word` is spelled correctly.
    fn check(&self, word: &str) -> bool;

    /// Ordered suggestions for a misspelled `word`.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Accept `word` permanently.
    fn add_to_personal(&mut self, word: &str);

    /// Accept `word` for the rest of the session.
    fn add_to_session(&mut self, word: &str);

    /// Inform the backend that `word` was corrected to `replacement`.
    fn set_correction(&mut self, word: &str, replacement: &str);
}

/// Saved `word -> replacement` choices, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementList {
    entries: Vec<(String, String)>,
}

impl ReplacementList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a list of `word|replacement` lines.
    ///
    /// A missing file gives an empty list. Blank lines and lines without a
    /// separator are skipped, and repeated lines are read once.
    pub fn load(path: &Path) -> Result<Self, SpellError> {
        if !path.is_file() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path).map_err(|e| SpellError::io(path, e))?;

        let mut seen = HashSet::new();
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && seen.insert(*line))
            .filter_map(|line| line.split_once('|'))
            .map(|(word, replacement)| (word.to_string(), replacement.to_string()))
            .collect();
        Ok(Self { entries })
    }

    /// Write the list, keeping the last occurrence of repeated pairs and at
    /// most [`MAX_REPLACEMENTS`] of the most recent ones.
    ///
    /// An empty list leaves any existing file untouched.
    pub fn save(&self, path: &Path) -> Result<(), SpellError> {
        if self.entries.is_empty() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SpellError::io(parent, e))?;
        }

        let unique = self.unique_keep_last();
        let skip = unique.len().saturating_sub(MAX_REPLACEMENTS);
        let mut text = String::new();
        for (word, replacement) in &unique[skip..] {
            text.push_str(word);
            text.push('|');
            text.push_str(replacement);
            text.push('\n');
        }
        fs::write(path, text).map_err(|e| SpellError::io(path, e))
    }

    /// Record a replacement.
    pub fn push(&mut self, word: impl Into<String>, replacement: impl Into<String>) {
        self.entries.push((word.into(), replacement.into()));
    }

    /// Replacements saved for `word`, oldest first.
    pub fn saved_for<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(w, _)| w == word)
            .map(|(_, replacement)| replacement.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unique_keep_last(&self) -> Vec<&(String, String)> {
        let mut seen = HashSet::new();
        let mut unique: Vec<_> = self
            .entries
            .iter()
            .rev()
            .filter(|entry| seen.insert(*entry))
            .collect();
        unique.reverse();
        unique
    }
}

/// A backend combined with a per-language replacement list.
///
/// Saved replacements rank ahead of backend suggestions. The list lives at
/// `<directory>/<language>.repl`; reading and writing it is best effort.
#[derive(Debug)]
pub struct SpellChecker<B> {
    backend: B,
    language: String,
    directory: PathBuf,
    replacements: ReplacementList,
}

impl<B: WordChecker> SpellChecker<B> {
    /// Wrap `backend` and read any saved replacements for `language`.
    pub fn new(backend: B, language: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        let mut checker = Self {
            backend,
            language: language.into(),
            directory: directory.into(),
            replacements: ReplacementList::new(),
        };
        checker.read_replacements();
        checker
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn replacements(&self) -> &ReplacementList {
        &self.replacements
    }

    /// Path of the replacement file for this language.
    pub fn replacement_file(&self) -> PathBuf {
        self.directory.join(format!("{}.repl", self.language))
    }

    /// Record that `word` is to be replaced with `replacement`.
    pub fn add_replacement(&mut self, word: &str, replacement: &str) {
        self.backend.set_correction(word, replacement);
        self.replacements.push(word, replacement);
    }

    /// Load saved replacements, logging failures.
    pub fn read_replacements(&mut self) {
        let path = self.replacement_file();
        match ReplacementList::load(&path) {
            Ok(list) => {
                tracing::debug!("Read {} replacements from {}", list.len(), path.display());
                self.replacements = list;
            }
            Err(e) => tracing::warn!("Failed to read replacements: {}", e),
        }
    }

    /// Save replacements, logging failures.
    pub fn write_replacements(&self) {
        let path = self.replacement_file();
        if let Err(e) = self.replacements.save(&path) {
            tracing::warn!("Failed to write replacements: {}", e);
        }
    }
}

impl<B: WordChecker> WordChecker for SpellChecker<B> {
    fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    fn check(&self, word: &str) -> bool {
        self.backend.check(word)
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let saved = self.replacements.saved_for(word).map(str::to_string);
        unique(saved.chain(self.backend.suggest(word)))
    }

    fn add_to_personal(&mut self, word: &str) {
        self.backend.add_to_personal(word);
    }

    fn add_to_session(&mut self, word: &str) {
        self.backend.add_to_session(word);
    }

    fn set_correction(&mut self, word: &str, replacement: &str) {
        self.add_replacement(word, replacement);
    }
}

/// In-memory checker backed by a word list.
///
/// Suggestions are known words within two edits of the input, closest
/// first, preceded by any corrections set for it.
#[derive(Debug, Clone, Default)]
pub struct WordListChecker {
    words: HashSet<String>,
    personal: HashSet<String>,
    session: HashSet<String>,
    corrections: Vec<(String, String)>,
}

impl WordListChecker {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Read a newline-delimited word list.
    pub fn from_file(path: &Path) -> Result<Self, SpellError> {
        let content = fs::read_to_string(path).map_err(|e| SpellError::io(path, e))?;
        Ok(Self::new(
            content.lines().map(str::trim).filter(|line| !line.is_empty()),
        ))
    }

    fn known(&self, word: &str) -> bool {
        self.words.contains(word) || self.personal.contains(word) || self.session.contains(word)
    }
}

impl WordChecker for WordListChecker {
    fn check(&self, word: &str) -> bool {
        self.known(word) || self.known(&word.to_lowercase())
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let corrections = self
            .corrections
            .iter()
            .filter(|(w, _)| w == word)
            .map(|(_, replacement)| replacement.clone());

        let mut close: Vec<(usize, &String)> = self
            .words
            .iter()
            .chain(&self.personal)
            .filter_map(|candidate| {
                let distance = edit_distance(word, candidate);
                (distance <= 2).then_some((distance, candidate))
            })
            .collect();
        close.sort();

        unique(corrections.chain(close.into_iter().map(|(_, w)| w.clone())))
    }

    fn add_to_personal(&mut self, word: &str) {
        self.personal.insert(word.to_string());
    }

    fn add_to_session(&mut self, word: &str) {
        self.session.insert(word.to_string());
    }

    fn set_correction(&mut self, word: &str, replacement: &str) {
        self.corrections
            .push((word.to_string(), replacement.to_string()));
    }
}

/// Drop repeated items, keeping the first of each.
fn unique(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Levenshtein distance over characters.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
