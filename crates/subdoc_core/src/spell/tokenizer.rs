//! Word tokenizer for spell-check.

/// Splits text into words worth checking.
///
/// A word starts at an alphanumeric character and runs through word
/// characters and apostrophes, so `don't` is one word. Trailing apostrophes
/// are dropped. Single characters and purely numeric runs are skipped.
#[derive(Debug, Clone, Copy)]
pub struct SpellCheckTokenizer<'a> {
    text: &'a str,
}

impl<'a> SpellCheckTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Lazily iterate `(byte_offset, word)` pairs from the start of the text.
    pub fn tokenize(&self) -> Tokens<'a> {
        Tokens {
            text: self.text,
            pos: 0,
        }
    }
}

/// Iterator returned by [`SpellCheckTokenizer::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(c) = self.text[self.pos..].chars().next() {
            if !c.is_alphanumeric() {
                self.pos += c.len_utf8();
                continue;
            }

            let start = self.pos;
            let rest = &self.text[start..];
            let run = rest
                .char_indices()
                .find(|&(_, c)| !is_word_char(c) && c != '\'')
                .map_or(rest.len(), |(i, _)| i);
            let word = rest[..run].trim_end_matches(|c| !is_word_char(c));
            self.pos = start + word.len();

            if word.chars().nth(1).is_some() && !word.chars().all(char::is_numeric) {
                return Some((start, word));
            }
        }
        None
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<(usize, &str)> {
        SpellCheckTokenizer::new(text).tokenize().collect()
    }

    #[test]
    fn keeps_apostrophes_and_alphanumerics() {
        assert_eq!(tokens("don't stop12 a"), vec![(0, "don't"), (6, "stop12")]);
    }

    #[test]
    fn skips_numbers_and_single_characters() {
        assert_eq!(tokens("12 a I 3d"), vec![(7, "3d")]);
    }

    #[test]
    fn strips_trailing_apostrophes() {
        assert_eq!(tokens("rockin' roll'"), vec![(0, "rockin"), (8, "roll")]);
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(
            tokens("Hello, world!-again"),
            vec![(0, "Hello"), (7, "world"), (14, "again")]
        );
    }

    #[test]
    fn offsets_are_bytes() {
        assert_eq!(tokens("ää öö"), vec![(0, "ää"), (5, "öö")]);
    }

    #[test]
    fn is_restartable() {
        let tokenizer = SpellCheckTokenizer::new("one two");
        assert_eq!(tokenizer.tokenize().count(), 2);
        assert_eq!(tokenizer.tokenize().count(), 2);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" ,.' ").is_empty());
    }
}
