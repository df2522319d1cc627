//! Ordered substitution rules used by tag libraries.
//!
//! A rule is either a regex replacement or a whole-text pass. Replacement
//! rules marked as fixed-point are re-applied until the text stops changing,
//! at most [`MAX_PASSES`] times.

use regex::{Captures, Regex};

/// Upper bound on re-application of a fixed-point rule.
pub const MAX_PASSES: usize = 16;

/// Replacement applied to each regex match.
pub enum Rewrite {
    /// Regex replacement template (`$1`, `${name}`).
    Template(&'static str),
    /// Function of the match captures.
    Func(fn(&Captures<'_>) -> String),
}

/// A single step of a tag translation pipeline.
pub enum Rule {
    /// Replace every match of `regex`.
    Replace {
        regex: Regex,
        rewrite: Rewrite,
        fixed_point: bool,
    },
    /// Rewrite the whole text; used for steps that need state across matches.
    Pass(fn(&str) -> String),
}

impl Rule {
    /// Build a single-application replacement rule.
    ///
    /// Patterns are compile-time constants, so an invalid one is a bug.
    pub fn replace(pattern: &str, rewrite: Rewrite) -> Self {
        Self::Replace {
            regex: compile(pattern),
            rewrite,
            fixed_point: false,
        }
    }

    /// Build a replacement rule applied until no further change occurs.
    pub fn fixed(pattern: &str, rewrite: Rewrite) -> Self {
        Self::Replace {
            regex: compile(pattern),
            rewrite,
            fixed_point: true,
        }
    }

    /// Apply this rule to `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Pass(pass) => pass(text),
            Self::Replace {
                regex,
                rewrite,
                fixed_point: false,
            } => replace_once(regex, rewrite, text),
            Self::Replace {
                regex,
                rewrite,
                fixed_point: true,
            } => {
                let mut current = text.to_string();
                for _ in 0..MAX_PASSES {
                    let next = replace_once(regex, rewrite, &current);
                    if next == current {
                        return current;
                    }
                    current = next;
                }
                tracing::debug!(pattern = regex.as_str(), "Rule hit pass limit");
                current
            }
        }
    }
}

/// Apply `rules` in order.
pub fn apply_rules(rules: &[Rule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |text, rule| rule.apply(&text))
}

fn replace_once(regex: &Regex, rewrite: &Rewrite, text: &str) -> String {
    match rewrite {
        Rewrite::Template(template) => regex.replace_all(text, *template).into_owned(),
        Rewrite::Func(func) => regex.replace_all(text, |caps: &Captures<'_>| func(caps)).into_owned(),
    }
}

pub(crate) fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("invalid built-in tag pattern {pattern:?}: {e}"),
    }
}
