//! Inline markup translation.
//!
//! Cue text is kept in a format-neutral internal markup and translated to
//! and from each file format's own styling syntax on read and write.
//!
//! # Components
//!
//! - **rules**: ordered substitution pipeline with bounded fixed points
//! - **internal**: the internal markup, tag balancing and stripping
//! - **ssa**: Sub Station Alpha override codes
//! - **subrip**: SubRip HTML-like tags
//!
//! Decoding and encoding never fail; malformed markup always produces some
//! output.

mod internal;
pub mod rules;
mod ssa;
mod subrip;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub use internal::{close_open_tags, strip, Internal, RESET};
pub use ssa::SubStationAlpha;
pub use subrip::SubRip;

use rules::{apply_rules, compile, Rewrite, Rule};

/// Attributes that are toggled on and off without a value.
const TOGGLES: [&str; 3] = ["b", "i", "u"];

/// Attributes that carry a value, e.g. `<color="#ff0000">`.
const VALUED: [&str; 3] = ["color", "font", "size"];

static TAG: Lazy<Regex> = Lazy::new(|| compile(r#"<(/?)([a-z]+)(?:="([^"]*)")?>"#));

/// Translation between a markup syntax and internal markup.
///
/// Implementors supply the rule tables; the hooks default to identity.
pub trait TagLibrary {
    /// Rules turning format markup into internal markup.
    fn decode_rules(&self) -> &[Rule];

    /// Rules turning internal markup into format markup.
    fn encode_rules(&self) -> &[Rule];

    /// Wrap `text`, already in this format, in italics.
    fn italicize(&self, text: &str) -> String;

    fn pre_decode(&self, text: &str) -> String {
        text.to_string()
    }

    fn post_decode(&self, text: &str) -> String {
        text.to_string()
    }

    fn pre_encode(&self, text: &str) -> String {
        text.to_string()
    }

    fn post_encode(&self, text: &str) -> String {
        text.to_string()
    }

    /// Remove closers immediately reopened across non-word characters.
    fn remove_redundant(&self, text: &str) -> String {
        text.to_string()
    }

    /// Translate format markup to internal markup.
    fn decode(&self, text: &str) -> String {
        let text = self.pre_decode(text);
        let text = apply_rules(self.decode_rules(), &text);
        self.post_decode(&text)
    }

    /// Translate internal markup to format markup.
    fn encode(&self, text: &str) -> String {
        let text = self.pre_encode(text);
        let text = apply_rules(self.encode_rules(), &text);
        self.post_encode(&text)
    }
}

/// Closed set of markup syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFormat {
    #[default]
    Internal,
    SubStationAlpha,
    SubRip,
}

impl TagFormat {
    pub fn decode(&self, text: &str) -> String {
        match self {
            Self::Internal => Internal.decode(text),
            Self::SubStationAlpha => SubStationAlpha.decode(text),
            Self::SubRip => SubRip.decode(text),
        }
    }

    pub fn encode(&self, text: &str) -> String {
        match self {
            Self::Internal => Internal.encode(text),
            Self::SubStationAlpha => SubStationAlpha.encode(text),
            Self::SubRip => SubRip.encode(text),
        }
    }

    pub fn italicize(&self, text: &str) -> String {
        match self {
            Self::Internal => Internal.italicize(text),
            Self::SubStationAlpha => SubStationAlpha.italicize(text),
            Self::SubRip => SubRip.italicize(text),
        }
    }

    pub fn remove_redundant(&self, text: &str) -> String {
        match self {
            Self::Internal => Internal.remove_redundant(text),
            Self::SubStationAlpha => SubStationAlpha.remove_redundant(text),
            Self::SubRip => SubRip.remove_redundant(text),
        }
    }
}

/// Rules merging adjacent spans of the same attribute in internal markup.
///
/// `</b>\n<b>` collapses to the newline, and a valued span closed and
/// reopened with the same value is joined into one.
pub(crate) fn dedup_rules() -> Vec<Rule> {
    let mut rules: Vec<Rule> = TOGGLES
        .iter()
        .map(|&attr| Rule::fixed(&format!(r"</{attr}>(\n?)<{attr}>"), Rewrite::Template("${1}")))
        .collect();
    rules.push(Rule::Pass(merge_valued_spans));
    rules
}

/// Rules removing `close, non-word characters, open` runs of each toggle.
///
/// `pair` gives the closing and opening pattern for an attribute name.
pub(crate) fn redundant_pair_rules(pair: impl Fn(&str) -> (String, String)) -> Vec<Rule> {
    TOGGLES
        .iter()
        .map(|&attr| {
            let (close, open) = pair(attr);
            Rule::replace(&format!(r"{close}([^\w\n]*?){open}"), Rewrite::Template("${1}"))
        })
        .collect()
}

/// Join `<n="v">a</n>\n?<n="v">b` into `<n="v">a\n?b`.
fn merge_valued_spans(text: &str) -> String {
    let tags: Vec<Captures<'_>> = TAG.captures_iter(text).collect();
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<(&str, &str)> = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while i < tags.len() {
        let caps = &tags[i];
        i += 1;
        let Some(whole) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        let name = caps.get(2).map_or("", |m| m.as_str());
        let value = caps.get(3).map_or("", |m| m.as_str());

        out.push_str(&text[last..whole.start()]);
        last = whole.end();

        if !closing {
            open.push((name, value));
            out.push_str(whole.as_str());
            continue;
        }

        let Some(k) = open.iter().rposition(|(opened, _)| *opened == name) else {
            out.push_str(whole.as_str());
            continue;
        };

        if VALUED.contains(&name) {
            if let Some(next) = tags.get(i).and_then(|n| reopens(n, name, open[k].1)) {
                let between = &text[whole.end()..next.start()];
                if between.is_empty() || between == "\n" {
                    out.push_str(between);
                    last = next.end();
                    i += 1;
                    continue;
                }
            }
        }

        open.remove(k);
        out.push_str(whole.as_str());
    }

    out.push_str(&text[last..]);
    out
}

fn reopens<'t>(caps: &Captures<'t>, name: &str, value: &str) -> Option<regex::Match<'t>> {
    let closing = caps.get(1).is_some_and(|m| !m.is_empty());
    let same_name = caps.get(2).is_some_and(|m| m.as_str() == name);
    let same_value = caps.get(3).is_some_and(|m| m.as_str() == value);
    if !closing && same_name && same_value {
        caps.get(0)
    } else {
        None
    }
}
