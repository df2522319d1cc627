//! Internal markup, the hub all tag translations go through.
//!
//! Openers are `<b>`, `<i>`, `<u>`, `<color="#rrggbb">`, `<font="NAME">` and
//! `<size="N">`; each closes with `</name>`. Decoders may also emit the
//! transient reset marker `</>`, which [`close_open_tags`] resolves.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{compile, Rule};
use super::TagLibrary;

/// Reset marker produced by decoders of formats with a reset code.
pub const RESET: &str = "</>";

pub(crate) static OPENING_TAG: Lazy<Regex> = Lazy::new(|| compile(r#"<([a-z]+)(?:="[^"]*")?>"#));
pub(crate) static CLOSING_TAG: Lazy<Regex> = Lazy::new(|| compile(r"</([a-z]+)>"));
static CLOSING_TAG_END: Lazy<Regex> = Lazy::new(|| compile(r"</[a-z]+>\z"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| compile(r#"</?[a-z]*(?:="[^"]*")?>"#));

/// The internal markup itself; decode and encode are identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Internal;

impl TagLibrary for Internal {
    fn decode_rules(&self) -> &[Rule] {
        &[]
    }

    fn encode_rules(&self) -> &[Rule] {
        &[]
    }

    fn italicize(&self, text: &str) -> String {
        format!("<i>{text}</i>")
    }
}

/// Append missing closers to every run between reset markers.
///
/// Closers are matched against the earliest unmatched opener of the same
/// name; unmatched closers are left alone. Openers still open at the end of
/// a run are closed last-opened-first. Reset markers are removed.
pub fn close_open_tags(text: &str) -> String {
    text.split(RESET)
        .map(|part| {
            let mut opened: Vec<&str> = OPENING_TAG
                .captures_iter(part)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();
            let closed: Vec<&str> = CLOSING_TAG
                .captures_iter(part)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();

            for name in closed.iter().rev() {
                if let Some(k) = opened.iter().position(|opener| opener == name) {
                    opened.remove(k);
                }
            }

            let mut part = part.to_string();
            for name in opened.iter().rev() {
                part.push_str(&format!("</{name}>"));
            }
            part
        })
        .collect()
}

/// Remove closers at the very end of `text`.
pub fn strip_trailing_closers(text: &str) -> String {
    let mut text = text.to_string();
    while let Some(m) = CLOSING_TAG_END.find(&text) {
        text.truncate(m.start());
    }
    text
}

/// Remove all internal markup from `text`.
pub fn strip(text: &str) -> String {
    ANY_TAG.replace_all(text, "").into_owned()
}
