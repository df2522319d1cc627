//! SubRip HTML-like tags.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::internal::close_open_tags;
use super::rules::{compile, Rewrite, Rule};
use super::{dedup_rules, redundant_pair_rules, TagLibrary};

/// SubRip tag library: `<b>`, `<i>`, `<u>` and `<font color="#rrggbb">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubRip;

static DECODE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::replace(
            r"(?i)<(/?)(b|i|u)>",
            Rewrite::Func(|caps| format!("<{}{}>", &caps[1], caps[2].to_lowercase())),
        ),
        Rule::Pass(decode_fonts),
    ]
});

static FONT_TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?i)<font\b[^>]*>|</font\s*>"));
static FONT_COLOR: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?i)^<font\s+color="?#?([0-9a-f]{6})"?\s*>$"#));

static ENCODE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = dedup_rules();
    rules.extend([
        // Font faces and sizes are not carried over.
        Rule::replace(r#"</?(font|size)(="[^"]*")?>"#, Rewrite::Template("")),
        Rule::replace(
            r#"<color="(#[0-9a-fA-F]{6})">"#,
            Rewrite::Template(r#"<font color="${1}">"#),
        ),
        Rule::replace(r"</color>", Rewrite::Template("</font>")),
    ]);
    rules
});

static REDUNDANT_RULES: Lazy<Vec<Rule>> =
    Lazy::new(|| redundant_pair_rules(|attr| (format!("</{attr}>"), format!("<{attr}>"))));

impl TagLibrary for SubRip {
    fn decode_rules(&self) -> &[Rule] {
        &DECODE_RULES
    }

    fn encode_rules(&self) -> &[Rule] {
        &ENCODE_RULES
    }

    fn post_decode(&self, text: &str) -> String {
        close_open_tags(text)
    }

    fn post_encode(&self, text: &str) -> String {
        self.remove_redundant(text)
    }

    fn italicize(&self, text: &str) -> String {
        format!("<i>{text}</i>")
    }

    fn remove_redundant(&self, text: &str) -> String {
        super::rules::apply_rules(&REDUNDANT_RULES, text)
    }
}

/// Turn `<font color="#rrggbb">` spans into color spans.
///
/// Other font tags have no internal counterpart; they are dropped together
/// with their closers, as are closers without an opener.
fn decode_fonts(text: &str) -> String {
    let mut translated = Vec::new();
    FONT_TAG
        .replace_all(text, |caps: &Captures<'_>| {
            let tag = &caps[0];
            if tag.starts_with("</") {
                return match translated.pop() {
                    Some(true) => "</color>".to_string(),
                    _ => String::new(),
                };
            }
            match FONT_COLOR.captures(tag) {
                Some(color) => {
                    translated.push(true);
                    format!("<color=\"#{}\">", color[1].to_lowercase())
                }
                None => {
                    translated.push(false);
                    String::new()
                }
            }
        })
        .into_owned()
}
