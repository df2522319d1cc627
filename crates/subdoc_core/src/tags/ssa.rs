//! Sub Station Alpha override codes.
//!
//! SSA styles text with brace blocks such as `{\b1}`, `{\i0}`,
//! `{\c&HBBGGRR&}` and `{\r}`. Codes do not need to be closed, and `{\r}`
//! resets every attribute at once, so translating to internal markup
//! requires tracking which tags are open in each run.

use once_cell::sync::Lazy;
use regex::Captures;

use super::internal::{close_open_tags, strip_trailing_closers, CLOSING_TAG, OPENING_TAG};
use super::rules::{Rewrite, Rule};
use super::{dedup_rules, redundant_pair_rules, TagLibrary};

/// Sub Station Alpha and Advanced Sub Station Alpha tag library.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubStationAlpha;

static DECODE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::replace(r"(?i)\{\\b[1-9]\d*\}", Rewrite::Template("<b>")),
        Rule::replace(r"(?i)\{\\i1\}", Rewrite::Template("<i>")),
        Rule::replace(r"(?i)\{\\u1\}", Rewrite::Template("<u>")),
        Rule::replace(
            r"(?i)\{\\(b|i|u)0\}",
            Rewrite::Func(|caps| format!("</{}>", caps[1].to_lowercase())),
        ),
        Rule::replace(r"(?i)\{\\c&H([0-9a-f]{6})&\}", Rewrite::Func(decode_color)),
        Rule::replace(r"(?i)\{\\fn([^}]*)\}", Rewrite::Template(r#"<font="${1}">"#)),
        Rule::replace(r"(?i)\{\\fs([^}]*)\}", Rewrite::Template(r#"<size="${1}">"#)),
        Rule::replace(r"(?i)\{\\r\}", Rewrite::Template("</>")),
        // Anything else has no internal counterpart.
        Rule::replace(r"\{[^}]*\}", Rewrite::Template("")),
    ]
});

static ENCODE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = dedup_rules();
    rules.extend([
        Rule::Pass(expand_resets),
        Rule::replace(
            r"<(b|i|u)>",
            Rewrite::Func(|caps| format!("{{\\{}1}}", &caps[1])),
        ),
        Rule::replace(
            r"</(b|i|u)>",
            Rewrite::Func(|caps| format!("{{\\{}0}}", &caps[1])),
        ),
        Rule::replace(r##"<color="#([0-9a-fA-F]{6})">"##, Rewrite::Func(encode_color)),
        Rule::replace(r#"<font="([^"]*)">"#, Rewrite::Template(r"{\fn${1}}")),
        Rule::replace(r#"<size="([^"]*)">"#, Rewrite::Template(r"{\fs${1}}")),
    ]);
    rules
});

static REDUNDANT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    redundant_pair_rules(|attr| (format!(r"\{{\\{attr}0\}}"), format!(r"\{{\\{attr}1\}}")))
});

impl TagLibrary for SubStationAlpha {
    fn decode_rules(&self) -> &[Rule] {
        &DECODE_RULES
    }

    fn encode_rules(&self) -> &[Rule] {
        &ENCODE_RULES
    }

    /// Break combined blocks, e.g. `{\b1\i1}` to `{\b1}{\i1}`.
    fn pre_decode(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        let mut in_block = false;
        let mut prev = None;
        for c in text.chars() {
            match c {
                '{' => in_block = true,
                '}' => in_block = false,
                '\\' if in_block && prev != Some('{') => out.push_str("}{"),
                _ => {}
            }
            out.push(c);
            prev = Some(c);
        }
        out
    }

    fn post_decode(&self, text: &str) -> String {
        close_open_tags(text)
    }

    /// Closers at the very end of the text have no visible effect.
    fn pre_encode(&self, text: &str) -> String {
        strip_trailing_closers(text)
    }

    fn post_encode(&self, text: &str) -> String {
        self.remove_redundant(text)
    }

    fn italicize(&self, text: &str) -> String {
        format!("{{\\i1}}{text}")
    }

    fn remove_redundant(&self, text: &str) -> String {
        super::rules::apply_rules(&REDUNDANT_RULES, text)
    }
}

/// `&HBBGGRR&` to `#rrggbb`.
fn decode_color(caps: &Captures<'_>) -> String {
    let bgr = caps[1].to_lowercase();
    format!("<color=\"#{}{}{}\">", &bgr[4..6], &bgr[2..4], &bgr[0..2])
}

/// `#rrggbb` to `&HBBGGRR&`.
fn encode_color(caps: &Captures<'_>) -> String {
    let rgb = caps[1].to_uppercase();
    format!("{{\\c&H{}{}{}&}}", &rgb[4..6], &rgb[2..4], &rgb[0..2])
}

/// Turn color/font/size closers into `{\r}` and re-open what is still open.
///
/// Adjacent closers form one run. A run holding any color/font/size closer
/// becomes a single `{\r}` followed by every tag still open after the whole
/// run. Runs of toggle closers and all openers pass through untouched.
fn expand_resets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<(&str, &str)> = Vec::new();
    let mut last = 0;

    let tags = OPENING_TAG
        .captures_iter(text)
        .chain(CLOSING_TAG.captures_iter(text))
        .filter_map(|caps| Some((caps.get(0)?, caps.get(1)?.as_str())));
    let mut tags: Vec<_> = tags.collect();
    tags.sort_by_key(|(m, _)| m.start());

    let mut i = 0;
    while i < tags.len() {
        let (m, name) = tags[i];
        out.push_str(&text[last..m.start()]);
        last = m.end();
        let tag = m.as_str();

        if !tag.starts_with("</") {
            open.push((name, tag));
            out.push_str(tag);
            i += 1;
            continue;
        }

        let mut run = vec![(name, tag)];
        while let Some((next, next_name)) = tags.get(i + run.len()) {
            if next.start() != last || !next.as_str().starts_with("</") {
                break;
            }
            last = next.end();
            run.push((*next_name, next.as_str()));
        }
        i += run.len();

        for (closed, _) in &run {
            if let Some(k) = open.iter().rposition(|(opened, _)| opened == closed) {
                open.remove(k);
            }
        }
        if run.iter().all(|(closed, _)| matches!(*closed, "b" | "i" | "u")) {
            for (_, closer) in &run {
                out.push_str(closer);
            }
        } else {
            out.push_str("{\\r}");
            for (_, opener) in &open {
                out.push_str(opener);
            }
        }
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bold() {
        assert_eq!(SubStationAlpha.decode(r"{\b1}bold{\b0}"), "<b>bold</b>");
    }

    #[test]
    fn decodes_unclosed_tags_with_closers() {
        assert_eq!(
            SubStationAlpha.decode(r"{\i1}a {\b1}b"),
            "<i>a <b>b</b></i>"
        );
    }

    #[test]
    fn decodes_combined_block() {
        assert_eq!(
            SubStationAlpha.decode(r"{\b1\i1}both"),
            "<b><i>both</i></b>"
        );
    }

    #[test]
    fn decodes_color_font_size_and_reset() {
        assert_eq!(
            SubStationAlpha.decode(r"{\c&H0000FF&}red{\r} {\fnArial}{\fs20}x"),
            r##"<color="#ff0000">red</color> <font="Arial"><size="20">x</size></font>"##
        );
    }

    #[test]
    fn decode_drops_unknown_codes() {
        assert_eq!(SubStationAlpha.decode(r"{\pos(10,20)}hi"), "hi");
        assert_eq!(SubStationAlpha.decode(r"{\pos(10,20)\i1}hi"), "<i>hi</i>");
    }

    #[test]
    fn decode_never_fails_on_garbage() {
        assert_eq!(SubStationAlpha.decode(r"{\b0}x{"), "</b>x{");
        assert_eq!(SubStationAlpha.decode("}}{{"), "}}{{");
    }

    #[test]
    fn encode_strips_trailing_closers() {
        assert_eq!(SubStationAlpha.encode("<b>bold</b>"), r"{\b1}bold");
        assert_eq!(
            SubStationAlpha.encode("<b>bold</b> plain"),
            r"{\b1}bold{\b0} plain"
        );
    }

    #[test]
    fn encode_collapses_split_pairs() {
        assert_eq!(
            SubStationAlpha.encode("<i>a</i>\n<i>b</i>!"),
            "{\\i1}a\nb{\\i0}!"
        );
        assert_eq!(
            SubStationAlpha.encode(r##"<color="#ff0000">a</color><color="#ff0000">b</color> c"##),
            r"{\c&H0000FF&}ab{\r} c"
        );
    }

    #[test]
    fn encode_reset_reopens_outer_tags() {
        assert_eq!(
            SubStationAlpha.encode(r#"<b>x <size="30">y</size> z</b> w"#),
            r"{\b1}x {\fs30}y{\r}{\b1} z{\b0} w"
        );
    }

    #[test]
    fn nested_valued_spans_share_one_reset() {
        for raw in [
            r"{\fs20}a{\fs30}b{\r}c",
            r"{\c&H0000FF&}a{\c&H00FF00&}b{\r} c",
            r"{\b1}{\fs20}x{\r} y",
        ] {
            assert_eq!(SubStationAlpha.encode(&SubStationAlpha.decode(raw)), raw);
        }
    }

    #[test]
    fn reset_run_reopens_only_tags_left_open() {
        assert_eq!(
            SubStationAlpha.encode(r#"<i><font="Arial">a<size="20">b</size></font> c</i> d"#),
            r"{\i1}{\fnArial}a{\fs20}b{\r}{\i1} c{\i0} d"
        );
    }

    #[test]
    fn encode_removes_redundant_pairs() {
        assert_eq!(
            SubStationAlpha.encode("<i>a</i>, <i>b</i> c"),
            r"{\i1}a, b{\i0} c"
        );
    }

    #[test]
    fn encode_decode_stabilizes() {
        for raw in [
            r"{\b1}bold{\b0}",
            r"{\i1}a{\i0} {\c&H00FF00&}green{\r} tail",
            r"{\b1\u1}x{\u0} y",
        ] {
            let once = SubStationAlpha.encode(&SubStationAlpha.decode(raw));
            let twice = SubStationAlpha.encode(&SubStationAlpha.decode(&once));
            assert_eq!(once, twice, "unstable for {raw:?}");
        }
    }

    #[test]
    fn italicize_prefixes_code() {
        assert_eq!(SubStationAlpha.italicize("x"), r"{\i1}x");
    }
}
