//! SubRip (.srt) reading and writing.
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! Hello, world!
//!
//! 2
//! 00:00:05,000 --> 00:00:08,000
//! This is a test.
//! ```
//!
//! Cue numbers are dropped on read and regenerated on write.

use once_cell::sync::Lazy;
use regex::Regex;

use super::encoding::Newline;
use super::RawCues;
use crate::tags::rules::compile;

pub(crate) static TIME_LINE: Lazy<Regex> =
    Lazy::new(|| compile(r"^(\d\d:\d\d:\d\d,\d\d\d) --> (\d\d:\d\d:\d\d,\d\d\d)\s*$"));

/// Parse SubRip lines into cues.
///
/// Lines before the first time line are skipped. A cue number right before
/// a time line and one blank line before that are not part of the previous
/// cue's text. The blank line closing the last cue is not part of its text
/// either.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> RawCues {
    let mut cues = RawCues::new();
    let mut current: Option<(String, String, Vec<&str>)> = None;

    for line in lines {
        let line = line.as_ref();
        let Some(caps) = TIME_LINE.captures(line) else {
            if let Some((_, _, text)) = current.as_mut() {
                text.push(line);
            }
            continue;
        };

        if let Some((show, hide, mut text)) = current.take() {
            if text.last().is_some_and(|l| is_cue_number(l) || l.trim().is_empty()) {
                text.pop();
                if text.last().is_some_and(|l| l.trim().is_empty()) {
                    text.pop();
                }
            }
            cues.push(show, hide, text.join("\n"));
        }
        current = Some((
            caps[1].replace(',', "."),
            caps[2].replace(',', "."),
            Vec::new(),
        ));
    }

    if let Some((show, hide, mut text)) = current {
        if text.last().is_some_and(|l| l.trim().is_empty()) {
            text.pop();
        }
        cues.push(show, hide, text.join("\n"));
    }

    tracing::debug!("Parsed {} SubRip cues", cues.len());
    cues
}

/// Format cues as SubRip text, numbering them from 1.
pub fn format(cues: &RawCues, newline: Newline) -> String {
    let nl = newline.value();
    let mut output = String::new();
    for (i, (show, hide, text)) in cues.iter().enumerate() {
        output.push_str(&format!(
            "{}{nl}{} --> {}{nl}{}{nl}{nl}",
            i + 1,
            show.replace('.', ","),
            hide.replace('.', ","),
            text.replace('\n', nl),
        ));
    }
    output
}

fn is_cue_number(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn parses_basic_document() {
        let cues = parse(&lines(
            "1\n00:00:01,000 --> 00:00:04,000\nHello, world!\n\n\
             2\n00:00:05,000 --> 00:00:08,000\nTwo\nlines\n\n",
        ));
        assert_eq!(cues.shows(), &["00:00:01.000", "00:00:05.000"]);
        assert_eq!(cues.hides(), &["00:00:04.000", "00:00:08.000"]);
        assert_eq!(cues.texts(), &["Hello, world!", "Two\nlines"]);
    }

    #[test]
    fn cue_numbers_are_optional() {
        let cues = parse(&lines(
            "00:00:01,000 --> 00:00:02,000\na\n\n00:00:03,000 --> 00:00:04,000\nb",
        ));
        assert_eq!(cues.texts(), &["a", "b"]);
    }

    #[test]
    fn skips_leading_garbage_and_loose_time_lines() {
        let cues = parse(&lines(
            "junk\n\n1\n00:00:01,000 --> 00:00:02,000  \nok\n\n\
             2\n0:00:03,000 --> 00:00:04,000\nstill ok",
        ));
        assert_eq!(cues.len(), 1);
        assert_eq!(cues.texts()[0], "ok\n\n2\n0:00:03,000 --> 00:00:04,000\nstill ok");
    }

    #[test]
    fn keeps_blank_lines_inside_text() {
        let cues = parse(&lines(
            "1\n00:00:01,000 --> 00:00:02,000\na\n\nb\n\n\n2\n00:00:03,000 --> 00:00:04,000\nc",
        ));
        assert_eq!(cues.texts(), &["a\n\nb\n", "c"]);
    }

    #[test]
    fn trailing_newline_of_last_text_survives_round_trip() {
        let mut cues = RawCues::new();
        cues.push("00:00:01.000", "00:00:02.000", "a\n");
        cues.push("00:00:03.000", "00:00:04.000", "b\n");
        let written = format(&cues, Newline::Unix);
        let parsed = parse(&lines(&written));
        assert_eq!(parsed.texts(), &["a\n", "b\n"]);
        assert_eq!(parsed, cues);
    }

    #[test]
    fn last_cue_without_blank_line_is_kept_whole() {
        let cues = parse(&lines("1\n00:00:01,000 --> 00:00:02,000\nlast"));
        assert_eq!(cues.texts(), &["last"]);
    }

    #[test]
    fn empty_input_has_no_cues() {
        assert!(parse::<&str>(&[]).is_empty());
        assert!(parse(&lines("no cues here\n")).is_empty());
    }

    #[test]
    fn formats_with_renumbering_and_newline() {
        let mut cues = RawCues::new();
        cues.push("00:00:01.000", "00:00:02.500", "a\nb");
        cues.push("00:00:03.000", "00:00:04.000", "c");
        assert_eq!(
            format(&cues, Newline::Windows),
            "1\r\n00:00:01,000 --> 00:00:02,500\r\na\r\nb\r\n\r\n\
             2\r\n00:00:03,000 --> 00:00:04,000\r\nc\r\n\r\n"
        );
    }
}
