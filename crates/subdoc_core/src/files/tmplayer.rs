//! TMPlayer reading and writing.
//!
//! One cue per line, `HH:MM:SS:text`, with `|` separating text lines. The
//! format has no hide times; each cue ends when the next one starts and the
//! last one lasts [`LAST_DURATION`] seconds.

use once_cell::sync::Lazy;
use regex::Regex;

use super::encoding::Newline;
use super::RawCues;
use crate::calc::Calculator;
use crate::tags::rules::compile;

/// Duration given to the last cue, in seconds.
pub const LAST_DURATION: f64 = 3.0;

/// Latest show time the two-digit hour field can hold, 99:59:59.
const MAX_SHOW_SECONDS: f64 = 359_999.0;

pub(crate) static CUE_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^\d\d:\d\d:\d\d:"));

/// Parse TMPlayer lines into cues. Lines that are not cues are skipped.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> RawCues {
    let calc = Calculator::default();
    let mut starts = Vec::new();

    for line in lines {
        let line = line.as_ref();
        if line.trim().chars().count() < 9 || !CUE_LINE.is_match(line) {
            continue;
        }
        starts.push((format!("{}.000", &line[..8]), line[9..].replace('|', "\n")));
    }

    let mut cues = RawCues::new();
    for (i, (show, text)) in starts.iter().enumerate() {
        let hide = match starts.get(i + 1) {
            Some((next, _)) => next.clone(),
            None => calc
                .add_seconds_to_time(show, LAST_DURATION)
                .unwrap_or_else(|_| show.clone()),
        };
        cues.push(show.clone(), hide, text.clone());
    }

    tracing::debug!("Parsed {} TMPlayer cues", cues.len());
    cues
}

/// Format cues as TMPlayer text. Hide times are not written.
///
/// Show times are rounded to whole seconds. Negative times are written as
/// zero and times past 99:59:59 as 99:59:59.
pub fn format(cues: &RawCues, newline: Newline) -> String {
    let calc = Calculator::default();
    let mut output = String::new();
    for (show, _, text) in cues.iter() {
        let mut seconds = calc.time_to_seconds(show).unwrap_or(0.0).max(0.0).round();
        if seconds > MAX_SHOW_SECONDS {
            tracing::warn!("TMPlayer show time {} clamped to 99:59:59", show);
            seconds = MAX_SHOW_SECONDS;
        }
        let show = calc.seconds_to_time(seconds);
        output.push_str(&show[..8]);
        output.push(':');
        output.push_str(&text.replace('\n', "|"));
        output.push_str(newline.value());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_hide_is_show_plus_default_duration() {
        let cues = parse(&["00:00:01:hello", "00:00:05:world"]);
        assert_eq!(cues.shows(), &["00:00:01.000", "00:00:05.000"]);
        assert_eq!(cues.hides(), &["00:00:05.000", "00:00:08.000"]);
        assert_eq!(cues.texts(), &["hello", "world"]);
    }

    #[test]
    fn pipes_become_newlines() {
        let cues = parse(&["01:02:03:one|two"]);
        assert_eq!(cues.texts(), &["one\ntwo"]);
        assert_eq!(cues.hides(), &["01:02:06.000"]);
    }

    #[test]
    fn skips_short_and_malformed_lines() {
        let cues = parse(&["", "00:00:0", "garbage line here", "0:00:01:x", "00:00:02:ok"]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues.texts(), &["ok"]);
    }

    #[test]
    fn empty_document_has_no_cues() {
        assert!(parse::<&str>(&[]).is_empty());
    }

    #[test]
    fn formats_rounded_seconds_and_pipes() {
        let mut cues = RawCues::new();
        cues.push("00:00:01.600", "00:00:03.000", "a\nb");
        cues.push("-00:00:01.000", "00:00:01.000", "neg");
        assert_eq!(
            format(&cues, Newline::Unix),
            "00:00:02:a|b\n00:00:00:neg\n"
        );
    }

    #[test]
    fn show_times_past_two_digit_hours_are_clamped() {
        let mut cues = RawCues::new();
        cues.push("100:00:00.000", "100:00:02.000", "late");
        assert_eq!(format(&cues, Newline::Unix), "99:59:59:late\n");
    }
}
