//! Position calculator.
//!
//! Pure conversions between the three position representations used by the
//! engine, at a given framerate:
//!
//! - **time**: text of the form `[-]HH:MM:SS.mmm`
//! - **frame**: integer frame number
//! - **seconds**: floating point seconds
//!
//! Time strings are always produced with millisecond precision. Frame
//! conversions round to the nearest frame rather than truncating.

use crate::error::CalcError;

/// Framerate used when none has been chosen.
pub const DEFAULT_FRAMERATE: f64 = 23.976;

/// Converts positions at a fixed framerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculator {
    framerate: f64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            framerate: DEFAULT_FRAMERATE,
        }
    }
}

impl Calculator {
    /// Create a calculator for `framerate` frames per second.
    ///
    /// Fails with `InvalidFrameRate` unless the framerate is finite and > 0.
    pub fn new(framerate: f64) -> Result<Self, CalcError> {
        validate_framerate(framerate)?;
        Ok(Self { framerate })
    }

    /// Frames per second.
    pub fn framerate(&self) -> f64 {
        self.framerate
    }

    /// Duration of a single frame in seconds.
    pub fn frame_duration(&self) -> f64 {
        1.0 / self.framerate
    }

    /// Parse a time string into seconds.
    ///
    /// Accepts both `.` and `,` as the decimal separator.
    pub fn time_to_seconds(&self, time: &str) -> Result<f64, CalcError> {
        parse_time(time)
    }

    /// Format seconds as a time string, rounded to the millisecond.
    pub fn seconds_to_time(&self, seconds: f64) -> String {
        format_time(seconds)
    }

    /// Convert a time string to the nearest frame.
    pub fn time_to_frame(&self, time: &str) -> Result<i64, CalcError> {
        Ok(self.seconds_to_frame(self.time_to_seconds(time)?))
    }

    /// Convert a frame to its time string.
    pub fn frame_to_time(&self, frame: i64) -> String {
        self.seconds_to_time(self.frame_to_seconds(frame))
    }

    /// Convert seconds to the nearest frame.
    pub fn seconds_to_frame(&self, seconds: f64) -> i64 {
        (seconds * self.framerate).round() as i64
    }

    /// Convert a frame to seconds.
    pub fn frame_to_seconds(&self, frame: i64) -> f64 {
        frame as f64 / self.framerate
    }

    /// Add `seconds` (may be negative) to a time string.
    pub fn add_seconds_to_time(&self, time: &str, seconds: f64) -> Result<String, CalcError> {
        Ok(self.seconds_to_time(self.time_to_seconds(time)? + seconds))
    }

    /// Add two time strings.
    pub fn add_times(&self, x: &str, y: &str) -> Result<String, CalcError> {
        Ok(self.seconds_to_time(self.time_to_seconds(x)? + self.time_to_seconds(y)?))
    }

    /// Round the seconds of a time string to `precision` decimals.
    ///
    /// The result keeps the three-decimal layout, e.g. rounding
    /// `00:00:01.678` to precision 1 gives `00:00:01.700`.
    pub fn round_time(&self, time: &str, precision: u32) -> Result<String, CalcError> {
        let factor = 10f64.powi(precision.min(3) as i32);
        let seconds = self.time_to_seconds(time)?;
        Ok(self.seconds_to_time((seconds * factor).round() / factor))
    }

    /// Check whether `time` parses as a time string.
    pub fn is_valid_time(time: &str) -> bool {
        parse_time(time).is_ok()
    }
}

/// Check that a framerate is usable for conversions.
pub fn validate_framerate(framerate: f64) -> Result<(), CalcError> {
    if framerate.is_finite() && framerate > 0.0 {
        Ok(())
    } else {
        Err(CalcError::InvalidFrameRate(framerate))
    }
}

fn parse_time(time: &str) -> Result<f64, CalcError> {
    let invalid = || CalcError::InvalidTime(time.to_string());
    let trimmed = time.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed),
    };

    let mut parts = body.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let seconds = seconds.replace(',', ".");
    let (whole, fraction) = seconds.split_once('.').unwrap_or((seconds.as_str(), ""));
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || !all_digits(minutes) || !all_digits(whole) {
        return Err(invalid());
    }
    if !fraction.is_empty() && !all_digits(fraction) {
        return Err(invalid());
    }

    let hours: f64 = hours.parse().map_err(|_| invalid())?;
    let minutes: f64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
    Ok(sign * (hours * 3600.0 + minutes * 60.0 + seconds))
}

fn format_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as i64;
    let sign = if total_ms < 0 { "-" } else { "" };
    let total_ms = total_ms.unsigned_abs();

    let millis = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{sign}{hours:02}:{mins:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_framerate() {
        assert_eq!(Calculator::new(0.0), Err(CalcError::InvalidFrameRate(0.0)));
        assert_eq!(
            Calculator::new(-25.0),
            Err(CalcError::InvalidFrameRate(-25.0))
        );
        assert!(Calculator::new(f64::NAN).is_err());
        assert!(Calculator::new(25.0).is_ok());
    }

    #[test]
    fn test_time_to_seconds() {
        let calc = Calculator::default();
        assert!((calc.time_to_seconds("00:00:00.000").unwrap() - 0.0).abs() < 1e-9);
        assert!((calc.time_to_seconds("00:00:01.500").unwrap() - 1.5).abs() < 1e-9);
        assert!((calc.time_to_seconds("01:02:03.004").unwrap() - 3723.004).abs() < 1e-9);
        assert!((calc.time_to_seconds("00:00:01,250").unwrap() - 1.25).abs() < 1e-9);
        assert!((calc.time_to_seconds("-00:00:02.000").unwrap() + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_times() {
        let calc = Calculator::default();
        for bad in ["", "00:00", "aa:00:00.000", "00:00:00.0x0", "00:00:00:00"] {
            assert_eq!(
                calc.time_to_seconds(bad),
                Err(CalcError::InvalidTime(bad.to_string())),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_seconds_to_time() {
        let calc = Calculator::default();
        assert_eq!(calc.seconds_to_time(0.0), "00:00:00.000");
        assert_eq!(calc.seconds_to_time(1.5), "00:00:01.500");
        assert_eq!(calc.seconds_to_time(3723.004), "01:02:03.004");
        assert_eq!(calc.seconds_to_time(-2.0), "-00:00:02.000");
        assert_eq!(calc.seconds_to_time(59.9996), "00:01:00.000");
    }

    #[test]
    fn time_seconds_roundtrip_is_exact() {
        let calc = Calculator::default();
        for time in ["00:00:00.001", "00:12:34.567", "10:00:00.000", "99:59:59.999"] {
            let seconds = calc.time_to_seconds(time).unwrap();
            assert_eq!(calc.seconds_to_time(seconds), time);
        }
    }

    #[test]
    fn frames_round_to_nearest() {
        let calc = Calculator::new(25.0).unwrap();
        assert_eq!(calc.seconds_to_frame(0.019), 0);
        assert_eq!(calc.seconds_to_frame(0.021), 1);
        assert_eq!(calc.time_to_frame("00:00:01.000").unwrap(), 25);
        assert_eq!(calc.frame_to_time(50), "00:00:02.000");
    }

    #[test]
    fn frame_roundtrip_within_one_frame() {
        for framerate in [23.976, 25.0, 29.97, 59.94] {
            let calc = Calculator::new(framerate).unwrap();
            for ms in (0..120_000).step_by(997) {
                let time = calc.seconds_to_time(ms as f64 / 1000.0);
                let frame = calc.time_to_frame(&time).unwrap();
                let back = calc.time_to_seconds(&calc.frame_to_time(frame)).unwrap();
                let original = calc.time_to_seconds(&time).unwrap();
                assert!(
                    (back - original).abs() <= calc.frame_duration(),
                    "{time} at {framerate} drifted to {back}"
                );
            }
        }
    }

    #[test]
    fn test_add_seconds_to_time() {
        let calc = Calculator::default();
        assert_eq!(
            calc.add_seconds_to_time("00:00:05.000", 3.0).unwrap(),
            "00:00:08.000"
        );
        assert_eq!(
            calc.add_seconds_to_time("00:00:59.500", 0.75).unwrap(),
            "00:01:00.250"
        );
        assert_eq!(
            calc.add_times("00:01:00.000", "00:00:30.500").unwrap(),
            "00:01:30.500"
        );
    }

    #[test]
    fn test_round_time() {
        let calc = Calculator::default();
        assert_eq!(calc.round_time("00:00:01.678", 0).unwrap(), "00:00:02.000");
        assert_eq!(calc.round_time("00:00:01.678", 1).unwrap(), "00:00:01.700");
        assert_eq!(calc.round_time("00:00:01.678", 3).unwrap(), "00:00:01.678");
        assert_eq!(calc.round_time("00:00:01.499", 0).unwrap(), "00:00:01.000");
    }
}
