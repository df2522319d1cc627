//! A single timed cue.
//!
//! Positions are stored natively in the subtitle's [`Mode`]: whole
//! milliseconds in time mode, frames in frame mode. Every other
//! representation is derived through the calculator at the subtitle's
//! framerate.

use super::position::{Mode, Position};
use crate::calc::Calculator;
use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Native {
    Millis(i64),
    Frame(i64),
}

/// A cue with start and end positions and main and translation text.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtitle {
    start: Native,
    end: Native,
    calc: Calculator,
    pub main_text: String,
    pub tran_text: String,
}

impl Default for Subtitle {
    fn default() -> Self {
        Self {
            start: Native::Millis(0),
            end: Native::Millis(0),
            calc: Calculator::default(),
            main_text: String::new(),
            tran_text: String::new(),
        }
    }
}

impl Subtitle {
    /// An empty subtitle at zero in `mode`.
    pub fn new(mode: Mode, framerate: f64) -> Result<Self, CalcError> {
        Ok(Self::with_calc(mode, Calculator::new(framerate)?))
    }

    pub(crate) fn with_calc(mode: Mode, calc: Calculator) -> Self {
        let zero = match mode {
            Mode::Time => Native::Millis(0),
            Mode::Frame => Native::Frame(0),
        };
        Self {
            start: zero,
            end: zero,
            calc,
            ..Self::default()
        }
    }

    /// A time-mode subtitle, convenient for building documents.
    pub fn from_times(start: &str, end: &str, text: &str) -> Result<Self, CalcError> {
        let mut subtitle = Self::default();
        subtitle.set_start(Position::from(start))?;
        subtitle.set_end(Position::from(end))?;
        subtitle.main_text = text.to_string();
        Ok(subtitle)
    }

    pub fn mode(&self) -> Mode {
        match self.start {
            Native::Millis(_) => Mode::Time,
            Native::Frame(_) => Mode::Frame,
        }
    }

    pub fn framerate(&self) -> f64 {
        self.calc.framerate()
    }

    pub fn calc(&self) -> &Calculator {
        &self.calc
    }

    /// Start in the native representation.
    pub fn start(&self) -> Position {
        self.position(self.start)
    }

    /// End in the native representation.
    pub fn end(&self) -> Position {
        self.position(self.end)
    }

    /// Duration in the native representation.
    pub fn duration(&self) -> Position {
        match (self.start, self.end) {
            (Native::Frame(start), Native::Frame(end)) => Position::Frame(end - start),
            _ => Position::Time(self.duration_time()),
        }
    }

    pub fn start_seconds(&self) -> f64 {
        self.seconds(self.start)
    }

    pub fn end_seconds(&self) -> f64 {
        self.seconds(self.end)
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds() - self.start_seconds()
    }

    pub fn start_frame(&self) -> i64 {
        self.frame(self.start)
    }

    pub fn end_frame(&self) -> i64 {
        self.frame(self.end)
    }

    pub fn duration_frame(&self) -> i64 {
        self.end_frame() - self.start_frame()
    }

    pub fn start_time(&self) -> String {
        self.calc.seconds_to_time(self.start_seconds())
    }

    pub fn end_time(&self) -> String {
        self.calc.seconds_to_time(self.end_seconds())
    }

    pub fn duration_time(&self) -> String {
        self.calc.seconds_to_time(self.duration_seconds())
    }

    /// Set the start from any representation.
    pub fn set_start(&mut self, position: Position) -> Result<(), CalcError> {
        self.start = self.to_native(&position)?;
        Ok(())
    }

    /// Set the end from any representation.
    pub fn set_end(&mut self, position: Position) -> Result<(), CalcError> {
        self.end = self.to_native(&position)?;
        Ok(())
    }

    /// Move both positions by `value`.
    ///
    /// Times and seconds shift by seconds, frames by frames; the offset is
    /// converted to the native representation first.
    pub fn shift_positions(&mut self, value: &Position) -> Result<(), CalcError> {
        let (start, end) = match (self.start, self.end) {
            (Native::Frame(start), Native::Frame(end)) => {
                let frames = value.to_frame(&self.calc)?;
                (
                    Native::Frame(start.saturating_add(frames)),
                    Native::Frame(end.saturating_add(frames)),
                )
            }
            (start, end) => {
                let millis = to_millis(value.to_seconds(&self.calc)?);
                (
                    Native::Millis(self.millis(start).saturating_add(millis)),
                    Native::Millis(self.millis(end).saturating_add(millis)),
                )
            }
        };
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Multiply both positions by `coefficient`.
    pub fn scale_positions(&mut self, coefficient: f64) {
        let scale = |native| match native {
            Native::Millis(ms) => Native::Millis((ms as f64 * coefficient).round() as i64),
            Native::Frame(frame) => Native::Frame((frame as f64 * coefficient).round() as i64),
        };
        self.start = scale(self.start);
        self.end = scale(self.end);
    }

    /// Adopt `framerate`, scaling positions by `old / new`.
    pub fn convert_framerate(&mut self, framerate: f64) -> Result<(), CalcError> {
        let calc = Calculator::new(framerate)?;
        self.scale_positions(self.calc.framerate() / framerate);
        self.calc = calc;
        Ok(())
    }

    /// Adopt `framerate` without moving native positions.
    pub fn set_framerate(&mut self, framerate: f64) -> Result<(), CalcError> {
        self.calc = Calculator::new(framerate)?;
        Ok(())
    }

    /// Take start and end from `other` as is.
    pub(crate) fn copy_positions_from(&mut self, other: &Subtitle) {
        self.start = other.start;
        self.end = other.end;
    }

    pub(crate) fn adopt_calc(&mut self, calc: Calculator) {
        self.calc = calc;
    }

    fn to_native(&self, position: &Position) -> Result<Native, CalcError> {
        Ok(match self.mode() {
            Mode::Time => Native::Millis(to_millis(position.to_seconds(&self.calc)?)),
            Mode::Frame => Native::Frame(position.to_frame(&self.calc)?),
        })
    }

    fn position(&self, native: Native) -> Position {
        match native {
            Native::Millis(_) => Position::Time(self.calc.seconds_to_time(self.seconds(native))),
            Native::Frame(frame) => Position::Frame(frame),
        }
    }

    fn seconds(&self, native: Native) -> f64 {
        match native {
            Native::Millis(ms) => ms as f64 / 1000.0,
            Native::Frame(frame) => self.calc.frame_to_seconds(frame),
        }
    }

    fn frame(&self, native: Native) -> i64 {
        match native {
            Native::Frame(frame) => frame,
            Native::Millis(_) => self.calc.seconds_to_frame(self.seconds(native)),
        }
    }

    fn millis(&self, native: Native) -> i64 {
        match native {
            Native::Millis(ms) => ms,
            Native::Frame(_) => to_millis(self.seconds(native)),
        }
    }
}

fn to_millis(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_mode_derives_other_representations() {
        let mut sub = Subtitle::new(Mode::Time, 25.0).unwrap();
        sub.set_start(Position::Seconds(1.0)).unwrap();
        sub.set_end(Position::Frame(75)).unwrap();

        assert_eq!(sub.start(), Position::Time("00:00:01.000".to_string()));
        assert_eq!(sub.end_time(), "00:00:03.000");
        assert_eq!(sub.start_frame(), 25);
        assert_eq!(sub.duration(), Position::Time("00:00:02.000".to_string()));
        assert!((sub.duration_seconds() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn frame_mode_keeps_frames() {
        let mut sub = Subtitle::new(Mode::Frame, 25.0).unwrap();
        sub.set_start(Position::from("00:00:02.000")).unwrap();
        sub.set_end(Position::Frame(100)).unwrap();
        assert_eq!(sub.start(), Position::Frame(50));
        assert_eq!(sub.duration(), Position::Frame(50));
        assert!((sub.end_seconds() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn shift_converts_offsets() {
        let mut sub = Subtitle::from_times("00:00:01.000", "00:00:02.000", "x").unwrap();
        sub.shift_positions(&Position::Seconds(0.5)).unwrap();
        assert_eq!(sub.start_time(), "00:00:01.500");
        sub.shift_positions(&Position::from("-00:00:01.000")).unwrap();
        assert_eq!(sub.end_time(), "00:00:01.500");

        let mut frames = Subtitle::new(Mode::Frame, 25.0).unwrap();
        frames.set_end(Position::Frame(10)).unwrap();
        frames.shift_positions(&Position::Seconds(1.0)).unwrap();
        assert_eq!(frames.start(), Position::Frame(25));
        assert_eq!(frames.end(), Position::Frame(35));
    }

    #[test]
    fn scale_rounds_natively() {
        let mut sub = Subtitle::from_times("00:00:01.000", "00:00:03.333", "").unwrap();
        sub.scale_positions(0.5);
        assert_eq!(sub.start_time(), "00:00:00.500");
        assert_eq!(sub.end_time(), "00:00:01.667");
    }

    #[test]
    fn convert_framerate_scales_by_ratio() {
        let mut sub = Subtitle::new(Mode::Time, 25.0).unwrap();
        sub.set_end(Position::Seconds(10.0)).unwrap();
        sub.convert_framerate(20.0).unwrap();
        assert_eq!(sub.end_time(), "00:00:12.500");
        assert!((sub.framerate() - 20.0).abs() < 1e-9);

        assert!(sub.convert_framerate(0.0).is_err());
        assert!((sub.framerate() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn set_framerate_keeps_native_positions() {
        let mut sub = Subtitle::new(Mode::Frame, 25.0).unwrap();
        sub.set_end(Position::Frame(50)).unwrap();
        sub.set_framerate(50.0).unwrap();
        assert_eq!(sub.end(), Position::Frame(50));
        assert!((sub.end_seconds() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_inputs_fail() {
        assert!(Subtitle::new(Mode::Time, -1.0).is_err());
        assert!(Subtitle::from_times("bad", "00:00:01.000", "").is_err());
    }

    #[test]
    fn huge_shifts_saturate() {
        let mut sub = Subtitle::new(Mode::Time, 25.0).unwrap();
        sub.set_start(Position::Seconds(1.0)).unwrap();
        sub.set_end(Position::Seconds(2.0)).unwrap();
        sub.shift_positions(&Position::Seconds(1e300)).unwrap();
        assert_eq!(sub.start_seconds(), sub.end_seconds());
        assert!(sub.start_seconds() > 1e15);

        let mut frames = Subtitle::new(Mode::Frame, 25.0).unwrap();
        frames.set_start(Position::Frame(10)).unwrap();
        frames.set_end(Position::Frame(20)).unwrap();
        frames.shift_positions(&Position::Frame(i64::MAX)).unwrap();
        assert_eq!(frames.start(), Position::Frame(i64::MAX));
        assert_eq!(frames.end(), Position::Frame(i64::MAX));
    }
}
