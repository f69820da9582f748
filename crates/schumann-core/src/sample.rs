//! Sample records and lenient numeric coercion
//!
//! Upstream feeds deliver numbers, numeric strings, or the placeholder `"--"`
//! when a source is down. The chart must never break on such input, so
//! malformed values are coerced to fixed defaults instead of rejected.

use core::fmt::Write;

use heapless::String;

use crate::math::round_to_hundredths;

/// Maximum length of a sample's display label
pub const LABEL_CAPACITY: usize = 16;

/// Display timestamp attached to a sample (e.g. `"14:05"`)
pub type Label = String<LABEL_CAPACITY>;

/// Placeholder shown when a label is missing
pub const MISSING_LABEL: &str = "--:--";

/// Fallback used when the wind speed is unavailable (km/s)
pub const WIND_FALLBACK_KMS: f32 = 0.0;

/// Fallback used when the Kp index is unavailable
pub const KP_FALLBACK: f32 = 0.0;

/// Fundamental Schumann resonance, also the fallback frequency (Hz)
pub const SCHUMANN_BASE_HZ: f32 = 7.83;

/// Kp at and above which the resonance is shifted upward
const SCHUMANN_SHIFT_KP_THRESHOLD: f32 = 4.0;

/// Frequency shift per Kp unit above 3 (Hz)
const SCHUMANN_SHIFT_PER_KP_HZ: f32 = 0.1;

/// A numeric reading that may be missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A finite measurement
    Value(f32),
    /// The source reported nothing usable (`"--"`, NaN, garbage)
    Unavailable,
}

impl Reading {
    /// Parse text the way a browser's `parseFloat` does
    ///
    /// Leading whitespace is skipped and the longest numeric prefix wins, so
    /// `"620 km/s"` reads as 620. Anything without a numeric prefix is
    /// [`Reading::Unavailable`].
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_start();
        let bytes = trimmed.as_bytes();
        let mut end = 0;
        let mut seen_digit = false;
        let mut seen_dot = false;
        let mut seen_exp = false;

        while end < bytes.len() {
            let c = bytes[end];
            match c {
                b'0'..=b'9' => seen_digit = true,
                b'+' | b'-' if end == 0 => {}
                b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
                b'.' if !seen_dot && !seen_exp => seen_dot = true,
                b'e' | b'E' if seen_digit && !seen_exp => {
                    // Only an exponent if digits follow, otherwise stop here
                    let rest = &bytes[end + 1..];
                    let digits_at = match rest.first() {
                        Some(b'+' | b'-') => 1,
                        _ => 0,
                    };
                    if !rest.get(digits_at).is_some_and(u8::is_ascii_digit) {
                        break;
                    }
                    seen_exp = true;
                }
                _ => break,
            }
            end += 1;
        }

        if !seen_digit {
            return Self::Unavailable;
        }

        trimmed[..end]
            .parse::<f32>()
            .map(Self::from)
            .unwrap_or(Self::Unavailable)
    }

    /// The value, or `fallback` when unavailable
    pub fn or(self, fallback: f32) -> f32 {
        match self {
            Self::Value(value) => value,
            Self::Unavailable => fallback,
        }
    }

    /// The value, or `fallback` when unavailable or exactly zero
    pub fn or_nonzero(self, fallback: f32) -> f32 {
        match self {
            Self::Value(value) if value != 0.0 => value,
            _ => fallback,
        }
    }

    /// The value, if any
    pub fn value(self) -> Option<f32> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    /// Whether a value is present
    pub fn is_available(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<f32> for Reading {
    fn from(value: f32) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Unavailable
        }
    }
}

impl From<Option<f32>> for Reading {
    fn from(value: Option<f32>) -> Self {
        value.map(Self::from).unwrap_or(Self::Unavailable)
    }
}

/// One time-stamped set of correlation readings
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Display timestamp
    pub label: Label,
    /// Solar wind speed in km/s
    pub wind: f32,
    /// Planetary Kp index (nominal 0-9)
    pub kp: f32,
    /// Resonance frequency in Hz (nominal 7.7-8.5)
    pub schumann: f32,
}

impl Sample {
    /// Create a sample from already-valid numbers
    pub const fn new(label: Label, wind: f32, kp: f32, schumann: f32) -> Self {
        Self {
            label,
            wind,
            kp,
            schumann,
        }
    }

    /// Create a sample, substituting defaults for unavailable readings
    ///
    /// Wind and Kp fall back to 0, resonance to [`SCHUMANN_BASE_HZ`].
    pub fn coerce(label: Label, wind: Reading, kp: Reading, schumann: Reading) -> Self {
        Self {
            label,
            wind: wind.or(WIND_FALLBACK_KMS),
            kp: kp.or(KP_FALLBACK),
            schumann: schumann.or_nonzero(SCHUMANN_BASE_HZ),
        }
    }

    /// Label text, or the placeholder when empty
    pub fn label_or_placeholder(&self) -> &str {
        if self.label.is_empty() {
            MISSING_LABEL
        } else {
            self.label.as_str()
        }
    }
}

/// Build a label from text, truncating to [`LABEL_CAPACITY`]
pub fn label(text: &str) -> Label {
    let mut s = Label::new();
    for c in text.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}

/// `"HH:MM"` wall-clock label for a Unix timestamp shifted by `utc_offset_secs`
pub fn clock_label(unix_secs: u64, utc_offset_secs: i32) -> Label {
    const SECS_PER_DAY: i64 = 86_400;

    let local = unix_secs as i64 + utc_offset_secs as i64;
    let secs_of_day = local.rem_euclid(SECS_PER_DAY);
    let hours = secs_of_day / 3600;
    let minutes = (secs_of_day % 3600) / 60;

    let mut s = Label::new();
    let _ = write!(s, "{:02}:{:02}", hours, minutes);
    s
}

/// Derive the resonance frequency reported alongside a Kp reading
///
/// `jitter` is natural variation in `[-0.02, 0.02)` Hz supplied by the
/// caller. Strong geomagnetic activity (Kp >= 4) pushes the frequency up by
/// 0.1 Hz per Kp unit above 3. The result is rounded to two decimals.
pub fn schumann_frequency(kp: Reading, jitter: f32) -> f32 {
    let mut variation = jitter;
    if let Reading::Value(kp) = kp
        && kp >= SCHUMANN_SHIFT_KP_THRESHOLD
    {
        variation += (kp - 3.0) * SCHUMANN_SHIFT_PER_KP_HZ;
    }

    round_to_hundredths(SCHUMANN_BASE_HZ + variation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(Reading::parse("620"), Reading::Value(620.0));
        assert_eq!(Reading::parse("  4.33"), Reading::Value(4.33));
        assert_eq!(Reading::parse("620 km/s"), Reading::Value(620.0));
        assert_eq!(Reading::parse("7.83 Hz"), Reading::Value(7.83));
        assert_eq!(Reading::parse("-1.5e2x"), Reading::Value(-150.0));
        assert_eq!(Reading::parse("3e"), Reading::Value(3.0));
        assert_eq!(Reading::parse(".5"), Reading::Value(0.5));
    }

    #[test]
    fn test_parse_garbage_is_unavailable() {
        assert_eq!(Reading::parse("--"), Reading::Unavailable);
        assert_eq!(Reading::parse(""), Reading::Unavailable);
        assert_eq!(Reading::parse("km/s"), Reading::Unavailable);
        assert_eq!(Reading::parse("."), Reading::Unavailable);
        assert_eq!(Reading::from(f32::NAN), Reading::Unavailable);
        assert_eq!(Reading::from(f32::INFINITY), Reading::Unavailable);
        assert_eq!(Reading::from(None), Reading::Unavailable);
    }

    #[test]
    fn test_coerce_zero_resonance_uses_base() {
        let sample = Sample::coerce(
            label("09:20"),
            Reading::parse("0"),
            Reading::parse("0"),
            Reading::parse("0"),
        );

        assert_eq!(sample.schumann, SCHUMANN_BASE_HZ);
        assert_eq!(sample.wind, 0.0);
        assert_eq!(sample.kp, 0.0);
    }

    #[test]
    fn test_coerce_applies_fallbacks() {
        let sample = Sample::coerce(
            label("09:15"),
            Reading::Unavailable,
            Reading::parse("--"),
            Reading::Unavailable,
        );

        assert_eq!(sample.wind, 0.0);
        assert_eq!(sample.kp, 0.0);
        assert_eq!(sample.schumann, 7.83);
        assert_eq!(sample.label.as_str(), "09:15");
    }

    #[test]
    fn test_label_truncates_and_placeholder() {
        let long = label("0123456789abcdefXYZ");
        assert_eq!(long.len(), LABEL_CAPACITY);

        let sample = Sample::new(Label::new(), 400.0, 2.0, 7.83);
        assert_eq!(sample.label_or_placeholder(), "--:--");
    }

    #[test]
    fn test_clock_label() {
        // 2024-01-01T13:07:00Z
        let ts = 1_704_114_420;
        assert_eq!(clock_label(ts, 0).as_str(), "13:07");
        // Tomsk is UTC+7
        assert_eq!(clock_label(ts, 7 * 3600).as_str(), "20:07");
        assert_eq!(clock_label(ts, -14 * 3600).as_str(), "23:07");
    }

    #[test]
    fn test_schumann_frequency_quiet() {
        assert_eq!(schumann_frequency(Reading::Value(2.0), 0.0), 7.83);
        assert_eq!(schumann_frequency(Reading::Value(3.9), 0.01), 7.84);
        assert_eq!(schumann_frequency(Reading::Unavailable, -0.02), 7.81);
    }

    #[test]
    fn test_schumann_frequency_storm_shift() {
        let f = schumann_frequency(Reading::Value(5.0), 0.0);
        assert!((f - 8.03).abs() < 1e-4, "got {f}");

        let f = schumann_frequency(Reading::Value(9.0), 0.0);
        assert!((f - 8.43).abs() < 1e-4, "got {f}");
    }
}
