//! Resonance amplitude index, short-term trend and session statistics
//!
//! The amplitude index blends geomagnetic activity and lightning rate into a
//! 0-100 figure. [`AmplitudeTracker`] keeps two histories of it: a short
//! ring for the trend arrow and a longer session ring for min/avg/max, the
//! history chart and the biological-effect notes.

extern crate alloc;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::Vec as BoundedVec;

use crate::buffer::RingBuffer;
use crate::math::{round_half_away, sqrt_approx};
use crate::ui::styling::{COLOR_ALERT, COLOR_CALM, COLOR_NORMAL, COLOR_SLOWED, COLOR_WARNING};

/// Entries kept for the trend computation
pub const TREND_WINDOW: usize = 10;

/// Entries kept for the session statistics
pub const SESSION_CAPACITY: usize = 100;

/// Long-run reference amplitude
pub const GLOBAL_AVERAGE_AMPLITUDE: f32 = 40.0;

const TREND_THRESHOLD: f32 = 5.0;
const TREND_RECENT: usize = 3;
const MIN_VALUES_FOR_BIO_EFFECTS: usize = 3;
const PROLONGED_EXPOSURE_MINUTES: f32 = 30.0;
const PROLONGED_EXPOSURE_AVERAGE: f32 = 60.0;

/// Amplitude index (0-100) from Kp and the global lightning rate
///
/// Kp contributes up to 60 points, lightning up to 40 (saturating at
/// 200 strikes per minute).
pub fn amplitude_index(kp: f32, lightning: f32) -> f32 {
    let kp_part = kp / 9.0 * 60.0;
    let lightning_part = (lightning / 200.0 * 40.0).min(40.0);
    (kp_part + lightning_part).min(100.0)
}

/// Direction of the amplitude over the last few refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// More than 5 points above the recent mean
    Rising,
    /// More than 5 points below the recent mean
    Falling,
    /// Within 5 points, or fewer than three entries
    Stable,
}

impl Trend {
    /// Get the display color for this trend
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Rising => COLOR_ALERT,
            Self::Falling => COLOR_CALM,
            Self::Stable => COLOR_NORMAL,
        }
    }

    /// Get the display label for this trend
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Falling => "Falling",
            Self::Stable => "Stable",
        }
    }
}

/// Position relative to [`GLOBAL_AVERAGE_AMPLITUDE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// More than 15 above
    WellAbove,
    /// More than 5 above
    Above,
    /// Within 5
    Near,
    /// More than 5 below
    Below,
    /// More than 15 below
    WellBelow,
}

impl Comparison {
    /// Compare an amplitude with the global average
    pub fn assess(amplitude: f32) -> Self {
        let avg = GLOBAL_AVERAGE_AMPLITUDE;
        if amplitude > avg + 15.0 {
            Self::WellAbove
        } else if amplitude > avg + 5.0 {
            Self::Above
        } else if amplitude < avg - 15.0 {
            Self::WellBelow
        } else if amplitude < avg - 5.0 {
            Self::Below
        } else {
            Self::Near
        }
    }

    /// Get the display color for this comparison
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::WellAbove => COLOR_ALERT,
            Self::Above => COLOR_WARNING,
            Self::Near => COLOR_NORMAL,
            Self::Below => COLOR_SLOWED,
            Self::WellBelow => COLOR_CALM,
        }
    }

    /// Get the display label for this comparison
    pub const fn label(self) -> &'static str {
        match self {
            Self::WellAbove => "Well above average",
            Self::Above => "Above average",
            Self::Near => "Near average",
            Self::Below => "Below average",
            Self::WellBelow => "Well below average",
        }
    }
}

/// Advice for the current amplitude
pub fn recommendation(amplitude: f32) -> &'static str {
    if amplitude <= 30.0 {
        "Ideal time for deep meditation and energy recovery"
    } else if amplitude <= 60.0 {
        "Favorable conditions for normal activity and focus"
    } else if amplitude <= 80.0 {
        "Stay hydrated and take regular breaks; some people may be sensitive"
    } else {
        "Very intense signal: favor rest and limit external stimuli"
    }
}

/// Note about the likely biological effect of the session so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioEffect {
    /// Average below 30
    Recovery,
    /// Average 30 to 50
    Balanced,
    /// Average 50 to 70
    ModerateStimulation,
    /// Average 70 and above
    IntenseSignal,
    /// Standard deviation above 15
    HighVariability,
    /// Standard deviation below 5
    StableSignal,
    /// Over 30 minutes with an average above 60
    ProlongedExposure {
        /// Session length in whole minutes
        minutes: u32,
    },
}

impl BioEffect {
    /// Short heading
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recovery => "Recovery window",
            Self::Balanced => "Normal conditions",
            Self::ModerateStimulation => "Moderate stimulation",
            Self::IntenseSignal => "Intense signal",
            Self::HighVariability => "High variability",
            Self::StableSignal => "Stable signal",
            Self::ProlongedExposure { .. } => "Prolonged exposure",
        }
    }

    /// Full sentence for display
    pub fn describe(self) -> String {
        let detail = match self {
            Self::Recovery => "the weak signal favors deep rest and regeneration",
            Self::Balanced => "balanced environment for daily activities",
            Self::ModerateStimulation => "possible effects on focus and mood",
            Self::IntenseSignal => "stimulating environment that may affect the nervous system",
            Self::HighVariability => "rapid changes can disturb biological adaptation",
            Self::StableSignal => "a steady signal makes adaptation easier",
            Self::ProlongedExposure { minutes } => {
                return format!(
                    "{}: {} min of elevated signal, take breaks",
                    self.label(),
                    minutes
                );
            }
        };
        format!("{}: {}", self.label(), detail)
    }
}

/// Min/avg/max over the session ring plus its duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    /// Smallest recorded amplitude
    pub min: f32,
    /// Mean recorded amplitude
    pub avg: f32,
    /// Largest recorded amplitude
    pub max: f32,
    /// Population standard deviation
    pub std_dev: f32,
    /// Entries currently held
    pub count: usize,
    /// Seconds since the session started
    pub duration_secs: u64,
}

impl SessionStats {
    /// Session duration as `"MM:SS"` (minutes keep growing past 99)
    pub fn duration_label(&self) -> heapless::String<12> {
        let mut s = heapless::String::new();
        let _ = write!(
            s,
            "{:02}:{:02}",
            self.duration_secs / 60,
            self.duration_secs % 60
        );
        s
    }
}

#[derive(Debug, Clone, Copy)]
struct AmplitudePoint {
    recorded_at_secs: u64,
    value: f32,
}

/// Everything derived from one new amplitude value
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeReport {
    /// The recorded amplitude
    pub value: f32,
    /// Short-term direction
    pub trend: Trend,
    /// Position relative to the global average
    pub comparison: Comparison,
    /// Advice text
    pub recommendation: &'static str,
    /// Session statistics including this value
    pub stats: SessionStats,
    /// Biological-effect notes, empty until three values are recorded
    pub bio_effects: BoundedVec<BioEffect, 3>,
}

/// Amplitude histories for one monitoring session
#[derive(Debug, Clone)]
pub struct AmplitudeTracker {
    recent: RingBuffer<f32, TREND_WINDOW>,
    session: RingBuffer<AmplitudePoint, SESSION_CAPACITY>,
    session_start_secs: u64,
}

impl AmplitudeTracker {
    /// Start a session at `session_start_secs` (wall-clock seconds)
    pub fn new(session_start_secs: u64) -> Self {
        Self {
            recent: RingBuffer::new(),
            session: RingBuffer::new(),
            session_start_secs,
        }
    }

    /// Record a new amplitude and derive the report
    pub fn record(&mut self, amplitude: f32, now_secs: u64) -> AmplitudeReport {
        self.recent.append(amplitude);
        self.session.append(AmplitudePoint {
            recorded_at_secs: now_secs,
            value: amplitude,
        });

        let stats = self.stats(now_secs);
        AmplitudeReport {
            value: amplitude,
            trend: self.trend(amplitude),
            comparison: Comparison::assess(amplitude),
            recommendation: recommendation(amplitude),
            bio_effects: self.bio_effects(&stats),
            stats,
        }
    }

    /// Session amplitudes, oldest first
    pub fn session_values(&self) -> Vec<f32> {
        self.session.iter().map(|point| point.value).collect()
    }

    /// Wall-clock time of the oldest value still in the session ring
    pub fn oldest_recorded_at(&self) -> Option<u64> {
        self.session.get(0).map(|point| point.recorded_at_secs)
    }

    /// Number of values recorded in the session ring
    pub fn len(&self) -> usize {
        self.session.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    fn trend(&self, amplitude: f32) -> Trend {
        let count = self.recent.len();
        if count < TREND_RECENT {
            return Trend::Stable;
        }

        let recent_sum: f32 = self.recent.iter().skip(count - TREND_RECENT).sum();
        let diff = amplitude - recent_sum / TREND_RECENT as f32;

        if diff > TREND_THRESHOLD {
            Trend::Rising
        } else if diff < -TREND_THRESHOLD {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    fn stats(&self, now_secs: u64) -> SessionStats {
        let count = self.session.len();
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0;
        for point in self.session.iter() {
            min = min.min(point.value);
            max = max.max(point.value);
            sum += point.value;
        }

        let avg = if count > 0 { sum / count as f32 } else { 0.0 };
        let variance = if count > 0 {
            self.session
                .iter()
                .map(|point| (point.value - avg) * (point.value - avg))
                .sum::<f32>()
                / count as f32
        } else {
            0.0
        };

        SessionStats {
            min: if count > 0 { min } else { 0.0 },
            avg,
            max: if count > 0 { max } else { 0.0 },
            std_dev: sqrt_approx(variance),
            count,
            duration_secs: now_secs.saturating_sub(self.session_start_secs),
        }
    }

    fn bio_effects(&self, stats: &SessionStats) -> BoundedVec<BioEffect, 3> {
        let mut effects = BoundedVec::new();
        if stats.count < MIN_VALUES_FOR_BIO_EFFECTS {
            return effects;
        }

        let level = if stats.avg < 30.0 {
            BioEffect::Recovery
        } else if stats.avg < 50.0 {
            BioEffect::Balanced
        } else if stats.avg < 70.0 {
            BioEffect::ModerateStimulation
        } else {
            BioEffect::IntenseSignal
        };
        let _ = effects.push(level);

        if stats.std_dev > 15.0 {
            let _ = effects.push(BioEffect::HighVariability);
        } else if stats.std_dev < 5.0 {
            let _ = effects.push(BioEffect::StableSignal);
        }

        let minutes = stats.duration_secs as f32 / 60.0;
        if minutes > PROLONGED_EXPOSURE_MINUTES && stats.avg > PROLONGED_EXPOSURE_AVERAGE {
            let _ = effects.push(BioEffect::ProlongedExposure {
                minutes: round_half_away(minutes) as u32,
            });
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_index() {
        assert_eq!(amplitude_index(0.0, 0.0), 0.0);
        assert!((amplitude_index(4.5, 100.0) - 50.0).abs() < 1e-4);
        // Lightning saturates at 40 points
        assert!((amplitude_index(0.0, 1000.0) - 40.0).abs() < 1e-4);
        assert_eq!(amplitude_index(9.0, 400.0), 100.0);
    }

    #[test]
    fn test_trend_needs_three_values() {
        let mut tracker = AmplitudeTracker::new(0);
        assert_eq!(tracker.record(10.0, 60).trend, Trend::Stable);
        assert_eq!(tracker.record(90.0, 120).trend, Trend::Stable);

        // Mean of (10, 90, 80) is 60, so 80 is 20 above
        assert_eq!(tracker.record(80.0, 180).trend, Trend::Rising);
        // Mean of (90, 80, 20) is 63.3
        assert_eq!(tracker.record(20.0, 240).trend, Trend::Falling);
        // Mean of (80, 20, 50) is 50
        assert_eq!(tracker.record(50.0, 300).trend, Trend::Stable);
    }

    #[test]
    fn test_comparison_and_recommendation() {
        assert_eq!(Comparison::assess(56.0), Comparison::WellAbove);
        assert_eq!(Comparison::assess(55.0), Comparison::Above);
        assert_eq!(Comparison::assess(45.0), Comparison::Near);
        assert_eq!(Comparison::assess(35.0), Comparison::Near);
        assert_eq!(Comparison::assess(34.0), Comparison::Below);
        assert_eq!(Comparison::assess(24.0), Comparison::WellBelow);

        assert!(recommendation(30.0).starts_with("Ideal"));
        assert!(recommendation(60.0).starts_with("Favorable"));
        assert!(recommendation(80.0).starts_with("Stay hydrated"));
        assert!(recommendation(80.5).starts_with("Very intense"));
    }

    #[test]
    fn test_session_stats_and_duration() {
        let mut tracker = AmplitudeTracker::new(1_000);
        tracker.record(20.0, 1_060);
        tracker.record(40.0, 1_120);
        let report = tracker.record(60.0, 1_000 + 754);

        assert_eq!(report.stats.min, 20.0);
        assert_eq!(report.stats.max, 60.0);
        assert!((report.stats.avg - 40.0).abs() < 1e-4);
        assert_eq!(report.stats.duration_label().as_str(), "12:34");
        assert_eq!(tracker.oldest_recorded_at(), Some(1_060));
    }

    #[test]
    fn test_session_ring_is_bounded() {
        let mut tracker = AmplitudeTracker::new(0);
        for i in 0..130 {
            tracker.record(i as f32, i);
        }
        assert_eq!(tracker.len(), SESSION_CAPACITY);
        assert_eq!(tracker.session_values().first(), Some(&30.0));
    }

    #[test]
    fn test_bio_effects() {
        let mut tracker = AmplitudeTracker::new(0);
        tracker.record(20.0, 10);
        assert!(tracker.record(20.0, 20).bio_effects.is_empty());

        let report = tracker.record(20.0, 30);
        assert_eq!(
            report.bio_effects.as_slice(),
            [BioEffect::Recovery, BioEffect::StableSignal]
        );

        let mut tracker = AmplitudeTracker::new(0);
        tracker.record(40.0, 60);
        tracker.record(80.0, 120);
        let report = tracker.record(80.0, 31 * 60);
        assert_eq!(
            report.bio_effects.as_slice(),
            [
                BioEffect::ModerateStimulation,
                BioEffect::HighVariability,
                BioEffect::ProlongedExposure { minutes: 31 }
            ]
        );
        assert_eq!(
            BioEffect::ProlongedExposure { minutes: 31 }.describe(),
            "Prolonged exposure: 31 min of elevated signal, take breaks"
        );
    }
}
