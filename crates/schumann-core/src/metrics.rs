//! Threshold classifiers for space-weather readings
//!
//! Each classifier turns a raw number into a qualitative level with a
//! display label and color. Thresholds are the dashboard's fixed rules; a
//! value exactly on a boundary belongs to the higher level unless noted.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::math::round_half_away;
use crate::sample::Reading;
use crate::ui::styling::{
    COLOR_ACCELERATED, COLOR_ALERT, COLOR_BALANCED, COLOR_CALM, COLOR_INTENSE, COLOR_NORMAL,
    COLOR_REGENERATION, COLOR_SLOWED, COLOR_STIMULATION, COLOR_WARNING, WHITE,
};

/// Capacity of composed status strings
pub const STATUS_TEXT_CAPACITY: usize = 48;

/// Composed status text
pub type StatusText = String<STATUS_TEXT_CAPACITY>;

/// Geomagnetic activity level from the Kp index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpLevel {
    /// Kp < 3
    Calm,
    /// 3 <= Kp < 5
    Moderate,
    /// Kp >= 5
    Intense,
}

impl KpLevel {
    /// Classify a Kp index
    pub fn assess(kp: f32) -> Self {
        if kp < 3.0 {
            Self::Calm
        } else if kp < 5.0 {
            Self::Moderate
        } else {
            Self::Intense
        }
    }

    /// Get the display color for this level
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Calm => COLOR_CALM,
            Self::Moderate => COLOR_WARNING,
            Self::Intense => COLOR_ALERT,
        }
    }

    /// Get the display label for this level
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Moderate => "Moderate",
            Self::Intense => "Intense",
        }
    }
}

/// Solar wind speed level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindLevel {
    /// Below 400 km/s
    Low,
    /// 400 to 600 km/s
    Normal,
    /// 600 km/s and above
    High,
}

impl WindLevel {
    /// Classify a wind speed in km/s
    pub fn assess(wind: f32) -> Self {
        if wind < 400.0 {
            Self::Low
        } else if wind < 600.0 {
            Self::Normal
        } else {
            Self::High
        }
    }

    /// Get the display color for this level
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Low => COLOR_CALM,
            Self::Normal => COLOR_NORMAL,
            Self::High => COLOR_WARNING,
        }
    }

    /// Get the display label for this level
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        }
    }
}

/// Global lightning rate level (strikes per minute)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightningLevel {
    /// Below 80/min
    Low,
    /// 80 to 120/min
    Normal,
    /// 120/min and above
    Intense,
}

impl LightningLevel {
    /// Classify a lightning rate
    pub fn assess(strikes_per_min: f32) -> Self {
        if strikes_per_min < 80.0 {
            Self::Low
        } else if strikes_per_min < 120.0 {
            Self::Normal
        } else {
            Self::Intense
        }
    }

    /// Get the display color for this level
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Low => COLOR_CALM,
            Self::Normal => COLOR_WARNING,
            Self::Intense => COLOR_ALERT,
        }
    }

    /// Get the display label for this level
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::Intense => "Intense",
        }
    }
}

/// State of the fundamental resonance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResonanceState {
    /// Below 7.7 Hz
    Slowed,
    /// 7.7 to 8.0 Hz inclusive
    Balanced,
    /// Above 8.0 up to 8.5 Hz inclusive
    Accelerated,
    /// Above 8.5 Hz
    Intense,
}

impl ResonanceState {
    /// Classify a resonance frequency in Hz
    ///
    /// Upper bounds are inclusive here, unlike the other classifiers.
    pub fn assess(frequency: f32) -> Self {
        if frequency < 7.7 {
            Self::Slowed
        } else if frequency <= 8.0 {
            Self::Balanced
        } else if frequency <= 8.5 {
            Self::Accelerated
        } else {
            Self::Intense
        }
    }

    /// Get the display color for this state
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Slowed => COLOR_SLOWED,
            Self::Balanced => COLOR_BALANCED,
            Self::Accelerated => COLOR_ACCELERATED,
            Self::Intense => COLOR_INTENSE,
        }
    }

    /// Get the display label for this state
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slowed => "Slowed",
            Self::Balanced => "Balanced",
            Self::Accelerated => "Accelerated",
            Self::Intense => "Intense",
        }
    }
}

/// Headline activity status shown next to the Kp reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    /// Kp < 4 or unavailable
    Calm,
    /// 4 <= Kp < 5
    Active,
    /// Kp >= 5
    Storm,
}

impl ActivityStatus {
    /// Classify a Kp reading
    pub fn assess(kp: Reading) -> Self {
        match kp {
            Reading::Value(kp) if kp >= 5.0 => Self::Storm,
            Reading::Value(kp) if kp >= 4.0 => Self::Active,
            _ => Self::Calm,
        }
    }

    /// Get the display color for this status
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Calm => COLOR_CALM,
            Self::Active => COLOR_WARNING,
            Self::Storm => COLOR_ALERT,
        }
    }

    /// Get the display label for this status
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Active => "Active",
            Self::Storm => "Storm",
        }
    }

    /// `"Activity: <label>"` for live data, `"(Simulated)"` otherwise
    pub fn status_text(self, is_live: bool) -> StatusText {
        let mut text = StatusText::new();
        if is_live {
            let _ = write!(text, "Activity: {}", self.label());
        } else {
            let _ = text.push_str("(Simulated)");
        }
        text
    }
}

/// Expected biological impact of geomagnetic conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioImpact {
    /// Kp < 3
    Regeneration,
    /// 3 <= Kp < 5
    Stimulation,
    /// Kp >= 5
    Tension,
}

impl BioImpact {
    /// Wind speed above which " + Pressure" is appended to the detail
    pub const PRESSURE_WIND_KMS: f32 = 600.0;

    /// Classify a Kp index
    pub fn assess(kp: f32) -> Self {
        if kp < 3.0 {
            Self::Regeneration
        } else if kp < 5.0 {
            Self::Stimulation
        } else {
            Self::Tension
        }
    }

    /// Get the display color for this impact
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Regeneration => COLOR_REGENERATION,
            Self::Stimulation => COLOR_STIMULATION,
            Self::Tension => COLOR_ALERT,
        }
    }

    /// Get the display label for this impact
    pub const fn label(self) -> &'static str {
        match self {
            Self::Regeneration => "Regeneration",
            Self::Stimulation => "Stimulation",
            Self::Tension => "Tension",
        }
    }

    /// Detail line, with the solar wind pressure note when wind is strong
    pub fn detail(self, wind: f32) -> StatusText {
        let base = match self {
            Self::Regeneration => "Deep sleep, grounding",
            Self::Stimulation => "Creativity, vivid dreams",
            Self::Tension => "Fatigue, possible anxiety",
        };

        let mut text = StatusText::new();
        let _ = text.push_str(base);
        if wind > Self::PRESSURE_WIND_KMS {
            let _ = text.push_str(" + Pressure");
        }
        text
    }
}

/// Color tier for the displayed wind value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindTier {
    /// Below 500 km/s
    Normal,
    /// 500 to 700 km/s
    Elevated,
    /// 700 km/s and above
    Severe,
}

impl WindTier {
    /// Classify a wind speed in km/s
    pub fn assess(wind: f32) -> Self {
        if wind >= 700.0 {
            Self::Severe
        } else if wind >= 500.0 {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    /// Get the display color for this tier
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Normal => WHITE,
            Self::Elevated => COLOR_WARNING,
            Self::Severe => COLOR_ALERT,
        }
    }
}

/// Forecast row level for a predicted Kp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastLevel {
    /// Kp < 4
    Quiet,
    /// 4 <= Kp < 5
    Unsettled,
    /// Kp >= 5
    Storm,
}

impl ForecastLevel {
    /// Classify a forecast Kp
    pub fn assess(kp: f32) -> Self {
        if kp >= 5.0 {
            Self::Storm
        } else if kp >= 4.0 {
            Self::Unsettled
        } else {
            Self::Quiet
        }
    }

    /// Get the display color for this level
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Quiet => COLOR_CALM,
            Self::Unsettled => COLOR_WARNING,
            Self::Storm => COLOR_ALERT,
        }
    }

    /// Get the display label for this level
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quiet => "Quiet",
            Self::Unsettled => "Unsettled",
            Self::Storm => "Storm",
        }
    }
}

/// Number of days in the Kp forecast
pub const FORECAST_DAYS: usize = 3;

/// Row captions, nearest day first
pub const FORECAST_ROW_LABELS: [&str; FORECAST_DAYS] = ["Today (max)", "Tomorrow", "Day +2"];

/// One day of the Kp forecast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    /// Predicted Kp
    pub kp: Reading,
    /// Level of the predicted Kp, `None` when the feed had no value
    pub level: Option<ForecastLevel>,
}

impl ForecastRow {
    /// Classify one predicted Kp
    pub fn assess(kp: Reading) -> Self {
        Self {
            kp,
            level: kp.value().map(ForecastLevel::assess),
        }
    }

    /// Display color, white when unavailable
    pub fn color(&self) -> Rgb565 {
        self.level.map_or(WHITE, ForecastLevel::color)
    }
}

/// Freshness of the upstream satellite feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Newest data is less than an hour old
    Online,
    /// Newest data is an hour old or more
    Offline {
        /// Data age in whole minutes (rounded)
        delay_minutes: u32,
    },
}

impl LinkStatus {
    /// Data age at which the feed counts as offline
    pub const OFFLINE_AFTER_SECS: u64 = 3600;

    /// Classify by the age of the newest data point
    pub fn assess(delay_secs: u64) -> Self {
        if delay_secs < Self::OFFLINE_AFTER_SECS {
            Self::Online
        } else {
            let minutes = round_half_away(delay_secs as f32 / 60.0);
            Self::Offline {
                delay_minutes: minutes as u32,
            }
        }
    }

    /// Get the display color for this status
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Online => COLOR_CALM,
            Self::Offline { .. } => COLOR_ALERT,
        }
    }

    /// `"Online"` or `"Offline (<n>m)"`
    pub fn label(self) -> StatusText {
        let mut text = StatusText::new();
        match self {
            Self::Online => {
                let _ = text.push_str("Online");
            }
            Self::Offline { delay_minutes } => {
                let _ = write!(text, "Offline ({}m)", delay_minutes);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kp_level_boundaries() {
        assert_eq!(KpLevel::assess(2.99), KpLevel::Calm);
        assert_eq!(KpLevel::assess(3.0), KpLevel::Moderate);
        assert_eq!(KpLevel::assess(4.99), KpLevel::Moderate);
        assert_eq!(KpLevel::assess(5.0), KpLevel::Intense);
        assert_eq!(KpLevel::Intense.color(), COLOR_ALERT);
    }

    #[test]
    fn test_wind_and_lightning_levels() {
        assert_eq!(WindLevel::assess(399.0), WindLevel::Low);
        assert_eq!(WindLevel::assess(400.0), WindLevel::Normal);
        assert_eq!(WindLevel::assess(600.0), WindLevel::High);

        assert_eq!(LightningLevel::assess(79.0), LightningLevel::Low);
        assert_eq!(LightningLevel::assess(80.0), LightningLevel::Normal);
        assert_eq!(LightningLevel::assess(120.0), LightningLevel::Intense);
    }

    #[test]
    fn test_resonance_inclusive_upper_bounds() {
        assert_eq!(ResonanceState::assess(7.69), ResonanceState::Slowed);
        assert_eq!(ResonanceState::assess(7.7), ResonanceState::Balanced);
        assert_eq!(ResonanceState::assess(8.0), ResonanceState::Balanced);
        assert_eq!(ResonanceState::assess(8.01), ResonanceState::Accelerated);
        assert_eq!(ResonanceState::assess(8.5), ResonanceState::Accelerated);
        assert_eq!(ResonanceState::assess(8.51), ResonanceState::Intense);
    }

    #[test]
    fn test_activity_status_text() {
        assert_eq!(ActivityStatus::assess(Reading::Value(5.4)), ActivityStatus::Storm);
        assert_eq!(ActivityStatus::assess(Reading::Value(4.0)), ActivityStatus::Active);
        assert_eq!(ActivityStatus::assess(Reading::Unavailable), ActivityStatus::Calm);

        assert_eq!(
            ActivityStatus::Active.status_text(true).as_str(),
            "Activity: Active"
        );
        assert_eq!(
            ActivityStatus::Storm.status_text(false).as_str(),
            "(Simulated)"
        );
    }

    #[test]
    fn test_bio_impact_pressure_note() {
        let impact = BioImpact::assess(5.2);
        assert_eq!(impact, BioImpact::Tension);
        assert_eq!(impact.detail(600.0).as_str(), "Fatigue, possible anxiety");
        assert_eq!(
            impact.detail(601.0).as_str(),
            "Fatigue, possible anxiety + Pressure"
        );
        assert_eq!(BioImpact::assess(1.0).color(), COLOR_REGENERATION);
    }

    #[test]
    fn test_wind_tier_and_forecast() {
        assert_eq!(WindTier::assess(499.0), WindTier::Normal);
        assert_eq!(WindTier::assess(500.0), WindTier::Elevated);
        assert_eq!(WindTier::assess(700.0), WindTier::Severe);

        assert_eq!(ForecastLevel::assess(3.67), ForecastLevel::Quiet);
        assert_eq!(ForecastLevel::assess(4.0), ForecastLevel::Unsettled);
        assert_eq!(ForecastLevel::assess(5.0), ForecastLevel::Storm);
    }

    #[test]
    fn test_forecast_rows() {
        let rows = [Reading::Value(5.33), Reading::Value(4.0), Reading::Unavailable]
            .map(ForecastRow::assess);

        assert_eq!(rows[0].level, Some(ForecastLevel::Storm));
        assert_eq!(rows[1].level, Some(ForecastLevel::Unsettled));
        assert_eq!(rows[2].level, None);
        assert_eq!(rows[2].color(), WHITE);
        assert_eq!(rows[0].color(), COLOR_ALERT);
    }

    #[test]
    fn test_link_status() {
        assert_eq!(LinkStatus::assess(3599), LinkStatus::Online);
        assert_eq!(LinkStatus::Online.label().as_str(), "Online");

        let offline = LinkStatus::assess(3600 + 90);
        assert_eq!(offline, LinkStatus::Offline { delay_minutes: 62 });
        assert_eq!(offline.label().as_str(), "Offline (62m)");
    }
}
