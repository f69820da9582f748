//! Overall verdict combining all four readings

extern crate alloc;
use alloc::format;
use alloc::string::String;

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::styling::{COLOR_ALERT, COLOR_CALM, COLOR_WARNING};

use super::AnalysisInputs;

/// Overall electromagnetic conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionLevel {
    /// Nothing elevated
    Calm,
    /// Kp >= 3, wind >= 500 km/s or lightning >= 110/min
    Active,
    /// Kp >= 5
    Intense,
}

impl ConditionLevel {
    /// Classify the combined readings; only Kp can make conditions intense
    pub fn assess(inputs: &AnalysisInputs) -> Self {
        if inputs.kp >= 5.0 {
            Self::Intense
        } else if inputs.kp >= 3.0 || inputs.wind >= 500.0 || inputs.lightning >= 110 {
            Self::Active
        } else {
            Self::Calm
        }
    }

    /// Badge text
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Calm => "CALM CONDITIONS",
            Self::Active => "ACTIVE CONDITIONS",
            Self::Intense => "INTENSE CONDITIONS",
        }
    }

    /// Badge color
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Calm => COLOR_CALM,
            Self::Active => COLOR_WARNING,
            Self::Intense => COLOR_ALERT,
        }
    }

    /// Advice list for this level
    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Calm => &[
                "Ideal period for meditation and deep relaxation",
                "Supports cell regeneration and restorative sleep",
                "Good for creativity and calm intellectual work",
                "Good time for heart-coherence breathing",
            ],
            Self::Active => &[
                "Pay attention to physical and emotional sensations",
                "Favor creative and dynamic activities",
                "Stay hydrated and take regular breaks",
                "Some people may feel tired or restless",
                "Try grounding exercises (barefoot walks, nature)",
            ],
            Self::Intense => &[
                "Sensitive period for electro-sensitive people",
                "Avoid major decisions and conflict-prone discussions",
                "Rest more; sleep may be disturbed",
                "Practice relaxation (breathing, gentle yoga)",
                "Limit screen time and exposure to electromagnetic fields",
                "Spend time in nature to recenter",
            ],
        }
    }
}

/// Verdict with a templated summary paragraph
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalConclusion {
    /// Overall level
    pub level: ConditionLevel,
    /// Summary paragraph quoting the four readings
    pub summary: String,
}

impl GlobalConclusion {
    /// Classify and describe the readings
    pub fn from_inputs(inputs: &AnalysisInputs) -> Self {
        let level = ConditionLevel::assess(inputs);
        let AnalysisInputs {
            kp,
            wind,
            lightning,
            schumann,
        } = *inputs;

        let summary = match level {
            ConditionLevel::Calm => format!(
                "Geomagnetic conditions are calm (Kp: {kp:.1}). \
                 The solar wind flows at a normal {wind:.0} km/s. \
                 Global storms produce {lightning} strikes per minute, \
                 driving the Schumann harmonics at {schumann:.2} Hz. \
                 Together these make an electromagnetic environment that supports well-being."
            ),
            ConditionLevel::Active => format!(
                "Geomagnetic conditions are active (Kp: {kp:.1}). \
                 The solar wind blows at {wind:.0} km/s, causing moderate disturbances. \
                 {lightning} strikes per minute strongly excite the Schumann harmonics ({schumann:.2} Hz). \
                 These conditions can stimulate some people and unsettle others."
            ),
            ConditionLevel::Intense => format!(
                "Geomagnetic storm in progress (Kp: {kp:.1}). \
                 The solar wind reaches {wind:.0} km/s, causing significant disturbances. \
                 Intense storm activity ({lightning} strikes/min) strongly excites the harmonics ({schumann:.2} Hz). \
                 These conditions can have marked effects on the nervous system and general well-being."
            ),
        };

        Self { level, summary }
    }

    /// Advice list for the verdict
    pub fn recommendations(&self) -> &'static [&'static str] {
        self.level.recommendations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(kp: f32, wind: f32, lightning: u32) -> AnalysisInputs {
        AnalysisInputs {
            kp,
            wind,
            lightning,
            schumann: 7.83,
        }
    }

    #[test]
    fn test_level_rules() {
        assert_eq!(ConditionLevel::assess(&inputs(2.9, 499.0, 109)), ConditionLevel::Calm);
        assert_eq!(ConditionLevel::assess(&inputs(3.0, 350.0, 50)), ConditionLevel::Active);
        assert_eq!(ConditionLevel::assess(&inputs(1.0, 500.0, 50)), ConditionLevel::Active);
        assert_eq!(ConditionLevel::assess(&inputs(1.0, 350.0, 110)), ConditionLevel::Active);
        // Extreme wind alone never makes conditions intense
        assert_eq!(ConditionLevel::assess(&inputs(4.9, 900.0, 300)), ConditionLevel::Active);
        assert_eq!(ConditionLevel::assess(&inputs(5.0, 300.0, 0)), ConditionLevel::Intense);
    }

    #[test]
    fn test_summary_quotes_readings() {
        let conclusion = GlobalConclusion::from_inputs(&inputs(5.4, 620.0, 130));
        assert_eq!(conclusion.level, ConditionLevel::Intense);
        assert!(conclusion.summary.contains("Kp: 5.4"));
        assert!(conclusion.summary.contains("620 km/s"));
        assert!(conclusion.summary.contains("130 strikes/min"));
        assert!(conclusion.summary.contains("7.83 Hz"));
        assert_eq!(conclusion.recommendations().len(), 6);
        assert_eq!(conclusion.level.badge(), "INTENSE CONDITIONS");
    }

    #[test]
    fn test_calm_has_four_recommendations() {
        let conclusion = GlobalConclusion::from_inputs(&inputs(1.3, 380.0, 90));
        assert_eq!(conclusion.level, ConditionLevel::Calm);
        assert_eq!(conclusion.recommendations().len(), 4);
        assert!(conclusion.summary.starts_with("Geomagnetic conditions are calm"));
    }
}
