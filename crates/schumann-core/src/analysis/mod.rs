//! Derived analysis of the latest readings
//!
//! Everything here is a pure function of the current Kp, wind, lightning
//! and resonance numbers, except the amplitude trend which needs the
//! [`AmplitudeTracker`] history.

mod amplitude;
mod conclusion;
mod harmonics;

pub use amplitude::{
    AmplitudeReport, AmplitudeTracker, BioEffect, Comparison, GLOBAL_AVERAGE_AMPLITUDE,
    SESSION_CAPACITY, SessionStats, TREND_WINDOW, Trend, amplitude_index, recommendation,
};
pub use conclusion::{ConditionLevel, GlobalConclusion};
pub use harmonics::{BandIntensity, HARMONIC_BASES_HZ, HarmonicShift};

use log::info;

use crate::metrics::{KpLevel, LightningLevel, ResonanceState, WindLevel};
use crate::sample::Reading;

/// Wind speed assumed by the analysis when none is available (km/s)
pub const ANALYSIS_WIND_FALLBACK_KMS: f32 = 400.0;

/// Lightning rate assumed before the first count arrives (strikes/min)
pub const ANALYSIS_LIGHTNING_FALLBACK: u32 = 100;

/// The four numbers every analysis rule works from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisInputs {
    /// Kp index
    pub kp: f32,
    /// Solar wind speed (km/s)
    pub wind: f32,
    /// Global lightning rate (strikes/min)
    pub lightning: u32,
    /// Resonance frequency (Hz)
    pub schumann: f32,
}

impl AnalysisInputs {
    /// Apply the analysis defaults to possibly missing readings
    ///
    /// A missing or zero wind becomes 400 km/s and a missing or zero
    /// lightning count becomes 100/min. A missing Kp counts as 0.
    pub fn resolve(kp: Reading, wind: Reading, lightning: Option<u32>, schumann: f32) -> Self {
        let lightning = match lightning {
            Some(count) if count > 0 => count,
            _ => ANALYSIS_LIGHTNING_FALLBACK,
        };

        Self {
            kp: kp.or(0.0),
            wind: wind.or_nonzero(ANALYSIS_WIND_FALLBACK_KMS),
            lightning,
            schumann,
        }
    }
}

/// Full analysis panel for one set of inputs
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAnalysis {
    /// Inputs after defaults
    pub inputs: AnalysisInputs,
    /// Kp classification
    pub kp_level: KpLevel,
    /// Wind classification
    pub wind_level: WindLevel,
    /// Lightning classification
    pub lightning_level: LightningLevel,
    /// Resonance classification
    pub resonance: ResonanceState,
    /// Harmonic frequencies under the current Kp
    pub harmonics: HarmonicShift,
    /// Amplitude index with trend and session statistics
    pub amplitude: AmplitudeReport,
    /// Overall verdict
    pub conclusion: GlobalConclusion,
}

impl GlobalAnalysis {
    /// Run every rule and record the new amplitude in `tracker`
    pub fn run(inputs: AnalysisInputs, tracker: &mut AmplitudeTracker, now_secs: u64) -> Self {
        let amplitude = amplitude_index(inputs.kp, inputs.lightning as f32);
        let report = tracker.record(amplitude, now_secs);
        let conclusion = GlobalConclusion::from_inputs(&inputs);

        info!(
            "Analysis: kp={:.1} wind={:.0} lightning={} schumann={:.2} amplitude={:.0} ({}) -> {}",
            inputs.kp,
            inputs.wind,
            inputs.lightning,
            inputs.schumann,
            amplitude,
            report.trend.label(),
            conclusion.level.badge()
        );

        Self {
            inputs,
            kp_level: KpLevel::assess(inputs.kp),
            wind_level: WindLevel::assess(inputs.wind),
            lightning_level: LightningLevel::assess(inputs.lightning as f32),
            resonance: ResonanceState::assess(inputs.schumann),
            harmonics: HarmonicShift::from_kp(inputs.kp),
            amplitude: report,
            conclusion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let inputs = AnalysisInputs::resolve(Reading::Unavailable, Reading::Unavailable, None, 7.83);
        assert_eq!(inputs.kp, 0.0);
        assert_eq!(inputs.wind, 400.0);
        assert_eq!(inputs.lightning, 100);

        let inputs = AnalysisInputs::resolve(Reading::Value(2.0), Reading::Value(0.0), Some(0), 7.9);
        assert_eq!(inputs.wind, 400.0);
        assert_eq!(inputs.lightning, 100);

        let inputs =
            AnalysisInputs::resolve(Reading::Value(2.0), Reading::Value(512.0), Some(87), 7.9);
        assert_eq!(inputs.wind, 512.0);
        assert_eq!(inputs.lightning, 87);
    }

    #[test]
    fn test_run_fills_every_panel() {
        let mut tracker = AmplitudeTracker::new(0);
        let inputs = AnalysisInputs {
            kp: 5.4,
            wind: 620.0,
            lightning: 130,
            schumann: 8.12,
        };

        let analysis = GlobalAnalysis::run(inputs, &mut tracker, 60);

        assert_eq!(analysis.kp_level, KpLevel::Intense);
        assert_eq!(analysis.wind_level, WindLevel::High);
        assert_eq!(analysis.lightning_level, LightningLevel::Intense);
        assert_eq!(analysis.resonance, ResonanceState::Accelerated);
        assert_eq!(analysis.conclusion.level, ConditionLevel::Intense);
        // 5.4/9*60 + 130/200*40 = 36 + 26
        assert!((analysis.amplitude.value - 62.0).abs() < 1e-3);
        assert_eq!(tracker.len(), 1);
    }
}
