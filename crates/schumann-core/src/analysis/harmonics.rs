//! Resonance harmonics and frequency-band intensities

use crate::sample::Reading;

/// Base frequency of the first three resonance modes (Hz)
pub const HARMONIC_BASES_HZ: [f32; 3] = [7.83, 14.3, 20.8];

/// Upward shift per Kp unit for each mode (Hz)
const HARMONIC_SHIFT_PER_KP_HZ: [f32; 3] = [0.01, 0.02, 0.03];

/// Shift that fills a bar completely (Hz)
const MAX_EXPECTED_SHIFT_HZ: f32 = 0.2;

/// Smallest bar width so an empty bar stays visible (percent)
const MIN_BAR_PERCENT: f32 = 5.0;

/// Wind speed assumed when no reading is available (km/s)
const BAND_WIND_FALLBACK_KMS: f32 = 300.0;

fn bar_percent(value: f32) -> f32 {
    value.clamp(MIN_BAR_PERCENT, 100.0)
}

/// Harmonic frequencies raised by ionosphere compression under high Kp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicShift {
    /// First three mode frequencies (Hz)
    pub frequencies: [f32; 3],
    /// Mean of the three frequencies (Hz)
    pub average: f32,
}

impl HarmonicShift {
    /// Shift each mode by its per-Kp rate
    pub fn from_kp(kp: f32) -> Self {
        let mut frequencies = [0.0; 3];
        for (i, f) in frequencies.iter_mut().enumerate() {
            *f = HARMONIC_BASES_HZ[i] + kp * HARMONIC_SHIFT_PER_KP_HZ[i];
        }
        let average = frequencies.iter().sum::<f32>() / 3.0;

        Self {
            frequencies,
            average,
        }
    }

    /// Bar widths (percent) for each mode's shift from its base
    pub fn bar_percents(&self) -> [f32; 3] {
        let mut percents = [0.0; 3];
        for (i, p) in percents.iter_mut().enumerate() {
            let shift = self.frequencies[i] - HARMONIC_BASES_HZ[i];
            *p = bar_percent(shift / MAX_EXPECTED_SHIFT_HZ * 100.0);
        }
        percents
    }

    /// Bar width (percent) for the average, measured from the first base
    ///
    /// The average is always well above the fundamental, so this bar
    /// saturates at 100.
    pub fn average_bar_percent(&self) -> f32 {
        bar_percent((self.average - HARMONIC_BASES_HZ[0]) / MAX_EXPECTED_SHIFT_HZ * 100.0)
    }
}

/// Relative intensity of the alpha, beta and stress frequency bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandIntensity {
    /// Absolute intensities (0-100) for alpha, beta, stress
    pub values: [f32; 3],
    /// Whether the storm profile was used
    pub storm: bool,
}

impl BandIntensity {
    /// Sample intensities for the current conditions
    ///
    /// `unit` holds three caller-supplied values in `[0, 1)` that spread
    /// each band inside its range. Storm conditions (Kp >= 4 or wind above
    /// 500 km/s) raise stress and disturb alpha. An unavailable Kp counts
    /// as 0; an unavailable or zero wind counts as 300 km/s.
    pub fn sample(kp: Reading, wind: Reading, unit: [f32; 3]) -> Self {
        let kp = kp.or(0.0);
        let wind = wind.or_nonzero(BAND_WIND_FALLBACK_KMS);

        let storm = kp >= 4.0 || wind > 500.0;
        let values = if storm {
            [
                50.0 + unit[0] * 20.0,
                50.0 + unit[1] * 20.0,
                60.0 + unit[2] * 25.0,
            ]
        } else {
            [
                80.0 + unit[0] * 10.0,
                25.0 + unit[1] * 10.0,
                10.0 + unit[2] * 5.0,
            ]
        };

        Self { values, storm }
    }

    /// Bar widths (percent) clamped to `[5, 100]`
    pub fn bar_percents(&self) -> [f32; 3] {
        self.values.map(bar_percent)
    }

    /// Share of each band in the total (percent, sums to 100)
    pub fn proportions(&self) -> [f32; 3] {
        let total: f32 = self.values.iter().sum();
        if !(total > 0.0) {
            return [100.0 / 3.0; 3];
        }
        self.values.map(|v| v / total * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_harmonic_shift_from_kp() {
        let shift = HarmonicShift::from_kp(5.0);
        assert!(close(shift.frequencies[0], 7.88));
        assert!(close(shift.frequencies[1], 14.4));
        assert!(close(shift.frequencies[2], 20.95));
        assert!(close(shift.average, (7.88 + 14.4 + 20.95) / 3.0));
    }

    #[test]
    fn test_harmonic_bars_clamped() {
        let quiet = HarmonicShift::from_kp(0.0);
        assert_eq!(quiet.bar_percents(), [5.0, 5.0, 5.0]);

        let shift = HarmonicShift::from_kp(5.0);
        let bars = shift.bar_percents();
        assert!(close(bars[0], 25.0));
        assert!(close(bars[1], 50.0));
        assert!(close(bars[2], 75.0));

        let storm = HarmonicShift::from_kp(9.0);
        assert_eq!(storm.bar_percents()[2], 100.0);
        assert_eq!(storm.average_bar_percent(), 100.0);
    }

    #[test]
    fn test_band_profiles() {
        let calm = BandIntensity::sample(Reading::Value(2.0), Reading::Value(450.0), [0.0; 3]);
        assert!(!calm.storm);
        assert_eq!(calm.values, [80.0, 25.0, 10.0]);

        let windy = BandIntensity::sample(Reading::Value(2.0), Reading::Value(501.0), [0.5; 3]);
        assert!(windy.storm);
        assert_eq!(windy.values, [60.0, 60.0, 72.5]);

        let kp_storm = BandIntensity::sample(Reading::Value(4.0), Reading::Unavailable, [0.0; 3]);
        assert!(kp_storm.storm);
    }

    #[test]
    fn test_band_fallbacks_are_calm() {
        let bands = BandIntensity::sample(Reading::Unavailable, Reading::Unavailable, [0.0; 3]);
        assert!(!bands.storm);

        let zero_wind = BandIntensity::sample(Reading::Value(1.0), Reading::Value(0.0), [0.0; 3]);
        assert!(!zero_wind.storm);
    }

    #[test]
    fn test_band_proportions_sum_to_hundred() {
        let bands = BandIntensity::sample(Reading::Value(6.0), Reading::Value(700.0), [0.3, 0.9, 0.1]);
        let sum: f32 = bands.proportions().iter().sum();
        assert!(close(sum, 100.0));
        assert_eq!(bands.bar_percents(), bands.values);
    }
}
