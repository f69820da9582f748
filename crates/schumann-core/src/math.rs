//! Float helpers that avoid `std`-only intrinsics
//!
//! `f32::round`/`floor`/`sqrt` live in `std`, which this crate does not link.
//! The values rounded here are pixel coordinates and display figures, well
//! inside `i64` range.

/// Round half away from zero
pub fn round_half_away(value: f32) -> f32 {
    if value >= 0.0 {
        ((value + 0.5) as i64) as f32
    } else {
        -((((-value) + 0.5) as i64) as f32)
    }
}

/// Round to one decimal place
pub fn round_to_tenths(value: f32) -> f32 {
    round_half_away(value * 10.0) / 10.0
}

/// Round to two decimal places
pub fn round_to_hundredths(value: f32) -> f32 {
    round_half_away(value * 100.0) / 100.0
}

/// Clamp to `[0, 1]`, mapping NaN to 0
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Square root approximation using the Newton-Raphson method
///
/// Non-positive input returns 0.
pub fn sqrt_approx(x: f32) -> f32 {
    if !(x > 0.0) {
        return 0.0;
    }

    let mut guess = if x >= 1.0 { x / 2.0 } else { 1.0 };
    for _ in 0..20 {
        let next = (guess + x / guess) / 2.0;
        if (next - guess).abs() <= f32::EPSILON * next {
            return next;
        }
        guess = next;
    }

    guess
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away() {
        assert_eq!(round_half_away(2.5), 3.0);
        assert_eq!(round_half_away(2.49), 2.0);
        assert_eq!(round_half_away(-2.5), -3.0);
        assert_eq!(round_half_away(0.0), 0.0);
    }

    #[test]
    fn test_round_decimals() {
        assert_eq!(round_to_tenths(2.46), 2.5);
        assert_eq!(round_to_hundredths(7.834), 7.83);
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(f32::NAN), 0.0);
        assert_eq!(clamp01(f32::INFINITY), 1.0);
    }

    #[test]
    fn test_sqrt_approx() {
        for (x, expected) in [(4.0, 2.0), (2.0, 1.414_213_5), (0.25, 0.5), (225.0, 15.0)] {
            assert!((sqrt_approx(x) - expected).abs() < 1e-3, "sqrt({x})");
        }
        assert!((sqrt_approx(640_000.0) - 800.0).abs() < 0.1);
        assert_eq!(sqrt_approx(0.0), 0.0);
        assert_eq!(sqrt_approx(-9.0), 0.0);
    }
}
