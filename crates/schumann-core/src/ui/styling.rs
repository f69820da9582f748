//! Color palette and blending helpers
//!
//! RGB565 has no alpha channel, so translucent strokes (grid lines, glow,
//! hover guides) are pre-blended against the background color.
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

// ============================================================================
// Base Colors
// ============================================================================

/// Chart background - very dark blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(10 >> 3, 14 >> 2, 26 >> 3);

/// Pure white
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Secondary text - light gray
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

// ============================================================================
// Series Colors
// ============================================================================

/// Solar wind series - #ff4444
pub const COLOR_WIND: Rgb565 = Rgb565::new(0xff >> 3, 0x44 >> 2, 0x44 >> 3);

/// Kp series - #ffaa00
pub const COLOR_KP: Rgb565 = Rgb565::new(0xff >> 3, 0xaa >> 2, 0x00 >> 3);

/// Resonance series - #00f0ff
pub const COLOR_SCHUMANN: Rgb565 = Rgb565::new(0x00 >> 3, 0xf0 >> 2, 0xff >> 3);

// ============================================================================
// Status Colors
// ============================================================================

/// Calm / low - #00ff88
pub const COLOR_CALM: Rgb565 = Rgb565::new(0x00 >> 3, 0xff >> 2, 0x88 >> 3);

/// Normal - #00f0ff
pub const COLOR_NORMAL: Rgb565 = COLOR_SCHUMANN;

/// Warning - #ffaa00
pub const COLOR_WARNING: Rgb565 = COLOR_KP;

/// Alert - #ff4444
pub const COLOR_ALERT: Rgb565 = COLOR_WIND;

/// Slowed resonance - #60a5fa
pub const COLOR_SLOWED: Rgb565 = Rgb565::new(0x60 >> 3, 0xa5 >> 2, 0xfa >> 3);

/// Balanced resonance - #a855f7
pub const COLOR_BALANCED: Rgb565 = Rgb565::new(0xa8 >> 3, 0x55 >> 2, 0xf7 >> 3);

/// Accelerated resonance - #f97316
pub const COLOR_ACCELERATED: Rgb565 = Rgb565::new(0xf9 >> 3, 0x73 >> 2, 0x16 >> 3);

/// Intense resonance - #dc2626
pub const COLOR_INTENSE: Rgb565 = Rgb565::new(0xdc >> 3, 0x26 >> 2, 0x26 >> 3);

/// Regeneration - #d4ff00
pub const COLOR_REGENERATION: Rgb565 = Rgb565::new(0xd4 >> 3, 0xff >> 2, 0x00 >> 3);

/// Stimulation - #ffeb3b
pub const COLOR_STIMULATION: Rgb565 = Rgb565::new(0xff >> 3, 0xeb >> 2, 0x3b >> 3);

/// Blend `foreground` over `background` with the given opacity (0.0-1.0)
pub fn blend(background: Rgb565, foreground: Rgb565, opacity: f32) -> Rgb565 {
    lerp_color(background, foreground, opacity)
}

/// Linear interpolation between two colors in 8-bit space
pub fn lerp_color(start: Rgb565, end: Rgb565, t: f32) -> Rgb565 {
    let t = t.clamp(0.0, 1.0);
    let (r0, g0, b0) = rgb565_to_rgb888(start);
    let (r1, g1, b1) = rgb565_to_rgb888(end);

    let r = r0 as f32 + (r1 as f32 - r0 as f32) * t;
    let g = g0 as f32 + (g1 as f32 - g0 as f32) * t;
    let b = b0 as f32 + (b1 as f32 - b0 as f32) * t;

    rgb888_to_rgb565((r + 0.5) as u8, (g + 0.5) as u8, (b + 0.5) as u8)
}

fn rgb565_to_rgb888(color: Rgb565) -> (u8, u8, u8) {
    let r5 = color.r();
    let g6 = color.g();
    let b5 = color.b();

    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);

    (r8, g8, b8)
}

fn rgb888_to_rgb565(r8: u8, g8: u8, b8: u8) -> Rgb565 {
    Rgb565::new(r8 >> 3, g8 >> 2, b8 >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(COLOR_BACKGROUND, WHITE, 0.0), COLOR_BACKGROUND);
        assert_eq!(blend(COLOR_BACKGROUND, WHITE, 1.0), WHITE);
        assert_eq!(blend(COLOR_BACKGROUND, COLOR_KP, 1.5), COLOR_KP);
    }

    #[test]
    fn test_blend_is_between() {
        let mid = blend(Rgb565::BLACK, WHITE, 0.5);
        assert!(mid.r() > 0 && mid.r() < Rgb565::MAX_R);
        assert!(mid.g() > 0 && mid.g() < Rgb565::MAX_G);
    }
}
