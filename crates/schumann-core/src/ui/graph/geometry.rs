//! Coordinate mapping between samples and surface pixels
//!
//! Horizontal position is purely index based: sample `i` of `n` sits at
//! `i / (n - 1) * width`, oldest at the left edge and newest at the right.
//! Each series is normalized against its own fixed domain and placed inside
//! the middle 90% of the plot height. [`index_at`] is the exact inverse of
//! [`x_for_index`] so hovering a plotted point selects that point.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;
use heapless::Vec;

use crate::config::SeriesDomain;
use crate::math::{clamp01, round_half_away};

use super::constants::{
    AXIS_BAND_HEIGHT_PX, AXIS_TICK_COUNT, PLOT_VALUE_MARGIN, PLOT_VALUE_SPAN, TOOLTIP_OFFSET_PX,
    TOOLTIP_WIDTH_PX,
};

/// Vertical pixel position of `value` inside a plot of height `height`
///
/// `height - clamp01((value - min) / (max - min)) * height * 0.9 - height * 0.05`.
/// Values outside the domain are pinned to its edge. The result is finite
/// for any finite `height`, even with a degenerate domain.
pub fn map_y(value: f32, min: f32, max: f32, height: f32) -> f32 {
    let norm = clamp01((value - min) / (max - min));
    height - norm * height * PLOT_VALUE_SPAN - height * PLOT_VALUE_MARGIN
}

/// Horizontal pixel position of sample `index` out of `count`
///
/// A single sample sits at the left edge.
pub fn x_for_index(index: usize, count: usize, width: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    index as f32 / (count - 1) as f32 * width
}

/// Sample index nearest to `pointer_x`, clamped to the buffer
///
/// Returns `None` only for an empty buffer.
pub fn index_at(pointer_x: f32, count: usize, width: f32) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let last = count - 1;
    if last == 0 || !(width > 0.0) {
        return Some(0);
    }

    let raw = pointer_x / width * last as f32;
    if raw.is_nan() {
        return Some(0);
    }

    let clamped = raw.clamp(0.0, last as f32);
    Some((round_half_away(clamped) as usize).min(last))
}

/// One labelled tick on the time axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    /// Sample whose label is shown
    pub index: usize,
    /// Tick x position relative to the surface left edge
    pub x: f32,
    /// Horizontal alignment of the label text
    pub alignment: Alignment,
}

/// Evenly distributed axis ticks for `count` samples
///
/// Ticks sit at sample `floor((count - 1) * i / 4)` for `i` in `0..5`. The
/// first label is left aligned, the last right aligned, the rest centered.
/// Fewer than two samples produce no ticks.
pub fn tick_layout(count: usize, width: f32) -> Vec<AxisTick, AXIS_TICK_COUNT> {
    let mut ticks = Vec::new();
    if count < 2 {
        return ticks;
    }

    let steps = AXIS_TICK_COUNT - 1;
    for i in 0..AXIS_TICK_COUNT {
        let index = (count - 1) * i / steps;
        let alignment = if i == 0 {
            Alignment::Left
        } else if i == steps {
            Alignment::Right
        } else {
            Alignment::Center
        };

        let _ = ticks.push(AxisTick {
            index,
            x: x_for_index(index, count, width),
            alignment,
        });
    }

    ticks
}

/// Left offset for a hover tooltip so it stays inside the surface
///
/// Placed to the right of the pointer unless it would overflow, in which
/// case it flips to the left side.
pub fn tooltip_left(pointer_x: f32, width: f32) -> f32 {
    let right = pointer_x + TOOLTIP_OFFSET_PX;
    if right + TOOLTIP_WIDTH_PX > width {
        pointer_x - TOOLTIP_OFFSET_PX - TOOLTIP_WIDTH_PX
    } else {
        right
    }
}

/// Drawing surface split into the plot and the time-axis band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    bounds: Rectangle,
    axis_band: u32,
}

impl PlotArea {
    /// Wrap a surface rectangle, reserving the time-axis band at the bottom
    pub const fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            axis_band: AXIS_BAND_HEIGHT_PX,
        }
    }

    /// Wrap a surface rectangle that has no axis band
    pub const fn without_axis(bounds: Rectangle) -> Self {
        Self {
            bounds,
            axis_band: 0,
        }
    }

    /// Whole surface
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Surface width in pixels
    pub fn width(&self) -> f32 {
        self.bounds.size.width as f32
    }

    /// Surface height in pixels (plot plus axis band)
    pub fn height(&self) -> f32 {
        self.bounds.size.height as f32
    }

    /// Height available to the series (surface minus axis band)
    pub fn plot_height(&self) -> f32 {
        self.bounds.size.height.saturating_sub(self.axis_band) as f32
    }

    /// Local x of sample `index` out of `count`
    pub fn x_for_index(&self, index: usize, count: usize) -> f32 {
        x_for_index(index, count, self.width())
    }

    /// Local y of `value` normalized against `domain`
    pub fn y_for_value(&self, value: f32, domain: SeriesDomain) -> f32 {
        map_y(value, domain.min, domain.max, self.plot_height())
    }

    /// Sample nearest to a pointer given in local coordinates
    pub fn index_at(&self, pointer_x: f32, count: usize) -> Option<usize> {
        index_at(pointer_x, count, self.width())
    }

    /// Convert local float coordinates to a screen pixel
    pub fn to_screen(&self, x: f32, y: f32) -> Point {
        self.bounds.top_left + Point::new(round_half_away(x) as i32, round_half_away(y) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_y_uses_middle_ninety_percent() {
        let h = 200.0;
        assert_eq!(map_y(0.0, 0.0, 9.0, h), 190.0);
        assert_eq!(map_y(9.0, 0.0, 9.0, h), 10.0);
        assert_eq!(map_y(4.5, 0.0, 9.0, h), 100.0);
    }

    #[test]
    fn test_map_y_clamps_to_domain() {
        let h = 220.0;
        assert_eq!(map_y(200.0, 300.0, 800.0, h), map_y(300.0, 300.0, 800.0, h));
        assert_eq!(map_y(900.0, 300.0, 800.0, h), map_y(800.0, 300.0, 800.0, h));
    }

    #[test]
    fn test_map_y_degenerate_domain() {
        let y = map_y(5.0, 3.0, 3.0, 100.0);
        assert!(y.is_finite());
    }

    #[test]
    fn test_x_mapping_edges() {
        assert_eq!(x_for_index(0, 60, 590.0), 0.0);
        assert_eq!(x_for_index(59, 60, 590.0), 590.0);
        assert_eq!(x_for_index(0, 1, 590.0), 0.0);
    }

    #[test]
    fn test_hit_test_roundtrip() {
        for count in 2..=60 {
            for width in [97.0_f32, 320.0, 800.0, 1234.5] {
                for k in 0..count {
                    let x = x_for_index(k, count, width);
                    assert_eq!(index_at(x, count, width), Some(k), "n={count} w={width} k={k}");
                }
            }
        }
    }

    #[test]
    fn test_hit_test_clamps() {
        assert_eq!(index_at(-40.0, 10, 300.0), Some(0));
        assert_eq!(index_at(1e6, 10, 300.0), Some(9));
        assert_eq!(index_at(150.0, 1, 300.0), Some(0));
        assert_eq!(index_at(150.0, 0, 300.0), None);
        assert_eq!(index_at(150.0, 5, 0.0), Some(0));
    }

    #[test]
    fn test_hit_test_picks_nearest() {
        // 5 samples over 400 px sit at 0, 100, 200, 300, 400
        assert_eq!(index_at(149.0, 5, 400.0), Some(1));
        assert_eq!(index_at(151.0, 5, 400.0), Some(2));
    }

    #[test]
    fn test_tick_layout() {
        let ticks = tick_layout(60, 590.0);
        let indices: alloc::vec::Vec<usize> = ticks.iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 14, 29, 44, 59]);
        assert_eq!(ticks[0].alignment, Alignment::Left);
        assert_eq!(ticks[2].alignment, Alignment::Center);
        assert_eq!(ticks[4].alignment, Alignment::Right);
        assert_eq!(ticks[4].x, 590.0);

        let ticks = tick_layout(2, 100.0);
        let indices: alloc::vec::Vec<usize> = ticks.iter().map(|t| t.index).collect();
        assert_eq!(indices, [0, 0, 0, 0, 1]);

        assert!(tick_layout(1, 100.0).is_empty());
        assert!(tick_layout(0, 100.0).is_empty());
    }

    #[test]
    fn test_tooltip_flips_near_right_edge() {
        assert_eq!(tooltip_left(100.0, 800.0), 115.0);
        assert_eq!(tooltip_left(700.0, 800.0), 535.0);
    }

    #[test]
    fn test_plot_area_reserves_axis_band() {
        let area = PlotArea::new(Rectangle::new(Point::new(10, 20), Size::new(400, 230)));
        assert_eq!(area.plot_height(), 200.0);
        assert_eq!(area.to_screen(0.0, 0.0), Point::new(10, 20));
        assert_eq!(area.to_screen(399.6, 9.4), Point::new(410, 29));

        let bare = PlotArea::without_axis(area.bounds());
        assert_eq!(bare.plot_height(), 230.0);
    }
}
