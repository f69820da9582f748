//! Session history chart for the resonance amplitude index
//!
//! A small linear chart: one faint midline, the history as a straight
//! polyline on a fixed 0-100 scale, and a gradient fading from the line
//! down to the background.

extern crate alloc;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::math::clamp01;
use crate::ui::graph::interpolation::{
    GradientFill, PlotPoint, draw_gradient_fill, draw_polyline,
};
use crate::ui::graph::{PlotArea, x_for_index};
use crate::ui::styling::{COLOR_BACKGROUND, COLOR_SCHUMANN, WHITE, blend};

/// Top of the amplitude scale
const AMPLITUDE_SCALE_MAX: f32 = 100.0;

const MIDLINE_OPACITY: f32 = 0.1;
const LINE_WIDTH_PX: u32 = 2;
const FILL_OPACITY: f32 = 0.3;
const FILL_BANDS: u8 = 8;

/// Amplitude history chart bound to a fixed rectangle
#[derive(Debug, Clone, Copy)]
pub struct AmplitudeChart {
    bounds: Rectangle,
    background: Rgb565,
}

impl AmplitudeChart {
    /// Create a chart covering `bounds`
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            background: COLOR_BACKGROUND,
        }
    }

    /// Chart rectangle
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Clear and draw `values` (oldest first, nominal 0-100)
    ///
    /// Fewer than two values leave the chart cleared.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        values: &[f32],
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, self.background)?;

        if values.len() < 2 {
            return Ok(());
        }

        let area = PlotArea::without_axis(self.bounds);
        let width = area.width();
        let height = area.height();

        let mid = height / 2.0;
        Line::new(area.to_screen(0.0, mid), area.to_screen(width, mid))
            .into_styled(PrimitiveStyle::with_stroke(
                blend(self.background, WHITE, MIDLINE_OPACITY),
                1,
            ))
            .draw(display)?;

        let count = values.len();
        let points: Vec<PlotPoint> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                PlotPoint::new(
                    x_for_index(i, count, width),
                    height - clamp01(value / AMPLITUDE_SCALE_MAX) * height,
                )
            })
            .collect();

        let fill = GradientFill::new(
            blend(self.background, COLOR_SCHUMANN, FILL_OPACITY),
            self.background,
            FILL_BANDS,
            u8::MAX,
        );
        draw_gradient_fill(&area, &points, &fill, self.background, display)?;
        draw_polyline(&area, &points, COLOR_SCHUMANN, LINE_WIDTH_PX, display)
    }
}
