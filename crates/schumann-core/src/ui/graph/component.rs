//! Correlation chart component
//!
//! [`CorrelationGraph`] owns the drawing surface geometry and renders a
//! [`SeriesBuffer`] in layers: clear, hover guide, grid, time axis, then the
//! wind, Kp and resonance series. It holds no sample data of its own, so a
//! render is a pure function of the buffer and the highlight index.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use log::debug;

use crate::buffer::SeriesBuffer;
use crate::sample::Label;
use crate::ui::styling::{COLOR_BACKGROUND, LIGHT_GRAY, WHITE, blend};

use super::axis::{AxisColors, draw_time_axis};
use super::constants::{
    AXIS_LABEL_OPACITY, AXIS_TICK_OPACITY, FALLBACK_SURFACE_HEIGHT_PX, FALLBACK_SURFACE_WIDTH_PX,
    GRID_OPACITY, HOVER_GUIDE_OPACITY, TOOLTIP_FILL_OPACITY, TOOLTIP_LINE_HEIGHT_PX,
    TOOLTIP_PADDING_PX, TOOLTIP_TOP_PX, TOOLTIP_WIDTH_PX,
};
use super::geometry::{PlotArea, tooltip_left};
use super::grid::{draw_grid, draw_hover_guide};
use super::series::{SeriesDomains, SeriesKind, SeriesStyle, draw_series, series_points};

/// Values shown while the pointer hovers a sample
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Hovered sample index (0 = oldest)
    pub index: usize,
    /// Sample timestamp, `"--:--"` when missing
    pub label: Label,
    /// Solar wind speed (km/s)
    pub wind: f32,
    /// Kp index
    pub kp: f32,
    /// Resonance frequency (Hz)
    pub schumann: f32,
    /// Suggested left edge relative to the surface, kept inside it
    pub left: f32,
}

impl Tooltip {
    /// Draw the tooltip box inside `surface`
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        surface: Rectangle,
        background: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let line_count = 4;
        let size = Size::new(
            TOOLTIP_WIDTH_PX as u32,
            (TOOLTIP_PADDING_PX * 2 + TOOLTIP_LINE_HEIGHT_PX * line_count) as u32,
        );
        let top_left = surface.top_left + Point::new(self.left as i32, TOOLTIP_TOP_PX);

        let box_style = PrimitiveStyleBuilder::new()
            .fill_color(blend(background, Rgb565::BLACK, TOOLTIP_FILL_OPACITY))
            .stroke_color(LIGHT_GRAY)
            .stroke_width(1)
            .build();
        Rectangle::new(top_left, size)
            .into_styled(box_style)
            .draw(display)?;

        let mut lines: [String<24>; 4] = Default::default();
        let _ = write!(lines[0], "Time: {}", self.label);
        let _ = write!(lines[1], "Wind: {:.0} km/s", self.wind);
        let _ = write!(lines[2], "Kp: {:.1}", self.kp);
        let _ = write!(lines[3], "Schumann: {:.2} Hz", self.schumann);

        let colors = [
            WHITE,
            SeriesKind::Wind.color(),
            SeriesKind::Kp.color(),
            SeriesKind::Schumann.color(),
        ];
        for (i, (line, color)) in lines.iter().zip(colors).enumerate() {
            let baseline = top_left
                + Point::new(
                    TOOLTIP_PADDING_PX,
                    TOOLTIP_PADDING_PX + TOOLTIP_LINE_HEIGHT_PX * i as i32 + 9,
                );
            Text::new(line, baseline, MonoTextStyle::new(&FONT_6X10, color)).draw(display)?;
        }

        Ok(())
    }
}

/// Three-series correlation chart
#[derive(Debug, Clone)]
pub struct CorrelationGraph {
    /// Drawing surface, `None` until attached
    surface: Option<Rectangle>,
    /// Normalization range per series
    domains: SeriesDomains,
    /// Background color
    background: Rgb565,
}

impl Default for CorrelationGraph {
    fn default() -> Self {
        Self::new(SeriesDomains::default())
    }
}

impl CorrelationGraph {
    /// Create a detached chart
    pub fn new(domains: SeriesDomains) -> Self {
        Self {
            surface: None,
            domains,
            background: COLOR_BACKGROUND,
        }
    }

    /// Set background color
    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background = color;
        self
    }

    /// Background color
    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Attach to a surface. A zero width or height falls back to 800x250.
    pub fn attach(&mut self, bounds: Rectangle) {
        let size = Size::new(
            if bounds.size.width == 0 {
                FALLBACK_SURFACE_WIDTH_PX
            } else {
                bounds.size.width
            },
            if bounds.size.height == 0 {
                FALLBACK_SURFACE_HEIGHT_PX
            } else {
                bounds.size.height
            },
        );

        debug!(
            "Chart surface {}x{} at ({}, {})",
            size.width, size.height, bounds.top_left.x, bounds.top_left.y
        );
        self.surface = Some(Rectangle::new(bounds.top_left, size));
    }

    /// Resize the surface, keeping its position
    ///
    /// Attaches at the origin if no surface was attached yet.
    pub fn resize(&mut self, size: Size) {
        let top_left = self
            .surface
            .map(|surface| surface.top_left)
            .unwrap_or_default();
        self.attach(Rectangle::new(top_left, size));
    }

    /// Drop the surface; rendering becomes a no-op
    pub fn detach(&mut self) {
        self.surface = None;
    }

    /// Current surface, if attached
    pub fn surface(&self) -> Option<Rectangle> {
        self.surface
    }

    /// Normalization ranges in use
    pub fn domains(&self) -> SeriesDomains {
        self.domains
    }

    fn plot_area(&self) -> Option<PlotArea> {
        self.surface.map(PlotArea::new)
    }

    /// Render the buffer, optionally highlighting one sample
    ///
    /// A highlight outside the buffer is ignored. Without a surface this
    /// draws nothing.
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &self,
        buffer: &SeriesBuffer,
        highlight: Option<usize>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let Some(area) = self.plot_area() else {
            return Ok(());
        };

        display.fill_solid(&area.bounds(), self.background)?;

        let count = buffer.len();
        if count == 0 {
            return Ok(());
        }

        let highlight = highlight.filter(|&index| index < count);

        if let Some(index) = highlight
            && count > 1
        {
            let guide_color = blend(self.background, WHITE, HOVER_GUIDE_OPACITY);
            draw_hover_guide(&area, area.x_for_index(index, count), guide_color, display)?;
        }

        draw_grid(&area, blend(self.background, WHITE, GRID_OPACITY), display)?;

        if count >= 2 {
            let colors = AxisColors {
                tick: blend(self.background, WHITE, AXIS_TICK_OPACITY),
                label: blend(self.background, WHITE, AXIS_LABEL_OPACITY),
            };
            draw_time_axis(&area, buffer, colors, display)?;
        }

        for kind in SeriesKind::DRAW_ORDER {
            let points = series_points(&area, buffer, kind, self.domains.get(kind));
            let style = SeriesStyle::for_kind(kind, self.background);
            draw_series(&area, &points, &style, highlight, display)?;
        }

        Ok(())
    }

    /// Index of the sample nearest to `pointer_x` (relative to the surface left edge)
    ///
    /// `None` when detached or the buffer is empty.
    pub fn hit_test(&self, buffer: &SeriesBuffer, pointer_x: f32) -> Option<usize> {
        self.plot_area()?.index_at(pointer_x, buffer.len())
    }

    /// Tooltip payload for a pointer position
    pub fn tooltip(&self, buffer: &SeriesBuffer, pointer_x: f32) -> Option<Tooltip> {
        let area = self.plot_area()?;
        let index = area.index_at(pointer_x, buffer.len())?;
        let sample = buffer.sample_at(index)?;

        let mut label = Label::new();
        let _ = label.push_str(sample.label_or_placeholder());

        Some(Tooltip {
            index,
            label,
            wind: sample.wind,
            kp: sample.kp,
            schumann: sample.schumann,
            left: tooltip_left(pointer_x, area.width()),
        })
    }
}
