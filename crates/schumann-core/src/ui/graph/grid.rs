//! Grid and hover-guide rendering
//!
//! Both are faint strokes pre-blended against the chart background. The
//! grid splits the plot height into four bands; the hover guide is a dashed
//! vertical line through the highlighted sample.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::math::sqrt_approx;

use super::constants::{GRID_BANDS, HOVER_GUIDE_DASH_PX, HOVER_GUIDE_GAP_PX};
use super::geometry::PlotArea;

/// Line style for grid rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    /// Solid continuous line
    Solid,
    /// Dashed line with specified dash and gap lengths
    Dashed {
        /// Length of each dash in pixels
        dash_length: u32,
        /// Length of gap between dashes in pixels
        gap_length: u32,
    },
}

/// Draw the horizontal grid lines at each inner band boundary
pub(super) fn draw_grid<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    let plot_height = area.plot_height();
    let band = plot_height / GRID_BANDS as f32;

    for i in 1..GRID_BANDS {
        let y = band * i as f32;
        let start = area.to_screen(0.0, y);
        let end = area.to_screen(area.width(), y);
        draw_line(start, end, color, 1, LineStyle::Solid, display)?;
    }

    Ok(())
}

/// Draw the dashed vertical guide through local x position `x`
pub(super) fn draw_hover_guide<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    x: f32,
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    let start = area.to_screen(x, 0.0);
    let end = area.to_screen(x, area.plot_height());

    draw_line(
        start,
        end,
        color,
        1,
        LineStyle::Dashed {
            dash_length: HOVER_GUIDE_DASH_PX,
            gap_length: HOVER_GUIDE_GAP_PX,
        },
        display,
    )
}

/// Draw a single line with specified style
fn draw_line<D: DrawTarget<Color = Rgb565>>(
    start: Point,
    end: Point,
    color: Rgb565,
    width: u32,
    style: LineStyle,
    display: &mut D,
) -> Result<(), D::Error> {
    match style {
        LineStyle::Solid => {
            Line::new(start, end)
                .into_styled(PrimitiveStyle::with_stroke(color, width))
                .draw(display)?;
        }
        LineStyle::Dashed {
            dash_length,
            gap_length,
        } => {
            draw_dashed_line(start, end, color, width, dash_length, gap_length, display)?;
        }
    }

    Ok(())
}

/// Draw a dashed line by rendering individual dash segments
///
/// Dash ends are exclusive so a 5/5 pattern lights exactly five pixels per
/// ten along the line.
fn draw_dashed_line<D: DrawTarget<Color = Rgb565>>(
    start: Point,
    end: Point,
    color: Rgb565,
    width: u32,
    dash_length: u32,
    gap_length: u32,
    display: &mut D,
) -> Result<(), D::Error> {
    let dx = (end.x - start.x) as f32;
    let dy = (end.y - start.y) as f32;
    let total_length = sqrt_approx(dx * dx + dy * dy);

    if total_length < 0.1 || dash_length == 0 {
        return Ok(());
    }

    let pattern_length = (dash_length + gap_length) as f32;
    let mut distance = 0.0;

    let line_style = PrimitiveStyle::with_stroke(color, width);

    while distance < total_length {
        let t_start = distance / total_length;
        let t_end = ((distance + dash_length as f32 - 1.0)
            .max(distance)
            .min(total_length))
            / total_length;

        let dash_start = Point::new(
            start.x + (dx * t_start) as i32,
            start.y + (dy * t_start) as i32,
        );

        let dash_end = Point::new(start.x + (dx * t_end) as i32, start.y + (dy * t_end) as i32);

        Line::new(dash_start, dash_end)
            .into_styled(line_style)
            .draw(display)?;

        distance += pattern_length;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use embedded_graphics::primitives::Rectangle;

    fn area() -> PlotArea {
        // 100 px of plot height above the 30 px axis band
        PlotArea::new(Rectangle::new(Point::zero(), Size::new(40, 130)))
    }

    #[test]
    fn test_grid_draws_three_lines() {
        let mut fb = FrameBuffer::new(Size::new(40, 130));
        draw_grid(&area(), Rgb565::WHITE, &mut fb).unwrap();

        for y in [25, 50, 75] {
            assert_eq!(fb.pixel(20, y), Some(Rgb565::WHITE), "y={y}");
        }
        assert_eq!(fb.pixel(20, 0), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(20, 100), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_hover_guide_is_dashed() {
        let mut fb = FrameBuffer::new(Size::new(40, 130));
        draw_hover_guide(&area(), 10.0, Rgb565::WHITE, &mut fb).unwrap();

        assert_eq!(fb.pixel(10, 0), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(10, 4), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(10, 7), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(10, 12), Some(Rgb565::WHITE));
        // Stops at the top of the axis band
        assert_eq!(fb.pixel(10, 110), Some(Rgb565::BLACK));
    }
}
