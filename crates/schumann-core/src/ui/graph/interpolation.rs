//! Curve rasterization for chart series
//!
//! Provides midpoint-control Bezier smoothing, plain polylines and a banded
//! gradient fill. All functions use embedded-graphics Line primitives for
//! drawing.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

extern crate alloc;
use alloc::vec::Vec;

use crate::ui::styling::lerp_color;

use super::constants::BEZIER_SUBDIVISIONS;
use super::geometry::PlotArea;

/// A point in surface-local float coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// Pixels from the surface left edge
    pub x: f32,
    /// Pixels from the surface top edge
    pub y: f32,
}

impl PlotPoint {
    /// Create a new plot point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Gradient fill configuration for the area under a series
#[derive(Debug, Clone, Copy)]
pub struct GradientFill {
    /// Color at the line
    pub start_color: Rgb565,
    /// Color at the bottom of the plot area
    pub end_color: Rgb565,
    /// Number of gradient bands to render
    pub bands: u8,
    /// Opacity over the background (255 = opaque)
    pub opacity: u8,
}

impl GradientFill {
    /// Create a new gradient fill
    pub const fn new(start_color: Rgb565, end_color: Rgb565, bands: u8, opacity: u8) -> Self {
        Self {
            start_color,
            end_color,
            bands,
            opacity,
        }
    }
}

/// Point on the cubic Bezier joining `p0` to `p1`
///
/// Both control points sit on the horizontal midpoint, the first at the
/// height of `p0` and the second at the height of `p1`, which gives the
/// flat-tangent "S" shape at every sample.
pub fn bezier_point(p0: PlotPoint, p1: PlotPoint, t: f32) -> PlotPoint {
    let mid_x = (p0.x + p1.x) / 2.0;
    let c0 = PlotPoint::new(mid_x, p0.y);
    let c1 = PlotPoint::new(mid_x, p1.y);

    let u = 1.0 - t;
    let b0 = u * u * u;
    let b1 = 3.0 * u * u * t;
    let b2 = 3.0 * u * t * t;
    let b3 = t * t * t;

    PlotPoint::new(
        b0 * p0.x + b1 * c0.x + b2 * c1.x + b3 * p1.x,
        b0 * p0.y + b1 * c0.y + b2 * c1.y + b3 * p1.y,
    )
}

/// Flatten the smoothed curve through `points` into a polyline
///
/// Every input point appears in the output, joined by
/// [`BEZIER_SUBDIVISIONS`] segments per pair.
pub fn smooth_polyline(points: &[PlotPoint]) -> Vec<PlotPoint> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(points.len() * BEZIER_SUBDIVISIONS + 1);
    out.push(*first);

    let step = 1.0 / BEZIER_SUBDIVISIONS as f32;
    for pair in points.windows(2) {
        for j in 1..BEZIER_SUBDIVISIONS {
            out.push(bezier_point(pair[0], pair[1], j as f32 * step));
        }
        // Land exactly on the sample instead of an accumulated t.
        out.push(pair[1]);
    }

    out
}

/// Stroke a polyline given in surface-local coordinates
pub(crate) fn draw_polyline<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    points: &[PlotPoint],
    color: Rgb565,
    width: u32,
    display: &mut D,
) -> Result<(), D::Error> {
    let line_style = PrimitiveStyle::with_stroke(color, width);

    let mut prev_screen: Option<Point> = None;
    for point in points {
        let screen_point = area.to_screen(point.x, point.y);
        if let Some(prev) = prev_screen
            && prev != screen_point
        {
            Line::new(prev, screen_point)
                .into_styled(line_style)
                .draw(display)?;
        }
        prev_screen = Some(screen_point);
    }

    Ok(())
}

/// Draw a gradient fill between a polyline and the bottom of the plot
pub(crate) fn draw_gradient_fill<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    points: &[PlotPoint],
    fill: &GradientFill,
    background: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    let mut screen_points: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        let screen_point = area.to_screen(point.x, point.y);
        if screen_points.last().copied() != Some(screen_point) {
            screen_points.push(screen_point);
        }
    }

    if screen_points.len() < 2 {
        return Ok(());
    }

    // Last pixel row of the plot
    let bottom = area.to_screen(0.0, area.plot_height()).y - 1;
    let colors = build_gradient_colors(fill, background);

    for pair in screen_points.windows(2) {
        let mut x0 = pair[0].x;
        let mut y0 = pair[0].y;
        let mut x1 = pair[1].x;
        let mut y1 = pair[1].y;

        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = (x1 - x0).max(1) as f32;
        for x in x0..=x1 {
            let t = (x - x0) as f32 / dx;
            let y_line = y0 + ((y1 - y0) as f32 * t) as i32;
            draw_gradient_column(x, y_line, bottom, &colors, display)?;
        }
    }

    Ok(())
}

fn draw_gradient_column<D: DrawTarget<Color = Rgb565>>(
    x: i32,
    y_line: i32,
    bottom: i32,
    colors: &[Rgb565],
    display: &mut D,
) -> Result<(), D::Error> {
    if y_line >= bottom {
        return Ok(());
    }

    let height = bottom - y_line;
    let bands = colors.len().max(1) as i32;
    let band_height = (height as f32 / bands as f32).max(1.0);

    for (index, color) in colors.iter().enumerate() {
        let start = y_line + (band_height * index as f32) as i32;
        let end = if index == colors.len() - 1 {
            bottom
        } else {
            y_line + (band_height * (index as f32 + 1.0)) as i32
        };

        if end >= start {
            Line::new(Point::new(x, start), Point::new(x, end))
                .into_styled(PrimitiveStyle::with_stroke(*color, 1))
                .draw(display)?;
        }
    }

    Ok(())
}

fn build_gradient_colors(fill: &GradientFill, background: Rgb565) -> Vec<Rgb565> {
    let bands = fill.bands.max(1) as usize;
    let alpha = fill.opacity as f32 / 255.0;
    let start_color = lerp_color(background, fill.start_color, alpha);
    let end_color = lerp_color(background, fill.end_color, alpha);

    let mut colors = Vec::with_capacity(bands);
    for i in 0..bands {
        let t = if bands > 1 {
            i as f32 / (bands - 1) as f32
        } else {
            1.0
        };
        colors.push(lerp_color(start_color, end_color, t));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_bezier_passes_through_endpoints() {
        let a = PlotPoint::new(0.0, 80.0);
        let b = PlotPoint::new(40.0, 20.0);

        assert_eq!(bezier_point(a, b, 0.0), a);
        assert_eq!(bezier_point(a, b, 1.0), b);

        // Symmetric control points put the curve's midpoint halfway
        let mid = bezier_point(a, b, 0.5);
        assert!((mid.x - 20.0).abs() < 1e-4);
        assert!((mid.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_bezier_stays_within_segment_height() {
        let a = PlotPoint::new(0.0, 10.0);
        let b = PlotPoint::new(30.0, 90.0);
        for j in 0..=16 {
            let p = bezier_point(a, b, j as f32 / 16.0);
            assert!(p.y >= 10.0 - 1e-4 && p.y <= 90.0 + 1e-4);
        }
    }

    #[test]
    fn test_smooth_polyline_keeps_samples() {
        let points = [
            PlotPoint::new(0.0, 5.0),
            PlotPoint::new(10.0, 15.0),
            PlotPoint::new(20.0, 5.0),
        ];
        let line = smooth_polyline(&points);

        assert_eq!(line.len(), 2 * BEZIER_SUBDIVISIONS + 1);
        assert_eq!(line[0], points[0]);
        assert_eq!(line[BEZIER_SUBDIVISIONS], points[1]);
        assert_eq!(line[line.len() - 1], points[2]);

        assert_eq!(smooth_polyline(&points[..1]), [points[0]]);
        assert!(smooth_polyline(&[]).is_empty());
    }

    #[test]
    fn test_gradient_fill_reaches_plot_bottom() {
        let area = PlotArea::new(Rectangle::new(Point::zero(), Size::new(20, 70)));
        let mut fb = FrameBuffer::new(Size::new(20, 70));
        let fill = GradientFill::new(Rgb565::GREEN, Rgb565::BLUE, 4, 255);
        let points = [PlotPoint::new(0.0, 10.0), PlotPoint::new(19.0, 10.0)];

        draw_gradient_fill(&area, &points, &fill, Rgb565::BLACK, &mut fb).unwrap();

        assert_eq!(fb.pixel(5, 10), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(5, 39), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(5, 9), Some(Rgb565::BLACK));
        // Axis band below the plot stays clear
        assert_eq!(fb.pixel(5, 40), Some(Rgb565::BLACK));
    }
}
