//! Time axis rendering
//!
//! Five ticks spread over the buffer, each labelled with the sample's
//! timestamp. The outer labels are pinned to the surface edges so they are
//! never clipped.

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Text};

use crate::buffer::SeriesBuffer;

use super::constants::{
    AXIS_LABEL_BASELINE_OFFSET_PX, AXIS_LABEL_EDGE_INSET_PX, AXIS_TICK_BOTTOM_OFFSET_PX,
    AXIS_TICK_TOP_OFFSET_PX,
};
use super::geometry::{PlotArea, tick_layout};

/// Colors used by the time axis
#[derive(Debug, Clone, Copy)]
pub struct AxisColors {
    /// Tick mark color
    pub tick: Rgb565,
    /// Label text color
    pub label: Rgb565,
}

/// Draw tick marks and time labels along the bottom band
///
/// Needs at least two samples; fewer draw nothing. A tick whose sample
/// has an empty label is skipped.
pub(super) fn draw_time_axis<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    buffer: &SeriesBuffer,
    colors: AxisColors,
    display: &mut D,
) -> Result<(), D::Error> {
    let width = area.width();
    let height = area.height();
    let tick_style = PrimitiveStyle::with_stroke(colors.tick, 1);
    let label_style = MonoTextStyle::new(&FONT_6X10, colors.label);

    let tick_top = height - AXIS_TICK_TOP_OFFSET_PX as f32;
    let tick_bottom = height - AXIS_TICK_BOTTOM_OFFSET_PX as f32;
    let baseline = height - AXIS_LABEL_BASELINE_OFFSET_PX as f32;
    let inset = AXIS_LABEL_EDGE_INSET_PX as f32;

    for tick in tick_layout(buffer.len(), width) {
        // Unlabelled samples get neither tick nor label
        let Some(sample) = buffer
            .sample_at(tick.index)
            .filter(|sample| !sample.label.is_empty())
        else {
            continue;
        };

        Line::new(
            area.to_screen(tick.x, tick_top),
            area.to_screen(tick.x, tick_bottom),
        )
        .into_styled(tick_style)
        .draw(display)?;

        let label_x = match tick.alignment {
            Alignment::Left => inset,
            Alignment::Right => width - inset,
            Alignment::Center => tick.x,
        };

        Text::with_alignment(
            sample.label.as_str(),
            area.to_screen(label_x, baseline),
            label_style,
            tick.alignment,
        )
        .draw(display)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::sample::{Sample, label};
    use embedded_graphics::primitives::Rectangle;

    const COLORS: AxisColors = AxisColors {
        tick: Rgb565::RED,
        label: Rgb565::WHITE,
    };

    fn buffer(count: usize) -> SeriesBuffer {
        let mut buffer = SeriesBuffer::new();
        for i in 0..count {
            let mut text = heapless::String::<8>::new();
            let _ = core::fmt::write(&mut text, format_args!("10:{:02}", i));
            buffer.append(Sample::new(label(&text), 400.0, 2.0, 7.83));
        }
        buffer
    }

    #[test]
    fn test_ticks_span_axis_band() {
        let area = PlotArea::new(Rectangle::new(Point::zero(), Size::new(200, 130)));
        let mut fb = FrameBuffer::new(Size::new(200, 130));
        draw_time_axis(&area, &buffer(5), COLORS, &mut fb).unwrap();

        // Middle tick at x = 100, from y = 105 to y = 115
        assert_eq!(fb.pixel(100, 105), Some(Rgb565::RED));
        assert_eq!(fb.pixel(100, 115), Some(Rgb565::RED));
        assert_eq!(fb.pixel(100, 104), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(100, 116), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_labels_drawn_inside_surface() {
        let area = PlotArea::new(Rectangle::new(Point::zero(), Size::new(200, 130)));
        let mut fb = FrameBuffer::new(Size::new(200, 130));
        draw_time_axis(&area, &buffer(5), COLORS, &mut fb).unwrap();

        let lit = |x_range: core::ops::Range<i32>| {
            x_range
                .flat_map(|x| (116..130).map(move |y| (x, y)))
                .any(|(x, y)| fb.pixel(x, y) == Some(Rgb565::WHITE))
        };

        // Left label starts at the inset, right label ends at the inset
        assert!(lit(5..35));
        assert!(lit(165..195));
        assert!(!lit(0..5));
        assert!(!lit(196..200));
    }

    #[test]
    fn test_empty_label_skips_tick() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..5 {
            let text = if i == 2 { "" } else { "10:00" };
            buffer.append(Sample::new(label(text), 400.0, 2.0, 7.83));
        }

        let area = PlotArea::new(Rectangle::new(Point::zero(), Size::new(200, 130)));
        let mut fb = FrameBuffer::new(Size::new(200, 130));
        draw_time_axis(&area, &buffer, COLORS, &mut fb).unwrap();

        // Middle tick belongs to the unlabelled sample
        assert_eq!(fb.pixel(100, 110), Some(Rgb565::BLACK));
        let middle_label = (85..115)
            .flat_map(|x| (116..130).map(move |y| (x, y)))
            .any(|(x, y)| fb.pixel(x, y) == Some(Rgb565::WHITE));
        assert!(!middle_label);
        // Neighbours still drawn
        assert_eq!(fb.pixel(50, 110), Some(Rgb565::RED));
    }

    #[test]
    fn test_single_sample_has_no_axis() {
        let area = PlotArea::new(Rectangle::new(Point::zero(), Size::new(200, 130)));
        let mut fb = FrameBuffer::new(Size::new(200, 130));
        draw_time_axis(&area, &buffer(1), COLORS, &mut fb).unwrap();
        assert!(fb.dirty_area().is_none());
    }
}
