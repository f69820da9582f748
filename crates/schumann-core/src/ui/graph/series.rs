//! The three correlation series and their rendering
//!
//! Each series is normalized against its own fixed domain, so wind speed,
//! Kp and resonance share one plot without sharing a scale.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder};

extern crate alloc;
use alloc::vec::Vec;

use crate::buffer::SeriesBuffer;
use crate::config::{KP_DOMAIN, MonitorConfig, SCHUMANN_DOMAIN, SeriesDomain, WIND_DOMAIN};
use crate::sample::Sample;
use crate::ui::styling::{COLOR_KP, COLOR_SCHUMANN, COLOR_WIND, WHITE, blend};

use super::constants::{
    HIGHLIGHT_MARKER_RADIUS_PX, HIGHLIGHT_MARKER_STROKE_PX, MARKER_RADIUS_PX, SERIES_GLOW_OPACITY,
    SERIES_GLOW_WIDTH_PX, SERIES_LINE_WIDTH_PX,
};
use super::geometry::PlotArea;
use super::interpolation::{PlotPoint, draw_polyline, smooth_polyline};

/// Which value of a [`Sample`] a series plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Solar wind speed (km/s)
    Wind,
    /// Planetary Kp index
    Kp,
    /// Resonance frequency (Hz)
    Schumann,
}

impl SeriesKind {
    /// All series in draw order (later series paint over earlier ones)
    pub const DRAW_ORDER: [SeriesKind; 3] = [Self::Wind, Self::Kp, Self::Schumann];

    /// The plotted value of a sample
    pub fn value(self, sample: &Sample) -> f32 {
        match self {
            Self::Wind => sample.wind,
            Self::Kp => sample.kp,
            Self::Schumann => sample.schumann,
        }
    }

    /// Series color
    pub fn color(self) -> Rgb565 {
        match self {
            Self::Wind => COLOR_WIND,
            Self::Kp => COLOR_KP,
            Self::Schumann => COLOR_SCHUMANN,
        }
    }

    /// Short legend name
    pub fn name(self) -> &'static str {
        match self {
            Self::Wind => "Solar wind",
            Self::Kp => "Kp index",
            Self::Schumann => "Schumann",
        }
    }
}

/// Normalization ranges for the three series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesDomains {
    /// Wind range (km/s)
    pub wind: SeriesDomain,
    /// Kp range
    pub kp: SeriesDomain,
    /// Resonance range (Hz)
    pub schumann: SeriesDomain,
}

impl SeriesDomains {
    /// Domains configured for a monitor
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            wind: config.wind_domain,
            kp: config.kp_domain,
            schumann: config.schumann_domain,
        }
    }

    /// Domain of one series
    pub fn get(&self, kind: SeriesKind) -> SeriesDomain {
        match kind {
            SeriesKind::Wind => self.wind,
            SeriesKind::Kp => self.kp,
            SeriesKind::Schumann => self.schumann,
        }
    }
}

impl Default for SeriesDomains {
    fn default() -> Self {
        Self {
            wind: WIND_DOMAIN,
            kp: KP_DOMAIN,
            schumann: SCHUMANN_DOMAIN,
        }
    }
}

/// Visual style for a series
#[derive(Debug, Clone, Copy)]
pub struct SeriesStyle {
    /// Line color
    pub color: Rgb565,
    /// Line width in pixels
    pub line_width: u32,
    /// Width of the glow stroke drawn under the line
    pub glow_width: u32,
    /// Glow color, already blended against the background
    pub glow_color: Rgb565,
}

impl SeriesStyle {
    /// Default style for a series over `background`
    pub fn for_kind(kind: SeriesKind, background: Rgb565) -> Self {
        let color = kind.color();
        Self {
            color,
            line_width: SERIES_LINE_WIDTH_PX,
            glow_width: SERIES_GLOW_WIDTH_PX,
            glow_color: blend(background, color, SERIES_GLOW_OPACITY),
        }
    }
}

/// Local-coordinate points of one series, oldest first
pub(super) fn series_points(
    area: &PlotArea,
    buffer: &SeriesBuffer,
    kind: SeriesKind,
    domain: SeriesDomain,
) -> Vec<PlotPoint> {
    let count = buffer.len();
    buffer
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            PlotPoint::new(
                area.x_for_index(i, count),
                area.y_for_value(kind.value(sample), domain),
            )
        })
        .collect()
}

/// Draw one series: glow, smoothed line, then the marker
///
/// A single point is drawn as a flat line across the full width without a
/// marker. Otherwise the marker sits on `marker_index` (the highlighted
/// sample) or on the newest sample.
pub(super) fn draw_series<D: DrawTarget<Color = Rgb565>>(
    area: &PlotArea,
    points: &[PlotPoint],
    style: &SeriesStyle,
    highlight: Option<usize>,
    display: &mut D,
) -> Result<(), D::Error> {
    match points {
        [] => Ok(()),
        [only] => {
            let flat = [PlotPoint::new(0.0, only.y), PlotPoint::new(area.width(), only.y)];
            draw_polyline(area, &flat, style.glow_color, style.glow_width, display)?;
            draw_polyline(area, &flat, style.color, style.line_width, display)
        }
        _ => {
            let curve = smooth_polyline(points);
            draw_polyline(area, &curve, style.glow_color, style.glow_width, display)?;
            draw_polyline(area, &curve, style.color, style.line_width, display)?;

            let marker = highlight.and_then(|index| points.get(index).map(|p| (p, true)));
            let (point, highlighted) = match marker {
                Some(found) => found,
                None => match points.last() {
                    Some(last) => (last, false),
                    None => return Ok(()),
                },
            };

            draw_marker(area.to_screen(point.x, point.y), style, highlighted, display)
        }
    }
}

/// Draw the dot marking the newest or highlighted sample
fn draw_marker<D: DrawTarget<Color = Rgb565>>(
    center: Point,
    style: &SeriesStyle,
    highlighted: bool,
    display: &mut D,
) -> Result<(), D::Error> {
    if highlighted {
        let marker_style = PrimitiveStyleBuilder::new()
            .fill_color(WHITE)
            .stroke_color(style.color)
            .stroke_width(HIGHLIGHT_MARKER_STROKE_PX)
            .build();
        Circle::with_center(center, HIGHLIGHT_MARKER_RADIUS_PX * 2 + 1)
            .into_styled(marker_style)
            .draw(display)
    } else {
        Circle::with_center(center, MARKER_RADIUS_PX * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(style.color))
            .draw(display)
    }
}
