//! Correlation chart for embedded displays
//!
//! Renders the rolling [`SeriesBuffer`](crate::buffer::SeriesBuffer) as three
//! smoothed series (solar wind, Kp, resonance), each normalized against its
//! own fixed domain, over a faint grid and a five-label time axis. Pointer
//! positions map back to sample indices for hover lookup.
//!
//! # Examples
//!
//! ```ignore
//! use schumann_core::buffer::SeriesBuffer;
//! use schumann_core::ui::graph::CorrelationGraph;
//! use embedded_graphics::prelude::*;
//! use embedded_graphics::primitives::Rectangle;
//!
//! let mut graph = CorrelationGraph::default();
//! graph.attach(Rectangle::new(Point::zero(), Size::new(800, 250)));
//!
//! let buffer = SeriesBuffer::new();
//! graph.render(&buffer, None, &mut display)?;
//! let hovered = graph.hit_test(&buffer, 412.0);
//! ```

mod axis;
mod component;
pub mod constants;
pub mod geometry;
mod grid;
pub mod interpolation;
pub mod series;

pub use component::{CorrelationGraph, Tooltip};
pub use geometry::{AxisTick, PlotArea, index_at, map_y, tick_layout, tooltip_left, x_for_index};
pub use interpolation::{GradientFill, PlotPoint};
pub use series::{SeriesDomains, SeriesKind, SeriesStyle};
