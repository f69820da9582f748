//! Rendering for the correlation monitor
//!
//! All drawing targets `embedded_graphics::DrawTarget<Color = Rgb565>`, so
//! the same code paints into the simulator window, an offscreen
//! [`FrameBuffer`](crate::framebuffer::FrameBuffer), or a real panel.

pub mod amplitude_chart;
pub mod graph;
pub mod styling;
