//! Hardware-independent core library for schumann-rs
//!
//! This crate contains all platform-agnostic logic for the correlation
//! monitor: the rolling sample buffer, the three-series correlation chart,
//! threshold-based status assessment, derived analysis, and configuration.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles for any
//! `embedded-graphics` draw target, from the desktop simulator to a panel
//! driven by a microcontroller.

#![no_std]

extern crate alloc;

pub mod acquisition;
pub mod analysis;
pub mod buffer;
pub mod config;
pub mod framebuffer;
pub mod math;
pub mod metrics;
pub mod monitor;
pub mod sample;
pub mod ui;
