//! Constants for correlation graph rendering
//!
//! All magic numbers are defined here with descriptive names and units.

/// Surface width used when the container reports zero width
pub const FALLBACK_SURFACE_WIDTH_PX: u32 = 800;

/// Surface height used when the container reports zero height
pub const FALLBACK_SURFACE_HEIGHT_PX: u32 = 250;

/// Height of the time-axis band below the plot
pub const AXIS_BAND_HEIGHT_PX: u32 = 30;

/// Fraction of the plot height used by the value range
pub const PLOT_VALUE_SPAN: f32 = 0.9;

/// Fraction of the plot height kept free above and below the value range
pub const PLOT_VALUE_MARGIN: f32 = 0.05;

/// Number of horizontal bands the grid divides the plot into
pub const GRID_BANDS: u32 = 4;

/// Grid line opacity over the background
pub const GRID_OPACITY: f32 = 0.05;

/// Number of time labels along the axis
pub const AXIS_TICK_COUNT: usize = 5;

/// Tick mark top, measured up from the surface bottom
pub const AXIS_TICK_TOP_OFFSET_PX: i32 = 25;

/// Tick mark bottom, measured up from the surface bottom
pub const AXIS_TICK_BOTTOM_OFFSET_PX: i32 = 15;

/// Label baseline, measured up from the surface bottom
pub const AXIS_LABEL_BASELINE_OFFSET_PX: i32 = 5;

/// Inset of the first and last labels from the surface edges
pub const AXIS_LABEL_EDGE_INSET_PX: i32 = 5;

/// Tick mark opacity over the background
pub const AXIS_TICK_OPACITY: f32 = 0.1;

/// Label text opacity over the background
pub const AXIS_LABEL_OPACITY: f32 = 0.4;

/// Line subdivisions used to rasterize one Bezier segment
pub const BEZIER_SUBDIVISIONS: usize = 8;

/// Series stroke width
pub const SERIES_LINE_WIDTH_PX: u32 = 2;

/// Glow stroke width drawn under each series
pub const SERIES_GLOW_WIDTH_PX: u32 = 6;

/// Glow opacity over the background
pub const SERIES_GLOW_OPACITY: f32 = 0.25;

/// Radius of the newest-sample marker
pub const MARKER_RADIUS_PX: u32 = 4;

/// Radius of the highlighted-sample marker
pub const HIGHLIGHT_MARKER_RADIUS_PX: u32 = 5;

/// Outline width of the highlighted-sample marker
pub const HIGHLIGHT_MARKER_STROKE_PX: u32 = 2;

/// Hover guide opacity over the background
pub const HOVER_GUIDE_OPACITY: f32 = 0.2;

/// Hover guide dash length
pub const HOVER_GUIDE_DASH_PX: u32 = 5;

/// Hover guide gap length
pub const HOVER_GUIDE_GAP_PX: u32 = 5;

/// Horizontal distance between the pointer and the tooltip
pub const TOOLTIP_OFFSET_PX: f32 = 15.0;

/// Assumed tooltip width for overflow checks
pub const TOOLTIP_WIDTH_PX: f32 = 150.0;

/// Tooltip top edge below the surface top
pub const TOOLTIP_TOP_PX: i32 = 10;

/// Inner padding of the tooltip box
pub const TOOLTIP_PADDING_PX: i32 = 6;

/// Line pitch of tooltip text
pub const TOOLTIP_LINE_HEIGHT_PX: i32 = 12;

/// Tooltip background opacity over the chart background
pub const TOOLTIP_FILL_OPACITY: f32 = 0.85;
