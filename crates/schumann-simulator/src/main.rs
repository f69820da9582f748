//! Desktop simulator for the schumann-rs correlation monitor.
//!
//! Renders the dashboard in an SDL2 window via `embedded-graphics-simulator`.
//! Space-weather feeds are random walks behind the core `ReadingSource`
//! trait, so the fallback and simulated-data paths can be exercised offline.
//!
//! # Key bindings
//!
//! | Key | Action                                 |
//! |-----|----------------------------------------|
//! | R   | Refresh now                            |
//! | F   | Toggle feed outage (all sources fail)  |
//! | D   | Toggle stale solar-wind data           |
//! | S   | Toggle compact chart width             |
//! | Q   | Quit                                   |
//!
//! Moving the mouse over the chart shows the tooltip for the nearest sample.
//! Set `SCHUMANN_CONFIG` to a postcard-encoded `MonitorConfig` file to
//! override the defaults.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::mono_font::{
    MonoFont, MonoTextStyle,
    ascii::{FONT_6X10, FONT_8X13, FONT_9X15},
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};
use rand::Rng;

use schumann_core::acquisition::{
    ReadingSource, SourceError, SpaceWeatherReading, first_available,
};
use schumann_core::analysis::recommendation;
use schumann_core::config::MonitorConfig;
use schumann_core::framebuffer::FrameBuffer;
use schumann_core::metrics::{FORECAST_DAYS, FORECAST_ROW_LABELS, LinkStatus};
use schumann_core::monitor::{CorrelationMonitor, DashboardSnapshot, RefreshUpdate};
use schumann_core::sample::Reading;
use schumann_core::ui::amplitude_chart::AmplitudeChart;
use schumann_core::ui::graph::Tooltip;
use schumann_core::ui::styling::{COLOR_BACKGROUND, LIGHT_GRAY, WHITE, blend};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 800;
const DISPLAY_HEIGHT_PX: u32 = 480;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 1;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Environment variable naming an optional postcard config file.
const CONFIG_ENV: &str = "SCHUMANN_CONFIG";

const HEADER_HEIGHT_PX: i32 = 40;
const CHART_HEIGHT_PX: u32 = 250;
const COMPACT_CHART_WIDTH_PX: u32 = 560;

const CARDS_TOP_PX: i32 = 298;
const CARD_WIDTH_PX: i32 = 200;
const PANEL_TOP_PX: i32 = 350;
const ANALYSIS_WIDTH_PX: i32 = 480;
const AMPLITUDE_LEFT_PX: i32 = 500;
const AMPLITUDE_CHART_SIZE: Size = Size::new(290, 80);
const FORECAST_LEFT_PX: i32 = 300;

/// Publication lag of a fresh feed, in seconds.
const FRESH_LAG_SECS: std::ops::Range<u64> = 60..900;

/// Simulated time a stale feed ages per read, in seconds.
const STALE_AGING_SECS: u64 = 20 * 60;

// ---------------------------------------------------------------------------
// Mock feeds
// ---------------------------------------------------------------------------

/// A random-walk reading source that occasionally fails.
struct MockFeed {
    name: &'static str,
    value: f32,
    step: f32,
    min: f32,
    max: f32,
    failure_rate: f64,
    offline: bool,
    stale: bool,
    age_secs: u64,
}

impl MockFeed {
    fn new(name: &'static str, value: f32, step: f32, min: f32, max: f32) -> Self {
        Self {
            name,
            value,
            step,
            min,
            max,
            failure_rate: 0.0,
            offline: false,
            stale: false,
            age_secs: 0,
        }
    }

    fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate;
        self
    }
}

impl ReadingSource for MockFeed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&mut self) -> Result<f32, SourceError> {
        if self.offline {
            return Err(SourceError::Unreachable { name: self.name });
        }

        let mut rng = rand::rng();
        if rng.random_bool(self.failure_rate) {
            return Err(SourceError::Malformed { name: self.name });
        }

        // A stale feed keeps serving its last point while it ages
        if self.stale {
            self.age_secs += STALE_AGING_SECS;
            return Ok(self.value);
        }

        self.age_secs = rng.random_range(FRESH_LAG_SECS);
        self.value = (self.value + rng.random_range(-self.step..self.step)).clamp(self.min, self.max);
        Ok(self.value)
    }

    fn data_age_secs(&self) -> Option<u64> {
        Some(self.age_secs)
    }
}

/// Primary and backup feeds for each reading.
struct MockFeeds {
    kp_primary: MockFeed,
    kp_backup: MockFeed,
    wind_primary: MockFeed,
    wind_backup: MockFeed,
    forecast: [MockFeed; FORECAST_DAYS],
    lightning: u32,
}

impl MockFeeds {
    fn new() -> Self {
        Self {
            kp_primary: MockFeed::new("kp-1m", 2.3, 0.6, 0.0, 9.0).with_failure_rate(0.2),
            kp_backup: MockFeed::new("kp-3h", 2.3, 0.3, 0.0, 9.0),
            wind_primary: MockFeed::new("plasma-2h", 420.0, 35.0, 250.0, 850.0)
                .with_failure_rate(0.2),
            wind_backup: MockFeed::new("plasma-1d", 420.0, 15.0, 250.0, 850.0),
            forecast: [
                MockFeed::new("kp-forecast-d0", 3.0, 0.8, 0.0, 9.0).with_failure_rate(0.1),
                MockFeed::new("kp-forecast-d1", 2.7, 0.8, 0.0, 9.0).with_failure_rate(0.1),
                MockFeed::new("kp-forecast-d2", 2.3, 0.8, 0.0, 9.0).with_failure_rate(0.1),
            ],
            lightning: 95,
        }
    }

    fn set_offline(&mut self, offline: bool) {
        for feed in [
            &mut self.kp_primary,
            &mut self.kp_backup,
            &mut self.wind_primary,
            &mut self.wind_backup,
        ]
        .into_iter()
        .chain(self.forecast.iter_mut())
        {
            feed.offline = offline;
        }
    }

    fn set_stale(&mut self, stale: bool) {
        self.wind_primary.stale = stale;
        self.wind_backup.stale = stale;
    }

    fn acquire_forecast(&mut self) -> [Reading; FORECAST_DAYS] {
        let mut forecast = [Reading::Unavailable; FORECAST_DAYS];
        for (day, feed) in forecast.iter_mut().zip(self.forecast.iter_mut()) {
            *day = first_available(&mut [feed]);
        }
        forecast
    }

    fn acquire(&mut self) -> SpaceWeatherReading {
        SpaceWeatherReading::acquire(
            &mut [&mut self.kp_primary, &mut self.kp_backup],
            &mut [&mut self.wind_primary, &mut self.wind_backup],
        )
    }

    fn next_lightning(&mut self) -> u32 {
        let delta = rand::rng().random_range(-8..=8);
        self.lightning = (self.lightning as i32 + delta).clamp(40, 180) as u32;
        self.lightning
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Acquire readings and build the refresh inputs.
fn next_update(feeds: &mut MockFeeds) -> RefreshUpdate {
    let mut rng = rand::rng();
    let reading = feeds.acquire().resolve(rng.random());
    let forecast = feeds.acquire_forecast();

    RefreshUpdate {
        reading,
        forecast,
        jitter: rng.random_range(-0.02..0.02),
        band_unit: [rng.random(), rng.random(), rng.random()],
        now_secs: now_secs(),
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn load_config() -> MonitorConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return MonitorConfig::default();
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Could not read {}: {}, using defaults", path, e);
            return MonitorConfig::default();
        }
    };

    match MonitorConfig::from_bytes(&bytes) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring {}: {}", path, e);
            MonitorConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

fn chart_bounds(compact: bool) -> Rectangle {
    let width = if compact {
        COMPACT_CHART_WIDTH_PX
    } else {
        DISPLAY_WIDTH_PX
    };
    Rectangle::new(
        Point::new(0, HEADER_HEIGHT_PX),
        Size::new(width, CHART_HEIGHT_PX),
    )
}

fn draw_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb565,
) -> Result<(), D::Error> {
    Text::with_baseline(text, position, MonoTextStyle::new(font, color), Baseline::Top)
        .draw(display)?;
    Ok(())
}

/// Greedy word wrap to at most `max_chars` per line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn format_reading(reading: Reading, decimals: usize) -> String {
    match reading {
        Reading::Value(v) => format!("{v:.decimals$}"),
        Reading::Unavailable => "--".to_string(),
    }
}

fn draw_header<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    snapshot: Option<&DashboardSnapshot>,
    link: Option<LinkStatus>,
) -> Result<(), D::Error> {
    draw_text(
        display,
        "Schumann Correlation Monitor",
        Point::new(10, 12),
        &FONT_9X15,
        WHITE,
    )?;

    if let Some(snapshot) = snapshot {
        let status = snapshot.activity.status_text(snapshot.reading.is_live);
        let color = if snapshot.reading.is_live {
            snapshot.activity.color()
        } else {
            LIGHT_GRAY
        };
        draw_text(display, &status, Point::new(560, 6), &FONT_8X13, color)?;

        for (i, (row, caption)) in snapshot.forecast.iter().zip(FORECAST_ROW_LABELS).enumerate() {
            let level = row.level.map_or("--", |level| level.label());
            let text = format!("{caption:<11} {:>3} {level}", format_reading(row.kp, 1));
            let position = Point::new(FORECAST_LEFT_PX, 2 + i as i32 * 12);
            draw_text(display, &text, position, &FONT_6X10, row.color())?;
        }
    }

    // No data age reported yet
    let Some(link) = link else {
        return draw_text(display, "Satellite: --", Point::new(560, 22), &FONT_6X10, LIGHT_GRAY);
    };
    let link_text = format!("Satellite: {}", link.label());
    draw_text(display, &link_text, Point::new(560, 22), &FONT_6X10, link.color())
}

fn draw_cards<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    snapshot: &DashboardSnapshot,
) -> Result<(), D::Error> {
    let analysis = &snapshot.analysis;
    let cards = [
        (
            format!("Kp {}", format_reading(snapshot.reading.kp, 1)),
            analysis.kp_level.label(),
            analysis.kp_level.color(),
        ),
        (
            format!("Wind {} km/s", format_reading(snapshot.reading.wind, 0)),
            analysis.wind_level.label(),
            snapshot.wind_tier.color(),
        ),
        (
            format!("Lightning {}/min", analysis.inputs.lightning),
            analysis.lightning_level.label(),
            analysis.lightning_level.color(),
        ),
        (
            format!("Resonance {:.2} Hz", snapshot.sample.schumann),
            analysis.resonance.label(),
            analysis.resonance.color(),
        ),
    ];

    for (i, (value, level, color)) in cards.iter().enumerate() {
        let left = 10 + i as i32 * CARD_WIDTH_PX;
        draw_text(display, value, Point::new(left, CARDS_TOP_PX), &FONT_8X13, WHITE)?;
        draw_text(display, level, Point::new(left, CARDS_TOP_PX + 16), &FONT_6X10, *color)?;
    }

    let bio = format!(
        "Bio: {} - {}   Harmonics avg {:.2} Hz",
        snapshot.bio.label(),
        snapshot.bio.detail(snapshot.sample.wind),
        analysis.harmonics.average
    );
    draw_text(display, &bio, Point::new(10, CARDS_TOP_PX + 32), &FONT_6X10, snapshot.bio.color())
}

fn draw_analysis<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    snapshot: &DashboardSnapshot,
) -> Result<(), D::Error> {
    let conclusion = &snapshot.analysis.conclusion;
    let mut y = PANEL_TOP_PX;

    draw_text(
        display,
        conclusion.level.badge(),
        Point::new(10, y),
        &FONT_8X13,
        conclusion.level.color(),
    )?;
    y += 16;

    let max_chars = (ANALYSIS_WIDTH_PX / 6) as usize;
    for line in wrap(&conclusion.summary, max_chars).iter().take(5) {
        draw_text(display, line, Point::new(10, y), &FONT_6X10, LIGHT_GRAY)?;
        y += 11;
    }

    y += 4;
    for advice in conclusion.recommendations().iter().take(3) {
        let line = format!("- {advice}");
        draw_text(display, &line, Point::new(10, y), &FONT_6X10, WHITE)?;
        y += 11;
    }

    let [alpha, beta, stress] = snapshot.bands.proportions();
    let bands = format!("Alpha {alpha:.0}%  Beta {beta:.0}%  Stress {stress:.0}%");
    draw_text(display, &bands, Point::new(10, y + 4), &FONT_6X10, LIGHT_GRAY)
}

fn draw_amplitude<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    monitor: &CorrelationMonitor,
    snapshot: &DashboardSnapshot,
) -> Result<(), D::Error> {
    let report = &snapshot.analysis.amplitude;
    let title = format!("Amplitude {:.0}  {}", report.value, report.trend.label());
    draw_text(
        display,
        &title,
        Point::new(AMPLITUDE_LEFT_PX, PANEL_TOP_PX),
        &FONT_8X13,
        report.trend.color(),
    )?;

    let chart = AmplitudeChart::new(Rectangle::new(
        Point::new(AMPLITUDE_LEFT_PX, PANEL_TOP_PX + 16),
        AMPLITUDE_CHART_SIZE,
    ));
    chart.draw(&monitor.tracker().session_values(), display)?;

    let below = PANEL_TOP_PX + 16 + AMPLITUDE_CHART_SIZE.height as i32 + 4;
    let stats = format!(
        "min {:.0}  avg {:.0}  max {:.0}  {}",
        report.stats.min,
        report.stats.avg,
        report.stats.max,
        report.stats.duration_label()
    );
    draw_text(display, &stats, Point::new(AMPLITUDE_LEFT_PX, below), &FONT_6X10, LIGHT_GRAY)?;
    draw_text(
        display,
        report.comparison.label(),
        Point::new(AMPLITUDE_LEFT_PX, below + 12),
        &FONT_6X10,
        report.comparison.color(),
    )?;
    draw_text(
        display,
        recommendation(report.value),
        Point::new(AMPLITUDE_LEFT_PX, below + 24),
        &FONT_6X10,
        WHITE,
    )
}

/// Paint the full dashboard.
fn draw_dashboard<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    monitor: &CorrelationMonitor,
    tooltip: Option<&Tooltip>,
    link: Option<LinkStatus>,
) -> Result<(), D::Error> {
    display.clear(COLOR_BACKGROUND)?;

    draw_header(display, monitor.snapshot(), link)?;
    monitor.render(display)?;

    if let Some(surface) = monitor.graph().surface() {
        surface
            .into_styled(PrimitiveStyle::with_stroke(
                blend(COLOR_BACKGROUND, WHITE, 0.15),
                1,
            ))
            .draw(display)?;

        if let Some(tooltip) = tooltip {
            tooltip.draw(surface, monitor.graph().background(), display)?;
        }
    }

    let Some(snapshot) = monitor.snapshot() else {
        return draw_text(
            display,
            "Waiting for data...",
            Point::new(10, CARDS_TOP_PX),
            &FONT_8X13,
            LIGHT_GRAY,
        );
    };

    draw_cards(display, snapshot)?;
    draw_analysis(display, snapshot)?;
    draw_amplitude(display, monitor, snapshot)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting schumann-rs simulator");
    info!("Keys: R=Refresh  F=Feed outage  D=Stale wind  S=Compact chart  Q=Quit");

    let config = load_config();
    let mut monitor = match CorrelationMonitor::new(config, now_secs()) {
        Ok(monitor) => monitor,
        Err(e) => {
            error!("Invalid config: {}", e);
            return;
        }
    };

    let mut compact = false;
    monitor.attach_surface(chart_bounds(compact));

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Schumann Simulator", &output_settings);
    let mut frame = FrameBuffer::new(display.size());

    let mut feeds = MockFeeds::new();
    let mut outage = false;
    let mut stale = false;

    let refresh_interval = Duration::from_secs(config.refresh_interval_secs as u64);
    let lightning_interval = Duration::from_secs(config.lightning_interval_secs as u64);

    // First sample straight away
    let update = next_update(&mut feeds);
    let mut link = update.reading.link_status();
    monitor.refresh(update);
    let mut last_refresh = Instant::now();
    let mut last_lightning = Instant::now();
    let mut tooltip: Option<Tooltip> = None;

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    if let Err(e) = draw_dashboard(&mut frame, &monitor, None, link) {
        error!("Draw error: {:?}", e);
    }
    let _ = frame.flush(&mut display);
    window.update(&display);
    let mut needs_redraw = false;
    let mut force_refresh = false;

    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::R => force_refresh = true,
                    Keycode::F => {
                        outage = !outage;
                        feeds.set_offline(outage);
                        info!("Feed outage {}", if outage { "on" } else { "off" });
                    }
                    Keycode::D => {
                        stale = !stale;
                        feeds.set_stale(stale);
                        info!("Stale wind data {}", if stale { "on" } else { "off" });
                    }
                    Keycode::S => {
                        compact = !compact;
                        monitor.resize(chart_bounds(compact).size);
                        monitor.leave();
                        tooltip = None;
                        needs_redraw = true;
                    }
                    _ => {}
                },

                SimulatorEvent::MouseMove { point } => {
                    let previous = monitor.highlight();
                    match monitor.graph().surface() {
                        Some(surface) if surface.contains(point) => {
                            let local_x = (point.x - surface.top_left.x) as f32;
                            tooltip = monitor.hover(local_x);
                        }
                        _ => {
                            monitor.leave();
                            tooltip = None;
                        }
                    }
                    if monitor.highlight() != previous {
                        needs_redraw = true;
                    }
                }

                _ => {}
            }
        }

        // --- Feeds --------------------------------------------------------
        if force_refresh || last_refresh.elapsed() >= refresh_interval {
            let update = next_update(&mut feeds);
            // Keep the last known link state when no source reported an age
            if let Some(status) = update.reading.link_status() {
                link = Some(status);
            }
            monitor.refresh(update);

            // Keep the tooltip on the same index after the shift
            if let Some(index) = monitor.highlight() {
                tooltip = monitor.hover(tooltip_x(&monitor, index));
            }

            last_refresh = Instant::now();
            force_refresh = false;
            needs_redraw = true;
        }

        if last_lightning.elapsed() >= lightning_interval {
            let count = feeds.next_lightning();
            if monitor.update_lightning(count, now_secs()).is_some() {
                needs_redraw = true;
            }
            last_lightning = Instant::now();
        }

        // --- Render -------------------------------------------------------
        if needs_redraw {
            if let Err(e) = draw_dashboard(&mut frame, &monitor, tooltip.as_ref(), link) {
                error!("Draw error: {:?}", e);
            }
            if let Err(e) = frame.flush(&mut display) {
                error!("Flush error: {:?}", e);
            }
            needs_redraw = false;
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}

/// Surface-local x of a sample index.
fn tooltip_x(monitor: &CorrelationMonitor, index: usize) -> f32 {
    let width = monitor
        .graph()
        .surface()
        .map_or(0.0, |surface| surface.size.width as f32);
    schumann_core::ui::graph::x_for_index(index, monitor.buffer().len(), width)
}
