//! Correlation monitor context
//!
//! [`CorrelationMonitor`] is the single owner of everything the dashboard
//! mutates: the sample buffer, the chart surface, the hover highlight and
//! the amplitude history. Callers feed it refreshes, lightning counts and
//! pointer events; it never touches the network, the clock or an RNG.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::info;

use crate::acquisition::SpaceWeatherReading;
use crate::analysis::{AmplitudeTracker, AnalysisInputs, BandIntensity, GlobalAnalysis};
use crate::buffer::SeriesBuffer;
use crate::config::{ConfigError, MonitorConfig};
use crate::metrics::{ActivityStatus, BioImpact, FORECAST_DAYS, ForecastRow, WindTier};
use crate::sample::{Reading, Sample, clock_label, schumann_frequency};
use crate::ui::graph::{CorrelationGraph, SeriesDomains, Tooltip};

/// Inputs for one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshUpdate {
    /// Kp and wind from the acquisition layer
    pub reading: SpaceWeatherReading,
    /// Predicted Kp for today and the next two days
    pub forecast: [Reading; FORECAST_DAYS],
    /// Natural resonance variation in `[-0.02, 0.02)` Hz
    pub jitter: f32,
    /// Three values in `[0, 1)` spreading the band intensities
    pub band_unit: [f32; 3],
    /// Wall-clock time of the refresh (Unix seconds)
    pub now_secs: u64,
}

/// Everything the dashboard shows after a refresh
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Sample appended to the chart
    pub sample: Sample,
    /// Raw readings the sample was built from
    pub reading: SpaceWeatherReading,
    /// Header activity indicator
    pub activity: ActivityStatus,
    /// Biological impact card
    pub bio: BioImpact,
    /// Wind value coloring
    pub wind_tier: WindTier,
    /// Kp forecast, nearest day first
    pub forecast: [ForecastRow; FORECAST_DAYS],
    /// Alpha, beta and stress band intensities
    pub bands: BandIntensity,
    /// Analysis panel
    pub analysis: GlobalAnalysis,
}

/// Owned state of one correlation dashboard
pub struct CorrelationMonitor {
    config: MonitorConfig,
    buffer: SeriesBuffer,
    graph: CorrelationGraph,
    highlight: Option<usize>,
    tracker: AmplitudeTracker,
    lightning: Option<u32>,
    snapshot: Option<DashboardSnapshot>,
}

impl CorrelationMonitor {
    /// Create a monitor with an empty buffer and no surface
    pub fn new(config: MonitorConfig, now_secs: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            config,
            buffer: SeriesBuffer::new(),
            graph: CorrelationGraph::new(SeriesDomains::from_config(&config)),
            highlight: None,
            tracker: AmplitudeTracker::new(now_secs),
            lightning: None,
            snapshot: None,
        })
    }

    /// Use a different chart background
    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.graph = self.graph.with_background(color);
        self
    }

    /// Attach the chart to a region of the display
    pub fn attach_surface(&mut self, bounds: Rectangle) {
        self.graph.attach(bounds);
    }

    /// Change the chart size, keeping its position
    pub fn resize(&mut self, size: Size) {
        self.graph.resize(size);
    }

    /// Append a sample for `update` and recompute the dashboard
    pub fn refresh(&mut self, update: RefreshUpdate) -> &DashboardSnapshot {
        let RefreshUpdate {
            reading,
            forecast,
            jitter,
            band_unit,
            now_secs,
        } = update;

        let schumann = schumann_frequency(reading.kp, jitter);
        let label = clock_label(now_secs, self.config.label_utc_offset_secs);
        let sample = Sample::coerce(label, reading.wind, reading.kp, Reading::Value(schumann));

        self.buffer.append(sample.clone());

        let kp = reading.kp.or(0.0);
        let inputs = AnalysisInputs::resolve(reading.kp, reading.wind, self.lightning, schumann);
        let analysis = GlobalAnalysis::run(inputs, &mut self.tracker, now_secs);

        info!(
            "Refresh {}: kp={:?} wind={:?} schumann={:.2} live={} ({} samples)",
            sample.label_or_placeholder(),
            reading.kp,
            reading.wind,
            schumann,
            reading.is_live,
            self.buffer.len()
        );

        self.snapshot.insert(DashboardSnapshot {
            activity: ActivityStatus::assess(reading.kp),
            bio: BioImpact::assess(kp),
            wind_tier: WindTier::assess(sample.wind),
            forecast: forecast.map(ForecastRow::assess),
            bands: BandIntensity::sample(reading.kp, reading.wind, band_unit),
            sample,
            reading,
            analysis,
        })
    }

    /// Record a new lightning rate and rerun the analysis
    ///
    /// Before the first refresh there is nothing to analyze; the count is
    /// kept for the next refresh and `None` is returned.
    pub fn update_lightning(&mut self, count: u32, now_secs: u64) -> Option<&GlobalAnalysis> {
        self.lightning = Some(count);

        let snapshot = self.snapshot.as_mut()?;
        let inputs = AnalysisInputs::resolve(
            snapshot.reading.kp,
            snapshot.reading.wind,
            self.lightning,
            snapshot.sample.schumann,
        );
        snapshot.analysis = GlobalAnalysis::run(inputs, &mut self.tracker, now_secs);

        Some(&snapshot.analysis)
    }

    /// Highlight the sample under `pointer_x` (relative to the chart's left edge)
    pub fn hover(&mut self, pointer_x: f32) -> Option<Tooltip> {
        let tooltip = self.graph.tooltip(&self.buffer, pointer_x);
        self.highlight = tooltip.as_ref().map(|t| t.index);
        tooltip
    }

    /// Clear the highlight
    pub fn leave(&mut self) {
        self.highlight = None;
    }

    /// Redraw the chart from the buffer and highlight
    pub fn render<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        self.graph.render(&self.buffer, self.highlight, display)
    }

    /// Configuration the monitor was built with
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Samples currently on the chart, oldest first
    pub fn buffer(&self) -> &SeriesBuffer {
        &self.buffer
    }

    /// Chart surface
    pub fn graph(&self) -> &CorrelationGraph {
        &self.graph
    }

    /// Buffer index of the highlighted sample
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Latest lightning rate, if any has arrived
    pub fn lightning(&self) -> Option<u32> {
        self.lightning
    }

    /// Amplitude history behind the trend and session stats
    pub fn tracker(&self) -> &AmplitudeTracker {
        &self.tracker
    }

    /// Dashboard state from the latest refresh
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }
}
