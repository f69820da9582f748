//! Space-weather input with sequential source fallback
//!
//! Each reading (Kp, solar wind) can come from several sources tried in
//! order. The first finite value the reading accepts wins; when every source
//! fails the reading is [`Reading::Unavailable`]. There are no retries and no
//! backoff.

use log::{debug, warn};
use thiserror_no_std::Error;

use crate::math::{round_half_away, round_to_tenths};
use crate::metrics::LinkStatus;
use crate::sample::Reading;

/// Wind speed used by the simulated fallback (km/s)
pub const SIMULATED_WIND_KMS: f32 = 350.0;

/// Base Kp used by the simulated fallback
const SIMULATED_KP_BASE: f32 = 2.0;

/// Reasons a single source produced no value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    /// The source could not be reached
    #[error("{name} unreachable")]
    Unreachable {
        /// Source name
        name: &'static str,
    },

    /// The source answered with something that is not a number
    #[error("{name} returned malformed data")]
    Malformed {
        /// Source name
        name: &'static str,
    },

    /// The source has no entries for the requested period
    #[error("{name} has no data")]
    Empty {
        /// Source name
        name: &'static str,
    },
}

/// A provider of one numeric reading
pub trait ReadingSource {
    /// Short name used in log messages
    fn name(&self) -> &'static str;

    /// Fetch the current value
    fn read(&mut self) -> Result<f32, SourceError>;

    /// Seconds since the source's newest data point, if it reports one
    fn data_age_secs(&self) -> Option<u64> {
        None
    }
}

/// Try each source in order and return the first finite value
///
/// Non-finite values count as failures. Every failure is logged at `warn`.
pub fn first_available(sources: &mut [&mut dyn ReadingSource]) -> Reading {
    first_valid(sources, |_| true).0
}

/// Try each source in order and return the first finite value `accept` allows
///
/// Also returns the data age reported by the source that answered. Rejected
/// and non-finite values count as failures.
pub fn first_valid(
    sources: &mut [&mut dyn ReadingSource],
    accept: impl Fn(f32) -> bool,
) -> (Reading, Option<u64>) {
    for source in sources.iter_mut() {
        match source.read() {
            Ok(value) if value.is_finite() && accept(value) => {
                debug!("{} -> {}", source.name(), value);
                return (Reading::Value(value), source.data_age_secs());
            }
            Ok(value) => warn!("{} returned invalid value {}", source.name(), value),
            Err(e) => warn!("Source failed: {}", e),
        }
    }

    (Reading::Unavailable, None)
}

/// Latest Kp and wind with their provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceWeatherReading {
    /// Planetary Kp index
    pub kp: Reading,
    /// Solar wind speed (km/s, whole numbers)
    pub wind: Reading,
    /// Whether the Kp came from a live source
    pub is_live: bool,
    /// Age of the wind source's newest data point (seconds)
    pub data_age_secs: Option<u64>,
}

impl SpaceWeatherReading {
    /// Query the Kp sources then the wind sources
    ///
    /// The reading is live only when Kp was obtained. Wind must be
    /// positive and is rounded to whole km/s.
    pub fn acquire(
        kp_sources: &mut [&mut dyn ReadingSource],
        wind_sources: &mut [&mut dyn ReadingSource],
    ) -> Self {
        let kp = first_available(kp_sources);
        if !kp.is_available() {
            warn!("No Kp source available");
        }

        let (wind, data_age_secs) = first_valid(wind_sources, |w| w > 0.0);
        let wind = match wind {
            Reading::Value(w) => Reading::Value(round_half_away(w)),
            Reading::Unavailable => {
                warn!("No solar wind source available");
                Reading::Unavailable
            }
        };

        Self {
            kp,
            wind,
            is_live: kp.is_available(),
            data_age_secs,
        }
    }

    /// Simulated reading used when no source answered
    ///
    /// `unit` is a caller-supplied value in `[0, 1)`; Kp becomes
    /// `2 + unit` rounded to one decimal.
    pub fn simulated(unit: f32) -> Self {
        Self {
            kp: Reading::Value(round_to_tenths(SIMULATED_KP_BASE + unit)),
            wind: Reading::Value(SIMULATED_WIND_KMS),
            is_live: false,
            data_age_secs: None,
        }
    }

    /// Feed freshness, when the wind source reported its data age
    pub fn link_status(&self) -> Option<LinkStatus> {
        self.data_age_secs.map(LinkStatus::assess)
    }

    /// Substitute the simulated reading when both values are missing
    pub fn resolve(self, unit: f32) -> Self {
        if self.kp.is_available() || self.wind.is_available() {
            self
        } else {
            warn!("All space-weather sources failed, using simulated data");
            Self::simulated(unit)
        }
    }
}
