//! Monitor configuration
//!
//! Serialized with postcard so the simulator (or a device) can keep a
//! compact binary config blob next to the executable.

extern crate alloc;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Errors raised while loading or validating a [`MonitorConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config blob could not be decoded
    #[error("Failed to decode config: {0}")]
    Decode(postcard::Error),

    /// The config could not be encoded
    #[error("Failed to encode config: {0}")]
    Encode(postcard::Error),

    /// A series domain has `min >= max` or non-finite bounds
    #[error("Invalid domain for {series} series")]
    InvalidDomain {
        /// Series name
        series: &'static str,
    },

    /// A timer interval was zero
    #[error("Interval must be non-zero: {field}")]
    ZeroInterval {
        /// Offending field
        field: &'static str,
    },
}

/// Fixed value range a series is normalized against
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesDomain {
    /// Value drawn at the bottom of the plot band
    pub min: f32,
    /// Value drawn at the top of the plot band
    pub max: f32,
}

impl SeriesDomain {
    /// Create a domain
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Whether `min < max` and both bounds are finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Solar wind domain (km/s)
pub const WIND_DOMAIN: SeriesDomain = SeriesDomain::new(300.0, 800.0);

/// Kp index domain
pub const KP_DOMAIN: SeriesDomain = SeriesDomain::new(0.0, 9.0);

/// Resonance frequency domain (Hz)
pub const SCHUMANN_DOMAIN: SeriesDomain = SeriesDomain::new(7.75, 8.05);

/// Runtime configuration for the correlation monitor
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    /// Seconds between space-weather refreshes (one chart sample each)
    pub refresh_interval_secs: u32,
    /// Seconds between lightning-count updates
    pub lightning_interval_secs: u32,
    /// Offset applied to wall-clock labels (seconds east of UTC)
    pub label_utc_offset_secs: i32,
    /// Wind series normalization range
    pub wind_domain: SeriesDomain,
    /// Kp series normalization range
    pub kp_domain: SeriesDomain,
    /// Resonance series normalization range
    pub schumann_domain: SeriesDomain,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            lightning_interval_secs: 5,
            label_utc_offset_secs: 0,
            wind_domain: WIND_DOMAIN,
            kp_domain: KP_DOMAIN,
            schumann_domain: SCHUMANN_DOMAIN,
        }
    }
}

impl MonitorConfig {
    /// Decode and validate a postcard blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode to a postcard blob
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    /// Check intervals and domains
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "refresh_interval_secs",
            });
        }
        if self.lightning_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "lightning_interval_secs",
            });
        }

        for (series, domain) in [
            ("wind", self.wind_domain),
            ("kp", self.kp_domain),
            ("schumann", self.schumann_domain),
        ] {
            if !domain.is_valid() {
                return Err(ConfigError::InvalidDomain { series });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.wind_domain, SeriesDomain::new(300.0, 800.0));
        assert_eq!(config.kp_domain, SeriesDomain::new(0.0, 9.0));
        assert_eq!(config.schumann_domain, SeriesDomain::new(7.75, 8.05));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let config = MonitorConfig {
            refresh_interval_secs: 5,
            label_utc_offset_secs: 7 * 3600,
            ..MonitorConfig::default()
        };

        let bytes = config.to_bytes().unwrap();
        let decoded = MonitorConfig::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_rejects_inverted_domain() {
        let config = MonitorConfig {
            kp_domain: SeriesDomain::new(9.0, 0.0),
            ..MonitorConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDomain { series: "kp" })
        ));

        // Decoding runs the same validation
        let bytes = config.to_bytes().unwrap();
        assert!(MonitorConfig::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = MonitorConfig {
            refresh_interval_secs: 0,
            ..MonitorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroInterval { .. })
        ));
    }

    #[test]
    fn test_truncated_blob_fails_to_decode() {
        let bytes = MonitorConfig::default().to_bytes().unwrap();
        let result = MonitorConfig::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(ConfigError::Decode(_))));
    }
}
