use serde::{Deserialize, Serialize};

use super::audio_models::ChannelSelection;
use super::error::ReaderError;

/// Default window length in seconds (10 ms).
pub const DEFAULT_BLOCK_DUR: f64 = 0.01;

/// Default log-energy threshold for activity detection.
pub const DEFAULT_ENERGY_THRESHOLD: f64 = 50.0;

/// Declarative description of a reader pipeline.
///
/// Layers are assembled in a fixed order:
/// source → recording → limiting → windowing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfiguration {
    /// Window length in seconds (default: 0.01).
    pub block_dur: f64,

    /// Distance between consecutive window starts in seconds.
    /// `None` means windows do not overlap.
    pub hop_dur: Option<f64>,

    /// Cache everything read so the stream can be rewound and replayed.
    pub record: bool,

    /// Maximum amount of audio to read in seconds (None = until end of stream).
    pub max_read: Option<f64>,
}

impl ReaderConfiguration {
    /// Build a configuration from sample counts instead of durations.
    pub fn from_sizes(
        block_size: usize,
        hop_size: Option<usize>,
        sampling_rate: u32,
    ) -> Result<Self, ReaderError> {
        if sampling_rate == 0 {
            return Err(ReaderError::invalid("sampling rate must be positive"));
        }
        let rate = sampling_rate as f64;
        Ok(Self {
            block_dur: block_size as f64 / rate,
            hop_dur: hop_size.map(|hop| hop as f64 / rate),
            ..Self::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ReaderError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReaderError::invalid(format!("failed to parse reader configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReaderError> {
        if !self.block_dur.is_finite() || self.block_dur <= 0.0 {
            return Err(ReaderError::invalid(format!(
                "block_dur must be > 0, given: {}",
                self.block_dur
            )));
        }
        if let Some(hop_dur) = self.hop_dur {
            if !hop_dur.is_finite() || hop_dur <= 0.0 {
                return Err(ReaderError::invalid(format!("hop_dur must be > 0, given: {}", hop_dur)));
            }
            if hop_dur >= self.block_dur {
                return Err(ReaderError::invalid("hop_dur should be < block_dur"));
            }
        }
        if let Some(max_read) = self.max_read {
            if !max_read.is_finite() || max_read < 0.0 {
                return Err(ReaderError::invalid(format!(
                    "max_read must be >= 0, given: {}",
                    max_read
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReaderConfiguration {
    fn default() -> Self {
        Self {
            block_dur: DEFAULT_BLOCK_DUR,
            hop_dur: None,
            record: false,
            max_read: None,
        }
    }
}

/// Settings for [`AudioEnergyValidator`](crate::AudioEnergyValidator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfiguration {
    /// Minimum log-energy (dB) for a block to count as activity.
    pub energy_threshold: f64,

    /// Channel(s) scored on multi-channel input (default: any).
    pub use_channel: ChannelSelection,
}

impl Default for ValidatorConfiguration {
    fn default() -> Self {
        Self {
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            use_channel: ChannelSelection::Any,
        }
    }
}
