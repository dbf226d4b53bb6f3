use crate::models::audio_models::{ChannelSelection, StreamParams};
use crate::models::config::ValidatorConfiguration;
use crate::models::error::ReaderError;
use crate::processing::channel_selector::{make_channel_selector, ChannelSelector, ChannelView};
use crate::processing::signal;
use crate::traits::data_source::DataValidator;

type EnergyFn = fn(&ChannelView<'_>) -> f64;

/// Flags a block as activity when its log-energy reaches a threshold.
///
/// With several channels and no concrete channel selected, each channel is
/// scored separately and the loudest one decides, so any single channel can
/// trigger.
#[derive(Debug, Clone)]
pub struct AudioEnergyValidator {
    energy_threshold: f64,
    selector: ChannelSelector,
    energy_fn: EnergyFn,
}

impl AudioEnergyValidator {
    pub fn new(
        energy_threshold: f64,
        sample_width: u8,
        channels: u16,
        use_channel: ChannelSelection,
    ) -> Result<Self, ReaderError> {
        let selector = make_channel_selector(sample_width, channels, use_channel)?;
        let energy_fn: EnergyFn = if selector.is_separating() {
            multichannel_energy
        } else {
            single_channel_energy
        };
        Ok(Self {
            energy_threshold,
            selector,
            energy_fn,
        })
    }

    pub fn from_config(config: &ValidatorConfiguration, params: &StreamParams) -> Result<Self, ReaderError> {
        Self::new(
            config.energy_threshold,
            params.sample_width,
            params.channels,
            config.use_channel,
        )
    }

    /// Log-energy score (dB) of one block.
    pub fn energy(&self, data: &[u8]) -> f64 {
        (self.energy_fn)(&self.selector.select(data))
    }

    pub fn energy_threshold(&self) -> f64 {
        self.energy_threshold
    }
}

impl DataValidator<[u8]> for AudioEnergyValidator {
    fn is_valid(&self, data: &[u8]) -> bool {
        self.energy(data) >= self.energy_threshold
    }
}

fn single_channel_energy(view: &ChannelView<'_>) -> f64 {
    match view {
        ChannelView::Raw { data, format } => signal::calculate_energy_single_channel(format.samples(data)),
        ChannelView::Channel(samples) => signal::calculate_energy_single_channel(samples.values().iter().copied()),
        ChannelView::Channels(channels) => signal::calculate_energy_multichannel(channels),
    }
}

fn multichannel_energy(view: &ChannelView<'_>) -> f64 {
    match view {
        ChannelView::Channels(channels) => signal::calculate_energy_multichannel(channels),
        single => single_channel_energy(single),
    }
}
