//! Integer PCM primitives over interleaved little-endian byte blocks.
//!
//! Everything here is pure math with no allocation beyond the returned
//! sample vectors. Samples are signed: 8-bit data is read as `i8`.

/// Floor applied to RMS before taking the logarithm, so silence scores
/// `20 * log10(1e-10) = -200` instead of `-inf`.
pub const ENERGY_EPSILON: f64 = 1e-10;

/// Numeric decoding format for one sample width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    Int8,
    Int16,
    Int32,
}

impl SampleFormat {
    /// Format table: sample width in bytes → decoding format.
    pub fn from_width(sample_width: u8) -> Option<Self> {
        match sample_width {
            1 => Some(Self::Int8),
            2 => Some(Self::Int16),
            4 => Some(Self::Int32),
            _ => None,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 => 4,
        }
    }

    /// Decode one sample. `bytes` must hold exactly `self.width()` bytes.
    #[inline]
    pub fn decode(&self, bytes: &[u8]) -> i32 {
        match self {
            Self::Int8 => bytes[0] as i8 as i32,
            Self::Int16 => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
            Self::Int32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }

    /// Append the little-endian encoding of `value`, truncated to this width.
    #[inline]
    pub fn encode_into(&self, value: i32, out: &mut Vec<u8>) {
        match self {
            Self::Int8 => out.push(value as i8 as u8),
            Self::Int16 => out.extend_from_slice(&(value as i16).to_le_bytes()),
            Self::Int32 => out.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Iterate over every sample of a block, ignoring a trailing partial sample.
    pub fn samples<'a>(&self, data: &'a [u8]) -> impl Iterator<Item = i32> + 'a {
        let format = *self;
        data.chunks_exact(format.width()).map(move |chunk| format.decode(chunk))
    }
}

/// A decoded single-channel sample sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    format: SampleFormat,
    values: Vec<i32>,
}

impl Samples {
    pub fn new(format: SampleFormat, values: Vec<i32>) -> Self {
        Self { format, values }
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Re-encode as raw bytes at the original sample width.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.values.len() * self.format.width());
        for &value in &self.values {
            self.format.encode_into(value, &mut out);
        }
        out
    }
}

/// Keep only the samples of channel `selected` from an interleaved block.
pub fn extract_single_channel(data: &[u8], format: SampleFormat, channels: usize, selected: usize) -> Samples {
    let width = format.width();
    let offset = selected * width;
    let values = data
        .chunks_exact(width * channels)
        .map(|frame| format.decode(&frame[offset..offset + width]))
        .collect();
    Samples::new(format, values)
}

/// Per-frame mean of all channels, floored.
///
/// Sums are accumulated in `i64` so 32-bit input cannot overflow.
pub fn compute_average_channel(data: &[u8], format: SampleFormat, channels: usize) -> Samples {
    let width = format.width();
    let divisor = channels as i64;
    let values = data
        .chunks_exact(width * channels)
        .map(|frame| {
            let sum: i64 = format.samples(frame).map(i64::from).sum();
            sum.div_euclid(divisor) as i32
        })
        .collect();
    Samples::new(format, values)
}

/// Two-channel specialization of [`compute_average_channel`].
pub fn compute_average_channel_stereo(data: &[u8], format: SampleFormat) -> Samples {
    let width = format.width();
    let values = data
        .chunks_exact(width * 2)
        .map(|frame| {
            let left = format.decode(&frame[..width]) as i64;
            let right = format.decode(&frame[width..]) as i64;
            (left + right).div_euclid(2) as i32
        })
        .collect();
    Samples::new(format, values)
}

/// Split an interleaved block into one sample sequence per channel.
pub fn separate_channels(data: &[u8], format: SampleFormat, channels: usize) -> Vec<Samples> {
    let frames = data.len() / (format.width() * channels);
    let mut separated: Vec<Vec<i32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
    for (i, value) in format.samples(&data[..frames * format.width() * channels]).enumerate() {
        separated[i % channels].push(value);
    }
    separated.into_iter().map(|values| Samples::new(format, values)).collect()
}

/// Root mean square of a sample sequence; 0.0 when empty.
pub fn rms<I: IntoIterator<Item = i32>>(samples: I) -> f64 {
    let mut count = 0usize;
    let mut sum_sq = 0.0f64;
    for sample in samples {
        let s = sample as f64;
        sum_sq += s * s;
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f64).sqrt()
}

/// Log-energy score of one channel: `20 * log10(max(rms, ENERGY_EPSILON))`.
pub fn calculate_energy_single_channel<I: IntoIterator<Item = i32>>(samples: I) -> f64 {
    20.0 * rms(samples).max(ENERGY_EPSILON).log10()
}

/// Log-energy score of several channels: the loudest channel wins, so any
/// channel clearing a threshold makes the whole block clear it.
pub fn calculate_energy_multichannel(channels: &[Samples]) -> f64 {
    channels
        .iter()
        .map(|channel| calculate_energy_single_channel(channel.values().iter().copied()))
        .fold(calculate_energy_single_channel(std::iter::empty()), f64::max)
}
