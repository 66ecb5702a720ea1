//! Decoded media handed to the extractors.

/// Sample rate every waveform is normalized to before embedding.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Minimum number of samples (one second at 16 kHz) a voice sample needs.
pub const MIN_WAVEFORM_SAMPLES: usize = 16_000;

/// Decoded RGB8 image, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl FaceImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self { width, height, rgb }
    }
}

/// Mono waveform with samples in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the waveform is long enough to be embedded.
    pub fn is_long_enough(&self) -> bool {
        self.samples.len() >= MIN_WAVEFORM_SAMPLES
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
