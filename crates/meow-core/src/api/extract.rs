use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::extractor::{ExtractConfig, PayloadOutcome};
use crate::loader;
use crate::MeowError;

pub fn prepare() -> ExtractApi {
    ExtractApi::default()
}

/// Builder for the file-level load-and-extract operation.
#[derive(Default, Debug)]
pub struct ExtractApi {
    image: Option<PathBuf>,
    config: ExtractConfig,
}

impl ExtractApi {
    /// The image that may contain a hidden payload.
    pub fn from_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Decode without error correction, the baseline path.
    pub fn without_ecc(mut self) -> Self {
        self.config.ecc = false;
        self
    }

    pub fn with_bits_per_channel(mut self, bits_per_channel: u8) -> Self {
        self.config.bits_per_channel = bits_per_channel;
        self
    }

    /// Load the image and attempt recovery. An absent payload is a normal
    /// outcome, not an error.
    pub fn execute(self) -> Result<(RgbaImage, PayloadOutcome), MeowError> {
        let Some(image) = self.image else {
            return Err(MeowError::CarrierNotSet);
        };

        loader::load_with_payload_using(&image, &self.config)
    }
}
