use std::path::{Path, PathBuf};

use crate::ecc::Redundancy;
use crate::embedder::{self, EmbedConfig};
use crate::loader;
use crate::payload::MetadataPayload;
use crate::MeowError;

pub fn prepare() -> EmbedApi {
    EmbedApi::default()
}

/// Builder for the file-to-file embed operation.
#[derive(Default, Debug)]
pub struct EmbedApi {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    payload: Option<MetadataPayload>,
    config: EmbedConfig,
}

impl EmbedApi {
    /// The carrier image, used readonly.
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// Where the new carrier will be written.
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// The metadata to hide.
    pub fn with_payload(mut self, payload: MetadataPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_config(mut self, config: EmbedConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_redundancy(mut self, redundancy: Redundancy) -> Self {
        self.config.redundancy = redundancy;
        self
    }

    pub fn with_bits_per_channel(mut self, bits_per_channel: u8) -> Self {
        self.config.bits_per_channel = bits_per_channel;
        self
    }

    /// Execute the embed and write the output file. The file appears
    /// atomically or not at all.
    pub fn execute(self) -> Result<(), MeowError> {
        let Some(image) = self.image else {
            return Err(MeowError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(MeowError::TargetNotSet);
        };
        let Some(payload) = self.payload else {
            return Err(MeowError::MissingPayload);
        };

        let carrier = loader::load(&image)?;
        let stego = embedder::embed(&carrier, &payload, &self.config)?;
        loader::save_png_atomic(&stego, &output)
    }
}
