use std::fs::File;
use std::path::PathBuf;

use clap::Args;
use meow_core::{EmbedConfig, MeowError, MetadataPayload};

use crate::cli::RedundancyArg;
use crate::CliResult;

/// Hides a metadata payload in a raster image
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Carrier image such as a PNG file, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// The new carrier will be stored as this file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub output: PathBuf,

    /// JSON file holding the metadata payload to hide
    #[arg(
        short = 'p',
        long = "payload",
        value_name = "payload file",
        required = true
    )]
    pub payload: PathBuf,

    /// Redundancy level protecting the payload
    #[arg(short = 'r', long, value_enum, default_value_t = RedundancyArg::High)]
    pub redundancy: RedundancyArg,

    /// Payload bits per color channel: 1, 2 or 4
    #[arg(short = 'b', long = "bits", value_name = "bits", default_value = "2")]
    pub bits_per_channel: u8,
}

impl EmbedArgs {
    pub fn run(self) -> CliResult<()> {
        let file = File::open(&self.payload).map_err(|source| MeowError::ReadError { source })?;
        let payload: MetadataPayload =
            serde_json::from_reader(file).map_err(MeowError::PayloadFormat)?;

        let config = EmbedConfig {
            redundancy: self.redundancy.into(),
            bits_per_channel: self.bits_per_channel,
        };

        meow_core::commands::embed(&self.image, &self.output, payload, config)?;
        log::info!("wrote {}", self.output.display());

        Ok(())
    }
}
