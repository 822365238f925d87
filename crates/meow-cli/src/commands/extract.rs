use std::path::PathBuf;

use clap::Args;
use meow_core::{ExtractConfig, MeowError, PayloadOutcome};

use crate::CliResult;

/// Recovers the hidden metadata payload from an image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Image that may contain a hidden payload
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,

    /// Decode without error correction, the baseline path
    #[arg(long = "no-ecc")]
    pub no_ecc: bool,

    /// Payload bits per color channel: 1, 2 or 4
    #[arg(short = 'b', long = "bits", value_name = "bits", default_value = "2")]
    pub bits_per_channel: u8,
}

impl ExtractArgs {
    pub fn run(self) -> CliResult<()> {
        let config = ExtractConfig {
            ecc: !self.no_ecc,
            bits_per_channel: self.bits_per_channel,
        };

        match meow_core::commands::extract(&self.image, config)? {
            PayloadOutcome::Recovered(payload) => {
                let json = serde_json::to_string_pretty(&payload)
                    .map_err(MeowError::PayloadSerialization)?;
                println!("{json}");
            }
            PayloadOutcome::Missing(reason) => {
                // absence is a normal outcome, not a failure
                eprintln!("no payload found ({reason:?})");
            }
        }

        Ok(())
    }
}
