use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Prints the payload budget of a carrier image
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image to measure
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// Payload bits per color channel: 1, 2 or 4
    #[arg(short = 'b', long = "bits", value_name = "bits", default_value = "2")]
    pub bits_per_channel: u8,
}

impl CapacityArgs {
    pub fn run(self) -> CliResult<()> {
        let bits = meow_core::commands::capacity(&self.image, self.bits_per_channel)?;
        println!(
            "{} holds {bits} bits ({} bytes) at {} bits per channel",
            self.image.display(),
            bits / 8,
            self.bits_per_channel
        );

        Ok(())
    }
}
