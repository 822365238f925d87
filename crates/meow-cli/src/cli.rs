use clap::{Parser, Subcommand, ValueEnum};
use meow_core::Redundancy;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Embed(embed::EmbedArgs),
    Extract(extract::ExtractArgs),
    Capacity(capacity::CapacityArgs),
}

/// Command-line face of the redundancy levels.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RedundancyArg {
    None,
    Low,
    Medium,
    High,
}

impl From<RedundancyArg> for Redundancy {
    fn from(value: RedundancyArg) -> Self {
        match value {
            RedundancyArg::None => Redundancy::None,
            RedundancyArg::Low => Redundancy::Low,
            RedundancyArg::Medium => Redundancy::Medium,
            RedundancyArg::High => Redundancy::High,
        }
    }
}
