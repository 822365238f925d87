use clap::Parser;
use meow_core::MeowError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, MeowError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();

    match args.command {
        Commands::Embed(embed) => embed.run(),
        Commands::Extract(extract) => extract.run(),
        Commands::Capacity(capacity) => capacity.run(),
    }
}
