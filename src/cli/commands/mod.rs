//! Command implementations for the LIS bridge CLI
//!
//! Each command is implemented in its own module; `shared` carries the
//! logging setup and message-file handling common to both.

pub mod decode;
pub mod process;
pub mod shared;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the LIS bridge
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Decode(decode_args)) => decode::run_decode(decode_args).await,
        Some(Commands::Process(process_args)) => process::run_process(process_args).await,
        None => Ok(()),
    }
}
