//! Command-line argument definitions for the LIS bridge
//!
//! This module defines the CLI interface using the clap derive API. The
//! binary is an operational companion to the integration core: it decodes
//! captured analyzer messages and replays them against specimen store
//! snapshots.

use crate::app::models::Protocol;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the LIS bridge
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lis-bridge",
    version,
    about = "Decode and replay ASTM/HL7 analyzer result messages",
    long_about = "Operational tooling for the analyzer integration core. Decodes captured \
                  ASTM E1394 and HL7 v2 result messages into their structured form, and \
                  replays captured messages against a specimen store snapshot to inspect \
                  matching, normalization and write behavior."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a captured message file and dump the structured form
    Decode(DecodeArgs),
    /// Replay a captured message against a specimen store snapshot
    Process(ProcessArgs),
}

/// Arguments for the decode command
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Path to the captured message file
    ///
    /// Line endings are normalized to `\r` before decoding, so captures
    /// saved with Unix or Windows endings decode the same way.
    #[arg(value_name = "FILE", help = "Captured analyzer message file")]
    pub message_file: PathBuf,

    /// Wire protocol the message was captured from
    #[arg(short = 'p', long = "protocol", value_enum)]
    pub protocol: ProtocolArg,

    /// Output format for the decoded message
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the decoded message"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the process command
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Path to the captured message file
    #[arg(value_name = "FILE", help = "Captured analyzer message file")]
    pub message_file: PathBuf,

    /// Wire protocol the message was captured from
    #[arg(short = 'p', long = "protocol", value_enum)]
    pub protocol: ProtocolArg,

    /// Path to the JSON specimen store snapshot
    ///
    /// The snapshot is updated in place with the written values unless
    /// --dry-run is given.
    #[arg(
        short = 's',
        long = "store",
        value_name = "FILE",
        help = "JSON specimen store snapshot"
    )]
    pub store_file: PathBuf,

    /// Write each parameter independently instead of as one atomic batch
    ///
    /// Mirrors the legacy best-effort delivery behavior: a failing write
    /// aborts the rest but earlier writes stay committed.
    #[arg(long = "best-effort", help = "Use per-parameter best-effort writes")]
    pub best_effort: bool,

    /// Report the outcome without writing the store snapshot back
    #[arg(long = "dry-run", help = "Do not write the store snapshot back")]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Wire protocol selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    /// ASTM E1394-style delimited records
    Astm,
    /// HL7 v2-style pipe-delimited segments
    Hl7,
}

impl ProtocolArg {
    pub fn to_protocol(self) -> Protocol {
        match self {
            ProtocolArg::Astm => Protocol::Astm,
            ProtocolArg::Hl7 => Protocol::Hl7,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl DecodeArgs {
    /// Validate the decode command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.message_file.exists() {
            return Err(Error::configuration(format!(
                "Message file does not exist: {}",
                self.message_file.display()
            )));
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.message_file.exists() {
            return Err(Error::configuration(format!(
                "Message file does not exist: {}",
                self.message_file.display()
            )));
        }

        if !self.store_file.exists() {
            return Err(Error::configuration(format!(
                "Store file does not exist: {}",
                self.store_file.display()
            )));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
