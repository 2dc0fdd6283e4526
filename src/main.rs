use anyhow::Context;
use clap::Parser;
use lis_bridge::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Create the async runtime and run the selected command
fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    runtime.block_on(commands::run(args))?;
    Ok(())
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("LIS Bridge - Analyzer Result Message Tooling");
    println!("============================================");
    println!();
    println!("Decode captured ASTM E1394 and HL7 v2 analyzer result messages and");
    println!("replay them against specimen store snapshots.");
    println!();
    println!("USAGE:");
    println!("    lis-bridge <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    decode      Decode a captured message file and dump the structured form");
    println!("    process     Replay a captured message against a specimen store snapshot");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Decode a captured ASTM message:");
    println!("    lis-bridge decode capture.astm --protocol astm");
    println!();
    println!("    # Decode an HL7 message as JSON:");
    println!("    lis-bridge decode capture.hl7 --protocol hl7 --format json");
    println!();
    println!("    # Replay a message against a specimen store snapshot:");
    println!("    lis-bridge process capture.astm --protocol astm --store specimens.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    lis-bridge <COMMAND> --help");
}
