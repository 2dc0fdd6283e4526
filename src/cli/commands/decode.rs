//! Decode command implementation
//!
//! Decodes a captured analyzer message file and prints the structured
//! form, either human-readable or as JSON for scripting.

use crate::Result;
use crate::app::models::ParsedMessage;
use crate::app::services::integrator::decode_message;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::cli::commands::shared::{read_message_file, setup_logging};
use colored::*;
use tracing::info;

/// Run the decode command
pub async fn run_decode(args: DecodeArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level())?;

    let protocol = args.protocol.to_protocol();
    let body = read_message_file(&args.message_file)?;

    info!(
        "Decoding {} message from {}",
        protocol,
        args.message_file.display()
    );
    let parsed = decode_message(protocol, &body);

    match args.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        OutputFormat::Human => print_human(&parsed),
    }

    Ok(())
}

fn print_human(parsed: &ParsedMessage) {
    println!("{}", "Decoded message".bold());

    print_section("Header", &parsed.header);
    print_section("Patient", &parsed.patient);
    print_section("Order", &parsed.order);

    if parsed.results.is_empty() {
        println!("{}: none", "Results".bold());
    } else {
        println!("{} ({}):", "Results".bold(), parsed.results.len());
        for (i, result) in parsed.results.iter().enumerate() {
            println!(
                "  {}. {} = {}",
                i + 1,
                result.observation_identifier.cyan(),
                result.value.green()
            );
        }
    }

    print_section("Terminator", &parsed.terminator);
}

fn print_section(title: &str, fields: &std::collections::HashMap<String, String>) {
    let populated: Vec<(&String, &String)> =
        fields.iter().filter(|(_, v)| !v.is_empty()).collect();

    if populated.is_empty() {
        println!("{}: empty", title.bold());
        return;
    }

    println!("{} ({} populated fields):", title.bold(), populated.len());
    let mut sorted = populated;
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in sorted {
        println!("  {} = {}", key, value);
    }
}
