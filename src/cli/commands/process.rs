//! Process command implementation
//!
//! Replays a captured analyzer message against a JSON specimen store
//! snapshot: decode, match, normalize, write, then report the outcome and
//! persist the updated snapshot.

use crate::app::adapters::memory_store::InMemorySpecimenStore;
use crate::app::models::RawMessage;
use crate::app::services::integrator::Integrator;
use crate::cli::args::ProcessArgs;
use crate::cli::commands::shared::{read_message_file, setup_logging};
use crate::config::IntegrationConfig;
use crate::Result;
use colored::*;
use tracing::info;

/// Run the process command
pub async fn run_process(args: ProcessArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level())?;

    let protocol = args.protocol.to_protocol();
    let body = read_message_file(&args.message_file)?;
    let store = InMemorySpecimenStore::load_from_path(&args.store_file)?;

    let config = if args.best_effort {
        IntegrationConfig::best_effort()
    } else {
        IntegrationConfig::default()
    };
    config.validate()?;

    let integrator = Integrator::new(store, config);
    let raw = RawMessage::new(protocol, body);

    info!(
        "Processing {} message from {} against store {}",
        protocol,
        args.message_file.display(),
        args.store_file.display()
    );
    let outcome = integrator.process(&raw).await?;

    if !args.quiet {
        let status = if outcome.wrote_values() {
            outcome.status.green()
        } else {
            outcome.status.yellow()
        };
        println!(
            "Sample:  {}",
            outcome.sample_id.as_deref().unwrap_or("(unresolved)")
        );
        println!("Status:  {}", status);
        for (code, value) in &outcome.written {
            println!("  wrote {} = {}", code.cyan(), value.green());
        }
    }

    if args.dry_run {
        info!("Dry run: store snapshot not written back");
    } else if outcome.wrote_values() {
        integrator.store().save_to_path(&args.store_file)?;
        info!("Store snapshot updated: {}", args.store_file.display());
    }

    Ok(())
}
