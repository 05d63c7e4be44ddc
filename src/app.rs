//! One run of the tool, from parsed arguments to exit status

use std::io;

use tracing::info;

use crate::cli::Cli;
use crate::config::{CONSENT_TIMEOUT, FileConfig, RunConfig, config_path};
use crate::digest::reader::DigestReader;
use crate::error::HarvestError;
use crate::gate::{AutoAccept, ConsentGate, TerminalGate, YES_NOTICE};
use crate::harvest::{HarvestOptions, HarvestOutcome, harvest};
use crate::registry::Registry;
use crate::session::{Session, SessionOptions};

/// Resolves the configuration, builds the collaborators and harvests.
///
/// Returns the process exit status.
pub async fn run(cli: &Cli, registry: &Registry) -> Result<u8, HarvestError> {
    let path = cli.config.clone().unwrap_or_else(config_path);
    let file = FileConfig::load(&path)?;
    let config = RunConfig::resolve(cli, file)?;

    registry.ensure_navigator(&config.navigator)?;
    let mut output = registry.get_output(&config.output, &config)?;

    if config.assume_yes && !TerminalGate.confirm(YES_NOTICE, CONSENT_TIMEOUT) {
        println!();
        println!("canceled, exiting...");
        return Ok(0);
    }

    let session = Session::new(SessionOptions::from(&config)).map_err(HarvestError::Client)?;
    let mut navigator = registry.get_navigator(&config.navigator, session, &config)?;
    let reader = DigestReader::from(&config);

    let mut gate: Box<dyn ConsentGate> = if config.assume_yes {
        Box::new(AutoAccept)
    } else {
        Box::new(TerminalGate)
    };

    let outcome = harvest(
        navigator.as_mut(),
        &reader,
        output.as_mut(),
        gate.as_mut(),
        &mut io::stderr(),
        &HarvestOptions::from(&config),
    )
    .await?;

    match outcome {
        HarvestOutcome::Completed { hashed, failed } => {
            info!("{} hashed, {} failed", hashed, failed);
        }
        HarvestOutcome::Aborted { index } => info!("aborted after url {}", index),
    }

    Ok(outcome.exit_status())
}
