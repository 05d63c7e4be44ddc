//! The per-URL orchestration loop
//!
//! Logs in when a root is configured, asks the navigator for URLs, digests them
//! one after another and hands each hash to the output. A failed download goes
//! to the output as well and the loop moves on, unless failing early, in which
//! case the consent gate decides whether to stop.

use std::io::Write;

use tracing::{info, warn};

use crate::config::{CONSENT_TIMEOUT, RunConfig, UNKNOWN_VERSION};
use crate::digest::reader::DigestReader;
use crate::error::HarvestError;
use crate::gate::{ABORT_PROMPT, ConsentGate};
use crate::navigation::form::FormDescriptor;
use crate::navigation::navigator::Navigator;
use crate::output::traits::Output;
use crate::session::Credentials;
use crate::version::extract::VersionInfo;

#[derive(Debug, Clone, Default)]
pub struct HarvestOptions {
    pub root: Option<String>,
    pub credentials: Option<Credentials>,
    pub form: Option<FormDescriptor>,
    pub verbosity: u8,
    pub fail_early: bool,
}

impl From<&RunConfig> for HarvestOptions {
    fn from(config: &RunConfig) -> Self {
        Self {
            root: config.root.clone(),
            credentials: config.credentials.clone(),
            form: config.form.clone(),
            verbosity: config.verbosity,
            fail_early: config.fail_early,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestOutcome {
    Completed { hashed: usize, failed: usize },
    /// Stopped after the failure of URL `index` (1-based)
    Aborted { index: usize },
}

impl HarvestOutcome {
    pub fn exit_status(&self) -> u8 {
        match self {
            HarvestOutcome::Completed { .. } => 0,
            HarvestOutcome::Aborted { .. } => 1,
        }
    }
}

/// Runs one harvest; the abort notice goes to `report`.
pub async fn harvest<W: Write>(
    navigator: &mut dyn Navigator,
    reader: &DigestReader,
    output: &mut dyn Output,
    gate: &mut dyn ConsentGate,
    report: &mut W,
    options: &HarvestOptions,
) -> Result<HarvestOutcome, HarvestError> {
    if let Some(root) = &options.root {
        info!("logging in to {}", root);
        navigator
            .login_with_form(
                root,
                options.credentials.clone(),
                options.form.clone(),
                options.verbosity,
            )
            .await?;
    }

    let urls = navigator.get_urls(true).await?;
    let total = urls.len();
    let max_url_length = urls.iter().map(|url| url.chars().count()).max().unwrap_or(0);
    info!("{} urls found by the {} navigator", total, navigator.name());

    let unmatched = navigator.unmatched_urls();
    if !unmatched.is_empty() {
        warn!(
            "{} of {} urls have no version and are reported as {}",
            unmatched.len(),
            total,
            UNKNOWN_VERSION
        );
    }

    let mut versions = VersionInfo::new();
    let mut failed = 0;

    for (position, url) in urls.iter().enumerate() {
        let index = position + 1;
        let label = format!("{index:>3}/{total:<3}");

        match reader.digest_url(navigator.session(), url, &label).await {
            Ok(result) => {
                output.display_hash(url, &result.hex, max_url_length, index, total, result.algorithm)?;
                versions.insert(url.clone(), navigator.get_version_info(url));
            }
            Err(failure) => {
                failed += 1;
                output.display_failure(url, &failure.to_string(), max_url_length, index, total)?;

                if options.fail_early && gate.confirm(ABORT_PROMPT, CONSENT_TIMEOUT) {
                    writeln!(report, "exiting...")?;
                    report.flush()?;
                    return Ok(HarvestOutcome::Aborted { index });
                }
            }
        }
    }

    let package = navigator.get_package_info();
    output.finish(package.as_ref(), &versions)?;

    Ok(HarvestOutcome::Completed {
        hashed: total - failed,
        failed,
    })
}
