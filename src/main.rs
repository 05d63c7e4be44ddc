use std::process::ExitCode;

use anyhow::Context;

use checksum_url::app;
use checksum_url::cli::Cli;
use checksum_url::logging;
use checksum_url::registry::Registry;

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("exiting...");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    let registry = Registry::with_defaults();
    let cli = Cli::parse_with_registry(&registry);
    logging::init(cli.verbose);

    let status = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?
        .block_on(app::run(&cli, &registry))?;

    Ok(ExitCode::from(status))
}
