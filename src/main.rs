use chatstream::cli::{init_tracing, parse_args, run_cli_command};
use chatstream::config::ClientConfig;

use color_eyre::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args());
    let config = ClientConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "Loaded configuration");

    let status = run_cli_command(command, config).await?;
    Ok(ExitCode::from(status))
}
