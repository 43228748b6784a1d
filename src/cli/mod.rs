//! CLI module for chatstream.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Sending a message and streaming the reply to the terminal
//! - Tracing setup
//!
//! # Usage
//!
//! ```ignore
//! use chatstream::cli::{parse_args, run_cli_command};
//! use chatstream::config::ClientConfig;
//!
//! let command = parse_args(std::env::args());
//! let status = run_cli_command(command, ClientConfig::from_env()).await?;
//! ```

pub mod args;
pub mod logging;
pub mod send;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use logging::init_tracing;
pub use send::{handle_send_command, ReplyPrinter};
pub use version::{version_line, VERSION};

use color_eyre::Result;

use crate::config::ClientConfig;

/// Run a parsed CLI command, returning the process exit status.
///
/// `--allow-writes` on the command line overrides the configured flag.
pub async fn run_cli_command(command: CliCommand, config: ClientConfig) -> Result<u8> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(0)
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(0)
        }
        CliCommand::Invalid(reason) => {
            eprintln!("error: {}\n\n{}", reason, USAGE);
            Ok(2)
        }
        CliCommand::Send {
            conversation_id,
            message,
            allow_writes,
        } => {
            let config = if allow_writes {
                config.with_allow_write_operations(true)
            } else {
                config
            };
            handle_send_command(config, &conversation_id, &message).await
        }
    }
}
