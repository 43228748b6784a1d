//! Command-line argument parsing for the chatstream CLI.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Usage text printed for `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: chatstream [OPTIONS] <CONVERSATION_ID> <MESSAGE>...

Options:
  -w, --allow-writes   Let the assistant perform write operations
  -V, --version        Print version
  -h, --help           Print help

Environment:
  CHATSTREAM_BASE_URL, CHATSTREAM_TOKEN, CHATSTREAM_ALLOW_WRITES,
  CHATSTREAM_TIMEOUT_SECS, RUST_LOG";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send one message and stream the reply to stdout
    Send {
        conversation_id: String,
        message: String,
        /// `--allow-writes` given on the command line
        allow_writes: bool,
    },
    /// Arguments could not be understood
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use chatstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["chatstream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut allow_writes = false;
    let mut positional = Vec::new();
    let mut only_positional = false;

    // Skip the program name
    for arg in args.skip(1) {
        if only_positional {
            positional.push(arg);
            continue;
        }
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--allow-writes" | "-w" => allow_writes = true,
            "--" => only_positional = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return CliCommand::Invalid(format!("unknown option '{}'", flag));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(conversation_id) = positional.next() else {
        return CliCommand::Help;
    };
    let message = positional.collect::<Vec<_>>().join(" ");
    if message.trim().is_empty() {
        return CliCommand::Invalid("missing message".to_string());
    }

    CliCommand::Send {
        conversation_id,
        message,
        allow_writes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["chatstream".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args_shows_help() {
        assert_eq!(parse(&[]), CliCommand::Help);
    }

    #[test]
    fn test_parse_send_joins_message_words() {
        assert_eq!(
            parse(&["c1", "Hello", "there"]),
            CliCommand::Send {
                conversation_id: "c1".to_string(),
                message: "Hello there".to_string(),
                allow_writes: false,
            }
        );
    }

    #[test]
    fn test_parse_allow_writes_anywhere() {
        assert_eq!(
            parse(&["c1", "-w", "Fix it"]),
            CliCommand::Send {
                conversation_id: "c1".to_string(),
                message: "Fix it".to_string(),
                allow_writes: true,
            }
        );
    }

    #[test]
    fn test_parse_double_dash_passes_flags_through() {
        assert_eq!(
            parse(&["c1", "--", "-V", "means", "version"]),
            CliCommand::Send {
                conversation_id: "c1".to_string(),
                message: "-V means version".to_string(),
                allow_writes: false,
            }
        );
    }

    #[test]
    fn test_parse_missing_message() {
        assert_eq!(
            parse(&["c1"]),
            CliCommand::Invalid("missing message".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("unknown option '--unknown'".to_string())
        );
    }
}
