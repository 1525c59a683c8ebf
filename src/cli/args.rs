//! Command-line argument parsing for the secops CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Query the backend health endpoint
    Health,
    /// Sign in and persist the session
    Login { username: String, password: String },
    /// Show the signed-in user
    WhoAmI,
    /// Sign out and forget the stored session
    Logout,
    /// Stream realtime events for the given channels
    Listen { channels: Vec<String> },
    /// Print usage text
    Usage,
}

/// Parse command-line arguments and return the appropriate command.
///
/// The first item is the program name and is skipped. Flags win over
/// subcommands wherever they appear.
///
/// # Examples
///
/// ```
/// use secops::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["secops".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();

    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        return CliCommand::Version;
    }

    let Some((command, rest)) = args.split_first() else {
        return CliCommand::Usage;
    };

    match (command.as_str(), rest) {
        ("health", []) => CliCommand::Health,
        ("login", [username, password]) => CliCommand::Login {
            username: username.clone(),
            password: password.clone(),
        },
        ("whoami", []) => CliCommand::WhoAmI,
        ("logout", []) => CliCommand::Logout,
        ("listen", channels) if !channels.is_empty() => CliCommand::Listen {
            channels: channels.to_vec(),
        },
        _ => CliCommand::Usage,
    }
}

/// Usage text printed for unknown or malformed commands.
pub const USAGE: &str = "\
Usage: secops <command>

Commands:
  health                         Check backend health
  login <username> <password>    Sign in and store the session
  whoami                         Show the signed-in user
  logout                         Sign out
  listen <channel>...            Print realtime events until Ctrl+C

Options:
  -V, --version                  Print version

Environment:
  SECOPS_API_BASE_URL            REST API base URL
  SECOPS_WS_URL                  WebSocket base URL
  SECOPS_SESSION_FILE            Session file location
  RUST_LOG                       Log filter (default: info)";
