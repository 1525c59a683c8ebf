use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use secops::adapters::{ConsoleNavigator, FileSessionStore, TungsteniteConnector};
use secops::cli::{parse_args, run_cli_command, CliCommand, CliContext, version_line};
use secops::{ApiClient, AuthFlow, ClientConfig, RealtimeClient, SessionManager};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_context(config: &ClientConfig) -> Result<CliContext> {
    let store = match &config.session_file {
        Some(path) => FileSessionStore::new(path.clone()),
        None => FileSessionStore::at_default_location()
            .ok_or_else(|| eyre!("Cannot locate a home directory; set SECOPS_SESSION_FILE"))?,
    };
    let session = SessionManager::new(Arc::new(store));

    let navigator = Arc::new(ConsoleNavigator::new());
    let client = ApiClient::from_config(config, session.clone(), navigator)?;
    let realtime = RealtimeClient::new(config, session, Arc::new(TungsteniteConnector::new()));

    Ok(CliContext {
        auth: AuthFlow::new(client),
        realtime,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = parse_args(std::env::args());

    // Handle --version before any setup
    if command == CliCommand::Version {
        println!("{}", version_line());
        return Ok(());
    }

    color_eyre::install()?;
    init_tracing();

    let config = ClientConfig::from_env();
    let context = build_context(&config)?;
    run_cli_command(command, &context).await
}
