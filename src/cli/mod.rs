//! CLI module for secops.
//!
//! This module provides the command-line front end:
//! - Argument parsing
//! - Version display
//! - Command runners on top of [`AuthFlow`] and [`RealtimeClient`]
//!
//! # Usage
//!
//! ```ignore
//! use secops::cli::{parse_args, run_cli_command, CliContext};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command, &context).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::{token, AuthFlow, UserProfile};
use crate::error::RealtimeError;
use crate::realtime::{envelope, ConnectionState, RealtimeClient};

/// Everything a command needs, built once in `main`.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub auth: AuthFlow,
    pub realtime: RealtimeClient,
}

/// Run a parsed CLI command to completion.
pub async fn run_cli_command(command: CliCommand, ctx: &CliContext) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Usage => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Health => handle_health(ctx).await,
        CliCommand::Login { username, password } => handle_login(ctx, &username, &password).await,
        CliCommand::WhoAmI => handle_whoami(ctx).await,
        CliCommand::Logout => handle_logout(ctx).await,
        CliCommand::Listen { channels } => handle_listen(ctx, &channels).await,
    }
}

async fn handle_health(ctx: &CliContext) -> Result<()> {
    let health = ctx
        .auth
        .client()
        .health()
        .check()
        .await
        .wrap_err("Health check failed")?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    if !health.is_healthy() {
        warn!(status = %health.status, "Backend reports a non-healthy status");
    }
    Ok(())
}

async fn handle_login(ctx: &CliContext, username: &str, password: &str) -> Result<()> {
    let user = ctx
        .auth
        .sign_in(username, password)
        .await
        .wrap_err("Login failed")?;
    println!("Signed in as {}", user.display_name());
    Ok(())
}

async fn handle_whoami(ctx: &CliContext) -> Result<()> {
    match ctx.auth.restore().await? {
        Some(user) => {
            let expiry = ctx
                .auth
                .client()
                .session()
                .token()
                .await?
                .as_deref()
                .and_then(token::expires_at);
            println!("{}", describe_user(&user, expiry));
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

async fn handle_logout(ctx: &CliContext) -> Result<()> {
    ctx.auth.sign_out().await?;
    println!("Signed out");
    Ok(())
}

async fn handle_listen(ctx: &CliContext, channels: &[String]) -> Result<()> {
    let realtime = &ctx.realtime;
    for message_type in [envelope::UPDATE, envelope::MESSAGE] {
        realtime.on(message_type, move |payload: &Value| {
            println!("[{}] {}", message_type, payload);
        });
    }

    let resubscriber = spawn_resubscriber(realtime, channels.to_vec());

    match realtime.connect().await {
        Ok(()) => {}
        Err(RealtimeError::MissingCredentials) => {
            resubscriber.abort();
            bail!("Not signed in; run `secops login` first")
        }
        // A failed open already scheduled a reconnect.
        Err(e) => warn!("Initial connection failed [{}]: {}", e.error_code(), e),
    }

    info!("Listening on {}; press Ctrl+C to stop", channels.join(", "));
    let stopped = tokio::signal::ctrl_c().await;

    resubscriber.abort();
    realtime.disconnect();
    stopped.wrap_err("Failed to wait for Ctrl+C")
}

/// Send `subscribe` for every channel each time the socket comes up.
///
/// The realtime client keeps no channel registry, so subscriptions are
/// replayed here after the first open and after every reconnect.
pub fn spawn_resubscriber(realtime: &RealtimeClient, channels: Vec<String>) -> JoinHandle<()> {
    let realtime = realtime.clone();
    let mut state = realtime.state();
    tokio::spawn(async move {
        loop {
            let connected = *state.borrow_and_update() == ConnectionState::Connected;
            if connected {
                for channel in &channels {
                    match realtime.subscribe(channel) {
                        Ok(()) => debug!(channel = %channel, "Subscribed"),
                        Err(e) => warn!(channel = %channel, "Subscribe failed: {}", e),
                    }
                }
            }
            if state.changed().await.is_err() {
                break;
            }
        }
    })
}

/// One-line summary of the signed-in user for `whoami`.
fn describe_user(user: &UserProfile, expires_at: Option<i64>) -> String {
    let mut line = user.display_name().to_string();
    if let Some(username) = user.username.as_deref().filter(|u| *u != user.display_name()) {
        line.push_str(&format!(" ({})", username));
    }
    if let Some(role) = user.role.as_deref() {
        line.push_str(&format!(", role {}", role));
    }
    if user.is_admin() {
        line.push_str(", admin");
    }
    match expires_at.and_then(|exp| chrono::DateTime::from_timestamp(exp, 0)) {
        Some(at) => line.push_str(&format!(", token expires {}", at.format("%Y-%m-%d %H:%M UTC"))),
        None => line.push_str(", token expiry unknown"),
    }
    line
}
