//! CLI subcommand implementations.

use std::path::PathBuf;
use std::sync::Arc;

use wenwallet_core::config::Config;
use wenwallet_core::journal::NotificationJournal;
use wenwallet_evm::provider::WalletProvider;
use wenwallet_evm::{RpcWalletProvider, WalletConnection};

use crate::terminal::TerminalNotifier;

pub mod action;
pub mod disconnect;
pub mod init;
pub mod status;

/// Global flags shared by every subcommand.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub rpc_url: Option<String>,
}

pub(crate) fn resolve_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("could not determine home directory")?;
    Ok(home.join(".wenwallet"))
}

/// Resolve the config path (default: ~/.wenwallet/config.yaml).
pub(crate) fn resolve_config_path(
    config: Option<&PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = config {
        return Ok(path.clone());
    }
    Ok(resolve_data_dir()?.join("config.yaml"))
}

/// Load the config file, falling back to defaults when it does not exist,
/// then apply the `--rpc-url` override.
pub(crate) fn load_config(ctx: &Context) -> Result<Config, Box<dyn std::error::Error>> {
    let path = resolve_config_path(ctx.config_path.as_ref())?;
    let mut config = if path.exists() {
        tracing::info!("loading config from {}", path.display());
        Config::from_file(&path)?
    } else {
        tracing::debug!("no config at {}, using defaults", path.display());
        Config::default()
    };

    if let Some(url) = &ctx.rpc_url {
        config.rpc_url = Some(url.clone());
    }
    Ok(config)
}

/// Build the adapter from config. Without an RPC URL there is no wallet.
pub(crate) fn open_connection(
    config: &Config,
) -> Result<WalletConnection, Box<dyn std::error::Error>> {
    let provider = match &config.rpc_url {
        Some(url) => {
            let rpc = RpcWalletProvider::new(url)?.with_receipt_polling(config.receipt_poll);
            Some(Arc::new(rpc) as Arc<dyn WalletProvider>)
        }
        None => None,
    };

    let journal = match &config.journal_path {
        Some(path) => Some(NotificationJournal::open(path)?),
        None => None,
    };

    Ok(WalletConnection::new(
        provider,
        Arc::new(TerminalNotifier::new(journal)),
        config.deployment(),
    ))
}

/// Load config and connect, failing when the wallet could not be connected.
pub(crate) async fn connect(ctx: &Context) -> Result<WalletConnection, Box<dyn std::error::Error>> {
    let config = load_config(ctx)?;
    let conn = open_connection(&config)?;
    let report = conn.connect().await?;
    if !report.is_complete() {
        tracing::warn!(
            failed = report.failures.len(),
            "some state could not be read"
        );
    }
    Ok(conn)
}
