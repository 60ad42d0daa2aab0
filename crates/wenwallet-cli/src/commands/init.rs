//! `wenwallet init`: write a starter config.

use wenwallet_core::config::Config;

use super::{resolve_config_path, Context};

/// Run the `init` subcommand.
pub fn run(ctx: &Context, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_config_path(ctx.config_path.as_ref())?;
    if path.exists() && !force {
        return Err(format!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    let config = Config {
        rpc_url: ctx.rpc_url.clone(),
        journal_path: path.parent().map(|dir| dir.join("notifications.jsonl")),
        ..Config::default()
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, config.to_yaml()?)?;

    println!("✅ Wrote {}", path.display());
    if config.rpc_url.is_none() {
        println!("   Set rpc_url (or WENWALLET_RPC_URL) to your wallet's JSON-RPC endpoint.");
    }
    Ok(())
}
