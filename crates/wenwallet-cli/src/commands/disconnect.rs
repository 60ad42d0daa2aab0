//! `wenwallet disconnect`: drop the connection.

use super::{load_config, open_connection, Context};

/// Run the `disconnect` subcommand. Nothing is stored between runs, so this
/// only reminds the user to revoke the permission in the wallet itself.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(ctx)?;
    let conn = open_connection(&config)?;
    conn.disconnect().await;
    Ok(())
}
