//! `wenwallet mint`, `play` and `claim`: the state-changing actions.

use wenwallet_core::types::GameDate;
use wenwallet_evm::ActionReceipt;

use super::{connect, Context};

/// Run the `mint` subcommand.
pub async fn mint(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let conn = connect(ctx).await?;
    let receipt = conn.mint_tokens_from_faucet().await?;
    print_receipt(&receipt);
    if let Some(balance) = conn.state().view().and_then(|v| v.token.formatted()) {
        println!("Balance: {balance}");
    }
    Ok(())
}

/// Run the `play` subcommand.
pub async fn play(ctx: &Context, guess: GameDate) -> Result<(), Box<dyn std::error::Error>> {
    let conn = connect(ctx).await?;
    let receipt = conn.play_wen_game(guess).await?;
    print_receipt(&receipt);
    println!("Guessed {guess}");
    Ok(())
}

/// Run the `claim` subcommand.
pub async fn claim(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let conn = connect(ctx).await?;
    let receipt = conn.claim_rewards().await?;
    print_receipt(&receipt);
    Ok(())
}

fn print_receipt(receipt: &ActionReceipt) {
    for hash in &receipt.tx_hashes {
        println!("{}: {hash}", receipt.action);
    }
    if !receipt.refresh.is_complete() {
        println!(
            "⚠️  {} read(s) failed while refreshing; run `wenwallet status` to retry.",
            receipt.refresh.failures.len()
        );
    }
}
