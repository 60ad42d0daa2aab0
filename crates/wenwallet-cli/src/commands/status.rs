//! `wenwallet status`: connect and print everything the adapter knows.

use alloy::primitives::U256;
use chrono::{DateTime, Utc};

use wenwallet_core::types::{format_units, ChainView, GameStage, BALANCE_DISPLAY_DECIMALS};

use super::{connect, Context};

/// Run the `status` subcommand.
pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let conn = connect(ctx).await?;
    let state = conn.state();
    let (Some(account), Some(view)) = (state.account(), state.view()) else {
        println!("Status: disconnected");
        return Ok(());
    };

    println!("Status: connected");
    println!("Chain: {}", conn.deployment().chain);
    println!("Account: {account}");
    print_view(view);
    Ok(())
}

fn print_view(view: &ChainView) {
    let decimals = view.token.decimals;
    let amount = |raw: Option<U256>| match (raw, decimals) {
        (Some(raw), Some(d)) => format_units(raw, d, BALANCE_DISPLAY_DECIMALS),
        _ => "-".to_string(),
    };

    println!();
    println!("Balance: {}", view.token.formatted().unwrap_or_else(|| "-".into()));

    let faucet = &view.faucet;
    println!();
    println!("Faucet");
    println!("  Mint amount: {}", amount(faucet.mint_amount));
    println!("  Paused: {}", show(faucet.paused));
    println!("  Last minted: {}", timestamp(faucet.last_minted_at));
    println!("  Next mint: {}", timestamp(faucet.next_mint_at()));
    if let Some(ready) = faucet.can_mint_at(Utc::now().timestamp().max(0) as u64) {
        println!("  Can mint now: {ready}");
    }

    let game = &view.game;
    println!();
    println!("Game: {}", game.name.as_deref().unwrap_or("-"));
    println!("  Started: {}", timestamp(game.start_date));
    println!("  Participation fee: {}", amount(game.participation_fee));
    match &game.stage {
        None => println!("  Stage: -"),
        Some(GameStage::Running) => println!("  Stage: running"),
        Some(GameStage::Ended(outcome)) => {
            println!("  Stage: ended {}", timestamp(outcome.end_date));
            println!("  Correct answer: {}", show(outcome.correct_answer));
            println!("  There is a winner: {}", show(outcome.there_is_a_winner));
            println!("  Reward per winner: {}", amount(outcome.individual_reward));
        }
    }

    let player = &game.player;
    println!("  Participated: {}", show(player.participated));
    if player.participated == Some(true) {
        println!("  Your guess: {}", show(player.guess));
        println!("  Paid out: {}", show(player.paid));
    }
    if game.can_claim() {
        println!();
        println!("🎉 You guessed right. Run `wenwallet claim` to collect your reward.");
    }
}

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn timestamp(secs: Option<U256>) -> String {
    secs.and_then(|s| i64::try_from(s).ok())
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
