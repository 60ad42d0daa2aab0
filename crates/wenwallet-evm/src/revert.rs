//! Human-readable failure descriptions.
//!
//! The game and faucet revert with custom errors; these are decoded from the
//! revert data so the failure toast can say what actually went wrong.

use alloy::sol_types::SolError;

use crate::abi::{
    IltmuelcAlreadyPaid, IltmuelcAlreadyParticipated, IltmuelcGameEnded, IltmuelcGameHasNotEnded,
    IltmuelcInsufficientFunds, IltmuelcMintIntervalNotMet, IltmuelcNonWinnerClaim,
    IltmuelcNotParticipated,
};
use crate::provider::ProviderError;

/// Fallback description when nothing more specific is known.
pub const GENERIC_FAILURE: &str = "Error processing your transaction. Try again later";

const REASONS: [([u8; 4], &str); 8] = [
    (IltmuelcAlreadyPaid::SELECTOR, "Your reward has already been paid out"),
    (IltmuelcAlreadyParticipated::SELECTOR, "You have already submitted a guess"),
    (IltmuelcGameEnded::SELECTOR, "The game has already ended"),
    (IltmuelcGameHasNotEnded::SELECTOR, "The game has not ended yet"),
    (IltmuelcInsufficientFunds::SELECTOR, "Not enough tokens to cover the participation fee"),
    (IltmuelcMintIntervalNotMet::SELECTOR, "The faucet mint interval has not passed yet"),
    (IltmuelcNonWinnerClaim::SELECTOR, "Only winners can claim rewards"),
    (IltmuelcNotParticipated::SELECTOR, "You did not participate in this game"),
];

/// Map revert data to a description, if it is one of the known custom errors.
pub fn decode_revert(data: &[u8]) -> Option<&'static str> {
    let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
    REASONS
        .iter()
        .find(|(known, _)| *known == selector)
        .map(|(_, reason)| *reason)
}

/// Description shown to the user for a failed wallet request.
pub fn describe_failure(err: &ProviderError) -> &'static str {
    match err {
        ProviderError::Rejected => "Request rejected in wallet",
        ProviderError::Reverted(data) => decode_revert(data).unwrap_or(GENERIC_FAILURE),
        ProviderError::NoAccounts => "The wallet did not share any account",
        _ => GENERIC_FAILURE,
    }
}
