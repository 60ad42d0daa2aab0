//! Wallet state model shared between the adapter and its front ends.
//!
//! [`WalletState`] is the single observable value the adapter publishes. Every
//! field read from chain is an `Option`: `None` means the read has not
//! succeeded yet in this session, never "not applicable". Fields that only
//! make sense in a particular phase of the game live inside the variant for
//! that phase.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use thiserror::Error;

/// Number of fractional digits shown for token balances.
pub const BALANCE_DISPLAY_DECIMALS: u8 = 4;

/// Connection state of the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WalletState {
    /// No account authorised in this session.
    #[default]
    Disconnected,
    /// Connected; a refresh pass is running. `view` holds the last known
    /// values and is updated section by section as reads complete.
    Loading { account: Address, view: ChainView },
    /// Connected; the last refresh pass finished.
    Loaded { account: Address, view: ChainView },
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            Self::Disconnected => None,
            Self::Loading { account, .. } | Self::Loaded { account, .. } => Some(*account),
        }
    }

    pub fn view(&self) -> Option<&ChainView> {
        match self {
            Self::Disconnected => None,
            Self::Loading { view, .. } | Self::Loaded { view, .. } => Some(view),
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut ChainView> {
        match self {
            Self::Disconnected => None,
            Self::Loading { view, .. } | Self::Loaded { view, .. } => Some(view),
        }
    }

    /// Move a connected state into `Loading`, keeping the current view.
    pub fn begin_loading(&mut self) {
        if let Self::Loaded { account, view } = self {
            *self = Self::Loading {
                account: *account,
                view: std::mem::take(view),
            };
        }
    }

    /// Move a connected state into `Loaded`.
    pub fn finish_loading(&mut self) {
        if let Self::Loading { account, view } = self {
            *self = Self::Loaded {
                account: *account,
                view: std::mem::take(view),
            };
        }
    }
}

/// Everything read from the three contracts for the connected account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainView {
    pub token: TokenBalance,
    pub faucet: FaucetState,
    pub game: GameState,
}

/// Token balance of the connected account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenBalance {
    /// Balance in base units.
    pub raw: Option<U256>,
    pub decimals: Option<u8>,
}

impl TokenBalance {
    /// Balance as a decimal string with four fractional digits.
    pub fn formatted(&self) -> Option<String> {
        Some(format_units(self.raw?, self.decimals?, BALANCE_DISPLAY_DECIMALS))
    }
}

/// Format `raw / 10^decimals` with exactly `precision` fractional digits,
/// rounding half up.
pub fn format_units(raw: U256, decimals: u8, precision: u8) -> String {
    let ten = U256::from(10u8);
    let scale = ten.pow(U256::from(precision));

    // 10^decimals past U256::MAX means the whole part is zero.
    let (mut whole, remainder) = match ten.checked_pow(U256::from(decimals)) {
        Some(unit) => raw.div_rem(unit),
        None => (U256::ZERO, raw),
    };

    // remainder < 10^decimals, so neither branch can overflow.
    let mut fraction = if decimals >= precision {
        match ten.checked_pow(U256::from(decimals - precision)) {
            Some(divisor) => {
                let (quotient, rest) = remainder.div_rem(divisor);
                // rest >= divisor / 2, written without overflow
                if rest >= divisor - rest {
                    quotient + U256::from(1u8)
                } else {
                    quotient
                }
            }
            None => U256::ZERO,
        }
    } else {
        remainder * ten.pow(U256::from(precision - decimals))
    };

    if fraction >= scale {
        whole += U256::from(1u8);
        fraction -= scale;
    }

    if precision == 0 {
        return whole.to_string();
    }
    format!(
        "{whole}.{fraction:0>width$}",
        fraction = fraction.to_string(),
        width = usize::from(precision)
    )
}

/// Faucet parameters plus the connected account's last mint.
///
/// The fields are fetched one after another, not atomically; they may come
/// from different blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaucetState {
    /// Seconds an account must wait between mints.
    pub mint_interval: Option<U256>,
    /// Tokens (base units) handed out per mint.
    pub mint_amount: Option<U256>,
    pub paused: Option<bool>,
    /// Unix timestamp of the account's last mint, 0 if it never minted.
    pub last_minted_at: Option<U256>,
}

impl FaucetState {
    /// Earliest unix timestamp at which the account may mint again.
    pub fn next_mint_at(&self) -> Option<U256> {
        let last = self.last_minted_at?;
        if last.is_zero() {
            return Some(U256::ZERO);
        }
        Some(last.saturating_add(self.mint_interval?))
    }

    /// Whether a mint submitted at `now` (unix seconds) should succeed.
    pub fn can_mint_at(&self, now: u64) -> Option<bool> {
        if self.paused? {
            return Some(false);
        }
        Some(self.next_mint_at()? <= U256::from(now))
    }
}

/// A guessed (or correct) date, as the game contract stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameDate {
    pub date: U256,
    pub month: U256,
    pub year: U256,
}

/// Errors from parsing a [`GameDate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameDateError {
    #[error("expected a date as DD/MM/YYYY, got '{0}'")]
    Format(String),
    #[error("day {0} is out of range 1-31")]
    Day(u64),
    #[error("month {0} is out of range 1-12")]
    Month(u64),
}

impl GameDate {
    pub fn new(date: u64, month: u64, year: u64) -> Result<Self, GameDateError> {
        if !(1..=31).contains(&date) {
            return Err(GameDateError::Day(date));
        }
        if !(1..=12).contains(&month) {
            return Err(GameDateError::Month(month));
        }
        Ok(Self {
            date: U256::from(date),
            month: U256::from(month),
            year: U256::from(year),
        })
    }
}

impl FromStr for GameDate {
    type Err = GameDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(['/', '-', '.']).collect();
        let [date, month, year] = parts.as_slice() else {
            return Err(GameDateError::Format(s.to_string()));
        };
        let parse = |p: &str| {
            p.trim()
                .parse::<u64>()
                .map_err(|_| GameDateError::Format(s.to_string()))
        };
        Self::new(parse(*date)?, parse(*month)?, parse(*year)?)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0>2}/{:0>2}/{}", self.date.to_string(), self.month.to_string(), self.year)
    }
}

/// Public game state plus the connected account's entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub name: Option<String>,
    /// Block timestamp the game started at.
    pub start_date: Option<U256>,
    /// Tokens (base units) charged per guess.
    pub participation_fee: Option<U256>,
    /// `None` until `s_gameEnded` has been read.
    pub stage: Option<GameStage>,
    pub player: PlayerEntry,
}

impl GameState {
    pub fn has_ended(&self) -> Option<bool> {
        self.stage.as_ref().map(GameStage::is_ended)
    }

    /// Whether `claim()` is expected to pay out for the connected account.
    pub fn can_claim(&self) -> bool {
        let Some(GameStage::Ended(outcome)) = &self.stage else {
            return false;
        };
        outcome.there_is_a_winner == Some(true)
            && self.player.participated == Some(true)
            && self.player.paid == Some(false)
            && self.player.guess.is_some()
            && self.player.guess == outcome.correct_answer
    }
}

/// Phase of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStage {
    /// Guesses are being accepted.
    Running,
    Ended(GameOutcome),
}

impl GameStage {
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameOutcome {
    /// Block timestamp the game was ended at.
    pub end_date: Option<U256>,
    pub correct_answer: Option<GameDate>,
    pub there_is_a_winner: Option<bool>,
    /// Payout per winning participant.
    pub individual_reward: Option<U256>,
}

/// The connected account's participation in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerEntry {
    pub guess: Option<GameDate>,
    pub participated: Option<bool>,
    pub paid: Option<bool>,
}
