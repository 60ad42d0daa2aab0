//! Wallet connection adapter.
//!
//! [`WalletConnection`] owns the observable [`WalletState`] and mediates every
//! read and write against the token, faucet and game contracts. Front ends
//! call its methods and watch the state through [`WalletConnection::subscribe`].
//!
//! Writes never surface as panics or unhandled errors: each one ends in a
//! notification, and a successful write is followed by a full re-read of
//! chain state instead of an optimistic local update.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, B256};
use alloy::sol_types::SolCall;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use wenwallet_core::config::Deployment;
use wenwallet_core::notify::Notifier;
use wenwallet_core::types::{ChainView, GameDate, GameOutcome, GameStage, WalletState};

use crate::abi::{IFaucet, IWenGame, IERC20};
use crate::contracts::{read_contract, write_contract};
use crate::provider::{ProviderError, WalletProvider};
use crate::revert::describe_failure;

const WALLET_MISSING_TITLE: &str = "Browser wallet not found!";
const WALLET_MISSING_DESCRIPTION: &str = "Please install a browser wallet to continue.";
const CONNECT_FAILED_TITLE: &str = "Could not connect wallet";
const DISCONNECT_TITLE: &str = "Disconnect from wallet to revoke permissions!";
const DISCONNECT_DESCRIPTION: &str =
    "Revoking permissions from wallet after use is a good security practice.";
const TX_SUCCEEDED_TITLE: &str = "Transaction succeeded";
const TX_FAILED_TITLE: &str = "Transaction failed";

const SWITCH_CHAIN: &str = "wallet_switchEthereumChain";

/// Why an adapter operation did not go through.
///
/// By the time a caller sees one of these the user has already been told
/// (where the operation notifies at all); the value is for programmatic use.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no wallet provider available")]
    ProviderMissing,
    #[error("wallet is not connected")]
    NotConnected,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A state-changing action the user can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Claim,
    Mint,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Play => "play",
            Self::Claim => "claim",
            Self::Mint => "mint",
        })
    }
}

/// Which read sequence a read belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Token,
    Faucet,
    Game,
}

/// A single read that failed during a refresh.
#[derive(Debug, Clone)]
pub struct ReadFailure {
    pub section: Section,
    /// Solidity signature of the failed call, or the RPC method name.
    pub function: &'static str,
    pub error: ProviderError,
}

/// Outcome of one or more read sequences.
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    /// Contract reads attempted.
    pub reads: usize,
    pub failures: Vec<ReadFailure>,
}

impl RefreshReport {
    /// True when every attempted read succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: RefreshReport) {
        self.reads += other.reads;
        self.failures.extend(other.failures);
    }

    fn record(&mut self, section: Section, function: &'static str, error: ProviderError) {
        warn!(?section, function, %error, "read failed");
        self.failures.push(ReadFailure {
            section,
            function,
            error,
        });
    }
}

/// Result of a successful write action.
#[derive(Debug, Clone)]
pub struct ActionReceipt {
    pub action: Action,
    /// Every transaction submitted, in order (an approval precedes `play`).
    pub tx_hashes: Vec<B256>,
    /// The re-read of chain state that followed.
    pub refresh: RefreshReport,
}

/// Connects a wallet and keeps the observable state in sync with chain.
pub struct WalletConnection {
    provider: Option<Arc<dyn WalletProvider>>,
    notifier: Arc<dyn Notifier>,
    deployment: Deployment,
    state: watch::Sender<WalletState>,
    /// Held for the whole of every state-mutating operation.
    op_guard: Mutex<()>,
}

impl fmt::Debug for WalletConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConnection")
            .field("has_provider", &self.provider.is_some())
            .field("deployment", &self.deployment)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl WalletConnection {
    /// `provider` is `None` when no wallet is available at all.
    pub fn new(
        provider: Option<Arc<dyn WalletProvider>>,
        notifier: Arc<dyn Notifier>,
        deployment: Deployment,
    ) -> Self {
        let (state, _) = watch::channel(WalletState::Disconnected);
        Self {
            provider,
            notifier,
            deployment,
            state,
            op_guard: Mutex::new(()),
        }
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current state.
    pub fn state(&self) -> WalletState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<WalletState> {
        self.state.subscribe()
    }

    /// Request account access (once) and load all state.
    ///
    /// Without a provider this notifies the user and makes no wallet call.
    /// When an account is already held no new request is made, but state is
    /// re-read.
    pub async fn connect(&self) -> Result<RefreshReport, ActionError> {
        let _guard = self.op_guard.lock().await;

        let Some(provider) = self.provider.clone() else {
            warn!("connect requested but no wallet provider is available");
            self.notifier
                .error(WALLET_MISSING_TITLE, WALLET_MISSING_DESCRIPTION);
            return Err(ActionError::ProviderMissing);
        };

        let held = self.current_account();
        let account = match held {
            Some(account) => account,
            None => match request_account(provider.as_ref()).await {
                Ok(account) => account,
                Err(e) => {
                    warn!(error = %e, "account request failed");
                    self.notifier
                        .error(CONNECT_FAILED_TITLE, describe_failure(&e));
                    return Err(e.into());
                }
            },
        };

        Ok(self.enter_connected(provider.as_ref(), account).await)
    }

    /// Pick up an authorisation granted in an earlier session, without
    /// prompting. Returns `None` when the wallet has nothing authorised.
    pub async fn resume(&self) -> Result<Option<RefreshReport>, ActionError> {
        let _guard = self.op_guard.lock().await;

        let provider = self.provider.clone().ok_or(ActionError::ProviderMissing)?;
        let held = self.current_account();
        let account = match held {
            Some(account) => account,
            None => match provider.accounts().await?.into_iter().next() {
                Some(account) => account,
                None => {
                    debug!("wallet has no previously authorised account");
                    return Ok(None);
                }
            },
        };

        Ok(Some(self.enter_connected(provider.as_ref(), account).await))
    }

    /// Forget the account locally. The wallet keeps its authorisation; the
    /// notification tells the user to revoke it there.
    pub async fn disconnect(&self) {
        let _guard = self.op_guard.lock().await;
        self.state.send_replace(WalletState::Disconnected);
        info!("wallet disconnected");
        self.notifier.info(DISCONNECT_TITLE, DISCONNECT_DESCRIPTION);
    }

    /// Re-read token, faucet and game state.
    pub async fn refresh(&self) -> Result<RefreshReport, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        Ok(self.refresh_all(provider.as_ref(), account).await)
    }

    /// Re-read the connected account's token balance.
    pub async fn read_token_balance(&self) -> Result<RefreshReport, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        Ok(self.load_token(provider.as_ref(), account).await)
    }

    /// Re-read the faucet parameters and the account's last mint.
    pub async fn read_faucet_conditions(&self) -> Result<RefreshReport, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        Ok(self.load_faucet(provider.as_ref(), account).await)
    }

    /// Re-read the game state and the account's entry.
    pub async fn read_game_conditions(&self) -> Result<RefreshReport, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        Ok(self.load_game(provider.as_ref(), account).await)
    }

    /// Submit a guess. Approves the participation fee first when the game's
    /// allowance does not cover it.
    pub async fn play_wen_game(&self, guess: GameDate) -> Result<ActionReceipt, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        let result = self.play(provider.as_ref(), account, guess).await;
        self.complete(Action::Play, provider.as_ref(), account, result)
            .await
    }

    /// Claim the winner's reward.
    pub async fn claim_rewards(&self) -> Result<ActionReceipt, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        let game = self.deployment.contracts.game;
        let result = self
            .submit(provider.as_ref(), account, game, IWenGame::claimCall {})
            .await
            .map(|hash| vec![hash]);
        self.complete(Action::Claim, provider.as_ref(), account, result)
            .await
    }

    /// Mint tokens from the faucet.
    pub async fn mint_tokens_from_faucet(&self) -> Result<ActionReceipt, ActionError> {
        let _guard = self.op_guard.lock().await;
        let (provider, account) = self.session()?;
        let faucet = self.deployment.contracts.faucet;
        let result = self
            .submit(provider.as_ref(), account, faucet, IFaucet::mintCall {})
            .await
            .map(|hash| vec![hash]);
        self.complete(Action::Mint, provider.as_ref(), account, result)
            .await
    }

    // ---- internals; callers hold `op_guard` ----

    fn current_account(&self) -> Option<Address> {
        self.state.borrow().account()
    }

    fn session(&self) -> Result<(Arc<dyn WalletProvider>, Address), ActionError> {
        let provider = self.provider.clone().ok_or(ActionError::ProviderMissing)?;
        let account = self.current_account().ok_or(ActionError::NotConnected)?;
        Ok((provider, account))
    }

    async fn enter_connected(&self, provider: &dyn WalletProvider, account: Address) -> RefreshReport {
        info!(%account, "wallet connected");
        self.state.send_if_modified(|state| {
            if state.account() == Some(account) {
                return false;
            }
            *state = WalletState::Loading {
                account,
                view: ChainView::default(),
            };
            true
        });
        self.refresh_all(provider, account).await
    }

    fn update(&self, f: impl FnOnce(&mut ChainView)) {
        self.state.send_modify(|state| {
            if let Some(view) = state.view_mut() {
                f(view);
            }
        });
    }

    fn update_outcome(&self, f: impl FnOnce(&mut GameOutcome)) {
        self.update(|view| {
            if let Some(GameStage::Ended(outcome)) = &mut view.game.stage {
                f(outcome);
            }
        });
    }

    async fn refresh_all(&self, provider: &dyn WalletProvider, account: Address) -> RefreshReport {
        self.state.send_modify(WalletState::begin_loading);

        let mut report = self.load_token(provider, account).await;
        report.merge(self.load_faucet(provider, account).await);
        report.merge(self.load_game(provider, account).await);

        self.state.send_modify(WalletState::finish_loading);
        if report.is_complete() {
            debug!(reads = report.reads, "state refreshed");
        } else {
            warn!(
                reads = report.reads,
                failed = report.failures.len(),
                "state refreshed with failed reads"
            );
        }
        report
    }

    async fn switch_chain(
        &self,
        provider: &dyn WalletProvider,
        section: Section,
        report: &mut RefreshReport,
    ) -> bool {
        match provider.switch_chain(self.deployment.chain).await {
            Ok(()) => true,
            Err(e) => {
                report.record(section, SWITCH_CHAIN, e);
                false
            }
        }
    }

    /// One isolated read: a failure is recorded and yields `None`.
    async fn probe<C>(
        &self,
        provider: &dyn WalletProvider,
        section: Section,
        contract: Address,
        call: C,
        report: &mut RefreshReport,
    ) -> Option<C::Return>
    where
        C: SolCall + Send,
    {
        report.reads += 1;
        match read_contract(provider, contract, call).await {
            Ok(value) => {
                debug!(?section, function = C::SIGNATURE, "read ok");
                Some(value)
            }
            Err(e) => {
                report.record(section, C::SIGNATURE, e);
                None
            }
        }
    }

    async fn load_token(&self, provider: &dyn WalletProvider, account: Address) -> RefreshReport {
        let mut report = RefreshReport::default();
        if !self.switch_chain(provider, Section::Token, &mut report).await {
            return report;
        }
        let token = self.deployment.contracts.token;
        let s = Section::Token;

        let call = IERC20::balanceOfCall { owner: account };
        if let Some(raw) = self.probe(provider, s, token, call, &mut report).await {
            self.update(|v| v.token.raw = Some(raw));
        }
        let call = IERC20::decimalsCall {};
        if let Some(decimals) = self.probe(provider, s, token, call, &mut report).await {
            self.update(|v| v.token.decimals = Some(decimals));
        }
        report
    }

    async fn load_faucet(&self, provider: &dyn WalletProvider, account: Address) -> RefreshReport {
        let mut report = RefreshReport::default();
        if !self.switch_chain(provider, Section::Faucet, &mut report).await {
            return report;
        }
        let faucet = self.deployment.contracts.faucet;
        let s = Section::Faucet;

        let call = IFaucet::s_mintIntervalCall {};
        if let Some(interval) = self.probe(provider, s, faucet, call, &mut report).await {
            self.update(|v| v.faucet.mint_interval = Some(interval));
        }
        let call = IFaucet::s_mintAmountCall {};
        if let Some(amount) = self.probe(provider, s, faucet, call, &mut report).await {
            self.update(|v| v.faucet.mint_amount = Some(amount));
        }
        let call = IFaucet::pausedCall {};
        if let Some(paused) = self.probe(provider, s, faucet, call, &mut report).await {
            self.update(|v| v.faucet.paused = Some(paused));
        }
        let call = IFaucet::s_lastMintedTimeCall { account };
        if let Some(last) = self.probe(provider, s, faucet, call, &mut report).await {
            self.update(|v| v.faucet.last_minted_at = Some(last));
        }
        report
    }

    async fn load_game(&self, provider: &dyn WalletProvider, account: Address) -> RefreshReport {
        let mut report = RefreshReport::default();
        if !self.switch_chain(provider, Section::Game, &mut report).await {
            return report;
        }
        let game = self.deployment.contracts.game;
        let s = Section::Game;

        let call = IWenGame::i_startDateCall {};
        if let Some(start) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.start_date = Some(start));
        }
        let call = IWenGame::s_gameNameCall {};
        if let Some(name) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.name = Some(name));
        }
        let call = IWenGame::s_gameEndedCall {};
        let ended = self.probe(provider, s, game, call, &mut report).await;
        match ended {
            Some(true) => self.update(|v| {
                if !matches!(v.game.stage, Some(GameStage::Ended(_))) {
                    v.game.stage = Some(GameStage::Ended(GameOutcome::default()));
                }
            }),
            Some(false) => self.update(|v| v.game.stage = Some(GameStage::Running)),
            None => {}
        }
        let call = IWenGame::s_participationFeeCall {};
        if let Some(fee) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.participation_fee = Some(fee));
        }

        let call = IWenGame::s_guessCall { player: account };
        if let Some(guess) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.player.guess = Some(GameDate::from(guess)));
        }
        let call = IWenGame::s_participatedCall { player: account };
        if let Some(participated) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.player.participated = Some(participated));
        }
        let call = IWenGame::s_paidCall { player: account };
        if let Some(paid) = self.probe(provider, s, game, call, &mut report).await {
            self.update(|v| v.game.player.paid = Some(paid));
        }

        if ended != Some(true) {
            return report;
        }

        let call = IWenGame::s_endDateCall {};
        if let Some(end) = self.probe(provider, s, game, call, &mut report).await {
            self.update_outcome(|o| o.end_date = Some(end));
        }
        let call = IWenGame::s_correctAnsCall {};
        if let Some(answer) = self.probe(provider, s, game, call, &mut report).await {
            self.update_outcome(|o| o.correct_answer = Some(GameDate::from(answer)));
        }
        let call = IWenGame::s_individualRewardCall {};
        if let Some(reward) = self.probe(provider, s, game, call, &mut report).await {
            self.update_outcome(|o| o.individual_reward = Some(reward));
        }
        let call = IWenGame::s_thereIsAWinnerCall {};
        if let Some(winner) = self.probe(provider, s, game, call, &mut report).await {
            self.update_outcome(|o| o.there_is_a_winner = Some(winner));
        }
        report
    }

    /// Submit one transaction and wait for it to be mined.
    async fn submit<C>(
        &self,
        provider: &dyn WalletProvider,
        account: Address,
        contract: Address,
        call: C,
    ) -> Result<B256, ProviderError>
    where
        C: SolCall + Send,
    {
        provider.switch_chain(self.deployment.chain).await?;
        let function = C::SIGNATURE;
        let hash = write_contract(provider, self.deployment.chain, account, contract, call).await?;
        info!(function, tx_hash = %hash, "transaction submitted");
        provider.wait_for_inclusion(hash).await?;
        self.notifier.info(TX_SUCCEEDED_TITLE, &hash.to_string());
        Ok(hash)
    }

    async fn play(
        &self,
        provider: &dyn WalletProvider,
        account: Address,
        guess: GameDate,
    ) -> Result<Vec<B256>, ProviderError> {
        let contracts = self.deployment.contracts;
        provider.switch_chain(self.deployment.chain).await?;

        let allowance = read_contract(
            provider,
            contracts.token,
            IERC20::allowanceCall {
                owner: account,
                spender: contracts.game,
            },
        )
        .await?;
        let fee = read_contract(provider, contracts.game, IWenGame::s_participationFeeCall {}).await?;

        let mut hashes = Vec::with_capacity(2);
        if allowance < fee {
            debug!(%allowance, %fee, "allowance below participation fee, approving");
            let approve = IERC20::approveCall {
                spender: contracts.game,
                amount: fee,
            };
            hashes.push(self.submit(provider, account, contracts.token, approve).await?);
        }

        let play = IWenGame::playCall {
            guess: guess.into(),
        };
        hashes.push(self.submit(provider, account, contracts.game, play).await?);
        Ok(hashes)
    }

    /// Notify the outcome of a write and, on success, re-read everything.
    async fn complete(
        &self,
        action: Action,
        provider: &dyn WalletProvider,
        account: Address,
        result: Result<Vec<B256>, ProviderError>,
    ) -> Result<ActionReceipt, ActionError> {
        match result {
            Ok(tx_hashes) => {
                info!(%action, transactions = tx_hashes.len(), "action confirmed");
                let refresh = self.refresh_all(provider, account).await;
                Ok(ActionReceipt {
                    action,
                    tx_hashes,
                    refresh,
                })
            }
            Err(e) => {
                error!(%action, error = %e, "action failed");
                self.notifier.error(TX_FAILED_TITLE, describe_failure(&e));
                Err(e.into())
            }
        }
    }
}

async fn request_account(provider: &dyn WalletProvider) -> Result<Address, ProviderError> {
    provider
        .request_accounts()
        .await?
        .into_iter()
        .next()
        .ok_or(ProviderError::NoAccounts)
}
