//! Scripted in-memory wallet shared by the adapter tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use wenwallet_core::chain::SupportedChainId;
use wenwallet_core::config::{Contracts, Deployment};
use wenwallet_core::notify::MemoryNotifier;
use wenwallet_evm::abi::{IFaucet, IWenGame, IERC20};
use wenwallet_evm::provider::{ProviderError, Result, WalletProvider};
use wenwallet_evm::WalletConnection;

pub const ACCOUNT: Address = Address::repeat_byte(0xaa);
pub const TOKEN: Address = Address::repeat_byte(0x01);
pub const FAUCET: Address = Address::repeat_byte(0x02);
pub const GAME: Address = Address::repeat_byte(0x03);

/// Number of reads in a refresh while the game is running.
pub const RUNNING_REFRESH_READS: usize = 13;

/// Something the adapter asked the wallet to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Accounts,
    RequestAccounts,
    SwitchChain(u64),
    Call { to: Address, selector: [u8; 4] },
    Send { to: Address, input: Bytes },
    Wait(B256),
}

impl Event {
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call { .. })
    }

    pub fn is_send(&self) -> bool {
        matches!(self, Self::Send { .. })
    }

    pub fn selector(&self) -> Option<[u8; 4]> {
        match self {
            Self::Call { selector, .. } => Some(*selector),
            Self::Send { input, .. } => input.get(..4)?.try_into().ok(),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Script {
    authorised: Vec<Address>,
    request_result: Option<Result<Vec<Address>>>,
    switch_error: Option<ProviderError>,
    reads: HashMap<[u8; 4], Result<Bytes>>,
    send_errors: HashMap<[u8; 4], ProviderError>,
    wait_error: Option<ProviderError>,
    tx_counter: u8,
    events: Vec<Event>,
}

/// A wallet whose every answer is scripted up front.
///
/// Unscripted reads fail with an RPC error. Every method yields once so
/// concurrently running operations get a chance to interleave.
#[derive(Default)]
pub struct ScriptedWallet {
    script: Mutex<Script>,
}

impl ScriptedWallet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    /// Accounts returned by `eth_accounts`.
    pub fn authorise(&self, account: Address) {
        self.lock().authorised = vec![account];
    }

    /// Result of the next `eth_requestAccounts`. Defaults to `[ACCOUNT]`.
    pub fn on_request_accounts(&self, result: Result<Vec<Address>>) {
        self.lock().request_result = Some(result);
    }

    pub fn fail_switch_chain(&self, err: ProviderError) {
        self.lock().switch_error = Some(err);
    }

    /// Answer `C` with `ret`.
    pub fn answer<C: SolCall>(&self, ret: C::Return) {
        let encoded = C::abi_encode_returns(&ret);
        self.lock().reads.insert(C::SELECTOR, Ok(encoded.into()));
    }

    /// Make every `C` read fail with `err`.
    pub fn fail_read<C: SolCall>(&self, err: ProviderError) {
        self.lock().reads.insert(C::SELECTOR, Err(err));
    }

    /// Make submitting `C` fail with `err`.
    pub fn fail_send<C: SolCall>(&self, err: ProviderError) {
        self.lock().send_errors.insert(C::SELECTOR, err);
    }

    pub fn fail_wait(&self, err: ProviderError) {
        self.lock().wait_error = Some(err);
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    pub fn clear_events(&self) {
        self.lock().events.clear();
    }

    pub fn sends(&self) -> Vec<Event> {
        self.events().into_iter().filter(Event::is_send).collect()
    }

    pub fn calls_of<C: SolCall>(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| e.is_call() && e.selector() == Some(C::SELECTOR))
            .count()
    }

    pub fn selectors_called(&self) -> HashSet<[u8; 4]> {
        self.events()
            .iter()
            .filter(|e| e.is_call())
            .filter_map(Event::selector)
            .collect()
    }

    fn record(&self, event: Event) {
        self.lock().events.push(event);
    }
}

fn target(tx: &TransactionRequest) -> Address {
    tx.to.and_then(|kind| kind.to().copied()).unwrap_or_default()
}

fn input(tx: &TransactionRequest) -> Bytes {
    tx.input.input().cloned().unwrap_or_default()
}

#[async_trait]
impl WalletProvider for ScriptedWallet {
    async fn accounts(&self) -> Result<Vec<Address>> {
        tokio::task::yield_now().await;
        self.record(Event::Accounts);
        Ok(self.lock().authorised.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        tokio::task::yield_now().await;
        self.record(Event::RequestAccounts);
        let mut script = self.lock();
        let result = script.request_result.clone().unwrap_or(Ok(vec![ACCOUNT]));
        if let Ok(accounts) = &result {
            script.authorised = accounts.clone();
        }
        result
    }

    async fn switch_chain(&self, chain: SupportedChainId) -> Result<()> {
        tokio::task::yield_now().await;
        self.record(Event::SwitchChain(chain.as_u64()));
        match self.lock().switch_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        tokio::task::yield_now().await;
        let data = input(&tx);
        let selector: [u8; 4] = data[..4].try_into().unwrap();
        self.record(Event::Call {
            to: target(&tx),
            selector,
        });
        self.lock()
            .reads
            .get(&selector)
            .cloned()
            .unwrap_or_else(|| Err(ProviderError::Rpc(format!("unscripted read {selector:02x?}"))))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        tokio::task::yield_now().await;
        assert_eq!(tx.from, Some(ACCOUNT), "transaction sent from the wrong account");
        let data = input(&tx);
        self.record(Event::Send {
            to: target(&tx),
            input: data.clone(),
        });
        let mut script = self.lock();
        let selector: [u8; 4] = data[..4].try_into().unwrap();
        if let Some(err) = script.send_errors.get(&selector) {
            return Err(err.clone());
        }
        script.tx_counter += 1;
        Ok(B256::with_last_byte(script.tx_counter))
    }

    async fn wait_for_inclusion(&self, tx_hash: B256) -> Result<()> {
        tokio::task::yield_now().await;
        self.record(Event::Wait(tx_hash));
        match self.lock().wait_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn deployment() -> Deployment {
    Deployment {
        chain: SupportedChainId::ArbitrumSepolia,
        contracts: Contracts {
            token: TOKEN,
            faucet: FAUCET,
            game: GAME,
        },
    }
}

pub fn connection(wallet: &Arc<ScriptedWallet>) -> (WalletConnection, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let provider: Arc<dyn WalletProvider> = wallet.clone();
    let conn = WalletConnection::new(Some(provider), notifier.clone(), deployment());
    (conn, notifier)
}

pub fn tokens(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18))
}

/// Script every read for a game that is still accepting guesses.
pub fn script_running_game(wallet: &ScriptedWallet) {
    wallet.answer::<IERC20::balanceOfCall>(tokens(1234) + U256::from(456_000_000_000_000_000u64));
    wallet.answer::<IERC20::decimalsCall>(18);
    wallet.answer::<IERC20::allowanceCall>(U256::ZERO);

    wallet.answer::<IFaucet::s_mintIntervalCall>(U256::from(86_400));
    wallet.answer::<IFaucet::s_mintAmountCall>(tokens(100));
    wallet.answer::<IFaucet::pausedCall>(false);
    wallet.answer::<IFaucet::s_lastMintedTimeCall>(U256::from(1_700_000_000u64));

    wallet.answer::<IWenGame::i_startDateCall>(U256::from(1_690_000_000u64));
    wallet.answer::<IWenGame::s_gameNameCall>("When moon".to_string());
    wallet.answer::<IWenGame::s_gameEndedCall>(false);
    wallet.answer::<IWenGame::s_participationFeeCall>(tokens(10));
    wallet.answer::<IWenGame::s_guessCall>(guess_return(0, 0, 0));
    wallet.answer::<IWenGame::s_participatedCall>(false);
    wallet.answer::<IWenGame::s_paidCall>(false);
}

/// Script the additional reads of a finished game.
pub fn script_ended_game(wallet: &ScriptedWallet, winner: bool, answer: (u64, u64, u64)) {
    wallet.answer::<IWenGame::s_gameEndedCall>(true);
    wallet.answer::<IWenGame::s_endDateCall>(U256::from(1_720_000_000u64));
    wallet.answer::<IWenGame::s_correctAnsCall>(IWenGame::s_correctAnsReturn {
        date: U256::from(answer.0),
        month: U256::from(answer.1),
        year: U256::from(answer.2),
    });
    wallet.answer::<IWenGame::s_individualRewardCall>(tokens(50));
    wallet.answer::<IWenGame::s_thereIsAWinnerCall>(winner);
}

pub fn guess_return(date: u64, month: u64, year: u64) -> IWenGame::s_guessReturn {
    IWenGame::s_guessReturn {
        date: U256::from(date),
        month: U256::from(month),
        year: U256::from(year),
    }
}
