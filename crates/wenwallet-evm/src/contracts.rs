//! Typed contract calls on top of a [`WalletProvider`].

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, B256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use wenwallet_core::chain::SupportedChainId;
use wenwallet_core::types::GameDate;

use crate::abi::{Guess, IWenGame};
use crate::provider::{ProviderError, Result, WalletProvider};

/// Builds the `eth_call` request for `call` against `contract`.
pub fn call_request<C: SolCall>(contract: Address, call: &C) -> TransactionRequest {
    TransactionRequest::default()
        .to(contract)
        .input(call.abi_encode().into())
}

/// Builds the transaction `from` submits to run `call` on `contract`.
pub fn transaction_request<C: SolCall>(
    chain: SupportedChainId,
    from: Address,
    contract: Address,
    call: &C,
) -> TransactionRequest {
    let mut tx = call_request(contract, call).from(from);
    tx.set_chain_id(chain.as_u64());
    tx
}

/// Calls a view function and decodes its return value.
pub async fn read_contract<C>(
    provider: &dyn WalletProvider,
    contract: Address,
    call: C,
) -> Result<C::Return>
where
    C: SolCall + Send,
{
    let output = provider.call(call_request(contract, &call)).await?;
    C::abi_decode_returns(&output).map_err(|e| ProviderError::AbiDecode(e.to_string()))
}

/// Submits a state-changing call through the wallet. Returns the transaction hash.
pub async fn write_contract<C>(
    provider: &dyn WalletProvider,
    chain: SupportedChainId,
    from: Address,
    contract: Address,
    call: C,
) -> Result<B256>
where
    C: SolCall + Send,
{
    let tx = transaction_request(chain, from, contract, &call);
    provider.send_transaction(tx).await
}

impl From<GameDate> for Guess {
    fn from(date: GameDate) -> Self {
        Self {
            date: date.date,
            month: date.month,
            year: date.year,
        }
    }
}

impl From<IWenGame::s_guessReturn> for GameDate {
    fn from(ret: IWenGame::s_guessReturn) -> Self {
        Self {
            date: ret.date,
            month: ret.month,
            year: ret.year,
        }
    }
}

impl From<IWenGame::s_correctAnsReturn> for GameDate {
    fn from(ret: IWenGame::s_correctAnsReturn) -> Self {
        Self {
            date: ret.date,
            month: ret.month,
            year: ret.year,
        }
    }
}
