//! Integration tests for wenwallet.
//!
//! Anvil-dependent tests use **testcontainers** to spin up a Docker-based
//! Anvil node automatically, so no manual `anvil &` is needed. Anvil serves
//! unlocked accounts, which stands in for a wallet that has already
//! authorised the app.
//!
//! ```bash
//! # Run everything (Docker must be available):
//! cargo test -p wenwallet-integration-tests -- --include-ignored
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy::primitives::{Address, B256, U256};
    use alloy::rpc::types::TransactionRequest;
    use testcontainers::{
        core::{IntoContainerPort, WaitFor},
        runners::SyncRunner,
        Container, GenericImage, ImageExt,
    };
    use wenwallet_core::chain::SupportedChainId;
    use wenwallet_core::config::{Contracts, Deployment, ReceiptPolling};
    use wenwallet_core::notify::{Level, MemoryNotifier};
    use wenwallet_evm::provider::{ProviderError, WalletProvider};
    use wenwallet_evm::{RpcWalletProvider, WalletConnection};

    /// Spins up a Docker Anvil container and returns `(container, rpc_url)`.
    /// The container is dropped (and removed) when it goes out of scope.
    fn start_anvil() -> (Container<GenericImage>, String) {
        let image = GenericImage::new("ghcr.io/foundry-rs/foundry", "latest")
            .with_exposed_port(8545.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Listening on"))
            .with_entrypoint("anvil")
            .with_cmd(vec![
                "--host".to_string(),
                "0.0.0.0".to_string(),
                "--port".to_string(),
                "8545".to_string(),
                "--chain-id".to_string(),
                "31337".to_string(),
            ]);

        let container = image.start().expect("Docker must be available to run Anvil tests");
        let host_port = container.get_host_port_ipv4(8545).expect("failed to get mapped port");
        let url = format!("http://127.0.0.1:{}", host_port);
        (container, url)
    }

    fn fast_polling() -> ReceiptPolling {
        ReceiptPolling {
            attempts: 20,
            interval_ms: 100,
        }
    }

    /// Contracts at addresses with no code deployed.
    fn empty_deployment() -> Deployment {
        Deployment {
            chain: SupportedChainId::Anvil,
            contracts: Contracts {
                token: Address::repeat_byte(0x11),
                faucet: Address::repeat_byte(0x22),
                game: Address::repeat_byte(0x33),
            },
        }
    }

    #[test]
    fn test_invalid_rpc_url() {
        let err = RpcWalletProvider::new("not a url").unwrap_err();
        assert!(matches!(err, ProviderError::UrlParse(_)));
    }

    #[test]
    #[ignore]
    fn test_accounts_and_chain() {
        let (_container, url) = start_anvil();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let provider = RpcWalletProvider::new(&url).unwrap();

            let accounts = provider.accounts().await.unwrap();
            assert_eq!(accounts.len(), 10);
            let requested = provider.request_accounts().await.unwrap();
            assert_eq!(requested, accounts);

            // Already on the right chain: no switch request is sent.
            provider.switch_chain(SupportedChainId::Anvil).await.unwrap();
        });
    }

    #[test]
    #[ignore]
    fn test_send_and_wait_for_inclusion() {
        let (_container, url) = start_anvil();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let provider = RpcWalletProvider::new(&url)
                .unwrap()
                .with_receipt_polling(fast_polling());
            let from = provider.accounts().await.unwrap()[0];

            let tx = TransactionRequest::default()
                .from(from)
                .to(Address::repeat_byte(0x44))
                .value(U256::from(1_000u64));
            let hash = provider.send_transaction(tx).await.unwrap();
            provider.wait_for_inclusion(hash).await.unwrap();
        });
    }

    #[test]
    #[ignore]
    fn test_wait_for_unknown_transaction_times_out() {
        let (_container, url) = start_anvil();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let provider = RpcWalletProvider::new(&url)
                .unwrap()
                .with_receipt_polling(ReceiptPolling {
                    attempts: 2,
                    interval_ms: 10,
                });
            let hash = B256::repeat_byte(0xab);
            let err = provider.wait_for_inclusion(hash).await.unwrap_err();
            assert!(matches!(err, ProviderError::Timeout(h, 2) if h == hash));
        });
    }

    #[test]
    #[ignore]
    fn test_connect_isolates_failed_reads() {
        let (_container, url) = start_anvil();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let provider: Arc<dyn WalletProvider> = Arc::new(RpcWalletProvider::new(&url).unwrap());
            let notifier = Arc::new(MemoryNotifier::new());
            let conn = WalletConnection::new(Some(provider), notifier.clone(), empty_deployment());

            // Calls to addresses without code return no data, so every read
            // fails to decode; the connection is still established.
            let report = conn.connect().await.unwrap();
            assert_eq!(report.reads, 13);
            assert_eq!(report.failures.len(), 13);
            assert!(conn.state().is_connected());
            assert!(!conn.state().is_loading());
            assert!(notifier.snapshot().is_empty());
        });
    }

    #[test]
    #[ignore]
    fn test_mint_is_mined_then_refreshed() {
        let (_container, url) = start_anvil();
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let provider = RpcWalletProvider::new(&url)
                .unwrap()
                .with_receipt_polling(fast_polling());
            let notifier = Arc::new(MemoryNotifier::new());
            let conn = WalletConnection::new(
                Some(Arc::new(provider)),
                notifier.clone(),
                empty_deployment(),
            );
            conn.connect().await.unwrap();

            // A call to an account without code succeeds on chain.
            let receipt = conn.mint_tokens_from_faucet().await.unwrap();
            assert_eq!(receipt.tx_hashes.len(), 1);
            assert_eq!(receipt.refresh.reads, 13);

            let notes = notifier.drain();
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].level, Level::Info);
            assert_eq!(notes[0].description, receipt.tx_hashes[0].to_string());
        });
    }
}
