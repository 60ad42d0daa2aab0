//! # wenwallet-core
//!
//! Chain ids, deployment configuration, the observable wallet state model and
//! user notifications for the Wen game wallet adapter.

pub mod chain;
pub mod config;
pub mod journal;
pub mod notify;
pub mod types;

pub use chain::SupportedChainId;
pub use config::{Config, Contracts, Deployment};
pub use notify::{Level, Notification, Notifier};
pub use types::WalletState;
