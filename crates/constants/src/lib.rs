//! Escrow-intent settlement constants.
//!
//! This crate contains the deployment constants for the escrow-intent
//! settler: contract addresses per chain, the EIP-712 domain names, the
//! pinned action selectors and the gas policy used when submitting.
//!

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::sepolia;
#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod protocol;
pub use protocol::{
    ACTION_INVALID_SELECTOR, BULK_SELL_TRANSFER_FROM_SELECTOR, DEFAULT_SETTLEMENT_DOMAIN_NAME,
    DEFAULT_SETTLEMENT_DOMAIN_VERSION, ESCROW_AND_INTENT_CHECK_SELECTOR,
    ESCROW_PARAMS_CHECK_SELECTOR, LEGACY_SETTLEMENT_DOMAIN_NAME, PERMIT2_ADDRESS,
    PERMIT2_CONTRACT_NAME, SIGNATURE_TRANSFER_FROM_SELECTOR,
};

mod types;
pub use types::{
    env_utils, ConfigError, GasPolicy, KnownChains, ParseChainError, SettlementConstants,
};
