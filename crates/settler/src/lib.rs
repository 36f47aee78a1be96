//! Escrow-intent settlement orchestration.
//!
//! [`Settler`] signs settlement messages, simulates the settler's `execute`
//! call, submits it with a bounded gas limit, and waits for the receipt. It
//! also checks and renews Permit2 allowances for allowance-based transfers.
//!
//! Chain access goes through the [`ChainClient`] trait. [`ProviderClient`]
//! implements it for any alloy provider.

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

mod error;
pub use error::SettlerError;

mod impls;
pub use impls::ProviderClient;

mod request;
pub use request::{SettlementRequest, TransferRequest};

mod settler;
pub use settler::{Settlement, Settler};

mod traits;
pub use traits::{CallOutcome, ChainClient, ReceiptSummary};
