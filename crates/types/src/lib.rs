//! Client-side codec for escrow-intent OTC settlement.
//!
//! This crate computes the EIP-712 commitments, struct hashes and typed-data
//! digests that the settler verifies on chain, encodes the settler's actions
//! and `execute` call, decodes its reverts, and reads Permit2 allowances.
//!
//! Typical use:
//! - validate role inputs with the [`config`] types,
//! - sign the intent, escrow and permit with [`signing`],
//! - assemble an [`ExecutionPayload`] with a [`SettlementBuilder`],
//! - on failure, decode the revert with [`decode_revert`].

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod action;
pub use action::{Action, ActionEncoder, ActionKind, ExpectedSelectors};

mod commitment;
pub use commitment::{commit, PayeeDetails};

pub mod config;

mod domain;
pub use domain::{
    domain_separator, permit2_domain, permit2_domain_separator, settlement_domain,
    settlement_domain_separator,
};

mod error;
pub use error::{BuildError, EncodingError};

mod hash;
pub use hash::{token_permissions_hash, StructHash};

mod payload;
pub use payload::{ExecutionPayload, SettlementBuilder, Transfer, TransferActionKind};

mod permit2;
pub use permit2::{permit_call, Allowance, AllowanceStatus};

mod revert;
pub use revert::{decode_revert, Remediation, SettlementError};

pub mod signing;

mod typed;
pub use typed::{typed_hash, TypedMessage, TypedPreview};

pub mod typehash;
pub use typehash::Eip712Type;

#[cfg(any(test, feature = "test-utils"))]
/// Utils for unit and integration tests.
pub mod test_utils;

