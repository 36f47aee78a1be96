//! Constants for the Sepolia deployment.

use crate::{
    SettlementConstants, DEFAULT_SETTLEMENT_DOMAIN_NAME, DEFAULT_SETTLEMENT_DOMAIN_VERSION,
    PERMIT2_ADDRESS,
};
use alloy::primitives::{address, Address};
use std::borrow::Cow;

/// Name for the chain.
pub const NAME: &str = "Sepolia";
/// Chain ID for Sepolia.
pub const CHAIN_ID: u64 = 11155111;

/// `MainnetTakeIntent` settler deployment on Sepolia.
pub const SETTLER: Address = address!("0x6Cd90338966872522Ed24CB2A4b756FC36556a60");
/// Escrow contract on Sepolia. This is the recipient of permit transfers.
pub const ESCROW: Address = address!("0xD336000b7004c9F1F0f608058523eF5C00DC78a6");

/// USDC token on Sepolia.
pub const USDC: Address = address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238");

/// Settlement constants for Sepolia.
pub const SEPOLIA: SettlementConstants = SettlementConstants::new(
    CHAIN_ID,
    SETTLER,
    ESCROW,
    PERMIT2_ADDRESS,
    Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_NAME),
    Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_VERSION),
);
