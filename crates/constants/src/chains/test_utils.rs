//! Constants for local test chains.

use crate::{
    SettlementConstants, DEFAULT_SETTLEMENT_DOMAIN_NAME, DEFAULT_SETTLEMENT_DOMAIN_VERSION,
    PERMIT2_ADDRESS,
};
use alloy::primitives::Address;
use std::borrow::Cow;

/// Test chain id.
pub const CHAIN_ID: u64 = 31337;

/// Test address for the settler.
pub const SETTLER: Address = Address::repeat_byte(0x51);
/// Test address for the escrow.
pub const ESCROW: Address = Address::repeat_byte(0x52);
/// Test address for the traded token.
pub const TOKEN: Address = Address::repeat_byte(0x53);
/// Test address for the bulk-sell allowance holder.
pub const ALLOWANCE_HOLDER: Address = Address::repeat_byte(0x54);

/// Settlement constants for local tests.
pub const TEST_SETTLEMENT: SettlementConstants = SettlementConstants::new(
    CHAIN_ID,
    SETTLER,
    ESCROW,
    PERMIT2_ADDRESS,
    Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_NAME),
    Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_VERSION),
);
