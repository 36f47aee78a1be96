use alloy::primitives::{address, fixed_bytes, Address, FixedBytes};

/// The name of the Permit2 contract, as used in its EIP-712 domain.
pub const PERMIT2_CONTRACT_NAME: &str = "Permit2";

/// The canonical Permit2 deployment. Identical on every EVM chain.
pub const PERMIT2_ADDRESS: Address = address!("0x000000000022D473030F116dDEE9F6B43aC78BA3");

/// EIP-712 domain name of the current settler revision.
pub const DEFAULT_SETTLEMENT_DOMAIN_NAME: &str = "MainnetTakeIntent";

/// EIP-712 domain name used by settler revisions that predate the payer
/// field on `EscrowParams`.
pub const LEGACY_SETTLEMENT_DOMAIN_NAME: &str = "MainnetUserTxn";

/// EIP-712 domain version of the settler.
pub const DEFAULT_SETTLEMENT_DOMAIN_VERSION: &str = "1";

/// Selector of the settler's `ESCROW_AND_INTENT_CHECK` action.
///
/// Stable across the seller, buyer and bulk-sell flows.
pub const ESCROW_AND_INTENT_CHECK_SELECTOR: FixedBytes<4> = fixed_bytes!("0xd663f022");

/// Selector of the settler's `ESCROW_PARAMS_CHECK` action.
///
/// Stable across the seller, buyer and bulk-sell flows.
pub const ESCROW_PARAMS_CHECK_SELECTOR: FixedBytes<4> = fixed_bytes!("0xf3fd3d2f");

/// Error selector of `ActionInvalid(uint256,bytes4,bytes)`, raised by the
/// settler when a single action fails validation.
pub const ACTION_INVALID_SELECTOR: FixedBytes<4> = fixed_bytes!("0x3c74eed6");

/// Selector of the settler's `SIGNATURE_TRANSFER_FROM` action.
pub const SIGNATURE_TRANSFER_FROM_SELECTOR: FixedBytes<4> = fixed_bytes!("0x55972674");

/// Selector of the settler's `BULK_SELL_TRANSFER_FROM` action.
pub const BULK_SELL_TRANSFER_FROM_SELECTOR: FixedBytes<4> = fixed_bytes!("0x48acb820");
