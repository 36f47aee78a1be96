//! Settler revert decoding.

use crate::action::{ActionKind, ExpectedSelectors};
use alloy::{
    primitives::{Address, Bytes, Selector, B256, U256},
    sol_types::SolInterface,
};
use otc_bindings::Settler::SettlerErrors;
use std::fmt;

/// What to change before retrying a failed settlement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Remediation {
    /// Sign the message again, with a fresh deadline if it expired.
    RegenerateSignature,
    /// Make the token and amount agree across intent, escrow and transfer.
    AlignTokenAndAmount,
    /// Sign the permit with the settler as spender.
    FixSpender,
    /// Use the current Permit2 nonce.
    UseCorrectNonce,
    /// Grant a new Permit2 allowance.
    Reauthorize,
    /// Use an escrow id that has not been settled.
    NewEscrowId,
    /// Call the settler directly from the account, not through a forwarder or
    /// another contract.
    CallSettlerDirectly,
    /// Check the payer's token balance and ERC-20 approval of Permit2.
    CheckBalanceAndAllowance,
    /// Check that the expected account signed.
    CheckSigner,
    /// Inspect the failing action's arguments.
    InspectAction,
    /// No specific remediation.
    None,
}

impl Remediation {
    /// A short human-readable hint.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::RegenerateSignature => "regenerate the signature",
            Self::AlignTokenAndAmount => "align token and amount across intent, escrow and permit",
            Self::FixSpender => "sign the permit with the settler as spender",
            Self::UseCorrectNonce => "use the current Permit2 nonce",
            Self::Reauthorize => "grant a new Permit2 allowance",
            Self::NewEscrowId => "use a new escrow id",
            Self::CallSettlerDirectly => "call the settler directly",
            Self::CheckBalanceAndAllowance => "check token balance and Permit2 approval",
            Self::CheckSigner => "check which account signed",
            Self::InspectAction => "inspect the failing action",
            Self::None => "no remediation available",
        }
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

/// A decoded settler revert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SettlementError {
    /// A signature deadline has passed.
    #[error("signature expired at {deadline}")]
    SignatureExpired {
        /// The deadline.
        deadline: U256,
    },
    /// The recovered signer is not the expected account.
    #[error("invalid signer")]
    InvalidSigner,
    /// Token mismatch.
    #[error("invalid token")]
    InvalidToken,
    /// Amount mismatch.
    #[error("invalid amount")]
    InvalidAmount,
    /// The permit spender is not the settler.
    #[error("invalid spender")]
    InvalidSpender,
    /// The caller is not allowed.
    #[error("invalid sender")]
    InvalidSender,
    /// Malformed or mismatched signature.
    #[error("invalid signature")]
    InvalidSignature,
    /// The Permit2 nonce was already used.
    #[error("invalid nonce")]
    InvalidNonce,
    /// The signature has the wrong length.
    #[error("invalid signature length")]
    InvalidSignatureLength,
    /// An ERC-1271 signature was rejected.
    #[error("invalid contract signature")]
    InvalidContractSignature,
    /// The Permit2 allowance is too small.
    #[error("insufficient allowance: {amount}")]
    InsufficientAllowance {
        /// The allowed amount.
        amount: U256,
    },
    /// The Permit2 allowance expired.
    #[error("allowance expired at {deadline}")]
    AllowanceExpired {
        /// The expiration.
        deadline: U256,
    },
    /// The escrow was already created.
    #[error("escrow {0} already exists")]
    EscrowAlreadyExists(B256),
    /// The escrow does not exist.
    #[error("escrow {0} does not exist")]
    EscrowNotExists(B256),
    /// The escrow is in an unexpected state.
    #[error("escrow {escrow_hash} has status {actual}, expected {expected}")]
    EscrowStatusError {
        /// The escrow hash.
        escrow_hash: B256,
        /// The expected status.
        expected: u8,
        /// The actual status.
        actual: u8,
    },
    /// Calls through a forwarder are not allowed.
    #[error("forwarder not allowed")]
    ForwarderNotAllowed,
    /// A `transferFrom` failed.
    #[error("transferFrom failed")]
    TransferFromFailed,
    /// A `transfer` failed.
    #[error("transfer failed")]
    TransferFailed,
    /// The settler refused to act on another contract's behalf.
    #[error("confused deputy")]
    ConfusedDeputy,
    /// Malformed calldata offset.
    #[error("invalid offset")]
    InvalidOffset,
    /// Disallowed call target.
    #[error("invalid target")]
    InvalidTarget,
    /// Received less than expected.
    #[error("too much slippage on {token}: expected {expected}, got {actual}")]
    TooMuchSlippage {
        /// The token.
        token: Address,
        /// The expected amount.
        expected: U256,
        /// The received amount.
        actual: U256,
    },
    /// An action failed.
    #[error("action {index} ({}) invalid", kind.map_or("unknown", ActionKind::name))]
    ActionInvalid {
        /// Index of the action in the `actions` array.
        index: U256,
        /// The action's selector.
        selector: Selector,
        /// The action kind, if the selector is known.
        kind: Option<ActionKind>,
        /// Data carried by the error, usually the inner revert.
        data: Bytes,
    },
    /// Revert data that is not a settler error.
    #[error("unknown revert: {0}")]
    Unknown(Bytes),
}

impl SettlementError {
    /// Decode settler revert data. Data that does not decode as a settler
    /// error is returned as [`SettlementError::Unknown`].
    pub fn decode(data: &[u8], selectors: &ExpectedSelectors) -> Self {
        let Ok(error) = SettlerErrors::abi_decode(data) else {
            return Self::Unknown(Bytes::copy_from_slice(data));
        };
        match error {
            SettlerErrors::SignatureExpired(e) => Self::SignatureExpired { deadline: e.deadline },
            SettlerErrors::InvalidSigner(_) => Self::InvalidSigner,
            SettlerErrors::InvalidToken(_) => Self::InvalidToken,
            SettlerErrors::InvalidAmount(_) => Self::InvalidAmount,
            SettlerErrors::InvalidSpender(_) => Self::InvalidSpender,
            SettlerErrors::InvalidSender(_) => Self::InvalidSender,
            SettlerErrors::InvalidSignature(_) => Self::InvalidSignature,
            SettlerErrors::InvalidNonce(_) => Self::InvalidNonce,
            SettlerErrors::InvalidSignatureLength(_) | SettlerErrors::InvalidSignatureLen(_) => {
                Self::InvalidSignatureLength
            }
            SettlerErrors::InvalidContractSignature(_) => Self::InvalidContractSignature,
            SettlerErrors::InsufficientAllowance(e) => {
                Self::InsufficientAllowance { amount: e.amount }
            }
            SettlerErrors::AllowanceExpired(e) => Self::AllowanceExpired { deadline: e.deadline },
            SettlerErrors::EscrowAlreadyExists(e) => Self::EscrowAlreadyExists(e.escrowHash),
            SettlerErrors::EscrowNotExists(e) => Self::EscrowNotExists(e.escrowHash),
            SettlerErrors::EscrowStatusError(e) => Self::EscrowStatusError {
                escrow_hash: e.escrowHash,
                expected: e.expected,
                actual: e.actual,
            },
            SettlerErrors::ForwarderNotAllowed(_) => Self::ForwarderNotAllowed,
            SettlerErrors::TransferFromFailed(_) => Self::TransferFromFailed,
            SettlerErrors::TransferFailed(_) => Self::TransferFailed,
            SettlerErrors::ConfusedDeputy(_) => Self::ConfusedDeputy,
            SettlerErrors::InvalidOffset(_) => Self::InvalidOffset,
            SettlerErrors::InvalidTarget(_) => Self::InvalidTarget,
            SettlerErrors::TooMuchSlippage(e) => {
                Self::TooMuchSlippage { token: e.token, expected: e.expected, actual: e.actual }
            }
            SettlerErrors::ActionInvalid(e) => Self::ActionInvalid {
                index: e.i,
                selector: e.action,
                kind: ActionKind::from_selector(e.action, selectors),
                data: e.data,
            },
        }
    }

    /// Decode the revert carried by an [`SettlementError::ActionInvalid`],
    /// if there is one.
    pub fn inner(&self) -> Option<Self> {
        match self {
            Self::ActionInvalid { data, .. } if data.len() >= 4 => {
                Some(Self::decode(data, &ExpectedSelectors::default()))
            }
            _ => None,
        }
    }

    /// Get the remediation for this error.
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::SignatureExpired { .. }
            | Self::InvalidSignature
            | Self::InvalidSignatureLength
            | Self::InvalidContractSignature => Remediation::RegenerateSignature,
            Self::InvalidSigner => Remediation::CheckSigner,
            Self::InvalidToken | Self::InvalidAmount | Self::TooMuchSlippage { .. } => {
                Remediation::AlignTokenAndAmount
            }
            Self::InvalidSpender => Remediation::FixSpender,
            Self::InvalidNonce => Remediation::UseCorrectNonce,
            Self::InsufficientAllowance { .. } | Self::AllowanceExpired { .. } => {
                Remediation::Reauthorize
            }
            Self::EscrowAlreadyExists(_) | Self::EscrowStatusError { .. } => {
                Remediation::NewEscrowId
            }
            Self::InvalidSender | Self::ForwarderNotAllowed | Self::ConfusedDeputy => {
                Remediation::CallSettlerDirectly
            }
            Self::TransferFromFailed | Self::TransferFailed => {
                Remediation::CheckBalanceAndAllowance
            }
            Self::InvalidOffset | Self::InvalidTarget => Remediation::InspectAction,
            Self::ActionInvalid { .. } => match self.inner().map(|inner| inner.remediation()) {
                Some(Remediation::None) | None => Remediation::InspectAction,
                Some(remediation) => remediation,
            },
            Self::EscrowNotExists(_) | Self::Unknown(_) => Remediation::None,
        }
    }
}

/// Decode settler revert data with the default selectors.
pub fn decode_revert(data: &[u8]) -> SettlementError {
    SettlementError::decode(data, &ExpectedSelectors::default())
}
