use super::{
    parse::{parse_address, parse_u256},
    InputError,
};
use otc_bindings::{SignaturePermit, SignatureTransferDetails, TokenPermissions};
use otc_constants::ConfigError;

/// Unvalidated Permit2 signature transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPermitConfig {
    /// Token address.
    pub token: String,
    /// Permitted amount.
    pub amount: String,
    /// Permit2 nonce.
    pub nonce: String,
    /// Signature deadline.
    pub deadline: String,
    /// Transfer recipient, usually the escrow contract.
    pub to: String,
    /// Amount to transfer. Defaults to the permitted amount.
    #[serde(default)]
    pub requested_amount: String,
}

/// A validated Permit2 signature transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "RawPermitConfig")]
pub struct PermitConfig {
    permit: SignaturePermit,
    details: SignatureTransferDetails,
}

impl TryFrom<RawPermitConfig> for PermitConfig {
    type Error = InputError;

    fn try_from(raw: RawPermitConfig) -> Result<Self, Self::Error> {
        let permitted = TokenPermissions::new(
            parse_address("token", &raw.token)?,
            parse_u256("amount", &raw.amount)?,
        );
        let permit = SignaturePermit {
            permitted,
            nonce: parse_u256("nonce", &raw.nonce)?,
            deadline: parse_u256("deadline", &raw.deadline)?,
        };
        let requested_amount = if raw.requested_amount.trim().is_empty() {
            permitted.amount
        } else {
            parse_u256("requestedAmount", &raw.requested_amount)?
        };
        let details = SignatureTransferDetails {
            to: parse_address("to", &raw.to)?,
            requestedAmount: requested_amount,
        };
        Ok(Self { permit, details })
    }
}

impl PermitConfig {
    /// Load a permit from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Get the on-chain permit.
    pub const fn permit(&self) -> &SignaturePermit {
        &self.permit
    }

    /// Get the transfer details.
    pub const fn details(&self) -> &SignatureTransferDetails {
        &self.details
    }
}
