use super::{
    parse::{parse_address, parse_u160, parse_u256, parse_u48},
    InputError,
};
use alloy::primitives::Address;
use otc_bindings::{AllowanceTransferDetails, PermitDetails, PermitSingle};
use otc_constants::ConfigError;

/// Unvalidated Permit2 allowance grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPermitSingleConfig {
    /// Allowance amount.
    pub amount: String,
    /// Unix timestamp at which the allowance expires.
    pub expiration: String,
    /// Permit2 allowance nonce.
    pub nonce: String,
    /// Signature deadline.
    pub sig_deadline: String,
}

/// Unvalidated bulk-sell transfer, with an optional allowance grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAllowanceConfig {
    /// Token owner.
    pub from: String,
    /// Transfer recipient, usually the escrow contract.
    pub to: String,
    /// Amount to transfer.
    pub amount: String,
    /// Token address.
    pub token: String,
    /// The Permit2 spender of the allowance.
    pub allowance_holder: String,
    /// Allowance grant to sign, if the current allowance is not enough.
    #[serde(default)]
    pub permit: Option<RawPermitSingleConfig>,
}

/// A validated bulk-sell transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "RawAllowanceConfig")]
pub struct AllowanceConfig {
    details: AllowanceTransferDetails,
    allowance_holder: Address,
    permit_single: Option<PermitSingle>,
}

impl TryFrom<RawAllowanceConfig> for AllowanceConfig {
    type Error = InputError;

    fn try_from(raw: RawAllowanceConfig) -> Result<Self, Self::Error> {
        let details = AllowanceTransferDetails {
            from: parse_address("from", &raw.from)?,
            to: parse_address("to", &raw.to)?,
            amount: parse_u160("amount", &raw.amount)?,
            token: parse_address("token", &raw.token)?,
        };
        let allowance_holder = parse_address("allowanceHolder", &raw.allowance_holder)?;
        let permit_single = raw
            .permit
            .map(|permit| -> Result<_, InputError> {
                Ok(PermitSingle {
                    details: PermitDetails {
                        token: details.token,
                        amount: parse_u160("permit.amount", &permit.amount)?,
                        expiration: parse_u48("permit.expiration", &permit.expiration)?,
                        nonce: parse_u48("permit.nonce", &permit.nonce)?,
                    },
                    spender: allowance_holder,
                    sigDeadline: parse_u256("permit.sigDeadline", &permit.sig_deadline)?,
                })
            })
            .transpose()?;
        Ok(Self { details, allowance_holder, permit_single })
    }
}

impl AllowanceConfig {
    /// Load a bulk-sell transfer from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Get the transfer details.
    pub const fn details(&self) -> &AllowanceTransferDetails {
        &self.details
    }

    /// Get the allowance holder.
    pub const fn allowance_holder(&self) -> Address {
        self.allowance_holder
    }

    /// Get the token owner.
    pub const fn owner(&self) -> Address {
        self.details.from
    }

    /// Get the allowance grant, if any.
    pub const fn permit_single(&self) -> Option<&PermitSingle> {
        self.permit_single.as_ref()
    }
}
