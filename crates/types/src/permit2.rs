//! Permit2 allowance helpers for allowance-based settlement.

use alloy::{
    primitives::{
        aliases::{U160, U48},
        Address, Bytes, U256,
    },
    sol_types::SolCall,
};
use chrono::Utc;
use otc_bindings::{Permit2, PermitSingle};

/// A Permit2 allowance, as returned by `allowance(owner, token, spender)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Allowance {
    /// Allowed amount.
    pub amount: U160,
    /// Unix timestamp at which the allowance expires.
    pub expiration: U48,
    /// Current allowance nonce. A new `PermitSingle` must use this nonce.
    pub nonce: U48,
}

impl Allowance {
    /// ABI-encode the `allowance(owner, token, spender)` call.
    pub fn call(owner: Address, token: Address, spender: Address) -> Bytes {
        Permit2::allowanceCall { owner, token, spender }.abi_encode().into()
    }

    /// Decode the return data of an `allowance` call.
    pub fn decode(data: &[u8]) -> Result<Self, alloy::sol_types::Error> {
        let ret = Permit2::allowanceCall::abi_decode_returns(data)?;
        Ok(Self { amount: ret.amount, expiration: ret.expiration, nonce: ret.nonce })
    }

    /// Evaluate the allowance against `required` at unix time `now`.
    pub fn evaluate(&self, required: U256, now: u64) -> AllowanceStatus {
        AllowanceStatus::evaluate(self, required, now)
    }

    /// Evaluate the allowance against `required` at the current time.
    pub fn evaluate_now(&self, required: U256) -> AllowanceStatus {
        self.evaluate(required, Utc::now().timestamp().max(0) as u64)
    }
}

/// Whether an allowance covers a transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllowanceStatus {
    /// The allowance amount covers the required amount.
    pub sufficient: bool,
    /// The allowance has expired.
    pub expired: bool,
    /// The nonce to use for a new grant.
    pub nonce: U48,
}

impl AllowanceStatus {
    /// Evaluate `allowance` against `required` at unix time `now`.
    ///
    /// The allowance is expired when its expiration is strictly before `now`.
    pub fn evaluate(allowance: &Allowance, required: U256, now: u64) -> Self {
        Self {
            sufficient: U256::from(allowance.amount) >= required,
            expired: U256::from(allowance.expiration) < U256::from(now),
            nonce: allowance.nonce,
        }
    }

    /// Whether a new `PermitSingle` must be signed and submitted.
    pub const fn needs_authorization(&self) -> bool {
        !self.sufficient || self.expired
    }
}

/// ABI-encode `permit(owner, permitSingle, signature)`.
pub fn permit_call(owner: Address, permit: &PermitSingle, signature: Bytes) -> Bytes {
    Permit2::permitCall { owner, permitSingle: *permit, signature }.abi_encode().into()
}
