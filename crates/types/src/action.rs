//! Settlement actions.
//!
//! An action is one ABI-encoded settler call. A settlement always carries
//! three of them, in order: `ESCROW_AND_INTENT_CHECK`, `ESCROW_PARAMS_CHECK`,
//! and one transfer.

use crate::error::EncodingError;
use alloy::{
    primitives::{Bytes, Selector},
    sol_types::SolCall,
};
use otc_bindings::{
    AllowanceTransferDetails, EscrowParams, IntentParams, Settler, SignaturePermit,
    SignatureTransferDetails,
};
use otc_constants::{
    env_utils::load_string_opt, ConfigError, BULK_SELL_TRANSFER_FROM_SELECTOR,
    ESCROW_AND_INTENT_CHECK_SELECTOR, ESCROW_PARAMS_CHECK_SELECTOR,
    SIGNATURE_TRANSFER_FROM_SELECTOR,
};
use std::fmt;
use tracing::warn;

/// The settler actions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// `ESCROW_AND_INTENT_CHECK`: verifies the escrow against the intent.
    EscrowAndIntentCheck,
    /// `ESCROW_PARAMS_CHECK`: verifies the relayer's escrow signature.
    EscrowParamsCheck,
    /// `SIGNATURE_TRANSFER_FROM_WITH_WITNESS`: Permit2 witness transfer.
    SignatureTransferFromWithWitness,
    /// `SIGNATURE_TRANSFER_FROM`: Permit2 signature transfer.
    SignatureTransferFrom,
    /// `BULK_SELL_TRANSFER_FROM`: Permit2 allowance transfer.
    BulkSellTransferFrom,
}

impl ActionKind {
    /// All action kinds.
    pub const ALL: [Self; 5] = [
        Self::EscrowAndIntentCheck,
        Self::EscrowParamsCheck,
        Self::SignatureTransferFromWithWitness,
        Self::SignatureTransferFrom,
        Self::BulkSellTransferFrom,
    ];

    /// The settler function name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::EscrowAndIntentCheck => "ESCROW_AND_INTENT_CHECK",
            Self::EscrowParamsCheck => "ESCROW_PARAMS_CHECK",
            Self::SignatureTransferFromWithWitness => "SIGNATURE_TRANSFER_FROM_WITH_WITNESS",
            Self::SignatureTransferFrom => "SIGNATURE_TRANSFER_FROM",
            Self::BulkSellTransferFrom => "BULK_SELL_TRANSFER_FROM",
        }
    }

    /// The selector derived from the function signature.
    pub const fn derived_selector(self) -> Selector {
        Selector::new(match self {
            Self::EscrowAndIntentCheck => Settler::ESCROW_AND_INTENT_CHECKCall::SELECTOR,
            Self::EscrowParamsCheck => Settler::ESCROW_PARAMS_CHECKCall::SELECTOR,
            Self::SignatureTransferFromWithWitness => {
                Settler::SIGNATURE_TRANSFER_FROM_WITH_WITNESSCall::SELECTOR
            }
            Self::SignatureTransferFrom => Settler::SIGNATURE_TRANSFER_FROMCall::SELECTOR,
            Self::BulkSellTransferFrom => Settler::BULK_SELL_TRANSFER_FROMCall::SELECTOR,
        })
    }

    /// Find the kind whose expected selector is `selector`.
    pub fn from_selector(selector: Selector, expected: &ExpectedSelectors) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| expected.selector(*kind) == selector)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One encoded settler call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
    data: Bytes,
}

impl Action {
    /// Get the action kind.
    pub const fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Get the encoded call.
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Get the 4-byte selector of the encoded call.
    pub fn selector(&self) -> Selector {
        Selector::from_slice(&self.data[..4])
    }

    /// Consume the action, returning the encoded call.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// The selectors the deployed settler dispatches on.
///
/// The two check actions, `SIGNATURE_TRANSFER_FROM` and
/// `BULK_SELL_TRANSFER_FROM` are pinned by default. The witness transfer is
/// left unpinned because deployed settlers disagree on its selector; pin it
/// per deployment. An unpinned selector falls back to the one derived from
/// the function signature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedSelectors {
    escrow_and_intent_check: Selector,
    escrow_params_check: Selector,
    #[serde(default)]
    signature_transfer_from_with_witness: Option<Selector>,
    #[serde(default)]
    signature_transfer_from: Option<Selector>,
    #[serde(default)]
    bulk_sell_transfer_from: Option<Selector>,
}

impl Default for ExpectedSelectors {
    fn default() -> Self {
        Self {
            escrow_and_intent_check: ESCROW_AND_INTENT_CHECK_SELECTOR,
            escrow_params_check: ESCROW_PARAMS_CHECK_SELECTOR,
            signature_transfer_from_with_witness: None,
            signature_transfer_from: Some(SIGNATURE_TRANSFER_FROM_SELECTOR),
            bulk_sell_transfer_from: Some(BULK_SELL_TRANSFER_FROM_SELECTOR),
        }
    }
}

impl ExpectedSelectors {
    /// Load transfer selector pins from `OTC_SELECTOR_WITNESS_TRANSFER`,
    /// `OTC_SELECTOR_SIGNATURE_TRANSFER` and `OTC_SELECTOR_BULK_SELL_TRANSFER`.
    /// Unset variables keep the default pins.
    pub fn from_env() -> Result<Self, ConfigError> {
        let load = |key: &str| -> Result<Option<Selector>, ConfigError> {
            load_string_opt(key)
                .map(|s| s.parse::<Selector>().map_err(ConfigError::from))
                .transpose()
        };
        let defaults = Self::default();
        Ok(Self {
            signature_transfer_from_with_witness: load("OTC_SELECTOR_WITNESS_TRANSFER")?
                .or(defaults.signature_transfer_from_with_witness),
            signature_transfer_from: load("OTC_SELECTOR_SIGNATURE_TRANSFER")?
                .or(defaults.signature_transfer_from),
            bulk_sell_transfer_from: load("OTC_SELECTOR_BULK_SELL_TRANSFER")?
                .or(defaults.bulk_sell_transfer_from),
            ..defaults
        })
    }

    /// Pin the selector of a transfer action. Check actions are always
    /// pinned and are left unchanged.
    pub const fn with_transfer_selector(mut self, kind: ActionKind, selector: Selector) -> Self {
        match kind {
            ActionKind::SignatureTransferFromWithWitness => {
                self.signature_transfer_from_with_witness = Some(selector)
            }
            ActionKind::SignatureTransferFrom => self.signature_transfer_from = Some(selector),
            ActionKind::BulkSellTransferFrom => self.bulk_sell_transfer_from = Some(selector),
            ActionKind::EscrowAndIntentCheck | ActionKind::EscrowParamsCheck => {}
        }
        self
    }

    /// Get the pinned selector for `kind`, if any.
    pub const fn pinned(&self, kind: ActionKind) -> Option<Selector> {
        match kind {
            ActionKind::EscrowAndIntentCheck => Some(self.escrow_and_intent_check),
            ActionKind::EscrowParamsCheck => Some(self.escrow_params_check),
            ActionKind::SignatureTransferFromWithWitness => {
                self.signature_transfer_from_with_witness
            }
            ActionKind::SignatureTransferFrom => self.signature_transfer_from,
            ActionKind::BulkSellTransferFrom => self.bulk_sell_transfer_from,
        }
    }

    /// Get the selector expected for `kind`, falling back to the derived one.
    pub fn selector(&self, kind: ActionKind) -> Selector {
        self.pinned(kind).unwrap_or_else(|| kind.derived_selector())
    }
}

/// Encodes settler actions and checks their selectors.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ActionEncoder {
    selectors: ExpectedSelectors,
}

impl ActionEncoder {
    /// Create an encoder checking against `selectors`.
    pub const fn new(selectors: ExpectedSelectors) -> Self {
        Self { selectors }
    }

    /// Get the expected selectors.
    pub const fn selectors(&self) -> &ExpectedSelectors {
        &self.selectors
    }

    fn check(&self, kind: ActionKind, data: Vec<u8>) -> Result<Action, EncodingError> {
        let actual = Selector::from_slice(&data[..4]);
        let Some(expected) = self.selectors.pinned(kind) else {
            warn!(%kind, selector = %actual, "no pinned selector, using derived selector");
            return Ok(Action { kind, data: data.into() });
        };
        if actual != expected {
            return Err(EncodingError::SelectorMismatch { kind, expected, actual });
        }
        Ok(Action { kind, data: data.into() })
    }

    /// Encode `ESCROW_AND_INTENT_CHECK`.
    pub fn escrow_and_intent_check(
        &self,
        escrow: &EscrowParams,
        intent: &IntentParams,
        maker_intent_sig: Bytes,
    ) -> Result<Action, EncodingError> {
        let data = Settler::ESCROW_AND_INTENT_CHECKCall {
            escrowParams: *escrow,
            intentParams: *intent,
            makerIntentSig: maker_intent_sig,
        }
        .abi_encode();
        self.check(ActionKind::EscrowAndIntentCheck, data)
    }

    /// Encode `ESCROW_PARAMS_CHECK`.
    pub fn escrow_params_check(
        &self,
        escrow: &EscrowParams,
        sig: Bytes,
    ) -> Result<Action, EncodingError> {
        let data = Settler::ESCROW_PARAMS_CHECKCall { escrowParams: *escrow, sig }.abi_encode();
        self.check(ActionKind::EscrowParamsCheck, data)
    }

    /// Encode `SIGNATURE_TRANSFER_FROM_WITH_WITNESS`.
    pub fn signature_transfer_from_with_witness(
        &self,
        permit: &SignaturePermit,
        details: &SignatureTransferDetails,
        intent: &IntentParams,
        sig: Bytes,
    ) -> Result<Action, EncodingError> {
        let data = Settler::SIGNATURE_TRANSFER_FROM_WITH_WITNESSCall {
            permit: *permit,
            details: *details,
            intentParams: *intent,
            sig,
        }
        .abi_encode();
        self.check(ActionKind::SignatureTransferFromWithWitness, data)
    }

    /// Encode `SIGNATURE_TRANSFER_FROM`.
    pub fn signature_transfer_from(
        &self,
        permit: &SignaturePermit,
        details: &SignatureTransferDetails,
        sig: Bytes,
    ) -> Result<Action, EncodingError> {
        let data =
            Settler::SIGNATURE_TRANSFER_FROMCall { permit: *permit, details: *details, sig }
                .abi_encode();
        self.check(ActionKind::SignatureTransferFrom, data)
    }

    /// Encode `BULK_SELL_TRANSFER_FROM`.
    pub fn bulk_sell_transfer_from(
        &self,
        details: &AllowanceTransferDetails,
        intent: &IntentParams,
        maker_intent_sig: Bytes,
    ) -> Result<Action, EncodingError> {
        let data = Settler::BULK_SELL_TRANSFER_FROMCall {
            details: *details,
            intentParams: *intent,
            makerIntentSig: maker_intent_sig,
        }
        .abi_encode();
        self.check(ActionKind::BulkSellTransferFrom, data)
    }
}
