use alloy::primitives::{Address, Bytes};
use otc_types::{
    config::{AllowanceConfig, EscrowConfig, IntentConfig, PermitConfig},
    TransferActionKind,
};

/// The transfer leg of a [`SettlementRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferRequest {
    /// A Permit2 witness transfer. The signature is produced by the local
    /// signer if absent.
    WitnessPermit {
        /// The permit.
        config: PermitConfig,
        /// The payer's signature, if already collected.
        signature: Option<Bytes>,
    },
    /// A plain Permit2 signature transfer.
    PlainPermit {
        /// The permit.
        config: PermitConfig,
        /// The payer's signature, if already collected.
        signature: Option<Bytes>,
    },
    /// A Permit2 allowance transfer. The owner's allowance must cover the
    /// amount, see [`Settler::ensure_allowance`].
    ///
    /// [`Settler::ensure_allowance`]: crate::Settler::ensure_allowance
    AllowanceTransfer(AllowanceConfig),
}

impl TransferRequest {
    /// Get the transfer kind.
    pub const fn kind(&self) -> TransferActionKind {
        match self {
            Self::WitnessPermit { .. } => TransferActionKind::WitnessPermit,
            Self::PlainPermit { .. } => TransferActionKind::PlainPermit,
            Self::AllowanceTransfer(_) => TransferActionKind::AllowanceTransfer,
        }
    }
}

/// Everything needed to settle one escrow.
///
/// Signatures collected from other parties are attached with the `with_*`
/// methods. Missing signatures are produced by the settler's signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementRequest {
    pub(crate) intent: IntentConfig,
    pub(crate) escrow: EscrowConfig,
    pub(crate) transfer: TransferRequest,
    pub(crate) intent_signature: Option<Bytes>,
    pub(crate) escrow_signature: Option<Bytes>,
    pub(crate) payer: Option<Address>,
}

impl SettlementRequest {
    /// Create a new request.
    pub const fn new(
        intent: IntentConfig,
        escrow: EscrowConfig,
        transfer: TransferRequest,
    ) -> Self {
        Self {
            intent,
            escrow,
            transfer,
            intent_signature: None,
            escrow_signature: None,
            payer: None,
        }
    }

    /// Attach the maker's intent signature.
    pub fn with_intent_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.intent_signature = Some(signature.into());
        self
    }

    /// Attach the relayer's escrow signature.
    pub fn with_escrow_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.escrow_signature = Some(signature.into());
        self
    }

    /// Override the payer. Defaults to the escrow's payer.
    pub const fn with_payer(mut self, payer: Address) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Get the intent.
    pub const fn intent(&self) -> &IntentConfig {
        &self.intent
    }

    /// Get the escrow.
    pub const fn escrow(&self) -> &EscrowConfig {
        &self.escrow
    }

    /// Get the transfer.
    pub const fn transfer(&self) -> &TransferRequest {
        &self.transfer
    }
}
