use crate::{
    action::{Action, ActionEncoder, ActionKind, ExpectedSelectors},
    domain::settlement_domain_separator,
    error::BuildError,
    hash::{token_permissions_hash, StructHash},
    typed::typed_hash,
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, B256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use otc_bindings::{
    AllowanceTransferDetails, EscrowParams, IntentParams, Settler, SignaturePermit,
    SignatureTransferDetails, TokenPermissions,
};
use otc_constants::SettlementConstants;
use std::fmt;
use tracing::debug;

/// The three ways a settlement can move the payer's tokens.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TransferActionKind {
    /// Seller intent. The seller's Permit2 signature covers the intent as a
    /// witness, so the check action carries no separate intent signature.
    WitnessPermit,
    /// Buyer intent. The payer signs a plain Permit2 transfer.
    PlainPermit,
    /// Bulk sell. Tokens move under an existing Permit2 allowance and the
    /// maker's intent signature authorizes the transfer.
    AllowanceTransfer,
}

impl TransferActionKind {
    /// The settler action used for the transfer.
    pub const fn action_kind(self) -> ActionKind {
        match self {
            Self::WitnessPermit => ActionKind::SignatureTransferFromWithWitness,
            Self::PlainPermit => ActionKind::SignatureTransferFrom,
            Self::AllowanceTransfer => ActionKind::BulkSellTransferFrom,
        }
    }

    /// Whether the maker's intent signature is required.
    pub const fn requires_intent_signature(self) -> bool {
        !matches!(self, Self::WitnessPermit)
    }
}

impl fmt::Display for TransferActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The transfer of a settlement, with its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    /// A Permit2 witness transfer.
    WitnessPermit {
        /// The on-chain permit.
        permit: SignaturePermit,
        /// Recipient and amount.
        details: SignatureTransferDetails,
        /// The payer's `PermitWitnessTransferFrom` signature.
        signature: Bytes,
    },
    /// A plain Permit2 signature transfer.
    PlainPermit {
        /// The on-chain permit.
        permit: SignaturePermit,
        /// Recipient and amount.
        details: SignatureTransferDetails,
        /// The payer's `PermitTransferFrom` signature.
        signature: Bytes,
    },
    /// A Permit2 allowance transfer.
    AllowanceTransfer {
        /// Owner, recipient, amount and token.
        details: AllowanceTransferDetails,
    },
}

impl Transfer {
    /// Get the transfer kind.
    pub const fn kind(&self) -> TransferActionKind {
        match self {
            Self::WitnessPermit { .. } => TransferActionKind::WitnessPermit,
            Self::PlainPermit { .. } => TransferActionKind::PlainPermit,
            Self::AllowanceTransfer { .. } => TransferActionKind::AllowanceTransfer,
        }
    }

    /// The token permissions the settler checks the transfer against.
    pub fn token_permissions(&self) -> TokenPermissions {
        match self {
            Self::WitnessPermit { permit, .. } | Self::PlainPermit { permit, .. } => {
                TokenPermissions::from(permit)
            }
            Self::AllowanceTransfer { details } => TokenPermissions::from(details),
        }
    }
}

/// Assembles an [`ExecutionPayload`].
///
/// Every input is provided explicitly. [`SettlementBuilder::build`] checks
/// that the flow has what it needs, encodes the three actions in order, and
/// computes the aggregate hashes.
#[derive(Debug, Clone)]
pub struct SettlementBuilder {
    encoder: ActionEncoder,
    domain_separator: B256,
    payer: Option<Address>,
    escrow: Option<EscrowParams>,
    intent: Option<IntentParams>,
    intent_signature: Option<Bytes>,
    escrow_signature: Option<Bytes>,
    transfer: Option<Transfer>,
}

impl SettlementBuilder {
    /// Create a builder for the settler described by `constants`.
    pub fn new(constants: &SettlementConstants) -> Self {
        Self {
            encoder: ActionEncoder::default(),
            domain_separator: settlement_domain_separator(constants),
            payer: None,
            escrow: None,
            intent: None,
            intent_signature: None,
            escrow_signature: None,
            transfer: None,
        }
    }

    /// Check actions against `selectors`.
    pub const fn with_selectors(mut self, selectors: ExpectedSelectors) -> Self {
        self.encoder = ActionEncoder::new(selectors);
        self
    }

    /// Set the payer. Defaults to the escrow's payer.
    pub const fn with_payer(mut self, payer: Address) -> Self {
        self.payer = Some(payer);
        self
    }

    /// Set the escrow.
    pub const fn with_escrow(mut self, escrow: EscrowParams) -> Self {
        self.escrow = Some(escrow);
        self
    }

    /// Set the intent.
    pub const fn with_intent(mut self, intent: IntentParams) -> Self {
        self.intent = Some(intent);
        self
    }

    /// Set the maker's intent signature.
    pub fn with_intent_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.intent_signature = Some(signature.into());
        self
    }

    /// Set the relayer's escrow signature.
    pub fn with_escrow_signature(mut self, signature: impl Into<Bytes>) -> Self {
        self.escrow_signature = Some(signature.into());
        self
    }

    /// Set the transfer.
    pub fn with_transfer(mut self, transfer: Transfer) -> Self {
        self.transfer = Some(transfer);
        self
    }

    /// Get the settlement domain separator.
    pub const fn domain_separator(&self) -> B256 {
        self.domain_separator
    }

    /// Get the transfer kind, if a transfer is set.
    pub fn transfer_kind(&self) -> Option<TransferActionKind> {
        self.transfer.as_ref().map(Transfer::kind)
    }

    /// Encode the actions and compute the aggregate hashes.
    pub fn build(self) -> Result<ExecutionPayload, BuildError> {
        let escrow = self.escrow.ok_or(BuildError::MissingEscrow)?;
        let intent = self.intent.ok_or(BuildError::MissingIntent)?;
        let transfer = self.transfer.ok_or(BuildError::MissingTransfer)?;
        let escrow_signature = self.escrow_signature.ok_or(BuildError::MissingEscrowSignature)?;

        let kind = transfer.kind();
        let intent_signature = if kind.requires_intent_signature() {
            self.intent_signature
                .ok_or(BuildError::MissingIntentSignature(kind.action_kind()))?
        } else {
            Bytes::new()
        };

        let check = self.encoder.escrow_and_intent_check(
            &escrow,
            &intent,
            intent_signature.clone(),
        )?;
        let params = self.encoder.escrow_params_check(&escrow, escrow_signature)?;
        let token_permissions = transfer.token_permissions();
        let transfer = match transfer {
            Transfer::WitnessPermit { permit, details, signature } => self
                .encoder
                .signature_transfer_from_with_witness(&permit, &details, &intent, signature)?,
            Transfer::PlainPermit { permit, details, signature } => {
                self.encoder.signature_transfer_from(&permit, &details, signature)?
            }
            Transfer::AllowanceTransfer { details } => {
                self.encoder.bulk_sell_transfer_from(&details, &intent, intent_signature)?
            }
        };

        let payload = ExecutionPayload {
            payer: self.payer.unwrap_or(escrow.payer),
            token_permissions_hash: token_permissions_hash(&token_permissions),
            escrow_typed_hash: typed_hash(self.domain_separator, escrow.struct_hash()),
            intent_typed_hash: typed_hash(self.domain_separator, intent.struct_hash()),
            actions: vec![check, params, transfer],
        };
        debug!(
            %kind,
            payer = %payload.payer,
            escrow_typed_hash = %payload.escrow_typed_hash,
            intent_typed_hash = %payload.intent_typed_hash,
            "built execution payload"
        );
        Ok(payload)
    }
}

/// The arguments of a settler `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPayload {
    payer: Address,
    token_permissions_hash: B256,
    escrow_typed_hash: B256,
    intent_typed_hash: B256,
    actions: Vec<Action>,
}

impl ExecutionPayload {
    /// Get the payer.
    pub const fn payer(&self) -> Address {
        self.payer
    }

    /// Get the `TokenPermissions` struct hash.
    pub const fn token_permissions_hash(&self) -> B256 {
        self.token_permissions_hash
    }

    /// Get the escrow digest.
    pub const fn escrow_typed_hash(&self) -> B256 {
        self.escrow_typed_hash
    }

    /// Get the intent digest.
    pub const fn intent_typed_hash(&self) -> B256 {
        self.intent_typed_hash
    }

    /// Get the actions, in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Get the `execute` call.
    pub fn to_call(&self) -> Settler::executeCall {
        Settler::executeCall {
            payer: self.payer,
            tokenPermissionsHash: self.token_permissions_hash,
            escrowTypedHash: self.escrow_typed_hash,
            intentTypeHash: self.intent_typed_hash,
            actions: self.actions.iter().map(|action| action.data().clone()).collect(),
        }
    }

    /// ABI-encode the `execute` call.
    pub fn calldata(&self) -> Bytes {
        self.to_call().abi_encode().into()
    }

    /// Generate a [`TransactionRequest`] calling `execute` on `settler`.
    pub fn to_execute_tx(&self, settler: Address) -> TransactionRequest {
        TransactionRequest::default().with_input(self.calldata()).with_to(settler)
    }
}
