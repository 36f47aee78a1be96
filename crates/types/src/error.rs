use crate::action::ActionKind;
use alloy::primitives::Selector;

/// An error encoding a settler action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EncodingError {
    /// The encoded call does not start with the selector the settler expects.
    #[error("selector mismatch for {kind}: expected {expected}, got {actual}")]
    SelectorMismatch {
        /// The action being encoded.
        kind: ActionKind,
        /// The pinned selector.
        expected: Selector,
        /// The selector of the encoded call.
        actual: Selector,
    },
}

/// An error assembling an execution payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// No escrow was provided.
    #[error("missing escrow parameters")]
    MissingEscrow,
    /// No intent was provided.
    #[error("missing intent parameters")]
    MissingIntent,
    /// No transfer was provided.
    #[error("missing transfer")]
    MissingTransfer,
    /// The relayer's escrow signature was not provided.
    #[error("missing escrow signature")]
    MissingEscrowSignature,
    /// The maker's intent signature was not provided.
    #[error("missing maker intent signature, required by {0}")]
    MissingIntentSignature(ActionKind),
    /// An action could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
