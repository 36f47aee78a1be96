use alloy::primitives::TxHash;
use otc_types::{signing::SigningError, AllowanceStatus, BuildError, SettlementError};

/// Errors returned by [`Settler`].
///
/// [`Settler`]: crate::Settler
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SettlerError {
    /// The client is connected to a different chain than configured.
    #[error("chain id mismatch: configured {expected}, connected to {actual}")]
    ChainMismatch {
        /// The configured chain id.
        expected: u64,
        /// The client's chain id.
        actual: u64,
    },
    /// Signing failed.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),
    /// The payload could not be built.
    #[error("build error: {0}")]
    Build(#[from] BuildError),
    /// The settlement reverted in simulation.
    #[error("settlement reverted: {0} ({hint})", hint = .0.remediation())]
    Reverted(SettlementError),
    /// Contract return data could not be decoded.
    #[error("abi error: {0}")]
    Abi(#[from] alloy::sol_types::Error),
    /// The Permit2 allowance is insufficient or expired and no grant was
    /// provided.
    #[error("permit2 allowance must be reauthorized: {0:?}")]
    Unauthorized(AllowanceStatus),
    /// An RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// No receipt arrived before the timeout.
    #[error("timed out waiting for receipt of {0}")]
    ReceiptTimeout(TxHash),
    /// The transaction was mined but failed.
    #[error("transaction {0} failed")]
    Failed(TxHash),
}

impl SettlerError {
    /// Box an RPC error.
    pub(crate) fn rpc<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Rpc(Box::new(error))
    }

    /// Get the decoded revert, if the settlement reverted.
    pub const fn revert(&self) -> Option<&SettlementError> {
        match self {
            Self::Reverted(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolError;
    use otc_bindings::Settler;
    use otc_types::{decode_revert, Remediation};

    #[test]
    fn reverted_display_includes_remediation() {
        let error = SettlerError::Reverted(decode_revert(&Settler::InvalidSpender {}.abi_encode()));
        assert_eq!(
            error.to_string(),
            format!("settlement reverted: invalid spender ({})", Remediation::FixSpender)
        );
        assert_eq!(error.revert(), Some(&SettlementError::InvalidSpender));
    }

    #[test]
    fn chain_mismatch_display() {
        let error = SettlerError::ChainMismatch { expected: 11155111, actual: 1 };
        assert_eq!(error.to_string(), "chain id mismatch: configured 11155111, connected to 1");
        assert!(error.revert().is_none());
    }
}
