use alloy::primitives::{Address, Bytes, TxHash};
use core::{future::Future, time::Duration};

/// The result of an `eth_call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded with this return data.
    Success(Bytes),
    /// The call reverted with this revert data.
    Reverted(Bytes),
}

impl CallOutcome {
    /// Get the revert data, if the call reverted.
    pub const fn revert_data(&self) -> Option<&Bytes> {
        match self {
            Self::Success(_) => None,
            Self::Reverted(data) => Some(data),
        }
    }
}

/// The parts of a transaction receipt the settler looks at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    /// The transaction hash.
    pub tx_hash: TxHash,
    /// Whether the transaction succeeded.
    pub success: bool,
    /// The block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas used by the transaction.
    pub gas_used: u64,
}

/// Access to the chain the settler runs on.
///
/// Implementors simulate calls, estimate gas, and submit transactions from
/// the account that sends `execute`. An implementation for alloy providers is
/// provided.
pub trait ChainClient {
    /// The error type returned by RPC operations.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Get the chain id.
    fn get_chain_id(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Estimate gas for a call.
    fn estimate_gas(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Simulate a call. A revert is an [`CallOutcome::Reverted`], not an
    /// error.
    fn simulate(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<CallOutcome, Self::Error>> + Send;

    /// Send a transaction with the given gas limit.
    fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        gas: u64,
    ) -> impl Future<Output = Result<TxHash, Self::Error>> + Send;

    /// Wait for a receipt. Returns `None` if `timeout` elapses first.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> impl Future<Output = Result<Option<ReceiptSummary>, Self::Error>> + Send;

    /// Call a view function.
    fn read_contract(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<Bytes, Self::Error>> + Send;
}
