use crate::{CallOutcome, ChainClient, ReceiptSummary};
use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
    transports::{TransportError, TransportResult},
};
use core::time::Duration;
use tracing::trace;

/// A [`ChainClient`] backed by an alloy [`Provider`].
///
/// The provider must carry a wallet for the sending account, e.g. via
/// `ProviderBuilder::wallet()`, and fill nonce and fees.
#[derive(Debug, Clone)]
pub struct ProviderClient<P> {
    provider: P,
    poll_interval: Duration,
}

impl<P> ProviderClient<P> {
    /// Default interval between receipt polls.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider, poll_interval: Self::DEFAULT_POLL_INTERVAL }
    }

    /// Set the receipt poll interval.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

fn call_request(from: Option<Address>, to: Address, data: Bytes) -> TransactionRequest {
    let tx = TransactionRequest::default().with_to(to).with_input(data);
    match from {
        Some(from) => tx.with_from(from),
        None => tx,
    }
}

impl<P> ChainClient for ProviderClient<P>
where
    P: Provider,
{
    type Error = TransportError;

    async fn get_chain_id(&self) -> TransportResult<u64> {
        self.provider.get_chain_id().await
    }

    async fn estimate_gas(&self, from: Address, to: Address, data: Bytes) -> TransportResult<u64> {
        self.provider.estimate_gas(call_request(Some(from), to, data)).await
    }

    async fn simulate(
        &self,
        from: Address,
        to: Address,
        data: Bytes,
    ) -> TransportResult<CallOutcome> {
        match self.provider.call(call_request(Some(from), to, data)).await {
            Ok(output) => Ok(CallOutcome::Success(output)),
            Err(error) => match error.as_error_resp().and_then(|resp| resp.as_revert_data()) {
                Some(data) => Ok(CallOutcome::Reverted(data)),
                None => Err(error),
            },
        }
    }

    async fn send_transaction(
        &self,
        to: Address,
        data: Bytes,
        gas: u64,
    ) -> TransportResult<TxHash> {
        let tx = call_request(None, to, data).with_gas_limit(gas);
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> TransportResult<Option<ReceiptSummary>> {
        let poll = async {
            loop {
                match self.provider.get_transaction_receipt(tx_hash).await {
                    Ok(Some(receipt)) => {
                        return Ok(ReceiptSummary {
                            tx_hash,
                            success: receipt.status(),
                            block_number: receipt.block_number(),
                            gas_used: receipt.gas_used(),
                        })
                    }
                    Ok(None) => trace!(%tx_hash, "receipt not yet available"),
                    Err(error) => return Err(error),
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };
        match tokio::time::timeout(timeout, poll).await {
            Ok(result) => result.map(Some),
            Err(_) => Ok(None),
        }
    }

    async fn read_contract(&self, to: Address, data: Bytes) -> TransportResult<Bytes> {
        self.provider.call(call_request(None, to, data)).await
    }
}
