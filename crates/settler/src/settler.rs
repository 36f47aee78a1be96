use crate::{
    CallOutcome, ChainClient, ReceiptSummary, SettlementRequest, SettlerError, TransferRequest,
};
use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    signers::Signer,
};
use core::time::Duration;
use otc_bindings::{EscrowParams, IntentParams, PermitSingle};
use otc_constants::{GasPolicy, SettlementConstants};
use otc_types::{
    config::{AllowanceConfig, PermitConfig},
    permit_call, signing, Allowance, AllowanceStatus, ExecutionPayload, ExpectedSelectors,
    SettlementBuilder, SettlementError, Transfer,
};
use tracing::{debug, info, instrument, warn};

/// A mined settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    payload: ExecutionPayload,
    gas_limit: u64,
    receipt: ReceiptSummary,
}

impl Settlement {
    /// Get the executed payload.
    pub const fn payload(&self) -> &ExecutionPayload {
        &self.payload
    }

    /// Get the gas limit the transaction was sent with.
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Get the receipt.
    pub const fn receipt(&self) -> &ReceiptSummary {
        &self.receipt
    }
}

/// Signs, simulates and submits settlements.
///
/// `Settler` is generic over:
/// - `Sign`: A [`Signer`] for the account that sends `execute`, and for any
///   signature not collected from another party
/// - `Client`: A [`ChainClient`] for simulation and submission
#[derive(Debug, Clone)]
pub struct Settler<Sign, Client> {
    signer: Sign,
    client: Client,
    constants: SettlementConstants,
    selectors: ExpectedSelectors,
    settlement_gas: GasPolicy,
    permit_gas: GasPolicy,
    receipt_timeout: Duration,
}

impl<Sign, Client> Settler<Sign, Client> {
    /// Default time to wait for a receipt.
    pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new settler.
    pub fn new(signer: Sign, client: Client, constants: SettlementConstants) -> Self {
        Self {
            signer,
            client,
            constants,
            selectors: ExpectedSelectors::default(),
            settlement_gas: GasPolicy::settlement(),
            permit_gas: GasPolicy::permit(),
            receipt_timeout: Self::DEFAULT_RECEIPT_TIMEOUT,
        }
    }

    /// Set the expected action selectors.
    pub const fn with_selectors(mut self, selectors: ExpectedSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Set the gas policy for `execute`.
    pub const fn with_settlement_gas(mut self, policy: GasPolicy) -> Self {
        self.settlement_gas = policy;
        self
    }

    /// Set the gas policy for Permit2 `permit`.
    pub const fn with_permit_gas(mut self, policy: GasPolicy) -> Self {
        self.permit_gas = policy;
        self
    }

    /// Set the receipt timeout.
    pub const fn with_receipt_timeout(mut self, timeout: Duration) -> Self {
        self.receipt_timeout = timeout;
        self
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &Sign {
        &self.signer
    }

    /// Get a reference to the client.
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Get a reference to the settlement constants.
    pub const fn constants(&self) -> &SettlementConstants {
        &self.constants
    }

    /// Get the expected action selectors.
    pub const fn selectors(&self) -> &ExpectedSelectors {
        &self.selectors
    }

    /// Start a [`SettlementBuilder`] for this settler.
    pub fn builder(&self) -> SettlementBuilder {
        SettlementBuilder::new(&self.constants).with_selectors(self.selectors)
    }
}

impl<Sign, Client> Settler<Sign, Client>
where
    Sign: Signer + Send + Sync,
{
    /// Sign an intent as the maker.
    pub async fn sign_intent(&self, intent: &IntentParams) -> Result<Bytes, SettlerError> {
        signing::sign_intent(&self.signer, intent, &self.constants).await.map_err(Into::into)
    }

    /// Sign an escrow as the relayer.
    pub async fn sign_escrow(&self, escrow: &EscrowParams) -> Result<Bytes, SettlerError> {
        signing::sign_escrow(&self.signer, escrow, &self.constants).await.map_err(Into::into)
    }

    /// Sign a permit bound to `intent`, with the settler as spender.
    pub async fn sign_witness_permit(
        &self,
        permit: &PermitConfig,
        intent: &IntentParams,
    ) -> Result<Bytes, SettlerError> {
        let message = permit.permit().with_witness(self.constants.settler(), *intent);
        signing::sign_permit_witness(&self.signer, &message, &self.constants)
            .await
            .map_err(Into::into)
    }

    /// Sign a plain permit, with the settler as spender.
    pub async fn sign_plain_permit(&self, permit: &PermitConfig) -> Result<Bytes, SettlerError> {
        let message = permit.permit().with_spender(self.constants.settler());
        signing::sign_permit_transfer(&self.signer, &message, &self.constants)
            .await
            .map_err(Into::into)
    }

    /// Sign a Permit2 allowance grant.
    pub async fn sign_permit_single(&self, permit: &PermitSingle) -> Result<Bytes, SettlerError> {
        signing::sign_permit_single(&self.signer, permit, &self.constants)
            .await
            .map_err(Into::into)
    }

    /// Sign whatever `request` does not carry with the local signer. The
    /// chain must already be verified.
    #[instrument(skip_all, fields(kind = %request.transfer.kind()))]
    async fn sign_missing(
        &self,
        request: SettlementRequest,
    ) -> Result<SettlementBuilder, SettlerError> {
        let SettlementRequest {
            intent,
            escrow,
            transfer,
            intent_signature,
            escrow_signature,
            payer,
        } = request;
        let intent = *intent.params();
        let escrow = *escrow.params();

        let escrow_signature = match escrow_signature {
            Some(signature) => signature,
            None => self.sign_escrow(&escrow).await?,
        };
        let intent_signature = match intent_signature {
            Some(signature) => Some(signature),
            None if transfer.kind().requires_intent_signature() => {
                Some(self.sign_intent(&intent).await?)
            }
            None => None,
        };

        let transfer = match transfer {
            TransferRequest::WitnessPermit { config, signature } => {
                let signature = match signature {
                    Some(signature) => signature,
                    None => self.sign_witness_permit(&config, &intent).await?,
                };
                Transfer::WitnessPermit {
                    permit: *config.permit(),
                    details: *config.details(),
                    signature,
                }
            }
            TransferRequest::PlainPermit { config, signature } => {
                let signature = match signature {
                    Some(signature) => signature,
                    None => self.sign_plain_permit(&config).await?,
                };
                Transfer::PlainPermit {
                    permit: *config.permit(),
                    details: *config.details(),
                    signature,
                }
            }
            TransferRequest::AllowanceTransfer(config) => {
                Transfer::AllowanceTransfer { details: *config.details() }
            }
        };

        let mut builder = self
            .builder()
            .with_escrow(escrow)
            .with_intent(intent)
            .with_escrow_signature(escrow_signature)
            .with_transfer(transfer);
        if let Some(signature) = intent_signature {
            builder = builder.with_intent_signature(signature);
        }
        if let Some(payer) = payer {
            builder = builder.with_payer(payer);
        }
        Ok(builder)
    }
}

impl<Sign, Client> Settler<Sign, Client>
where
    Sign: Signer + Send + Sync,
    Client: ChainClient + Send + Sync,
{
    /// Check that the client is connected to the configured chain.
    pub async fn verify_chain(&self) -> Result<(), SettlerError> {
        let actual = self.client.get_chain_id().await.map_err(SettlerError::rpc)?;
        let expected = self.constants.chain_id();
        if actual != expected {
            return Err(SettlerError::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Read the owner's Permit2 allowance for the allowance holder and check
    /// it against the transfer amount.
    #[instrument(skip_all, fields(owner = %config.owner(), token = %config.details().token))]
    pub async fn check_allowance(
        &self,
        config: &AllowanceConfig,
    ) -> Result<AllowanceStatus, SettlerError> {
        let details = config.details();
        let call = Allowance::call(config.owner(), details.token, config.allowance_holder());
        let output = self
            .client
            .read_contract(self.constants.permit2(), call)
            .await
            .map_err(SettlerError::rpc)?;
        let allowance = Allowance::decode(&output)?;
        let status = allowance.evaluate_now(U256::from(details.amount));
        debug!(
            amount = %allowance.amount,
            expiration = %allowance.expiration,
            sufficient = status.sufficient,
            expired = status.expired,
            "read permit2 allowance"
        );
        Ok(status)
    }

    /// Select a gas limit, falling back to the policy when estimation fails.
    async fn gas_limit(&self, policy: GasPolicy, from: Address, to: Address, data: Bytes) -> u64 {
        let estimate = match self.client.estimate_gas(from, to, data).await {
            Ok(gas) => Some(gas),
            Err(error) => {
                warn!(%error, fallback = policy.fallback(), "gas estimation failed");
                None
            }
        };
        let gas = policy.gas_limit(estimate);
        debug!(?estimate, gas, "selected gas limit");
        gas
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<ReceiptSummary, SettlerError> {
        let receipt = self
            .client
            .wait_for_receipt(tx_hash, self.receipt_timeout)
            .await
            .map_err(SettlerError::rpc)?
            .ok_or(SettlerError::ReceiptTimeout(tx_hash))?;
        if !receipt.success {
            return Err(SettlerError::Failed(tx_hash));
        }
        Ok(receipt)
    }
}

impl<Sign, Client> Settler<Sign, Client>
where
    Sign: Signer + Send + Sync,
    Client: ChainClient + Send + Sync,
{
    /// Build, simulate, send and confirm a settlement.
    ///
    /// A revert in simulation is decoded and returned as
    /// [`SettlerError::Reverted`] without sending anything.
    #[instrument(skip_all, fields(kind = ?builder.transfer_kind()))]
    pub async fn settle(&self, builder: SettlementBuilder) -> Result<Settlement, SettlerError> {
        self.verify_chain().await?;
        self.submit(builder).await
    }

    /// Turn a request into a builder, signing whatever the request does not
    /// carry with the local signer.
    ///
    /// The client's chain is verified first, so nothing is signed under a
    /// stale domain.
    pub async fn prepare(
        &self,
        request: SettlementRequest,
    ) -> Result<SettlementBuilder, SettlerError> {
        self.verify_chain().await?;
        self.sign_missing(request).await
    }

    /// Sign what is missing from `request`, then [`settle`](Self::settle).
    pub async fn sign_and_settle(
        &self,
        request: SettlementRequest,
    ) -> Result<Settlement, SettlerError> {
        self.verify_chain().await?;
        let builder = self.sign_missing(request).await?;
        self.submit(builder).await
    }

    async fn submit(&self, builder: SettlementBuilder) -> Result<Settlement, SettlerError> {
        let payload = builder.build()?;

        let from = self.signer.address();
        let settler = self.constants.settler();
        let calldata = payload.calldata();

        let outcome =
            self.client.simulate(from, settler, calldata.clone()).await.map_err(SettlerError::rpc)?;
        if let CallOutcome::Reverted(data) = outcome {
            let error = SettlementError::decode(&data, &self.selectors);
            warn!(%error, remediation = %error.remediation(), "settlement simulation reverted");
            return Err(SettlerError::Reverted(error));
        }

        let gas_limit = self.gas_limit(self.settlement_gas, from, settler, calldata.clone()).await;
        let tx_hash = self
            .client
            .send_transaction(settler, calldata, gas_limit)
            .await
            .map_err(SettlerError::rpc)?;
        info!(%tx_hash, gas_limit, "settlement sent");

        let receipt = self.await_receipt(tx_hash).await?;
        info!(%tx_hash, block_number = ?receipt.block_number, "settlement confirmed");
        Ok(Settlement { payload, gas_limit, receipt })
    }

    /// Make sure the owner's Permit2 allowance covers the transfer.
    ///
    /// Returns `None` if it already does. Otherwise signs the configured
    /// `PermitSingle` with the local signer, who must be the owner, submits
    /// it to Permit2 and returns the receipt.
    #[instrument(skip_all, fields(owner = %config.owner()))]
    pub async fn ensure_allowance(
        &self,
        config: &AllowanceConfig,
    ) -> Result<Option<ReceiptSummary>, SettlerError> {
        let status = self.check_allowance(config).await?;
        if !status.needs_authorization() {
            return Ok(None);
        }
        let Some(permit) = config.permit_single() else {
            return Err(SettlerError::Unauthorized(status));
        };
        if permit.details.nonce != status.nonce {
            warn!(
                signed = %permit.details.nonce,
                current = %status.nonce,
                "permit nonce differs from the current allowance nonce"
            );
        }

        let signature = self.sign_permit_single(permit).await?;
        let data = permit_call(config.owner(), permit, signature);
        let permit2 = self.constants.permit2();
        let gas_limit =
            self.gas_limit(self.permit_gas, self.signer.address(), permit2, data.clone()).await;
        let tx_hash = self
            .client
            .send_transaction(permit2, data, gas_limit)
            .await
            .map_err(SettlerError::rpc)?;
        info!(%tx_hash, gas_limit, "permit sent");

        self.await_receipt(tx_hash).await.map(Some)
    }
}
