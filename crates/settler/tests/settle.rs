use alloy::{
    primitives::{Address, Bytes, ChainId, Signature, TxHash, B256, U256},
    signers::{local::PrivateKeySigner, Signer},
    sol_types::{SolCall, SolError, SolValue},
};
use core::time::Duration;
use otc_bindings::{Permit2, Settler as SettlerContract};
use otc_constants::{
    test_utils::{ALLOWANCE_HOLDER, ESCROW, SETTLER, TOKEN},
    GasPolicy, SettlementConstants, PERMIT2_ADDRESS,
};
use otc_settler::{
    CallOutcome, ChainClient, ReceiptSummary, SettlementRequest, Settler, SettlerError,
    TransferRequest,
};
use otc_types::{
    config::{
        AllowanceConfig, EscrowConfig, IntentConfig, PermitConfig, RawAllowanceConfig,
        RawEscrowConfig, RawIntentConfig, RawPermitConfig, RawPermitSingleConfig,
    },
    test_utils::{TEST_SIGNERS, TEST_USERS},
    ActionKind, PayeeDetails, Remediation, SettlementError,
};
use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

const FAR_FUTURE: &str = "4102444800";

#[derive(Debug, Default)]
struct Recorded {
    simulated: Vec<(Address, Address)>,
    sent: Vec<(Address, Bytes, u64)>,
}

#[derive(Debug, Clone)]
struct MockClient {
    chain_id: u64,
    estimate: Option<u64>,
    revert: Option<Bytes>,
    receipt: Option<bool>,
    allowance: Bytes,
    recorded: Arc<Mutex<Recorded>>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self {
            chain_id: SettlementConstants::test().chain_id(),
            estimate: Some(300_000),
            revert: None,
            receipt: Some(true),
            allowance: allowance_returns(1_000, FAR_FUTURE.parse().unwrap(), 0),
            recorded: Default::default(),
        }
    }
}

impl MockClient {
    fn sent(&self) -> Vec<(Address, Bytes, u64)> {
        self.recorded.lock().unwrap().sent.clone()
    }
}

impl ChainClient for MockClient {
    type Error = io::Error;

    async fn get_chain_id(&self) -> io::Result<u64> {
        Ok(self.chain_id)
    }

    async fn estimate_gas(&self, _from: Address, _to: Address, _data: Bytes) -> io::Result<u64> {
        self.estimate.ok_or_else(|| io::Error::other("execution reverted"))
    }

    async fn simulate(&self, from: Address, to: Address, _data: Bytes) -> io::Result<CallOutcome> {
        self.recorded.lock().unwrap().simulated.push((from, to));
        Ok(match &self.revert {
            Some(data) => CallOutcome::Reverted(data.clone()),
            None => CallOutcome::Success(Bytes::new()),
        })
    }

    async fn send_transaction(&self, to: Address, data: Bytes, gas: u64) -> io::Result<TxHash> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.sent.push((to, data, gas));
        Ok(TxHash::with_last_byte(recorded.sent.len() as u8))
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        _timeout: Duration,
    ) -> io::Result<Option<ReceiptSummary>> {
        Ok(self.receipt.map(|success| ReceiptSummary {
            tx_hash,
            success,
            block_number: Some(7),
            gas_used: 250_000,
        }))
    }

    async fn read_contract(&self, _to: Address, _data: Bytes) -> io::Result<Bytes> {
        Ok(self.allowance.clone())
    }
}

/// A local signer that counts the hashes it signs.
#[derive(Debug, Clone)]
struct CountingSigner {
    inner: PrivateKeySigner,
    signed: Arc<AtomicUsize>,
}

impl CountingSigner {
    fn new(inner: PrivateKeySigner) -> Self {
        Self { inner, signed: Default::default() }
    }

    fn signed(&self) -> usize {
        self.signed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Signer for CountingSigner {
    async fn sign_hash(&self, hash: &B256) -> alloy::signers::Result<Signature> {
        self.signed.fetch_add(1, Ordering::SeqCst);
        self.inner.sign_hash(hash).await
    }

    fn address(&self) -> Address {
        self.inner.address()
    }

    fn chain_id(&self) -> Option<ChainId> {
        self.inner.chain_id()
    }

    fn set_chain_id(&mut self, chain_id: Option<ChainId>) {
        self.inner.set_chain_id(chain_id)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn allowance_returns(amount: u64, expiration: u64, nonce: u64) -> Bytes {
    (U256::from(amount), U256::from(expiration), U256::from(nonce)).abi_encode_params().into()
}

fn settler(client: MockClient) -> Settler<PrivateKeySigner, MockClient> {
    Settler::new(TEST_SIGNERS[0].clone(), client, SettlementConstants::test())
}

fn intent() -> IntentConfig {
    RawIntentConfig {
        token: TOKEN.to_string(),
        range_min: "1".into(),
        range_max: "1000000".into(),
        expiry_time: FAR_FUTURE.into(),
        currency: "CNY".into(),
        payment_method: "wechat".into(),
        payee: PayeeDetails::new("dust", "Q", "m"),
        price: "7".into(),
    }
    .try_into()
    .unwrap()
}

fn escrow() -> EscrowConfig {
    RawEscrowConfig {
        id: "42".into(),
        token: TOKEN.to_string(),
        volume: "500".into(),
        price: "7".into(),
        usd_rate: "1".into(),
        payer: TEST_USERS[0].to_string(),
        seller: TEST_USERS[0].to_string(),
        seller_fee_rate: "0".into(),
        payment_method: "wechat".into(),
        currency: "CNY".into(),
        payee: PayeeDetails::new("dust", "Q", "m"),
        buyer: TEST_USERS[2].to_string(),
        buyer_fee_rate: "0".into(),
    }
    .try_into()
    .unwrap()
}

fn permit() -> PermitConfig {
    RawPermitConfig {
        token: TOKEN.to_string(),
        amount: "500".into(),
        nonce: "1".into(),
        deadline: FAR_FUTURE.into(),
        to: ESCROW.to_string(),
        requested_amount: String::new(),
    }
    .try_into()
    .unwrap()
}

fn allowance(with_permit: bool) -> AllowanceConfig {
    RawAllowanceConfig {
        from: TEST_USERS[0].to_string(),
        to: ESCROW.to_string(),
        amount: "500".into(),
        token: TOKEN.to_string(),
        allowance_holder: ALLOWANCE_HOLDER.to_string(),
        permit: with_permit.then(|| RawPermitSingleConfig {
            amount: "1000".into(),
            expiration: FAR_FUTURE.into(),
            nonce: "0".into(),
            sig_deadline: FAR_FUTURE.into(),
        }),
    }
    .try_into()
    .unwrap()
}

fn witness_request() -> SettlementRequest {
    SettlementRequest::new(
        intent(),
        escrow(),
        TransferRequest::WitnessPermit { config: permit(), signature: None },
    )
}

#[tokio::test]
async fn witness_permit_settles() {
    init_tracing();
    let client = MockClient::default();
    let settler = settler(client.clone());

    let settlement = settler.sign_and_settle(witness_request()).await.unwrap();
    assert!(settlement.receipt().success);
    assert_eq!(settlement.gas_limit(), 300_000);

    let kinds: Vec<_> = settlement.payload().actions().iter().map(|a| a.kind()).collect();
    assert_eq!(
        kinds,
        [
            ActionKind::EscrowAndIntentCheck,
            ActionKind::EscrowParamsCheck,
            ActionKind::SignatureTransferFromWithWitness
        ]
    );

    let simulated = client.recorded.lock().unwrap().simulated.clone();
    assert_eq!(simulated, [(TEST_USERS[0], SETTLER)]);

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    let (to, data, gas) = &sent[0];
    assert_eq!(*to, SETTLER);
    assert_eq!(*gas, 300_000);
    let call = SettlerContract::executeCall::abi_decode(data).unwrap();
    assert_eq!(call.payer, TEST_USERS[0]);
    assert_eq!(call.actions.len(), 3);

    // The witness flow carries no intent signature in the first action.
    let check =
        SettlerContract::ESCROW_AND_INTENT_CHECKCall::abi_decode(&call.actions[0]).unwrap();
    assert!(check.makerIntentSig.is_empty());
}

#[tokio::test]
async fn collected_signatures_are_used() {
    let relayer_signature = Bytes::from(vec![0xab; 65]);
    let request = SettlementRequest::new(
        intent(),
        escrow(),
        TransferRequest::PlainPermit { config: permit(), signature: None },
    )
    .with_escrow_signature(relayer_signature.clone())
    .with_payer(TEST_USERS[3]);

    let builder = settler(MockClient::default()).prepare(request).await.unwrap();
    let payload = builder.build().unwrap();
    assert_eq!(payload.payer(), TEST_USERS[3]);

    let params =
        SettlerContract::ESCROW_PARAMS_CHECKCall::abi_decode(payload.actions()[1].data()).unwrap();
    assert_eq!(params.sig, relayer_signature);

    // The plain flow needs an intent signature, produced locally.
    let check =
        SettlerContract::ESCROW_AND_INTENT_CHECKCall::abi_decode(payload.actions()[0].data())
            .unwrap();
    assert_eq!(check.makerIntentSig.len(), 65);
}

#[tokio::test]
async fn chain_mismatch_sends_nothing() {
    let client = MockClient { chain_id: 1, ..Default::default() };
    let signer = CountingSigner::new(TEST_SIGNERS[0].clone());
    let settler = Settler::new(signer.clone(), client.clone(), SettlementConstants::test());

    let err = settler.sign_and_settle(witness_request()).await.unwrap_err();
    assert!(matches!(err, SettlerError::ChainMismatch { expected: 31337, actual: 1 }));
    let err = settler.prepare(witness_request()).await.unwrap_err();
    assert!(matches!(err, SettlerError::ChainMismatch { .. }));

    assert_eq!(signer.signed(), 0);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn counting_signer_signs_each_missing_signature() {
    let signer = CountingSigner::new(TEST_SIGNERS[0].clone());
    let settler = Settler::new(signer.clone(), MockClient::default(), SettlementConstants::test());
    settler.sign_and_settle(witness_request()).await.unwrap();
    // escrow and witness permit
    assert_eq!(signer.signed(), 2);
}

#[tokio::test]
async fn simulation_revert_is_decoded() {
    init_tracing();
    let revert = SettlerContract::ActionInvalid {
        i: U256::from(2),
        action: ActionKind::SignatureTransferFromWithWitness.derived_selector(),
        data: SettlerContract::InvalidNonce {}.abi_encode().into(),
    }
    .abi_encode();
    let client = MockClient { revert: Some(revert.into()), ..Default::default() };

    let err = settler(client.clone()).sign_and_settle(witness_request()).await.unwrap_err();
    let decoded = err.revert().expect("reverted");
    assert!(matches!(
        decoded,
        SettlementError::ActionInvalid {
            kind: Some(ActionKind::SignatureTransferFromWithWitness),
            ..
        }
    ));
    assert_eq!(decoded.remediation(), Remediation::UseCorrectNonce);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn gas_policy_falls_back_and_caps() {
    let client = MockClient { estimate: None, ..Default::default() };
    let settlement = settler(client).sign_and_settle(witness_request()).await.unwrap();
    assert_eq!(settlement.gas_limit(), GasPolicy::SETTLEMENT_FALLBACK);

    let client = MockClient { estimate: Some(30_000_000), ..Default::default() };
    let settlement = settler(client).sign_and_settle(witness_request()).await.unwrap();
    assert_eq!(settlement.gas_limit(), GasPolicy::NODE_GAS_CAP);
}

#[tokio::test]
async fn receipt_timeout_and_failure() {
    let client = MockClient { receipt: None, ..Default::default() };
    let err = settler(client)
        .with_receipt_timeout(Duration::from_millis(10))
        .sign_and_settle(witness_request())
        .await
        .unwrap_err();
    assert!(matches!(err, SettlerError::ReceiptTimeout(hash) if hash == TxHash::with_last_byte(1)));

    let client = MockClient { receipt: Some(false), ..Default::default() };
    let err = settler(client).sign_and_settle(witness_request()).await.unwrap_err();
    assert!(matches!(err, SettlerError::Failed(_)));
}

#[tokio::test]
async fn sufficient_allowance_is_left_alone() {
    let client = MockClient::default();
    let settler = settler(client.clone());

    let status = settler.check_allowance(&allowance(false)).await.unwrap();
    assert!(status.sufficient);
    assert!(!status.expired);
    assert_eq!(settler.ensure_allowance(&allowance(false)).await.unwrap(), None);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn insufficient_allowance_is_reauthorized() {
    init_tracing();
    let client = MockClient {
        estimate: Some(30_000_000),
        allowance: allowance_returns(100, FAR_FUTURE.parse().unwrap(), 0),
        ..Default::default()
    };
    let settler = settler(client.clone());

    let receipt = settler.ensure_allowance(&allowance(true)).await.unwrap().unwrap();
    assert!(receipt.success);

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    let (to, data, gas) = &sent[0];
    assert_eq!(*to, PERMIT2_ADDRESS);
    // Permit submissions are not capped.
    assert_eq!(*gas, 30_000_000);

    let call = Permit2::permitCall::abi_decode(data).unwrap();
    assert_eq!(call.owner, TEST_USERS[0]);
    assert_eq!(call.permitSingle.spender, ALLOWANCE_HOLDER);
    assert_eq!(call.permitSingle.details.token, TOKEN);
    assert_eq!(call.signature.len(), 65);
}

#[tokio::test]
async fn expired_allowance_without_grant_is_an_error() {
    let client = MockClient { allowance: allowance_returns(1_000, 1, 3), ..Default::default() };
    let err = settler(client.clone()).ensure_allowance(&allowance(false)).await.unwrap_err();
    let SettlerError::Unauthorized(status) = err else {
        panic!("expected Unauthorized, got {err:?}");
    };
    assert!(status.expired);
    assert!(status.needs_authorization());
    assert_eq!(status.nonce.to::<u64>(), 3);
    assert!(client.sent().is_empty());
}

#[tokio::test]
async fn allowance_transfer_settles() {
    let request = SettlementRequest::new(
        intent(),
        escrow(),
        TransferRequest::AllowanceTransfer(allowance(false)),
    );
    let settlement = settler(MockClient::default()).sign_and_settle(request).await.unwrap();

    let actions = settlement.payload().actions();
    assert_eq!(actions[2].kind(), ActionKind::BulkSellTransferFrom);

    let check =
        SettlerContract::ESCROW_AND_INTENT_CHECKCall::abi_decode(actions[0].data()).unwrap();
    let transfer =
        SettlerContract::BULK_SELL_TRANSFER_FROMCall::abi_decode(actions[2].data()).unwrap();
    assert_eq!(check.makerIntentSig, transfer.makerIntentSig);
    assert_eq!(transfer.details.from, TEST_USERS[0]);
}
