//! Signing helpers.
//!
//! Each helper builds the signing request for one message under the right
//! domain and hands it to a [`Signer`]. The settlement messages are signed
//! under the settler domain, the Permit2 messages under the Permit2 domain.

mod error;
pub use error::SigningError;

use crate::{
    domain::{permit2_domain, settlement_domain},
    typed::TypedMessage,
};
use alloy::{
    primitives::{Bytes, Signature},
    signers::Signer,
    sol_types::Eip712Domain,
};
use otc_bindings::{
    EscrowParams, IntentParams, LegacyEscrowParams, PermitSingle, PermitTransferFrom,
    PermitWitnessTransferFrom,
};
use otc_constants::SettlementConstants;
use tracing::instrument;

/// Sign `message` under `domain`, returning the 65-byte signature.
pub async fn sign_message<S, T>(
    signer: &S,
    message: &T,
    domain: &Eip712Domain,
) -> Result<Bytes, SigningError>
where
    S: Signer + Sync + ?Sized,
    T: TypedMessage,
{
    let request = message.signing_request(domain);
    let signature: Signature = signer.sign_dynamic_typed_data(&request).await?;
    Ok(Bytes::copy_from_slice(&signature.as_bytes()))
}

/// Sign a maker intent.
#[instrument(skip_all, fields(signer = %signer.address(), token = %intent.token))]
pub async fn sign_intent<S: Signer + Sync + ?Sized>(
    signer: &S,
    intent: &IntentParams,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    sign_message(signer, intent, &settlement_domain(constants)).await
}

/// Sign an escrow, as the relayer.
#[instrument(skip_all, fields(signer = %signer.address(), id = %escrow.id))]
pub async fn sign_escrow<S: Signer + Sync + ?Sized>(
    signer: &S,
    escrow: &EscrowParams,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    sign_message(signer, escrow, &settlement_domain(constants)).await
}

/// Sign a payer-less escrow for an earlier settler revision. `constants`
/// should carry that revision's domain name.
#[instrument(skip_all, fields(signer = %signer.address(), id = %escrow.id))]
pub async fn sign_legacy_escrow<S: Signer + Sync + ?Sized>(
    signer: &S,
    escrow: &LegacyEscrowParams,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    sign_message(signer, escrow, &settlement_domain(constants)).await
}

/// Sign a Permit2 witness transfer. `permit.spender` must be the settler.
#[instrument(skip_all, fields(signer = %signer.address(), nonce = %permit.nonce))]
pub async fn sign_permit_witness<S: Signer + Sync + ?Sized>(
    signer: &S,
    permit: &PermitWitnessTransferFrom,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    let domain = permit2_domain(constants.chain_id(), constants.permit2());
    sign_message(signer, permit, &domain).await
}

/// Sign a plain Permit2 transfer. `permit.spender` must be the settler.
#[instrument(skip_all, fields(signer = %signer.address(), nonce = %permit.nonce))]
pub async fn sign_permit_transfer<S: Signer + Sync + ?Sized>(
    signer: &S,
    permit: &PermitTransferFrom,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    let domain = permit2_domain(constants.chain_id(), constants.permit2());
    sign_message(signer, permit, &domain).await
}

/// Sign a Permit2 allowance grant.
#[instrument(skip_all, fields(signer = %signer.address(), spender = %permit.spender))]
pub async fn sign_permit_single<S: Signer + Sync + ?Sized>(
    signer: &S,
    permit: &PermitSingle,
    constants: &SettlementConstants,
) -> Result<Bytes, SigningError> {
    let domain = permit2_domain(constants.chain_id(), constants.permit2());
    sign_message(signer, permit, &domain).await
}
