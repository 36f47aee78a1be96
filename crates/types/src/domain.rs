use crate::typehash::Eip712Type;
use alloy::{
    primitives::{keccak256, Address, B256, U256},
    sol_types::{Eip712Domain, SolValue},
};
use otc_constants::{SettlementConstants, PERMIT2_CONTRACT_NAME};
use std::borrow::Cow;

/// Get the EIP-712 domain of the settler described by `constants`.
pub fn settlement_domain(constants: &SettlementConstants) -> Eip712Domain {
    Eip712Domain {
        name: Some(Cow::Owned(constants.domain_name().to_owned())),
        version: Some(Cow::Owned(constants.domain_version().to_owned())),
        chain_id: Some(constants.chain_id_u256()),
        verifying_contract: Some(constants.settler()),
        salt: None,
    }
}

/// Get the EIP-712 domain of a Permit2 deployment. Permit2 has no version.
pub fn permit2_domain(chain_id: u64, permit2: Address) -> Eip712Domain {
    Eip712Domain {
        name: Some(PERMIT2_CONTRACT_NAME.into()),
        version: None,
        chain_id: Some(U256::from(chain_id)),
        verifying_contract: Some(permit2),
        salt: None,
    }
}

/// Compute a domain separator.
///
/// `keccak256(abi.encode(typeHash, keccak256(name), [keccak256(version),]
/// chainId, verifyingContract))`, where the type hash depends on whether a
/// version is present.
pub fn domain_separator(
    name: &str,
    version: Option<&str>,
    chain_id: u64,
    verifying_contract: Address,
) -> B256 {
    let chain_id = U256::from(chain_id);
    let encoded = match version {
        Some(version) => (
            Eip712Type::Domain.type_hash(),
            keccak256(name),
            keccak256(version),
            chain_id,
            verifying_contract,
        )
            .abi_encode(),
        None => {
            (Eip712Type::DomainNoVersion.type_hash(), keccak256(name), chain_id, verifying_contract)
                .abi_encode()
        }
    };
    keccak256(encoded)
}

/// Compute the separator of the settler domain described by `constants`.
pub fn settlement_domain_separator(constants: &SettlementConstants) -> B256 {
    domain_separator(
        constants.domain_name(),
        Some(constants.domain_version()),
        constants.chain_id(),
        constants.settler(),
    )
}

/// Compute the separator of a Permit2 domain.
pub fn permit2_domain_separator(chain_id: u64, permit2: Address) -> B256 {
    domain_separator(PERMIT2_CONTRACT_NAME, None, chain_id, permit2)
}
