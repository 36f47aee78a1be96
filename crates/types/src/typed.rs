use crate::hash::StructHash;
use alloy::{
    dyn_abi::TypedData,
    primitives::{keccak256, B256},
    sol_types::{Eip712Domain, SolStruct},
};

/// Compute an EIP-712 digest: `keccak256(0x1901 ∥ domainSeparator ∥
/// structHash)`.
pub fn typed_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut buf = [0u8; 66];
    buf[0] = 0x19;
    buf[1] = 0x01;
    buf[2..34].copy_from_slice(domain_separator.as_slice());
    buf[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

/// Struct hash and digest of a message, side by side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedPreview {
    /// The EIP-712 struct hash.
    pub struct_hash: B256,
    /// The EIP-712 digest under the preview's domain.
    pub typed_hash: B256,
}

/// A message that can be hashed and signed under an EIP-712 domain.
pub trait TypedMessage: StructHash + SolStruct + serde::Serialize {
    /// Compute the digest of this message under the domain with the given
    /// separator.
    fn typed_hash(&self, domain_separator: B256) -> B256 {
        typed_hash(domain_separator, self.struct_hash())
    }

    /// Compute both hashes of this message.
    fn preview(&self, domain_separator: B256) -> TypedPreview {
        let struct_hash = self.struct_hash();
        TypedPreview { struct_hash, typed_hash: typed_hash(domain_separator, struct_hash) }
    }

    /// Get the signing request for this message. The request carries the
    /// domain, the type map, the primary type and the unhashed message.
    fn signing_request(&self, domain: &Eip712Domain) -> TypedData {
        TypedData::from_struct(self, Some(domain.clone()))
    }
}

impl<T> TypedMessage for T where T: StructHash + SolStruct + serde::Serialize {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commitment::{commit, PayeeDetails},
        domain::{
            permit2_domain, permit2_domain_separator, settlement_domain,
            settlement_domain_separator,
        },
    };
    use alloy::primitives::{address, b256, Address, U256};
    use otc_bindings::{IntentParams, PermitWitnessTransferFrom, Range, TokenPermissions};
    use otc_constants::{sepolia, SettlementConstants};

    fn sepolia_intent() -> IntentParams {
        IntentParams {
            token: sepolia::USDC,
            range: Range::new(U256::from(1_000_000u64), U256::from(100_000_000u64)),
            expiryTime: 1_767_225_600,
            currency: commit("CNY"),
            paymentMethod: commit("wechat"),
            payeeDetails: PayeeDetails::new("alice@wechat", "", "otc").commitment(),
            price: U256::from(7_130_000u64),
        }
    }

    #[test]
    fn sepolia_intent_digest_agrees() {
        let constants = SettlementConstants::sepolia();
        let intent = sepolia_intent();
        let domain = settlement_domain(&constants);

        let manual = intent.typed_hash(settlement_domain_separator(&constants));
        assert_eq!(manual, intent.eip712_signing_hash(&domain));

        let request = intent.signing_request(&domain);
        assert_eq!(request.primary_type, "IntentParams");
        assert_eq!(request.eip712_signing_hash().unwrap(), manual);
    }

    #[test]
    fn usdc_intent_conformance_digest() {
        const EXPIRY: u64 = 1_767_225_600;
        const ONE: u64 = 1_000_000_000_000_000_000;

        let payee_details = PayeeDetails::new("alice@wechat", "", "otc").commitment();
        assert_eq!(
            payee_details,
            b256!("0x38e12556685879c61c332064c142fcef692fbc361b126a2f390dc072eca6949c")
        );
        let intent = IntentParams {
            token: sepolia::USDC,
            range: Range::new(U256::from(ONE), U256::from(2 * ONE)),
            expiryTime: EXPIRY,
            currency: commit("USD"),
            paymentMethod: commit("wechat"),
            payeeDetails: payee_details,
            price: U256::from(ONE),
        };
        let constants = SettlementConstants::sepolia();
        let separator = settlement_domain_separator(&constants);
        assert_eq!(
            separator,
            b256!("0x456ae8672f70ec8f89c368bf0a50f2da6b9c6a85e40384ef93f971764aeb2557")
        );

        let preview = intent.preview(separator);
        assert_eq!(
            preview.struct_hash,
            b256!("0x1dd308ed2603a7ea83f256fb004e2891d82a7cc917b09d2c6086ef6dde9a8a2c")
        );
        assert_eq!(
            preview.typed_hash,
            b256!("0xfe0e20fa8ea0882270bdc084ca7446d06c5ccc013c25c2245ea33adc9aa50d47")
        );
        assert_eq!(preview.typed_hash, intent.eip712_signing_hash(&settlement_domain(&constants)));
    }

    #[test]
    fn digest_is_domain_sensitive() {
        let constants = SettlementConstants::sepolia();
        let intent = sepolia_intent();

        let sepolia = intent.preview(settlement_domain_separator(&constants));
        let mainnet = intent.preview(settlement_domain_separator(&constants.with_chain_id(1)));

        assert_eq!(sepolia.struct_hash, mainnet.struct_hash);
        assert_ne!(sepolia.typed_hash, mainnet.typed_hash);
    }

    #[test]
    fn witness_digest_under_permit2_domain() {
        let intent = sepolia_intent();
        let permit = PermitWitnessTransferFrom {
            permitted: TokenPermissions::new(intent.token, U256::from(5_000_000u64)),
            spender: sepolia::SETTLER,
            nonce: U256::from(77),
            deadline: U256::from(intent.expiryTime),
            witness: intent,
        };
        let domain = permit2_domain(sepolia::CHAIN_ID, otc_constants::PERMIT2_ADDRESS);
        let manual = permit.typed_hash(permit2_domain_separator(
            sepolia::CHAIN_ID,
            otc_constants::PERMIT2_ADDRESS,
        ));
        assert_eq!(manual, permit.eip712_signing_hash(&domain));

        let request = permit.signing_request(&domain);
        assert!(request.domain.version.is_none());
        assert_eq!(request.eip712_signing_hash().unwrap(), manual);
    }

    #[test]
    fn preview_serializes_camel_case() {
        let preview = sepolia_intent().preview(B256::ZERO);
        let json = serde_json::to_value(preview).unwrap();
        assert!(json.get("structHash").is_some());
        assert!(json.get("typedHash").is_some());
    }

    #[derive(Debug, serde::Serialize)]
    struct IntentVector {
        name: &'static str,
        chain_id: u64,
        settler: String,
        intent: IntentParams,
        expected_domain_separator: String,
        expected_struct_hash: String,
        expected_typed_hash: String,
    }

    fn intent_vector(
        name: &'static str,
        constants: &SettlementConstants,
        intent: IntentParams,
    ) -> IntentVector {
        let separator = settlement_domain_separator(constants);
        let preview = intent.preview(separator);
        IntentVector {
            name,
            chain_id: constants.chain_id(),
            settler: format!("{:#x}", constants.settler()),
            intent,
            expected_domain_separator: format!("{separator:#x}"),
            expected_struct_hash: format!("{:#x}", preview.struct_hash),
            expected_typed_hash: format!("{:#x}", preview.typed_hash),
        }
    }

    /// Prints intent digest vectors for cross-checking other clients.
    /// Run with `cargo t -p otc-types intent_vectors -- --nocapture --ignored`
    #[test]
    #[ignore = "vector generation for external clients - run manually when needed"]
    fn intent_vectors() {
        let constants = SettlementConstants::sepolia();
        let vectors = vec![
            intent_vector("minimal", &constants, IntentParams::default()),
            intent_vector("sepolia_usdc", &constants, sepolia_intent()),
            intent_vector(
                "foreign_token",
                &constants,
                IntentParams {
                    token: address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                    ..sepolia_intent()
                },
            ),
            intent_vector(
                "zero_settler",
                &SettlementConstants::new(
                    constants.chain_id(),
                    Address::ZERO,
                    constants.escrow(),
                    constants.permit2(),
                    constants.domain_name().to_owned().into(),
                    constants.domain_version().to_owned().into(),
                ),
                sepolia_intent(),
            ),
        ];

        println!("{}", serde_json::to_string_pretty(&vectors).unwrap());
    }
}
