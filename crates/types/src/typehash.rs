use alloy::primitives::{keccak256, B256};
use std::sync::LazyLock;

/// `Range` type string.
pub const RANGE_TYPE: &str = "Range(uint256 min,uint256 max)";

/// `IntentParams` type string, including its `Range` dependency.
pub const INTENT_PARAMS_TYPE: &str = "IntentParams(address token,Range range,uint64 expiryTime,bytes32 currency,bytes32 paymentMethod,bytes32 payeeDetails,uint256 price)Range(uint256 min,uint256 max)";

/// `EscrowParams` type string.
pub const ESCROW_PARAMS_TYPE: &str = "EscrowParams(uint256 id,address token,uint256 volume,uint256 price,uint256 usdRate,address payer,address seller,uint256 sellerFeeRate,bytes32 paymentMethod,bytes32 currency,bytes32 payeeDetails,address buyer,uint256 buyerFeeRate)";

/// Type string of the payer-less `EscrowParams` used by earlier settlers.
pub const LEGACY_ESCROW_PARAMS_TYPE: &str = "EscrowParams(uint256 id,address token,uint256 volume,uint256 price,uint256 usdRate,address seller,uint256 sellerFeeRate,bytes32 paymentMethod,bytes32 currency,bytes32 payeeId,bytes32 payeeAccount,address buyer,uint256 buyerFeeRate)";

/// Permit2 `TokenPermissions` type string.
pub const TOKEN_PERMISSIONS_TYPE: &str = "TokenPermissions(address token,uint256 amount)";

/// Permit2 `PermitTransferFrom` type string.
pub const PERMIT_TRANSFER_FROM_TYPE: &str = "PermitTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline)TokenPermissions(address token,uint256 amount)";

/// Permit2 `PermitWitnessTransferFrom` type string with an `IntentParams`
/// witness. Dependencies follow in alphabetical order.
pub const PERMIT_WITNESS_TRANSFER_FROM_TYPE: &str = "PermitWitnessTransferFrom(TokenPermissions permitted,address spender,uint256 nonce,uint256 deadline,IntentParams witness)IntentParams(address token,Range range,uint64 expiryTime,bytes32 currency,bytes32 paymentMethod,bytes32 payeeDetails,uint256 price)Range(uint256 min,uint256 max)TokenPermissions(address token,uint256 amount)";

/// Permit2 `PermitDetails` type string.
pub const PERMIT_DETAILS_TYPE: &str =
    "PermitDetails(address token,uint160 amount,uint48 expiration,uint48 nonce)";

/// Permit2 `PermitSingle` type string.
pub const PERMIT_SINGLE_TYPE: &str = "PermitSingle(PermitDetails details,address spender,uint256 sigDeadline)PermitDetails(address token,uint160 amount,uint48 expiration,uint48 nonce)";

/// `EIP712Domain` type string with all of name, version, chain id and
/// verifying contract.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// `EIP712Domain` type string without a version, as used by Permit2.
pub const EIP712_DOMAIN_NO_VERSION_TYPE: &str =
    "EIP712Domain(string name,uint256 chainId,address verifyingContract)";

/// The EIP-712 types known to the codec.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Eip712Type {
    /// `Range`.
    Range,
    /// `IntentParams`.
    IntentParams,
    /// `EscrowParams`.
    EscrowParams,
    /// Payer-less `EscrowParams`.
    LegacyEscrowParams,
    /// `TokenPermissions`.
    TokenPermissions,
    /// `PermitTransferFrom`.
    PermitTransferFrom,
    /// `PermitWitnessTransferFrom` with an `IntentParams` witness.
    PermitWitnessTransferFrom,
    /// `PermitDetails`.
    PermitDetails,
    /// `PermitSingle`.
    PermitSingle,
    /// `EIP712Domain` with a version.
    Domain,
    /// `EIP712Domain` without a version.
    DomainNoVersion,
}

impl Eip712Type {
    /// All registered types.
    pub const ALL: [Self; 11] = [
        Self::Range,
        Self::IntentParams,
        Self::EscrowParams,
        Self::LegacyEscrowParams,
        Self::TokenPermissions,
        Self::PermitTransferFrom,
        Self::PermitWitnessTransferFrom,
        Self::PermitDetails,
        Self::PermitSingle,
        Self::Domain,
        Self::DomainNoVersion,
    ];

    /// The canonical type string.
    pub const fn type_string(self) -> &'static str {
        match self {
            Self::Range => RANGE_TYPE,
            Self::IntentParams => INTENT_PARAMS_TYPE,
            Self::EscrowParams => ESCROW_PARAMS_TYPE,
            Self::LegacyEscrowParams => LEGACY_ESCROW_PARAMS_TYPE,
            Self::TokenPermissions => TOKEN_PERMISSIONS_TYPE,
            Self::PermitTransferFrom => PERMIT_TRANSFER_FROM_TYPE,
            Self::PermitWitnessTransferFrom => PERMIT_WITNESS_TRANSFER_FROM_TYPE,
            Self::PermitDetails => PERMIT_DETAILS_TYPE,
            Self::PermitSingle => PERMIT_SINGLE_TYPE,
            Self::Domain => EIP712_DOMAIN_TYPE,
            Self::DomainNoVersion => EIP712_DOMAIN_NO_VERSION_TYPE,
        }
    }

    /// The primary type name, i.e. the type string up to the first `(`.
    pub fn primary_type(self) -> &'static str {
        let s = self.type_string();
        s.split_once('(').map_or(s, |(name, _)| name)
    }

    /// The type hash, `keccak256(type_string)`.
    pub fn type_hash(self) -> B256 {
        TYPE_HASHES[self as usize]
    }
}

static TYPE_HASHES: LazyLock<[B256; 11]> =
    LazyLock::new(|| Eip712Type::ALL.map(|ty| keccak256(ty.type_string())));

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolStruct;
    use otc_bindings::{
        EscrowParams, IntentParams, LegacyEscrowParams, PermitDetails, PermitSingle,
        PermitTransferFrom, PermitWitnessTransferFrom, Range, TokenPermissions,
    };

    #[test]
    fn registry_order_matches_discriminants() {
        for (i, ty) in Eip712Type::ALL.iter().enumerate() {
            assert_eq!(*ty as usize, i);
        }
    }

    #[test]
    fn type_hash_is_stable() {
        for ty in Eip712Type::ALL {
            assert_eq!(ty.type_hash(), ty.type_hash());
            assert_eq!(ty.type_hash(), keccak256(ty.type_string()));
        }
    }

    #[test]
    fn type_strings_match_bindings() {
        let cases = [
            (Eip712Type::Range, Range::eip712_encode_type()),
            (Eip712Type::IntentParams, IntentParams::eip712_encode_type()),
            (Eip712Type::EscrowParams, EscrowParams::eip712_encode_type()),
            (Eip712Type::LegacyEscrowParams, LegacyEscrowParams::eip712_encode_type()),
            (Eip712Type::TokenPermissions, TokenPermissions::eip712_encode_type()),
            (Eip712Type::PermitTransferFrom, PermitTransferFrom::eip712_encode_type()),
            (
                Eip712Type::PermitWitnessTransferFrom,
                PermitWitnessTransferFrom::eip712_encode_type(),
            ),
            (Eip712Type::PermitDetails, PermitDetails::eip712_encode_type()),
            (Eip712Type::PermitSingle, PermitSingle::eip712_encode_type()),
        ];
        for (ty, encoded) in cases {
            assert_eq!(ty.type_string(), encoded, "{ty:?}");
        }
    }

    #[test]
    fn legacy_escrow_hash_differs() {
        assert_ne!(
            Eip712Type::EscrowParams.type_hash(),
            Eip712Type::LegacyEscrowParams.type_hash()
        );
        assert_eq!(Eip712Type::LegacyEscrowParams.primary_type(), "EscrowParams");
    }

    #[test]
    fn primary_types() {
        assert_eq!(
            Eip712Type::PermitWitnessTransferFrom.primary_type(),
            "PermitWitnessTransferFrom"
        );
        assert_eq!(Eip712Type::Domain.primary_type(), "EIP712Domain");
    }
}
