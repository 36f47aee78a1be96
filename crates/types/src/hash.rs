//! Manual EIP-712 struct hashing.
//!
//! Every hasher computes `keccak256(abi.encode(typeHash, fields...))`, with
//! nested structs replaced by their own struct hash. Field order follows the
//! type strings in [`crate::typehash`].

use crate::typehash::Eip712Type;
use alloy::{
    primitives::{keccak256, B256, U256},
    sol_types::SolValue,
};
use otc_bindings::{
    EscrowParams, IntentParams, LegacyEscrowParams, PermitDetails, PermitSingle,
    PermitTransferFrom, PermitWitnessTransferFrom, Range, TokenPermissions,
};

/// A type with an EIP-712 struct hash.
pub trait StructHash {
    /// The registered EIP-712 type.
    const TYPE: Eip712Type;

    /// Compute the struct hash.
    fn struct_hash(&self) -> B256;

    /// Get the type hash.
    fn type_hash() -> B256 {
        Self::TYPE.type_hash()
    }
}

impl StructHash for Range {
    const TYPE: Eip712Type = Eip712Type::Range;

    fn struct_hash(&self) -> B256 {
        keccak256((Self::type_hash(), self.min, self.max).abi_encode())
    }
}

impl StructHash for IntentParams {
    const TYPE: Eip712Type = Eip712Type::IntentParams;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.token,
                self.range.struct_hash(),
                U256::from(self.expiryTime),
                self.currency,
                self.paymentMethod,
                self.payeeDetails,
                self.price,
            )
                .abi_encode(),
        )
    }
}

impl StructHash for EscrowParams {
    const TYPE: Eip712Type = Eip712Type::EscrowParams;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.id,
                self.token,
                self.volume,
                self.price,
                self.usdRate,
                self.payer,
                self.seller,
                self.sellerFeeRate,
                self.paymentMethod,
                self.currency,
                self.payeeDetails,
                self.buyer,
                self.buyerFeeRate,
            )
                .abi_encode(),
        )
    }
}

impl StructHash for LegacyEscrowParams {
    const TYPE: Eip712Type = Eip712Type::LegacyEscrowParams;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.id,
                self.token,
                self.volume,
                self.price,
                self.usdRate,
                self.seller,
                self.sellerFeeRate,
                self.paymentMethod,
                self.currency,
                self.payeeId,
                self.payeeAccount,
                self.buyer,
                self.buyerFeeRate,
            )
                .abi_encode(),
        )
    }
}

impl StructHash for TokenPermissions {
    const TYPE: Eip712Type = Eip712Type::TokenPermissions;

    fn struct_hash(&self) -> B256 {
        keccak256((Self::type_hash(), self.token, self.amount).abi_encode())
    }
}

impl StructHash for PermitTransferFrom {
    const TYPE: Eip712Type = Eip712Type::PermitTransferFrom;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.permitted.struct_hash(),
                self.spender,
                self.nonce,
                self.deadline,
            )
                .abi_encode(),
        )
    }
}

impl StructHash for PermitWitnessTransferFrom {
    const TYPE: Eip712Type = Eip712Type::PermitWitnessTransferFrom;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.permitted.struct_hash(),
                self.spender,
                self.nonce,
                self.deadline,
                self.witness.struct_hash(),
            )
                .abi_encode(),
        )
    }
}

impl StructHash for PermitDetails {
    const TYPE: Eip712Type = Eip712Type::PermitDetails;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (
                Self::type_hash(),
                self.token,
                U256::from(self.amount),
                U256::from(self.expiration),
                U256::from(self.nonce),
            )
                .abi_encode(),
        )
    }
}

impl StructHash for PermitSingle {
    const TYPE: Eip712Type = Eip712Type::PermitSingle;

    fn struct_hash(&self) -> B256 {
        keccak256(
            (Self::type_hash(), self.details.struct_hash(), self.spender, self.sigDeadline)
                .abi_encode(),
        )
    }
}

/// Hash of the `TokenPermissions` authorized for a settlement. This is the
/// `tokenPermissionsHash` argument of `execute`.
pub fn token_permissions_hash(permissions: &TokenPermissions) -> B256 {
    permissions.struct_hash()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::{commit, PayeeDetails};
    use alloy::{
        primitives::{
            address,
            aliases::{U160, U48},
            Address,
        },
        sol_types::SolStruct,
    };
    use proptest::prelude::*;

    fn intent() -> IntentParams {
        IntentParams {
            token: address!("0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238"),
            range: Range::new(U256::from(1_000_000u64), U256::from(50_000_000u64)),
            expiryTime: 1_760_000_000,
            currency: commit("CNY"),
            paymentMethod: commit("wechat"),
            payeeDetails: PayeeDetails::new("alice", "", "").commitment(),
            price: U256::from(7_200_000u64),
        }
    }

    fn escrow() -> EscrowParams {
        EscrowParams {
            id: U256::from(42),
            token: Address::repeat_byte(0x11),
            volume: U256::from(10_000_000u64),
            price: U256::from(7_200_000u64),
            usdRate: U256::from(1_000_000u64),
            payer: Address::repeat_byte(0x22),
            seller: Address::repeat_byte(0x33),
            sellerFeeRate: U256::from(10),
            paymentMethod: commit("wechat"),
            currency: commit("CNY"),
            payeeDetails: commit("alice"),
            buyer: Address::repeat_byte(0x44),
            buyerFeeRate: U256::from(20),
        }
    }

    fn legacy_escrow() -> LegacyEscrowParams {
        let current = escrow();
        LegacyEscrowParams {
            id: current.id,
            token: current.token,
            volume: current.volume,
            price: current.price,
            usdRate: current.usdRate,
            seller: current.seller,
            sellerFeeRate: current.sellerFeeRate,
            paymentMethod: current.paymentMethod,
            currency: current.currency,
            payeeId: commit("wechat-id"),
            payeeAccount: commit("alice"),
            buyer: current.buyer,
            buyerFeeRate: current.buyerFeeRate,
        }
    }

    fn permit_single() -> PermitSingle {
        PermitSingle {
            details: PermitDetails {
                token: Address::repeat_byte(0x11),
                amount: U160::from(5_000_000u64),
                expiration: U48::from(1_760_000_000u64),
                nonce: U48::from(3u64),
            },
            spender: Address::repeat_byte(0x55),
            sigDeadline: U256::from(1_760_000_600u64),
        }
    }

    #[test]
    fn manual_hashes_match_eip712_derivation() {
        let intent = intent();
        let permitted = TokenPermissions::new(intent.token, U256::from(10_000_000u64));
        let permit = PermitTransferFrom {
            permitted,
            spender: Address::repeat_byte(0x66),
            nonce: U256::from(9),
            deadline: U256::from(1_760_000_000u64),
        };
        let witness = PermitWitnessTransferFrom {
            permitted,
            spender: permit.spender,
            nonce: permit.nonce,
            deadline: permit.deadline,
            witness: intent,
        };
        let single = permit_single();

        assert_eq!(intent.range.struct_hash(), intent.range.eip712_hash_struct());
        assert_eq!(intent.struct_hash(), intent.eip712_hash_struct());
        assert_eq!(escrow().struct_hash(), escrow().eip712_hash_struct());
        assert_eq!(legacy_escrow().struct_hash(), legacy_escrow().eip712_hash_struct());
        assert_eq!(permitted.struct_hash(), permitted.eip712_hash_struct());
        assert_eq!(permit.struct_hash(), permit.eip712_hash_struct());
        assert_eq!(witness.struct_hash(), witness.eip712_hash_struct());
        assert_eq!(single.details.struct_hash(), single.details.eip712_hash_struct());
        assert_eq!(single.struct_hash(), single.eip712_hash_struct());
    }

    #[test]
    fn struct_hash_is_stable() {
        assert_eq!(intent().struct_hash(), intent().struct_hash());
        assert_eq!(escrow().struct_hash(), escrow().struct_hash());
    }

    #[test]
    fn field_order_is_load_bearing() {
        let base = escrow();
        let mut swapped = base;
        swapped.buyerFeeRate = base.sellerFeeRate;
        swapped.sellerFeeRate = base.buyerFeeRate;
        assert_ne!(base.struct_hash(), swapped.struct_hash());

        let mut roles = base;
        roles.payer = base.seller;
        roles.seller = base.payer;
        assert_ne!(base.struct_hash(), roles.struct_hash());
    }

    #[test]
    fn legacy_and_current_escrow_differ() {
        let current = escrow();
        let legacy = legacy_escrow();
        assert_ne!(current.struct_hash(), legacy.struct_hash());
        assert_ne!(EscrowParams::type_hash(), LegacyEscrowParams::type_hash());
    }

    #[test]
    fn token_permissions_hash_is_struct_hash() {
        let permitted = TokenPermissions::new(Address::repeat_byte(0x11), U256::from(1));
        assert_eq!(token_permissions_hash(&permitted), permitted.eip712_hash_struct());
    }

    prop_compose! {
        fn arb_intent()(
            token in any::<[u8; 20]>(),
            min in any::<u64>(),
            max in any::<u64>(),
            expiry in any::<u64>(),
            currency in "[A-Z]{3}",
            method in "[a-z]{1,12}",
            price in any::<u128>(),
        ) -> IntentParams {
            IntentParams {
                token: Address::from(token),
                range: Range::new(U256::from(min), U256::from(max)),
                expiryTime: expiry,
                currency: commit(&currency),
                paymentMethod: commit(&method),
                payeeDetails: B256::ZERO,
                price: U256::from(price),
            }
        }
    }

    proptest! {
        #[test]
        fn intent_hash_agrees(intent in arb_intent()) {
            prop_assert_eq!(intent.struct_hash(), intent.eip712_hash_struct());
            prop_assert_eq!(intent.struct_hash(), intent.struct_hash());
        }

        #[test]
        fn price_changes_hash(intent in arb_intent(), bump in 1u64..) {
            let mut other = intent;
            other.price = intent.price + U256::from(bump);
            prop_assert_ne!(intent.struct_hash(), other.struct_hash());
        }
    }
}
