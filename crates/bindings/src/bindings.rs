#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]
use alloy::primitives::{Address, U256};

mod settlement {
    alloy::sol! {
        /// Accepted amount range of an intent.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct Range {
            uint256 min;
            uint256 max;
        }

        /// A maker's range-priced offer to trade a token.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct IntentParams {
            address token;
            Range range;
            uint64 expiryTime;
            bytes32 currency;
            bytes32 paymentMethod;
            bytes32 payeeDetails;
            uint256 price;
        }

        /// A concrete trade, attested to by the relayer.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct EscrowParams {
            uint256 id;
            address token;
            uint256 volume;
            uint256 price;
            uint256 usdRate;
            address payer;
            address seller;
            uint256 sellerFeeRate;
            bytes32 paymentMethod;
            bytes32 currency;
            bytes32 payeeDetails;
            address buyer;
            uint256 buyerFeeRate;
        }

        /// Token and amount of a Permit2 transfer.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct TokenPermissions {
            address token;
            uint256 amount;
        }

        /// Permit2 signature-transfer message, as signed. Permit2 fills
        /// `spender` from `msg.sender` when verifying.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct PermitTransferFrom {
            TokenPermissions permitted;
            address spender;
            uint256 nonce;
            uint256 deadline;
        }

        /// Permit2 signature-transfer message bound to an intent witness.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct PermitWitnessTransferFrom {
            TokenPermissions permitted;
            address spender;
            uint256 nonce;
            uint256 deadline;
            IntentParams witness;
        }

        /// Permit2 signature-transfer permit, as passed on chain (without
        /// `spender`).
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct SignaturePermit {
            TokenPermissions permitted;
            uint256 nonce;
            uint256 deadline;
        }

        /// Recipient and amount of a Permit2 signature transfer.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct SignatureTransferDetails {
            address to;
            uint256 requestedAmount;
        }

        /// A Permit2 allowance-based transfer.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct AllowanceTransferDetails {
            address from;
            address to;
            uint160 amount;
            address token;
        }

        /// Permit2 allowance grant details.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct PermitDetails {
            address token;
            uint160 amount;
            uint48 expiration;
            uint48 nonce;
        }

        /// Permit2 allowance grant message.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct PermitSingle {
            PermitDetails details;
            address spender;
            uint256 sigDeadline;
        }

        /// Actions, dispatcher and errors of the escrow-intent settler.
        #[derive(Debug, PartialEq, Eq)]
        interface Settler {
            function ESCROW_AND_INTENT_CHECK(EscrowParams escrowParams, IntentParams intentParams, bytes makerIntentSig) external;
            function ESCROW_PARAMS_CHECK(EscrowParams escrowParams, bytes sig) external;
            function SIGNATURE_TRANSFER_FROM_WITH_WITNESS(SignaturePermit permit, SignatureTransferDetails details, IntentParams intentParams, bytes sig) external;
            function SIGNATURE_TRANSFER_FROM(SignaturePermit permit, SignatureTransferDetails details, bytes sig) external;
            function BULK_SELL_TRANSFER_FROM(AllowanceTransferDetails details, IntentParams intentParams, bytes makerIntentSig) external;

            function execute(address payer, bytes32 tokenPermissionsHash, bytes32 escrowTypedHash, bytes32 intentTypeHash, bytes[] actions) external payable;

            error ActionInvalid(uint256 i, bytes4 action, bytes data);

            error SignatureExpired(uint256 deadline);
            error InvalidSigner();
            error InvalidToken();
            error InvalidAmount();
            error InvalidSpender();
            error InvalidSender();
            error InvalidSignature();
            error InvalidNonce();
            error InvalidSignatureLength();
            error InvalidSignatureLen();
            error InvalidContractSignature();
            error InsufficientAllowance(uint256 amount);
            error AllowanceExpired(uint256 deadline);
            error EscrowAlreadyExists(bytes32 escrowHash);
            error EscrowNotExists(bytes32 escrowHash);
            error EscrowStatusError(bytes32 escrowHash, uint8 expected, uint8 actual);
            error ForwarderNotAllowed();
            error TransferFromFailed();
            error TransferFailed();
            error ConfusedDeputy();
            error InvalidOffset();
            error InvalidTarget();
            error TooMuchSlippage(address token, uint256 expected, uint256 actual);
        }

        /// The subset of Permit2 used for allowance-based transfers.
        #[derive(Debug, PartialEq, Eq)]
        interface Permit2 {
            function allowance(address owner, address token, address spender) external view returns (uint160 amount, uint48 expiration, uint48 nonce);
            function permit(address owner, PermitSingle permitSingle, bytes signature) external;
        }
    }

    impl Copy for Range {}
    impl Copy for IntentParams {}
    impl Copy for EscrowParams {}
    impl Copy for TokenPermissions {}
    impl Copy for PermitTransferFrom {}
    impl Copy for PermitWitnessTransferFrom {}
    impl Copy for SignaturePermit {}
    impl Copy for SignatureTransferDetails {}
    impl Copy for AllowanceTransferDetails {}
    impl Copy for PermitDetails {}
    impl Copy for PermitSingle {}
}

mod legacy {
    alloy::sol! {
        /// The payer-less `EscrowParams` of earlier settler revisions.
        #[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        struct EscrowParams {
            uint256 id;
            address token;
            uint256 volume;
            uint256 price;
            uint256 usdRate;
            address seller;
            uint256 sellerFeeRate;
            bytes32 paymentMethod;
            bytes32 currency;
            bytes32 payeeId;
            bytes32 payeeAccount;
            address buyer;
            uint256 buyerFeeRate;
        }
    }

    impl Copy for EscrowParams {}
}

pub use legacy::EscrowParams as LegacyEscrowParams;
pub use settlement::{
    AllowanceTransferDetails, EscrowParams, IntentParams, PermitDetails, PermitSingle,
    PermitTransferFrom, PermitWitnessTransferFrom, Range, SignaturePermit,
    SignatureTransferDetails, TokenPermissions,
};

/// Settler actions, `execute`, and errors.
#[allow(non_snake_case)]
pub mod Settler {
    pub use super::settlement::Settler::*;
}

/// Permit2 allowance functions.
#[allow(non_snake_case)]
pub mod Permit2 {
    pub use super::settlement::Permit2::*;
}

impl Range {
    /// Create a new range.
    pub const fn new(min: U256, max: U256) -> Self {
        Self { min, max }
    }
}

impl TokenPermissions {
    /// Create new token permissions.
    pub const fn new(token: Address, amount: U256) -> Self {
        Self { token, amount }
    }
}

impl From<&SignaturePermit> for TokenPermissions {
    fn from(permit: &SignaturePermit) -> Self {
        permit.permitted
    }
}

impl From<&AllowanceTransferDetails> for TokenPermissions {
    fn from(details: &AllowanceTransferDetails) -> Self {
        Self { token: details.token, amount: U256::from(details.amount) }
    }
}

impl SignaturePermit {
    /// Attach the spender, producing the message Permit2 verifies.
    pub const fn with_spender(self, spender: Address) -> PermitTransferFrom {
        PermitTransferFrom {
            permitted: self.permitted,
            spender,
            nonce: self.nonce,
            deadline: self.deadline,
        }
    }

    /// Attach the spender and an intent witness, producing the message
    /// Permit2 verifies for a witness transfer.
    pub const fn with_witness(
        self,
        spender: Address,
        witness: IntentParams,
    ) -> PermitWitnessTransferFrom {
        PermitWitnessTransferFrom {
            permitted: self.permitted,
            spender,
            nonce: self.nonce,
            deadline: self.deadline,
            witness,
        }
    }
}

impl From<PermitTransferFrom> for SignaturePermit {
    fn from(permit: PermitTransferFrom) -> Self {
        Self { permitted: permit.permitted, nonce: permit.nonce, deadline: permit.deadline }
    }
}

impl From<PermitWitnessTransferFrom> for SignaturePermit {
    fn from(permit: PermitWitnessTransferFrom) -> Self {
        Self { permitted: permit.permitted, nonce: permit.nonce, deadline: permit.deadline }
    }
}

impl Settler::ActionInvalid {
    /// Get the index of the failed action, if it fits in a `usize`.
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.i).ok()
    }
}
