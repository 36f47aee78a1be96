use alloy::primitives::{keccak256, B256};

/// Commit to a human-readable string, e.g. a currency code or payment method.
///
/// The commitment is `keccak256(utf8(value))`. The empty string is a valid
/// input.
pub fn commit(value: &str) -> B256 {
    keccak256(value.as_bytes())
}

/// Off-chain payee details. Only their commitment is signed and sent on
/// chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeDetails {
    /// Payee account, e.g. a wallet or bank account name.
    pub account: String,
    /// Payment QR code payload.
    #[serde(default)]
    pub qr_code: String,
    /// Free-form memo.
    #[serde(default)]
    pub memo: String,
}

impl PayeeDetails {
    /// Create new payee details.
    pub fn new(
        account: impl Into<String>,
        qr_code: impl Into<String>,
        memo: impl Into<String>,
    ) -> Self {
        Self { account: account.into(), qr_code: qr_code.into(), memo: memo.into() }
    }

    /// The `payeeDetails` commitment.
    ///
    /// Computed as `keccak256(abi.encodePacked(account, qrCode, memo))`, which
    /// is the hash of the raw byte concatenation.
    pub fn commitment(&self) -> B256 {
        let mut buf =
            Vec::with_capacity(self.account.len() + self.qr_code.len() + self.memo.len());
        buf.extend_from_slice(self.account.as_bytes());
        buf.extend_from_slice(self.qr_code.as_bytes());
        buf.extend_from_slice(self.memo.as_bytes());
        keccak256(buf)
    }
}
