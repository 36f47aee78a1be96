/// An error signing a settlement message.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SigningError {
    /// The signer failed.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}
