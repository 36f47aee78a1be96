/// A malformed or out-of-range configuration value. Raised before anything is
/// hashed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InputError {
    /// A required field is empty.
    #[error("missing required field `{0}`")]
    Missing(&'static str),
    /// A field is not a valid address.
    #[error("invalid address in `{field}`: {value:?}")]
    Address {
        /// The field name.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A field is not valid hex.
    #[error("invalid hex in `{field}`: {value:?}")]
    Hex {
        /// The field name.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A field is not a decimal or `0x`-prefixed hex integer.
    #[error("invalid number in `{field}`: {value:?}")]
    Number {
        /// The field name.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A field does not fit its Solidity type.
    #[error("`{field}` does not fit in {ty}: {value}")]
    OutOfRange {
        /// The field name.
        field: &'static str,
        /// The Solidity type.
        ty: &'static str,
        /// The rejected input.
        value: String,
    },
}
