//! Per-role settlement configuration.
//!
//! Each signing role has its own config type, built from a raw, string-based
//! form and validated at construction. Invalid input is rejected with an
//! [`InputError`] before anything is hashed or signed.

mod error;
pub use error::InputError;

pub mod parse;

mod intent;
pub use intent::{IntentConfig, RawIntentConfig};

mod escrow;
pub use escrow::{EscrowConfig, RawEscrowConfig};

mod permit;
pub use permit::{PermitConfig, RawPermitConfig};

mod allowance;
pub use allowance::{AllowanceConfig, RawAllowanceConfig, RawPermitSingleConfig};
