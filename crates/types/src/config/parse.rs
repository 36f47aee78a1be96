//! Parsers for user-supplied configuration strings.
//!
//! Integers are accepted in decimal or as `0x`-prefixed hex. Empty input is
//! reported as [`InputError::Missing`].

use super::InputError;
use alloy::primitives::{
    aliases::{U160, U48},
    Address, Bytes, U256,
};
use chrono::Utc;

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, InputError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(InputError::Missing(field));
    }
    Ok(value)
}

fn split_radix(value: &str) -> (&str, u64) {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(digits) => (digits, 16),
        None => (value, 10),
    }
}

/// Parse an address. All-lowercase and all-uppercase hex is accepted as is,
/// mixed case must carry a valid EIP-55 checksum.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, InputError> {
    let value = required(field, value)?;
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let mixed_case = digits.bytes().any(|b| b.is_ascii_lowercase())
        && digits.bytes().any(|b| b.is_ascii_uppercase());
    let parsed = if mixed_case {
        Address::parse_checksummed(value, None).ok()
    } else {
        value.parse().ok()
    };
    parsed.ok_or_else(|| InputError::Address { field, value: value.to_owned() })
}

/// Parse a `uint256`.
pub fn parse_u256(field: &'static str, value: &str) -> Result<U256, InputError> {
    let value = required(field, value)?;
    let (digits, radix) = split_radix(value);
    if digits.is_empty() {
        return Err(InputError::Number { field, value: value.to_owned() });
    }
    U256::from_str_radix(digits, radix)
        .map_err(|_| InputError::Number { field, value: value.to_owned() })
}

/// Parse a `uint160`.
pub fn parse_u160(field: &'static str, value: &str) -> Result<U160, InputError> {
    let wide = parse_u256(field, value)?;
    let (digits, radix) = split_radix(value.trim());
    U160::from_str_radix(digits, radix).map_err(|_| InputError::OutOfRange {
        field,
        ty: "uint160",
        value: wide.to_string(),
    })
}

/// Parse a `uint48`.
pub fn parse_u48(field: &'static str, value: &str) -> Result<U48, InputError> {
    let wide = parse_u256(field, value)?;
    let (digits, radix) = split_radix(value.trim());
    U48::from_str_radix(digits, radix).map_err(|_| InputError::OutOfRange {
        field,
        ty: "uint48",
        value: wide.to_string(),
    })
}

/// Parse a `uint64`.
pub fn parse_u64(field: &'static str, value: &str) -> Result<u64, InputError> {
    let wide = parse_u256(field, value)?;
    let (digits, radix) = split_radix(value.trim());
    u64::from_str_radix(digits, radix as u32).map_err(|_| InputError::OutOfRange {
        field,
        ty: "uint64",
        value: wide.to_string(),
    })
}

/// Parse `0x`-prefixed hex bytes, e.g. a signature. `0x` alone is the empty
/// byte string.
pub fn parse_bytes(field: &'static str, value: &str) -> Result<Bytes, InputError> {
    let value = required(field, value)?;
    if !value.starts_with("0x") {
        return Err(InputError::Hex { field, value: value.to_owned() });
    }
    hex::decode(value)
        .map(Into::into)
        .map_err(|_| InputError::Hex { field, value: value.to_owned() })
}

/// Get the unix timestamp `seconds` from now.
pub fn deadline_in(seconds: u64) -> u64 {
    (Utc::now().timestamp().max(0) as u64).saturating_add(seconds)
}
