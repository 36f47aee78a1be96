use alloy::{
    primitives::Address,
    signers::{k256::ecdsa::SigningKey, local::PrivateKeySigner},
};
use std::sync::LazyLock;

/// Test signers used in tests.
pub static TEST_SIGNERS: LazyLock<[PrivateKeySigner; 4]> = LazyLock::new(|| {
    [1u8, 2, 3, 4].map(|b| PrivateKeySigner::from(SigningKey::from_slice(&[b; 32]).unwrap()))
});

/// Test users used in tests. Addresses corresponding to [`TEST_SIGNERS`].
pub static TEST_USERS: LazyLock<[Address; 4]> =
    LazyLock::new(|| TEST_SIGNERS.each_ref().map(|s| s.address()));

