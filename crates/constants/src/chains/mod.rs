/// Sepolia testnet deployment constants.
pub mod sepolia;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
