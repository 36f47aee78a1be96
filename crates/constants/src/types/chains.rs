use crate::SettlementConstants;
use std::str::FromStr;

/// The list of known chains as a string.
const KNOWN_CHAINS: &str = "sepolia, test";

/// Error type for parsing struct from a chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
}

/// Chains with a known settler deployment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Sepolia testnet.
    Sepolia,
    /// Test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Get the settlement constants for this chain.
    pub const fn constants(self) -> SettlementConstants {
        match self {
            Self::Sepolia => crate::chains::sepolia::SEPOLIA,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::chains::test_utils::TEST_SETTLEMENT,
        }
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            "sepolia" => Ok(Self::Sepolia),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}
