mod error;
pub use error::ConfigError;

mod chains;
pub use chains::{KnownChains, ParseChainError};

pub mod env_utils;
use env_utils::{load_address, load_address_opt, load_string_opt, load_u64};

mod gas;
pub use gas::GasPolicy;

use crate::{DEFAULT_SETTLEMENT_DOMAIN_NAME, DEFAULT_SETTLEMENT_DOMAIN_VERSION, PERMIT2_ADDRESS};
use alloy::primitives::{Address, U256};
use std::{borrow::Cow, str::FromStr};

/// Deployment constants for one settler.
///
/// This struct holds everything the codec needs to know about the deployment
/// it targets: the chain, the settler and escrow contracts, the Permit2
/// deployment, and the name and version of the settler's EIP-712 domain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementConstants {
    /// Chain ID of the deployment.
    chain_id: u64,
    /// The settler contract. Verifying contract of the settlement domain and
    /// the spender of Permit2 signature transfers.
    settler: Address,
    /// The escrow contract. Receives transferred tokens.
    escrow: Address,
    /// The Permit2 deployment.
    permit2: Address,
    /// EIP-712 domain name of the settler.
    domain_name: Cow<'static, str>,
    /// EIP-712 domain version of the settler.
    domain_version: Cow<'static, str>,
}

impl SettlementConstants {
    /// Create a new set of constants.
    pub const fn new(
        chain_id: u64,
        settler: Address,
        escrow: Address,
        permit2: Address,
        domain_name: Cow<'static, str>,
        domain_version: Cow<'static, str>,
    ) -> Self {
        Self { chain_id, settler, escrow, permit2, domain_name, domain_version }
    }

    /// Get the hard-coded Sepolia constants.
    pub const fn sepolia() -> Self {
        crate::chains::sepolia::SEPOLIA
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST_SETTLEMENT
    }

    /// Load the constants from the environment.
    ///
    /// If `OTC_CHAIN` names a known chain, its constants are used. Otherwise
    /// `OTC_CHAIN_ID`, `OTC_SETTLER` and `OTC_ESCROW` are required, and
    /// `OTC_PERMIT2`, `OTC_DOMAIN_NAME` and `OTC_DOMAIN_VERSION` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(chain) = load_string_opt("OTC_CHAIN") {
            return Ok(KnownChains::from_str(&chain)?.constants());
        }

        let chain_id = load_u64("OTC_CHAIN_ID")?;
        let settler = load_address("OTC_SETTLER")?;
        let escrow = load_address("OTC_ESCROW")?;
        let permit2 = load_address_opt("OTC_PERMIT2")?.unwrap_or(PERMIT2_ADDRESS);
        let domain_name = load_string_opt("OTC_DOMAIN_NAME")
            .map_or(Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_NAME), Cow::Owned);
        let domain_version = load_string_opt("OTC_DOMAIN_VERSION")
            .map_or(Cow::Borrowed(DEFAULT_SETTLEMENT_DOMAIN_VERSION), Cow::Owned);

        Ok(Self::new(chain_id, settler, escrow, permit2, domain_name, domain_version))
    }

    /// Load the constants from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the chain ID as a [`U256`].
    pub fn chain_id_u256(&self) -> U256 {
        U256::from(self.chain_id)
    }

    /// Get the settler address.
    pub const fn settler(&self) -> Address {
        self.settler
    }

    /// Get the escrow address.
    pub const fn escrow(&self) -> Address {
        self.escrow
    }

    /// Get the Permit2 address.
    pub const fn permit2(&self) -> Address {
        self.permit2
    }

    /// Get the settlement domain name.
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    /// Get the settlement domain version.
    pub fn domain_version(&self) -> &str {
        &self.domain_version
    }

    /// Replace the chain ID, e.g. with the one reported by the connected node.
    pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Replace the settlement domain name.
    pub fn with_domain_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.domain_name = name.into();
        self
    }
}
