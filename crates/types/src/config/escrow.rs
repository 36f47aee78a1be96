use super::{
    parse::{parse_address, parse_u256},
    InputError,
};
use crate::commitment::{commit, PayeeDetails};
use otc_bindings::EscrowParams;
use otc_constants::ConfigError;

/// Unvalidated escrow, as produced by the relayer.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEscrowConfig {
    /// Escrow id. Unique per settler.
    pub id: String,
    /// Token address.
    pub token: String,
    /// Traded amount.
    pub volume: String,
    /// Unit price.
    pub price: String,
    /// USD rate at trade time.
    pub usd_rate: String,
    /// Address whose tokens fund the escrow.
    pub payer: String,
    /// Seller address.
    pub seller: String,
    /// Seller fee rate.
    pub seller_fee_rate: String,
    /// Payment method, e.g. `wechat`.
    pub payment_method: String,
    /// Fiat currency code, e.g. `CNY`.
    pub currency: String,
    /// Payee details.
    #[serde(default)]
    pub payee: PayeeDetails,
    /// Buyer address.
    pub buyer: String,
    /// Buyer fee rate.
    pub buyer_fee_rate: String,
}

/// A validated escrow.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "RawEscrowConfig")]
pub struct EscrowConfig {
    params: EscrowParams,
    payee: PayeeDetails,
}

impl TryFrom<RawEscrowConfig> for EscrowConfig {
    type Error = InputError;

    fn try_from(raw: RawEscrowConfig) -> Result<Self, Self::Error> {
        if raw.currency.is_empty() {
            return Err(InputError::Missing("currency"));
        }
        if raw.payment_method.is_empty() {
            return Err(InputError::Missing("paymentMethod"));
        }
        let params = EscrowParams {
            id: parse_u256("id", &raw.id)?,
            token: parse_address("token", &raw.token)?,
            volume: parse_u256("volume", &raw.volume)?,
            price: parse_u256("price", &raw.price)?,
            usdRate: parse_u256("usdRate", &raw.usd_rate)?,
            payer: parse_address("payer", &raw.payer)?,
            seller: parse_address("seller", &raw.seller)?,
            sellerFeeRate: parse_u256("sellerFeeRate", &raw.seller_fee_rate)?,
            paymentMethod: commit(&raw.payment_method),
            currency: commit(&raw.currency),
            payeeDetails: raw.payee.commitment(),
            buyer: parse_address("buyer", &raw.buyer)?,
            buyerFeeRate: parse_u256("buyerFeeRate", &raw.buyer_fee_rate)?,
        };
        Ok(Self { params, payee: raw.payee })
    }
}

impl EscrowConfig {
    /// Load an escrow from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Get the escrow parameters.
    pub const fn params(&self) -> &EscrowParams {
        &self.params
    }

    /// Get the payee details.
    pub const fn payee(&self) -> &PayeeDetails {
        &self.payee
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    fn raw() -> RawEscrowConfig {
        RawEscrowConfig {
            id: "0x2a".into(),
            token: format!("{:#x}", Address::repeat_byte(0x11)),
            volume: "10000000".into(),
            price: "7130000".into(),
            usd_rate: "1000000".into(),
            payer: format!("{:#x}", Address::repeat_byte(0x22)),
            seller: format!("{:#x}", Address::repeat_byte(0x22)),
            seller_fee_rate: "10".into(),
            payment_method: "wechat".into(),
            currency: "CNY".into(),
            payee: PayeeDetails::new("alice", "", ""),
            buyer: format!("{:#x}", Address::repeat_byte(0x33)),
            buyer_fee_rate: "0".into(),
        }
    }

    #[test]
    fn builds_params() {
        let config = EscrowConfig::try_from(raw()).unwrap();
        assert_eq!(config.params().id, U256::from(42));
        assert_eq!(config.params().payer, Address::repeat_byte(0x22));
        assert_eq!(config.params().payeeDetails, commit("alice"));
    }

    #[test]
    fn reports_field_name() {
        let raw = RawEscrowConfig { buyer: "bob".into(), ..raw() };
        assert_eq!(
            EscrowConfig::try_from(raw),
            Err(InputError::Address { field: "buyer", value: "bob".into() })
        );
    }

    #[test]
    fn from_json() {
        let json = serde_json::to_string(&raw()).unwrap();
        assert_eq!(EscrowConfig::from_json(&json).unwrap(), EscrowConfig::try_from(raw()).unwrap());
    }
}
