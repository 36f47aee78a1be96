use super::{
    parse::{parse_address, parse_u256, parse_u64},
    InputError,
};
use crate::commitment::{commit, PayeeDetails};
use otc_bindings::{IntentParams, Range};
use otc_constants::ConfigError;

/// Unvalidated maker intent, as entered by the maker.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIntentConfig {
    /// Token address.
    pub token: String,
    /// Minimum accepted amount.
    pub range_min: String,
    /// Maximum accepted amount.
    pub range_max: String,
    /// Unix timestamp after which the intent is void.
    pub expiry_time: String,
    /// Fiat currency code, e.g. `CNY`.
    pub currency: String,
    /// Payment method, e.g. `wechat`.
    pub payment_method: String,
    /// Payee details.
    #[serde(default)]
    pub payee: PayeeDetails,
    /// Unit price.
    pub price: String,
}

/// A validated maker intent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawIntentConfig", into = "RawIntentConfig")]
pub struct IntentConfig {
    params: IntentParams,
    currency: String,
    payment_method: String,
    payee: PayeeDetails,
}

impl TryFrom<RawIntentConfig> for IntentConfig {
    type Error = InputError;

    fn try_from(raw: RawIntentConfig) -> Result<Self, Self::Error> {
        if raw.currency.is_empty() {
            return Err(InputError::Missing("currency"));
        }
        if raw.payment_method.is_empty() {
            return Err(InputError::Missing("paymentMethod"));
        }
        let params = IntentParams {
            token: parse_address("token", &raw.token)?,
            range: Range::new(
                parse_u256("rangeMin", &raw.range_min)?,
                parse_u256("rangeMax", &raw.range_max)?,
            ),
            expiryTime: parse_u64("expiryTime", &raw.expiry_time)?,
            currency: commit(&raw.currency),
            paymentMethod: commit(&raw.payment_method),
            payeeDetails: raw.payee.commitment(),
            price: parse_u256("price", &raw.price)?,
        };
        Ok(Self {
            params,
            currency: raw.currency,
            payment_method: raw.payment_method,
            payee: raw.payee,
        })
    }
}

impl From<IntentConfig> for RawIntentConfig {
    fn from(config: IntentConfig) -> Self {
        let params = config.params;
        Self {
            token: params.token.to_checksum(None),
            range_min: params.range.min.to_string(),
            range_max: params.range.max.to_string(),
            expiry_time: params.expiryTime.to_string(),
            currency: config.currency,
            payment_method: config.payment_method,
            payee: config.payee,
            price: params.price.to_string(),
        }
    }
}

impl IntentConfig {
    /// Load an intent from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Get the intent parameters.
    pub const fn params(&self) -> &IntentParams {
        &self.params
    }

    /// Get the currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Get the payment method.
    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    /// Get the payee details.
    pub const fn payee(&self) -> &PayeeDetails {
        &self.payee
    }
}
