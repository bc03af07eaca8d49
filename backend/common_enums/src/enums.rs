use serde::{Deserialize, Serialize};

/// Which identifier an order lookup is keyed on.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderIdType {
    /// Merchant generated `out_trade_no`
    #[default]
    Merchant,
    /// Gateway assigned `transaction_id`
    Transaction,
}

impl OrderIdType {
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Merchant => "out_trade_no",
            Self::Transaction => "transaction_id",
        }
    }
}

impl From<bool> for OrderIdType {
    fn from(is_gateway_id: bool) -> Self {
        if is_gateway_id {
            Self::Transaction
        } else {
            Self::Merchant
        }
    }
}

/// Discriminator for refund lookups.
///
/// Exactly one identifier field is sent per query. Unrecognised discriminators
/// fall through to [`RefundQueryType::RefundId`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundQueryType {
    Transaction,
    Trade,
    Refund,
    #[default]
    RefundId,
}

impl RefundQueryType {
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Transaction => "transaction_id",
            Self::Trade => "out_trade_no",
            Self::Refund => "out_refund_no",
            Self::RefundId => "refund_id",
        }
    }

    /// Lenient parse used for caller supplied discriminators.
    pub fn from_discriminator(discriminator: Option<&str>) -> Self {
        match discriminator {
            Some("transaction") => Self::Transaction,
            Some("trade") => Self::Trade,
            Some("refund") => Self::Refund,
            _ => Self::RefundId,
        }
    }
}
