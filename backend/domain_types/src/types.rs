use std::fmt;

use common_utils::{fp_utils::when, CustomResult, ValidationError};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};

use crate::errors::ConnectorError;

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.mch.weixin.qq.com";

/// Merchant identity the client is authenticated as.
///
/// `appid` and `mch_id` on every outgoing request come from here, regardless of what the caller
/// passed in.
#[derive(Clone, Debug)]
pub struct MerchantIdentity {
    app_id: String,
    merchant_id: String,
    merchant_key: Secret<String>,
}

impl MerchantIdentity {
    pub fn new(
        app_id: impl Into<String>,
        merchant_id: impl Into<String>,
        merchant_key: Secret<String>,
    ) -> CustomResult<Self, ValidationError> {
        let app_id = app_id.into();
        let merchant_id = merchant_id.into();

        when(app_id.trim().is_empty(), || {
            Err(report!(ValidationError::MissingRequiredField {
                field_name: "app_id".to_string(),
            }))
        })?;
        when(merchant_id.trim().is_empty(), || {
            Err(report!(ValidationError::MissingRequiredField {
                field_name: "merchant_id".to_string(),
            }))
        })?;

        Ok(Self {
            app_id,
            merchant_id,
            merchant_key,
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn merchant_key(&self) -> &Secret<String> {
        &self.merchant_key
    }

    pub fn has_merchant_key(&self) -> bool {
        !self.merchant_key.peek().is_empty()
    }
}

/// Gateway RPC actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GatewayAction {
    UnifiedOrder,
    OrderQuery,
    CloseOrder,
    Refund,
    RefundQuery,
}

impl GatewayAction {
    pub const ALL: [Self; 5] = [
        Self::UnifiedOrder,
        Self::OrderQuery,
        Self::CloseOrder,
        Self::Refund,
        Self::RefundQuery,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::UnifiedOrder => "pay/unifiedorder",
            Self::OrderQuery => "pay/orderquery",
            Self::CloseOrder => "pay/closeorder",
            Self::Refund => "secapi/pay/refund",
            Self::RefundQuery => "pay/refundquery",
        }
    }

    /// Actions served from the certificate protected `secapi` namespace.
    pub const fn requires_client_certificate(self) -> bool {
        matches!(self, Self::Refund)
    }

    /// Action whose path terminates `url`, ignoring any query string.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        Self::ALL.into_iter().find(|action| {
            path.strip_suffix(action.path())
                .is_some_and(|rest| rest.ends_with('/'))
        })
    }
}

impl fmt::Display for GatewayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnifiedOrder => "unified_order",
            Self::OrderQuery => "order_query",
            Self::CloseOrder => "close_order",
            Self::Refund => "refund",
            Self::RefundQuery => "refund_query",
        };
        f.write_str(name)
    }
}

/// Base URL the action paths are resolved against, kept without a trailing `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayEndpoints {
    base_url: String,
}

impl GatewayEndpoints {
    pub fn new(base_url: &str) -> CustomResult<Self, ConnectorError> {
        let parsed = url::Url::parse(base_url)
            .change_context(ConnectorError::InvalidConnectorConfig { config: "base_url" })
            .attach_printable_lazy(|| format!("Unable to parse gateway base url: {base_url}"))?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, action: GatewayAction) -> String {
        format!("{}/{}", self.base_url, action.path())
    }
}

impl Default for GatewayEndpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
        }
    }
}
