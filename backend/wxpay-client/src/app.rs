use std::time::Duration;

use common_utils::CustomResult;
use connector_integration::WxPay;
use domain_types::types::GatewayEndpoints;
use error_stack::ResultExt;
use external_services::HttpXmlTransport;

use crate::{configs::Config, error::ConfigurationError};

/// Client wired to the live gateway over HTTPS.
pub type Client = WxPay<HttpXmlTransport>;

/// Builds a ready to use client from loaded configuration.
pub fn client_builder(config: &Config) -> CustomResult<Client, ConfigurationError> {
    let identity = config
        .merchant
        .identity()
        .change_context(ConfigurationError::InvalidMerchantIdentity)?;

    if !identity.has_merchant_key() {
        tracing::warn!("merchant key is empty, the gateway will reject request signatures");
    }

    let endpoints = GatewayEndpoints::new(&config.gateway.base_url)
        .change_context(ConfigurationError::TransportSetupFailed)
        .attach_printable_lazy(|| format!("base_url: {}", config.gateway.base_url))?;

    let mut transport = HttpXmlTransport::new(
        identity.merchant_key().clone(),
        Duration::from_secs(config.gateway.timeout_secs),
    )
    .change_context(ConfigurationError::TransportSetupFailed)?;

    if let Some(pem_path) = &config.gateway.client_identity_pem {
        let pem = std::fs::read(pem_path)
            .change_context(ConfigurationError::TransportSetupFailed)
            .attach_printable_lazy(|| format!("client identity file: {}", pem_path.display()))?;
        transport = transport
            .with_client_identity_pem(&pem)
            .change_context(ConfigurationError::TransportSetupFailed)?;
    }

    tracing::info!(
        app_id = identity.app_id(),
        merchant_id = identity.merchant_id(),
        base_url = %config.gateway.base_url,
        "gateway client ready"
    );

    Ok(WxPay::new(identity, transport).with_endpoints(endpoints))
}
