use common_utils::CustomResult;
use domain_types::{connector_types::RequestParameterSet, errors::ConnectorError};

/// Signs, serializes and sends a parameter set to a gateway endpoint.
///
/// Whatever comes back is handed to the caller untouched, so the output type is up to the
/// implementation (raw XML, an already parsed body, a recorded fixture in tests).
#[async_trait::async_trait]
pub trait XmlTransport: Send + Sync {
    type Output: Send;

    async fn xml_request(
        &self,
        url: &str,
        params: RequestParameterSet,
    ) -> CustomResult<Self::Output, ConnectorError>;
}

/// Source of the single-use `nonce_str` required by the signing scheme.
pub trait NonceGenerator: Send + Sync {
    fn generate_nonce_str(&self) -> String;
}

/// Nanoid backed nonces.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonce;

impl NonceGenerator for RandomNonce {
    fn generate_nonce_str(&self) -> String {
        common_utils::fp_utils::generate_nonce_str()
    }
}
