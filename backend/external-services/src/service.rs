use std::{collections::BTreeMap, time::Duration};

use common_utils::CustomResult;
use domain_types::{
    connector_types::RequestParameterSet, errors::ConnectorError, types::GatewayAction,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};
use interfaces::api::XmlTransport;
use reqwest::Client;

const SIGN_FIELD: &str = "sign";
const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Signs requests with the merchant key and posts them as XML.
///
/// Certificate protected actions (refunds, under `/secapi/`) go through a second client
/// carrying the merchant's TLS identity when one is configured.
#[derive(Clone, Debug)]
pub struct HttpXmlTransport {
    client: Client,
    secure_client: Option<Client>,
    merchant_key: Secret<String>,
    timeout: Duration,
}

impl HttpXmlTransport {
    pub fn new(
        merchant_key: Secret<String>,
        timeout: Duration,
    ) -> CustomResult<Self, ConnectorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .change_context(ConnectorError::InvalidConnectorConfig { config: "http_client" })?;
        Ok(Self {
            client,
            secure_client: None,
            merchant_key,
            timeout,
        })
    }

    /// Adds the PEM encoded certificate + private key used for refunds.
    pub fn with_client_identity_pem(mut self, pem: &[u8]) -> CustomResult<Self, ConnectorError> {
        let identity = reqwest::Identity::from_pem(pem)
            .change_context(ConnectorError::InvalidConnectorConfig {
                config: "client_identity_pem",
            })?;
        let secure_client = Client::builder()
            .use_rustls_tls()
            .timeout(self.timeout)
            .identity(identity)
            .build()
            .change_context(ConnectorError::InvalidConnectorConfig { config: "http_client" })?;
        self.secure_client = Some(secure_client);
        Ok(self)
    }

    fn client_for(&self, url: &str) -> &Client {
        match &self.secure_client {
            Some(secure_client) if requires_client_certificate(url) => secure_client,
            _ => &self.client,
        }
    }
}

#[async_trait::async_trait]
impl XmlTransport for HttpXmlTransport {
    type Output = String;

    async fn xml_request(
        &self,
        url: &str,
        params: RequestParameterSet,
    ) -> CustomResult<Self::Output, ConnectorError> {
        let mut wire = params.into_wire();
        let sign = sign_params(&wire, &self.merchant_key);
        wire.insert(SIGN_FIELD.to_string(), sign);
        let body = to_xml_body(&wire)?;

        if requires_client_certificate(url) && self.secure_client.is_none() {
            tracing::warn!(url, "Calling certificate protected endpoint without a client identity");
        }

        let response = self
            .client_for(url)
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .change_context(ConnectorError::RequestNotSent(url.to_string()))?;

        let status = response.status();
        tracing::info!(url, status_code = status.as_u16(), "Gateway responded");
        if !status.is_success() {
            return Err(report!(ConnectorError::ResponseHandlingFailed {
                status_code: status.as_u16(),
            }));
        }

        response
            .text()
            .await
            .change_context(ConnectorError::ResponseDeserializationFailed)
    }
}

/// MD5 signature over the non-empty fields in ascending name order, followed by the merchant
/// key, as uppercase hex.
pub fn sign_params(params: &BTreeMap<String, String>, merchant_key: &Secret<String>) -> String {
    let mut payload = params
        .iter()
        .filter(|(field, value)| field.as_str() != SIGN_FIELD && !value.is_empty())
        .map(|(field, value)| format!("{field}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    payload.push_str("&key=");
    payload.push_str(merchant_key.peek());
    format!("{:X}", md5::compute(payload.as_bytes()))
}

fn requires_client_certificate(url: &str) -> bool {
    GatewayAction::from_url(url).is_some_and(GatewayAction::requires_client_certificate)
}

/// `<xml>` document with one CDATA wrapped element per field.
///
/// Field names must be plain XML names and values must not carry characters XML cannot
/// represent; either fails with [`ConnectorError::RequestEncodingFailed`].
pub fn to_xml_body(params: &BTreeMap<String, String>) -> CustomResult<String, ConnectorError> {
    let mut body = String::from("<xml>");
    for (field, value) in params {
        if !is_xml_name(field) {
            return Err(report!(ConnectorError::RequestEncodingFailed))
                .attach_printable_lazy(|| format!("invalid field name: {field:?}"));
        }
        if value.chars().any(is_forbidden_xml_char) {
            return Err(report!(ConnectorError::RequestEncodingFailed))
                .attach_printable_lazy(|| format!("field {field} has a control character"));
        }
        let value = value.replace("]]>", "]]]]><![CDATA[>");
        body.push_str(&format!("<{field}><![CDATA[{value}]]></{field}>"));
    }
    body.push_str("</xml>");
    Ok(body)
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_forbidden_xml_char(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}
