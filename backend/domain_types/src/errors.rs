#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ConnectorError {
    #[error("Failed to encode gateway request")]
    RequestEncodingFailed,
    #[error("Failed to send request to gateway {0}")]
    RequestNotSent(String),
    #[error("Gateway responded with status code {status_code}")]
    ResponseHandlingFailed { status_code: u16 },
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Invalid connector configuration: {config}")]
    InvalidConnectorConfig { config: &'static str },
}
