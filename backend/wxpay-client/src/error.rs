#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid merchant identity")]
    InvalidMerchantIdentity,
    #[error("Failed to set up gateway transport")]
    TransportSetupFailed,
    #[error("Failed to initialize logging: {0}")]
    LoggerError(#[from] tracing_subscriber::util::TryInitError),
}
