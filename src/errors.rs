use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayerClientException {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid chainID: {0}")]
    UnsupportedChain(u64),
    #[error("{0}")]
    MissingCapability(String),
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("invalid signature: {0}")]
    SignatureFormat(String),
    #[error("gas estimation failed: {0}")]
    NetworkDegraded(String),
    #[error(transparent)]
    Relay(#[from] RelayerApiException),
}

impl RelayerClientException {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        RelayerClientException::InvalidInput(msg.into())
    }

    pub fn missing_capability(msg: impl Into<String>) -> Self {
        RelayerClientException::MissingCapability(msg.into())
    }
}

#[derive(Error, Debug)]
pub enum RelayerApiException {
    #[error("API error: status_code={status_code:?}, error_message={error_msg}")]
    ApiError {
        status_code: Option<u16>,
        error_msg: String,
    },
    #[error("Request exception: {0}")]
    RequestException(String),
}

impl RelayerApiException {
    pub fn new(status_code: Option<u16>, error_msg: String) -> Self {
        RelayerApiException::ApiError {
            status_code,
            error_msg,
        }
    }

    pub fn from_request_error(msg: String) -> Self {
        RelayerApiException::RequestException(msg)
    }
}

pub type Result<T, E = RelayerClientException> = std::result::Result<T, E>;
