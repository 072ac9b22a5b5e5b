use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AiProviderError {
    #[error("API Error: {0}")]
    ApiError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),
    #[error("Unsupported media type for this provider: {0}")]
    UnsupportedMedia(String),
}

impl AiProviderError {
    /// Map a non-success HTTP status and its body onto a provider error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => AiProviderError::ApiError(format!("Bad request: {}", body)),
            401 => AiProviderError::AuthenticationError(body),
            403 => AiProviderError::ApiError(format!("Forbidden: {}", body)),
            429 => AiProviderError::ApiError(format!("Rate limit exceeded: {}", body)),
            _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, body)),
        }
    }
}
