use thiserror::Error;

/// Error type for the provider adapters
///
/// The `Display` output of a variant is exactly the message that ends up in
/// the profile field's error placeholder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// A required credential is absent from the configuration
    #[error("{0}")]
    Configuration(String),

    /// Transport failure, non-success status or malformed upstream payload
    #[error("{0}")]
    Upstream(String),

    /// Anything else that went wrong inside an adapter
    #[error("{0}")]
    Unexpected(String),
}

impl ProviderError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream(message.into())
    }

    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected(message.into())
    }
}
