//! Error types for faresql

use thiserror::Error;

/// Result type alias for data-access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Error types for the data-access layer.
///
/// Everything here is fatal at this layer; retry policy, if any, belongs
/// to the caller.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A required positional placeholder is missing from the SQL template.
    /// Indicates a template/call-site mismatch.
    #[error("parameter %{index} not found in SQL template")]
    ParameterNotFound { index: u32 },

    /// A named placeholder exceeds the 16-character limit.
    #[error("placeholder '{placeholder}' exceeds the {limit}-character limit")]
    PlaceholderTooLong { placeholder: String, limit: usize },

    /// List expansion exceeded the item or generated-text ceiling.
    #[error("bind buffer overflow: {0}")]
    BindBufferOverflow(String),

    /// Illegal clause combination for the active dialect.
    #[error("invalid statement for dialect: {0}")]
    DialectValidity(String),

    /// A `QuerySource::create` call failed; propagated unchanged.
    #[error("query source error: {0}")]
    Create(String),

    /// Cache entry serialization/compression failure. The offending entry
    /// is invalidated rather than served.
    #[error("compression error: {0}")]
    Compression(String),
}

impl AccessError {
    /// Create a bind-buffer-overflow error.
    pub fn overflow(message: impl Into<String>) -> Self {
        Self::BindBufferOverflow(message.into())
    }

    /// Create a dialect-validity error.
    pub fn dialect(message: impl Into<String>) -> Self {
        Self::DialectValidity(message.into())
    }

    /// Create a query-source error.
    pub fn create(message: impl Into<String>) -> Self {
        Self::Create(message.into())
    }

    /// Create a compression error.
    pub fn compression(message: impl Into<String>) -> Self {
        Self::Compression(message.into())
    }

    /// Check if this is a parameter-not-found error.
    pub fn is_parameter_not_found(&self) -> bool {
        matches!(self, Self::ParameterNotFound { .. })
    }

    /// Check if this is a dialect-validity error.
    pub fn is_dialect_validity(&self) -> bool {
        matches!(self, Self::DialectValidity(_))
    }

    /// Check if this is a compression error.
    pub fn is_compression(&self) -> bool {
        matches!(self, Self::Compression(_))
    }
}
