//! Error types for cc-core

/// Result type for cc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cc-core operations
///
/// Policy outcomes (a rejected drop, a conflicting `set`) are not errors;
/// they are reported through [`crate::Rejection`] and boolean returns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw values for a custom did not match its shape
    #[error("Invalid values for custom {name}: {source}")]
    InvalidCustom {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// An array of values was given for a custom that allows only one entry
    #[error("Custom {name} does not allow arrays")]
    ArrayNotAllowed { name: String },

    /// A factory with this name is already registered
    #[error("Custom factory already registered: {name}")]
    DuplicateFactory { name: String },

    /// Entity has no usable identifier
    #[error("Missing identifier for {what}")]
    MissingIdentifier { what: String },

    /// An autofixer pass could not repair an entity
    #[error("Autofixer pass {pass} failed: {message}")]
    FixFailed { pass: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Settings or schema error from cc-meta
    #[error(transparent)]
    Meta(#[from] cc_meta::Error),

    /// JSON error outside of a specific custom
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
