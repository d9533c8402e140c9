//! Schema grammar errors.

use jsonform_types::KeyChain;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while reading a schema from JSON.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A schema position held a JSON kind with no classification rule.
    #[error("Invalid type at \"{path}\": {kind}")]
    InvalidType { path: KeyChain, kind: &'static str },

    /// Array schemas hold exactly one item schema.
    #[error("Invalid array schema at \"{path}\": expected one item schema, found {len}")]
    InvalidArray { path: KeyChain, len: usize },

    #[error("Invalid $label at \"{path}\": expected a string")]
    InvalidLabel { path: KeyChain },

    #[error("Unknown key \"{key}\" in $type record at \"{path}\"")]
    UnknownDirective { path: KeyChain, key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
