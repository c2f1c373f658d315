use thiserror::Error;

/// Core error type shared across schemashift crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A catalog row is missing an identifying field.
    #[error("invalid row {index}: {reason}")]
    InvalidRow { index: usize, reason: String },
}

/// Convenience alias for results returned by schemashift crates.
pub type Result<T> = std::result::Result<T, Error>;
