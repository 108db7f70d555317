use thiserror::Error;

/// Errors returned by primitive byte readers.
///
/// # Examples
/// ```
/// use uplink_core::primitives::ReadError;
///
/// let err = ReadError::TooShort { needed: 2, actual: 1 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported integer width: {width} bytes (expected 1..=4)")]
    UnsupportedWidth { width: usize },
}
