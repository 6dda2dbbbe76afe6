use thiserror::Error;

/// Errors returned by ESP3 header decoding.
///
/// # Examples
/// ```
/// use advlibesp_core::protocols::esp3::Esp3Error;
///
/// let err = Esp3Error::TooShort { needed: 4, actual: 2 };
/// assert!(err.to_string().contains("header too short"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Esp3Error {
    #[error("header too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
