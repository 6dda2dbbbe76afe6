use thiserror::Error;

/// Errors returned by ERP1 telegram decoding.
///
/// # Examples
/// ```
/// use advlibesp_core::protocols::erp1::Erp1Error;
///
/// let err = Erp1Error::TooShort { needed: 6, actual: 3 };
/// assert!(err.to_string().contains("telegram too short"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Erp1Error {
    #[error("telegram too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
