use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// A numeric field failed to parse after the comma-to-dot substitution.
    /// Fatal for the whole paste: partial output would be worse than a
    /// re-export, so the caller gets the row to fix instead.
    #[error("row {row}: invalid numeric {field} field '{value}'")]
    BadNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
