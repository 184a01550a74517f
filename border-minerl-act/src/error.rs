//! Errors in the library.
use thiserror::Error;

/// Errors raised while building an [`ActionCodec`](crate::ActionCodec) or
/// converting actions with it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A raw action field lies outside the bound implied by the configuration.
    #[error("{field} = {value} is out of range [0, {bound})")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The value received.
        value: i64,
        /// Exclusive upper bound of the field.
        bound: usize,
    },

    /// The configuration is malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The raw action was produced for another layout.
    #[error("Layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch {
        /// Layout of the codec.
        expected: &'static str,
        /// Layout of the raw action.
        found: &'static str,
    },

    /// The structured action cannot be produced by the codec.
    #[error("Unencodable action: {0}")]
    Unencodable(String),
}

impl CodecError {
    pub(crate) fn out_of_range(field: &'static str, value: usize, bound: usize) -> Self {
        Self::OutOfRange {
            field,
            value: value as i64,
            bound,
        }
    }
}
