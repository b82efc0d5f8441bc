use core::fmt;

/// Result alias for `shapeclust`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the layout clustering pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Matrix or slice dimension mismatch.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },
    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
    /// The run was cancelled before it finished.
    Cancelled,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::Cancelled => write!(f, "clustering run was cancelled"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_parameter() {
        let err = Error::InvalidParameter {
            name: "eps",
            message: "must be non-negative",
        };
        assert_eq!(err.to_string(), "invalid parameter 'eps': must be non-negative");
    }

    #[test]
    fn test_display_dimension_mismatch() {
        let err = Error::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 2");
    }
}
