//! Error types for variable checks

use crate::utils::validation::types::{Expected, Kind};
use thiserror::Error;

/// Result type alias for variable checks
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Coarse classification of a [`ValidationError`]
///
/// Rank and per-axis mismatches are both reported as [`ErrorKind::Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    TypeMismatch,
    Dimension,
    Range,
    NaN,
    NonFinite,
}

/// Lower bound that a range check enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Every element must be strictly greater than zero
    Positive,
    /// Every element must be zero or greater
    NonNegative,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => f.write_str("strictly positive"),
            Self::NonNegative => f.write_str("non-negative"),
        }
    }
}

/// Failure raised by one of the variable checks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The check itself was called with malformed arguments
    #[error("Input error in {context}: {reason}")]
    Input { context: String, reason: String },

    /// Runtime type does not satisfy the expectation
    #[error("Type error: variable '{label}' should be {expected}, got {actual}")]
    TypeMismatch {
        label: String,
        expected: Expected,
        actual: Kind,
    },

    /// Number of axes differs from the expectation
    #[error("Dimension error in '{label}': ndim is {actual} but {expected} was required")]
    RankMismatch {
        label: String,
        actual: usize,
        expected: usize,
    },

    /// Extent of a single axis differs from the expectation
    #[error(
        "Dimension error in '{label}': axis {axis} contains {actual} elements, but {expected} were required"
    )]
    AxisMismatch {
        label: String,
        axis: usize,
        actual: usize,
        expected: usize,
    },

    /// Minimum element falls below the allowed bound
    #[error("Value error: variable '{label}' must be {bound}, minimum is {minimum}")]
    Range {
        label: String,
        bound: Bound,
        minimum: String,
    },

    #[error("NaN error: variable '{label}' contains NaNs but is not allowed to")]
    NaN { label: String },

    #[error("Finite error: variable '{label}' contains infinite values but is not allowed to")]
    NonFinite { label: String },
}

impl ValidationError {
    /// Create a new input error
    pub fn input<C: Into<String>, R: Into<String>>(context: C, reason: R) -> Self {
        Self::Input {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a new type mismatch error
    pub fn type_mismatch<L: Into<String>>(label: L, expected: Expected, actual: Kind) -> Self {
        Self::TypeMismatch {
            label: label.into(),
            expected,
            actual,
        }
    }

    /// Create a new range error, rendering the offending minimum
    pub fn range<L: Into<String>, T: std::fmt::Display>(label: L, bound: Bound, minimum: T) -> Self {
        Self::Range {
            label: label.into(),
            bound,
            minimum: minimum.to_string(),
        }
    }

    /// Classify this error into one of the check failure kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input { .. } => ErrorKind::Input,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::RankMismatch { .. } | Self::AxisMismatch { .. } => ErrorKind::Dimension,
            Self::Range { .. } => ErrorKind::Range,
            Self::NaN { .. } => ErrorKind::NaN,
            Self::NonFinite { .. } => ErrorKind::NonFinite,
        }
    }

    /// Label of the variable the failure refers to, if the variant carries one
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Input { .. } => None,
            Self::TypeMismatch { label, .. }
            | Self::RankMismatch { label, .. }
            | Self::AxisMismatch { label, .. }
            | Self::Range { label, .. }
            | Self::NaN { label }
            | Self::NonFinite { label } => Some(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ValidationError::input("dimtest", "negative size");
        assert!(matches!(err, ValidationError::Input { .. }));
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(err.label(), None);

        let err = ValidationError::range("sigma", Bound::Positive, -2.5);
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.label(), Some("sigma"));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::range("sigma", Bound::Positive, 0);
        assert_eq!(
            err.to_string(),
            "Value error: variable 'sigma' must be strictly positive, minimum is 0"
        );

        let err = ValidationError::type_mismatch(
            "order",
            Expected::AnyOf(vec![Kind::Str, Kind::Int]),
            Kind::Float,
        );
        let message = err.to_string();
        assert!(message.contains("order"));
        assert!(message.contains("str, int"));
        assert!(message.contains("float"));
    }

    #[test]
    fn test_dimension_variants_share_kind() {
        let rank = ValidationError::RankMismatch {
            label: "spectrum".into(),
            actual: 1,
            expected: 2,
        };
        let axis = ValidationError::AxisMismatch {
            label: "spectrum".into(),
            axis: 1,
            actual: 3,
            expected: 10,
        };
        assert_eq!(rank.kind(), ErrorKind::Dimension);
        assert_eq!(axis.kind(), ErrorKind::Dimension);
        assert!(axis.to_string().contains("axis 1 contains 3 elements"));
    }
}
