//! Errors surfaced by the sizing adapter.

use std::fmt;

use colfit_layout::AllocationError;

/// Failure of a sizing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// A column definition was rejected by the allocator.
    Allocation(AllocationError),
    /// No column with this id is defined.
    UnknownColumn { id: String },
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(err) => write!(f, "column sizing failed: {err}"),
            Self::UnknownColumn { id } => write!(f, "unknown column {id:?}"),
        }
    }
}

impl std::error::Error for SizingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation(err) => Some(err),
            Self::UnknownColumn { .. } => None,
        }
    }
}

impl From<AllocationError> for SizingError {
    fn from(err: AllocationError) -> Self {
        Self::Allocation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn allocation_error_is_the_source() {
        let err = SizingError::from(AllocationError::ZeroGrowWeight {
            column: "info".into(),
        });
        assert_eq!(
            err.to_string(),
            "column sizing failed: column \"info\" has grow weight 0"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_column_has_no_source() {
        let err = SizingError::UnknownColumn { id: "nope".into() };
        assert_eq!(err.to_string(), "unknown column \"nope\"");
        assert!(err.source().is_none());
    }
}
