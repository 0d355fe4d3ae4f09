//! Error types for the linear algebra library
//!
//! Numerical degeneracy (singular matrices, zero-length axes) is never an
//! error here: it shows up as `NaN`/`Inf` in the result. These errors only
//! cover misuse of the indexing and slice interfaces.

use thiserror::Error;

/// Linear algebra errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Index does not name one of the six frustum planes
    #[error("frustum plane index out of range: {0}")]
    InvalidPlaneIndex(usize),

    /// Index does not name one of the eight frustum corners
    #[error("frustum corner index out of range: {0}")]
    InvalidCornerIndex(usize),

    /// Source or destination slice cannot hold a full matrix/vector
    #[error("buffer too small: need {required} elements, got {available}")]
    BufferTooSmall { required: usize, available: usize },
}

/// Result type for linear algebra operations
pub type Result<T> = std::result::Result<T, LinalgError>;

/// Check that `len` elements starting at `offset` fit in a buffer of
/// `available` elements.
pub(crate) fn check_len(offset: usize, len: usize, available: usize) -> Result<()> {
    let required = offset.saturating_add(len);
    if required > available {
        return Err(LinalgError::BufferTooSmall { required, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(check_len(0, 16, 16).is_ok());
        assert!(check_len(4, 16, 20).is_ok());
        assert_eq!(
            check_len(8, 16, 20),
            Err(LinalgError::BufferTooSmall { required: 24, available: 20 })
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LinalgError::InvalidPlaneIndex(6).to_string(),
            "frustum plane index out of range: 6"
        );
        assert_eq!(
            LinalgError::BufferTooSmall { required: 16, available: 9 }.to_string(),
            "buffer too small: need 16 elements, got 9"
        );
    }
}
