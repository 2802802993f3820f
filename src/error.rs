use std::fmt;

/// Numeric domain failures. Any of these aborts the frame being rendered;
/// missed intersections and empty scenes are ordinary values, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// A zero-length vector reached a normalization or angle computation.
    ZeroLengthVector,
    /// An object's base color has zero norm and cannot modulate light.
    ZeroLengthColor,
    /// The screen-to-world transform is not invertible.
    SingularMatrix,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::ZeroLengthVector => {
                write!(f, "zero-length vector cannot be normalized")
            }
            DomainError::ZeroLengthColor => {
                write!(f, "object base color has zero norm")
            }
            DomainError::SingularMatrix => {
                write!(f, "screen-to-world transform is not invertible")
            }
        }
    }
}

impl std::error::Error for DomainError {}
