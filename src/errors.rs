//! Decomposition and parsing errors

use crate::float_types::Real;
use nalgebra::Vector3;

/// Reasons a matrix could not be represented as scale, shear, rotation and translation.
///
/// Decomposition never panics: these are carried next to best-effort components
/// in a [`Decomposition`](crate::decompose::Decomposition).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecomposeError {
    /// (NonAffineMatrix) The bottom row of a 4×4 matrix is not (0, 0, 0, 1)
    #[error(
        "(NonAffineMatrix) bottom row {bottom_row:?} deviates from (0, 0, 0, 1) by {deviation}"
    )]
    NonAffineMatrix { bottom_row: [Real; 4], deviation: Real },
    /// (UnrepresentableShear) A no-shear decomposition found shear in the matrix
    #[error("(UnrepresentableShear) the matrix carries shear {shear} which cannot be dropped")]
    UnrepresentableShear { shear: Vector3<Real> },
}

/// A coordinate-system name that is not one of the known conventions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coordinate system `{0}`")]
pub struct ParseCoordinateSystemError(pub String);

/// An hpr convention name other than `old` or `new`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hpr convention `{0}`, expected `old` or `new`")]
pub struct ParseConventionError(pub String);
