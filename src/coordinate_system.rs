//! Handedness and up-axis conventions.
//!
//! Right is always +X. The remaining axes are:
//!
//! | system     | up | forward |
//! |------------|----|---------|
//! | `ZupRight` | +Z | +Y      |
//! | `YupRight` | +Y | −Z      |
//! | `ZupLeft`  | +Z | −Y      |
//! | `YupLeft`  | +Y | +Z      |
//!
//! Rotations are built in a canonical right-handed Z-up frame and carried into
//! the requested system through [`CoordinateSystem::basis`]. In left-handed
//! systems this makes positive angles follow the left-hand rule.

use crate::config;
use crate::errors::ParseCoordinateSystemError;
use crate::float_types::Real;
use core::fmt;
use core::str::FromStr;
use nalgebra::{Matrix3, Vector3};

/// Axis convention a matrix is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateSystem {
    /// Unspecified; resolves to [`config::default_coordinate_system`].
    #[default]
    Default,
    /// Right-handed, up +Z, forward +Y.
    ZupRight,
    /// Right-handed, up +Y, forward −Z.
    YupRight,
    /// Left-handed, up +Z, forward −Y.
    ZupLeft,
    /// Left-handed, up +Y, forward +Z.
    YupLeft,
}

impl CoordinateSystem {
    /// Replace [`CoordinateSystem::Default`] with the configured process default.
    pub fn resolve(self) -> Self {
        match self {
            CoordinateSystem::Default => config::default_coordinate_system(),
            cs => cs,
        }
    }

    pub fn is_right_handed(self) -> bool {
        !matches!(
            self.resolve(),
            CoordinateSystem::ZupLeft | CoordinateSystem::YupLeft
        )
    }

    pub fn up(self) -> Vector3<Real> {
        match self.resolve() {
            CoordinateSystem::YupRight | CoordinateSystem::YupLeft => Vector3::y(),
            _ => Vector3::z(),
        }
    }

    pub fn forward(self) -> Vector3<Real> {
        match self.resolve() {
            CoordinateSystem::YupRight => -Vector3::z(),
            CoordinateSystem::YupLeft => Vector3::z(),
            CoordinateSystem::ZupLeft => -Vector3::y(),
            _ => Vector3::y(),
        }
    }

    pub fn right(self) -> Vector3<Real> {
        Vector3::x()
    }

    pub fn down(self) -> Vector3<Real> {
        -self.up()
    }

    pub fn back(self) -> Vector3<Real> {
        -self.forward()
    }

    pub fn left(self) -> Vector3<Real> {
        -self.right()
    }

    /// Columns are (right, forward, up): maps canonical Z-up right-handed
    /// coordinates into this system.
    ///
    /// The matrix is orthogonal, so its transpose is its inverse. Its
    /// determinant is −1 for left-handed systems.
    pub fn basis(self) -> Matrix3<Real> {
        Matrix3::from_columns(&[self.right(), self.forward(), self.up()])
    }

    /// Matrix taking a vector expressed in `from` to the vector with the same
    /// right/forward/up meaning in `to`.
    ///
    /// # Example
    /// ```rust
    /// # use affine_hpr::coordinate_system::CoordinateSystem;
    /// let m = CoordinateSystem::convert_matrix(CoordinateSystem::ZupRight, CoordinateSystem::YupRight);
    /// assert_eq!(m * CoordinateSystem::ZupRight.up(), CoordinateSystem::YupRight.up());
    /// ```
    pub fn convert_matrix(from: CoordinateSystem, to: CoordinateSystem) -> Matrix3<Real> {
        to.basis() * from.basis().transpose()
    }

    /// Express a rotation built in the canonical frame in this system.
    pub(crate) fn rotation_from_canonical(self, rotation: &Matrix3<Real>) -> Matrix3<Real> {
        let basis = self.basis();
        basis * rotation * basis.transpose()
    }

    /// Express a rotation of this system in the canonical frame.
    pub(crate) fn rotation_to_canonical(self, rotation: &Matrix3<Real>) -> Matrix3<Real> {
        let basis = self.basis();
        basis.transpose() * rotation * basis
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateSystem::Default => "default",
            CoordinateSystem::ZupRight => "zup-right",
            CoordinateSystem::YupRight => "yup-right",
            CoordinateSystem::ZupLeft => "zup-left",
            CoordinateSystem::YupLeft => "yup-left",
        };
        f.write_str(name)
    }
}

impl FromStr for CoordinateSystem {
    type Err = ParseCoordinateSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "default" => Ok(CoordinateSystem::Default),
            "zup" | "zup-right" | "z-up" | "z-up-right" => Ok(CoordinateSystem::ZupRight),
            "yup" | "yup-right" | "y-up" | "y-up-right" => Ok(CoordinateSystem::YupRight),
            "zup-left" | "z-up-left" => Ok(CoordinateSystem::ZupLeft),
            "yup-left" | "y-up-left" => Ok(CoordinateSystem::YupLeft),
            _ => Err(ParseCoordinateSystemError(s.to_string())),
        }
    }
}

#[cfg(all(test, feature = "f64"))]
mod test {
    use super::*;

    const EXPLICIT: [CoordinateSystem; 4] = [
        CoordinateSystem::ZupRight,
        CoordinateSystem::YupRight,
        CoordinateSystem::ZupLeft,
        CoordinateSystem::YupLeft,
    ];

    #[test]
    fn handedness_matches_basis_determinant() {
        for cs in EXPLICIT {
            let det = cs.basis().determinant();
            if cs.is_right_handed() {
                assert!((det - 1.0).abs() < 1e-12, "{cs}: {det}");
                assert_eq!(cs.right().cross(&cs.forward()), cs.up());
            } else {
                assert!((det + 1.0).abs() < 1e-12, "{cs}: {det}");
                assert_eq!(cs.right().cross(&cs.forward()), cs.down());
            }
        }
    }

    #[test]
    fn convert_matrix_preserves_axis_meaning() {
        for from in EXPLICIT {
            for to in EXPLICIT {
                let m = CoordinateSystem::convert_matrix(from, to);
                assert_eq!(m * from.up(), to.up(), "{from} -> {to}");
                assert_eq!(m * from.forward(), to.forward(), "{from} -> {to}");
                assert_eq!(m * from.right(), to.right(), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn parse_and_display() {
        for cs in EXPLICIT {
            assert_eq!(cs.to_string().parse::<CoordinateSystem>(), Ok(cs));
        }
        assert_eq!("Z_UP".parse::<CoordinateSystem>(), Ok(CoordinateSystem::ZupRight));
        assert_eq!("y-up-left".parse::<CoordinateSystem>(), Ok(CoordinateSystem::YupLeft));
        assert!("x-up".parse::<CoordinateSystem>().is_err());
    }

    #[test]
    fn default_resolves_to_explicit_system() {
        assert_ne!(CoordinateSystem::Default.resolve(), CoordinateSystem::Default);
    }
}
