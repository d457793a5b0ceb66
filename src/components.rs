//! The four parameter vectors of an affine transform and their flat
//! 12-element interchange layout.

use crate::compose;
use crate::coordinate_system::CoordinateSystem;
use crate::float_types::Real;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use nalgebra::{Matrix3, Matrix4, Vector3};

/// Number of scalars in the flat `[scale, shear, hpr, translate]` layout.
pub const FLAT_LEN: usize = 12;

/// Scale, shear, rotation and translation of an affine transform.
///
/// * `scale`     – per-axis multipliers; a negative entry is a reflection
/// * `shear`     – coupling coefficients in xy, xz, yz order
/// * `hpr`       – heading, pitch, roll in degrees
/// * `translate` – offset; always zero for 3×3 matrices
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Components {
    pub scale: Vector3<Real>,
    pub shear: Vector3<Real>,
    pub hpr: Vector3<Real>,
    pub translate: Vector3<Real>,
}

impl Components {
    /// Unit scale, no shear, no rotation, no translation.
    pub const IDENTITY: Components = Components {
        scale: Vector3::new(1.0, 1.0, 1.0),
        shear: Vector3::new(0.0, 0.0, 0.0),
        hpr: Vector3::new(0.0, 0.0, 0.0),
        translate: Vector3::new(0.0, 0.0, 0.0),
    };

    pub const fn new(
        scale: Vector3<Real>,
        shear: Vector3<Real>,
        hpr: Vector3<Real>,
        translate: Vector3<Real>,
    ) -> Self {
        Components {
            scale,
            shear,
            hpr,
            translate,
        }
    }

    /// Unpack `[scale.xyz, shear.xy/xz/yz, hpr.hpr, translate.xyz]`.
    pub fn from_flat(flat: &[Real; FLAT_LEN]) -> Self {
        Components {
            scale: Vector3::new(flat[0], flat[1], flat[2]),
            shear: Vector3::new(flat[3], flat[4], flat[5]),
            hpr: Vector3::new(flat[6], flat[7], flat[8]),
            translate: Vector3::new(flat[9], flat[10], flat[11]),
        }
    }

    /// Like [`Components::from_flat`], for buffers of unchecked length.
    ///
    /// Returns `None` unless `flat` holds exactly [`FLAT_LEN`] values.
    pub fn from_slice(flat: &[Real]) -> Option<Self> {
        let flat: &[Real; FLAT_LEN] = flat.try_into().ok()?;
        Some(Self::from_flat(flat))
    }

    /// Pack into the `[scale, shear, hpr, translate]` layout.
    pub fn to_flat(&self) -> [Real; FLAT_LEN] {
        let mut flat = [0.0; FLAT_LEN];
        for (chunk, v) in flat
            .chunks_exact_mut(3)
            .zip([&self.scale, &self.shear, &self.hpr, &self.translate])
        {
            chunk.copy_from_slice(v.as_slice());
        }
        flat
    }

    /// Compose the linear part under the configured default convention.
    /// `translate` is ignored.
    pub fn to_matrix3(&self, cs: CoordinateSystem) -> Matrix3<Real> {
        compose::compose_matrix3(&self.scale, &self.shear, &self.hpr, cs)
    }

    /// Compose the full affine matrix under the configured default convention.
    pub fn to_matrix4(&self, cs: CoordinateSystem) -> Matrix4<Real> {
        compose::compose_matrix4(&self.scale, &self.shear, &self.hpr, &self.translate, cs)
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[Real; FLAT_LEN]> for Components {
    fn from(flat: [Real; FLAT_LEN]) -> Self {
        Self::from_flat(&flat)
    }
}

impl From<Components> for [Real; FLAT_LEN] {
    fn from(components: Components) -> Self {
        components.to_flat()
    }
}

impl AbsDiffEq for Components {
    type Epsilon = <Vector3<Real> as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::<Real>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.scale.abs_diff_eq(&other.scale, epsilon)
            && self.shear.abs_diff_eq(&other.shear, epsilon)
            && self.hpr.abs_diff_eq(&other.hpr, epsilon)
            && self.translate.abs_diff_eq(&other.translate, epsilon)
    }
}

impl RelativeEq for Components {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::<Real>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.scale.relative_eq(&other.scale, epsilon, max_relative)
            && self.shear.relative_eq(&other.shear, epsilon, max_relative)
            && self.hpr.relative_eq(&other.hpr, epsilon, max_relative)
            && self.translate.relative_eq(&other.translate, epsilon, max_relative)
    }
}

impl UlpsEq for Components {
    fn default_max_ulps() -> u32 {
        Vector3::<Real>::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.scale.ulps_eq(&other.scale, epsilon, max_ulps)
            && self.shear.ulps_eq(&other.shear, epsilon, max_ulps)
            && self.hpr.ulps_eq(&other.hpr, epsilon, max_ulps)
            && self.translate.ulps_eq(&other.translate, epsilon, max_ulps)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flat_layout_order() {
        let flat = [
            1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 45.0, 30.0, -20.0, 5.0, -2.0, 1.0,
        ];
        let components = Components::from_flat(&flat);
        assert_eq!(components.scale, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(components.shear, Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(components.hpr, Vector3::new(45.0, 30.0, -20.0));
        assert_eq!(components.translate, Vector3::new(5.0, -2.0, 1.0));
        assert_eq!(components.to_flat(), flat);
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(Components::from_slice(&[0.0; 11]).is_none());
        assert!(Components::from_slice(&[0.0; 13]).is_none());
        assert_eq!(
            Components::from_slice(&Components::IDENTITY.to_flat()),
            Some(Components::IDENTITY)
        );
    }

    #[test]
    fn identity_composes_to_identity() {
        approx::assert_relative_eq!(
            Components::default().to_matrix4(CoordinateSystem::ZupRight),
            Matrix4::identity()
        );
    }
}
