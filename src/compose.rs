//! Build matrices from scale, shear, heading/pitch/roll and translation.
//!
//! Points are transformed as column vectors and the parameters are applied
//! in a fixed order: scale, then shear, then rotation, then translation.
//! ```text
//! M₃ = R · Sh · S
//!
//!      ⎡ 1  xy  xz ⎤        ⎡ sx  0   0  ⎤
//! Sh = ⎢ 0  1   yz ⎥    S = ⎢ 0   sy  0  ⎥
//!      ⎣ 0  0   1  ⎦        ⎣ 0   0   sz ⎦
//!
//!      ⎡ M₃  t ⎤
//! M₄ = ⎣ 0   1 ⎦
//! ```
//! Composition is total: any finite input yields a finite matrix. Zero or
//! negative scale is accepted as-is and shows up as a collapsed or reflected
//! axis in the result.

use crate::components::{Components, FLAT_LEN};
use crate::config;
use crate::coordinate_system::CoordinateSystem;
use crate::euler::HprConvention;
use crate::float_types::Real;
use nalgebra::{Matrix3, Matrix4, Vector3};

/// The scale-then-shear part `Sh · S` of the linear block.
pub fn scale_shear_matrix(scale: &Vector3<Real>, shear: &Vector3<Real>) -> Matrix3<Real> {
    #[rustfmt::skip]
    let shear_mat = Matrix3::new(
        1.0, shear.x, shear.y,
        0.0, 1.0,     shear.z,
        0.0, 0.0,     1.0,
    );
    shear_mat * Matrix3::from_diagonal(scale)
}

/// Compose a 3×3 linear transform under an explicit hpr convention.
pub fn compose_matrix3_with(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Matrix3<Real> {
    convention.rotation_matrix(hpr, cs) * scale_shear_matrix(scale, shear)
}

/// Compose a 3×3 linear transform under the configured default convention.
///
/// # Example
/// ```rust
/// # use affine_hpr::{compose::compose_matrix3, coordinate_system::CoordinateSystem};
/// # use nalgebra::{Matrix3, Vector3};
/// let m = compose_matrix3(
///     &Vector3::new(2.0, 3.0, 4.0),
///     &Vector3::zeros(),
///     &Vector3::zeros(),
///     CoordinateSystem::ZupRight,
/// );
/// assert_eq!(m, Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0)));
/// ```
pub fn compose_matrix3(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix3<Real> {
    compose_matrix3_with(scale, shear, hpr, cs, config::default_convention())
}

/// [`compose_matrix3`] pinned to [`HprConvention::Old`].
pub fn compose_matrix3_old_hpr(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix3<Real> {
    compose_matrix3_with(scale, shear, hpr, cs, HprConvention::Old)
}

/// [`compose_matrix3`] pinned to [`HprConvention::New`].
pub fn compose_matrix3_new_hpr(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix3<Real> {
    compose_matrix3_with(scale, shear, hpr, cs, HprConvention::New)
}

/// Compose a 4×4 affine transform under an explicit hpr convention.
pub fn compose_matrix4_with(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Matrix4<Real> {
    let linear = compose_matrix3_with(scale, shear, hpr, cs, convention);
    let mut mat = linear.to_homogeneous();
    mat.fixed_view_mut::<3, 1>(0, 3).copy_from(translate);
    mat
}

/// Compose a 4×4 affine transform under the configured default convention.
pub fn compose_matrix4(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix4<Real> {
    compose_matrix4_with(scale, shear, hpr, translate, cs, config::default_convention())
}

/// [`compose_matrix4`] pinned to [`HprConvention::Old`].
pub fn compose_matrix4_old_hpr(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix4<Real> {
    compose_matrix4_with(scale, shear, hpr, translate, cs, HprConvention::Old)
}

/// [`compose_matrix4`] pinned to [`HprConvention::New`].
pub fn compose_matrix4_new_hpr(
    scale: &Vector3<Real>,
    shear: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix4<Real> {
    compose_matrix4_with(scale, shear, hpr, translate, cs, HprConvention::New)
}

/// Compose from the flat `[scale, shear, hpr, translate]` layout under an
/// explicit hpr convention.
pub fn compose_matrix4_flat_with(
    components: &[Real; FLAT_LEN],
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Matrix4<Real> {
    let Components {
        scale,
        shear,
        hpr,
        translate,
    } = Components::from_flat(components);
    compose_matrix4_with(&scale, &shear, &hpr, &translate, cs, convention)
}

/// Compose from the flat `[scale, shear, hpr, translate]` layout under the
/// configured default convention.
pub fn compose_matrix4_flat(components: &[Real; FLAT_LEN], cs: CoordinateSystem) -> Matrix4<Real> {
    compose_matrix4_flat_with(components, cs, config::default_convention())
}
