//! Recover scale, shear, heading/pitch/roll and translation from a matrix.
//!
//! The inverse of [`compose`](crate::compose). The columns of the linear
//! block are orthogonalized in order (Gram–Schmidt), which is exactly the QR
//! factorization `M₃ = R · (Sh · S)` of the composer:
//! ```text
//! sx = |c₀|                  x = c₀ / sx
//! xy = (x·c₁) / sy           y = (c₁ - (x·c₁)·x) / sy
//! xz = (x·c₂) / sz
//! yz = (y·c₂) / sz           z = (c₂ - (x·c₂)·x - (y·c₂)·y) / sz
//! ```
//! A negative determinant is folded into the sign of `sy` (with `xy` and `yz`
//! flipped alongside it) so that `[x y z]` is always a proper rotation.

use crate::components::{Components, FLAT_LEN};
use crate::config;
use crate::coordinate_system::CoordinateSystem;
use crate::errors::DecomposeError;
use crate::euler::HprConvention;
use crate::float_types::{EPSILON, Real, tolerance};
use nalgebra::{Matrix3, Matrix4, Vector3};

/// The outcome of a decomposition.
///
/// `components` always holds best-effort values; they must not be trusted
/// when `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub components: Components,
    pub error: Option<DecomposeError>,
}

impl Decomposition {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Components, DecomposeError> {
        match self.error {
            None => Ok(self.components),
            Some(error) => Err(error),
        }
    }

    pub(crate) fn fail(&mut self, error: DecomposeError) {
        // Keep the first failure; later checks only add detail.
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// Scale, shear and proper rotation of a linear block.
struct Orthogonalized {
    scale: Vector3<Real>,
    shear: Vector3<Real>,
    rotation: Matrix3<Real>,
}

/// Length below which a basis vector counts as collapsed, relative to the
/// largest entry of the block.
#[inline]
fn degenerate_length(linear: &Matrix3<Real>) -> Real {
    EPSILON * linear.amax()
}

/// `length` if it is a real axis, exactly zero otherwise.
#[inline]
const fn significant(length: Real, degenerate: Real) -> Real {
    if length > degenerate {
        length
    } else {
        0.0
    }
}

#[inline]
fn unit_or_zero(v: Vector3<Real>, length: Real) -> Vector3<Real> {
    if length > 0.0 {
        v / length
    } else {
        Vector3::zeros()
    }
}

#[inline]
const fn per_unit(coefficient: Real, length: Real) -> Real {
    if length > 0.0 {
        coefficient / length
    } else {
        0.0
    }
}

fn orthogonalize(linear: &Matrix3<Real>) -> Orthogonalized {
    let degenerate = degenerate_length(linear);
    let mut x = linear.column(0).into_owned();
    let mut y = linear.column(1).into_owned();
    let mut z = linear.column(2).into_owned();

    let sx = significant(x.norm(), degenerate);
    x = unit_or_zero(x, sx);

    let mut xy = x.dot(&y);
    y -= x * xy;
    let mut sy = significant(y.norm(), degenerate);
    y = unit_or_zero(y, sy);

    let xz = x.dot(&z);
    z -= x * xz;
    let mut yz = y.dot(&z);
    z -= y * yz;
    let sz = significant(z.norm(), degenerate);
    z = unit_or_zero(z, sz);

    xy = per_unit(xy, sy);
    let xz = per_unit(xz, sz);
    yz = per_unit(yz, sz);

    // A single collapsed axis still leaves the rotation determined by the
    // other two.
    match (sx > 0.0, sy > 0.0, sz > 0.0) {
        (true, true, true) => {}
        (false, true, true) => x = y.cross(&z),
        (true, false, true) => y = z.cross(&x),
        (true, true, false) => z = x.cross(&y),
        _ => log::debug!("decompose: rank < 2 linear block, rotation is ill-defined"),
    }

    if x.cross(&y).dot(&z) < 0.0 {
        sy = -sy;
        y = -y;
        xy = -xy;
        yz = -yz;
    }

    Orthogonalized {
        scale: Vector3::new(sx, sy, sz),
        shear: Vector3::new(xy, xz, yz),
        rotation: Matrix3::from_columns(&[x, y, z]),
    }
}

/// Verify that the bottom row of `mat` is (0, 0, 0, 1) within `tolerance`.
///
/// Always evaluated; a matrix with projective content fails with
/// [`DecomposeError::NonAffineMatrix`].
pub fn check_affine(mat: &Matrix4<Real>, tolerance: Real) -> Result<(), DecomposeError> {
    let bottom_row = [mat[(3, 0)], mat[(3, 1)], mat[(3, 2)], mat[(3, 3)]];
    // `max` would drop a NaN operand, so carry it through by hand.
    let deviation = [
        bottom_row[0],
        bottom_row[1],
        bottom_row[2],
        bottom_row[3] - 1.0,
    ]
    .iter()
    .map(|d| d.abs())
    .fold(0.0, |acc: Real, d| {
        if acc.is_nan() || d <= acc { acc } else { d }
    });

    if deviation <= tolerance {
        Ok(())
    } else {
        Err(DecomposeError::NonAffineMatrix {
            bottom_row,
            deviation,
        })
    }
}

/// Decompose a 3×3 linear transform under an explicit hpr convention.
///
/// Always succeeds; `translate` is zero.
pub fn decompose_matrix3_with(
    mat: &Matrix3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Decomposition {
    let Orthogonalized {
        scale,
        shear,
        rotation,
    } = orthogonalize(mat);
    let hpr = convention.hpr_from_rotation(&rotation, cs);

    Decomposition {
        components: Components::new(scale, shear, hpr, Vector3::zeros()),
        error: None,
    }
}

/// Decompose a 3×3 linear transform under the configured default convention.
pub fn decompose_matrix3(mat: &Matrix3<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix3_with(mat, cs, config::default_convention())
}

/// [`decompose_matrix3`] pinned to [`HprConvention::Old`].
pub fn decompose_matrix3_old_hpr(mat: &Matrix3<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix3_with(mat, cs, HprConvention::Old)
}

/// [`decompose_matrix3`] pinned to [`HprConvention::New`].
pub fn decompose_matrix3_new_hpr(mat: &Matrix3<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix3_with(mat, cs, HprConvention::New)
}

/// Decompose a 4×4 affine transform under an explicit hpr convention.
///
/// Fails with [`DecomposeError::NonAffineMatrix`] when the bottom row strays
/// from (0, 0, 0, 1) by more than `affine_tolerance`.
pub fn decompose_matrix4_with(
    mat: &Matrix4<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
    affine_tolerance: Real,
) -> Decomposition {
    let linear = mat.fixed_view::<3, 3>(0, 0).into_owned();
    let mut decomposition = decompose_matrix3_with(&linear, cs, convention);
    decomposition.components.translate = mat.fixed_view::<3, 1>(0, 3).into_owned();

    if let Err(error) = check_affine(mat, affine_tolerance) {
        log::debug!("decompose: {error}");
        decomposition.fail(error);
    }
    decomposition
}

/// Decompose a 4×4 affine transform under the configured default convention
/// and [`tolerance`].
///
/// # Example
/// ```rust
/// # use affine_hpr::{compose, decompose, coordinate_system::CoordinateSystem};
/// # use nalgebra::Vector3;
/// let cs = CoordinateSystem::ZupRight;
/// let m = compose::compose_matrix4(
///     &Vector3::new(2.0, 3.0, 0.5),
///     &Vector3::new(0.3, 0.0, 0.0),
///     &Vector3::new(45.0, 30.0, -20.0),
///     &Vector3::new(5.0, -2.0, 1.0),
///     cs,
/// );
/// let components = decompose::decompose_matrix4(&m, cs).into_result().unwrap();
/// assert!((components.shear.x - 0.3).abs() < 1e-3);
/// assert!((components.hpr.y - 30.0).abs() < 1e-3);
/// ```
pub fn decompose_matrix4(mat: &Matrix4<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix4_with(mat, cs, config::default_convention(), tolerance())
}

/// [`decompose_matrix4`] pinned to [`HprConvention::Old`].
pub fn decompose_matrix4_old_hpr(mat: &Matrix4<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix4_with(mat, cs, HprConvention::Old, tolerance())
}

/// [`decompose_matrix4`] pinned to [`HprConvention::New`].
pub fn decompose_matrix4_new_hpr(mat: &Matrix4<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix4_with(mat, cs, HprConvention::New, tolerance())
}

/// Decompose into the flat `[scale, shear, hpr, translate]` layout.
///
/// `out` receives best-effort values even when an error is returned.
pub fn decompose_matrix4_flat_with(
    mat: &Matrix4<Real>,
    out: &mut [Real; FLAT_LEN],
    cs: CoordinateSystem,
    convention: HprConvention,
    affine_tolerance: Real,
) -> Result<(), DecomposeError> {
    let decomposition = decompose_matrix4_with(mat, cs, convention, affine_tolerance);
    *out = decomposition.components.to_flat();
    match decomposition.error {
        None => Ok(()),
        Some(error) => Err(error),
    }
}

/// [`decompose_matrix4_flat_with`] under the configured default convention
/// and [`tolerance`].
pub fn decompose_matrix4_flat(
    mat: &Matrix4<Real>,
    out: &mut [Real; FLAT_LEN],
    cs: CoordinateSystem,
) -> Result<(), DecomposeError> {
    decompose_matrix4_flat_with(mat, out, cs, config::default_convention(), tolerance())
}

#[cfg(all(test, feature = "f64"))]
mod test {
    use super::*;
    use crate::compose::scale_shear_matrix;
    use approx::assert_relative_eq;

    #[test]
    fn orthogonalize_upper_triangular() {
        let scale = Vector3::new(2.0, 3.0, 0.5);
        let shear = Vector3::new(0.3, -0.2, 0.7);
        let o = orthogonalize(&scale_shear_matrix(&scale, &shear));
        assert_relative_eq!(o.scale, scale, epsilon = 1e-12);
        assert_relative_eq!(o.shear, shear, epsilon = 1e-12);
        assert_relative_eq!(o.rotation, Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn negative_determinant_lands_on_second_axis() {
        let o = orthogonalize(&Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0)));
        assert_relative_eq!(o.scale, Vector3::new(1.0, -1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(o.rotation.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            o.rotation * scale_shear_matrix(&o.scale, &o.shear),
            Matrix3::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn single_collapsed_axis_keeps_rotation() {
        for collapsed in 0..3 {
            let mut scale = Vector3::new(2.0, 3.0, 4.0);
            scale[collapsed] = 0.0;
            let o = orthogonalize(&Matrix3::from_diagonal(&scale));
            assert_eq!(o.scale[collapsed], 0.0);
            assert_relative_eq!(o.rotation, Matrix3::identity(), epsilon = 1e-12);
        }
    }

    #[test]
    fn parallel_columns_collapse_the_dependent_axis() {
        let c0 = Vector3::new(0.6, 0.8, 0.3);
        let c2 = Vector3::new(0.2, -0.5, 0.9);
        let o = orthogonalize(&Matrix3::from_columns(&[c0, c0 * 3.0, c2]));

        assert_eq!(o.scale.y, 0.0);
        assert_eq!(o.shear.x, 0.0);
        assert_eq!(o.shear.z, 0.0);
        assert_relative_eq!(o.rotation.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            o.rotation.transpose() * o.rotation,
            Matrix3::identity(),
            epsilon = 1e-12
        );
        // The surviving x axis is untouched by the completion.
        assert_relative_eq!(o.rotation.column(0).into_owned(), c0.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn zero_matrix_stays_finite() {
        let d = decompose_matrix3_with(&Matrix3::zeros(), CoordinateSystem::ZupRight, HprConvention::New);
        assert!(d.success());
        for v in d.components.to_flat() {
            assert!(v.is_finite());
        }
        assert_eq!(d.components.scale, Vector3::zeros());
    }

    #[test]
    fn check_affine_tolerance() {
        let mut m = Matrix4::<Real>::identity();
        assert!(check_affine(&m, 0.0).is_ok());

        m[(3, 1)] = 1e-9;
        assert!(check_affine(&m, 1e-6).is_ok());
        assert!(check_affine(&m, 1e-12).is_err());

        m[(3, 3)] = Real::NAN;
        assert!(check_affine(&m, 1.0).is_err());

        for i in 0..4 {
            let mut m = Matrix4::<Real>::identity();
            m[(3, i)] = Real::NAN;
            assert!(check_affine(&m, Real::INFINITY).is_err(), "NaN at column {i}");
        }
    }

    #[test]
    fn first_failure_is_kept() {
        let mut d = Decomposition {
            components: Components::IDENTITY,
            error: None,
        };
        d.fail(DecomposeError::UnrepresentableShear {
            shear: Vector3::x(),
        });
        d.fail(DecomposeError::NonAffineMatrix {
            bottom_row: [0.0; 4],
            deviation: 1.0,
        });
        assert!(matches!(
            d.into_result(),
            Err(DecomposeError::UnrepresentableShear { .. })
        ));
    }
}
