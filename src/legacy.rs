//! Deprecated shear-less entry points.
//!
//! These predate shear support. Composition fixes shear at zero; decomposition
//! runs the full decomposer and rejects matrices whose shear exceeds
//! [`tolerance`], since the scale and rotation it reports were derived with
//! that shear removed.

#![allow(deprecated)]

use crate::compose;
use crate::config;
use crate::coordinate_system::CoordinateSystem;
use crate::decompose::{self, Decomposition};
use crate::errors::DecomposeError;
use crate::euler::HprConvention;
use crate::float_types::{Real, tolerance};
use nalgebra::{Matrix3, Matrix4, Vector3};

fn reject_shear(mut decomposition: Decomposition) -> Decomposition {
    let shear = decomposition.components.shear;
    if shear.iter().any(|s| s.is_nan()) || shear.amax() > tolerance() {
        log::debug!("decompose without shear: found shear {shear:?}");
        decomposition.fail(DecomposeError::UnrepresentableShear { shear });
    }
    decomposition
}

#[deprecated(note = "use compose::compose_matrix3_with with an explicit shear")]
pub fn compose_matrix3_no_shear_with(
    scale: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Matrix3<Real> {
    compose::compose_matrix3_with(scale, &Vector3::zeros(), hpr, cs, convention)
}

#[deprecated(note = "use compose::compose_matrix3 with an explicit shear")]
pub fn compose_matrix3_no_shear(
    scale: &Vector3<Real>,
    hpr: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix3<Real> {
    compose_matrix3_no_shear_with(scale, hpr, cs, config::default_convention())
}

#[deprecated(note = "use compose::compose_matrix4_with with an explicit shear")]
pub fn compose_matrix4_no_shear_with(
    scale: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Matrix4<Real> {
    compose::compose_matrix4_with(scale, &Vector3::zeros(), hpr, translate, cs, convention)
}

#[deprecated(note = "use compose::compose_matrix4 with an explicit shear")]
pub fn compose_matrix4_no_shear(
    scale: &Vector3<Real>,
    hpr: &Vector3<Real>,
    translate: &Vector3<Real>,
    cs: CoordinateSystem,
) -> Matrix4<Real> {
    compose_matrix4_no_shear_with(scale, hpr, translate, cs, config::default_convention())
}

/// Fails with [`DecomposeError::UnrepresentableShear`] when `mat` carries shear.
#[deprecated(note = "use decompose::decompose_matrix3_with, which reports shear")]
pub fn decompose_matrix3_no_shear_with(
    mat: &Matrix3<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Decomposition {
    reject_shear(decompose::decompose_matrix3_with(mat, cs, convention))
}

/// Fails with [`DecomposeError::UnrepresentableShear`] when `mat` carries shear.
#[deprecated(note = "use decompose::decompose_matrix3, which reports shear")]
pub fn decompose_matrix3_no_shear(mat: &Matrix3<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix3_no_shear_with(mat, cs, config::default_convention())
}

/// Fails when `mat` carries shear or is not affine.
#[deprecated(note = "use decompose::decompose_matrix4_with, which reports shear")]
pub fn decompose_matrix4_no_shear_with(
    mat: &Matrix4<Real>,
    cs: CoordinateSystem,
    convention: HprConvention,
) -> Decomposition {
    reject_shear(decompose::decompose_matrix4_with(
        mat,
        cs,
        convention,
        tolerance(),
    ))
}

/// Fails when `mat` carries shear or is not affine.
#[deprecated(note = "use decompose::decompose_matrix4, which reports shear")]
pub fn decompose_matrix4_no_shear(mat: &Matrix4<Real>, cs: CoordinateSystem) -> Decomposition {
    decompose_matrix4_no_shear_with(mat, cs, config::default_convention())
}
