//! Test support library
//! Provides parameter grids and comparison helpers shared by the integration tests.

#![allow(dead_code)]

use affine_hpr::{CoordinateSystem, HprConvention, float_types::Real};
use nalgebra::{Matrix4, Vector3};

pub const COORDINATE_SYSTEMS: [CoordinateSystem; 4] = [
    CoordinateSystem::ZupRight,
    CoordinateSystem::YupRight,
    CoordinateSystem::ZupLeft,
    CoordinateSystem::YupLeft,
];

pub const CONVENTIONS: [HprConvention; 2] = [HprConvention::Old, HprConvention::New];

pub fn scales() -> [Vector3<Real>; 3] {
    [
        Vector3::new(1.0, 1.0, 1.0),
        Vector3::new(2.0, 3.0, 0.5),
        Vector3::new(1.0, -1.0, 1.0),
    ]
}

pub fn shears() -> [Vector3<Real>; 2] {
    [Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.3, 0.0, 0.0)]
}

pub fn hprs() -> [Vector3<Real>; 3] {
    [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(45.0, 30.0, -20.0),
        Vector3::new(90.0, 90.0, 90.0),
    ]
}

pub fn translates() -> [Vector3<Real>; 2] {
    [Vector3::new(0.0, 0.0, 0.0), Vector3::new(5.0, -2.0, 1.0)]
}

/// Returns true if `a` and `b` are within `eps` of each other.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Angles in degrees equal modulo a full turn.
pub fn angle_eq(a: Real, b: Real, eps: Real) -> bool {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d) < eps
}

/// Largest absolute entry-wise difference between two matrices.
pub fn max_abs_diff(a: &Matrix4<Real>, b: &Matrix4<Real>) -> Real {
    (a - b).amax()
}

pub fn is_gimbal_locked(hpr: &Vector3<Real>) -> bool {
    approx_eq(hpr.y.abs(), 90.0, 1e-9)
}
