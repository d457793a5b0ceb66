#![cfg(feature = "f64")]
#![allow(deprecated)]

mod support;

use affine_hpr::{
    CoordinateSystem, DecomposeError, HprConvention,
    compose::compose_matrix4_with,
    decompose::decompose_matrix4_with,
    legacy::{
        compose_matrix4_no_shear, compose_matrix4_no_shear_with, decompose_matrix3_no_shear,
        decompose_matrix4_no_shear, decompose_matrix4_no_shear_with,
    },
};
use approx::assert_abs_diff_eq;
use nalgebra::Vector3;

#[test]
fn no_shear_round_trip() {
    let scale = Vector3::new(2.0, 3.0, 0.5);
    let hpr = Vector3::new(45.0, 30.0, -20.0);
    let translate = Vector3::new(5.0, -2.0, 1.0);
    for cs in support::COORDINATE_SYSTEMS {
        for convention in support::CONVENTIONS {
            let m = compose_matrix4_no_shear_with(&scale, &hpr, &translate, cs, convention);
            let d = decompose_matrix4_no_shear_with(&m, cs, convention);
            assert!(d.success(), "{cs} {convention}: {:?}", d.error);
            assert_abs_diff_eq!(d.components.scale, scale, epsilon = 1e-9);
            assert_abs_diff_eq!(d.components.hpr, hpr, epsilon = 1e-9);
            assert_abs_diff_eq!(d.components.translate, translate, epsilon = 1e-9);
        }
    }
}

#[test]
fn sheared_matrix_fails_only_on_legacy_path() {
    let cs = CoordinateSystem::ZupRight;
    let shear = Vector3::new(0.3, 0.0, 0.0);
    for convention in support::CONVENTIONS {
        let m = compose_matrix4_with(
            &Vector3::new(1.0, 1.0, 1.0),
            &shear,
            &Vector3::new(45.0, 30.0, -20.0),
            &Vector3::zeros(),
            cs,
            convention,
        );

        let full = decompose_matrix4_with(&m, cs, convention, 1e-6);
        assert!(full.success());
        assert_abs_diff_eq!(full.components.shear, shear, epsilon = 1e-9);

        let legacy = decompose_matrix4_no_shear_with(&m, cs, convention);
        assert!(!legacy.success());
        match legacy.error {
            Some(DecomposeError::UnrepresentableShear { shear: found }) => {
                assert_abs_diff_eq!(found, shear, epsilon = 1e-9)
            },
            other => panic!("expected UnrepresentableShear, got {other:?}"),
        }
    }
}

#[test]
fn default_convention_wrappers_agree() {
    let scale = Vector3::new(1.0, 2.0, 1.0);
    let hpr = Vector3::new(-10.0, 5.0, 60.0);
    let m = compose_matrix4_no_shear(&scale, &hpr, &Vector3::zeros(), CoordinateSystem::Default);
    assert!(decompose_matrix4_no_shear(&m, CoordinateSystem::Default).success());

    let linear = m.fixed_view::<3, 3>(0, 0).into_owned();
    let d = decompose_matrix3_no_shear(&linear, CoordinateSystem::Default);
    assert!(d.success());
    assert_abs_diff_eq!(d.components.hpr, hpr, epsilon = 1e-9);
}

#[test]
fn legacy_path_still_rejects_projective_matrices() {
    let mut m = compose_matrix4_no_shear_with(
        &Vector3::new(1.0, 1.0, 1.0),
        &Vector3::zeros(),
        &Vector3::zeros(),
        CoordinateSystem::ZupRight,
        HprConvention::New,
    );
    m[(3, 2)] = 0.5;
    let d = decompose_matrix4_no_shear_with(&m, CoordinateSystem::ZupRight, HprConvention::New);
    assert!(matches!(d.error, Some(DecomposeError::NonAffineMatrix { .. })));
}
