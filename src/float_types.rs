// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Relative length, against the largest matrix entry, under which a basis
/// vector is treated as collapsed during decomposition.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Relative length, against the largest matrix entry, under which a basis
/// vector is treated as collapsed during decomposition.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;

/// Cosine of pitch below which heading and roll are treated as collapsed
/// into a single degree of freedom (gimbal lock).
#[cfg(feature = "f32")]
pub const GIMBAL_EPSILON: Real = 1e-4;
/// Cosine of pitch below which heading and roll are treated as collapsed
/// into a single degree of freedom (gimbal lock).
#[cfg(feature = "f64")]
pub const GIMBAL_EPSILON: Real = 1e-9;

/// Lazily-initialized tolerance used by the affine-completeness check and the
/// no-shear legacy path. Defaults depend on precision (`f32` vs `f64`), but can
/// be overridden:
///  1) **Build-time**: set env var `AFFINE_HPR_TOLERANCE` (e.g. `AFFINE_HPR_TOLERANCE=1e-9 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Returns the current tolerance.
/// If not set yet, it tries `AFFINE_HPR_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("AFFINE_HPR_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `affine_hpr::float_types::set_tolerance(1e-9);`
///
/// Returns `false` when a tolerance was already in effect.
pub fn set_tolerance(value: Real) -> bool {
    let accepted = TOLERANCE_CELL.set(value.max(Real::EPSILON)).is_ok();
    if !accepted {
        log::debug!("tolerance already initialised, ignoring {value}");
    }
    accepted
}
