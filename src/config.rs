//! Process-wide defaults for call sites that do not pass an explicit
//! coordinate system or hpr convention.
//!
//! Both values are settled once, at configuration time, and then only read:
//!  1) **Build-time**: `AFFINE_HPR_COORDINATE_SYSTEM` (e.g. `yup-right`) and
//!     `AFFINE_HPR_CONVENTION` (`old` or `new`)
//!  2) **Runtime**: [`set_default_coordinate_system`] / [`set_default_convention`],
//!     called once before the first compose or decompose
//!
//! Without either, the defaults are Z-up right-handed and the new convention.

use crate::coordinate_system::CoordinateSystem;
use crate::euler::HprConvention;
use core::str::FromStr;
use std::sync::OnceLock;

static COORDINATE_SYSTEM_CELL: OnceLock<CoordinateSystem> = OnceLock::new();
static CONVENTION_CELL: OnceLock<HprConvention> = OnceLock::new();

const BUILTIN_COORDINATE_SYSTEM: CoordinateSystem = CoordinateSystem::ZupRight;
const BUILTIN_CONVENTION: HprConvention = HprConvention::New;

/// `Default` is not a valid process default; it would resolve to itself.
const fn explicit(cs: CoordinateSystem) -> CoordinateSystem {
    match cs {
        CoordinateSystem::Default => BUILTIN_COORDINATE_SYSTEM,
        cs => cs,
    }
}

/// The coordinate system that [`CoordinateSystem::Default`] resolves to.
/// Never returns [`CoordinateSystem::Default`].
pub fn default_coordinate_system() -> CoordinateSystem {
    *COORDINATE_SYSTEM_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("AFFINE_HPR_COORDINATE_SYSTEM") {
            match CoordinateSystem::from_str(environment_variable) {
                Ok(cs) => return explicit(cs),
                Err(e) => log::debug!("ignoring AFFINE_HPR_COORDINATE_SYSTEM: {e}"),
            }
        }
        BUILTIN_COORDINATE_SYSTEM
    })
}

/// Set the default coordinate system once (subsequent calls are ignored).
///
/// Returns `false` when a default was already in effect.
pub fn set_default_coordinate_system(cs: CoordinateSystem) -> bool {
    let accepted = COORDINATE_SYSTEM_CELL.set(explicit(cs)).is_ok();
    if !accepted {
        log::debug!(
            "default coordinate system already {}, ignoring {cs}",
            default_coordinate_system()
        );
    }
    accepted
}

/// The hpr convention used by the entry points without an explicit convention.
pub fn default_convention() -> HprConvention {
    *CONVENTION_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("AFFINE_HPR_CONVENTION") {
            match HprConvention::from_str(environment_variable) {
                Ok(convention) => return convention,
                Err(e) => log::debug!("ignoring AFFINE_HPR_CONVENTION: {e}"),
            }
        }
        BUILTIN_CONVENTION
    })
}

/// Set the default hpr convention once (subsequent calls are ignored).
///
/// Returns `false` when a default was already in effect.
pub fn set_default_convention(convention: HprConvention) -> bool {
    let accepted = CONVENTION_CELL.set(convention).is_ok();
    if !accepted {
        log::debug!(
            "default hpr convention already {}, ignoring {convention}",
            default_convention()
        );
    }
    accepted
}
