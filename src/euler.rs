//! Heading/pitch/roll ↔ rotation matrix conversion.
//!
//! Two derivations coexist. Stored animation data was produced with the
//! [`HprConvention::Old`] one, whose angles differ from the corrected
//! [`HprConvention::New`] derivation for the same orientation. Both share the
//! scale/shear handling in [`compose`](crate::compose) and
//! [`decompose`](crate::decompose); only the [`EulerStrategy`] varies.
//!
//! Strategies work in the canonical right-handed Z-up frame (right = +X,
//! forward = +Y, up = +Z) with column vectors. Angles are in degrees.

use crate::coordinate_system::CoordinateSystem;
use crate::errors::ParseConventionError;
use crate::float_types::{GIMBAL_EPSILON, Real};
use core::fmt;
use core::str::FromStr;
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Conversion between an hpr triple and a pure rotation matrix.
pub trait EulerStrategy: Sync {
    /// Rotation matrix for `hpr = (heading, pitch, roll)` in degrees.
    fn hpr_to_rotation(&self, hpr: &Vector3<Real>) -> Matrix3<Real>;

    /// Recover `(heading, pitch, roll)` in degrees from a proper rotation.
    ///
    /// Pitch always lands in `[-90, 90]`. At gimbal lock one of heading/roll
    /// is pinned to zero and the other absorbs the combined rotation.
    fn rotation_to_hpr(&self, rotation: &Matrix3<Real>) -> Vector3<Real>;
}

/// Rotation about heading (up, +Z).
#[inline]
fn rot_heading(degrees: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), degrees.to_radians()).into_inner()
}

/// Rotation about pitch (right, +X).
#[inline]
fn rot_pitch(degrees: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), degrees.to_radians()).into_inner()
}

/// Rotation about roll (forward, +Y).
#[inline]
fn rot_roll(degrees: Real) -> Matrix3<Real> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), degrees.to_radians()).into_inner()
}

#[inline]
fn asin_degrees(sine: Real) -> Real {
    sine.clamp(-1.0, 1.0).asin().to_degrees()
}

#[inline]
fn atan2_degrees(y: Real, x: Real) -> Real {
    y.atan2(x).to_degrees()
}

/// The historical derivation: heading is applied first, then pitch, then roll
/// about the *back* axis.
///
/// ```text
/// R = Ry(-r) · Rx(p) · Rz(h)
///
///     ⎡ cq·ch + sq·sp·sh   -cq·sh + sq·sp·ch   sq·cp ⎤
/// R = ⎢ cp·sh               cp·ch             -sp    ⎥     q = -r
///     ⎣-sq·ch + cq·sp·sh    sq·sh + cq·sp·ch   cq·cp ⎦
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OldHpr;

impl EulerStrategy for OldHpr {
    fn hpr_to_rotation(&self, hpr: &Vector3<Real>) -> Matrix3<Real> {
        rot_roll(-hpr.z) * rot_pitch(hpr.y) * rot_heading(hpr.x)
    }

    fn rotation_to_hpr(&self, rotation: &Matrix3<Real>) -> Vector3<Real> {
        let pitch = asin_degrees(-rotation[(1, 2)]);
        let cos_pitch = rotation[(1, 0)].hypot(rotation[(1, 1)]);

        if cos_pitch < GIMBAL_EPSILON {
            // Heading is pinned; roll absorbs it.
            log::trace!("old hpr: gimbal lock at pitch {pitch}");
            let back_roll = atan2_degrees(-rotation[(2, 0)], rotation[(0, 0)]);
            return Vector3::new(0.0, pitch, -back_roll);
        }

        let heading = atan2_degrees(rotation[(1, 0)], rotation[(1, 1)]);
        let back_roll = atan2_degrees(rotation[(0, 2)], rotation[(2, 2)]);
        Vector3::new(heading, pitch, -back_roll)
    }
}

/// The corrected derivation: roll about forward is applied first, then pitch,
/// then heading.
///
/// ```text
/// R = Rz(h) · Rx(p) · Ry(r)
///
///     ⎡ ch·cr - sh·sp·sr   -sh·cp   ch·sr + sh·sp·cr ⎤
/// R = ⎢ sh·cr + ch·sp·sr    ch·cp   sh·sr - ch·sp·cr ⎥
///     ⎣-cp·sr               sp      cp·cr            ⎦
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NewHpr;

impl EulerStrategy for NewHpr {
    fn hpr_to_rotation(&self, hpr: &Vector3<Real>) -> Matrix3<Real> {
        rot_heading(hpr.x) * rot_pitch(hpr.y) * rot_roll(hpr.z)
    }

    fn rotation_to_hpr(&self, rotation: &Matrix3<Real>) -> Vector3<Real> {
        let pitch = asin_degrees(rotation[(2, 1)]);
        let cos_pitch = rotation[(0, 1)].hypot(rotation[(1, 1)]);

        if cos_pitch < GIMBAL_EPSILON {
            // Roll is pinned; heading absorbs it.
            log::trace!("new hpr: gimbal lock at pitch {pitch}");
            let heading = atan2_degrees(rotation[(1, 0)], rotation[(0, 0)]);
            return Vector3::new(heading, pitch, 0.0);
        }

        let heading = atan2_degrees(-rotation[(0, 1)], rotation[(1, 1)]);
        let roll = atan2_degrees(-rotation[(2, 0)], rotation[(2, 2)]);
        Vector3::new(heading, pitch, roll)
    }
}

static OLD_HPR: OldHpr = OldHpr;
static NEW_HPR: NewHpr = NewHpr;

/// Selects which [`EulerStrategy`] a compose/decompose call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HprConvention {
    /// [`OldHpr`], matching previously stored angle data.
    Old,
    /// [`NewHpr`], the corrected derivation.
    New,
}

impl HprConvention {
    pub fn strategy(self) -> &'static dyn EulerStrategy {
        match self {
            HprConvention::Old => &OLD_HPR,
            HprConvention::New => &NEW_HPR,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            HprConvention::Old => HprConvention::New,
            HprConvention::New => HprConvention::Old,
        }
    }

    /// Pure rotation for `hpr` expressed in `cs`.
    pub fn rotation_matrix(self, hpr: &Vector3<Real>, cs: CoordinateSystem) -> Matrix3<Real> {
        let canonical = self.strategy().hpr_to_rotation(hpr);
        cs.resolve().rotation_from_canonical(&canonical)
    }

    /// `hpr` of a proper rotation expressed in `cs`.
    pub fn hpr_from_rotation(self, rotation: &Matrix3<Real>, cs: CoordinateSystem) -> Vector3<Real> {
        let canonical = cs.resolve().rotation_to_canonical(rotation);
        self.strategy().rotation_to_hpr(&canonical)
    }

    /// Re-express `hpr`, written under this convention, under `to` so that both
    /// describe the same orientation.
    ///
    /// Used to migrate stored angles between conventions.
    ///
    /// # Example
    /// ```rust
    /// # use affine_hpr::euler::HprConvention;
    /// # use nalgebra::Vector3;
    /// let stored = Vector3::new(30.0, 45.0, 10.0);
    /// let migrated = HprConvention::Old.convert_hpr(&stored, HprConvention::New);
    /// let back = HprConvention::New.convert_hpr(&migrated, HprConvention::Old);
    /// assert!((back - stored).norm() < 1e-3);
    /// ```
    pub fn convert_hpr(self, hpr: &Vector3<Real>, to: HprConvention) -> Vector3<Real> {
        if self == to {
            return *hpr;
        }
        let rotation = self.strategy().hpr_to_rotation(hpr);
        to.strategy().rotation_to_hpr(&rotation)
    }
}

impl fmt::Display for HprConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HprConvention::Old => f.write_str("old"),
            HprConvention::New => f.write_str("new"),
        }
    }
}

impl FromStr for HprConvention {
    type Err = ParseConventionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Ok(HprConvention::Old),
            "new" => Ok(HprConvention::New),
            _ => Err(ParseConventionError(s.to_string())),
        }
    }
}
