//! Compose and decompose affine transforms.
//!
//! Converts between a 3×3 or 4×4 matrix and its geometric parameters:
//! non-uniform scale, shear, rotation as heading/pitch/roll in degrees, and
//! translation. Composition applies them in that order; decomposition
//! recovers them by Gram–Schmidt orthogonalization of the linear block.
//!
//! Two historical heading/pitch/roll derivations are supported side by side
//! (see [`euler::HprConvention`]). Every entry point either takes the
//! convention explicitly (`*_with`, `*_old_hpr`, `*_new_hpr`) or reads the
//! process default from [`config`].
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **serde**: `Serialize`/`Deserialize` for [`Components`], [`CoordinateSystem`] and [`HprConvention`]

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod config;
pub mod coordinate_system;
pub mod euler;
pub mod components;
pub mod compose;
pub mod decompose;
pub mod legacy;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use components::Components;
pub use coordinate_system::CoordinateSystem;
pub use decompose::Decomposition;
pub use errors::DecomposeError;
pub use euler::HprConvention;
