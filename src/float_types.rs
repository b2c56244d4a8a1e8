//! Scalar type and fixed numerical constants used throughout the kernel.
//!
//! Unlike a CAD kernel built on exact predicates, this engine is a
//! floating-point BSP with a single fixed epsilon policy (see
//! [`EPSILON`]) — there is no "exact" mode to switch to.

/// The scalar type used for all positions, normals, and matrix entries.
pub type Real = f64;

/// The fixed classification tolerance used by every on-plane / on-edge
/// decision in the BSP engine (see [`crate::mesh::plane`]). A compile
/// time constant, not configurable per-operation.
pub const EPSILON: Real = 1e-5;

/// Archimedes' constant (π).
pub const PI: Real = core::f64::consts::PI;

/// The full circle constant (τ = 2π).
pub const TAU: Real = core::f64::consts::TAU;
