//! A **mesh geometry kernel**: extrusion of 2D polygons into 3D meshes
//! (linear, rotational, lofted), affine transformation with correct
//! winding handling, and **constructive solid geometry (CSG)** boolean
//! evaluation (*union*, *difference*, *intersection*) via
//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) trees
//! on indexed triangle meshes.
//!
//! This crate is the back end for a parametric feature-tree front end:
//! it has no knowledge of feature records, sketches, constraints, or
//! any source language — it consumes 2D polygons and meshes, and
//! produces indexed triangle meshes with per-vertex normals.
//!
//! # Layout
//! - [`mesh`]: the indexed [`mesh::Mesh`] container, the BSP machinery
//!   ([`mesh::plane`], [`mesh::polygon`], [`mesh::bsp`]), and the CSG
//!   evaluator ([`mesh::csg`]).
//! - [`sketch`]: [`sketch::Polygon2D`] and the extrusion operations
//!   (linear, rotational, loft).
//! - [`transform`]: affine transform builders and the winding-flip
//!   predicate.

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod float_types;
pub mod mesh;
pub mod sketch;
pub mod transform;
