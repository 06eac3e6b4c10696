#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! Fast Fourier Series tooling for band-limited periodic signals.
//!
//! The crate provides three transform primitives and their supporting
//! machinery:
//!
//! - [`fourier::ffs`] / [`fourier::iffs`]: map uniformly sampled values of a
//!   periodic signal to/from its windowed Fourier-series coefficients.
//! - [`fourier::czt`]: evaluate the z-transform on a unit-modulus spiral
//!   contour with Bluestein's algorithm.
//! - [`fourier::fs_interp`] / [`fourier::fs_interp_real`]: reconstruct a
//!   band-limited periodic signal on an arbitrary uniform grid from its
//!   truncated Fourier-series coefficients.
//!
//! All operations accept n-dimensional [`ndarray`] inputs and transform one
//! chosen axis, treating every other axis as an independent batch dimension.
//! Each operation is exposed both as a free function and as a validated
//! trait-first kernel (see [`kernel`]).

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod kernel;

#[cfg(feature = "std")]
pub mod fourier;
