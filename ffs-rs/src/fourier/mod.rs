//! Fourier-series transforms for band-limited periodic signals.
//!
//! The module exposes three operations, layered strictly on top of the FFT:
//!
//! - [`ffs`] / [`iffs`] convert between uniformly sampled values of a
//!   `T`-periodic signal (on the grid produced by [`ffs_sample`]) and its
//!   windowed Fourier-series coefficients.
//! - [`czt`] evaluates the z-transform on the unit-circle contour
//!   `A·Wᵏ`, `k = 0..M-1`, via Bluestein's algorithm.
//! - [`fs_interp`] / [`fs_interp_real`] reconstruct a band-limited periodic
//!   signal at `M` evenly spaced points of `[a, b]` from its truncated
//!   Fourier-series coefficients, by phrasing the evaluation as a CZT.
//!
//! Each free function accepts an n-dimensional array and an `axis`; lanes
//! along every other axis are transformed independently. The underlying
//! 1-D computations are exposed as validated kernels
//! ([`FfsKernel`], [`CztKernel`], ...) for callers that manage their own
//! buffers or amortize parameter validation across many lanes.

mod arraytools;
mod czt;
mod ffs;
mod interp;
pub mod traits;

pub use czt::{czt, CztConfig, CztKernel};
pub use ffs::{
    ffs, ffs_sample, iffs, FfsConfig, FfsKernel, FfsSampleConfig, FfsSampleKernel, IffsConfig,
    IffsKernel,
};
pub use interp::{fs_interp, fs_interp_real, FsInterpConfig, FsInterpKernel};
