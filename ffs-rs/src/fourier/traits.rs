//! Trait interfaces for the Fourier-series transform capabilities.
//!
//! These traits define the trait-first API shape implemented by the
//! transform kernels: `run_into` writes into a caller-provided lane,
//! `run_alloc` allocates the output lane.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use rustfft::num_complex::Complex;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// 1D fast Fourier series analysis capability (samples to coefficients).
pub trait Ffs1D<T> {
    /// Run the transform into a caller-provided output lane of equal length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<Complex<T>> + ?Sized;

    /// Run the transform and allocate the output lane.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<T>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;
}

/// 1D fast Fourier series synthesis capability (coefficients to samples).
pub trait Iffs1D<T> {
    /// Run the inverse transform into a caller-provided output lane.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<Complex<T>> + ?Sized;

    /// Run the inverse transform and allocate the output lane.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<T>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;
}

/// 1D chirp z-transform capability.
pub trait Czt1D<T> {
    /// Run the transform into a caller-provided lane of the configured
    /// output length.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<Complex<T>> + ?Sized;

    /// Run the transform and allocate the output lane.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<T>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;
}

/// 1D band-limited interpolation capability.
///
/// The `run_*` methods evaluate the general complex-signal path; the
/// `run_real_*` methods assume conjugate-symmetric coefficients (a
/// real-valued signal) and use only the zero and positive frequencies,
/// which roughly halves the transform cost.
pub trait FsInterp1D<T> {
    /// Interpolate into a caller-provided complex lane of length `M`.
    fn run_into<I, O>(&self, x_fs: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<Complex<T>> + ?Sized;

    /// Interpolate and allocate the complex output lane.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, x_fs: &I) -> Result<Vec<Complex<T>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;

    /// Interpolate a real-valued signal into a caller-provided real lane.
    fn run_real_into<I, O>(&self, x_fs: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Interpolate a real-valued signal and allocate the real output lane.
    #[cfg(feature = "alloc")]
    fn run_real_alloc<I>(&self, x_fs: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;
}

/// FFS sampling-grid generation capability.
pub trait FfsSample1D<T> {
    /// Generate the sample abscissas into a caller-provided lane.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the sample abscissas and allocate the output lane.
    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}
