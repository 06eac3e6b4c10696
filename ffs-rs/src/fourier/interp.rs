//! Band-limited interpolation of periodic signals.
//!
//! Given the truncated Fourier-series coefficients of a `T`-periodic
//! signal, evaluates the signal at `M` evenly spaced points of `[a, b]` by
//! phrasing the evaluation as a chirp z-transform whose contour matches the
//! interpolation grid. Real-valued signals get an accelerated path that
//! transforms only the zero and positive frequencies.

use core::f64::consts::TAU;

use alloc::vec::Vec;

use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::Float;
use rustfft::num_complex::Complex;
use rustfft::FftNum;

use crate::fourier::arraytools::{as_f64, map_lanes, normalize_axis, unit_phasor};
use crate::fourier::czt::{CztConfig, CztKernel};
use crate::fourier::traits::{Czt1D, FsInterp1D};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};

/// Constructor config for [`FsInterpKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsInterpConfig<F> {
    /// Signal period.
    pub t: F,
    /// Interpolation interval start.
    pub a: F,
    /// Interpolation interval end; must exceed `a`.
    pub b: F,
    /// Number of interpolation points.
    pub m: usize,
}

/// Trait-first 1D band-limited interpolation kernel.
///
/// Input lanes hold Fourier-series coefficients ordered
/// `[x_{-N}^{FS}, ..., x_{N}^{FS}]`; the lane length must be odd.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsInterpKernel<F> {
    t: F,
    a: F,
    b: F,
    m: usize,
}

impl<F: Float> KernelLifecycle for FsInterpKernel<F> {
    type Config = FsInterpConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !(config.t > F::zero()) || !config.t.is_finite() {
            return Err(ConfigError::InvalidArgument {
                arg: "t",
                reason: "period must be positive and finite",
            });
        }
        if !config.a.is_finite() || !config.b.is_finite() || !(config.a < config.b) {
            return Err(ConfigError::InvalidArgument {
                arg: "a",
                reason: "interval start must be finite and smaller than its end",
            });
        }
        if config.m == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "m",
                reason: "interpolation point count must be positive",
            });
        }
        Ok(Self {
            t: config.t,
            a: config.a,
            b: config.b,
            m: config.m,
        })
    }
}

impl<F: Float> FsInterpKernel<F> {
    /// Contour angles: `alpha = arg(A)`, `omega = arg(W)`.
    ///
    /// `A = exp(-j·2π·a/T)` anchors the contour at the interval start,
    /// `W = exp(j·2π·(b-a)/(T·(M-1)))` steps it across the grid. For
    /// `M = 1` the step is non-finite and fails the CZT stability check.
    fn contour_angles(&self) -> (f64, f64) {
        let t = as_f64(self.t);
        let a = as_f64(self.a);
        let b = as_f64(self.b);
        let alpha = -TAU / t * a;
        let omega = TAU / t * (b - a) / (self.m - 1) as f64;
        (alpha, omega)
    }

    fn check_coefficients(x_fs: &[Complex<F>]) -> Result<usize, ExecInvariantViolation> {
        if x_fs.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "coefficient lane must be non-empty",
            });
        }
        if x_fs.len() % 2 == 0 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "coefficient lane length must be odd",
            });
        }
        Ok((x_fs.len() - 1) / 2)
    }
}

impl<F> FsInterp1D<F> for FsInterpKernel<F>
where
    F: Float + FftNum,
{
    fn run_into<I, O>(&self, x_fs: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != self.m {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.m,
                got: out_slice.len(),
            });
        }
        let y = self.run_alloc(x_fs)?;
        out_slice.copy_from_slice(&y);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, x_fs: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let x_fs = x_fs.read_slice().map_err(ExecInvariantViolation::from)?;
        let n = Self::check_coefficients(x_fs)?;
        let (alpha, omega) = self.contour_angles();

        let czt = CztKernel::try_new(CztConfig {
            a: unit_phasor::<F>(alpha),
            w: unit_phasor::<F>(omega),
            m: self.m,
        })
        .map_err(ExecInvariantViolation::from)?;

        let mut y = czt.run_alloc(x_fs)?;
        // The coefficients start at frequency -N, not 0; shift them back
        // with C[k] = W^(-N·k)·A^N per output point.
        for (k, yk) in y.iter_mut().enumerate() {
            let correction = unit_phasor::<F>(n as f64 * (alpha - omega * k as f64));
            *yk = *yk * correction;
        }
        Ok(y)
    }

    fn run_real_into<I, O>(&self, x_fs: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != self.m {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.m,
                got: out_slice.len(),
            });
        }
        let y = self.run_real_alloc(x_fs)?;
        out_slice.copy_from_slice(&y);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_real_alloc<I>(&self, x_fs: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let x_fs = x_fs.read_slice().map_err(ExecInvariantViolation::from)?;
        let n = Self::check_coefficients(x_fs)?;
        let x0 = x_fs[n];
        if n == 0 {
            // Bandwidth 1: the signal is its DC coefficient.
            return Ok(vec![x0.re; self.m]);
        }

        let (alpha, omega) = self.contour_angles();
        let czt = CztKernel::try_new(CztConfig {
            a: unit_phasor::<F>(alpha),
            w: unit_phasor::<F>(omega),
            m: self.m,
        })
        .map_err(ExecInvariantViolation::from)?;

        // Conjugate symmetry: transform the positive frequencies only,
        // double them, and add the DC term back once.
        let positive = &x_fs[n + 1..];
        let y = czt.run_alloc(positive)?;
        let two = F::one() + F::one();
        Ok(y
            .iter()
            .enumerate()
            .map(|(k, &yk)| {
                let correction = unit_phasor::<F>(omega * k as f64 - alpha);
                (yk * correction.scale(two) + x0).re
            })
            .collect())
    }
}

/// Interpolate a band-limited periodic signal from its Fourier-series
/// coefficients.
///
/// `x_fs` holds coefficients `[x_{-N}^{FS}, ..., x_{N}^{FS}]` (odd count)
/// along `axis`; the output resizes that axis to `m` samples taken at
/// `t[k] = a + (b-a)/(m-1)·k`. Interpolation accuracy degrades gracefully
/// with the available bandwidth; a small coefficient count is not an error.
pub fn fs_interp<F, S, D>(
    x_fs: &ArrayBase<S, D>,
    t: F,
    a: F,
    b: F,
    m: usize,
    axis: Option<isize>,
) -> Result<Array<Complex<F>, D>, ExecInvariantViolation>
where
    F: Float + FftNum,
    S: Data<Elem = Complex<F>>,
    D: Dimension,
{
    let kernel =
        FsInterpKernel::try_new(FsInterpConfig { t, a, b, m }).map_err(ExecInvariantViolation::from)?;
    let axis = normalize_axis(axis, x_fs.ndim())?;
    map_lanes(x_fs, axis, m, |lane| kernel.run_alloc(lane))
}

/// [`fs_interp`] for real-valued signals.
///
/// Assumes `x_fs` is conjugate symmetric and uses only the zero and
/// positive frequency coefficients, roughly halving the transform size.
/// The output is real-valued.
pub fn fs_interp_real<F, S, D>(
    x_fs: &ArrayBase<S, D>,
    t: F,
    a: F,
    b: F,
    m: usize,
    axis: Option<isize>,
) -> Result<Array<F, D>, ExecInvariantViolation>
where
    F: Float + FftNum,
    S: Data<Elem = Complex<F>>,
    D: Dimension,
{
    let kernel =
        FsInterpKernel::try_new(FsInterpConfig { t, a, b, m }).map_err(ExecInvariantViolation::from)?;
    let axis = normalize_axis(axis, x_fs.ndim())?;
    map_lanes(x_fs, axis, m, |lane| kernel.run_real_alloc(lane))
}
