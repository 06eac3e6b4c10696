//! Fast Fourier Series transform pair.
//!
//! `ffs` maps `N_s` uniform samples of a `T`-periodic signal (taken on the
//! grid produced by [`ffs_sample`]) to its windowed Fourier-series
//! coefficients `[x_{-N}^{FS}, ..., x_{N}^{FS}, ...]`; `iffs` is the exact
//! inverse. Both are a single FFT plus per-frequency (`C_1`) and per-sample
//! (`C_2`) phase-correction vectors whose exponents depend on the parity of
//! `N_s`.

use core::f64::consts::TAU;

use alloc::vec::Vec;

use ndarray::{Array, Array1, ArrayBase, Data, Dimension};
use num_traits::Float;
use rustfft::num_complex::Complex;
use rustfft::{FftNum, FftPlanner};

use crate::fourier::arraytools::{as_f64, map_lanes, normalize_axis, unit_phasor};
use crate::fourier::traits::{Ffs1D, FfsSample1D, Iffs1D};
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};

/// Correction-vector orientation: analysis (`ffs`) or synthesis (`iffs`).
///
/// The two transforms share every exponent; only the signs differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Analysis,
    Synthesis,
}

fn validate_ffs_params<F: Float>(t: F, t_c: F, n_fs: usize) -> Result<(), ConfigError> {
    if !(t > F::zero()) || !t.is_finite() {
        return Err(ConfigError::InvalidArgument {
            arg: "t",
            reason: "period must be positive and finite",
        });
    }
    if !t_c.is_finite() {
        return Err(ConfigError::InvalidArgument {
            arg: "t_c",
            reason: "period midpoint must be finite",
        });
    }
    if n_fs < 3 {
        return Err(ConfigError::InvalidArgument {
            arg: "n_fs",
            reason: "bandwidth must be at least 3",
        });
    }
    if n_fs % 2 == 0 {
        return Err(ConfigError::InvalidArgument {
            arg: "n_fs",
            reason: "bandwidth must be odd to center the coefficients on zero frequency",
        });
    }
    Ok(())
}

/// Phase-correction vectors `C_1` (per frequency) and `C_2` (per sample).
///
/// For even `N_s` the sampling grid is offset by half a bin, which shows up
/// as an extra `T / (2 N_s)` term in the `C_1` base angle and a shifted
/// index set for `C_2`.
fn correction_vectors<F: Float>(
    n_s: usize,
    n_fs: usize,
    t: f64,
    t_c: f64,
    direction: Direction,
) -> (Vec<Complex<F>>, Vec<Complex<F>>) {
    let n = ((n_fs - 1) / 2) as i64;
    let m = (n_s / 2) as i64;
    let odd = n_s % 2 == 1;

    let half_bin = if odd { 0.0 } else { t / (2.0 * n_s as f64) };
    let theta_1 = TAU / t * (t_c + half_bin);
    let theta_2 = TAU / n_s as f64;
    let sign = match direction {
        Direction::Analysis => -1.0,
        Direction::Synthesis => 1.0,
    };

    // E_2 runs over [0, .., M] ∪ [-M, .., -1] for odd N_s and
    // [0, .., M-1] ∪ [-M, .., -1] for even N_s.
    let wrap_at = if odd { m + 1 } else { m };

    let mut c_1 = Vec::with_capacity(n_s);
    let mut c_2 = Vec::with_capacity(n_s);
    for i in 0..n_s as i64 {
        let e_1 = if i < n_fs as i64 { i - n } else { 0 };
        let e_2 = if i < wrap_at { i } else { i - n_s as i64 };
        c_1.push(unit_phasor(sign * theta_1 * e_1 as f64));
        c_2.push(unit_phasor(-sign * theta_2 * (n * e_2) as f64));
    }
    (c_1, c_2)
}

fn check_lane<F>(lane: &[Complex<F>], n_fs: usize) -> Result<(), ExecInvariantViolation> {
    if lane.is_empty() {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "transform input must be non-empty",
        });
    }
    if lane.len() < n_fs {
        return Err(ExecInvariantViolation::InvalidState {
            reason: "lane must hold at least `n_fs` samples",
        });
    }
    Ok(())
}

fn ffs_impl<F: Float + FftNum>(
    x: &[Complex<F>],
    t: F,
    t_c: F,
    n_fs: usize,
) -> Vec<Complex<F>> {
    let n_s = x.len();
    let (c_1, c_2) =
        correction_vectors::<F>(n_s, n_fs, as_f64(t), as_f64(t_c), Direction::Analysis);

    let mut buf: Vec<Complex<F>> = x.iter().zip(&c_2).map(|(&xi, &ci)| xi * ci).collect();
    let mut planner = FftPlanner::<F>::new();
    let fft = planner.plan_fft_forward(n_s);
    fft.process(&mut buf);

    let scale = F::from(1.0 / n_s as f64).unwrap_or_else(F::nan);
    for (b, &c) in buf.iter_mut().zip(&c_1) {
        *b = (*b * c).scale(scale);
    }
    buf
}

fn iffs_impl<F: Float + FftNum>(
    x_fs: &[Complex<F>],
    t: F,
    t_c: F,
    n_fs: usize,
) -> Vec<Complex<F>> {
    let n_s = x_fs.len();
    let (c_1, c_2) =
        correction_vectors::<F>(n_s, n_fs, as_f64(t), as_f64(t_c), Direction::Synthesis);

    let mut buf: Vec<Complex<F>> = x_fs.iter().zip(&c_1).map(|(&xi, &ci)| xi * ci).collect();
    let mut planner = FftPlanner::<F>::new();
    let ifft = planner.plan_fft_inverse(n_s);
    ifft.process(&mut buf);

    // The synthesis formula carries a `* N_s` rescaling; rustfft's inverse
    // transform is unnormalized, so the two factors cancel exactly.
    for (b, &c) in buf.iter_mut().zip(&c_2) {
        *b = *b * c;
    }
    buf
}

/// Constructor config for [`FfsKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfsConfig<F> {
    /// Signal period.
    pub t: F,
    /// Period midpoint.
    pub t_c: F,
    /// Signal bandwidth; odd, at least 3.
    pub n_fs: usize,
}

/// Trait-first 1D fast Fourier series analysis kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfsKernel<F> {
    t: F,
    t_c: F,
    n_fs: usize,
}

impl<F: Float> KernelLifecycle for FfsKernel<F> {
    type Config = FfsConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        validate_ffs_params(config.t, config.t_c, config.n_fs)?;
        Ok(Self {
            t: config.t,
            t_c: config.t_c,
            n_fs: config.n_fs,
        })
    }
}

impl<F> Ffs1D<F> for FfsKernel<F>
where
    F: Float + FftNum,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        check_lane(input, self.n_fs)?;
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != input.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: input.len(),
                got: out_slice.len(),
            });
        }
        let y = ffs_impl(input, self.t, self.t_c, self.n_fs);
        out_slice.copy_from_slice(&y);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        check_lane(input, self.n_fs)?;
        Ok(ffs_impl(input, self.t, self.t_c, self.n_fs))
    }
}

/// Constructor config for [`IffsKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IffsConfig<F> {
    /// Signal period.
    pub t: F,
    /// Period midpoint.
    pub t_c: F,
    /// Signal bandwidth; odd, at least 3.
    pub n_fs: usize,
}

/// Trait-first 1D fast Fourier series synthesis kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IffsKernel<F> {
    t: F,
    t_c: F,
    n_fs: usize,
}

impl<F: Float> KernelLifecycle for IffsKernel<F> {
    type Config = IffsConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        validate_ffs_params(config.t, config.t_c, config.n_fs)?;
        Ok(Self {
            t: config.t,
            t_c: config.t_c,
            n_fs: config.n_fs,
        })
    }
}

impl<F> Iffs1D<F> for IffsKernel<F>
where
    F: Float + FftNum,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        check_lane(input, self.n_fs)?;
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != input.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: input.len(),
                got: out_slice.len(),
            });
        }
        let y = iffs_impl(input, self.t, self.t_c, self.n_fs);
        out_slice.copy_from_slice(&y);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        check_lane(input, self.n_fs)?;
        Ok(iffs_impl(input, self.t, self.t_c, self.n_fs))
    }
}

/// Constructor config for [`FfsSampleKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfsSampleConfig<F> {
    /// Signal period.
    pub t: F,
    /// Signal bandwidth; odd, at least 3.
    pub n_fs: usize,
    /// Period midpoint.
    pub t_c: F,
    /// Number of sample points; at least `n_fs`.
    pub n_s: usize,
}

/// Sampling-grid generator for [`ffs`].
///
/// The abscissas come out in the FFT-ordered layout `ffs` expects, not in
/// increasing order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FfsSampleKernel<F> {
    t: F,
    n_fs: usize,
    t_c: F,
    n_s: usize,
}

impl<F: Float> KernelLifecycle for FfsSampleKernel<F> {
    type Config = FfsSampleConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        validate_ffs_params(config.t, config.t_c, config.n_fs)?;
        if config.n_s < config.n_fs {
            return Err(ConfigError::InvalidArgument {
                arg: "n_s",
                reason: "sample count must be at least the bandwidth",
            });
        }
        Ok(Self {
            t: config.t,
            n_fs: config.n_fs,
            t_c: config.t_c,
            n_s: config.n_s,
        })
    }
}

impl<F: Float> FfsSampleKernel<F> {
    fn sample_points(&self) -> Vec<F> {
        let t = as_f64(self.t);
        let t_c = as_f64(self.t_c);
        let n_s = self.n_s;
        let m = (n_s / 2) as i64;
        let odd = n_s % 2 == 1;
        let wrap_at = if odd { m + 1 } else { m };

        (0..n_s as i64)
            .map(|i| {
                let e = if i < wrap_at { i } else { i - n_s as i64 };
                let point = if odd {
                    t_c + t / n_s as f64 * e as f64
                } else {
                    t_c + t / (2.0 * n_s as f64) * (2 * e + 1) as f64
                };
                F::from(point).unwrap_or_else(F::nan)
            })
            .collect()
    }
}

impl<F: Float> FfsSample1D<F> for FfsSampleKernel<F> {
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != self.n_s {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.n_s,
                got: out_slice.len(),
            });
        }
        out_slice.copy_from_slice(&self.sample_points());
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation> {
        Ok(self.sample_points())
    }
}

/// Fourier-series coefficients from signal samples.
///
/// `x` holds `N_s` samples per lane along `axis` (default: last axis),
/// taken at the points returned by [`ffs_sample`]. The output lane is
/// `[x_{-N}^{FS}, ..., x_{N}^{FS}]` in its first `n_fs` entries; for a
/// genuinely band-limited signal the remaining entries vanish. The
/// transform is exactly invertible by [`iffs`] for any input.
///
/// # Example
///
/// ```
/// use ffs_rs::fourier::{ffs, iffs};
/// use ndarray::Array1;
/// use rustfft::num_complex::Complex;
///
/// let x = Array1::from(vec![Complex::new(1.0f64, 0.0); 8]);
/// let x_fs = ffs(&x, 1.0, 0.0, 5, None).unwrap();
/// let x_back = iffs(&x_fs, 1.0, 0.0, 5, None).unwrap();
/// assert!(x.iter().zip(x_back.iter()).all(|(a, b)| (a - b).norm() < 1e-12));
/// ```
pub fn ffs<F, S, D>(
    x: &ArrayBase<S, D>,
    t: F,
    t_c: F,
    n_fs: usize,
    axis: Option<isize>,
) -> Result<Array<Complex<F>, D>, ExecInvariantViolation>
where
    F: Float + FftNum,
    S: Data<Elem = Complex<F>>,
    D: Dimension,
{
    let kernel =
        FfsKernel::try_new(FfsConfig { t, t_c, n_fs }).map_err(ExecInvariantViolation::from)?;
    let axis = normalize_axis(axis, x.ndim())?;
    let n_s = x.shape()[axis];
    map_lanes(x, axis, n_s, |lane| kernel.run_alloc(lane))
}

/// Signal samples from Fourier-series coefficients; the inverse of [`ffs`].
pub fn iffs<F, S, D>(
    x_fs: &ArrayBase<S, D>,
    t: F,
    t_c: F,
    n_fs: usize,
    axis: Option<isize>,
) -> Result<Array<Complex<F>, D>, ExecInvariantViolation>
where
    F: Float + FftNum,
    S: Data<Elem = Complex<F>>,
    D: Dimension,
{
    let kernel =
        IffsKernel::try_new(IffsConfig { t, t_c, n_fs }).map_err(ExecInvariantViolation::from)?;
    let axis = normalize_axis(axis, x_fs.ndim())?;
    let n_s = x_fs.shape()[axis];
    map_lanes(x_fs, axis, n_s, |lane| kernel.run_alloc(lane))
}

/// Sample points for [`ffs`], in FFT order.
///
/// Odd `n_s` grids pass through `t_c` itself; even grids are offset by half
/// a bin so the samples stay centered on the period.
pub fn ffs_sample<F: Float>(
    t: F,
    n_fs: usize,
    t_c: F,
    n_s: usize,
) -> Result<Array1<F>, ExecInvariantViolation> {
    let kernel = FfsSampleKernel::try_new(FfsSampleConfig { t, n_fs, t_c, n_s })
        .map_err(ExecInvariantViolation::from)?;
    Ok(Array1::from(kernel.run_alloc()?))
}
