//! Chirp Z-Transform on a unit-modulus spiral contour.
//!
//! Evaluates `X[m] = Σ_n x[n]·A⁻ⁿ·Wⁿᵐ` for `m = 0..M-1` with Bluestein's
//! identity `n·m = (n² + m² − (m−n)²) / 2`, which turns the transform into
//! a linear convolution computable with three FFTs at an FFT-friendly
//! padded length.
//!
//! Contours off the unit circle are mathematically well-defined but blow up
//! numerically under this factorization, so `|A| = |W| = 1` is enforced up
//! front rather than producing silently unreliable output.

use alloc::vec::Vec;

use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::{Float, Zero};
use rustfft::num_complex::Complex;
use rustfft::{FftNum, FftPlanner};

use crate::fourier::arraytools::{as_f64, map_lanes, next_fast_len, normalize_axis, unit_phasor};
use crate::fourier::traits::Czt1D;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};

fn has_unit_modulus<F: Float>(z: Complex<F>) -> bool {
    // NaN norms fail the comparison, rejecting non-finite contours too.
    (z.norm() - F::one()).abs() <= F::epsilon().sqrt()
}

fn czt_impl<F: Float + FftNum>(x: &[Complex<F>], a: Complex<F>, w: Complex<F>, m: usize) -> Vec<Complex<F>> {
    let n = x.len();
    let alpha = as_f64(a.arg());
    let omega = as_f64(w.arg());

    let l = next_fast_len(n + m - 1);
    let mut planner = FftPlanner::<F>::new();
    let fft = planner.plan_fft_forward(l);
    let ifft = planner.plan_fft_inverse(l);
    let scratch_len = fft
        .get_inplace_scratch_len()
        .max(ifft.get_inplace_scratch_len());
    let mut scratch = vec![Complex::zero(); scratch_len];

    // Pre-chirped input, zero-padded to the convolution length.
    let mut y = vec![Complex::zero(); l];
    for (i, (slot, &xi)) in y.iter_mut().zip(x).enumerate() {
        let k = i as f64;
        *slot = xi * unit_phasor::<F>(omega * k * k / 2.0 - alpha * k);
    }
    fft.process_with_scratch(&mut y, &mut scratch);

    // Chirp kernel with its negative lags wrapped around the tail.
    let mut v = vec![Complex::zero(); l];
    for (i, slot) in v.iter_mut().enumerate().take(m) {
        let k = i as f64;
        *slot = unit_phasor(-omega * k * k / 2.0);
    }
    for (i, slot) in v.iter_mut().enumerate().skip(l - n + 1) {
        let k = (l - i) as f64;
        *slot = unit_phasor(-omega * k * k / 2.0);
    }
    fft.process_with_scratch(&mut v, &mut scratch);

    for (yi, &vi) in y.iter_mut().zip(&v) {
        *yi = *yi * vi;
    }
    ifft.process_with_scratch(&mut y, &mut scratch);

    // Undo the pre-chirp on the first M lags; 1/L normalizes the inverse.
    let scale = F::from(1.0 / l as f64).unwrap_or_else(F::nan);
    y.iter()
        .take(m)
        .enumerate()
        .map(|(i, &g)| {
            let k = i as f64;
            (g * unit_phasor::<F>(omega * k * k / 2.0)).scale(scale)
        })
        .collect()
}

/// Constructor config for [`CztKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CztConfig<F> {
    /// Contour start point; must have unit modulus.
    pub a: Complex<F>,
    /// Contour step ratio; must have unit modulus.
    pub w: Complex<F>,
    /// Number of transform points.
    pub m: usize,
}

/// Trait-first 1D chirp z-transform kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CztKernel<F> {
    a: Complex<F>,
    w: Complex<F>,
    m: usize,
}

impl<F> CztKernel<F> {
    /// Return the configured number of output points.
    pub fn output_len(&self) -> usize {
        self.m
    }
}

impl<F: Float> KernelLifecycle for CztKernel<F> {
    type Config = CztConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !has_unit_modulus(config.a) {
            return Err(ConfigError::InvalidArgument {
                arg: "a",
                reason: "contour start must lie on the unit circle for numerical stability",
            });
        }
        if !has_unit_modulus(config.w) {
            return Err(ConfigError::InvalidArgument {
                arg: "w",
                reason: "contour ratio must lie on the unit circle for numerical stability",
            });
        }
        if config.m == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "m",
                reason: "transform length must be positive",
            });
        }
        Ok(Self {
            a: config.a,
            w: config.w,
            m: config.m,
        })
    }
}

impl<F> Czt1D<F> for CztKernel<F>
where
    F: Float + FftNum,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if input.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "transform input must be non-empty",
            });
        }
        let out_slice = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out_slice.len() != self.m {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.m,
                got: out_slice.len(),
            });
        }
        let y = czt_impl(input, self.a, self.w, self.m);
        out_slice.copy_from_slice(&y);
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if input.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "transform input must be non-empty",
            });
        }
        Ok(czt_impl(input, self.a, self.w, self.m))
    }
}

/// Chirp z-transform along `axis`, resizing that axis to `m` points.
///
/// With `a = 1`, `w = exp(-j2π/N)`, and `m = N` this reduces to the
/// forward DFT:
///
/// ```
/// use ffs_rs::fourier::czt;
/// use ndarray::Array1;
/// use rustfft::num_complex::Complex;
///
/// let x = Array1::from(vec![
///     Complex::new(1.0f64, 0.0),
///     Complex::new(2.0, 0.0),
///     Complex::new(3.0, 0.0),
///     Complex::new(4.0, 0.0),
/// ]);
/// let w = Complex::from_polar(1.0, -core::f64::consts::TAU / 4.0);
/// let spectrum = czt(&x, Complex::new(1.0, 0.0), w, 4, None).unwrap();
///
/// // DFT of [1, 2, 3, 4] is [10, -2+2j, -2, -2-2j].
/// assert!((spectrum[0] - Complex::new(10.0, 0.0)).norm() < 1e-9);
/// assert!((spectrum[1] - Complex::new(-2.0, 2.0)).norm() < 1e-9);
/// assert!((spectrum[2] - Complex::new(-2.0, 0.0)).norm() < 1e-9);
/// assert!((spectrum[3] - Complex::new(-2.0, -2.0)).norm() < 1e-9);
/// ```
pub fn czt<F, S, D>(
    x: &ArrayBase<S, D>,
    a: Complex<F>,
    w: Complex<F>,
    m: usize,
    axis: Option<isize>,
) -> Result<Array<Complex<F>, D>, ExecInvariantViolation>
where
    F: Float + FftNum,
    S: Data<Elem = Complex<F>>,
    D: Dimension,
{
    let kernel = CztKernel::try_new(CztConfig { a, w, m }).map_err(ExecInvariantViolation::from)?;
    let axis = normalize_axis(axis, x.ndim())?;
    map_lanes(x, axis, m, |lane| kernel.run_alloc(lane))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f64::consts::TAU;
    use ndarray::Array2;
    use rand::Rng;

    fn random_signal(len: usize) -> Vec<Complex<f64>> {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
            .collect()
    }

    fn naive_dft(x: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
        let n = x.len();
        let sign = if inverse { 1.0 } else { -1.0 };
        (0..n)
            .map(|k| {
                x.iter()
                    .enumerate()
                    .map(|(i, &xi)| {
                        xi * Complex::from_polar(1.0, sign * TAU * (k * i) as f64 / n as f64)
                    })
                    .sum()
            })
            .collect()
    }

    /// Direct O(N·M) evaluation of the contour sum.
    fn naive_czt(
        x: &[Complex<f64>],
        alpha: f64,
        omega: f64,
        m: usize,
    ) -> Vec<Complex<f64>> {
        (0..m)
            .map(|k| {
                x.iter()
                    .enumerate()
                    .map(|(i, &xi)| {
                        xi * Complex::from_polar(1.0, -(i as f64) * alpha)
                            * Complex::from_polar(1.0, (i * k) as f64 * omega)
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn czt_reduces_to_the_dft() {
        let n = 10;
        let x = random_signal(n);
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::new(1.0, 0.0),
            w: Complex::from_polar(1.0, -TAU / n as f64),
            m: n,
        })
        .expect("config");

        let got = kernel.run_alloc(&x).expect("czt");
        let want = naive_dft(&x, false);
        for (g, w) in got.iter().zip(&want) {
            assert_abs_diff_eq!(g.re, w.re, epsilon = 1e-9);
            assert_abs_diff_eq!(g.im, w.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn czt_reduces_to_the_inverse_dft_up_to_scaling() {
        let n = 10;
        let x = random_signal(n);
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::new(1.0, 0.0),
            w: Complex::from_polar(1.0, TAU / n as f64),
            m: n,
        })
        .expect("config");

        let got = kernel.run_alloc(&x).expect("czt");
        let want = naive_dft(&x, true);
        // czt leaves out the 1/N scaling of the inverse DFT.
        for (g, w) in got.iter().zip(&want) {
            assert_abs_diff_eq!(g.re / n as f64, w.re / n as f64, epsilon = 1e-9);
            assert_abs_diff_eq!(g.im / n as f64, w.im / n as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn czt_matches_direct_evaluation_on_a_general_contour() {
        // Prime input length, M != N, arbitrary unit-modulus A and W.
        let x = random_signal(7);
        let (alpha, omega) = (0.3, TAU / 50.0);
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::from_polar(1.0, alpha),
            w: Complex::from_polar(1.0, omega),
            m: 13,
        })
        .expect("config");

        let got = kernel.run_alloc(&x).expect("czt");
        let want = naive_czt(&x, alpha, omega, 13);
        assert_eq!(got.len(), 13);
        for (g, w) in got.iter().zip(&want) {
            assert_abs_diff_eq!(g.re, w.re, epsilon = 1e-9);
            assert_abs_diff_eq!(g.im, w.im, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_sample_input_broadcasts_over_the_contour() {
        let x = vec![Complex::new(0.5f64, -0.25)];
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::from_polar(1.0, 0.7),
            w: Complex::from_polar(1.0, -0.2),
            m: 4,
        })
        .expect("config");
        let got = kernel.run_alloc(&x).expect("czt");
        // N = 1: every output point equals x[0]·A⁰·W⁰ = x[0].
        for g in &got {
            assert_abs_diff_eq!(g.re, 0.5, epsilon = 1e-12);
            assert_abs_diff_eq!(g.im, -0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn off_circle_contours_are_rejected() {
        let err = CztKernel::try_new(CztConfig {
            a: Complex::new(2.0f64, 0.0),
            w: Complex::from_polar(1.0, 0.1),
            m: 4,
        })
        .expect_err("|a| = 2 must be rejected");
        assert!(matches!(err, ConfigError::InvalidArgument { arg: "a", .. }));

        assert!(CztKernel::try_new(CztConfig {
            a: Complex::new(1.0f64, 0.0),
            w: Complex::new(0.5, 0.5),
            m: 4,
        })
        .is_err());

        assert!(CztKernel::try_new(CztConfig {
            a: Complex::new(f64::NAN, 0.0),
            w: Complex::new(1.0, 0.0),
            m: 4,
        })
        .is_err());
    }

    #[test]
    fn zero_length_transform_is_rejected() {
        let err = CztKernel::try_new(CztConfig {
            a: Complex::new(1.0f64, 0.0),
            w: Complex::new(1.0, 0.0),
            m: 0,
        })
        .expect_err("m = 0 must be rejected");
        assert!(matches!(err, ConfigError::InvalidArgument { arg: "m", .. }));
    }

    #[test]
    fn empty_lane_is_rejected_at_run_time() {
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::new(1.0f64, 0.0),
            w: Complex::new(1.0, 0.0),
            m: 3,
        })
        .expect("config");
        let x: Vec<Complex<f64>> = Vec::new();
        assert!(kernel.run_alloc(&x).is_err());
    }

    #[test]
    fn batch_transform_resizes_the_axis_and_matches_lanes() {
        let mut rng = rand::rng();
        let x = Array2::from_shape_fn((4, 3), |_| {
            Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
        });
        let a = Complex::new(1.0, 0.0);
        let w = Complex::from_polar(1.0, -TAU / 6.0);

        let full = czt(&x, a, w, 6, Some(0)).expect("batched czt");
        assert_eq!(full.dim(), (6, 3));

        let kernel = CztKernel::try_new(CztConfig { a, w, m: 6 }).expect("config");
        for j in 0..3 {
            let lane: Vec<Complex<f64>> = x.column(j).iter().copied().collect();
            let want = kernel.run_alloc(&lane).expect("lane czt");
            for (k, w_k) in want.iter().enumerate() {
                let got = full[[k, j]];
                assert_abs_diff_eq!(got.re, w_k.re, epsilon = 1e-12);
                assert_abs_diff_eq!(got.im, w_k.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn run_into_validates_output_length() {
        let kernel = CztKernel::try_new(CztConfig {
            a: Complex::new(1.0f64, 0.0),
            w: Complex::new(1.0, 0.0),
            m: 5,
        })
        .expect("config");
        let x = random_signal(4);
        let mut out = vec![Complex::new(0.0, 0.0); 4];
        let err = kernel
            .run_into(&x, &mut out)
            .expect_err("mismatched output length should error");
        assert!(matches!(err, ExecInvariantViolation::LengthMismatch { .. }));
    }
}
