//! Axis and shape utilities shared by the transform front-ends.
//!
//! The free functions in this module treat an n-dimensional array as a
//! collection of independent 1-D lanes along one axis, so the transform
//! kernels themselves never see more than a contiguous slice.

use alloc::vec::Vec;

use ndarray::{Array, ArrayBase, Axis, Data, Dimension};
use num_traits::{Float, Zero};
use rustfft::num_complex::Complex;

use crate::kernel::ExecInvariantViolation;

/// Resolve an optional, possibly negative axis index against an array rank.
///
/// `None` selects the last axis. Valid inputs satisfy `-ndim <= axis < ndim`.
pub(crate) fn normalize_axis(
    axis: Option<isize>,
    ndim: usize,
) -> Result<usize, ExecInvariantViolation> {
    let requested = axis.unwrap_or(-1);
    let resolved = if requested < 0 {
        ndim.checked_sub(requested.unsigned_abs())
    } else if requested.unsigned_abs() < ndim {
        Some(requested.unsigned_abs())
    } else {
        None
    };
    resolved.ok_or(ExecInvariantViolation::AxisOutOfBounds {
        axis: requested,
        ndim,
    })
}

/// Apply a 1-D lane transform along `axis`, resizing that axis to `out_len`.
///
/// Lanes are copied into a contiguous scratch buffer before each call, so
/// `f` always receives a plain slice regardless of the input's memory
/// layout. Batch axes are preserved in shape and iteration order.
pub(crate) fn map_lanes<T, U, S, D, F>(
    x: &ArrayBase<S, D>,
    axis: usize,
    out_len: usize,
    mut f: F,
) -> Result<Array<U, D>, ExecInvariantViolation>
where
    T: Copy,
    U: Clone + Zero,
    S: Data<Elem = T>,
    D: Dimension,
    F: FnMut(&[T]) -> Result<Vec<U>, ExecInvariantViolation>,
{
    debug_assert!(axis < x.ndim());

    let mut dim = x.raw_dim();
    dim.slice_mut()[axis] = out_len;
    let mut out = Array::from_elem(dim, U::zero());

    let mut lane_buf: Vec<T> = Vec::with_capacity(x.shape()[axis]);
    for (lane_in, mut lane_out) in x
        .lanes(Axis(axis))
        .into_iter()
        .zip(out.lanes_mut(Axis(axis)))
    {
        lane_buf.clear();
        lane_buf.extend(lane_in.iter().copied());
        let y = f(&lane_buf)?;
        debug_assert_eq!(y.len(), out_len);
        for (dst, src) in lane_out.iter_mut().zip(y) {
            *dst = src;
        }
    }
    Ok(out)
}

/// Smallest 5-smooth integer `>= target`.
///
/// 5-smooth lengths keep the FFT engine on its radix-2/3/5 fast paths,
/// which matters for the Bluestein convolution length.
pub(crate) fn next_fast_len(target: usize) -> usize {
    let target = target.max(1);
    let mut n = target;
    loop {
        let mut m = n;
        for p in [2usize, 3, 5] {
            while m % p == 0 {
                m /= p;
            }
        }
        if m == 1 {
            return n;
        }
        n += 1;
    }
}

/// Unit-modulus complex factor `exp(j * phase)`.
///
/// The phase is accumulated in `f64` before the final cast: quadratic chirp
/// exponents overflow `f32` significance long before they overflow range.
pub(crate) fn unit_phasor<F: Float>(phase: f64) -> Complex<F> {
    let (im, re) = phase.sin_cos();
    Complex::new(
        F::from(re).unwrap_or_else(F::nan),
        F::from(im).unwrap_or_else(F::nan),
    )
}

/// Lossless widening of the scalar parameter types to `f64` phase math.
pub(crate) fn as_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::{map_lanes, next_fast_len, normalize_axis, unit_phasor};
    use crate::kernel::ExecInvariantViolation;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rustfft::num_complex::Complex;

    #[test]
    fn normalize_axis_handles_default_and_negative_indices() {
        assert_eq!(normalize_axis(None, 3).unwrap(), 2);
        assert_eq!(normalize_axis(Some(0), 3).unwrap(), 0);
        assert_eq!(normalize_axis(Some(-3), 3).unwrap(), 0);
        assert_eq!(normalize_axis(Some(-1), 1).unwrap(), 0);
    }

    #[test]
    fn normalize_axis_rejects_out_of_range() {
        assert!(matches!(
            normalize_axis(Some(2), 2),
            Err(ExecInvariantViolation::AxisOutOfBounds { axis: 2, ndim: 2 })
        ));
        assert!(matches!(
            normalize_axis(Some(-3), 2),
            Err(ExecInvariantViolation::AxisOutOfBounds { axis: -3, ndim: 2 })
        ));
        assert!(normalize_axis(None, 0).is_err());
    }

    #[test]
    fn next_fast_len_returns_five_smooth_lengths() {
        assert_eq!(next_fast_len(1), 1);
        assert_eq!(next_fast_len(6), 6);
        assert_eq!(next_fast_len(7), 8);
        assert_eq!(next_fast_len(11), 12);
        assert_eq!(next_fast_len(97), 100);
        assert_eq!(next_fast_len(540), 540);
    }

    #[test]
    fn map_lanes_resizes_the_target_axis_only() {
        let x = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let doubled_heads = map_lanes(&x, 1, 2, |lane| Ok(vec![lane[0] * 2.0, lane[1] * 2.0]))
            .expect("lane map should succeed");
        assert_eq!(doubled_heads, array![[2.0, 4.0], [8.0, 10.0]]);
    }

    #[test]
    fn map_lanes_propagates_lane_errors() {
        let x = array![[1.0f64, 2.0], [3.0, 4.0]];
        let err = map_lanes(&x, 0, 1, |_lane| {
            Err::<Vec<f64>, _>(ExecInvariantViolation::InvalidState {
                reason: "lane rejected",
            })
        })
        .expect_err("lane errors should propagate");
        assert!(matches!(err, ExecInvariantViolation::InvalidState { .. }));
    }

    #[test]
    fn unit_phasor_lies_on_the_unit_circle() {
        let z: Complex<f64> = unit_phasor(1.25);
        assert_abs_diff_eq!(z.norm(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(z.arg(), 1.25, epsilon = 1e-15);

        let w: Complex<f32> = unit_phasor(-0.5);
        assert_abs_diff_eq!(w.norm(), 1.0f32, epsilon = 1e-6);
    }
}
