//! Contract checks for the transform kernels.
//!
//! `cargo run -p xtask -- contracts` exercises every kernel against its
//! free-function baseline and the mathematical laws the crate documents
//! (round trip, DFT equivalence, Dirichlet interpolation accuracy), then
//! writes a CSV artifact under `target/contracts/`.

use std::f64::consts::{E, PI, TAU};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ffs_rs::fourier::traits::{Czt1D, Ffs1D, FsInterp1D, Iffs1D};
use ffs_rs::fourier::{
    czt, ffs, ffs_sample, fs_interp, fs_interp_real, iffs, CztConfig, CztKernel, FfsConfig,
    FfsKernel, FsInterpConfig, FsInterpKernel, IffsConfig, IffsKernel,
};
use ffs_rs::kernel::KernelLifecycle;
use ndarray::Array1;
use rand::Rng;
use rustfft::num_complex::Complex;

struct Case {
    name: &'static str,
    max_abs_err: f64,
    tol: f64,
}

impl Case {
    fn pass(&self) -> bool {
        self.max_abs_err.is_finite() && self.max_abs_err <= self.tol
    }
}

fn main() -> Result<()> {
    match std::env::args().nth(1).as_deref() {
        Some("contracts") => contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn random_signal(len: usize) -> Vec<Complex<f64>> {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect()
}

fn max_err(a: &[Complex<f64>], b: &[Complex<f64>]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

fn max_err_real(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn naive_dft(x: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
    let n = x.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    (0..n)
        .map(|k| {
            x.iter()
                .enumerate()
                .map(|(i, &xi)| xi * Complex::from_polar(1.0, sign * TAU * (k * i) as f64 / n as f64))
                .sum()
        })
        .collect()
}

fn dirichlet(points: &[f64], t: f64, t_c: f64, n_fs: usize) -> Vec<f64> {
    points
        .iter()
        .map(|&p| {
            let y = p - t_c;
            let den = (PI * y / t).sin();
            if den.abs() < 1e-12 {
                n_fs as f64 * (n_fs as f64 * PI * y / t).cos() / (PI * y / t).cos()
            } else {
                (n_fs as f64 * PI * y / t).sin() / den
            }
        })
        .collect()
}

fn dirichlet_fs(t: f64, t_c: f64, n_fs: usize) -> Vec<Complex<f64>> {
    let n = ((n_fs - 1) / 2) as i64;
    (-n..=n)
        .map(|k| Complex::from_polar(1.0, -TAU / t * t_c * k as f64))
        .collect()
}

fn round_trip_case(name: &'static str, n_s: usize) -> Result<Case> {
    let x = Array1::from(random_signal(n_s));
    let (t, t_c, n_fs) = (1.5, 0.4, 7);
    let x_fs = ffs(&x, t, t_c, n_fs, None).context("ffs baseline")?;
    let x_back = iffs(&x_fs, t, t_c, n_fs, None).context("iffs baseline")?;
    Ok(Case {
        name,
        max_abs_err: max_err(
            x.as_slice().context("contiguous input")?,
            x_back.as_slice().context("contiguous output")?,
        ),
        tol: 1e-9,
    })
}

fn ffs_dirichlet_case(name: &'static str, n_s: usize) -> Result<Case> {
    let (t, t_c, n_fs) = (PI, E, 15);
    let points = ffs_sample(t, n_fs, t_c, n_s).context("sample grid")?;
    let samples: Array1<Complex<f64>> =
        Array1::from_iter(dirichlet(points.as_slice().context("grid")?, t, t_c, n_fs)
            .into_iter()
            .map(|v| Complex::new(v, 0.0)));
    let x_fs = ffs(&samples, t, t_c, n_fs, None).context("ffs")?;
    let expected = dirichlet_fs(t, t_c, n_fs);
    Ok(Case {
        name,
        max_abs_err: max_err(&x_fs.as_slice().context("coeffs")?[..n_fs], &expected),
        tol: 1e-9,
    })
}

fn czt_dft_case(name: &'static str, inverse: bool) -> Result<Case> {
    let n = 12usize;
    let x = Array1::from(random_signal(n));
    let sign = if inverse { 1.0 } else { -1.0 };
    let w = Complex::from_polar(1.0, sign * TAU / n as f64);
    let got = czt(&x, Complex::new(1.0, 0.0), w, n, None).context("czt")?;
    let want = naive_dft(x.as_slice().context("input")?, inverse);
    Ok(Case {
        name,
        max_abs_err: max_err(got.as_slice().context("output")?, &want),
        tol: 1e-9,
    })
}

fn fs_interp_cases() -> Result<Vec<Case>> {
    let (t, t_c, n_fs) = (PI, E, 15);
    let (a, b) = (t_c - t / 2.0, t_c + t / 2.0);
    let m = 100usize;
    let coeffs = Array1::from(dirichlet_fs(t, t_c, n_fs));
    let grid: Vec<f64> = (0..m)
        .map(|k| a + (b - a) / (m - 1) as f64 * k as f64)
        .collect();
    let expected = dirichlet(&grid, t, t_c, n_fs);

    let complex = fs_interp(&coeffs, t, a, b, m, None).context("complex path")?;
    let complex_err = complex
        .iter()
        .zip(&expected)
        .map(|(g, w)| (g - Complex::new(*w, 0.0)).norm())
        .fold(0.0, f64::max);

    let real = fs_interp_real(&coeffs, t, a, b, m, None).context("real path")?;
    let real_err = max_err_real(real.as_slice().context("real output")?, &expected);

    Ok(vec![
        Case {
            name: "fs_interp_dirichlet_complex",
            max_abs_err: complex_err,
            tol: 1e-9,
        },
        Case {
            name: "fs_interp_dirichlet_real",
            max_abs_err: real_err,
            tol: 1e-9,
        },
    ])
}

/// Kernel entrypoints and the array-level free functions must agree exactly.
fn kernel_parity_cases() -> Result<Vec<Case>> {
    let mut cases = Vec::new();
    let x = Array1::from(random_signal(16));
    let (t, t_c, n_fs) = (2.0, -0.3, 9);

    let ffs_kernel = FfsKernel::try_new(FfsConfig { t, t_c, n_fs })?;
    let from_kernel = ffs_kernel.run_alloc(x.as_slice().context("input")?)?;
    let from_fn = ffs(&x, t, t_c, n_fs, None)?;
    cases.push(Case {
        name: "ffs_kernel_vs_free_fn",
        max_abs_err: max_err(&from_kernel, from_fn.as_slice().context("output")?),
        tol: 0.0,
    });

    let iffs_kernel = IffsKernel::try_new(IffsConfig { t, t_c, n_fs })?;
    let from_kernel = iffs_kernel.run_alloc(x.as_slice().context("input")?)?;
    let from_fn = iffs(&x, t, t_c, n_fs, None)?;
    cases.push(Case {
        name: "iffs_kernel_vs_free_fn",
        max_abs_err: max_err(&from_kernel, from_fn.as_slice().context("output")?),
        tol: 0.0,
    });

    let a = Complex::from_polar(1.0, 0.4);
    let w = Complex::from_polar(1.0, -TAU / 23.0);
    let czt_kernel = CztKernel::try_new(CztConfig { a, w, m: 20 })?;
    let from_kernel = czt_kernel.run_alloc(x.as_slice().context("input")?)?;
    let from_fn = czt(&x, a, w, 20, None)?;
    cases.push(Case {
        name: "czt_kernel_vs_free_fn",
        max_abs_err: max_err(&from_kernel, from_fn.as_slice().context("output")?),
        tol: 0.0,
    });

    let coeffs = Array1::from(dirichlet_fs(PI, E, 15));
    let interp_kernel = FsInterpKernel::try_new(FsInterpConfig {
        t: PI,
        a: 1.0,
        b: 4.0,
        m: 64,
    })?;
    let from_kernel = interp_kernel.run_alloc(coeffs.as_slice().context("coeffs")?)?;
    let from_fn = fs_interp(&coeffs, PI, 1.0, 4.0, 64, None)?;
    cases.push(Case {
        name: "fs_interp_kernel_vs_free_fn",
        max_abs_err: max_err(&from_kernel, from_fn.as_slice().context("output")?),
        tol: 0.0,
    });

    Ok(cases)
}

fn contracts() -> Result<()> {
    let mut cases = vec![
        round_trip_case("ffs_iffs_round_trip_even", 16)?,
        round_trip_case("ffs_iffs_round_trip_odd", 17)?,
        ffs_dirichlet_case("ffs_dirichlet_even", 16)?,
        ffs_dirichlet_case("ffs_dirichlet_odd", 17)?,
        czt_dft_case("czt_dft_equivalence", false)?,
        czt_dft_case("czt_idft_equivalence", true)?,
    ];
    cases.extend(fs_interp_cases()?);
    cases.extend(kernel_parity_cases()?);

    let mut csv = String::from("case,max_abs_err,tol,pass\n");
    let mut failures = 0usize;
    for case in &cases {
        let pass = case.pass();
        if !pass {
            failures += 1;
        }
        println!(
            "{:36} max_abs_err={:<12.3e} tol={:<9.0e} {}",
            case.name,
            case.max_abs_err,
            case.tol,
            if pass { "ok" } else { "FAIL" }
        );
        writeln!(
            csv,
            "{},{:e},{:e},{}",
            case.name, case.max_abs_err, case.tol, pass
        )?;
    }

    let out_dir = PathBuf::from("target/contracts");
    fs::create_dir_all(&out_dir).context("create contracts dir")?;
    let summary = out_dir.join("summary.csv");
    fs::write(&summary, csv).context("write summary")?;
    println!("Contract artifacts generated in: {}", out_dir.display());
    println!("  - {}", summary.display());
    println!("  - cases: {}", cases.len());

    if failures > 0 {
        bail!("{failures} contract case(s) failed");
    }
    Ok(())
}
