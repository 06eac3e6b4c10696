use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ffs_rs::fourier::traits::{Czt1D, Ffs1D, FsInterp1D, Iffs1D};
use ffs_rs::fourier::{
    CztConfig, CztKernel, FfsConfig, FfsKernel, FsInterpConfig, FsInterpKernel, IffsConfig,
    IffsKernel,
};
use ffs_rs::kernel::KernelLifecycle;
use rand::Rng;
use rustfft::num_complex::Complex;

fn random_signal(len: usize) -> Vec<Complex<f64>> {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect()
}

fn ffs_round_trip_4096(c: &mut Criterion) {
    let x = random_signal(4096);
    let ffs = FfsKernel::try_new(FfsConfig {
        t: 1.0,
        t_c: 0.25,
        n_fs: 2047,
    })
    .expect("valid ffs config");
    let iffs = IffsKernel::try_new(IffsConfig {
        t: 1.0,
        t_c: 0.25,
        n_fs: 2047,
    })
    .expect("valid iffs config");

    c.bench_function("ffs_round_trip_4096", |b| {
        b.iter(|| {
            let x_fs = ffs.run_alloc(black_box(&x)).expect("ffs");
            let x_back = iffs.run_alloc(&x_fs).expect("iffs");
            black_box(x_back);
        })
    });
}

fn czt_1024_to_1024(c: &mut Criterion) {
    let x = random_signal(1024);
    let kernel = CztKernel::try_new(CztConfig {
        a: Complex::from_polar(1.0, 0.3),
        w: Complex::from_polar(1.0, -core::f64::consts::TAU / 1531.0),
        m: 1024,
    })
    .expect("valid czt config");

    c.bench_function("czt_1024_to_1024", |b| {
        b.iter(|| {
            let y = kernel.run_alloc(black_box(&x)).expect("czt");
            black_box(y);
        })
    });
}

fn fs_interp_paths_255_to_4096(c: &mut Criterion) {
    // Conjugate-symmetric coefficients so both paths compute the same signal.
    let n = 127i64;
    let coeffs: Vec<Complex<f64>> = (-n..=n)
        .map(|k| Complex::from_polar(1.0, -0.8 * k as f64))
        .collect();
    let kernel = FsInterpKernel::try_new(FsInterpConfig {
        t: 2.0,
        a: -0.5,
        b: 1.5,
        m: 4096,
    })
    .expect("valid interp config");

    c.bench_function("fs_interp_complex_255_to_4096", |b| {
        b.iter(|| {
            let y = kernel.run_alloc(black_box(&coeffs)).expect("interp");
            black_box(y);
        })
    });
    c.bench_function("fs_interp_real_255_to_4096", |b| {
        b.iter(|| {
            let y = kernel.run_real_alloc(black_box(&coeffs)).expect("interp");
            black_box(y);
        })
    });
}

criterion_group!(
    benches,
    ffs_round_trip_4096,
    czt_1024_to_1024,
    fs_interp_paths_255_to_4096
);
criterion_main!(benches);
