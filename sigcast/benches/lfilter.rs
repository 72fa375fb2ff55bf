use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::ThreadRng;
use sigcast::kernel::KernelLifecycle;
use sigcast::signal::filter::{lfilter, lfiltic, LFilterConfig, LFilterKernel};
use sigcast::signal::traits::LFilter1D;
use std::num::NonZeroUsize;

/// Sum of decaying sinusoids with random amplitudes, frequencies and phases.
fn randomized_signal(mut rng: ThreadRng, num_freqs: NonZeroUsize, len: NonZeroUsize) -> Vec<f64> {
    use rand::Rng;

    let nf: usize = num_freqs.into();
    let n: usize = len.into();
    let tones: Vec<(f64, f64, f64)> = (0..nf)
        .map(|i| {
            let ampl = rng.random_range(0.5..1.5) / 1.1f64.powi(i as i32);
            let freq = rng.random_range(0.01..0.45) * std::f64::consts::TAU;
            let phase = rng.random_range(0.0..std::f64::consts::PI);
            (ampl, freq, phase)
        })
        .collect();

    (0..n)
        .map(|t| {
            tones
                .iter()
                .map(|(a, f, p)| a * (f * t as f64 + p).sin())
                .sum()
        })
        .collect()
}

/// Fourth-order low-pass over a long signal, in one call and resumed in chunks.
fn lfilter_chunks(c: &mut Criterion) {
    let b: &[f64] = &[0.0048, 0.0193, 0.0289, 0.0193, 0.0048];
    let a: &[f64] = &[1.0, -2.3695, 2.3140, -1.0547, 0.1874];
    let signal = randomized_signal(
        rand::rng(),
        NonZeroUsize::new(14).unwrap(),
        NonZeroUsize::new(1 << 16).unwrap(),
    );

    c.bench_with_input(BenchmarkId::new("lfilter", "whole"), &signal, |bench, sig| {
        bench.iter(|| lfilter(black_box(b), black_box(a), black_box(sig.as_slice()), None))
    });

    let kernel = LFilterKernel::try_new(LFilterConfig {
        b: b.to_vec(),
        a: a.to_vec(),
    })
    .expect("filter coefficients should be valid");
    for chunk in [256usize, 4096] {
        c.bench_with_input(BenchmarkId::new("lfilter_kernel", chunk), &signal, |bench, sig| {
            bench.iter(|| {
                let mut state = vec![0.0; kernel.state_len()];
                for piece in sig.chunks(chunk) {
                    let (_, zf) = kernel
                        .run_alloc(black_box(piece), Some(state.as_slice()))
                        .expect("state length matches the kernel");
                    state = zf;
                }
                state
            })
        });
    }

    let history = &signal[..64];
    c.bench_function("lfiltic", |bench| {
        bench.iter(|| lfiltic(black_box(b), black_box(a), black_box(history), black_box(history)))
    });
}

criterion_group!(benches, lfilter_chunks);
criterion_main!(benches);
