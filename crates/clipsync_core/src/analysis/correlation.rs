//! FFT-based cross-correlation and lag estimation.
//!
//! Uses the correlation theorem: `corr(a, b) = IFFT(FFT(a) * conj(FFT(b)))`,
//! with both signals zero-padded to a 2-3-5 smooth length that holds the
//! full `2N - 1` output, so the circular result never wraps onto itself.
//!
//! Both real inputs share one complex transform (`a + i*b`) and the product
//! is written back into that buffer, so a correlation holds a single
//! complex buffer of the FFT length plus the planner's scratch.
//!
//! The correlation is not normalized and no window is applied. The lag
//! estimate therefore depends on the relative loudness of the two inputs.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::analysis::types::{Lag, Waveform};

/// Smallest `2^a * 3^b * 5^c` that is `>= target`.
fn fft_size(target: usize) -> usize {
    let mut best = target.next_power_of_two();
    let mut p5 = 1usize;
    while p5 < best {
        let mut p35 = p5;
        while p35 < best {
            let mut len = p35;
            while len < target {
                len *= 2;
            }
            best = best.min(len);
            p35 *= 3;
        }
        p5 *= 5;
    }
    best
}

/// Unscaled circular correlation of two equal-length signals.
///
/// Index `m` holds lag `m` for `m < N` and lag `m - len` for
/// `m >= len - (N - 1)`.
fn circular_correlation(reference: &[f64], probe: &[f64]) -> Vec<Complex<f64>> {
    assert_eq!(
        reference.len(),
        probe.len(),
        "correlation requires equal-length inputs"
    );
    assert!(!reference.is_empty(), "correlation requires non-empty inputs");

    let n = reference.len();
    let len = fft_size(2 * n - 1);

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(len);
    let ifft = planner.plan_fft_inverse(len);
    let mut scratch = vec![
        Complex::new(0.0, 0.0);
        fft.get_inplace_scratch_len().max(ifft.get_inplace_scratch_len())
    ];

    let mut buf: Vec<Complex<f64>> = reference
        .iter()
        .zip(probe)
        .map(|(&a, &b)| Complex::new(a, b))
        .collect();
    buf.resize(len, Complex::new(0.0, 0.0));

    fft.process_with_scratch(&mut buf, &mut scratch);

    // Split Z = FFT(a + ib) into A and B via the conjugate-symmetric pair
    // (k, len - k), then store A * conj(B) at both positions.
    let half = Complex::new(0.5, 0.0);
    let minus_half_i = Complex::new(0.0, -0.5);
    for k in 0..=len / 2 {
        let m = (len - k) % len;
        let (zk, zm) = (buf[k], buf[m]);

        let a_k = (zk + zm.conj()) * half;
        let b_k = (zk - zm.conj()) * minus_half_i;
        let a_m = (zm + zk.conj()) * half;
        let b_m = (zm - zk.conj()) * minus_half_i;

        buf[k] = a_k * b_k.conj();
        buf[m] = a_m * b_m.conj();
    }

    ifft.process_with_scratch(&mut buf, &mut scratch);
    buf
}

/// Full cross-correlation of two equal-length signals.
///
/// Returns `2N - 1` values. Element `k` holds
/// `sum_l reference[l] * probe[l - (k - N + 1)]`, i.e. index `N - 1` is
/// zero lag, lower indices are negative lags, higher indices positive lags.
///
/// # Panics
/// If the inputs differ in length or are empty.
pub fn cross_correlate(reference: &[f64], probe: &[f64]) -> Vec<f64> {
    let n = reference.len();
    let circular = circular_correlation(reference, probe);
    let scale = 1.0 / circular.len() as f64;
    ascending_lags(&circular, n).map(|v| v * scale).collect()
}

/// Real parts of a circular correlation in ascending lag order,
/// `-(N - 1) ..= N - 1`.
fn ascending_lags(circular: &[Complex<f64>], n: usize) -> impl Iterator<Item = f64> + '_ {
    let negative = &circular[circular.len() - (n - 1)..];
    negative.iter().chain(&circular[..n]).map(|c| c.re)
}

/// Position of the largest value.
///
/// Only a strictly larger value replaces the current best, so among equal
/// peaks the first one wins.
fn first_peak(values: impl Iterator<Item = f64>) -> usize {
    let mut best_idx = 0usize;
    let mut best_val = f64::NEG_INFINITY;
    for (i, v) in values.enumerate() {
        if v > best_val {
            best_idx = i;
            best_val = v;
        }
    }
    best_idx
}

/// Lag of the strongest value in a circular correlation of `n`-sample
/// signals. Equal peaks resolve to the most negative lag.
fn circular_peak_lag(circular: &[Complex<f64>], n: usize) -> Lag {
    Lag(first_peak(ascending_lags(circular, n)) as i64 - (n as i64 - 1))
}

/// Estimate the lag between two length-equalized waveforms.
///
/// `argmax(cross_correlate(reference, probe)) - N + 1`, read straight from
/// the circular buffer. A positive result means the reference's content
/// appears that many samples later than the probe's.
///
/// # Panics
/// If the waveforms differ in length or sample rate, or are empty.
pub fn find_offset(reference: &Waveform, probe: &Waveform) -> Lag {
    assert_eq!(
        reference.sample_rate, probe.sample_rate,
        "find_offset requires a common sample rate"
    );

    let circular = circular_correlation(&reference.samples, &probe.samples);
    let lag = circular_peak_lag(&circular, reference.len());

    tracing::debug!(
        "Correlated {} samples per signal over {} FFT bins, peak at lag {} ({:.3}s)",
        reference.len(),
        circular.len(),
        lag,
        lag.samples() as f64 / reference.sample_rate as f64
    );

    lag
}
