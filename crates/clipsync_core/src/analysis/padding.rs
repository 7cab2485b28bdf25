//! Length equalization ahead of correlation.

use crate::analysis::types::Waveform;

/// Zero-pad the shorter waveform at its trailing end so both have the
/// longer one's length. Equal-length inputs come back unchanged.
///
/// Both waveforms must share a sample rate.
pub fn equalize_lengths(a: Waveform, b: Waveform) -> (Waveform, Waveform) {
    assert_eq!(
        a.sample_rate, b.sample_rate,
        "waveforms must share a sample rate before padding"
    );

    let target = a.len().max(b.len());
    (pad_to(a, target), pad_to(b, target))
}

fn pad_to(mut wf: Waveform, len: usize) -> Waveform {
    if wf.samples.len() < len {
        wf.samples.resize(len, 0.0);
    }
    wf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_shorter_second_with_trailing_zeros() {
        let a = Waveform::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], 100);
        let b = Waveform::new(vec![0.5, -0.5], 100);

        let (a, b) = equalize_lengths(a, b);

        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 5);
        assert_eq!(a.samples, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(&b.samples[..2], &[0.5, -0.5]);
        assert!(b.samples[2..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn pads_shorter_first_with_trailing_zeros() {
        let a = Waveform::new(vec![0.25; 3], 100);
        let b = Waveform::new(vec![1.0; 7], 100);

        let (a, b) = equalize_lengths(a, b);

        assert_eq!(a.len(), 7);
        assert_eq!(b.len(), 7);
        assert_eq!(&a.samples[..3], &[0.25; 3]);
        assert_eq!(&a.samples[3..], &[0.0; 4]);
    }

    #[test]
    fn equal_lengths_untouched() {
        let a = Waveform::new(vec![1.0, 2.0], 100);
        let b = Waveform::new(vec![3.0, 4.0], 100);

        let (pa, pb) = equalize_lengths(a.clone(), b.clone());

        assert_eq!(pa, a);
        assert_eq!(pb, b);
    }

    #[test]
    #[should_panic(expected = "sample rate")]
    fn rate_mismatch_is_contract_violation() {
        let _ = equalize_lengths(
            Waveform::new(vec![0.0], 44100),
            Waveform::new(vec![0.0], 48000),
        );
    }
}
