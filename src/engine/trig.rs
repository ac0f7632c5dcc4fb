//! Discrete cosine and sine transforms through symmetric extension.
//!
//! Every kind is the real or imaginary part of a complex DFT over an even or
//! odd extension of the input; only the extension length and the read-out
//! positions differ.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::complex::ComplexKernel;
use crate::R2rKind;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::NumAssign;

/// Length of the complex transform that realises `kind` at size `n`.
pub fn extended_len(kind: R2rKind, n: usize) -> usize {
    match kind {
        R2rKind::Dct1 => 2 * (n - 1),
        R2rKind::Dst1 => 2 * (n + 1),
        R2rKind::Dct2 | R2rKind::Dct3 | R2rKind::Dst2 | R2rKind::Dst3 => 4 * n,
        R2rKind::Dct4 | R2rKind::Dst4 => 8 * n,
    }
}

#[derive(Debug)]
pub struct TrigKernel<T> {
    kind: R2rKind,
    len: usize,
    fft: ComplexKernel<T>,
}

impl<T: Float + FloatConst + NumAssign> TrigKernel<T> {
    /// `n` must be at least 2 for `Dct1` and at least 1 otherwise.
    pub fn new(kind: R2rKind, len: usize, complex: impl FnOnce(usize) -> ComplexKernel<T>) -> Self {
        debug_assert!(len >= kind.min_len());
        Self {
            kind,
            len,
            fft: complex(extended_len(kind, len)),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn process(&self, source: &[T], dest: &mut [T]) {
        debug_assert_eq!(source.len(), self.len);
        debug_assert_eq!(dest.len(), self.len);

        let n = self.len;
        let m = self.fft.len();
        let mut z = vec![Complex::<T>::new(zero(), zero()); m];

        match self.kind {
            R2rKind::Dct1 => {
                for (j, &x) in source.iter().enumerate() {
                    z[j].re = x;
                    if j > 0 && j < n - 1 {
                        z[m - j].re = x;
                    }
                }
            }
            R2rKind::Dct2 | R2rKind::Dct4 => {
                for (j, &x) in source.iter().enumerate() {
                    z[2 * j + 1].re = x;
                    z[m - 2 * j - 1].re = x;
                }
            }
            R2rKind::Dct3 => {
                z[0].re = source[0];
                for (j, &x) in source.iter().enumerate().skip(1) {
                    z[j].re = x;
                    z[m - j].re = x;
                }
            }
            R2rKind::Dst1 => {
                for (j, &x) in source.iter().enumerate() {
                    z[j + 1].re = x;
                    z[m - j - 1].re = -x;
                }
            }
            R2rKind::Dst2 | R2rKind::Dst4 => {
                for (j, &x) in source.iter().enumerate() {
                    z[2 * j + 1].re = x;
                    z[m - 2 * j - 1].re = -x;
                }
            }
            R2rKind::Dst3 => {
                let (last, body) = source.split_last().map_or((zero(), source), |(l, b)| (*l, b));
                for (j, &x) in body.iter().enumerate() {
                    z[j + 1].re = x;
                    z[m - j - 1].re = -x;
                }
                // the last sample sits on the symmetry axis and counts once
                let h = last / (T::one() + T::one());
                z[n].re = h;
                z[3 * n].re = -h;
            }
        }

        self.fft.process_inplace(&mut z, false);

        for (k, d) in dest.iter_mut().enumerate() {
            *d = match self.kind {
                R2rKind::Dct1 | R2rKind::Dct2 => z[k].re,
                R2rKind::Dct3 | R2rKind::Dct4 => z[2 * k + 1].re,
                R2rKind::Dst1 | R2rKind::Dst2 => -z[k + 1].im,
                R2rKind::Dst3 | R2rKind::Dst4 => -z[2 * k + 1].im,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::cast;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    const KINDS: [R2rKind; 8] = [
        R2rKind::Dct1,
        R2rKind::Dct2,
        R2rKind::Dct3,
        R2rKind::Dct4,
        R2rKind::Dst1,
        R2rKind::Dst2,
        R2rKind::Dst3,
        R2rKind::Dst4,
    ];

    // Direct evaluation of the unnormalized definitions.
    fn definition(kind: R2rKind, x: &[f64]) -> Vec<f64> {
        let n = x.len();
        let nf = n as f64;
        let pi = std::f64::consts::PI;
        let sign = |k: usize| if k % 2 == 0 { 1.0 } else { -1.0 };
        (0..n)
            .map(|k| {
                let kf = k as f64;
                match kind {
                    R2rKind::Dct1 => {
                        x[0] + sign(k) * x[n - 1]
                            + (1..n - 1)
                                .map(|j| 2.0 * x[j] * (pi * j as f64 * kf / (nf - 1.0)).cos())
                                .sum::<f64>()
                    }
                    R2rKind::Dct2 => (0..n)
                        .map(|j| 2.0 * x[j] * (pi * (j as f64 + 0.5) * kf / nf).cos())
                        .sum(),
                    R2rKind::Dct3 => {
                        x[0] + (1..n)
                            .map(|j| 2.0 * x[j] * (pi * j as f64 * (kf + 0.5) / nf).cos())
                            .sum::<f64>()
                    }
                    R2rKind::Dct4 => (0..n)
                        .map(|j| 2.0 * x[j] * (pi * (j as f64 + 0.5) * (kf + 0.5) / nf).cos())
                        .sum(),
                    R2rKind::Dst1 => (0..n)
                        .map(|j| {
                            2.0 * x[j] * (pi * (j as f64 + 1.0) * (kf + 1.0) / (nf + 1.0)).sin()
                        })
                        .sum(),
                    R2rKind::Dst2 => (0..n)
                        .map(|j| 2.0 * x[j] * (pi * (j as f64 + 0.5) * (kf + 1.0) / nf).sin())
                        .sum(),
                    R2rKind::Dst3 => {
                        sign(k) * x[n - 1]
                            + (0..n - 1)
                                .map(|j| {
                                    2.0 * x[j] * (pi * (j as f64 + 1.0) * (kf + 0.5) / nf).sin()
                                })
                                .sum::<f64>()
                    }
                    R2rKind::Dst4 => (0..n)
                        .map(|j| 2.0 * x[j] * (pi * (j as f64 + 0.5) * (kf + 0.5) / nf).sin())
                        .sum(),
                }
            })
            .collect()
    }

    #[test]
    fn every_kind_matches_its_definition() {
        let mut rng = XorShiftRng::from_seed([
            0xDA, 0xE1, 0x4B, 0x0B, 0xFF, 0xC2, 0xFE, 0x64, 0x23, 0xFE, 0x3F, 0x51, 0x6D, 0x3E,
            0xA2, 0xF3,
        ]);
        for &kind in &KINDS {
            for len in kind.min_len()..24 {
                let kernel = TrigKernel::<f64>::new(kind, len, ComplexKernel::estimate);
                let source = (0..len).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();
                let mut actual = vec![0.0; len];
                kernel.process(&source, &mut actual);
                assert_nearly_eq!(&actual, &definition(kind, &source));
            }
        }
    }

    #[test]
    fn inverse_pairs_scale_by_documented_factor() {
        let source = (0..8).map(f64::from).collect::<Vec<_>>();
        for &kind in &KINDS {
            let forward = TrigKernel::<f64>::new(kind, 8, ComplexKernel::estimate);
            let backward = TrigKernel::<f64>::new(kind.inverse(), 8, ComplexKernel::estimate);
            let mut spectrum = vec![0.0; 8];
            let mut back = vec![0.0; 8];
            forward.process(&source, &mut spectrum);
            backward.process(&spectrum, &mut back);

            let scale: f64 = cast(kind.scale(8)).unwrap();
            let expected = source.iter().map(|x| x * scale).collect::<Vec<_>>();
            assert_nearly_eq!(&back, &expected);
        }
    }
}
