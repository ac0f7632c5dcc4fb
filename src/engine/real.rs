//! Real-to-complex and complex-to-real one-dimensional kernels.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::complex::ComplexKernel;
use super::precompute_utils;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::{one, zero};
use num_traits::NumAssign;

#[derive(Debug)]
enum Packing<T> {
    /// Even lengths: pairs of samples ride in one complex slot of a
    /// half-length transform and are untangled with `coef`/`bcoef`.
    Half {
        fft: ComplexKernel<T>,
        coef: Vec<Complex<T>>,
        bcoef: Vec<Complex<T>>,
    },
    /// Odd lengths go through the full-length complex transform.
    Full(ComplexKernel<T>),
}

/// Real-input transform of length `n` producing the `n/2 + 1` non-redundant
/// spectrum entries, and its inverse. Both directions are unnormalized.
#[derive(Debug)]
pub struct RealKernel<T> {
    len: usize,
    packing: Packing<T>,
}

fn half<T: Float>() -> T {
    T::one() / (T::one() + T::one())
}

impl<T: Float + FloatConst + NumAssign> RealKernel<T> {
    /// `complex` is asked for the inner complex kernel of the length it
    /// needs.
    pub fn new(len: usize, mut complex: impl FnMut(usize) -> ComplexKernel<T>) -> Self {
        let packing = if len >= 2 && len & 1 == 0 {
            let omega = precompute_utils::calc_omega::<T>(len);
            let coef = omega
                .iter()
                .take(len >> 1)
                .map(|w| (Complex::<T>::new(one(), zero()) + Complex::<T>::i() * w).scale(half()))
                .collect();
            let bcoef = omega
                .iter()
                .rev()
                .take(len >> 1)
                .map(|w| (Complex::<T>::new(one(), zero()) - Complex::<T>::i() * w).scale(half()))
                .collect();
            Packing::Half {
                fft: complex(len >> 1),
                coef,
                bcoef,
            }
        } else {
            Packing::Full(complex(len))
        };
        Self { len, packing }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Length of the half spectrum, `n/2 + 1`.
    pub fn spectrum_len(&self) -> usize {
        (self.len >> 1) + 1
    }

    /// `source.len() == n`, `dest.len() == n/2 + 1`.
    pub fn forward(&self, source: &[T], dest: &mut [Complex<T>]) {
        debug_assert_eq!(source.len(), self.len);
        debug_assert_eq!(dest.len(), self.spectrum_len());

        match self.packing {
            Packing::Half {
                ref fft, ref coef, ..
            } => {
                let hlen = self.len >> 1;
                let qlen = (self.len + 3) >> 2;
                let mut work = source
                    .chunks_exact(2)
                    .map(|pair| Complex::new(pair[0], pair[1]))
                    .collect::<Vec<_>>();
                fft.process_inplace(&mut work, false);

                for i in 1..qlen {
                    let x = coef[i] * (work[i] - work[hlen - i].conj());
                    dest[i] = work[i] - x;
                    dest[hlen - i] = work[hlen - i] + x.conj();
                }
                dest[0] = Complex::new(work[0].re + work[0].im, zero());
                if self.len & 3 == 0 {
                    dest[qlen] = work[qlen].conj();
                }
                dest[hlen] = Complex::new(work[0].re - work[0].im, zero());
            }
            Packing::Full(ref fft) => {
                let mut work = source
                    .iter()
                    .map(|&x| Complex::new(x, zero()))
                    .collect::<Vec<_>>();
                fft.process_inplace(&mut work, false);
                let h = dest.len();
                dest.copy_from_slice(&work[..h]);
            }
        }
    }

    /// `source.len() == n/2 + 1`, `dest.len() == n`. The imaginary parts of
    /// the DC entry (and of the Nyquist entry for even `n`) are ignored.
    pub fn backward(&self, source: &[Complex<T>], dest: &mut [T]) {
        debug_assert_eq!(source.len(), self.spectrum_len());
        debug_assert_eq!(dest.len(), self.len);

        match self.packing {
            Packing::Half {
                ref fft, ref bcoef, ..
            } => {
                let hlen = self.len >> 1;
                let qlen = (self.len + 3) >> 2;
                let mut work = vec![zero(); hlen];
                work[0] = Complex::new(
                    source[0].re + source[hlen].re,
                    source[0].re - source[hlen].re,
                )
                .scale(half());
                if self.len & 3 == 0 {
                    work[qlen] = source[qlen].conj();
                }
                for i in 1..qlen {
                    let x = bcoef[i] * (source[i] - source[hlen - i].conj());
                    work[i] = source[i] - x;
                    work[hlen - i] = source[hlen - i] + x.conj();
                }

                fft.process_inplace(&mut work, true);

                let two = T::one() + T::one();
                for (pair, w) in dest.chunks_exact_mut(2).zip(work.iter()) {
                    pair[0] = w.re * two;
                    pair[1] = w.im * two;
                }
            }
            Packing::Full(ref fft) => {
                let h = source.len();
                let mut work = Vec::with_capacity(self.len);
                work.extend_from_slice(source);
                work[0].im = zero();
                for k in h..self.len {
                    work.push(source[self.len - k].conj());
                }
                fft.process_inplace(&mut work, true);
                for (d, w) in dest.iter_mut().zip(work.iter()) {
                    *d = w.re;
                }
            }
        }
    }
}
