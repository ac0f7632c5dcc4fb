//! Complex-to-complex one-dimensional kernel.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::chirpz::{self, ChirpzData};
use super::mixed_radix::{self, MixedRadixData};
use super::prime_factorization;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::NumAssign;

/// Largest prime the estimate heuristic accepts on the mixed-radix path.
const MAX_PRIME: usize = 7;

/// Kernel family chosen for one transform length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Lengths 0 and 1: the transform is the identity.
    Identity,
    MixedRadix,
    ChirpZ,
}

#[derive(Debug)]
enum WorkData<T> {
    Identity,
    MixedRadix(MixedRadixData<T>),
    ChirpZ(ChirpzData<T>),
}

/// Unnormalized complex DFT of a fixed length.
///
/// The forward transform is
///
/// \\[ Y_k = \sum_{j=0}^{n-1} X_j e^{- \frac {2 \pi i j k}{n}} \\]
///
/// and the backward transform flips the sign of the exponent. Neither
/// direction scales its output. A kernel is immutable once built, so one
/// instance may run on many buffers from many threads.
#[derive(Debug)]
pub struct ComplexKernel<T> {
    len: usize,
    work: WorkData<T>,
}

impl<T: Float + FloatConst + NumAssign> ComplexKernel<T> {
    /// Builds the kernel the size heuristics favour: mixed radix when every
    /// prime factor has a dedicated butterfly, chirp-z otherwise.
    pub fn estimate(len: usize) -> Self {
        if len <= 1 {
            return Self::with_algorithm(len, Algorithm::Identity);
        }
        match prime_factorization::factorize(len, MAX_PRIME) {
            Some(factors) => Self {
                len,
                work: WorkData::MixedRadix(MixedRadixData::new(len, factors)),
            },
            None => Self::with_algorithm(len, Algorithm::ChirpZ),
        }
    }

    /// Builds the kernel with an explicit algorithm. Mixed radix accepts any
    /// length; primes beyond five go through the generic butterfly.
    pub fn with_algorithm(len: usize, algorithm: Algorithm) -> Self {
        let work = match algorithm {
            _ if len <= 1 => WorkData::Identity,
            Algorithm::Identity => WorkData::Identity,
            Algorithm::MixedRadix => {
                let factors = prime_factorization::factorize(len, usize::MAX).unwrap_or_default();
                WorkData::MixedRadix(MixedRadixData::new(len, factors))
            }
            Algorithm::ChirpZ => WorkData::ChirpZ(ChirpzData::new(len)),
        };
        Self { len, work }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn algorithm(&self) -> Algorithm {
        match self.work {
            WorkData::Identity => Algorithm::Identity,
            WorkData::MixedRadix(_) => Algorithm::MixedRadix,
            WorkData::ChirpZ(_) => Algorithm::ChirpZ,
        }
    }

    /// Transforms `buffer` in place. `buffer.len()` must equal the kernel
    /// length.
    pub fn process_inplace(&self, buffer: &mut [Complex<T>], is_back: bool) {
        debug_assert_eq!(buffer.len(), self.len, "kernel length mismatch");
        match self.work {
            WorkData::Identity => {}
            WorkData::MixedRadix(ref data) => {
                mixed_radix::convert_mixed_inplace(buffer, is_back, data)
            }
            WorkData::ChirpZ(ref data) => chirpz::convert_chirpz_inplace(buffer, is_back, data),
        }
    }

    /// Out-of-place variant: copies `source` into `dest`, then transforms.
    pub fn process(&self, source: &[Complex<T>], dest: &mut [Complex<T>], is_back: bool) {
        dest.copy_from_slice(source);
        self.process_inplace(dest, is_back);
    }
}
