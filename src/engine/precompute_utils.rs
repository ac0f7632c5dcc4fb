//! Twiddle tables and input permutations shared by the kernels.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::prime_factorization::Factor;
use num_complex::Complex;
use num_traits::cast;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::one;
use std::cmp;

#[inline]
fn omega_item<T: Float + FloatConst>(len: usize, position: usize) -> Complex<T> {
    let turn = T::PI() / cast(len).unwrap() * cast(position).unwrap();
    Complex::from_polar(one(), -(turn + turn))
}

/// `len + 1` roots of unity `exp(-2πik/len)`, closing the circle with a
/// trailing `1`. Quarter and half turns are derived by rotation, not by
/// calling `sin`/`cos` again.
pub fn calc_omega<T: Float + FloatConst>(len: usize) -> Vec<Complex<T>> {
    let mut omega = Vec::with_capacity(len + 1);
    omega.push(one());
    if len.trailing_zeros() >= 2 {
        let q = len >> 2;
        let h = len >> 1;
        for i in 1..q {
            omega.push(omega_item(len, i));
        }
        for i in q..h {
            let tmp: Complex<T> = omega[i - q];
            omega.push(Complex::new(tmp.im, -tmp.re));
        }
        for i in h..len {
            let tmp = omega[i - h];
            omega.push(-tmp);
        }
    } else if len & 1 == 0 {
        let h = cmp::max(len >> 1, 1);
        for i in 1..h {
            omega.push(omega_item(len, i));
        }
        for i in h..len {
            let tmp = omega[i - h];
            omega.push(-tmp);
        }
    } else {
        for i in 1..len {
            omega.push(omega_item(len, i));
        }
    }
    omega.push(one());
    omega
}

/// Digit-reversal gather table for the given radix sequence: the stage input
/// at position `i` is `source[ids[i]]`.
pub fn calc_bitreverse(len: usize, factors: &[Factor]) -> Vec<usize> {
    let mut ids = Vec::<usize>::with_capacity(len);
    let mut llen = 1_usize;
    ids.push(0);
    for f in factors {
        for _ in 0..f.count {
            for id in ids.iter_mut().take(llen) {
                *id *= f.value;
            }
            for i in 1..f.value {
                for j in 0..llen {
                    let id = ids[j] + i;
                    ids.push(id);
                }
            }
            llen *= f.value;
        }
    }
    ids
}

/// Turns a gather table into a swap sequence: applying `swap(i, swaps[i])`
/// for ascending `i` permutes a buffer in place into gather order.
pub fn calc_bitreverse2inplace(gather: &[usize]) -> Vec<usize> {
    // at[p]: original index currently stored at p; pos[v]: where v lives now
    let mut at = (0..gather.len()).collect::<Vec<_>>();
    let mut pos = at.clone();

    gather
        .iter()
        .enumerate()
        .map(|(i, &want)| {
            let r = pos[want];
            let displaced = at[i];
            at.swap(i, r);
            pos[want] = i;
            pos[displaced] = r;
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::prime_factorization::factorize;

    #[test]
    fn omega_is_a_closed_circle() {
        for len in [1usize, 2, 3, 4, 6, 8, 12, 15, 16] {
            let omega = calc_omega::<f64>(len);
            assert_eq!(omega.len(), len + 1);
            for (k, w) in omega.iter().enumerate().take(len) {
                let angle = -2.0 * std::f64::consts::PI * k as f64 / len as f64;
                assert!((w.re - angle.cos()).abs() < 1e-12);
                assert!((w.im - angle.sin()).abs() < 1e-12);
            }
            assert_eq!(omega[len], Complex::new(1.0, 0.0));
        }
    }

    #[test]
    fn swap_sequence_reproduces_gather() {
        for len in [2usize, 6, 12, 30, 64, 105] {
            let factors = factorize(len, usize::MAX).unwrap();
            let gather = calc_bitreverse(len, &factors);
            let swaps = calc_bitreverse2inplace(&gather);

            let mut data = (0..len).collect::<Vec<_>>();
            for (i, &s) in swaps.iter().enumerate() {
                data.swap(i, s);
            }
            assert_eq!(data, gather);
        }
    }
}
