//! Chirp-z (Bluestein) transform for lengths with large prime factors.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::mixed_radix;
use super::precompute_utils;
use super::prime_factorization::Factor;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::{cast, NumAssign};

#[derive(Debug)]
pub struct ChirpzData<T> {
    pub level: usize,
    pub swaps: Vec<usize>,
    pub omega: Vec<Complex<T>>,
    pub omega_back: Vec<Complex<T>>,
    pub src_omega: Vec<Complex<T>>,
    pub rot_conj: Vec<Complex<T>>,
    pub rot_ft: Vec<Complex<T>>,
    pub pow2len_inv: T,
}

impl<T: Float + FloatConst + NumAssign> ChirpzData<T> {
    pub fn new(len: usize) -> Self {
        let pow2len = len.next_power_of_two() << 1;
        let level = pow2len.trailing_zeros() as usize;

        let dlen = len << 1;
        let src_omega = precompute_utils::calc_omega(dlen);

        let mut rot = Vec::with_capacity(pow2len);
        let mut rot_conj = Vec::with_capacity(pow2len);
        for i in 0..len {
            let sq = (i * i) % dlen;
            rot_conj.push(src_omega[sq]);
            rot.push(src_omega[dlen - sq]);
        }

        let hlen = (pow2len >> 1) + 1;
        rot_conj.resize(hlen, zero());
        rot.resize(hlen, zero());
        for i in hlen..pow2len {
            let t = rot_conj[pow2len - i];
            rot_conj.push(t);
            let t = rot[pow2len - i];
            rot.push(t);
        }

        let gather = precompute_utils::calc_bitreverse(
            pow2len,
            &[
                Factor {
                    value: 2,
                    count: level & 1,
                },
                Factor {
                    value: 4,
                    count: level >> 1,
                },
            ],
        );
        let swaps = precompute_utils::calc_bitreverse2inplace(&gather);
        let omega = precompute_utils::calc_omega(pow2len);
        let omega_back = omega.iter().rev().copied().collect::<Vec<_>>();
        let pow2len_inv = T::one() / cast(pow2len).unwrap();
        convert_rad2_inplace(&mut rot, level, &swaps, &omega, false, pow2len_inv);

        Self {
            level,
            swaps,
            omega,
            omega_back,
            src_omega,
            rot_conj,
            rot_ft: rot,
            pow2len_inv,
        }
    }
}

fn convert_rad2_inplace<T: Float + NumAssign>(
    source: &mut [Complex<T>],
    level: usize,
    swaps: &[usize],
    omega: &[Complex<T>],
    is_back: bool,
    pow2len_inv: T,
) {
    for (i, &s) in swaps.iter().enumerate() {
        if i != s {
            source.swap(i, s);
        }
    }

    if is_back {
        for data in source.iter_mut() {
            *data = data.scale(pow2len_inv);
        }
    }

    let mut span = 1;
    if (level & 1) == 1 {
        span = 2;
        for pair in source.chunks_exact_mut(2) {
            let wfb = pair[1];
            pair[1] = pair[0] - wfb;
            pair[0] += wfb;
        }
    }

    let im_one = if is_back {
        -Complex::i()
    } else {
        Complex::i()
    };
    mixed_radix::radix4_stages(source, level >> 1, span, omega, im_one);
}

pub fn convert_chirpz_inplace<T: Float + NumAssign>(
    source: &mut [Complex<T>],
    is_back: bool,
    data: &ChirpzData<T>,
) {
    let srclen = source.len();
    let len = 1 << data.level;
    let dlen = srclen << 1;

    let mut a = Vec::with_capacity(len);
    for (i, s) in source.iter().enumerate() {
        a.push(s * data.src_omega[(i * i) % dlen]);
    }
    a.resize(len, zero());

    convert_rad2_inplace(
        &mut a,
        data.level,
        &data.swaps,
        &data.omega,
        false,
        data.pow2len_inv,
    );
    for (d, r) in a.iter_mut().zip(data.rot_ft.iter()) {
        *d *= *r;
    }
    convert_rad2_inplace(
        &mut a,
        data.level,
        &data.swaps,
        &data.omega_back,
        true,
        data.pow2len_inv,
    );

    // Multiply phase factor
    for (i, si) in source.iter_mut().enumerate() {
        let j = if i == 0 || !is_back { i } else { srclen - i };
        *si = a[j] * data.rot_conj[j];
    }
}
