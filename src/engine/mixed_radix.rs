//! Mixed-radix decimation-in-time butterflies.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::precompute_utils;
use super::prime_factorization::Factor;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::{cast, NumAssign};

/// Precomputed state of a mixed-radix transform of one length.
#[derive(Debug)]
pub struct MixedRadixData<T> {
    pub swaps: Vec<usize>,
    pub omega: Vec<Complex<T>>,
    pub omega_back: Vec<Complex<T>>,
    pub factors: Vec<Factor>,
}

impl<T: Float + FloatConst> MixedRadixData<T> {
    pub fn new(len: usize, factors: Vec<Factor>) -> Self {
        let omega = precompute_utils::calc_omega(len);
        let omega_back = omega.iter().rev().copied().collect::<Vec<_>>();
        let gather = precompute_utils::calc_bitreverse(len, &factors);
        Self {
            swaps: precompute_utils::calc_bitreverse2inplace(&gather),
            omega,
            omega_back,
            factors,
        }
    }
}

/// Span of the butterflies in the current stage and the twiddle stride.
struct Stage {
    span: usize,
    stride: usize,
}

pub fn convert_mixed_inplace<T: Float + NumAssign + FloatConst>(
    source: &mut [Complex<T>],
    is_back: bool,
    data: &MixedRadixData<T>,
) {
    for (i, &s) in data.swaps.iter().enumerate() {
        if i != s {
            source.swap(i, s);
        }
    }

    let (omega, im_one) = if is_back {
        (&data.omega_back, -Complex::i())
    } else {
        (&data.omega, Complex::i())
    };

    fft_kernel(source, omega, &data.factors, im_one);
}

fn fft_kernel<T: Float + NumAssign + FloatConst>(
    source: &mut [Complex<T>],
    omega: &[Complex<T>],
    factors: &[Factor],
    im_one: Complex<T>,
) {
    let mut stage = Stage {
        span: 1,
        stride: source.len(),
    };

    for factor in factors {
        match factor.value {
            2 => radix2(source, factor.count, &mut stage, omega),
            3 => radix3(source, factor.count, &mut stage, omega, im_one),
            4 => radix4(source, factor.count, &mut stage, omega, im_one),
            5 => radix5(source, factor.count, &mut stage, omega, im_one),
            value => radix_generic(source, value, factor.count, &mut stage, omega),
        }
    }
}

fn radix2<T: Float + NumAssign>(
    ret: &mut [Complex<T>],
    count: usize,
    stage: &mut Stage,
    omega: &[Complex<T>],
) {
    let len = ret.len();
    for _ in 0..count {
        let m = stage.span;
        stage.span <<= 1;
        stage.stride >>= 1;
        for mut j in 0..m {
            let w1 = omega[stage.stride * j];
            while j < len {
                let pos1 = j + m;
                let z1 = ret[pos1] * w1;
                ret[pos1] = ret[j] - z1;
                ret[j] += z1;
                j += stage.span;
            }
        }
    }
}

fn radix3<T: Float + FloatConst + NumAssign>(
    ret: &mut [Complex<T>],
    count: usize,
    stage: &mut Stage,
    omega: &[Complex<T>],
    im_one: Complex<T>,
) {
    let len = ret.len();
    let half = T::one() / cast(2).unwrap();
    let t3scaler = im_one.scale((-T::PI() * cast(2).unwrap() / cast(3).unwrap()).sin());
    for _ in 0..count {
        let m = stage.span;
        stage.span *= 3;
        stage.stride /= 3;
        for mut j in 0..m {
            let wpos = stage.stride * j;
            let (w1, w2) = (omega[wpos], omega[wpos << 1]);

            while j < len {
                let pos1 = j + m;
                let pos2 = pos1 + m;
                let z1 = ret[pos1] * w1;
                let z2 = ret[pos2] * w2;
                let t1 = z1 + z2;
                let t2 = ret[j] - t1.scale(half);
                let t3 = (z1 - z2) * t3scaler;
                ret[j] += t1;
                ret[pos1] = t2 + t3;
                ret[pos2] = t2 - t3;
                j += stage.span;
            }
        }
    }
}

fn radix4<T: Float>(
    ret: &mut [Complex<T>],
    count: usize,
    stage: &mut Stage,
    omega: &[Complex<T>],
    im_one: Complex<T>,
) {
    let len = ret.len();
    for _ in 0..count {
        let m = stage.span;
        stage.span <<= 2;
        stage.stride >>= 2;
        for mut j in 0..m {
            let wpos = stage.stride * j;
            let (w1, w2, w3) = (omega[wpos], omega[wpos << 1], omega[wpos * 3]);
            while j < len {
                let pos1 = j + m;
                let pos2 = pos1 + m;
                let pos3 = pos2 + m;
                let wfb = ret[pos2] * w2;
                let wfab = ret[j] + wfb;
                let wfamb = ret[j] - wfb;
                let wfc = ret[pos1] * w1;
                let wfd = ret[pos3] * w3;
                let wfcd = wfc + wfd;
                let wfcimdi = (wfc - wfd) * im_one;

                ret[j] = wfab + wfcd;
                ret[pos1] = wfamb - wfcimdi;
                ret[pos2] = wfab - wfcd;
                ret[pos3] = wfamb + wfcimdi;
                j += stage.span;
            }
        }
    }
}

/// Radix-4 stages over a power-of-two buffer, used by the chirp-z core.
pub fn radix4_stages<T: Float>(
    ret: &mut [Complex<T>],
    count: usize,
    span: usize,
    omega: &[Complex<T>],
    im_one: Complex<T>,
) {
    let mut stage = Stage {
        span,
        stride: ret.len() / span,
    };
    radix4(ret, count, &mut stage, omega, im_one);
}

fn radix5<T: Float + FloatConst>(
    ret: &mut [Complex<T>],
    count: usize,
    stage: &mut Stage,
    omega: &[Complex<T>],
    im_one: Complex<T>,
) {
    let len = ret.len();
    let quarter = T::one() / cast(4).unwrap();
    let sqrt5_4 = quarter * cast::<_, T>(5).unwrap().sqrt();
    let sin2 = (-T::PI() * cast(0.4).unwrap()).sin();
    let sin1 = (-T::PI() * cast(0.2).unwrap()).sin();
    for _ in 0..count {
        let m = stage.span;
        stage.span *= 5;
        stage.stride /= 5;
        for mut j in 0..m {
            let wpos = stage.stride * j;
            let (w1, w2, w3, w4) = (
                omega[wpos],
                omega[wpos << 1],
                omega[wpos * 3],
                omega[wpos << 2],
            );
            while j < len {
                let pos2 = j + m;
                let pos3 = pos2 + m;
                let pos4 = pos3 + m;
                let pos5 = pos4 + m;

                let z0 = ret[j];
                let z1 = ret[pos2] * w1;
                let z2 = ret[pos3] * w2;
                let z3 = ret[pos4] * w3;
                let z4 = ret[pos5] * w4;

                let t1 = z1 + z4;
                let t2 = z2 + z3;
                let t3 = z1 - z4;
                let t4 = z2 - z3;
                let t5 = t1 + t2;
                let t6 = (t1 - t2).scale(sqrt5_4);
                let t7 = z0 - t5.scale(quarter);
                let t8 = t6 + t7;
                let t9 = t7 - t6;
                let t10 = (t3.scale(sin2) + t4.scale(sin1)) * im_one;
                let t11 = (t3.scale(sin1) - t4.scale(sin2)) * im_one;

                ret[j] = z0 + t5;
                ret[pos2] = t8 + t10;
                ret[pos3] = t9 + t11;
                ret[pos4] = t9 - t11;
                ret[pos5] = t8 - t10;
                j += stage.span;
            }
        }
    }
}

// Direct DFT butterfly for primes without a dedicated kernel.
fn radix_generic<T: Float>(
    ret: &mut [Complex<T>],
    value: usize,
    count: usize,
    stage: &mut Stage,
    omega: &[Complex<T>],
) {
    let len = ret.len();
    let rot_width = len / value;
    let rot = (0..value).map(|i| omega[rot_width * i]).collect::<Vec<_>>();
    let mut z = Vec::with_capacity(value);

    for _ in 0..count {
        let m = stage.span;
        stage.span *= value;
        stage.stride /= value;
        for mut j in 0..m {
            let wpos = stage.stride * j;
            while j < len {
                z.clear();
                z.extend((0..value).map(|i| ret[j + m * i] * omega[wpos * i]));
                for i in 0..value {
                    ret[j + m * i] = (1..value).fold(z[0], |x, l| x + z[l] * rot[(i * l) % value]);
                }
                j += stage.span;
            }
        }
    }
}
