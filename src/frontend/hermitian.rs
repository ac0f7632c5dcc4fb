//! Conversions between half and full spectra of real-input transforms.
//!
//! A real plane of `n0 × n1` samples has a conjugate-symmetric spectrum:
//! `X[i][j] = conj(X[wrap(i)][n1 - j])` with `wrap(0) = 0` and
//! `wrap(i) = n0 - i` otherwise. Engines store only columns
//! `0..n1/2 + 1` of each row.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use num_complex::Complex;
use num_traits::float::Float;

fn wrap(i: usize, n: usize) -> usize {
    if i == 0 {
        0
    } else {
        n - i
    }
}

/// Rebuilds the full row-major `n0 × n1` spectrum from its leading
/// `n1/2 + 1` columns.
pub fn expand_half_plane<T: Float>(half: &[Complex<T>], n0: usize, n1: usize) -> Vec<Complex<T>> {
    let h = n1 / 2 + 1;
    debug_assert_eq!(half.len(), n0 * h);

    let mut full = Vec::with_capacity(n0 * n1);
    for (i, row) in half.chunks_exact(h).enumerate() {
        full.extend_from_slice(row);
        let mirror = &half[wrap(i, n0) * h..][..h];
        full.extend((h..n1).map(|j| mirror[n1 - j].conj()));
    }
    full
}

/// Leading `n1/2 + 1` columns of a row-major `n0 × n1` plane.
pub fn take_half_plane<C: Copy>(full: &[C], n0: usize, n1: usize) -> Vec<C> {
    debug_assert_eq!(full.len(), n0 * n1);
    let h = n1 / 2 + 1;
    full.chunks_exact(n1)
        .flat_map(|row| row[..h].iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, NativeEngine};
    use crate::{Direction, Effort, PlanRequest, Shape, TransformKind};
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn spectra(n0: usize, n1: usize) -> (Vec<Complex<f64>>, Vec<Complex<f64>>) {
        let mut rng = XorShiftRng::from_seed([
            0xDA, 0xE1, 0x4B, 0x0B, 0xFF, 0xC2, 0xFE, 0x64, 0x23, 0xFE, 0x3F, 0x51, 0x6D, 0x3E,
            0xA2, 0xF3,
        ]);
        let engine = NativeEngine::new();
        let shape = Shape::Two(n0, n1);
        let real = (0..n0 * n1).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();

        let r2c = Engine::<f64>::build(
            &engine,
            &PlanRequest::new(shape, TransformKind::R2c, Direction::Forward),
            Effort::Estimate,
        )
        .unwrap();
        let mut half = vec![Complex::new(0.0, 0.0); shape.spectrum_len()];
        engine.execute_r2c(&r2c, &real, &mut half);

        let c2c = Engine::<f64>::build(
            &engine,
            &PlanRequest::new(shape, TransformKind::C2c, Direction::Forward),
            Effort::Estimate,
        )
        .unwrap();
        let complex = real.iter().map(|&x| Complex::new(x, 0.0)).collect::<Vec<_>>();
        let mut full = vec![Complex::new(0.0, 0.0); n0 * n1];
        engine.execute_c2c(&c2c, &complex, &mut full);
        (half, full)
    }

    #[test]
    fn expansion_matches_complex_transform() {
        for &(n0, n1) in &[(1, 1), (1, 8), (1, 9), (4, 6), (5, 7), (3, 2), (6, 1)] {
            let (half, full) = spectra(n0, n1);
            assert_nearly_eq!(&expand_half_plane(&half, n0, n1), &full);
            assert_nearly_eq!(&take_half_plane(&full, n0, n1), &half);
        }
    }

    #[test]
    fn mirror_wraps_both_axes() {
        // half plane of a 3x4 spectrum, values encode (row, col)
        let half = (0..3)
            .flat_map(|i| (0..3).map(move |j| Complex::new((10 * i + j) as f64, 1.0)))
            .collect::<Vec<_>>();
        let full = expand_half_plane(&half, 3, 4);
        // (0, 3) mirrors (0, 1); (1, 3) mirrors (2, 1); (2, 3) mirrors (1, 1)
        assert_eq!(full[3], Complex::new(1.0, -1.0));
        assert_eq!(full[4 + 3], Complex::new(21.0, -1.0));
        assert_eq!(full[8 + 3], Complex::new(11.0, -1.0));
    }
}
