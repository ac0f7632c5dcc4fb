//! Complex and real-input Fourier transforms of vectors and planes.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::hermitian::{expand_half_plane, take_half_plane};
use super::{normalize, plane_dims, vector_len, Fourier, TransformResult};
use crate::engine::Engine;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::{Direction, Shape};
use num_complex::Complex;
use num_traits::identities::zero;

impl<'c, T: Scalar, E: Engine<T>> Fourier<'c, T, E> {
    fn c2c(
        &self,
        input: &Matrix<Complex<T>>,
        shape: Shape,
        direction: Direction,
        normalized: bool,
    ) -> TransformResult<'_, Complex<T>> {
        let data = input.as_slice().to_vec();
        let runner = self.runner();
        TransformResult::new(input, move || {
            let mut output = vec![Complex::new(zero(), zero()); shape.len()];
            runner.c2c(shape, direction, &data, &mut output);
            if normalized {
                normalize::<_, T>(&mut output, shape.len());
            }
            output
        })
    }

    fn r2c_full(&self, input: &Matrix<T>, n0: usize, n1: usize) -> TransformResult<'_, Complex<T>> {
        let data = input.as_slice().to_vec();
        let runner = self.runner();
        let shape = Shape::Two(n0, n1);
        TransformResult::new(input, move || {
            let mut half = vec![Complex::new(zero(), zero()); shape.spectrum_len()];
            if n0 == 1 {
                runner.r2c(Shape::One(n1), &data, &mut half);
            } else {
                runner.r2c(shape, &data, &mut half);
            }
            expand_half_plane(&half, n0, n1)
        })
    }

    fn c2r_full(
        &self,
        input: &Matrix<Complex<T>>,
        n0: usize,
        n1: usize,
        normalized: bool,
    ) -> TransformResult<'_, T> {
        let half = take_half_plane(input.as_slice(), n0, n1);
        let runner = self.runner();
        let shape = Shape::Two(n0, n1);
        TransformResult::new(input, move || {
            // the engine consumes its input; run on a copy of the copy
            let mut scratch = half.clone();
            let mut output = vec![T::zero(); shape.len()];
            if n0 == 1 {
                runner.c2r(Shape::One(n1), &mut scratch, &mut output);
            } else {
                runner.c2r(shape, &mut scratch, &mut output);
            }
            if normalized {
                normalize::<_, T>(&mut output, shape.len());
            }
            output
        })
    }

    /// Forward DFT of a vector.
    pub fn fft(&self, input: &Matrix<Complex<T>>) -> Result<TransformResult<'_, Complex<T>>> {
        let n = vector_len(input)?;
        Ok(self.c2c(input, Shape::One(n), Direction::Forward, false))
    }

    /// Inverse DFT of a vector, divided by `n` when `normalized`.
    pub fn ifft(
        &self,
        input: &Matrix<Complex<T>>,
        normalized: bool,
    ) -> Result<TransformResult<'_, Complex<T>>> {
        let n = vector_len(input)?;
        Ok(self.c2c(input, Shape::One(n), Direction::Inverse, normalized))
    }

    /// DFT of a real vector: all `n` entries, the upper half rebuilt from
    /// conjugate symmetry.
    pub fn rfft(&self, input: &Matrix<T>) -> Result<TransformResult<'_, Complex<T>>> {
        let n = vector_len(input)?;
        Ok(self.r2c_full(input, 1, n))
    }

    /// Real inverse DFT of a full conjugate-symmetric spectrum. Only the
    /// first `n/2 + 1` entries are read.
    pub fn irfft(
        &self,
        input: &Matrix<Complex<T>>,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        let n = vector_len(input)?;
        Ok(self.c2r_full(input, 1, n, normalized))
    }

    pub fn fft2(&self, input: &Matrix<Complex<T>>) -> Result<TransformResult<'_, Complex<T>>> {
        let (n0, n1) = plane_dims(input)?;
        Ok(self.c2c(input, Shape::Two(n0, n1), Direction::Forward, false))
    }

    /// Divided by `rows · cols` when `normalized`.
    pub fn ifft2(
        &self,
        input: &Matrix<Complex<T>>,
        normalized: bool,
    ) -> Result<TransformResult<'_, Complex<T>>> {
        let (n0, n1) = plane_dims(input)?;
        Ok(self.c2c(input, Shape::Two(n0, n1), Direction::Inverse, normalized))
    }

    /// 2-D DFT of a real plane with the mirrored half of every row rebuilt.
    pub fn rfft2(&self, input: &Matrix<T>) -> Result<TransformResult<'_, Complex<T>>> {
        let (n0, n1) = plane_dims(input)?;
        Ok(self.r2c_full(input, n0, n1))
    }

    pub fn irfft2(
        &self,
        input: &Matrix<Complex<T>>,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        let (n0, n1) = plane_dims(input)?;
        Ok(self.c2r_full(input, n0, n1, normalized))
    }
}
