//! Discrete cosine and sine transforms of vectors and planes.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::{normalize, plane_dims, vector_len, Fourier, TransformResult};
use crate::engine::Engine;
use crate::error::{Result, TransformError};
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::{R2rKind, Shape};

/// DCT variants, `One` through `Four`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DctType {
    One,
    Two,
    Three,
    Four,
}

/// DST variants, `One` through `Four`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DstType {
    One,
    Two,
    Three,
    Four,
}

impl From<DctType> for R2rKind {
    fn from(kind: DctType) -> Self {
        match kind {
            DctType::One => R2rKind::Dct1,
            DctType::Two => R2rKind::Dct2,
            DctType::Three => R2rKind::Dct3,
            DctType::Four => R2rKind::Dct4,
        }
    }
}

impl From<DstType> for R2rKind {
    fn from(kind: DstType) -> Self {
        match kind {
            DstType::One => R2rKind::Dst1,
            DstType::Two => R2rKind::Dst2,
            DstType::Three => R2rKind::Dst3,
            DstType::Four => R2rKind::Dst4,
        }
    }
}

fn name(kind: R2rKind) -> &'static str {
    match kind {
        R2rKind::Dct1 => "DCT-I",
        R2rKind::Dct2 => "DCT-II",
        R2rKind::Dct3 => "DCT-III",
        R2rKind::Dct4 => "DCT-IV",
        R2rKind::Dst1 => "DST-I",
        R2rKind::Dst2 => "DST-II",
        R2rKind::Dst3 => "DST-III",
        R2rKind::Dst4 => "DST-IV",
    }
}

fn check_len(kind: R2rKind, len: usize) -> Result<()> {
    if len < kind.min_len() {
        return Err(TransformError::InvalidLength {
            kind: name(kind),
            len,
        });
    }
    Ok(())
}

impl<'c, T: Scalar, E: Engine<T>> Fourier<'c, T, E> {
    /// `divisor` of zero leaves the output unnormalized.
    fn trig(
        &self,
        input: &Matrix<T>,
        shape: Shape,
        kind: R2rKind,
        divisor: usize,
    ) -> TransformResult<'_, T> {
        let data = input.as_slice().to_vec();
        let runner = self.runner();
        TransformResult::new(input, move || {
            let mut output = vec![T::zero(); shape.len()];
            runner.r2r(shape, kind, &data, &mut output);
            if divisor != 0 {
                normalize::<_, T>(&mut output, divisor);
            }
            output
        })
    }

    /// Unnormalized real-to-real transform of a vector.
    pub fn r2r(&self, input: &Matrix<T>, kind: R2rKind) -> Result<TransformResult<'_, T>> {
        let n = vector_len(input)?;
        check_len(kind, n)?;
        Ok(self.trig(input, Shape::One(n), kind, 0))
    }

    /// Inverse of [`r2r`](Self::r2r) with `kind`; divided by
    /// `kind.scale(n)` when `normalized`.
    pub fn ir2r(
        &self,
        input: &Matrix<T>,
        kind: R2rKind,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        let n = vector_len(input)?;
        check_len(kind, n)?;
        let divisor = if normalized { kind.scale(n) } else { 0 };
        Ok(self.trig(input, Shape::One(n), kind.inverse(), divisor))
    }

    /// Separable real-to-real transform of a plane, `kind` along both axes.
    pub fn r2r2(&self, input: &Matrix<T>, kind: R2rKind) -> Result<TransformResult<'_, T>> {
        let (n0, n1) = plane_dims(input)?;
        check_len(kind, n0.min(n1))?;
        Ok(self.trig(input, Shape::Two(n0, n1), kind, 0))
    }

    /// Divided by `kind.scale(rows) · kind.scale(cols)` when `normalized`.
    pub fn ir2r2(
        &self,
        input: &Matrix<T>,
        kind: R2rKind,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        let (n0, n1) = plane_dims(input)?;
        check_len(kind, n0.min(n1))?;
        let divisor = if normalized {
            kind.scale(n0) * kind.scale(n1)
        } else {
            0
        };
        Ok(self.trig(input, Shape::Two(n0, n1), kind.inverse(), divisor))
    }

    pub fn dct(&self, input: &Matrix<T>, kind: DctType) -> Result<TransformResult<'_, T>> {
        self.r2r(input, kind.into())
    }

    pub fn idct(
        &self,
        input: &Matrix<T>,
        kind: DctType,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        self.ir2r(input, kind.into(), normalized)
    }

    pub fn dst(&self, input: &Matrix<T>, kind: DstType) -> Result<TransformResult<'_, T>> {
        self.r2r(input, kind.into())
    }

    pub fn idst(
        &self,
        input: &Matrix<T>,
        kind: DstType,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        self.ir2r(input, kind.into(), normalized)
    }

    pub fn dct2(&self, input: &Matrix<T>, kind: DctType) -> Result<TransformResult<'_, T>> {
        self.r2r2(input, kind.into())
    }

    pub fn idct2(
        &self,
        input: &Matrix<T>,
        kind: DctType,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        self.ir2r2(input, kind.into(), normalized)
    }

    pub fn dst2(&self, input: &Matrix<T>, kind: DstType) -> Result<TransformResult<'_, T>> {
        self.r2r2(input, kind.into())
    }

    pub fn idst2(
        &self,
        input: &Matrix<T>,
        kind: DstType,
        normalized: bool,
    ) -> Result<TransformResult<'_, T>> {
        self.ir2r2(input, kind.into(), normalized)
    }
}
