//! Plan caching and transform front-ends for FFT, DCT and DST.
//!
//! Building a transform plan for a given shape is expensive, executing a
//! built plan is cheap and safe from many threads at once. This crate keeps
//! the two apart:
//!
//! * [`ShapeKey1D`]/[`ShapeKey2D`] say when two requests can share a plan,
//! * [`Plan`] builds one handle lazily, exactly once, then runs lock-free,
//! * [`PlanCache`] maps keys to handles for the whole process (one map per
//!   arity, one lock per map, one cache per scalar width),
//! * [`Fourier`] turns [`Matrix`] containers into engine buffers and back,
//!   applying normalization and rebuilding the Hermitian half of real-input
//!   spectra.
//!
//! The numeric work is done by an [`Engine`]; [`NativeEngine`] is the
//! bundled mixed-radix/chirp-z implementation.
//!
//! # Example
//!
//! ```rust
//! use fftplan::{DctType, Fourier, Matrix};
//!
//! let fourier = Fourier::<f64>::global();
//! let x = Matrix::column((0..8).map(f64::from).collect());
//!
//! let y = fourier.dct(&x, DctType::Two).unwrap().eval();
//! let back = fourier.idct(&y, DctType::Two, false).unwrap().eval();
//!
//! // the unnormalized inverse of a DCT-II is 2n times the input
//! assert!((back[(5, 0)] - 16.0 * 5.0).abs() < 1e-9);
//! ```
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

#[cfg(test)]
#[macro_use]
mod nearly_eq;

mod cache;
pub mod engine;
mod error;
mod frontend;
mod matrix;
mod plan;
mod scalar;
mod shape_key;
#[cfg(test)]
mod test_support;

pub use crate::cache::{PlanCache, PlanCacheConfig};
pub use crate::engine::{Engine, NativeEngine, NativePlan};
pub use crate::error::{Result, TransformError};
pub use crate::frontend::{DctType, DstType, Fourier, TransformResult};
pub use crate::matrix::{Layout, Matrix};
pub use crate::plan::Plan;
pub use crate::scalar::Scalar;
pub use crate::shape_key::{align_class, Placement, ShapeKey1D, ShapeKey2D, ALIGN_BOUNDARY};

/// Sign of the exponent: forward is `exp(-2πi…)`, inverse `exp(+2πi…)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Real-to-real trigonometric transform kinds, unnormalized.
///
/// | kind | definition (`k = 0..n`) |
/// |---|---|
/// | `Dct1` | `x₀ + (-1)ᵏ xₙ₋₁ + 2 Σ_{j=1}^{n-2} xⱼ cos(πjk/(n-1))` |
/// | `Dct2` | `2 Σ xⱼ cos(π(j+½)k/n)` |
/// | `Dct3` | `x₀ + 2 Σ_{j≥1} xⱼ cos(πj(k+½)/n)` |
/// | `Dct4` | `2 Σ xⱼ cos(π(j+½)(k+½)/n)` |
/// | `Dst1` | `2 Σ xⱼ sin(π(j+1)(k+1)/(n+1))` |
/// | `Dst2` | `2 Σ xⱼ sin(π(j+½)(k+1)/n)` |
/// | `Dst3` | `(-1)ᵏ xₙ₋₁ + 2 Σ_{j<n-1} xⱼ sin(π(j+1)(k+½)/n)` |
/// | `Dst4` | `2 Σ xⱼ sin(π(j+½)(k+½)/n)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum R2rKind {
    Dct1,
    Dct2,
    Dct3,
    Dct4,
    Dst1,
    Dst2,
    Dst3,
    Dst4,
}

impl R2rKind {
    /// The kind that undoes this one, up to [`R2rKind::scale`].
    pub fn inverse(self) -> Self {
        match self {
            R2rKind::Dct2 => R2rKind::Dct3,
            R2rKind::Dct3 => R2rKind::Dct2,
            R2rKind::Dst2 => R2rKind::Dst3,
            R2rKind::Dst3 => R2rKind::Dst2,
            other => other,
        }
    }

    /// Factor by which `inverse(forward(x))` exceeds `x` at length `n`.
    ///
    /// `Dct1` has one logical sample fewer than `n` and `Dst1` one more,
    /// hence `2(n-1)` and `2(n+1)`; every other kind uses `2n`.
    pub fn scale(self, n: usize) -> usize {
        match self {
            R2rKind::Dct1 => 2 * (n - 1),
            R2rKind::Dst1 => 2 * (n + 1),
            _ => 2 * n,
        }
    }

    /// Smallest length the kind is defined for.
    pub fn min_len(self) -> usize {
        match self {
            R2rKind::Dct1 => 2,
            _ => 1,
        }
    }

    fn code(self) -> u8 {
        self as u8
    }
}

/// What kind of buffers a plan maps between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Complex input, complex output of the same shape.
    C2c,
    /// Real input of `n` samples, `n/2 + 1` complex outputs along the
    /// trailing dimension.
    R2c,
    /// The reverse of `R2c`. Engines may overwrite the complex input.
    C2r,
    /// Real to real; the kind applies along every dimension.
    R2r(R2rKind),
}

impl TransformKind {
    pub(crate) fn code(self) -> u8 {
        match self {
            TransformKind::C2c => 0,
            TransformKind::R2c => 1,
            TransformKind::C2r => 2,
            TransformKind::R2r(kind) => 3 + kind.code(),
        }
    }
}

/// Native (row-major) transform shape. For 2-D real transforms `n1`, the
/// trailing dimension, is the one stored as a half spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    One(usize),
    Two(usize, usize),
}

impl Shape {
    /// Number of samples on the real (full-length) side.
    pub fn len(self) -> usize {
        match self {
            Shape::One(n) => n,
            Shape::Two(n0, n1) => n0 * n1,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Number of complex entries on the spectrum side of a real transform.
    pub fn spectrum_len(self) -> usize {
        match self {
            Shape::One(n) => n / 2 + 1,
            Shape::Two(n0, n1) => n0 * (n1 / 2 + 1),
        }
    }

    fn dims(self) -> impl Iterator<Item = usize> {
        let (a, b) = match self {
            Shape::One(n) => (n, None),
            Shape::Two(n0, n1) => (n0, Some(n1)),
        };
        std::iter::once(a).chain(b)
    }
}

/// Everything an engine needs to build a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanRequest {
    pub shape: Shape,
    pub kind: TransformKind,
    pub direction: Direction,
}

impl PlanRequest {
    pub fn new(shape: Shape, kind: TransformKind, direction: Direction) -> Self {
        Self {
            shape,
            kind,
            direction,
        }
    }

    /// Whether every dimension is long enough for the kind.
    pub fn is_buildable(&self) -> bool {
        let min = match self.kind {
            TransformKind::R2r(kind) => kind.min_len(),
            _ => 1,
        };
        self.shape.dims().all(|n| n >= min)
    }
}

/// How much one-time work an engine may spend choosing kernels.
///
/// Higher levels trade a slower first build for faster executions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Effort {
    /// Heuristics only (and anything measured earlier).
    #[default]
    Estimate,
    /// Time every candidate once.
    Measure,
    /// Time every candidate a few times.
    Patient,
    /// Time every candidate many times.
    Exhaustive,
}

impl Effort {
    /// Trial executions per candidate kernel.
    pub fn repetitions(self) -> usize {
        match self {
            Effort::Estimate => 0,
            Effort::Measure => 1,
            Effort::Patient => 3,
            Effort::Exhaustive => 8,
        }
    }
}
