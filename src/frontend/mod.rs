//! Matrix-level transforms on top of the plan layer.
//!
//! A [`Fourier`] context validates its input eagerly and hands back a
//! [`TransformResult`] that runs the transform each time it is evaluated.
//! Inputs are copied when the result is created, so caller data is never
//! touched, including by engines that consume the input of inverse real
//! transforms.
//!
//! Column-major matrices are passed to the engine as their storage buffer,
//! which is the row-major plane of the transposed matrix. Every transform
//! here is separable with the same kernel on both axes, so transforming the
//! transposed plane and keeping the layout gives the transform of the
//! logical matrix. Half-spectrum bookkeeping runs in those native
//! coordinates too.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

mod fft;
mod hermitian;
mod result;
mod trig;

pub use self::result::TransformResult;
pub use self::trig::{DctType, DstType};

use crate::cache::PlanCache;
use crate::engine::{Engine, NativeEngine};
use crate::error::{Result, TransformError};
use crate::matrix::Matrix;
use crate::plan::Plan;
use crate::scalar::Scalar;
use crate::shape_key::Placement;
use crate::{Direction, Effort, PlanRequest, R2rKind, Shape, TransformKind};
use num_complex::Complex;
use num_traits::cast;
use parking_lot::Mutex;
use std::fmt;

enum Source<'c, T, E: Engine<T>> {
    Cache(&'c PlanCache<T, E>),
    Engine(&'c E),
}

/// Entry point for matrix transforms.
///
/// * [`Fourier::cached`] plans through a [`PlanCache`], sharing handles
///   with every other user of that cache;
/// * [`Fourier::private`] gives every result its own [`Plan`], built on
///   first evaluation under this context's planning lock;
/// * [`Fourier::global`] uses the process-wide cache of the scalar type.
pub struct Fourier<'c, T, E: Engine<T> = NativeEngine> {
    source: Source<'c, T, E>,
    effort: Option<Effort>,
    planning_lock: Mutex<()>,
}

impl<T: Scalar> Fourier<'static, T> {
    pub fn global() -> Self {
        Self::cached(T::global_cache())
    }
}

impl<'c, T, E: Engine<T>> Fourier<'c, T, E> {
    pub fn cached(cache: &'c PlanCache<T, E>) -> Self {
        Self {
            source: Source::Cache(cache),
            effort: None,
            planning_lock: Mutex::new(()),
        }
    }

    pub fn private(engine: &'c E) -> Self {
        Self {
            source: Source::Engine(engine),
            effort: None,
            planning_lock: Mutex::new(()),
        }
    }

    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = Some(effort);
        self
    }

    /// Effort used for builds: the explicit one, else the cache's default.
    pub fn effort(&self) -> Effort {
        match (self.effort, &self.source) {
            (Some(effort), _) => effort,
            (None, Source::Cache(cache)) => cache.config().effort,
            (None, Source::Engine(_)) => Effort::default(),
        }
    }

    fn runner(&self) -> Runner<'_, T, E> {
        match self.source {
            Source::Cache(cache) => Runner::Cached {
                cache,
                effort: self.effort(),
            },
            Source::Engine(engine) => Runner::Private(
                Plan::with_lock(engine, &self.planning_lock).with_effort(self.effort()),
            ),
        }
    }
}

impl<'c, T, E: Engine<T>> fmt::Debug for Fourier<'c, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Source::Cache(_) => "cached",
            Source::Engine(_) => "private",
        };
        f.debug_struct("Fourier")
            .field("source", &source)
            .field("effort", &self.effort())
            .finish()
    }
}

/// How one result reaches its handle.
enum Runner<'a, T, E: Engine<T>> {
    Cached { cache: &'a PlanCache<T, E>, effort: Effort },
    Private(Plan<'a, T, E>),
}

impl<'a, T, E: Engine<T>> Runner<'a, T, E> {
    fn c2c(&self, shape: Shape, direction: Direction, input: &[Complex<T>], output: &mut [Complex<T>]) {
        match self {
            Runner::Cached { cache, effort } => {
                let request = PlanRequest::new(shape, TransformKind::C2c, direction);
                let placement = Placement::of(input, output, cache.engine().alignment());
                let handle = cache.add(&request, placement, *effort);
                cache.engine().execute_c2c(&handle, input, output);
            }
            Runner::Private(plan) => plan.c2c(shape, direction, input, output),
        }
    }

    fn r2c(&self, shape: Shape, input: &[T], output: &mut [Complex<T>]) {
        match self {
            Runner::Cached { cache, effort } => {
                let request = PlanRequest::new(shape, TransformKind::R2c, Direction::Forward);
                let placement = Placement::of(input, output, cache.engine().alignment());
                let handle = cache.add(&request, placement, *effort);
                cache.engine().execute_r2c(&handle, input, output);
            }
            Runner::Private(plan) => plan.r2c(shape, input, output),
        }
    }

    fn c2r(&self, shape: Shape, input: &mut [Complex<T>], output: &mut [T]) {
        match self {
            Runner::Cached { cache, effort } => {
                let request = PlanRequest::new(shape, TransformKind::C2r, Direction::Inverse);
                let placement = Placement::of(input, output, cache.engine().alignment());
                let handle = cache.add(&request, placement, *effort);
                cache.engine().execute_c2r(&handle, input, output);
            }
            Runner::Private(plan) => plan.c2r(shape, input, output),
        }
    }

    fn r2r(&self, shape: Shape, kind: R2rKind, input: &[T], output: &mut [T]) {
        match self {
            Runner::Cached { cache, effort } => {
                let request = PlanRequest::new(shape, TransformKind::R2r(kind), Direction::Forward);
                let placement = Placement::of(input, output, cache.engine().alignment());
                let handle = cache.add(&request, placement, *effort);
                cache.engine().execute_r2r(&handle, input, output);
            }
            Runner::Private(plan) => plan.r2r(shape, kind, input, output),
        }
    }
}

/// Length of a non-empty row or column vector.
fn vector_len<X>(input: &Matrix<X>) -> Result<usize> {
    if input.is_empty() {
        return Err(TransformError::Empty);
    }
    if !input.is_vector() {
        return Err(TransformError::NotAVector {
            rows: input.rows(),
            cols: input.cols(),
        });
    }
    Ok(input.len())
}

/// Native dimensions of a non-empty matrix.
fn plane_dims<X>(input: &Matrix<X>) -> Result<(usize, usize)> {
    if input.is_empty() {
        return Err(TransformError::Empty);
    }
    Ok(input.native_dims())
}

/// Multiplies every element by `1 / divisor`.
fn normalize<X, T>(data: &mut [X], divisor: usize)
where
    X: std::ops::MulAssign<T>,
    T: Scalar,
{
    let factor = T::one() / cast::<_, T>(divisor).unwrap();
    for x in data.iter_mut() {
        *x *= factor;
    }
}
