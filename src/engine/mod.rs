//! Transform engines: the boundary between plan bookkeeping and numerics.
//!
//! An [`Engine`] builds opaque handles for a [`PlanRequest`] and executes
//! them on caller buffers. Building may be slow and is done once per key by
//! [`crate::Plan`] or [`crate::PlanCache`]; executing must be safe to call
//! concurrently with the same handle.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

mod chirpz;
mod complex;
mod mixed_radix;
mod native;
mod precompute_utils;
mod prime_factorization;
mod real;
mod trig;

pub use self::complex::Algorithm;
pub use self::native::{NativeEngine, NativePlan};

use crate::{Effort, PlanRequest};
use num_complex::Complex;

/// A backend able to build and run transform plans for scalar type `T`.
///
/// Handles are never destroyed while their cache lives, so `build` may
/// allocate freely. Execute methods receive exactly the buffer lengths the
/// request implies: `shape.len()` on the full side and
/// `shape.spectrum_len()` on the half-spectrum side of real transforms.
/// Output is never normalized.
pub trait Engine<T>: Send + Sync {
    type Handle: Send + Sync;

    /// Byte boundary used to classify buffer placement in cache keys. Must
    /// be a power of two no larger than [`ALIGN_BOUNDARY`](crate::ALIGN_BOUNDARY);
    /// [`PlanCache`](crate::PlanCache) refuses engines reporting anything else.
    fn alignment(&self) -> usize {
        crate::ALIGN_BOUNDARY
    }

    /// Builds a handle, or `None` when the engine cannot realise the
    /// request (zero-length dimensions, DCT-I below two samples, ...).
    ///
    /// Builds on one engine may overlap: caches lock per arity and private
    /// plans lock per front-end context, never per engine. State shared
    /// between builds must be synchronised by the engine itself.
    fn build(&self, request: &PlanRequest, effort: Effort) -> Option<Self::Handle>;

    fn execute_c2c(&self, handle: &Self::Handle, input: &[Complex<T>], output: &mut [Complex<T>]);

    fn execute_c2c_inplace(&self, handle: &Self::Handle, buffer: &mut [Complex<T>]);

    fn execute_r2c(&self, handle: &Self::Handle, input: &[T], output: &mut [Complex<T>]);

    /// The complex input is scratch space: its contents are unspecified
    /// afterwards.
    fn execute_c2r(&self, handle: &Self::Handle, input: &mut [Complex<T>], output: &mut [T]);

    fn execute_r2r(&self, handle: &Self::Handle, input: &[T], output: &mut [T]);
}
