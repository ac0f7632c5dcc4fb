//! Engine test double shared by the unit tests.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::engine::{Engine, NativeEngine};
use crate::{Effort, PlanRequest};
use num_complex::Complex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Delegates to the native engine, counting builds and making each one
/// slow enough for racing threads to overlap.
#[derive(Debug, Default)]
pub struct CountingEngine {
    inner: NativeEngine,
    builds: AtomicUsize,
    alignment: Option<usize>,
}

impl CountingEngine {
    /// Reports `alignment` instead of the native engine's boundary.
    pub fn with_alignment(alignment: usize) -> Self {
        Self {
            alignment: Some(alignment),
            ..Self::default()
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl Engine<f64> for CountingEngine {
    type Handle = <NativeEngine as Engine<f64>>::Handle;

    fn alignment(&self) -> usize {
        self.alignment
            .unwrap_or_else(|| Engine::<f64>::alignment(&self.inner))
    }

    fn build(&self, request: &PlanRequest, effort: Effort) -> Option<Self::Handle> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        Engine::<f64>::build(&self.inner, request, effort)
    }

    fn execute_c2c(&self, h: &Self::Handle, i: &[Complex<f64>], o: &mut [Complex<f64>]) {
        self.inner.execute_c2c(h, i, o)
    }

    fn execute_c2c_inplace(&self, h: &Self::Handle, b: &mut [Complex<f64>]) {
        self.inner.execute_c2c_inplace(h, b)
    }

    fn execute_r2c(&self, h: &Self::Handle, i: &[f64], o: &mut [Complex<f64>]) {
        self.inner.execute_r2c(h, i, o)
    }

    fn execute_c2r(&self, h: &Self::Handle, i: &mut [Complex<f64>], o: &mut [f64]) {
        self.inner.execute_c2r(h, i, o)
    }

    fn execute_r2r(&self, h: &Self::Handle, i: &[f64], o: &mut [f64]) {
        self.inner.execute_r2r(h, i, o)
    }
}
