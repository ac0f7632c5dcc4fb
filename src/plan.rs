//! A single lazily built transform handle.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::engine::{Engine, NativeEngine};
use crate::{Direction, Effort, PlanRequest, R2rKind, Shape, TransformKind};
use num_complex::Complex;
use parking_lot::Mutex;
use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::debug;

/// Owns at most one engine handle, built from the first request made
/// through it.
///
/// The handle is published through a [`OnceLock`], so once built every
/// execution reads it without locking. Construction is serialized by the
/// external planning lock when one is supplied (engines may keep global
/// planning state); without one the caller guarantees that builds are not
/// concurrent with other builds on the same engine.
///
/// Buffer lengths are trusted: they must match the shape passed to the
/// executor, and every call must describe the request that built the plan.
pub struct Plan<'e, T, E: Engine<T> = NativeEngine> {
    engine: &'e E,
    lock: Option<&'e Mutex<()>>,
    effort: Effort,
    slot: OnceLock<(PlanRequest, E::Handle)>,
    _scalar: PhantomData<fn() -> T>,
}

impl<'e, T, E: Engine<T>> Plan<'e, T, E> {
    pub fn new(engine: &'e E) -> Self {
        Self {
            engine,
            lock: None,
            effort: Effort::default(),
            slot: OnceLock::new(),
            _scalar: PhantomData,
        }
    }

    /// A plan whose first build takes `lock`.
    pub fn with_lock(engine: &'e E, lock: &'e Mutex<()>) -> Self {
        Self {
            lock: Some(lock),
            ..Self::new(engine)
        }
    }

    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    pub fn is_built(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The request the handle was built for, once it exists.
    pub fn request(&self) -> Option<&PlanRequest> {
        self.slot.get().map(|(request, _)| request)
    }

    fn handle(&self, request: PlanRequest) -> &E::Handle {
        let (built, handle) = match self.slot.get() {
            Some(slot) => slot,
            None => match self.lock {
                Some(lock) => {
                    let _guard = lock.lock();
                    self.slot.get_or_init(|| self.build(request))
                }
                None => self.slot.get_or_init(|| self.build(request)),
            },
        };
        debug_assert_eq!(*built, request, "plan reused for a different request");
        handle
    }

    fn build(&self, request: PlanRequest) -> (PlanRequest, E::Handle) {
        let started = Instant::now();
        let handle = match self.engine.build(&request, self.effort) {
            Some(handle) => handle,
            None => panic!("null plan handle for {:?}", request),
        };
        debug!(
            ?request,
            effort = ?self.effort,
            elapsed = ?started.elapsed(),
            "built private plan"
        );
        (request, handle)
    }

    pub fn c2c(
        &self,
        shape: Shape,
        direction: Direction,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) {
        let handle = self.handle(PlanRequest::new(shape, TransformKind::C2c, direction));
        self.engine.execute_c2c(handle, input, output);
    }

    pub fn c2c_inplace(&self, shape: Shape, direction: Direction, buffer: &mut [Complex<T>]) {
        let handle = self.handle(PlanRequest::new(shape, TransformKind::C2c, direction));
        self.engine.execute_c2c_inplace(handle, buffer);
    }

    pub fn r2c(&self, shape: Shape, input: &[T], output: &mut [Complex<T>]) {
        let handle = self.handle(PlanRequest::new(
            shape,
            TransformKind::R2c,
            Direction::Forward,
        ));
        self.engine.execute_r2c(handle, input, output);
    }

    /// Destroys `input`.
    pub fn c2r(&self, shape: Shape, input: &mut [Complex<T>], output: &mut [T]) {
        let handle = self.handle(PlanRequest::new(
            shape,
            TransformKind::C2r,
            Direction::Inverse,
        ));
        self.engine.execute_c2r(handle, input, output);
    }

    pub fn r2r(&self, shape: Shape, kind: R2rKind, input: &[T], output: &mut [T]) {
        let handle = self.handle(PlanRequest::new(
            shape,
            TransformKind::R2r(kind),
            Direction::Forward,
        ));
        self.engine.execute_r2r(handle, input, output);
    }
}

impl<'e, T, E: Engine<T>> fmt::Debug for Plan<'e, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("effort", &self.effort)
            .field("locked", &self.lock.is_some())
            .field("request", &self.request())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingEngine;
    use std::thread;

    #[test]
    fn builds_on_first_use_only() {
        let engine = CountingEngine::default();
        let plan = Plan::new(&engine);
        assert!(!plan.is_built());
        assert!(plan.request().is_none());

        let input = vec![Complex::new(1.0, 0.0); 8];
        let mut output = vec![Complex::new(0.0, 0.0); 8];
        for _ in 0..3 {
            plan.c2c(Shape::One(8), Direction::Forward, &input, &mut output);
        }
        assert!(plan.is_built());
        assert_eq!(engine.builds(), 1);
        assert_eq!(
            plan.request(),
            Some(&PlanRequest::new(
                Shape::One(8),
                TransformKind::C2c,
                Direction::Forward
            ))
        );

        let mut expected = vec![Complex::new(0.0, 0.0); 8];
        expected[0] = Complex::new(8.0, 0.0);
        assert_nearly_eq!(&output, &expected);
    }

    #[test]
    fn locked_plan_builds_once_under_contention() {
        let engine = CountingEngine::default();
        let lock = Mutex::new(());
        let plan = Plan::with_lock(&engine, &lock);
        let input = (0..16).map(f64::from).collect::<Vec<_>>();

        let outputs = thread::scope(|s| {
            let workers = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        let mut spectrum = vec![Complex::new(0.0, 0.0); 9];
                        plan.r2c(Shape::One(16), &input, &mut spectrum);
                        spectrum
                    })
                })
                .collect::<Vec<_>>();
            workers
                .into_iter()
                .map(|w| w.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(engine.builds(), 1);
        for spectrum in &outputs[1..] {
            assert_nearly_eq!(spectrum, &outputs[0]);
        }
        assert_nearly_eq!(&outputs[0][0], &Complex::new(120.0, 0.0));
    }

    #[test]
    fn c2r_round_trip_scales_by_len() {
        let engine = NativeEngine::new();
        let forward = Plan::new(&engine).with_effort(Effort::Measure);
        let backward = Plan::new(&engine);
        let input = vec![0.5, -1.0, 2.0, 3.5, 0.25, 4.0];

        let mut spectrum = vec![Complex::new(0.0, 0.0); 4];
        forward.r2c(Shape::One(6), &input, &mut spectrum);
        let mut back = vec![0.0; 6];
        backward.c2r(Shape::One(6), &mut spectrum, &mut back);

        let expected = input.iter().map(|x| x * 6.0).collect::<Vec<_>>();
        assert_nearly_eq!(&back, &expected);
    }

    #[test]
    fn trig_plan_and_inplace_plan() {
        let engine = NativeEngine::new();
        let plan = Plan::<f64>::new(&engine);
        let mut out = vec![0.0; 4];
        plan.r2r(Shape::One(4), R2rKind::Dct2, &[1.0, 1.0, 1.0, 1.0], &mut out);
        assert_nearly_eq!(&out, &vec![8.0, 0.0, 0.0, 0.0]);

        let inplace = Plan::<f64>::new(&engine);
        let mut buffer = vec![Complex::new(0.0, 0.0); 6];
        buffer[0] = Complex::new(1.0, 0.0);
        inplace.c2c_inplace(Shape::Two(2, 3), Direction::Inverse, &mut buffer);
        assert_nearly_eq!(&buffer, &vec![Complex::new(1.0, 0.0); 6]);
    }

    #[test]
    #[should_panic(expected = "null plan handle")]
    fn failed_build_is_fatal() {
        let engine = NativeEngine::new();
        let plan = Plan::<f64>::new(&engine);
        let mut out = vec![0.0; 1];
        plan.r2r(Shape::One(1), R2rKind::Dct1, &[1.0], &mut out);
    }
}
