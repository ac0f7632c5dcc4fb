//! Pure-Rust engine built on the mixed-radix, chirp-z, real and
//! trigonometric kernels of this module.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use super::complex::{Algorithm, ComplexKernel};
use super::real::RealKernel;
use super::trig::TrigKernel;
use super::Engine;
use crate::{Direction, Effort, PlanRequest, Shape, TransformKind};
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::NumAssign;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::mem;
use std::time::{Duration, Instant};
use tracing::trace;

/// Measured kernel choices, keyed by complex length and scalar width.
type Wisdom = HashMap<(usize, usize), Algorithm>;

/// The bundled engine.
///
/// Efforts above [`Effort::Estimate`] time every candidate complex kernel
/// and remember the winner per length; later builds of any effort reuse
/// what was learned.
#[derive(Debug, Default)]
pub struct NativeEngine {
    wisdom: Mutex<Wisdom>,
}

#[derive(Debug)]
enum Body<T> {
    Complex1(ComplexKernel<T>),
    Complex2 {
        rows: ComplexKernel<T>,
        cols: ComplexKernel<T>,
    },
    Real1(RealKernel<T>),
    /// Rows are real transforms along `n1`, columns complex along `n0`.
    Real2 {
        rows: RealKernel<T>,
        cols: ComplexKernel<T>,
    },
    Trig1(TrigKernel<T>),
    Trig2 {
        rows: TrigKernel<T>,
        cols: TrigKernel<T>,
    },
}

/// Handle produced by [`NativeEngine`].
#[derive(Debug)]
pub struct NativePlan<T> {
    request: PlanRequest,
    body: Body<T>,
}

impl<T> NativePlan<T> {
    pub fn request(&self) -> &PlanRequest {
        &self.request
    }

    fn is_inverse(&self) -> bool {
        self.request.direction == Direction::Inverse
    }

    fn mismatch(&self, call: &str) -> ! {
        panic!("{} called with a plan for {:?}", call, self.request)
    }
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kernel family previously measured for complex transforms of `len`
    /// samples of `T`.
    pub fn remembered<T>(&self, len: usize) -> Option<Algorithm> {
        self.wisdom.lock().get(&(len, mem::size_of::<T>())).copied()
    }

    /// Drops everything measured so far.
    pub fn forget(&self) {
        self.wisdom.lock().clear();
    }

    fn complex_kernel<T>(&self, len: usize, effort: Effort) -> ComplexKernel<T>
    where
        T: Float + FloatConst + NumAssign,
    {
        if len <= 1 {
            return ComplexKernel::with_algorithm(len, Algorithm::Identity);
        }
        let key = (len, mem::size_of::<T>());
        let known = self.wisdom.lock().get(&key).copied();
        if let Some(algorithm) = known {
            trace!(len, ?algorithm, "complex kernel from wisdom");
            return ComplexKernel::with_algorithm(len, algorithm);
        }

        match effort.repetitions() {
            0 => ComplexKernel::estimate(len),
            repetitions => {
                // measured without the lock held; a racing build of the same
                // length at worst measures twice
                let kernel = measure::<T>(len, repetitions);
                self.wisdom.lock().insert(key, kernel.algorithm());
                kernel
            }
        }
    }

    // Runs a throwaway 2-D c2r execution so measured kernels are warm and
    // the handle is known to work before it is published.
    fn rehearse_c2r<T>(&self, plan: &NativePlan<T>)
    where
        T: Float + FloatConst + NumAssign + Send + Sync,
    {
        let shape = plan.request.shape;
        let mut scratch_in = vec![Complex::<T>::new(zero(), zero()); shape.spectrum_len()];
        let mut scratch_out = vec![T::zero(); shape.len()];
        self.execute_c2r(plan, &mut scratch_in, &mut scratch_out);
        trace!(?shape, "rehearsed complex-to-real plan");
    }
}

fn measure<T>(len: usize, repetitions: usize) -> ComplexKernel<T>
where
    T: Float + FloatConst + NumAssign,
{
    let fill = Complex::<T>::new(T::one(), zero());
    let mut buffer = vec![fill; len];
    let mut best: Option<(Duration, ComplexKernel<T>)> = None;

    for &algorithm in &[Algorithm::MixedRadix, Algorithm::ChirpZ] {
        let kernel = ComplexKernel::with_algorithm(len, algorithm);
        let started = Instant::now();
        for _ in 0..repetitions {
            buffer.iter_mut().for_each(|c| *c = fill);
            kernel.process_inplace(&mut buffer, false);
        }
        let elapsed = started.elapsed();
        trace!(len, ?algorithm, ?elapsed, "measured complex kernel");
        if best.as_ref().map_or(true, |(fastest, _)| elapsed < *fastest) {
            best = Some((elapsed, kernel));
        }
    }

    match best {
        Some((_, kernel)) => kernel,
        None => ComplexKernel::estimate(len),
    }
}

/// Applies `f` to every column of the row-major `n0 × n1` plane `data`.
fn for_each_column<C: Copy>(data: &mut [C], n1: usize, mut f: impl FnMut(&mut [C])) {
    let mut column = Vec::with_capacity(data.len() / n1);
    for j in 0..n1 {
        column.clear();
        column.extend(data[j..].iter().step_by(n1).copied());
        f(&mut column);
        for (dst, &src) in data[j..].iter_mut().step_by(n1).zip(column.iter()) {
            *dst = src;
        }
    }
}

impl<T> Engine<T> for NativeEngine
where
    T: Float + FloatConst + NumAssign + Send + Sync,
{
    type Handle = NativePlan<T>;

    /// The kernels only rely on natural alignment.
    fn alignment(&self) -> usize {
        mem::align_of::<T>()
    }

    fn build(&self, request: &PlanRequest, effort: Effort) -> Option<NativePlan<T>> {
        if !request.is_buildable() {
            return None;
        }
        let kernel = |len| self.complex_kernel::<T>(len, effort);

        let body = match (request.kind, request.shape) {
            (TransformKind::C2c, Shape::One(n)) => Body::Complex1(kernel(n)),
            (TransformKind::C2c, Shape::Two(n0, n1)) => Body::Complex2 {
                rows: kernel(n1),
                cols: kernel(n0),
            },
            (TransformKind::R2c, Shape::One(n)) | (TransformKind::C2r, Shape::One(n)) => {
                Body::Real1(RealKernel::new(n, kernel))
            }
            (TransformKind::R2c, Shape::Two(n0, n1)) | (TransformKind::C2r, Shape::Two(n0, n1)) => {
                Body::Real2 {
                    rows: RealKernel::new(n1, kernel),
                    cols: kernel(n0),
                }
            }
            (TransformKind::R2r(kind), Shape::One(n)) => Body::Trig1(TrigKernel::new(kind, n, kernel)),
            (TransformKind::R2r(kind), Shape::Two(n0, n1)) => Body::Trig2 {
                rows: TrigKernel::new(kind, n1, kernel),
                cols: TrigKernel::new(kind, n0, kernel),
            },
        };

        let plan = NativePlan {
            request: *request,
            body,
        };
        if request.kind == TransformKind::C2r
            && matches!(request.shape, Shape::Two(..))
            && effort != Effort::Estimate
        {
            self.rehearse_c2r(&plan);
        }
        Some(plan)
    }

    fn execute_c2c(&self, plan: &NativePlan<T>, input: &[Complex<T>], output: &mut [Complex<T>]) {
        match plan.body {
            Body::Complex1(ref fft) => fft.process(input, output, plan.is_inverse()),
            Body::Complex2 { .. } => {
                output.copy_from_slice(input);
                self.execute_c2c_inplace(plan, output);
            }
            _ => plan.mismatch("execute_c2c"),
        }
    }

    fn execute_c2c_inplace(&self, plan: &NativePlan<T>, buffer: &mut [Complex<T>]) {
        let is_back = plan.is_inverse();
        match plan.body {
            Body::Complex1(ref fft) => fft.process_inplace(buffer, is_back),
            Body::Complex2 { ref rows, ref cols } => {
                for row in buffer.chunks_exact_mut(rows.len()) {
                    rows.process_inplace(row, is_back);
                }
                for_each_column(buffer, rows.len(), |column| {
                    cols.process_inplace(column, is_back)
                });
            }
            _ => plan.mismatch("execute_c2c_inplace"),
        }
    }

    fn execute_r2c(&self, plan: &NativePlan<T>, input: &[T], output: &mut [Complex<T>]) {
        match plan.body {
            Body::Real1(ref rfft) => rfft.forward(input, output),
            Body::Real2 { ref rows, ref cols } => {
                let half = rows.spectrum_len();
                for (src, dst) in input
                    .chunks_exact(rows.len())
                    .zip(output.chunks_exact_mut(half))
                {
                    rows.forward(src, dst);
                }
                for_each_column(output, half, |column| cols.process_inplace(column, false));
            }
            _ => plan.mismatch("execute_r2c"),
        }
    }

    fn execute_c2r(&self, plan: &NativePlan<T>, input: &mut [Complex<T>], output: &mut [T]) {
        match plan.body {
            Body::Real1(ref rfft) => rfft.backward(input, output),
            Body::Real2 { ref rows, ref cols } => {
                let half = rows.spectrum_len();
                for_each_column(input, half, |column| cols.process_inplace(column, true));
                for (src, dst) in input
                    .chunks_exact(half)
                    .zip(output.chunks_exact_mut(rows.len()))
                {
                    rows.backward(src, dst);
                }
            }
            _ => plan.mismatch("execute_c2r"),
        }
    }

    fn execute_r2r(&self, plan: &NativePlan<T>, input: &[T], output: &mut [T]) {
        match plan.body {
            Body::Trig1(ref trig) => trig.process(input, output),
            Body::Trig2 { ref rows, ref cols } => {
                for (src, dst) in input
                    .chunks_exact(rows.len())
                    .zip(output.chunks_exact_mut(rows.len()))
                {
                    rows.process(src, dst);
                }
                let mut transformed = vec![T::zero(); cols.len()];
                for_each_column(output, rows.len(), |column| {
                    cols.process(column, &mut transformed);
                    column.copy_from_slice(&transformed);
                });
            }
            _ => plan.mismatch("execute_r2r"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::R2rKind;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn rng() -> XorShiftRng {
        XorShiftRng::from_seed([
            0xDA, 0xE1, 0x4B, 0x0B, 0xFF, 0xC2, 0xFE, 0x64, 0x23, 0xFE, 0x3F, 0x51, 0x6D, 0x3E,
            0xA2, 0xF3,
        ])
    }

    fn request(shape: Shape, kind: TransformKind, direction: Direction) -> PlanRequest {
        PlanRequest::new(shape, kind, direction)
    }

    fn build(engine: &NativeEngine, request: PlanRequest) -> NativePlan<f64> {
        Engine::<f64>::build(engine, &request, Effort::Estimate).unwrap()
    }

    // Plain 2-D DFT over a row-major plane.
    fn dft2(source: &[Complex<f64>], n0: usize, n1: usize, sign: f64) -> Vec<Complex<f64>> {
        let pi = std::f64::consts::PI;
        let mut dest = vec![Complex::new(0.0, 0.0); n0 * n1];
        for k0 in 0..n0 {
            for k1 in 0..n1 {
                for j0 in 0..n0 {
                    for j1 in 0..n1 {
                        let phase = sign
                            * 2.0
                            * pi
                            * ((j0 * k0) as f64 / n0 as f64 + (j1 * k1) as f64 / n1 as f64);
                        dest[k0 * n1 + k1] += source[j0 * n1 + j1] * Complex::from_polar(1.0, phase);
                    }
                }
            }
        }
        dest
    }

    #[test]
    fn degenerate_requests_build_nothing() {
        let engine = NativeEngine::new();
        let dct1 = TransformKind::R2r(R2rKind::Dct1);
        let built: Option<NativePlan<f64>> =
            engine.build(&request(Shape::One(1), dct1, Direction::Forward), Effort::Estimate);
        assert!(built.is_none());
        let built: Option<NativePlan<f64>> = engine.build(
            &request(Shape::Two(3, 0), TransformKind::C2c, Direction::Forward),
            Effort::Estimate,
        );
        assert!(built.is_none());
    }

    #[test]
    fn c2c_2d_matches_dft() {
        let engine = NativeEngine::new();
        let mut rng = rng();
        for &(n0, n1) in &[(1, 1), (3, 4), (5, 7), (8, 2)] {
            let source = (0..n0 * n1)
                .map(|_| Complex::new(rng.gen::<f64>(), rng.gen::<f64>()))
                .collect::<Vec<_>>();
            for &(direction, sign) in &[(Direction::Forward, -1.0), (Direction::Inverse, 1.0)] {
                let plan = build(
                    &engine,
                    request(Shape::Two(n0, n1), TransformKind::C2c, direction),
                );
                let mut dest = vec![Complex::new(0.0, 0.0); n0 * n1];
                engine.execute_c2c(&plan, &source, &mut dest);
                assert_nearly_eq!(&dest, &dft2(&source, n0, n1, sign));
            }
        }
    }

    #[test]
    fn r2c_2d_is_leading_half_of_full_spectrum() {
        let engine = NativeEngine::new();
        let mut rng = rng();
        let (n0, n1) = (6, 5);
        let h = n1 / 2 + 1;
        let source = (0..n0 * n1).map(|_| rng.gen::<f64>()).collect::<Vec<_>>();
        let full = dft2(
            &source.iter().map(|&x| Complex::new(x, 0.0)).collect::<Vec<_>>(),
            n0,
            n1,
            -1.0,
        );

        let plan = build(&engine, request(Shape::Two(n0, n1), TransformKind::R2c, Direction::Forward));
        let mut half = vec![Complex::new(0.0, 0.0); n0 * h];
        engine.execute_r2c(&plan, &source, &mut half);
        let expected = full
            .chunks_exact(n1)
            .flat_map(|row| row[..h].iter().copied())
            .collect::<Vec<_>>();
        assert_nearly_eq!(&half, &expected);

        let back_plan = build(&engine, request(Shape::Two(n0, n1), TransformKind::C2r, Direction::Inverse));
        let mut back = vec![0.0; n0 * n1];
        engine.execute_c2r(&back_plan, &mut half, &mut back);
        let scaled = source.iter().map(|x| x * (n0 * n1) as f64).collect::<Vec<_>>();
        assert_nearly_eq!(&back, &scaled);
    }

    #[test]
    fn r2r_2d_is_separable() {
        let engine = NativeEngine::new();
        let (n0, n1) = (3, 4);
        let kind = R2rKind::Dct2;
        let source = (0..n0 * n1).map(|x| x as f64).collect::<Vec<_>>();
        let plan = build(
            &engine,
            request(Shape::Two(n0, n1), TransformKind::R2r(kind), Direction::Forward),
        );
        let mut dest = vec![0.0; n0 * n1];
        engine.execute_r2r(&plan, &source, &mut dest);

        let rows = TrigKernel::<f64>::new(kind, n1, ComplexKernel::estimate);
        let cols = TrigKernel::<f64>::new(kind, n0, ComplexKernel::estimate);
        let mut expected = vec![0.0; n0 * n1];
        for (src, dst) in source.chunks_exact(n1).zip(expected.chunks_exact_mut(n1)) {
            rows.process(src, dst);
        }
        for j in 0..n1 {
            let column = (0..n0).map(|i| expected[i * n1 + j]).collect::<Vec<_>>();
            let mut out = vec![0.0; n0];
            cols.process(&column, &mut out);
            for i in 0..n0 {
                expected[i * n1 + j] = out[i];
            }
        }
        assert_nearly_eq!(&dest, &expected);
    }

    #[test]
    fn overlapping_builds_share_one_engine() {
        let engine = NativeEngine::new();
        let source = (0..45).map(|x| Complex::new(x as f64, 1.0)).collect::<Vec<_>>();
        let mut expected = vec![Complex::new(0.0, 0.0); 45];
        ComplexKernel::<f64>::estimate(45).process(&source, &mut expected, false);

        std::thread::scope(|s| {
            for effort in [Effort::Measure, Effort::Patient, Effort::Estimate, Effort::Measure] {
                let (engine, source, expected) = (&engine, &source, &expected);
                s.spawn(move || {
                    let plan: NativePlan<f64> = engine
                        .build(
                            &request(Shape::One(45), TransformKind::C2c, Direction::Forward),
                            effort,
                        )
                        .unwrap();
                    let mut output = vec![Complex::new(0.0, 0.0); 45];
                    engine.execute_c2c(&plan, source, &mut output);
                    assert_nearly_eq!(&output, expected);
                });
            }
        });
        assert!(engine.remembered::<f64>(45).is_some());
    }

    #[test]
    fn measuring_leaves_wisdom_behind() {
        let engine = NativeEngine::new();
        assert_eq!(engine.remembered::<f64>(30), None);
        let plan: NativePlan<f64> = engine
            .build(
                &request(Shape::One(30), TransformKind::C2c, Direction::Forward),
                Effort::Measure,
            )
            .unwrap();
        assert!(engine.remembered::<f64>(30).is_some());
        assert_eq!(engine.remembered::<f32>(30), None);

        let mut rng = rng();
        let source = (0..30)
            .map(|_| Complex::new(rng.gen::<f64>(), rng.gen::<f64>()))
            .collect::<Vec<_>>();
        let mut measured = vec![Complex::new(0.0, 0.0); 30];
        let mut estimated = vec![Complex::new(0.0, 0.0); 30];
        engine.execute_c2c(&plan, &source, &mut measured);
        ComplexKernel::<f64>::estimate(30).process(&source, &mut estimated, false);
        assert_nearly_eq!(&measured, &estimated);

        engine.forget();
        assert_eq!(engine.remembered::<f64>(30), None);
    }

    #[test]
    fn measured_c2r_2d_plan_still_works() {
        let engine = NativeEngine::new();
        let (n0, n1) = (4, 6);
        let h = n1 / 2 + 1;
        let plan: NativePlan<f64> = engine
            .build(
                &request(Shape::Two(n0, n1), TransformKind::C2r, Direction::Inverse),
                Effort::Patient,
            )
            .unwrap();
        // a lone DC term inverts to a constant plane
        let mut spectrum = vec![Complex::new(0.0, 0.0); n0 * h];
        spectrum[0] = Complex::new(1.0, 0.0);
        let mut dest = vec![0.0; n0 * n1];
        engine.execute_c2r(&plan, &mut spectrum, &mut dest);
        assert_nearly_eq!(&dest, &vec![1.0; n0 * n1]);
    }

    #[test]
    #[should_panic(expected = "execute_r2r called with a plan for")]
    fn mismatched_execute_panics() {
        let engine = NativeEngine::new();
        let plan = build(&engine, request(Shape::One(4), TransformKind::C2c, Direction::Forward));
        let mut dest = vec![0.0; 4];
        engine.execute_r2r(&plan, &[0.0; 4], &mut dest);
    }
}
