//! Tolerance-based equality for test assertions.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/.

mod complex;

#[macro_use]
mod assert;

pub trait NearlyEq {
    fn nearly_eq(&self, other: &Self) -> bool;
}

/// Absolute tolerance for values of magnitude up to one, relative beyond.
fn within<T: num_traits::Float>(a: T, b: T, eps: T) -> bool {
    if a == b {
        return true;
    }
    let scale = T::one().max(a.abs()).max(b.abs());
    (a - b).abs() <= eps * scale
}

impl NearlyEq for f32 {
    fn nearly_eq(&self, other: &f32) -> bool {
        within(*self, *other, 1e-3)
    }
}

impl NearlyEq for f64 {
    fn nearly_eq(&self, other: &f64) -> bool {
        within(*self, *other, 1e-9)
    }
}

impl<T: NearlyEq> NearlyEq for [T] {
    fn nearly_eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.nearly_eq(b))
    }
}

impl<T: NearlyEq> NearlyEq for Vec<T> {
    fn nearly_eq(&self, other: &Vec<T>) -> bool {
        self.as_slice().nearly_eq(other.as_slice())
    }
}
