//! Deferred transform output.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::matrix::{Layout, Matrix};
use std::fmt;

type Compute<'a, O> = Box<dyn Fn() -> Vec<O> + Send + Sync + 'a>;

/// A validated transform of one input, run on every [`eval`](Self::eval).
///
/// The shape and layout are those of the input the result was made from.
pub struct TransformResult<'a, O> {
    rows: usize,
    cols: usize,
    layout: Layout,
    compute: Compute<'a, O>,
}

impl<'a, O> TransformResult<'a, O> {
    pub(crate) fn new<X>(
        like: &Matrix<X>,
        compute: impl Fn() -> Vec<O> + Send + Sync + 'a,
    ) -> Self {
        Self {
            rows: like.rows(),
            cols: like.cols(),
            layout: like.layout(),
            compute: Box::new(compute),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Executes the transform into a fresh matrix.
    pub fn eval(&self) -> Matrix<O> {
        Matrix::from_storage(self.rows, self.cols, self.layout, (self.compute)())
    }

    pub fn into_matrix(self) -> Matrix<O> {
        self.eval()
    }
}

impl<'a, O> fmt::Debug for TransformResult<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformResult")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("layout", &self.layout)
            .finish()
    }
}
