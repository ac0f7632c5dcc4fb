//! Dense two-dimensional container consumed and produced by the front-ends.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::error::{Result, TransformError};
use std::ops::Index;

/// Storage order of a [`Matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    RowMajor,
    ColMajor,
}

/// `rows × cols` elements stored contiguously in `layout` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    layout: Layout,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    pub fn from_vec(rows: usize, cols: usize, layout: Layout, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TransformError::ShapeMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            layout,
            data,
        })
    }

    pub(crate) fn from_storage(rows: usize, cols: usize, layout: Layout, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            rows,
            cols,
            layout,
            data,
        }
    }

    /// Row-major matrix from equally long rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let count = rows.len();
        let mut data = Vec::with_capacity(count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TransformError::ShapeMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Self::from_vec(count, cols, Layout::RowMajor, data)
    }

    /// `n × 1` matrix.
    pub fn column(data: Vec<T>) -> Self {
        Self {
            rows: data.len(),
            cols: 1,
            layout: Layout::RowMajor,
            data,
        }
    }

    /// `1 × n` matrix.
    pub fn row(data: Vec<T>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            layout: Layout::RowMajor,
            data,
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

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One row or one column (a `1 × 1` matrix is both).
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Dimensions of the storage buffer read as a row-major plane: the
    /// logical ones for row-major data, swapped for column-major data.
    pub fn native_dims(&self) -> (usize, usize) {
        match self.layout {
            Layout::RowMajor => (self.rows, self.cols),
            Layout::ColMajor => (self.cols, self.rows),
        }
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        match self.layout {
            Layout::RowMajor => row * self.cols + col,
            Layout::ColMajor => col * self.rows + row,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(self.offset(row, col))
        } else {
            None
        }
    }

    /// The storage buffer in `layout` order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element-wise image with the same shape and layout.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Copy holding the same logical elements stored in `layout` order.
    pub fn to_layout(&self, layout: Layout) -> Self {
        if layout == self.layout {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.data.len());
        match layout {
            Layout::RowMajor => {
                for row in 0..self.rows {
                    data.extend((0..self.cols).map(|col| self[(row, col)].clone()));
                }
            }
            Layout::ColMajor => {
                for col in 0..self.cols {
                    data.extend((0..self.rows).map(|row| self[(row, col)].clone()));
                }
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            layout,
            data,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[self.offset(row, col)]
    }
}
