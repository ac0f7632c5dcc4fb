//! Errors reported by the transform front-ends.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Malformed requests rejected before anything reaches an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("cannot transform an empty matrix")]
    Empty,

    #[error("1-D transform needs a row or column vector, got {rows}x{cols}")]
    NotAVector { rows: usize, cols: usize },

    #[error("{kind} is undefined for {len} samples")]
    InvalidLength { kind: &'static str, len: usize },

    #[error("data holds {got} elements, shape needs {expected}")]
    ShapeMismatch { expected: usize, got: usize },
}
