//! Cache keys: everything that makes two transform requests share a plan.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::{Direction, PlanRequest, Shape, TransformKind};

/// Byte boundary of the widest vector loads engines are assumed to use.
pub const ALIGN_BOUNDARY: usize = 64;

/// Offset of `addr` past the previous multiple of `boundary`.
///
/// # Panics
/// Panics unless `boundary` is a power of two no larger than
/// [`ALIGN_BOUNDARY`]; packed keys hold six bits per class.
pub fn align_class(addr: usize, boundary: usize) -> u8 {
    assert!(
        is_valid_boundary(boundary),
        "alignment boundary {} is not a power of two up to {}",
        boundary,
        ALIGN_BOUNDARY
    );
    (addr & (boundary - 1)) as u8
}

pub(crate) fn is_valid_boundary(boundary: usize) -> bool {
    boundary.is_power_of_two() && boundary <= ALIGN_BOUNDARY
}

/// Where the buffers of one execution live, up to their alignment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    pub inplace: bool,
    pub in_align: u8,
    pub out_align: u8,
}

impl Placement {
    /// In-place iff both buffers start at the same address.
    pub fn of<A, B>(input: &[A], output: &[B], boundary: usize) -> Self {
        let input = input.as_ptr() as usize;
        let output = output.as_ptr() as usize;
        Self {
            inplace: input == output,
            in_align: align_class(input, boundary),
            out_align: align_class(output, boundary),
        }
    }

    pub fn inplace<A>(buffer: &[A], boundary: usize) -> Self {
        let class = align_class(buffer.as_ptr() as usize, boundary);
        Self {
            inplace: true,
            in_align: class,
            out_align: class,
        }
    }

    fn pack(&self, forward: bool, kind: TransformKind, size: usize) -> u64 {
        forward as u64
            | (self.inplace as u64) << 1
            | (self.in_align as u64) << 2
            | (self.out_align as u64) << 8
            | (kind.code() as u64) << 16
            | (size as u64) << 32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeKey1D {
    pub size: usize,
    pub kind: TransformKind,
    pub direction: Direction,
    pub placement: Placement,
}

impl ShapeKey1D {
    pub fn new(
        size: usize,
        kind: TransformKind,
        direction: Direction,
        placement: Placement,
    ) -> Self {
        Self {
            size,
            kind,
            direction,
            placement,
        }
    }

    /// Single-word form of the key, for logs and compact storage.
    pub fn packed(&self) -> u64 {
        self.placement
            .pack(self.direction == Direction::Forward, self.kind, self.size)
    }

    pub fn request(&self) -> PlanRequest {
        PlanRequest::new(Shape::One(self.size), self.kind, self.direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeKey2D {
    pub size: (usize, usize),
    pub kind: TransformKind,
    pub direction: Direction,
    pub placement: Placement,
}

impl ShapeKey2D {
    pub fn new(
        size: (usize, usize),
        kind: TransformKind,
        direction: Direction,
        placement: Placement,
    ) -> Self {
        Self {
            size,
            kind,
            direction,
            placement,
        }
    }

    /// The leading dimension packed like a 1-D key, the trailing one as is.
    pub fn packed(&self) -> (u64, u64) {
        let first = self
            .placement
            .pack(self.direction == Direction::Forward, self.kind, self.size.0);
        (first, self.size.1 as u64)
    }

    pub fn request(&self) -> PlanRequest {
        PlanRequest::new(
            Shape::Two(self.size.0, self.size.1),
            self.kind,
            self.direction,
        )
    }
}
