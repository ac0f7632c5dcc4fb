//! Keyed store of built handles shared by every caller of one engine.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::engine::{Engine, NativeEngine};
use crate::shape_key::{is_valid_boundary, Placement, ShapeKey1D, ShapeKey2D};
use crate::{Effort, PlanRequest, Shape};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// Settings shared by everything that plans through one cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanCacheConfig {
    /// Effort front-ends request when they do not pick one themselves.
    pub effort: Effort,
}

impl PlanCacheConfig {
    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }
}

/// Get-or-build map from shape keys to engine handles.
///
/// 1-D and 2-D keys live in separate maps with separate locks. `add` holds
/// the lock of its arity across the whole look-up-or-build, so concurrent
/// requests for one key build exactly once. Stored handles are never
/// replaced or evicted; the `Arc`s handed out can be used without any lock.
pub struct PlanCache<T, E: Engine<T> = NativeEngine> {
    engine: E,
    config: PlanCacheConfig,
    plans_1d: Mutex<HashMap<ShapeKey1D, Arc<E::Handle>>>,
    plans_2d: Mutex<HashMap<ShapeKey2D, Arc<E::Handle>>>,
    _scalar: PhantomData<fn() -> T>,
}

impl<T, E: Engine<T>> PlanCache<T, E> {
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, PlanCacheConfig::default())
    }

    /// # Panics
    /// Panics if `engine.alignment()` is not a power of two up to
    /// [`ALIGN_BOUNDARY`](crate::ALIGN_BOUNDARY).
    pub fn with_config(engine: E, config: PlanCacheConfig) -> Self {
        let boundary = engine.alignment();
        assert!(
            is_valid_boundary(boundary),
            "engine alignment {} is not a power of two up to {}",
            boundary,
            crate::ALIGN_BOUNDARY
        );
        Self {
            engine,
            config,
            plans_1d: Mutex::new(HashMap::new()),
            plans_2d: Mutex::new(HashMap::new()),
            _scalar: PhantomData,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &PlanCacheConfig {
        &self.config
    }

    pub fn add_1d(&self, key: ShapeKey1D, how: Effort) -> Arc<E::Handle> {
        self.get_or_build(&self.plans_1d, key, key.request(), key.packed(), how)
    }

    pub fn find_1d(&self, key: &ShapeKey1D) -> Option<Arc<E::Handle>> {
        self.plans_1d.lock().get(key).cloned()
    }

    pub fn add_2d(&self, key: ShapeKey2D, how: Effort) -> Arc<E::Handle> {
        self.get_or_build(&self.plans_2d, key, key.request(), key.packed(), how)
    }

    pub fn find_2d(&self, key: &ShapeKey2D) -> Option<Arc<E::Handle>> {
        self.plans_2d.lock().get(key).cloned()
    }

    /// [`add_1d`](Self::add_1d) or [`add_2d`](Self::add_2d) depending on
    /// the arity of `request`.
    pub fn add(&self, request: &PlanRequest, placement: Placement, how: Effort) -> Arc<E::Handle> {
        match request.shape {
            Shape::One(n) => self.add_1d(
                ShapeKey1D::new(n, request.kind, request.direction, placement),
                how,
            ),
            Shape::Two(n0, n1) => self.add_2d(
                ShapeKey2D::new((n0, n1), request.kind, request.direction, placement),
                how,
            ),
        }
    }

    pub fn find(&self, request: &PlanRequest, placement: Placement) -> Option<Arc<E::Handle>> {
        match request.shape {
            Shape::One(n) => self.find_1d(&ShapeKey1D::new(
                n,
                request.kind,
                request.direction,
                placement,
            )),
            Shape::Two(n0, n1) => self.find_2d(&ShapeKey2D::new(
                (n0, n1),
                request.kind,
                request.direction,
                placement,
            )),
        }
    }

    /// Number of handles stored across both arities.
    pub fn len(&self) -> usize {
        self.plans_1d.lock().len() + self.plans_2d.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_or_build<K, P>(
        &self,
        plans: &Mutex<HashMap<K, Arc<E::Handle>>>,
        key: K,
        request: PlanRequest,
        packed: P,
        how: Effort,
    ) -> Arc<E::Handle>
    where
        K: Eq + Hash,
        P: fmt::Debug,
    {
        let mut plans = plans.lock();
        if let Some(handle) = plans.get(&key) {
            trace!(key = ?packed, "plan cache hit");
            return Arc::clone(handle);
        }

        let started = Instant::now();
        let handle = match self.engine.build(&request, how) {
            Some(handle) => Arc::new(handle),
            None => panic!("null plan handle for {:?}", request),
        };
        debug!(
            key = ?packed,
            ?request,
            effort = ?how,
            elapsed = ?started.elapsed(),
            "built cached plan"
        );
        plans.insert(key, Arc::clone(&handle));
        handle
    }
}

impl<T, E: Engine<T> + fmt::Debug> fmt::Debug for PlanCache<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .field("plans_1d", &self.plans_1d.lock().len())
            .field("plans_2d", &self.plans_2d.lock().len())
            .finish()
    }
}
