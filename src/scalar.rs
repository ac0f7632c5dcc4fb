//! Scalar widths with a process-wide plan cache each.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::cache::PlanCache;
use crate::engine::NativeEngine;
use num_traits::float::{Float, FloatConst};
use num_traits::NumAssign;
use std::fmt::Debug;
use std::sync::OnceLock;

pub trait Scalar: Float + FloatConst + NumAssign + Debug + Send + Sync + 'static {
    /// The cache shared by every caller in the process that does not bring
    /// its own. Created on first use, never torn down.
    fn global_cache() -> &'static PlanCache<Self>;
}

impl Scalar for f32 {
    fn global_cache() -> &'static PlanCache<f32> {
        static CACHE: OnceLock<PlanCache<f32>> = OnceLock::new();
        CACHE.get_or_init(|| PlanCache::new(NativeEngine::new()))
    }
}

impl Scalar for f64 {
    fn global_cache() -> &'static PlanCache<f64> {
        static CACHE: OnceLock<PlanCache<f64>> = OnceLock::new();
        CACHE.get_or_init(|| PlanCache::new(NativeEngine::new()))
    }
}
