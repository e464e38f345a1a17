//! Utility helpers: object storage, staged pools, planar math, logging and profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod pool;
pub mod profiling;

pub use allocator::{Arena, ObjectId};
pub use math::*;
pub use pool::StagedPool;
