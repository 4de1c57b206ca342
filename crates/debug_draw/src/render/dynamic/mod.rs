//! Pooled storage for short-lived drawables

pub mod pool;

pub use pool::{DrawHandle, DrawablePool, PoolStats, PooledDrawable};
