//! Background Tasks Module
//!
//! Optional tasks that run alongside a shared cache.
//!
//! # Tasks
//! - Expiry sweep: eagerly removes expired entries at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
