//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the service is up.
//!
//! # Tasks
//! - Sweep: purges stale entries so keys that are never read again do not
//!   pile up between reads

mod sweep;

pub use sweep::spawn_sweep_task;
