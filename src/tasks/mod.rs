//! Tasks Module
//!
//! Background tasks supporting the cache layer.

mod sweeper;

pub use sweeper::spawn_sweeper_task;
