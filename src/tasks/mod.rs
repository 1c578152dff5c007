//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Fallback eviction: removes expired fallback-tier entries at configured
//!   intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
