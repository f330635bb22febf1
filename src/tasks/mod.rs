//! Background Tasks Module
//!
//! Contains background tasks owned by cache handles.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired cache entries at configured intervals

mod cleanup;

pub use cleanup::{spawn_cleanup_task, CleanupTask};
