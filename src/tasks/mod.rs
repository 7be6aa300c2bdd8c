//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod cleanup;

// Re-export main functions
pub use cleanup::cleanup_task;
