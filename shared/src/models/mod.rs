//! Data models
//!
//! Wire types shared between the server and its clients.

pub mod employee;

// Re-exports
pub use employee::*;
