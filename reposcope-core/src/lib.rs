//! Reposcope Core - shared error handling, logging and configuration
//!
//! This crate defines the foundation used by every other reposcope crate

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tokio;
pub use tracing;
