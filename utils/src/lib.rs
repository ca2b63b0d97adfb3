//! Shared infrastructure utilities for Stellar.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)
//! - **`export`**: Trajectory rendering to JSON/CSV and atomic export

pub mod atomic_write;
pub mod export;

pub use atomic_write::{FileSyncPolicy, atomic_write};
pub use export::{ExportError, ExportFormat, export_trajectory, render};
