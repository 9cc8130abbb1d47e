//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter wraps one OS primitive.

pub mod binder;
pub mod filesystem;
pub mod interfaces;

// Re-export main types for convenience
pub use binder::TcpBinder;
pub use filesystem::LocalFileSystem;
pub use interfaces::SystemInterfaces;
