//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the capabilities the search procedures consume.
//! Implementations live in `adapters`; tests substitute mocks.

mod binder;
mod filesystem;
mod interfaces;

pub use binder::BinderPort;
pub use filesystem::FileSystemPort;
pub use interfaces::InterfacePort;
