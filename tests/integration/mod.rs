//! Integration test modules for rattle
//!
//! - engine: Startup, lifecycle, shutdown
//! - registry: Slot allocation, reuse, create/destroy properties
//! - pose: Listener and panner pose interpolation
//! - bridge: Host notifications
//! - commands: Command dispatch and serialization

pub mod bridge;
pub mod pose;
pub mod registry;
