//! Reference software engine for rattle.
//!
//! [`SoftEngine`] implements [`rattle_core::Engine`] without touching audio
//! hardware: nodes are built from a name-keyed [`ConstructorTable`], edges
//! live in a shared [`RoutingTable`], and the clock advances one render
//! quantum at a time.
//!
//! [`EngineProfile`] selects the capability level:
//!
//! - `Modern`: constructors consume the init map; the listener and panners
//!   expose per-axis automatable params
//! - `Legacy`: plain constructors; pose is set through non-interpolated setters
//!
//! # Feature flags
//!
//! - `"cpal"`: [`probe_output_device`] checks for a real output device

mod constructors;
pub use constructors::{ConstructorTable, NodeConstructor};

mod device;
pub use device::probe_output_device;

mod engine;
pub use engine::{SoftEngine, DESTINATION_ID};

mod listener;
pub use listener::SoftListener;

mod node;
pub use node::{EngineProfile, NodeContext, SoftNode, SoftNodeBuilder};

mod routing;
pub use routing::RoutingTable;
