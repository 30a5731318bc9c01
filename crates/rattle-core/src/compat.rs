//! Common re-exports shared across the crate.

pub use std::{
    boxed::Box,
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

pub use core::sync::atomic::{AtomicBool, Ordering};
