//! Name-keyed constructor table.
//!
//! Maps node type names (`"Oscillator"`, `"Gain"`, ...) onto functions that
//! build a [`SoftNode`]. Hosts can register their own types next to the
//! built-ins.

use crate::node::{EngineProfile, NodeContext, SoftNode};
use hashbrown::HashMap;
use rattle_core::EngineError;
use std::sync::Arc;

/// Function that builds a node in a given context.
pub type NodeConstructor = Arc<dyn Fn(&NodeContext) -> Result<SoftNode, EngineError> + Send + Sync>;

/// Registered node constructors.
#[derive(Clone, Default)]
pub struct ConstructorTable {
    constructors: HashMap<String, NodeConstructor>,
}

impl ConstructorTable {
    /// Empty table: no node type can be created.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every built-in node type.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        register_builtin_nodes(&mut table);
        table
    }

    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&NodeContext) -> Result<SoftNode, EngineError> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
    }

    pub fn create(&self, name: &str, ctx: &NodeContext) -> Result<SoftNode, EngineError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| EngineError::UnknownNodeType(name.to_string()))?;
        constructor(ctx)
    }

    /// Registered type names, sorted.
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<_> = self.constructors.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.constructors.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl std::fmt::Debug for ConstructorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorTable")
            .field("types", &self.list_types())
            .finish()
    }
}

/// Output node placed in registry slot 0.
pub(crate) fn destination(ctx: &NodeContext) -> SoftNode {
    SoftNode::builder("Destination", ctx)
        .property("channelCount", 2)
        .property("maxChannelCount", 2)
        .build()
}

fn register_builtin_nodes(table: &mut ConstructorTable) {
    // =========================================================================
    // Sources
    // =========================================================================

    table.register("Oscillator", |ctx| {
        let nyquist = ctx.nyquist();
        Ok(SoftNode::builder("Oscillator", ctx)
            .param("frequency", 440.0, -nyquist, nyquist)
            .param("detune", 0.0, -153600.0, 153600.0)
            .choice("type", &["sine", "square", "sawtooth", "triangle", "custom"])
            .source()
            .build())
    });

    table.register("BufferSource", |ctx| {
        Ok(SoftNode::builder("BufferSource", ctx)
            .param("playbackRate", 1.0, f64::MIN, f64::MAX)
            .param("detune", 0.0, f64::MIN, f64::MAX)
            .property("loop", false)
            .property("loopStart", 0.0)
            .property("loopEnd", 0.0)
            .source()
            .build())
    });

    table.register("ConstantSource", |ctx| {
        Ok(SoftNode::builder("ConstantSource", ctx)
            .param("offset", 1.0, f64::MIN, f64::MAX)
            .source()
            .build())
    });

    // =========================================================================
    // Processors
    // =========================================================================

    table.register("Gain", |ctx| {
        Ok(SoftNode::builder("Gain", ctx)
            .param("gain", 1.0, f64::MIN, f64::MAX)
            .build())
    });

    table.register("BiquadFilter", |ctx| {
        let nyquist = ctx.nyquist();
        Ok(SoftNode::builder("BiquadFilter", ctx)
            .param("frequency", 350.0, 0.0, nyquist)
            .param("detune", 0.0, -153600.0, 153600.0)
            .param("Q", 1.0, f64::MIN, f64::MAX)
            .param("gain", 0.0, f64::MIN, 1541.0)
            .choice(
                "type",
                &[
                    "lowpass", "highpass", "bandpass", "lowshelf", "highshelf", "peaking", "notch",
                    "allpass",
                ],
            )
            .build())
    });

    table.register("Delay", |ctx| {
        Ok(SoftNode::builder("Delay", ctx)
            .param("delayTime", 0.0, 0.0, 1.0)
            .build())
    });

    table.register("DynamicsCompressor", |ctx| {
        Ok(SoftNode::builder("DynamicsCompressor", ctx)
            .param("threshold", -24.0, -100.0, 0.0)
            .param("knee", 30.0, 0.0, 40.0)
            .param("ratio", 12.0, 1.0, 20.0)
            .param("attack", 0.003, 0.0, 1.0)
            .param("release", 0.25, 0.0, 1.0)
            .build())
    });

    table.register("Analyser", |ctx| {
        Ok(SoftNode::builder("Analyser", ctx)
            .property("fftSize", 2048)
            .property("minDecibels", -100.0)
            .property("maxDecibels", -30.0)
            .property("smoothingTimeConstant", 0.8)
            .build())
    });

    // =========================================================================
    // Spatial
    // =========================================================================

    table.register("StereoPanner", |ctx| {
        Ok(SoftNode::builder("StereoPanner", ctx)
            .param("pan", 0.0, -1.0, 1.0)
            .build())
    });

    table.register("Panner", |ctx| {
        let builder = SoftNode::builder("Panner", ctx)
            .choice("panningModel", &["equalpower", "HRTF"])
            .choice("distanceModel", &["inverse", "linear", "exponential"])
            .property("refDistance", 1.0)
            .property("maxDistance", 10000.0)
            .property("rolloffFactor", 1.0);

        let builder = match ctx.profile {
            EngineProfile::Modern => builder
                .param("positionX", 0.0, f64::MIN, f64::MAX)
                .param("positionY", 0.0, f64::MIN, f64::MAX)
                .param("positionZ", 0.0, f64::MIN, f64::MAX)
                .param("orientationX", 1.0, f64::MIN, f64::MAX)
                .param("orientationY", 0.0, f64::MIN, f64::MAX)
                .param("orientationZ", 0.0, f64::MIN, f64::MAX),
            EngineProfile::Legacy => builder.legacy_position(),
        };
        Ok(builder.build())
    });
}
