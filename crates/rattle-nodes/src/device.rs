//! Output device probing for startup.

use rattle_core::{Error, Result};

/// Name of the default output device, or `EngineUnavailable` if there is none.
#[cfg(feature = "cpal")]
pub fn probe_output_device() -> Result<String> {
    use cpal::traits::{DeviceTrait, HostTrait};

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::EngineUnavailable("No output device available".into()))?;
    device
        .name()
        .map_err(|e| Error::EngineUnavailable(format!("Output device unusable: {e}")))
}

/// Without the `cpal` feature there is no way to reach an output device.
#[cfg(not(feature = "cpal"))]
pub fn probe_output_device() -> Result<String> {
    Err(Error::EngineUnavailable(
        "built without audio output support (enable the `cpal` feature)".into(),
    ))
}
