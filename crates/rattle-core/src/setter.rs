//! Uniform field writes for immediate and automatable node fields.

use crate::error::{EngineError, Result};
use crate::node::{FieldKind, ParamHost};
use crate::params::ParamValue;
use crate::registry::{NodeIndex, NodeTable};

/// Write `value` into `field` on `host`.
///
/// Automatable fields get a `set_value_at_time(value, now)` so the write is
/// ordered with the rest of the automation timeline; everything else is
/// assigned directly. Range checks are left to the engine.
pub fn set_field<H>(
    host: &mut H,
    field: &str,
    value: ParamValue,
    now: f64,
) -> core::result::Result<(), EngineError>
where
    H: ParamHost + ?Sized,
{
    match host.field_kind(field) {
        Some(FieldKind::Automatable) => {
            let number = value.as_f64().ok_or_else(|| EngineError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            })?;
            let param = host
                .param_mut(field)
                .ok_or_else(|| EngineError::UnknownField(field.to_string()))?;
            param.set_value_at_time(number, now)
        }
        Some(FieldKind::Immediate) | None => host.set_property(field, value),
    }
}

/// [`set_field`] on the node registered at `index`.
pub fn set_field_by_index(
    nodes: &mut NodeTable,
    index: NodeIndex,
    field: &str,
    value: ParamValue,
    now: f64,
) -> Result<()> {
    let handle = nodes.get_mut(index)?;
    set_field(handle.node_mut(), field, value, now).map_err(|e| e.into_field_error(field))
}

/// Read `field` on the node registered at `index`.
pub fn get_field_by_index(nodes: &NodeTable, index: NodeIndex, field: &str) -> Result<ParamValue> {
    let handle = nodes.get(index)?;
    get_field(handle.node(), field).ok_or_else(|| crate::Error::InvalidField {
        field: field.to_string(),
        reason: format!("not exposed by {}", handle.type_name()),
    })
}

/// Read the current value of `field`, whichever kind it is.
pub fn get_field<H>(host: &H, field: &str) -> Option<ParamValue>
where
    H: ParamHost + ?Sized,
{
    match host.field_kind(field)? {
        FieldKind::Automatable => host.param(field).map(|p| ParamValue::Float(p.value())),
        FieldKind::Immediate => host.property(field),
    }
}
