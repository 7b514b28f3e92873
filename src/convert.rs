//! Converters between Tuya wire values and application attribute values.
//!
//! Each datapoint table entry carries one of these. They are a closed set
//! of tagged variants rather than trait objects so the tables stay plain
//! static data.

use serde_json::{Value, json};

use crate::dp::{DpValue, LookupValue};
use crate::error::ConvertError;
use crate::schedule::ScheduleSpec;

/// One decoded attribute produced by a datapoint report.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeUpdate {
    pub attribute: &'static str,
    pub value: Value,
}

#[derive(Debug, Clone, Copy)]
pub enum Converter {
    /// Pass the wire value through unchanged.
    Raw,
    /// Boolean datapoint exposed as "ON"/"OFF".
    OnOff,
    /// Boolean datapoint exposed as "LOCK"/"UNLOCK".
    LockUnlock,
    /// Fixed-point x10 integer datapoint exposed as a decimal number.
    DivideBy10,
    /// Enumerated datapoint exposed by name.
    Lookup(&'static [(&'static str, LookupValue)]),
    /// Packed weekly program; decodes to one attribute per period group.
    /// Writes do not go through `to_dp` — they are resolved against the
    /// spec's write-rule table, which needs the cached state.
    Schedule(&'static ScheduleSpec),
}

impl Converter {
    /// Wire value to attribute updates (report direction). Every converter
    /// yields exactly one update except `Schedule`, which yields one per
    /// period group.
    pub fn from_dp(
        &self,
        attribute: &'static str,
        value: &DpValue,
    ) -> Result<Vec<AttributeUpdate>, ConvertError> {
        let mismatch = || ConvertError::WireMismatch {
            attribute: attribute.to_string(),
            value: value.clone(),
        };
        let single = |v: Value| {
            vec![AttributeUpdate {
                attribute,
                value: v,
            }]
        };

        match self {
            Converter::Raw => Ok(single(raw_to_json(value))),
            Converter::OnOff => match value {
                DpValue::Bool(b) => Ok(single(json!(if *b { "ON" } else { "OFF" }))),
                _ => Err(mismatch()),
            },
            Converter::LockUnlock => match value {
                DpValue::Bool(b) => Ok(single(json!(if *b { "LOCK" } else { "UNLOCK" }))),
                _ => Err(mismatch()),
            },
            Converter::DivideBy10 => match value {
                DpValue::Value(n) => Ok(single(json!(f64::from(*n) / 10.0))),
                _ => Err(mismatch()),
            },
            Converter::Lookup(table) => table
                .iter()
                .find(|(_, wire)| wire.matches(value))
                .map(|(name, _)| single(json!(*name)))
                .ok_or_else(mismatch),
            Converter::Schedule(spec) => match value {
                DpValue::Raw(buf) => Ok(spec
                    .decode(buf)
                    .into_iter()
                    .map(|(attribute, text)| AttributeUpdate {
                        attribute,
                        value: Value::String(text),
                    })
                    .collect()),
                _ => Err(mismatch()),
            },
        }
    }

    /// Attribute value to wire value (write direction).
    pub fn to_dp(&self, attribute: &'static str, value: &Value) -> Result<DpValue, ConvertError> {
        let bad_value = || ConvertError::BadValue {
            attribute: attribute.to_string(),
            value: value.clone(),
        };

        match self {
            Converter::Raw => match value {
                Value::Bool(b) => Ok(DpValue::Bool(*b)),
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.round() as i64))
                    .map(|n| DpValue::Value(n as i32))
                    .ok_or_else(bad_value),
                Value::String(s) => Ok(DpValue::String(s.clone())),
                _ => Err(bad_value()),
            },
            Converter::OnOff => match value {
                Value::String(s) if s == "ON" => Ok(DpValue::Bool(true)),
                Value::String(s) if s == "OFF" => Ok(DpValue::Bool(false)),
                Value::Bool(b) => Ok(DpValue::Bool(*b)),
                _ => Err(bad_value()),
            },
            Converter::LockUnlock => match value {
                Value::String(s) if s == "LOCK" => Ok(DpValue::Bool(true)),
                Value::String(s) if s == "UNLOCK" => Ok(DpValue::Bool(false)),
                _ => Err(bad_value()),
            },
            Converter::DivideBy10 => value
                .as_f64()
                .map(|f| DpValue::Value((f * 10.0).round() as i32))
                .ok_or_else(bad_value),
            Converter::Lookup(table) => {
                let name = value.as_str().ok_or_else(bad_value)?;
                table
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, wire)| wire.to_dp())
                    .ok_or_else(bad_value)
            }
            Converter::Schedule(_) => Err(bad_value()),
        }
    }
}

fn raw_to_json(value: &DpValue) -> Value {
    match value {
        DpValue::Raw(bytes) => json!(bytes),
        DpValue::Bool(b) => json!(b),
        DpValue::Value(n) => json!(n),
        DpValue::String(s) => json!(s),
        DpValue::Enum(n) => json!(n),
        DpValue::Bitmap(n) => json!(n),
    }
}
