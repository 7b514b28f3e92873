//! Device definitions and the report/write dispatch over their datapoint
//! tables.
//!
//! A definition is pure data: fingerprints to match the physical device,
//! the exposed control surface, and the datapoint table mapping DP ids to
//! named attributes through converters. The host owns transport, state
//! and scheduling; it calls [`DeviceDefinition::report`] with inbound
//! datapoint reports and [`DeviceDefinition::write`] with attribute
//! writes, and transmits whatever `DpWrite` comes back.

use serde_json::Value;
use tracing::{debug, warn};

use crate::StateMap;
use crate::convert::{AttributeUpdate, Converter};
use crate::dp::{DpReport, DpValue, DpWrite, SendCommand};
use crate::error::ConvertError;
use crate::expose::Expose;

/// Match rule selecting a definition for a physical device. Many Tuya
/// devices share one model id, so the manufacturer string is always part
/// of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub model_id: &'static str,
    pub manufacturer: &'static str,
}

impl Fingerprint {
    /// Some firmwares pad the reported manufacturer name with trailing
    /// NULs; those are ignored for matching.
    pub fn matches(&self, model_id: &str, manufacturer: &str) -> bool {
        self.model_id == model_id && self.manufacturer == manufacturer.trim_end_matches('\0')
    }
}

/// One row of a datapoint table.
#[derive(Debug, Clone, Copy)]
pub struct DatapointEntry {
    pub dp: u8,
    pub attribute: &'static str,
    pub converter: Converter,
}

/// Shorthand keeping the datapoint tables tabular.
pub const fn dp(dp: u8, attribute: &'static str, converter: Converter) -> DatapointEntry {
    DatapointEntry {
        dp,
        attribute,
        converter,
    }
}

/// Device-specific setup the host runs after the device joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Configure {
    None,
    /// Read the Tuya "magic" attribute set to kick the MCU into
    /// reporting its datapoints.
    MagicPacket,
}

/// Host events the device needs handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnEvent {
    None,
    /// Answer the MCU's time-sync request with local time.
    SyncTime,
}

pub struct DeviceDefinition {
    pub fingerprints: &'static [Fingerprint],
    pub model: &'static str,
    pub vendor: &'static str,
    pub description: &'static str,
    pub exposes: Vec<Expose>,
    pub datapoints: &'static [DatapointEntry],
    /// Attribute to Zigbee endpoint map; non-empty only for
    /// multi-endpoint devices.
    pub endpoints: &'static [(&'static str, u8)],
    pub configure: Configure,
    pub on_event: OnEvent,
    /// Transport command for ordinary attribute writes. Schedule writes
    /// carry their own in the schedule spec.
    pub send_command: SendCommand,
}

impl DeviceDefinition {
    /// Decode one inbound datapoint report into attribute updates.
    /// Datapoints the table does not map are logged and skipped.
    pub fn report(&self, report: &DpReport) -> Result<Vec<AttributeUpdate>, ConvertError> {
        let mut updates = Vec::new();
        let mut matched = false;
        for entry in self.datapoints.iter().filter(|e| e.dp == report.dp) {
            matched = true;
            updates.extend(entry.converter.from_dp(entry.attribute, &report.value)?);
        }
        if !matched {
            debug!(
                model = self.model,
                dp = report.dp,
                "unmapped datapoint, skipping"
            );
        }
        Ok(updates)
    }

    /// Encode one attribute write into the outbound datapoint write.
    ///
    /// `state` is the host's cache of last known attribute values; the
    /// schedule encoder reads it for period groups the write does not
    /// touch. Nothing is produced on validation failure.
    pub fn write(
        &self,
        attribute: &str,
        value: &Value,
        state: &StateMap,
    ) -> Result<DpWrite, ConvertError> {
        for entry in self.datapoints {
            if let Converter::Schedule(spec) = entry.converter {
                if let Some(rule) = spec.write_rule(attribute) {
                    let text = value.as_str().ok_or_else(|| ConvertError::BadValue {
                        attribute: attribute.to_string(),
                        value: value.clone(),
                    })?;
                    let buf = spec.encode(rule, text, state)?;
                    return Ok(DpWrite {
                        dp: spec.dp,
                        send_command: spec.send_command,
                        value: DpValue::Raw(buf),
                    });
                }
                continue;
            }
            if entry.attribute == attribute {
                let wire = entry.converter.to_dp(entry.attribute, value)?;
                return Ok(DpWrite {
                    dp: entry.dp,
                    send_command: self.send_command,
                    value: wire,
                });
            }
        }
        warn!(model = self.model, attribute, "write for unmapped attribute");
        Err(ConvertError::UnknownAttribute(attribute.to_string()))
    }

    /// Zigbee endpoint for an attribute on multi-endpoint devices.
    pub fn endpoint(&self, attribute: &str) -> Option<u8> {
        self.endpoints
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, ep)| *ep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_requires_both_fields() {
        let fp = Fingerprint {
            model_id: "TS0601",
            manufacturer: "_TZE204_6kijc7nd",
        };
        assert!(fp.matches("TS0601", "_TZE204_6kijc7nd"));
        assert!(!fp.matches("TS0601", "_TZE200_rfpyqax9"));
        assert!(!fp.matches("TS0011", "_TZE204_6kijc7nd"));
    }

    #[test]
    fn fingerprint_ignores_trailing_nuls() {
        let fp = Fingerprint {
            model_id: "TS0601",
            manufacturer: "_TZE204_6kijc7nd",
        };
        assert!(fp.matches("TS0601", "_TZE204_6kijc7nd\u{0}"));
    }
}
