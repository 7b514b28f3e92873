//! Declarative Tuya Zigbee device definitions for Tervix heating
//! hardware.
//!
//! Tuya devices tunnel all of their state through numeric "datapoints"
//! carried in a proprietary sub-protocol on top of Zigbee. This crate
//! maps those datapoints to named, typed attributes for a generic
//! integration host: each [`DeviceDefinition`] bundles the fingerprints
//! that select it, the exposed control surface, and a datapoint table of
//! converters. The host owns the Zigbee transport and device state; it
//! feeds inbound [`DpReport`]s to [`DeviceDefinition::report`] and
//! attribute writes to [`DeviceDefinition::write`], then transmits the
//! returned [`DpWrite`].
//!
//! The one stateful-looking piece is the weekly heating program, which
//! the device stores as a single packed raw datapoint. [`schedule`]
//! holds the codec for it: decode renders the buffer as one editable
//! text per period group, encode validates the text strictly and
//! rebuilds the full buffer, reading groups the write does not touch
//! from the host's cached state.

pub mod convert;
pub mod definition;
pub mod devices;
pub mod dp;
pub mod error;
pub mod expose;
pub mod registry;
pub mod schedule;

use std::collections::HashMap;

pub use convert::{AttributeUpdate, Converter};
pub use definition::{DatapointEntry, DeviceDefinition, Fingerprint};
pub use dp::{DpReport, DpValue, DpWrite, SendCommand};
pub use error::{ConvertError, ScheduleError};
pub use registry::Registry;
pub use schedule::{PeriodGroup, ScheduleSpec, WriteRule};

/// Host-side cache of the last known attribute values for one device.
/// The schedule encoder reads it for period groups a write leaves
/// untouched; callers should serialize concurrent writes to the same
/// device so the cache is not read mid-update.
pub type StateMap = HashMap<String, serde_json::Value>;
