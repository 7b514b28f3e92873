//! Wire-level model of Tuya datapoints.
//!
//! The Tuya MCU sub-protocol tags every control or sensor value with a
//! numeric datapoint id and one of six wire types. The host transport
//! unpacks the cluster command framing and hands us `DpReport`s; we hand
//! back `DpWrite`s for it to transmit.

/// One value carried by a datapoint. `Value` is a 32-bit signed integer on
/// the wire; `Raw` is an opaque byte payload (the weekly program lives in
/// one of these).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DpValue {
    Raw(Vec<u8>),
    Bool(bool),
    Value(i32),
    String(String),
    Enum(u8),
    Bitmap(u32),
}

/// A single datapoint report received from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpReport {
    pub dp: u8,
    pub value: DpValue,
}

/// Which Tuya cluster command the host should use to transmit a write.
/// Most devices accept `DataRequest`; some variants only act on `SendData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendCommand {
    DataRequest,
    SendData,
}

/// An outbound datapoint write, handed off to the host transport as-is.
/// Building one has no side effects; transmission is the host's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpWrite {
    pub dp: u8,
    pub send_command: SendCommand,
    pub value: DpValue,
}

/// The wire side of one lookup-converter entry. Kept separate from
/// `DpValue` so lookup tables can live in static datapoint tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupValue {
    Bool(bool),
    Enum(u8),
}

impl LookupValue {
    pub fn to_dp(self) -> DpValue {
        match self {
            LookupValue::Bool(b) => DpValue::Bool(b),
            LookupValue::Enum(n) => DpValue::Enum(n),
        }
    }

    /// Whether a reported wire value selects this entry. Some firmwares
    /// report enum datapoints through the integer type, so `Enum` matches
    /// both.
    pub fn matches(self, value: &DpValue) -> bool {
        match (self, value) {
            (LookupValue::Bool(a), DpValue::Bool(b)) => a == *b,
            (LookupValue::Enum(a), DpValue::Enum(b)) => a == *b,
            (LookupValue::Enum(a), DpValue::Value(b)) => i32::from(a) == *b,
            _ => false,
        }
    }
}
