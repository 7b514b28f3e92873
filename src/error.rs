use thiserror::Error;

use crate::dp::DpValue;

/// Errors from the weekly-program write path. Each one aborts the single
/// write attempt; no partial buffer is ever handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("wrong number of schedule items for {group}: expected {expected}, got {got}")]
    WrongItemCount {
        group: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("invalid schedule transition format in {group}: {segment:?}")]
    InvalidFormat {
        group: &'static str,
        segment: String,
    },

    #[error("invalid hour, minute or temperature in {group}: {segment:?}")]
    OutOfRange {
        group: &'static str,
        segment: String,
    },

    /// The write needs the last known text of a period group it does not
    /// touch, and the host state has none for it.
    #[error("no cached schedule text for {group}")]
    MissingState { group: &'static str },
}

/// Errors from the datapoint converter layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Write requested for an attribute no datapoint table entry maps.
    #[error("no writable datapoint for attribute {0:?}")]
    UnknownAttribute(String),

    /// The attribute value cannot be encoded for this datapoint.
    #[error("unsupported value for {attribute}: {value}")]
    BadValue {
        attribute: String,
        value: serde_json::Value,
    },

    /// The device reported a wire value the converter does not understand.
    #[error("unexpected wire value for {attribute}: {value:?}")]
    WireMismatch {
        attribute: String,
        value: DpValue,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
