//! Serializable descriptions of the externally exposed control surface.
//!
//! The host publishes these so operators can see what each device can
//! read and set, with value ranges, units and defaults. They carry no
//! behavior of their own; dispatch runs off the datapoint tables.

use serde::Serialize;

/// Who may read or write an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Reported by the device only.
    State,
    /// Settable only, never reported back.
    Set,
    /// Reported and settable.
    StateSet,
}

/// A documented default for a numeric attribute.
#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub value: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expose {
    Binary(BinaryExpose),
    Numeric(NumericExpose),
    Enum(EnumExpose),
    Text(TextExpose),
    Climate(ClimateExpose),
    Switch(SwitchExpose),
}

#[derive(Debug, Clone, Serialize)]
pub struct BinaryExpose {
    pub name: &'static str,
    pub access: Access,
    pub value_on: &'static str,
    pub value_off: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericExpose {
    pub name: &'static str,
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumExpose {
    pub name: &'static str,
    pub access: Access,
    pub values: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextExpose {
    pub name: &'static str,
    pub access: Access,
    /// Literal format the value must follow,
    /// e.g. `HH:MM/C HH:MM/C HH:MM/C HH:MM/C`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetpointExpose {
    pub attribute: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationExpose {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

fn slice_is_empty(s: &&[&str]) -> bool {
    s.is_empty()
}

/// The composite climate surface: setpoint, modes and temperatures
/// presented as one logical control.
#[derive(Debug, Clone, Serialize)]
pub struct ClimateExpose {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<SetpointExpose>,
    #[serde(skip_serializing_if = "slice_is_empty")]
    pub presets: &'static [&'static str],
    #[serde(skip_serializing_if = "slice_is_empty")]
    pub system_modes: &'static [&'static str],
    #[serde(skip_serializing_if = "slice_is_empty")]
    pub running_states: &'static [&'static str],
    pub local_temperature: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<CalibrationExpose>,
}

/// One zone switch of a multi-endpoint relay controller.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchExpose {
    pub endpoint: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

pub fn binary(
    name: &'static str,
    access: Access,
    value_on: &'static str,
    value_off: &'static str,
) -> BinaryExpose {
    BinaryExpose {
        name,
        access,
        value_on,
        value_off,
        description: None,
    }
}

pub fn numeric(name: &'static str, access: Access) -> NumericExpose {
    NumericExpose {
        name,
        access,
        unit: None,
        min: None,
        max: None,
        step: None,
        preset: None,
        description: None,
    }
}

pub fn enumeration(
    name: &'static str,
    access: Access,
    values: &'static [&'static str],
) -> EnumExpose {
    EnumExpose {
        name,
        access,
        values,
        description: None,
    }
}

pub fn text(name: &'static str, access: Access) -> TextExpose {
    TextExpose {
        name,
        access,
        format: None,
        description: None,
    }
}

pub fn climate() -> ClimateExpose {
    ClimateExpose {
        setpoint: None,
        presets: &[],
        system_modes: &[],
        running_states: &[],
        local_temperature: false,
        calibration: None,
    }
}

pub fn switch(endpoint: &'static str) -> SwitchExpose {
    SwitchExpose {
        endpoint,
        description: None,
    }
}

pub fn child_lock() -> BinaryExpose {
    binary("child_lock", Access::StateSet, "LOCK", "UNLOCK")
        .with_description("Enables/disables physical input on the device")
}

pub fn window_detection() -> BinaryExpose {
    binary("window_detection", Access::StateSet, "ON", "OFF")
}

impl BinaryExpose {
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl NumericExpose {
    pub fn with_unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_preset(
        mut self,
        name: &'static str,
        value: f64,
        description: &'static str,
    ) -> Self {
        self.preset = Some(Preset {
            name,
            value,
            description,
        });
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl EnumExpose {
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl TextExpose {
    pub fn with_format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl ClimateExpose {
    pub fn with_setpoint(
        mut self,
        attribute: &'static str,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        self.setpoint = Some(SetpointExpose {
            attribute,
            min,
            max,
            step,
        });
        self
    }

    pub fn with_presets(mut self, presets: &'static [&'static str]) -> Self {
        self.presets = presets;
        self
    }

    pub fn with_system_modes(mut self, modes: &'static [&'static str]) -> Self {
        self.system_modes = modes;
        self
    }

    pub fn with_running_states(mut self, states: &'static [&'static str]) -> Self {
        self.running_states = states;
        self
    }

    pub fn with_local_temperature(mut self) -> Self {
        self.local_temperature = true;
        self
    }

    pub fn with_calibration(mut self, min: f64, max: f64, step: f64) -> Self {
        self.calibration = Some(CalibrationExpose { min, max, step });
        self
    }
}

impl SwitchExpose {
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

macro_rules! into_expose {
    ($($variant:ident($inner:ident),)*) => {
        $(impl From<$inner> for Expose {
            fn from(e: $inner) -> Self {
                Expose::$variant(e)
            }
        })*
    };
}

into_expose! {
    Binary(BinaryExpose),
    Numeric(NumericExpose),
    Enum(EnumExpose),
    Text(TextExpose),
    Climate(ClimateExpose),
    Switch(SwitchExpose),
}
