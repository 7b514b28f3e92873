//! Tervix underfloor-heating hardware.
//!
//! All three devices report the generic `TS0601` Tuya model id, so
//! selection is by fingerprint. The two thermostats share one
//! manufacturer string in the vendor data; see `Registry` for how that
//! conflict is resolved.

use crate::convert::Converter;
use crate::definition::{Configure, DatapointEntry, DeviceDefinition, Fingerprint, OnEvent, dp};
use crate::dp::{LookupValue, SendCommand};
use crate::expose::{self, Access, Expose};
use crate::schedule::{PeriodGroup, ScheduleSpec, WriteRule};

const SYSTEM_MODE: &[(&str, LookupValue)] = &[
    ("off", LookupValue::Bool(false)),
    ("auto", LookupValue::Bool(true)),
];
const WALL_SYSTEM_MODE: &[(&str, LookupValue)] = &[
    ("off", LookupValue::Bool(false)),
    ("heat", LookupValue::Bool(true)),
];
const PRESET: &[(&str, LookupValue)] = &[
    ("manual", LookupValue::Enum(0)),
    ("auto", LookupValue::Enum(1)),
];
const RUNNING_STATE: &[(&str, LookupValue)] = &[
    ("idle", LookupValue::Enum(0)),
    ("heat", LookupValue::Enum(1)),
    ("cool", LookupValue::Enum(2)),
];
const SENSOR_SELECTION: &[(&str, LookupValue)] = &[
    ("room_temperature", LookupValue::Enum(0)),
    ("floor_temperature", LookupValue::Enum(1)),
    ("room_with_floor_limit", LookupValue::Enum(2)),
];
const RUN_MODE: &[(&str, LookupValue)] = &[
    ("HEAT", LookupValue::Enum(0)),
    ("COOL", LookupValue::Enum(1)),
];
const ON_OFF_ENUM: &[(&str, LookupValue)] = &[
    ("OFF", LookupValue::Enum(0)),
    ("ON", LookupValue::Enum(1)),
];

/// Weekly program of the ProLine thermostat: 5+1+1 layout on DP 48.
const PROLINE_SCHEDULE: ScheduleSpec = ScheduleSpec {
    dp: 48,
    send_command: SendCommand::DataRequest,
    groups: &[
        PeriodGroup {
            name: "weekday",
            attribute: "schedule_weekday",
            segments: 4,
        },
        PeriodGroup {
            name: "saturday",
            attribute: "schedule_saturday",
            segments: 4,
        },
        PeriodGroup {
            name: "sunday",
            attribute: "schedule_sunday",
            segments: 4,
        },
    ],
    writes: &[
        WriteRule {
            trigger: "schedule_weekday",
            affected: &["weekday"],
        },
        WriteRule {
            trigger: "schedule_saturday",
            affected: &["saturday"],
        },
        WriteRule {
            trigger: "schedule_sunday",
            affected: &["sunday"],
        },
    ],
};

/// Weekly program of the wall variant: weekday/holiday split on DP 109.
/// This device only acts on writes sent through the `sendData` command.
const WALL_SCHEDULE: ScheduleSpec = ScheduleSpec {
    dp: 109,
    send_command: SendCommand::SendData,
    groups: &[
        PeriodGroup {
            name: "weekday",
            attribute: "schedule_weekday",
            segments: 4,
        },
        PeriodGroup {
            name: "holiday",
            attribute: "schedule_holiday",
            segments: 4,
        },
    ],
    writes: &[
        WriteRule {
            trigger: "schedule_weekday",
            affected: &["weekday"],
        },
        WriteRule {
            trigger: "schedule_holiday",
            affected: &["holiday"],
        },
    ],
};

const PROLINE_DATAPOINTS: &[DatapointEntry] = &[
    dp(1, "system_mode", Converter::Lookup(SYSTEM_MODE)),
    dp(2, "preset", Converter::Lookup(PRESET)),
    dp(3, "running_state", Converter::Lookup(RUNNING_STATE)),
    dp(8, "window_detection", Converter::OnOff),
    dp(10, "frost_protection", Converter::OnOff),
    dp(16, "current_heating_setpoint", Converter::DivideBy10),
    dp(19, "max_temperature_limit", Converter::DivideBy10),
    dp(24, "local_temperature", Converter::DivideBy10),
    dp(25, "window_open", Converter::Raw),
    dp(27, "local_temperature_calibration", Converter::Raw),
    dp(34, "humidity", Converter::Raw),
    dp(39, "factory_reset", Converter::OnOff),
    dp(40, "child_lock", Converter::LockUnlock),
    dp(43, "sensor_selection", Converter::Lookup(SENSOR_SELECTION)),
    dp(48, "schedule", Converter::Schedule(&PROLINE_SCHEDULE)),
    dp(58, "run_mode", Converter::Lookup(RUN_MODE)),
    dp(61, "week_program_period", Converter::Raw),
    dp(101, "deadzone_temperature", Converter::DivideBy10),
    dp(102, "floor_high_temp", Converter::DivideBy10),
    dp(103, "floor_low_temp", Converter::DivideBy10),
    dp(104, "open_window_sensing_time", Converter::Raw),
    dp(105, "open_window_drop_limit", Converter::Raw),
    dp(106, "open_window_delay_time", Converter::Raw),
    dp(107, "humidity_control", Converter::OnOff),
    dp(108, "humidity_limit", Converter::Raw),
];

const WALL_DATAPOINTS: &[DatapointEntry] = &[
    dp(1, "system_mode", Converter::Lookup(WALL_SYSTEM_MODE)),
    dp(2, "preset", Converter::Lookup(PRESET)),
    dp(10, "frost_protection", Converter::OnOff),
    dp(16, "current_heating_setpoint", Converter::DivideBy10),
    dp(19, "max_temperature_limit", Converter::DivideBy10),
    dp(24, "local_temperature", Converter::DivideBy10),
    dp(27, "local_temperature_calibration", Converter::Raw),
    dp(40, "child_lock", Converter::LockUnlock),
    dp(109, "schedule", Converter::Schedule(&WALL_SCHEDULE)),
];

const X10_DATAPOINTS: &[DatapointEntry] = &[
    dp(101, "state_zone01", Converter::OnOff),
    dp(102, "state_zone02", Converter::OnOff),
    dp(103, "state_zone03", Converter::OnOff),
    dp(104, "state_zone04", Converter::OnOff),
    dp(105, "state_zone05", Converter::OnOff),
    dp(106, "state_zone06", Converter::OnOff),
    dp(107, "state_zone07", Converter::OnOff),
    dp(108, "state_zone08", Converter::OnOff),
    dp(109, "pump", Converter::Lookup(ON_OFF_ENUM)),
    dp(110, "boiler", Converter::Lookup(ON_OFF_ENUM)),
    dp(111, "mode", Converter::Lookup(ON_OFF_ENUM)),
];

// The controller presents everything on Zigbee endpoint 1.
const X10_ENDPOINTS: &[(&str, u8)] = &[
    ("zone01", 1),
    ("zone02", 1),
    ("zone03", 1),
    ("zone04", 1),
    ("zone05", 1),
    ("zone06", 1),
    ("zone07", 1),
    ("zone08", 1),
    ("pump", 1),
    ("boiler", 1),
    ("mode", 1),
];

const ZONES: &[(&str, &str)] = &[
    ("zone01", "Zone 1 state"),
    ("zone02", "Zone 2 state"),
    ("zone03", "Zone 3 state"),
    ("zone04", "Zone 4 state"),
    ("zone05", "Zone 5 state"),
    ("zone06", "Zone 6 state"),
    ("zone07", "Zone 7 state"),
    ("zone08", "Zone 8 state"),
];

/// Thermostat for underfloor heating (`TS0601` / `_TZE204_6kijc7nd`).
pub fn proline_thermostat() -> DeviceDefinition {
    DeviceDefinition {
        fingerprints: &[Fingerprint {
            model_id: "TS0601",
            manufacturer: "_TZE204_6kijc7nd",
        }],
        model: "Tervix ProLine Zigbee",
        vendor: "Tervix",
        description: "Thermostat for underfloor heating",
        exposes: proline_exposes(),
        datapoints: PROLINE_DATAPOINTS,
        endpoints: &[],
        configure: Configure::MagicPacket,
        on_event: OnEvent::SyncTime,
        send_command: SendCommand::DataRequest,
    }
}

fn proline_exposes() -> Vec<Expose> {
    vec![
        expose::binary("factory_reset", Access::StateSet, "ON", "OFF")
            .with_description("Full factory reset, use with caution!")
            .into(),
        expose::child_lock().into(),
        expose::climate()
            .with_presets(&["auto", "manual"])
            .with_system_modes(&["off", "auto"])
            .with_setpoint("current_heating_setpoint", 5.0, 35.0, 0.5)
            .with_running_states(&["idle", "heat"])
            .with_local_temperature()
            .with_calibration(-9.0, 9.0, 1.0)
            .into(),
        expose::binary("frost_protection", Access::StateSet, "ON", "OFF")
            .with_description("Frost protection")
            .into(),
        expose::numeric("humidity", Access::State).with_unit("%").into(),
        expose::binary("humidity_control", Access::StateSet, "ON", "OFF").into(),
        expose::numeric("humidity_limit", Access::StateSet)
            .with_unit("%")
            .with_max(90.0)
            .with_step(20.0)
            .with_preset("default", 70.0, "Default value")
            .with_description("Humidity sensor limit (default: 70%)")
            .into(),
        expose::enumeration(
            "sensor_selection",
            Access::StateSet,
            &["room_temperature", "floor_temperature", "room_with_floor_limit"],
        )
        .with_description("Which sensor measures the controlled temperature")
        .into(),
        expose::numeric("floor_high_temp", Access::StateSet)
            .with_unit("°C")
            .with_range(5.0, 60.0)
            .with_step(0.5)
            .with_preset("default", 25.0, "Safe value")
            .with_description("Maximum floor temperature (protection; default: 50 °C)")
            .into(),
        expose::numeric("floor_low_temp", Access::StateSet)
            .with_unit("°C")
            .with_range(10.0, 30.0)
            .with_step(0.5)
            .with_preset("default", 15.0, "Default value")
            .with_description(
                "Minimum temperature limit for frost protection. Turns the thermostat on \
                 regardless of setpoint if the temperature drops below this (default: 15)",
            )
            .into(),
        expose::numeric("max_temperature_limit", Access::StateSet)
            .with_unit("°C")
            .with_range(35.0, 99.0)
            .with_step(0.5)
            .with_preset("default", 45.0, "Default value")
            .with_description("Max temperature limit (default: 45)")
            .into(),
        expose::window_detection()
            .with_description("When active the heating will cut off if an open window is detected")
            .into(),
        expose::binary("window_open", Access::State, "true", "false")
            .with_description("Window open?")
            .into(),
        expose::numeric("open_window_sensing_time", Access::StateSet)
            .with_unit("minutes")
            .with_range(2.0, 30.0)
            .with_step(1.0)
            .with_preset("default", 14.0, "Default value")
            .with_description("How long the temperature drop needs to occur over (default: 14 min)")
            .into(),
        expose::numeric("open_window_drop_limit", Access::StateSet)
            .with_unit("°C")
            .with_range(2.0, 4.0)
            .with_step(1.0)
            .with_preset("default", 2.0, "Default value")
            .with_description("Drop in room temperature that triggers an open window warning")
            .into(),
        expose::numeric("open_window_delay_time", Access::StateSet)
            .with_unit("minutes")
            .with_range(10.0, 60.0)
            .with_step(5.0)
            .with_preset("default", 30.0, "Default value")
            .with_description("How long the drop must persist before heating turns off")
            .into(),
        expose::enumeration("run_mode", Access::StateSet, &["HEAT", "COOL"]).into(),
        expose::numeric("deadzone_temperature", Access::StateSet)
            .with_unit("°C")
            .with_range(0.5, 5.0)
            .with_step(0.5)
            .with_preset("default", 1.0, "Default value")
            .with_description(
                "The delta between local_temperature and current_heating_setpoint to trigger heat",
            )
            .into(),
        schedule_text("schedule_weekday", "Monday to Friday program"),
        schedule_text("schedule_saturday", "Saturday program"),
        schedule_text("schedule_sunday", "Sunday program"),
    ]
}

/// Wall-mount thermostat claiming the same fingerprint as the ProLine in
/// the vendor data; registration order in `Registry` decides which one a
/// joining device resolves to.
pub fn wall_thermostat() -> DeviceDefinition {
    DeviceDefinition {
        fingerprints: &[Fingerprint {
            model_id: "TS0601",
            manufacturer: "_TZE204_6kijc7nd",
        }],
        model: "Tervix ProLine Wall",
        vendor: "Tervix",
        description: "Wall thermostat",
        exposes: wall_exposes(),
        datapoints: WALL_DATAPOINTS,
        endpoints: &[],
        configure: Configure::MagicPacket,
        on_event: OnEvent::SyncTime,
        send_command: SendCommand::DataRequest,
    }
}

fn wall_exposes() -> Vec<Expose> {
    vec![
        expose::child_lock().into(),
        expose::climate()
            .with_presets(&["auto", "manual"])
            .with_system_modes(&["off", "heat"])
            .with_setpoint("current_heating_setpoint", 5.0, 35.0, 0.5)
            .with_local_temperature()
            .with_calibration(-9.0, 9.0, 1.0)
            .into(),
        expose::binary("frost_protection", Access::StateSet, "ON", "OFF")
            .with_description("Frost protection")
            .into(),
        expose::numeric("max_temperature_limit", Access::StateSet)
            .with_unit("°C")
            .with_range(35.0, 99.0)
            .with_step(0.5)
            .into(),
        schedule_text("schedule_weekday", "Working day program"),
        schedule_text("schedule_holiday", "Holiday program"),
    ]
}

/// 8 zone underfloor heating controller (`TS0601` / `_TZE200_rfpyqax9`).
pub fn proline_x10() -> DeviceDefinition {
    DeviceDefinition {
        fingerprints: &[Fingerprint {
            model_id: "TS0601",
            manufacturer: "_TZE200_rfpyqax9",
        }],
        model: "Pro Line X10 ZigBee (8 zone)",
        vendor: "Tervix",
        description: "8 zone underfloor heating controller",
        exposes: x10_exposes(),
        datapoints: X10_DATAPOINTS,
        endpoints: X10_ENDPOINTS,
        configure: Configure::MagicPacket,
        on_event: OnEvent::SyncTime,
        send_command: SendCommand::DataRequest,
    }
}

fn x10_exposes() -> Vec<Expose> {
    let mut exposes: Vec<Expose> = ZONES
        .iter()
        .map(|&(endpoint, description)| {
            expose::switch(endpoint).with_description(description).into()
        })
        .collect();
    exposes.push(
        expose::binary("pump", Access::StateSet, "ON", "OFF")
            .with_description("Pump state")
            .into(),
    );
    exposes.push(
        expose::binary("boiler", Access::StateSet, "ON", "OFF")
            .with_description("Boiler state")
            .into(),
    );
    exposes.push(
        expose::binary("mode", Access::StateSet, "ON", "OFF")
            .with_description("Heat mode")
            .into(),
    );
    exposes
}

fn schedule_text(name: &'static str, description: &'static str) -> Expose {
    expose::text(name, Access::StateSet)
        .with_format("HH:MM/C HH:MM/C HH:MM/C HH:MM/C")
        .with_description(description)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_layouts_match_their_buffers() {
        assert_eq!(PROLINE_SCHEDULE.byte_len(), 48);
        assert_eq!(WALL_SCHEDULE.byte_len(), 32);
    }

    #[test]
    fn every_period_group_has_a_write_rule() {
        for spec in [&PROLINE_SCHEDULE, &WALL_SCHEDULE] {
            for group in spec.groups {
                let rule = spec.write_rule(group.attribute).unwrap();
                assert_eq!(rule.affected, &[group.name]);
            }
        }
    }

    #[test]
    fn x10_maps_every_zone() {
        let def = proline_x10();
        for n in 1..=8u8 {
            let attribute = format!("state_zone{n:02}");
            assert!(
                def.datapoints.iter().any(|e| e.attribute == attribute),
                "missing {attribute}"
            );
            assert_eq!(def.endpoint(&format!("zone{n:02}")), Some(1));
        }
    }
}
