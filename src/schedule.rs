//! Codec for the packed weekly heating program.
//!
//! The device stores its whole weekly program in one raw datapoint:
//! consecutive 4-byte transitions `[hour, minute, temp_hi, temp_lo]`
//! (temperature big-endian, fixed-point x10 degC), partitioned into named
//! period groups such as weekday/saturday/sunday. Humans edit it as one
//! text attribute per period group, segments joined by single spaces:
//!
//! ```text
//! 06:00/20.0°C 08:30/15.0°C 17:00/21.0°C 22:00/16.0°C
//! ```
//!
//! Decode trusts the device and renders whatever the buffer holds; encode
//! validates strictly and always rebuilds the full buffer, filling groups
//! the write does not touch from the host's cached attribute state.

use crate::StateMap;
use crate::dp::SendCommand;
use crate::error::ScheduleError;

/// Lowest settable temperature, degrees Celsius.
const TEMP_MIN: f64 = 5.0;
/// Upper (exclusive) bound for settable temperatures.
const TEMP_MAX: f64 = 35.0;

/// One named run of transitions within the program buffer.
#[derive(Debug, Clone, Copy)]
pub struct PeriodGroup {
    /// Short key used in validation messages ("weekday").
    pub name: &'static str,
    /// The text attribute the group is exposed as ("schedule_weekday").
    pub attribute: &'static str,
    /// Number of transitions in the group.
    pub segments: usize,
}

/// Maps a triggering attribute to the period groups its text applies to.
/// Groups not listed are filled from the cached state instead.
#[derive(Debug, Clone, Copy)]
pub struct WriteRule {
    pub trigger: &'static str,
    pub affected: &'static [&'static str],
}

/// Per-variant layout of the weekly program datapoint.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleSpec {
    /// Datapoint carrying the packed program.
    pub dp: u8,
    /// Transport command the host should use for writes.
    pub send_command: SendCommand,
    /// Period groups in canonical buffer order.
    pub groups: &'static [PeriodGroup],
    /// Write-rule table, one entry per triggering attribute.
    pub writes: &'static [WriteRule],
}

impl ScheduleSpec {
    /// Total buffer length in bytes, 4 per transition.
    pub fn byte_len(&self) -> usize {
        self.groups.iter().map(|g| g.segments * 4).sum()
    }

    /// The rule for a triggering attribute, if this variant has one.
    pub fn write_rule(&self, attribute: &str) -> Option<&'static WriteRule> {
        self.writes.iter().find(|r| r.trigger == attribute)
    }

    /// Render the packed buffer into one text per period group.
    ///
    /// Device-originated data is trusted: out-of-range hours or
    /// temperatures are rendered as-is. A buffer whose length does not
    /// match the configured layout is a configuration error, not device
    /// input, and is asserted.
    pub fn decode(&self, buf: &[u8]) -> Vec<(&'static str, String)> {
        assert_eq!(
            buf.len(),
            self.byte_len(),
            "schedule buffer length does not match the configured layout"
        );

        let mut out = Vec::with_capacity(self.groups.len());
        let mut segments = buf.chunks_exact(4);
        for group in self.groups {
            let text = (&mut segments)
                .take(group.segments)
                .map(|seg| {
                    let temp = (u16::from(seg[2]) * 256 + u16::from(seg[3])) as f64 / 10.0;
                    format!("{:02}:{:02}/{:.1}°C", seg[0], seg[1], temp)
                })
                .collect::<Vec<_>>()
                .join(" ");
            out.push((group.attribute, text));
        }
        out
    }

    /// Build the full program buffer for a write triggered by
    /// `rule.trigger`.
    ///
    /// `text` is the incoming attribute value; groups the rule does not
    /// affect are read back from `state`. Any validation failure aborts
    /// the write with no partial buffer.
    pub fn encode(
        &self,
        rule: &WriteRule,
        text: &str,
        state: &StateMap,
    ) -> Result<Vec<u8>, ScheduleError> {
        let mut buf = Vec::with_capacity(self.byte_len());
        for group in self.groups {
            let source = if rule.affected.contains(&group.name) {
                text
            } else {
                state
                    .get(group.attribute)
                    .and_then(|v| v.as_str())
                    .ok_or(ScheduleError::MissingState { group: group.name })?
            };
            encode_group(group, source, &mut buf)?;
        }
        Ok(buf)
    }
}

fn encode_group(group: &PeriodGroup, text: &str, buf: &mut Vec<u8>) -> Result<(), ScheduleError> {
    let items: Vec<&str> = text.split_whitespace().collect();
    if items.len() != group.segments {
        return Err(ScheduleError::WrongItemCount {
            group: group.name,
            expected: group.segments,
            got: items.len(),
        });
    }

    for item in items {
        let invalid_format = || ScheduleError::InvalidFormat {
            group: group.name,
            segment: item.to_string(),
        };
        let out_of_range = || ScheduleError::OutOfRange {
            group: group.name,
            segment: item.to_string(),
        };

        let (time, temp) = item.split_once('/').ok_or_else(invalid_format)?;
        if temp.contains('/') {
            return Err(invalid_format());
        }
        let (hour, minute) = time.split_once(':').ok_or_else(invalid_format)?;
        if minute.contains(':') {
            return Err(invalid_format());
        }

        let hour: u8 = hour.parse().map_err(|_| out_of_range())?;
        let minute: u8 = minute.parse().map_err(|_| out_of_range())?;
        // The unit suffix is emitted on decode but optional on input.
        let temp: f64 = temp
            .trim_end_matches("°C")
            .trim_end_matches('C')
            .parse()
            .map_err(|_| out_of_range())?;
        if hour > 23 || minute > 59 || !(TEMP_MIN..TEMP_MAX).contains(&temp) {
            return Err(out_of_range());
        }

        let temp10 = (temp * 10.0).round() as u16;
        buf.extend_from_slice(&[hour, minute, (temp10 >> 8) as u8, (temp10 & 0xff) as u8]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: ScheduleSpec = ScheduleSpec {
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

    const WEEKDAY: &str = "07:30/21.5°C 12:00/18.0°C 18:45/20.0°C 22:00/16.5°C";
    const FLAT: &str = "06:00/20.0°C 08:30/15.0°C 17:00/21.0°C 23:00/16.0°C";

    fn state() -> StateMap {
        let mut m = StateMap::new();
        m.insert("schedule_saturday".into(), FLAT.into());
        m.insert("schedule_sunday".into(), FLAT.into());
        m
    }

    fn weekday_rule() -> &'static WriteRule {
        LAYOUT.write_rule("schedule_weekday").unwrap()
    }

    #[test]
    fn byte_len_matches_layout() {
        assert_eq!(LAYOUT.byte_len(), 4 * 4 * 3);
    }

    #[test]
    fn decode_all_zero_buffer() {
        let decoded = LAYOUT.decode(&[0u8; 48]);
        let flat = ["00:00/0.0°C"; 4].join(" ");
        assert_eq!(
            decoded,
            vec![
                ("schedule_weekday", flat.clone()),
                ("schedule_saturday", flat.clone()),
                ("schedule_sunday", flat),
            ]
        );
    }

    #[test]
    fn encode_produces_expected_bytes() {
        let buf = LAYOUT.encode(weekday_rule(), WEEKDAY, &state()).unwrap();
        assert_eq!(buf.len(), 48);
        assert_eq!(
            &buf[..16],
            &[7, 30, 0, 215, 12, 0, 0, 180, 18, 45, 0, 200, 22, 0, 0, 165]
        );
        // Saturday comes from the cached state, starting at 06:00/20.0.
        assert_eq!(&buf[16..20], &[6, 0, 0, 200]);
    }

    #[test]
    fn unit_suffix_is_optional_on_input() {
        let bare = "07:30/21.5 12:00/18.0 18:45/20.0 22:00/16.5";
        let with_suffix = LAYOUT.encode(weekday_rule(), WEEKDAY, &state()).unwrap();
        let without = LAYOUT.encode(weekday_rule(), bare, &state()).unwrap();
        assert_eq!(with_suffix, without);
    }

    #[test]
    fn round_trip_preserves_text() {
        let buf = LAYOUT.encode(weekday_rule(), WEEKDAY, &state()).unwrap();
        let decoded = LAYOUT.decode(&buf);
        assert_eq!(decoded[0], ("schedule_weekday", WEEKDAY.to_string()));
        assert_eq!(decoded[1], ("schedule_saturday", FLAT.to_string()));

        // Re-encoding what we decoded reproduces the identical buffer.
        let mut st = StateMap::new();
        for (attr, text) in &decoded {
            st.insert((*attr).to_string(), text.clone().into());
        }
        let again = LAYOUT
            .encode(weekday_rule(), decoded[0].1.as_str(), &st)
            .unwrap();
        assert_eq!(buf, again);
    }

    #[test]
    fn decode_is_idempotent() {
        let buf = LAYOUT.encode(weekday_rule(), WEEKDAY, &state()).unwrap();
        assert_eq!(LAYOUT.decode(&buf), LAYOUT.decode(&buf));
    }

    #[test]
    fn temperature_bounds_are_half_open() {
        let too_low = "07:30/4.9 12:00/18.0 18:45/20.0 22:00/16.5";
        let too_high = "07:30/35.0 12:00/18.0 18:45/20.0 22:00/16.5";
        let just_under = "07:30/34.9 12:00/18.0 18:45/20.0 22:00/16.5";

        for bad in [too_low, too_high] {
            let err = LAYOUT.encode(weekday_rule(), bad, &state()).unwrap_err();
            assert!(
                matches!(err, ScheduleError::OutOfRange { group: "weekday", .. }),
                "unexpected error: {err}"
            );
        }
        LAYOUT.encode(weekday_rule(), just_under, &state()).unwrap();
    }

    #[test]
    fn wrong_item_count_names_group_and_count() {
        let three = "07:30/21.5 12:00/18.0 18:45/20.0";
        let err = LAYOUT.encode(weekday_rule(), three, &state()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::WrongItemCount {
                group: "weekday",
                expected: 4,
                got: 3,
            }
        );
    }

    #[test]
    fn malformed_segments_are_format_errors() {
        for bad in [
            "0730/21.5 12:00/18.0 18:45/20.0 22:00/16.5",
            "07:30-21.5 12:00/18.0 18:45/20.0 22:00/16.5",
            "07:30/21.5/x 12:00/18.0 18:45/20.0 22:00/16.5",
            "07:30:15/21.5 12:00/18.0 18:45/20.0 22:00/16.5",
        ] {
            let err = LAYOUT.encode(weekday_rule(), bad, &state()).unwrap_err();
            assert!(
                matches!(err, ScheduleError::InvalidFormat { group: "weekday", .. }),
                "expected format error for {bad:?}, got {err}"
            );
        }
    }

    #[test]
    fn non_numeric_fields_are_range_errors() {
        for bad in [
            "aa:30/21.5 12:00/18.0 18:45/20.0 22:00/16.5",
            "07:bb/21.5 12:00/18.0 18:45/20.0 22:00/16.5",
            "07:30/warm 12:00/18.0 18:45/20.0 22:00/16.5",
        ] {
            let err = LAYOUT.encode(weekday_rule(), bad, &state()).unwrap_err();
            assert!(
                matches!(err, ScheduleError::OutOfRange { group: "weekday", .. }),
                "expected range error for {bad:?}, got {err}"
            );
        }
    }

    #[test]
    fn hour_and_minute_ranges_are_enforced() {
        let bad_hour = "24:00/21.5 12:00/18.0 18:45/20.0 22:00/16.5";
        let bad_minute = "07:60/21.5 12:00/18.0 18:45/20.0 22:00/16.5";
        for bad in [bad_hour, bad_minute] {
            let err = LAYOUT.encode(weekday_rule(), bad, &state()).unwrap_err();
            assert!(matches!(
                err,
                ScheduleError::OutOfRange { group: "weekday", .. }
            ));
        }
    }

    #[test]
    fn untouched_groups_need_cached_state() {
        let mut st = state();
        st.remove("schedule_saturday");
        let err = LAYOUT.encode(weekday_rule(), WEEKDAY, &st).unwrap_err();
        assert_eq!(err, ScheduleError::MissingState { group: "saturday" });
    }

    #[test]
    fn unknown_trigger_has_no_rule() {
        assert!(LAYOUT.write_rule("schedule_holiday").is_none());
    }
}
