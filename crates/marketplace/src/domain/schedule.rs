use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        };
        f.write_str(name)
    }
}

/// Wall-clock time exchanged as `HH:MM`; `HH:MM:SS` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "08:00")]
pub struct ClockTime(pub NaiveTime);

impl ClockTime {
    pub fn hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map(ClockTime)
            .map_err(serde::de::Error::custom)
    }
}

/// One open interval on a weekday. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OperatingHours {
    pub day: DayOfWeek,
    pub open: ClockTime,
    pub close: ClockTime,
}

impl OperatingHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open.0 <= time && time <= self.close.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct HoursWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl fmt::Display for HoursWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.open, self.close)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum ScheduleViolation {
    ClosedOnDay {
        day: DayOfWeek,
    },
    OutsideHours {
        day: DayOfWeek,
        windows: Vec<HoursWindow>,
    },
}

impl fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleViolation::ClosedOnDay { day } => write!(f, "location is closed on {day}"),
            ScheduleViolation::OutsideHours { windows, .. } => {
                let windows: Vec<String> = windows.iter().map(ToString::to_string).collect();
                write!(f, "outside operating hours ({})", windows.join(", "))
            }
        }
    }
}

impl std::error::Error for ScheduleViolation {}

/// Accepts `at` when some interval declared for its weekday contains the
/// time of day. A location without any interval for that day is closed.
pub fn check_schedule(hours: &[OperatingHours], at: NaiveDateTime) -> Result<(), ScheduleViolation> {
    let day = DayOfWeek::from(at.weekday());
    let time = at.time();

    let windows: Vec<&OperatingHours> = hours.iter().filter(|h| h.day == day).collect();

    if windows.is_empty() {
        return Err(ScheduleViolation::ClosedOnDay { day });
    }

    if windows.iter().any(|h| h.contains(time)) {
        return Ok(());
    }

    Err(ScheduleViolation::OutsideHours {
        day,
        windows: windows
            .into_iter()
            .map(|h| HoursWindow {
                open: h.open,
                close: h.close,
            })
            .collect(),
    })
}

/// Every interval must open before it closes.
pub fn validate_hours(hours: &[OperatingHours]) -> Result<(), Vec<String>> {
    let errors: Vec<String> = hours
        .iter()
        .filter(|h| h.open >= h.close)
        .map(|h| {
            format!(
                "operating_hours: {} opens at {} but closes at {}",
                h.day, h.open, h.close
            )
        })
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hours(day: DayOfWeek, open: (u32, u32), close: (u32, u32)) -> OperatingHours {
        OperatingHours {
            day,
            open: ClockTime::hm(open.0, open.1).unwrap(),
            close: ClockTime::hm(close.0, close.1).unwrap(),
        }
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    #[test]
    fn inside_window_is_accepted_including_edges() {
        // 2030-01-07 is a Monday
        let schedule = vec![hours(DayOfWeek::Monday, (8, 0), (17, 0))];
        assert!(check_schedule(&schedule, at(2030, 1, 7, 8, 0)).is_ok());
        assert!(check_schedule(&schedule, at(2030, 1, 7, 12, 30)).is_ok());
        assert!(check_schedule(&schedule, at(2030, 1, 7, 17, 0)).is_ok());
    }

    #[test]
    fn outside_window_reports_open_and_close() {
        let schedule = vec![hours(DayOfWeek::Monday, (8, 0), (17, 0))];
        let err = check_schedule(&schedule, at(2030, 1, 7, 18, 15)).unwrap_err();

        assert_eq!(err.to_string(), "outside operating hours (08:00 - 17:00)");
        assert_eq!(
            err,
            ScheduleViolation::OutsideHours {
                day: DayOfWeek::Monday,
                windows: vec![HoursWindow {
                    open: ClockTime::hm(8, 0).unwrap(),
                    close: ClockTime::hm(17, 0).unwrap(),
                }],
            }
        );
    }

    #[test]
    fn day_without_schedule_is_closed() {
        let schedule = vec![hours(DayOfWeek::Monday, (8, 0), (17, 0))];
        // 2030-01-06 is a Sunday
        let err = check_schedule(&schedule, at(2030, 1, 6, 10, 0)).unwrap_err();
        assert_eq!(err.to_string(), "location is closed on sunday");
    }

    #[test]
    fn split_shifts_list_every_window() {
        let schedule = vec![
            hours(DayOfWeek::Monday, (6, 0), (10, 0)),
            hours(DayOfWeek::Monday, (15, 0), (19, 0)),
        ];
        assert!(check_schedule(&schedule, at(2030, 1, 7, 16, 0)).is_ok());

        let err = check_schedule(&schedule, at(2030, 1, 7, 12, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "outside operating hours (06:00 - 10:00, 15:00 - 19:00)"
        );
    }

    #[test]
    fn clock_time_accepts_seconds_and_prints_minutes() {
        let parsed: OperatingHours =
            serde_json::from_str(r#"{"day":"friday","open":"07:30:00","close":"16:00"}"#).unwrap();
        assert_eq!(parsed.open, ClockTime::hm(7, 30).unwrap());

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["open"], "07:30");
        assert_eq!(json["close"], "16:00");
    }

    #[test]
    fn inverted_interval_is_invalid() {
        let errors = validate_hours(&[hours(DayOfWeek::Tuesday, (17, 0), (8, 0))]).unwrap_err();
        assert_eq!(
            errors,
            vec!["operating_hours: tuesday opens at 17:00 but closes at 08:00".to_string()]
        );
    }
}
