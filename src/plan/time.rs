use std::fmt;

use chrono::{NaiveTime, Timelike};

use crate::error::{PlanError, PlanResult};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A position on the 24-hour clock with no date attached.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimeDisplayMode {
    Hour24,
    Hour12,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Meridiem {
    Am,
    Pm,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    /// Wraps any minute count onto the clock, so negative values count back from midnight.
    pub fn from_minutes(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (wrapped / 60) as u32,
            minute: (wrapped % 60) as u32,
        }
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minute_of_day(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    pub fn add_minutes(&self, minutes: i64) -> Self {
        Self::from_minutes(self.minute_of_day() + minutes.rem_euclid(MINUTES_PER_DAY))
    }

    pub fn sub_minutes(&self, minutes: i64) -> Self {
        Self::from_minutes(self.minute_of_day() - minutes.rem_euclid(MINUTES_PER_DAY))
    }

    /// Minutes needed to reach `other` moving forward only, in `0..1440`.
    pub fn minutes_until(&self, other: TimeOfDay) -> i64 {
        (other.minute_of_day() - self.minute_of_day()).rem_euclid(MINUTES_PER_DAY)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }

    pub fn display(&self, mode: TimeDisplayMode) -> String {
        let pattern = match mode {
            TimeDisplayMode::Hour24 => "%H:%M",
            TimeDisplayMode::Hour12 => "%I:%M %p",
        };
        self.to_naive_time().format(pattern).to_string()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(value: NaiveTime) -> Self {
        Self {
            hour: value.hour(),
            minute: value.minute(),
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parses a loosely written clock time such as `7`, `0730`, `7:30pm` or `730 P`.
///
/// Without an AM/PM marker the digits are read as 24-hour time. With a marker,
/// `12 AM` becomes midnight and `1..=11 PM` move into the afternoon; every other
/// hour is kept as written and then range checked.
pub fn parse(raw: &str) -> PlanResult<TimeOfDay> {
    let input = raw.trim();
    let format_error = || PlanError::Format {
        input: input.to_string(),
    };

    let lowered = input.to_ascii_lowercase();
    let (clock, meridiem) = split_meridiem(&lowered);
    let (hour, minute) = split_clock_digits(clock).ok_or_else(format_error)?;
    let hour = apply_meridiem(hour, meridiem);

    TimeOfDay::new(hour, minute).ok_or_else(|| PlanError::Range {
        input: input.to_string(),
        hour,
        minute,
    })
}

fn split_meridiem(lowered: &str) -> (&str, Option<Meridiem>) {
    let suffixes = [
        ("am", Meridiem::Am),
        ("pm", Meridiem::Pm),
        ("a", Meridiem::Am),
        ("p", Meridiem::Pm),
    ];
    for (suffix, meridiem) in suffixes {
        if let Some(rest) = lowered.strip_suffix(suffix) {
            return (rest.trim_end(), Some(meridiem));
        }
    }
    (lowered, None)
}

fn split_clock_digits(clock: &str) -> Option<(u32, u32)> {
    if let Some((hour, minute)) = clock.split_once(':') {
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
            return None;
        }
        return Some((parse_digits(hour)?, parse_digits(minute)?));
    }

    let digits = parse_digits(clock)?;
    match clock.len() {
        1 | 2 => Some((digits, 0)),
        3 | 4 => Some((digits / 100, digits % 100)),
        _ => None,
    }
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn apply_meridiem(hour: u32, meridiem: Option<Meridiem>) -> u32 {
    match meridiem {
        None => hour,
        Some(Meridiem::Am) if hour == 12 => 0,
        Some(Meridiem::Pm) if (1..=11).contains(&hour) => hour + 12,
        Some(_) => hour,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn time(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).expect("valid time")
    }

    #[test]
    fn compact_pm_marker_moves_into_afternoon() {
        assert_eq!(parse("730P").expect("parse"), time(19, 30));
        assert_eq!(parse("730p").expect("parse"), time(19, 30));
        assert_eq!(parse(" 7:30 pm ").expect("parse"), time(19, 30));
    }

    #[test]
    fn digits_without_marker_are_military_time() {
        assert_eq!(parse("7").expect("parse"), time(7, 0));
        assert_eq!(parse("19").expect("parse"), time(19, 0));
        assert_eq!(parse("0730").expect("parse"), time(7, 30));
        assert_eq!(parse("2359").expect("parse"), time(23, 59));
        assert_eq!(parse("00:05").expect("parse"), time(0, 5));
    }

    #[test]
    fn twelve_o_clock_markers() {
        assert_eq!(parse("12 AM").expect("parse"), time(0, 0));
        assert_eq!(parse("12:45a").expect("parse"), time(0, 45));
        assert_eq!(parse("12PM").expect("parse"), time(12, 0));
        assert_eq!(parse("11 am").expect("parse"), time(11, 0));
    }

    #[test]
    fn hours_outside_twelve_hour_range_keep_their_value_with_marker() {
        assert_eq!(parse("13 PM").expect("parse"), time(13, 0));
        assert_eq!(parse("0 PM").expect("parse"), time(0, 0));
    }

    #[test]
    fn out_of_range_digits_are_range_errors() {
        let err = parse("2500").expect_err("hour 25 should fail");
        assert!(matches!(err, PlanError::Range { hour: 25, minute: 0, .. }));

        let err = parse("7:60").expect_err("minute 60 should fail");
        assert!(matches!(err, PlanError::Range { minute: 60, .. }));

        let err = parse("24").expect_err("hour 24 should fail");
        assert!(matches!(err, PlanError::Range { hour: 24, .. }));
    }

    #[test]
    fn unaccepted_shapes_are_format_errors() {
        for input in ["", "pm", "7:3", "7:300", "123:00", "12345", "seven", "7 : 30", "7.30", "-1"] {
            let err = parse(input).expect_err("shape should be rejected");
            assert!(
                matches!(err, PlanError::Format { .. }),
                "expected format error for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn format_error_lists_accepted_shapes() {
        let err = parse("noon").expect_err("should fail");
        assert!(err.to_string().contains("HH:MM"));
    }

    #[test]
    fn arithmetic_wraps_around_midnight() {
        assert_eq!(time(23, 30).add_minutes(45), time(0, 15));
        assert_eq!(time(0, 15).sub_minutes(30), time(23, 45));
        assert_eq!(time(2, 0).minutes_until(time(23, 0)), 1260);
        assert_eq!(time(23, 0).minutes_until(time(2, 0)), 180);
        assert_eq!(time(7, 0).minutes_until(time(7, 0)), 0);
    }

    #[test]
    fn extreme_offsets_wrap_without_overflow() {
        assert_eq!(time(2, 0).add_minutes(i64::MAX), time(2, 0).add_minutes(i64::MAX % 1440));
        assert_eq!(time(23, 59).add_minutes(i64::MAX), time(18, 6));
        assert_eq!(time(0, 0).add_minutes(i64::MIN), time(5, 52));
        assert_eq!(time(0, 0).sub_minutes(i64::MIN), time(18, 8));
    }

    #[test]
    fn display_modes() {
        assert_eq!(time(19, 5).display(TimeDisplayMode::Hour12), "07:05 PM");
        assert_eq!(time(0, 0).display(TimeDisplayMode::Hour12), "12:00 AM");
        assert_eq!(time(19, 5).display(TimeDisplayMode::Hour24), "19:05");
        assert_eq!(time(9, 0).to_string(), "09:00");
    }

    #[test]
    fn converts_from_naive_time_dropping_seconds() {
        let naive = NaiveTime::from_hms_opt(21, 15, 42).expect("valid");
        let clock = TimeOfDay::from(naive);
        assert_eq!(clock, time(21, 15));
        assert_eq!(clock.to_naive_time(), NaiveTime::from_hms_opt(21, 15, 0).expect("valid"));
    }

    proptest! {
        #[test]
        fn prop_twelve_hour_round_trip(hour in 0u32..24, minute in 0u32..60) {
            let original = time(hour, minute);
            let text = original.display(TimeDisplayMode::Hour12);
            prop_assert_eq!(parse(&text).expect("reparse"), original);
        }

        #[test]
        fn prop_twenty_four_hour_round_trip(hour in 0u32..24, minute in 0u32..60) {
            let original = time(hour, minute);
            prop_assert_eq!(parse(&original.to_string()).expect("reparse"), original);
        }

        #[test]
        fn prop_minute_arithmetic_is_circular(start in 0i64..1440, delta in any::<i64>()) {
            let clock = TimeOfDay::from_minutes(start);
            prop_assert_eq!(clock.add_minutes(delta).sub_minutes(delta), clock);
            prop_assert!(clock.minutes_until(clock.add_minutes(delta)) < MINUTES_PER_DAY);
        }
    }
}
