// Time helpers for the countdown.
//
// Everything in here is pure: callers pass `now` explicitly so the scheduler,
// the delivery pipeline and the tests all agree on the same instant.

use std::fmt;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A wall-clock time in UTC at which a guild receives its daily post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    /// Six-field cron expression (seconds first) for this time of day.
    pub fn to_cron(&self) -> String {
        format!("0 {} {} * * *", self.minute, self.hour)
    }

    fn as_naive(&self) -> NaiveTime {
        // hour/minute are range-checked in `parse_time`
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Invalid time format: {0}. Use formats like: \"3am\", \"15:00\", \"3:30pm\"")]
    InvalidTimeFormat(String),
}

/// Examples shown to users when their input is rejected.
pub fn supported_formats() -> &'static [&'static str] {
    &[
        "3am", "3pm", "12am", "12pm", "15:00", "00:30", "23:59", "3:30pm", "11:45am",
    ]
}

/// Parse "3pm", "3:30pm", "15:00" or a bare hour like "9" into a time of day.
///
/// Input is lowercased and all whitespace is removed first. A trailing `am`/`pm`
/// switches to 12-hour rules: `pm` adds 12 unless the hour is already 12, and
/// `12am` is midnight. Anything that is not digits (plus one optional `:`) is
/// rejected rather than guessed at.
pub fn parse_time(input: &str) -> Result<TimeOfDay, TimeFormatError> {
    let invalid = || TimeFormatError::InvalidTimeFormat(input.to_string());

    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let (clock, meridiem) = if let Some(rest) = cleaned.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = cleaned.strip_suffix("pm") {
        (rest, Some(true))
    } else {
        (cleaned.as_str(), None)
    };

    let (hour_part, minute_part) = match clock.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (clock, None),
    };

    let mut hour = parse_component(hour_part).ok_or_else(invalid)?;
    let minute = match minute_part {
        Some(m) => parse_component(m).ok_or_else(invalid)?,
        None => 0,
    };

    match meridiem {
        Some(true) if hour != 12 => hour += 12,
        Some(false) if hour == 12 => hour = 0,
        _ => {}
    }

    if hour > 23 || minute > 59 {
        return Err(invalid());
    }

    Ok(TimeOfDay { hour, minute })
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Whole days left until `target`, rounded up and never negative.
pub fn days_remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

pub fn has_passed(target: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= target
}

/// First instant strictly after `now` at which the UTC clock reads `time`.
pub fn next_occurrence(time: TimeOfDay, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive().and_time(time.as_naive()).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}
