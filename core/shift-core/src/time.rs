//! Clock-time arithmetic.
//!
//! Clock times travel as zero-padded `HH:MM` strings. Nothing here fails:
//! malformed input reads as zero minutes or zero hours so a single bad cell
//! never takes down a whole load.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shiftline_protocol::SHEET_EPOCH_DATE;

use crate::patterns::{RE_EDIT_CLOCK_TIME, RE_LOOSE_CLOCK_TIME, RE_PADDED_CLOCK_TIME};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes since midnight for an `HH:MM` string, in `[0, 1439]`.
///
/// Hour and minute are read independently; a component that isn't a number
/// counts as zero. A total that falls outside one day is treated as malformed.
pub fn time_to_minutes(time: &str) -> u32 {
    let mut parts = time.trim().split(':');
    let hours = parts.next().and_then(parse_component).unwrap_or(0);
    let minutes = parts.next().and_then(parse_component).unwrap_or(0);

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .filter(|total| *total < MINUTES_PER_DAY)
        .unwrap_or(0)
}

fn parse_component(part: &str) -> Option<u32> {
    part.trim().parse::<u32>().ok()
}

/// Minutes since midnight for a wall-clock instant. Seconds are dropped.
pub fn minutes_of_day(now: &NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Strict `HH:MM` parse.
pub fn parse_clock_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()
}

/// Hours between two clock times, wrapping past midnight when `end < start`.
///
/// Full precision; callers round for display with [`round_hours`].
/// Returns 0.0 when either side doesn't parse.
pub fn duration_hours(start: &str, end: &str) -> f64 {
    let (Some(start), Some(end)) = (parse_clock_time(start), parse_clock_time(end)) else {
        return 0.0;
    };

    let mut minutes = end.signed_duration_since(start).num_minutes();
    if minutes < 0 {
        minutes += i64::from(MINUTES_PER_DAY);
    }
    minutes as f64 / 60.0
}

/// Two-decimal rounding used wherever hours are shown.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

pub fn is_valid_clock_time(time: &str) -> bool {
    RE_EDIT_CLOCK_TIME.is_match(time)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sheet Value Normalization
// ═══════════════════════════════════════════════════════════════════════════════

/// Normalizes a time cell from the sheet into `HH:MM`.
///
/// Accepted shapes:
/// - `HH:MM` (returned as-is) and `H:MM` (zero-padded)
/// - time-only cells the sheet serializes as `1899-12-30T…` datetimes, read in UTC
/// - any other RFC 3339 timestamp, read in `tz`
pub fn normalize_sheet_time(raw: &str, tz: Tz) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if RE_PADDED_CLOCK_TIME.is_match(raw) {
        return Some(raw.to_string());
    }

    if let Some(caps) = RE_LOOSE_CLOCK_TIME.captures(raw) {
        let hours = parse_component(&caps[1])?;
        let minutes = parse_component(&caps[2])?;
        return Some(format!("{:02}:{:02}", hours, minutes));
    }

    if raw.contains(SHEET_EPOCH_DATE) {
        return parse_timestamp(raw).map(|dt| dt.format("%H:%M").to_string());
    }

    if raw.contains('T') {
        if let Some(dt) = parse_timestamp(raw) {
            return Some(dt.with_timezone(&tz).format("%H:%M").to_string());
        }
        return parse_naive_timestamp(raw).map(|dt| dt.format("%H:%M").to_string());
    }

    None
}

/// Reads a shift date cell. Plain `YYYY-MM-DD` is taken as-is; full timestamps
/// are converted into `tz` before the date is taken.
pub fn parse_shift_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(dt) = parse_timestamp(raw) {
        return Some(dt.with_timezone(&tz).date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

// ═══════════════════════════════════════════════════════════════════════════════
// 12-Hour Picker Conversion
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    Am,
    Pm,
}

/// The three wheels of the time picker: hour 1-12, minute, AM/PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwelveHour {
    pub hour: u32,
    pub minute: u32,
    pub period: Meridiem,
}

impl TwelveHour {
    pub fn to_clock_time(&self) -> String {
        let hour = match (self.period, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
            (Meridiem::Am, h) => h,
        };
        format!("{:02}:{:02}", hour, self.minute)
    }
}

impl Default for TwelveHour {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
            period: Meridiem::Am,
        }
    }
}

/// Splits a 24-hour value into picker wheels. `None` when the value isn't a time.
pub fn to_twelve_hour(value: &str) -> Option<TwelveHour> {
    let time = parse_clock_time(value)?;
    let hour = time.hour();
    let (hour12, period) = match hour {
        0 => (12, Meridiem::Am),
        1..=11 => (hour, Meridiem::Am),
        12 => (12, Meridiem::Pm),
        _ => (hour - 12, Meridiem::Pm),
    };
    Some(TwelveHour {
        hour: hour12,
        minute: time.minute(),
        period,
    })
}

/// Hour wheel labels, "1" through "12".
pub fn hour_options() -> Vec<String> {
    (1..=12).map(|h| h.to_string()).collect()
}

/// Minute wheel labels, "00" through "59".
pub fn minute_options() -> Vec<String> {
    (0..60).map(|m| format!("{:02}", m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_minutes_basic() {
        assert_eq!(time_to_minutes("00:00"), 0);
        assert_eq!(time_to_minutes("09:30"), 570);
        assert_eq!(time_to_minutes("23:59"), 1439);
    }

    #[test]
    fn test_time_to_minutes_malformed_is_zero() {
        assert_eq!(time_to_minutes(""), 0);
        assert_eq!(time_to_minutes("garbage"), 0);
        assert_eq!(time_to_minutes("24:00"), 0);
        assert_eq!(time_to_minutes("99999999999:00"), 0);
    }

    #[test]
    fn test_time_to_minutes_reads_components_independently() {
        assert_eq!(time_to_minutes("xx:30"), 30);
        assert_eq!(time_to_minutes("7"), 420);
    }

    #[test]
    fn test_duration_wraps_midnight() {
        assert_eq!(duration_hours("23:30", "00:30"), 1.0);
    }

    #[test]
    fn test_duration_same_day() {
        assert_eq!(duration_hours("09:00", "17:30"), 8.5);
        assert_eq!(duration_hours("09:00", "09:00"), 0.0);
    }

    #[test]
    fn test_duration_unparsable_is_zero() {
        assert_eq!(duration_hours("", "17:00"), 0.0);
        assert_eq!(duration_hours("09:00", "late"), 0.0);
    }

    #[test]
    fn test_round_hours_keeps_two_decimals() {
        let raw = duration_hours("09:00", "09:20");
        assert!((raw - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(round_hours(raw), 0.33);
    }

    #[test]
    fn test_normalize_padded_and_loose() {
        assert_eq!(normalize_sheet_time("08:15", Tz::UTC).as_deref(), Some("08:15"));
        assert_eq!(normalize_sheet_time("8:15", Tz::UTC).as_deref(), Some("08:15"));
        assert_eq!(normalize_sheet_time("  ", Tz::UTC), None);
        assert_eq!(normalize_sheet_time("soon", Tz::UTC), None);
    }

    #[test]
    fn test_normalize_sheet_epoch_reads_utc() {
        let value = "1899-12-30T09:30:00.000Z";
        assert_eq!(
            normalize_sheet_time(value, chrono_tz::Asia::Kolkata).as_deref(),
            Some("09:30")
        );
    }

    #[test]
    fn test_normalize_timestamp_uses_zone() {
        let value = "2026-10-16T03:30:00Z";
        assert_eq!(
            normalize_sheet_time(value, chrono_tz::Asia::Kolkata).as_deref(),
            Some("09:00")
        );
    }

    #[test]
    fn test_parse_shift_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 16);
        assert_eq!(parse_shift_date("2026-10-16", Tz::UTC), expected);
        assert_eq!(
            parse_shift_date("2026-10-15T18:30:00.000Z", chrono_tz::Asia::Kolkata),
            expected
        );
        assert_eq!(parse_shift_date("2026-10-16 extra", Tz::UTC), expected);
        assert_eq!(parse_shift_date("someday", Tz::UTC), None);
    }

    #[test]
    fn test_twelve_hour_conversion() {
        let pm = to_twelve_hour("13:05").unwrap();
        assert_eq!(
            pm,
            TwelveHour {
                hour: 1,
                minute: 5,
                period: Meridiem::Pm
            }
        );
        assert_eq!(pm.to_clock_time(), "13:05");

        let midnight = to_twelve_hour("00:45").unwrap();
        assert_eq!(midnight.hour, 12);
        assert_eq!(midnight.period, Meridiem::Am);
        assert_eq!(midnight.to_clock_time(), "00:45");

        let noon = to_twelve_hour("12:00").unwrap();
        assert_eq!(noon.period, Meridiem::Pm);
        assert_eq!(noon.to_clock_time(), "12:00");
    }

    #[test]
    fn test_twelve_hour_rejects_non_times() {
        assert_eq!(to_twelve_hour(""), None);
        assert_eq!(to_twelve_hour("25:00"), None);
    }

    #[test]
    fn test_picker_options() {
        assert_eq!(hour_options().len(), 12);
        assert_eq!(minute_options()[7], "07");
    }
}
