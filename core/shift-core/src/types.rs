//! Core shift types shared by the classifier, the reconciliation loop and the CLI.
//!
//! Rows arrive from the sheet loosely typed (see `shiftline_protocol::ShiftRow`);
//! [`Shift::from_row`] is the one place they are tightened into these types.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shiftline_protocol::{SegmentRow, ShiftRow};
use std::fmt;

use crate::time::{normalize_sheet_time, parse_shift_date};

// ═══════════════════════════════════════════════════════════════════════════════
// Status
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLabel {
    Draft,
    Offline,
    Active,
    Completed,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Draft => "DRAFT",
            StatusLabel::Offline => "OFFLINE",
            StatusLabel::Active => "ACTIVE",
            StatusLabel::Completed => "COMPLETED",
        }
    }

    /// Case-insensitive; anything else the sheet holds is not a status we know.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Some(StatusLabel::Draft),
            "OFFLINE" => Some(StatusLabel::Offline),
            "ACTIVE" => Some(StatusLabel::Active),
            "COMPLETED" => Some(StatusLabel::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shift Data
// ═══════════════════════════════════════════════════════════════════════════════

/// One clocked-in interval. No end time means still in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl Segment {
    pub fn new(start: &str, end: Option<&str>) -> Self {
        Self {
            start_time: Some(start.to_string()),
            end_time: end.map(str::to_string),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    fn from_row(row: &SegmentRow, tz: Tz) -> Self {
        Self {
            start_time: row.start_time.as_deref().and_then(|t| sheet_time(t, tz)),
            end_time: row.end_time.as_deref().and_then(|t| sheet_time(t, tz)),
        }
    }
}

/// A time cell as the classifier should see it. Only a blank cell is `None`;
/// a cell that isn't a recognizable time is kept as-is and reads as zero minutes.
fn sheet_time(raw: &str, tz: Tz) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(normalize_sheet_time(trimmed, tz).unwrap_or_else(|| trimmed.to_string()))
}

/// All segments for one employee on one calendar date, plus what the store
/// currently says about it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: String,
    /// `None` when the sheet holds no parsable date.
    pub shift_date: Option<NaiveDate>,
    pub segments: Vec<Segment>,
    /// `None` when the stored status is blank or not one we recognize.
    pub status: Option<StatusLabel>,
    pub shift_type: String,
    pub total_duration: f64,
    pub first_start_time: Option<String>,
    pub last_end_time: Option<String>,
}

pub const DEFAULT_SHIFT_TYPE: &str = "Regular";

impl Shift {
    /// Tightens a raw sheet row. Returns `None` for rows without a shift id,
    /// which can't be corrected or edited anyway.
    pub fn from_row(row: &ShiftRow, tz: Tz) -> Option<Self> {
        let shift_id = row.shift_id.clone()?;
        let segments: Vec<Segment> = row
            .segment_rows()
            .iter()
            .map(|s| Segment::from_row(s, tz))
            .collect();

        let first_start_time = row
            .first_start_time
            .as_deref()
            .or(row.start_time.as_deref())
            .and_then(|t| sheet_time(t, tz));
        let last_end_time = row
            .last_end_time
            .as_deref()
            .or(row.end_time.as_deref())
            .and_then(|t| sheet_time(t, tz));

        Some(Self {
            shift_id,
            shift_date: row.date_str().and_then(|d| parse_shift_date(d, tz)),
            segments,
            status: row.status.as_deref().and_then(StatusLabel::parse),
            shift_type: row
                .shift_type
                .clone()
                .unwrap_or_else(|| DEFAULT_SHIFT_TYPE.to_string()),
            total_duration: row.total_duration_hours(),
            first_start_time,
            last_end_time,
        })
    }

    /// First start for display: the first segment, else the summary column.
    pub fn display_start(&self) -> Option<&str> {
        self.segments
            .first()
            .and_then(|s| s.start_time.as_deref())
            .or(self.first_start_time.as_deref())
    }

    /// Last end for display: the last segment, else the summary column.
    pub fn display_end(&self) -> Option<&str> {
        self.segments
            .last()
            .and_then(|s| s.end_time.as_deref())
            .or(self.last_end_time.as_deref())
    }
}

/// Result of comparing the smart status with the stored one. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionDirective {
    pub needs_correction: bool,
    pub corrected_status: StatusLabel,
    pub reason: String,
    pub original_status: Option<StatusLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{classify, StatusRule};
    use serde_json::json;

    fn row(value: serde_json::Value) -> ShiftRow {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(StatusLabel::parse("active"), Some(StatusLabel::Active));
        assert_eq!(StatusLabel::parse(" COMPLETED "), Some(StatusLabel::Completed));
        assert_eq!(StatusLabel::parse("SCHEDULED"), None);
    }

    #[test]
    fn test_status_serializes_upper_case() {
        assert_eq!(
            serde_json::to_value(StatusLabel::Offline).unwrap(),
            json!("OFFLINE")
        );
    }

    #[test]
    fn test_from_row_normalizes_segments() {
        let shift = Shift::from_row(
            &row(json!({
                "shiftId": "SH-7",
                "shiftDate": "2026-10-16",
                "status": "ACTIVE",
                "segments": [
                    {"startTime": "1899-12-30T09:00:00.000Z", "endTime": "12:00"},
                    {"startTime": "13:00", "endTime": ""}
                ]
            })),
            Tz::UTC,
        )
        .unwrap();

        assert_eq!(shift.shift_id, "SH-7");
        assert_eq!(shift.shift_date, NaiveDate::from_ymd_opt(2026, 10, 16));
        assert_eq!(shift.segments[0], Segment::new("09:00", Some("12:00")));
        assert!(shift.segments[1].is_open());
        assert_eq!(shift.status, Some(StatusLabel::Active));
        assert_eq!(shift.shift_type, DEFAULT_SHIFT_TYPE);
    }

    #[test]
    fn test_unreadable_end_time_is_closed_not_open() {
        let now = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();

        for end in ["5pm", "17.00"] {
            let shift = Shift::from_row(
                &row(json!({
                    "shiftId": "SH-8",
                    "shiftDate": "2026-10-16",
                    "segments": [{"startTime": "09:00", "endTime": end}]
                })),
                Tz::UTC,
            )
            .unwrap();

            assert_eq!(shift.segments[0].end_time.as_deref(), Some(end));
            assert!(!shift.segments[0].is_open());
            let result = classify(shift.shift_date, &shift.segments, now);
            assert_eq!(result.status, StatusLabel::Completed, "end time {:?}", end);
            assert_eq!(result.rule, StatusRule::PastLastEnd);
        }
    }

    #[test]
    fn test_blank_end_time_is_open() {
        let shift = Shift::from_row(
            &row(json!({"shiftId": "SH-9", "segments": [{"startTime": "09:00", "endTime": "   "}]})),
            Tz::UTC,
        )
        .unwrap();
        assert!(shift.segments[0].is_open());
    }

    #[test]
    fn test_from_row_without_id_is_dropped() {
        assert!(Shift::from_row(&row(json!({"shiftDate": "2026-10-16"})), Tz::UTC).is_none());
    }

    #[test]
    fn test_unknown_status_is_none() {
        let shift = Shift::from_row(
            &row(json!({"shiftId": "X", "status": "pending"})),
            Tz::UTC,
        )
        .unwrap();
        assert_eq!(shift.status, None);
        assert_eq!(shift.shift_date, None);
    }

    #[test]
    fn test_display_times_fall_back_to_summary_columns() {
        let shift = Shift::from_row(
            &row(json!({
                "shiftId": "X",
                "firstStartTime": "1899-12-30T08:00:00.000Z",
                "lastEndTime": "16:30"
            })),
            Tz::UTC,
        )
        .unwrap();
        assert_eq!(shift.display_start(), Some("08:00"));
        assert_eq!(shift.display_end(), Some("16:30"));
    }
}
