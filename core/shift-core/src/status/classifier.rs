//! Maps a shift's date and segments to a status label.
//! Rules are checked in order; the first match wins.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::time::{minutes_of_day, time_to_minutes};
use crate::types::{Segment, StatusLabel};

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusRule {
    FutureDate,
    NoSegments,
    NotStarted,
    OpenSegment,
    BeforeLastEnd,
    PastLastEnd,
    ClosedWithoutEnd,
}

impl StatusRule {
    pub fn reason(&self) -> &'static str {
        match self {
            StatusRule::FutureDate => "Shift date is in the future",
            StatusRule::NoSegments => "No time segments recorded",
            StatusRule::NotStarted => "Current time is before the first segment start",
            StatusRule::OpenSegment => "A segment is still open (no end time)",
            StatusRule::BeforeLastEnd => "Current time is before the last segment end",
            StatusRule::PastLastEnd => "Current time is past the last segment end",
            StatusRule::ClosedWithoutEnd => {
                "All segments closed without a usable end time; left active for manual completion"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: StatusLabel,
    pub rule: StatusRule,
}

impl Classification {
    fn new(status: StatusLabel, rule: StatusRule) -> Self {
        Self { status, rule }
    }
}

/// Smart status for one shift at `now`.
///
/// `shift_date` of `None` (unparsable in the sheet) is never treated as future.
/// A same-day shift with no segments is `DRAFT`, not `OFFLINE`: `OFFLINE` needs a
/// first segment whose start hasn't arrived yet.
pub fn classify(
    shift_date: Option<NaiveDate>,
    segments: &[Segment],
    now: NaiveDateTime,
) -> Classification {
    if shift_date.is_some_and(|date| date > now.date()) {
        return Classification::new(StatusLabel::Draft, StatusRule::FutureDate);
    }

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Classification::new(StatusLabel::Draft, StatusRule::NoSegments);
    };

    let current = minutes_of_day(&now);

    if let Some(start) = first.start_time.as_deref() {
        if current < time_to_minutes(start) {
            return Classification::new(StatusLabel::Offline, StatusRule::NotStarted);
        }
    }

    if segments.iter().any(Segment::is_open) {
        return Classification::new(StatusLabel::Active, StatusRule::OpenSegment);
    }

    match last.end_time.as_deref() {
        Some(end) if current < time_to_minutes(end) => {
            Classification::new(StatusLabel::Active, StatusRule::BeforeLastEnd)
        }
        Some(_) => Classification::new(StatusLabel::Completed, StatusRule::PastLastEnd),
        None => Classification::new(StatusLabel::Active, StatusRule::ClosedWithoutEnd),
    }
}
