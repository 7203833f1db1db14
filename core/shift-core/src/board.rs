//! Shift board state as a reducer.
//!
//! The board is the list of shifts a user is looking at plus the edit form and
//! segment viewer. All changes go through [`reduce`], so any front end (the CLI
//! today) can replay actions and render the result without owning the rules.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::reconcile::LoadOutcome;
use crate::status::classify;
use crate::time::{duration_hours, is_valid_clock_time, round_hours, time_to_minutes};
use crate::types::{Segment, Shift, StatusLabel, DEFAULT_SHIFT_TYPE};
use shiftline_protocol::SegmentPayload;

pub const LOADING_MESSAGE: &str = "Loading shift data...";
pub const DELETED_MESSAGE: &str = "Shift deleted successfully!";
pub const ADDED_MESSAGE: &str = "Shift added successfully!";
pub const UPDATED_MESSAGE: &str = "Shift updated successfully!";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoardState {
    pub shifts: Vec<Shift>,
    pub message: String,
    pub loading: bool,
    pub editing: Option<EditForm>,
    /// Shift whose segments are being viewed.
    pub viewing: Option<String>,
}

impl BoardState {
    pub fn viewing_shift(&self) -> Option<&Shift> {
        let id = self.viewing.as_deref()?;
        self.shifts.iter().find(|shift| shift.shift_id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    LoadStarted,
    Loaded(LoadOutcome),
    LoadFailed(String),
    OpenEdit(Shift),
    NewShift(NaiveDate),
    SetEditStart(String),
    SetEditEnd(String),
    SetShiftType(String),
    CancelEdit,
    /// The store accepted the open edit. The reload that follows brings the new data.
    EditSaved { created: bool },
    ViewSegments(String),
    CloseSegments,
    ShiftDeleted(String),
}

pub fn reduce(mut state: BoardState, action: BoardAction) -> BoardState {
    match action {
        BoardAction::LoadStarted => {
            state.loading = true;
            state.message = LOADING_MESSAGE.to_string();
        }
        BoardAction::Loaded(outcome) => {
            state.loading = false;
            state.shifts = outcome.shifts;
            state.message = outcome.message;
            if state.viewing_shift().is_none() {
                state.viewing = None;
            }
        }
        BoardAction::LoadFailed(message) => {
            state.loading = false;
            state.shifts.clear();
            state.viewing = None;
            state.message = format!("Error: {}", message);
        }
        BoardAction::OpenEdit(shift) => {
            state.editing = Some(EditForm::for_shift(&shift));
        }
        BoardAction::NewShift(date) => {
            state.editing = Some(EditForm::for_new(date));
        }
        BoardAction::SetEditStart(value) => {
            if let Some(form) = state.editing.as_mut() {
                form.first_start_time = value;
            }
        }
        BoardAction::SetEditEnd(value) => {
            if let Some(form) = state.editing.as_mut() {
                form.last_end_time = value;
            }
        }
        BoardAction::SetShiftType(value) => {
            if let Some(form) = state.editing.as_mut() {
                form.shift_type = value;
            }
        }
        BoardAction::CancelEdit => {
            state.editing = None;
        }
        BoardAction::EditSaved { created } => {
            state.editing = None;
            state.message = if created {
                ADDED_MESSAGE.to_string()
            } else {
                UPDATED_MESSAGE.to_string()
            };
        }
        BoardAction::ViewSegments(shift_id) => {
            if state.shifts.iter().any(|shift| shift.shift_id == shift_id) {
                state.viewing = Some(shift_id);
            }
        }
        BoardAction::CloseSegments => {
            state.viewing = None;
        }
        BoardAction::ShiftDeleted(shift_id) => {
            state.shifts.retain(|shift| shift.shift_id != shift_id);
            if state.viewing.as_deref() == Some(shift_id.as_str()) {
                state.viewing = None;
            }
            if state
                .editing
                .as_ref()
                .and_then(|form| form.shift_id.as_deref())
                == Some(shift_id.as_str())
            {
                state.editing = None;
            }
            state.message = DELETED_MESSAGE.to_string();
        }
    }
    state
}

// ═══════════════════════════════════════════════════════════════════════════════
// Edit Form
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditForm {
    /// `None` while adding a shift for a date that has none.
    pub shift_id: Option<String>,
    pub shift_date: Option<NaiveDate>,
    pub first_start_time: String,
    pub last_end_time: String,
    pub shift_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Please fill in both start and end times.")]
    MissingTimes,
    #[error("Invalid time range. Shift must be within 24 hours.")]
    InvalidRange,
    #[error("Please enter valid time format (HH:MM).")]
    InvalidFormat,
}

/// A validated edit, ready to be written back as a single-segment shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditPlan {
    pub shift_id: Option<String>,
    pub shift_date: Option<NaiveDate>,
    pub segments: Vec<Segment>,
    pub total_duration: f64,
    pub status: StatusLabel,
    pub shift_type: String,
}

impl EditForm {
    pub fn for_shift(shift: &Shift) -> Self {
        Self {
            shift_id: Some(shift.shift_id.clone()),
            shift_date: shift.shift_date,
            first_start_time: shift.display_start().unwrap_or_default().to_string(),
            last_end_time: shift.display_end().unwrap_or_default().to_string(),
            shift_type: shift.shift_type.clone(),
        }
    }

    pub fn for_new(date: NaiveDate) -> Self {
        Self {
            shift_id: None,
            shift_date: Some(date),
            first_start_time: String::new(),
            last_end_time: String::new(),
            shift_type: DEFAULT_SHIFT_TYPE.to_string(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.shift_id.is_none()
    }

    /// Validates the form and derives the replacement segment and smart status.
    ///
    /// Checks run in a fixed order: presence, range (0 < hours < 24), format.
    pub fn plan(&self, now: NaiveDateTime) -> Result<EditPlan, EditError> {
        let start = self.first_start_time.trim();
        let end = self.last_end_time.trim();
        if start.is_empty() || end.is_empty() {
            return Err(EditError::MissingTimes);
        }

        let hours = duration_hours(start, end);
        if hours <= 0.0 || hours >= 24.0 {
            return Err(EditError::InvalidRange);
        }

        if !is_valid_clock_time(start) || !is_valid_clock_time(end) {
            return Err(EditError::InvalidFormat);
        }

        let segments = vec![Segment::new(&pad(start), Some(&pad(end)))];
        let status = classify(self.shift_date, &segments, now).status;

        Ok(EditPlan {
            shift_id: self.shift_id.clone(),
            shift_date: self.shift_date,
            segments,
            total_duration: round_hours(hours),
            status,
            shift_type: self.shift_type.clone(),
        })
    }
}

impl EditPlan {
    pub fn is_new(&self) -> bool {
        self.shift_id.is_none()
    }

    pub fn first_start_time(&self) -> &str {
        self.segments
            .first()
            .and_then(|s| s.start_time.as_deref())
            .unwrap_or_default()
    }

    pub fn last_end_time(&self) -> &str {
        self.segments
            .last()
            .and_then(|s| s.end_time.as_deref())
            .unwrap_or_default()
    }

    /// `YYYY-MM-DD`, or empty when the shift had no readable date.
    pub fn date_string(&self) -> String {
        self.shift_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Segments in the shape the sheet stores, numbered from 1.
    pub fn segment_payloads(&self) -> Vec<SegmentPayload> {
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let start = segment.start_time.clone().unwrap_or_default();
                let end = segment.end_time.clone().unwrap_or_default();
                SegmentPayload {
                    segment_id: index as u32 + 1,
                    duration: round_hours(duration_hours(&start, &end)),
                    start_time: start,
                    end_time: end,
                }
            })
            .collect()
    }
}

fn pad(time: &str) -> String {
    let minutes = time_to_minutes(time);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Date Rows
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRow {
    pub date: NaiveDate,
    /// Short weekday, e.g. "Fri".
    pub day_name: String,
    /// e.g. "Oct 16, 2026".
    pub display_date: String,
}

/// Every date from the first of `today`'s month through two months after `today`.
pub fn date_rows(today: NaiveDate) -> Vec<DateRow> {
    let start = today.with_day(1).unwrap_or(today);
    let end = today.checked_add_months(Months::new(2)).unwrap_or(today);

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DateRow {
            date,
            day_name: date.format("%a").to_string(),
            display_date: date.format("%b %-d, %Y").to_string(),
        })
        .collect()
}

/// Shifts keyed by date. A later shift for the same date replaces an earlier one.
pub fn shifts_by_date(shifts: &[Shift]) -> BTreeMap<NaiveDate, &Shift> {
    shifts
        .iter()
        .filter_map(|shift| shift.shift_date.map(|date| (date, shift)))
        .collect()
}
