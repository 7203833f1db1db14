//! Wire types for the spreadsheet-backed shift API.
//!
//! This crate is shared by shift-core and the shiftline CLI to prevent schema drift.
//! The remote script remains the authority on validation, but clients reuse the
//! same types to build requests and to read its loosely typed responses.
//!
//! Every request is a JSON object with an `action` discriminator. Every response is
//! an envelope `{ success, message, data }` where `data` is either a single row or
//! an array of rows.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024; // 4MB

/// Date prefix the spreadsheet uses when a time-only cell is serialized as a datetime.
pub const SHEET_EPOCH_DATE: &str = "1899-12-30";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    GetShifts {
        employee_id: String,
        force_refresh: bool,
    },
    #[serde(rename_all = "camelCase")]
    FixShiftStatus {
        shift_id: String,
        correct_status: String,
    },
    #[serde(rename_all = "camelCase")]
    SyncStatusToSheet {
        shift_id: String,
        status: String,
        reason: String,
    },
    #[serde(rename_all = "camelCase")]
    DeleteShift { shift_id: String },
    #[serde(rename_all = "camelCase")]
    CompleteShift {
        shift_id: String,
        employee_id: String,
        completed_at: String,
        date: String,
    },
    /// Creates a shift for a date that has none.
    #[serde(rename_all = "camelCase")]
    SubmitTimeSegments {
        segments: Vec<SegmentPayload>,
        employee_name: String,
        employee_id: String,
        date: String,
        shift_type: String,
    },
    /// Replaces an existing shift's segments and records who edited it.
    #[serde(rename_all = "camelCase")]
    UpdateShiftWithEditTracking {
        shift_id: String,
        employee_name: String,
        employee_id: String,
        shift_date: String,
        shift_type: String,
        segments: Vec<SegmentPayload>,
        first_start_time: String,
        last_end_time: String,
        total_duration: f64,
        schedule_status: String,
        is_update: bool,
        is_employee_edit: bool,
        edited_by: String,
        edited_by_id: String,
    },
}

/// One segment as written back to the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentPayload {
    pub segment_id: u32,
    pub start_time: String,
    pub end_time: String,
    pub duration: f64,
}

impl Request {
    pub fn action_name(&self) -> &'static str {
        match self {
            Request::GetShifts { .. } => "getShifts",
            Request::FixShiftStatus { .. } => "fixShiftStatus",
            Request::SyncStatusToSheet { .. } => "syncStatusToSheet",
            Request::DeleteShift { .. } => "deleteShift",
            Request::CompleteShift { .. } => "completeShift",
            Request::SubmitTimeSegments { .. } => "submitTimeSegments",
            Request::UpdateShiftWithEditTracking { .. } => "updateShiftWithEditTracking",
        }
    }

    pub fn validate(&self) -> Result<(), ErrorInfo> {
        match self {
            Request::GetShifts { employee_id, .. } => require("employee_id", employee_id),
            Request::FixShiftStatus {
                shift_id,
                correct_status,
            } => {
                require("shift_id", shift_id)?;
                require("correct_status", correct_status)
            }
            Request::SyncStatusToSheet {
                shift_id, status, ..
            } => {
                require("shift_id", shift_id)?;
                require("status", status)
            }
            Request::DeleteShift { shift_id } => require("shift_id", shift_id),
            Request::CompleteShift {
                shift_id,
                employee_id,
                ..
            } => {
                require("shift_id", shift_id)?;
                require("employee_id", employee_id)
            }
            Request::SubmitTimeSegments {
                segments,
                employee_id,
                date,
                ..
            } => {
                require("employee_id", employee_id)?;
                require("date", date)?;
                require_segments(segments)
            }
            Request::UpdateShiftWithEditTracking {
                shift_id,
                employee_id,
                segments,
                ..
            } => {
                require("shift_id", shift_id)?;
                require("employee_id", employee_id)?;
                require_segments(segments)
            }
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), ErrorInfo> {
    if value.trim().is_empty() {
        return Err(ErrorInfo::new(
            &format!("invalid_{}", field),
            format!("{} is required", field),
        ));
    }
    Ok(())
}

fn require_segments(segments: &[SegmentPayload]) -> Result<(), ErrorInfo> {
    if segments.is_empty() {
        return Err(ErrorInfo::new(
            "invalid_segments",
            "at least one segment is required",
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Rows carried in `data`. A single object is treated as a one-element list;
    /// a missing or null payload is an empty list.
    pub fn shift_rows(&self) -> Result<Vec<ShiftRow>, serde_json::Error> {
        match &self.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| ShiftRow::deserialize(item))
                .collect(),
            Some(single) => Ok(vec![ShiftRow::deserialize(single)?]),
        }
    }
}

/// One shift row as the sheet returns it. Most columns are optional and loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRow {
    #[serde(default, alias = "id", deserialize_with = "lenient_string")]
    pub shift_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shift_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<SegmentRow>>,
    #[serde(default)]
    pub time_segments: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shift_type: Option<String>,
    #[serde(default)]
    pub total_duration: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: Option<String>,
}

impl ShiftRow {
    /// `shiftDate`, falling back to the older `date` column.
    pub fn date_str(&self) -> Option<&str> {
        self.shift_date
            .as_deref()
            .or(self.date.as_deref())
            .filter(|value| !value.trim().is_empty())
    }

    /// Segments parsed out of `timeSegments` (an array or a JSON-encoded string),
    /// falling back to the structured `segments` column when that is missing or
    /// unparsable. No usable segment data yields an empty list.
    pub fn segment_rows(&self) -> Vec<SegmentRow> {
        if let Some(raw) = &self.time_segments {
            let parsed = match raw {
                Value::String(text) => serde_json::from_str::<Vec<SegmentRow>>(text),
                other => Vec::<SegmentRow>::deserialize(other),
            };
            if let Ok(rows) = parsed {
                return rows;
            }
        }
        self.segments.clone().unwrap_or_default()
    }

    /// `totalDuration` as hours; numbers and numeric strings both appear in practice.
    pub fn total_duration_hours(&self) -> f64 {
        match &self.total_duration {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRow {
    #[serde(default)]
    pub segment_id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
}

/// Accepts strings, numbers and booleans; `null` and blank strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
