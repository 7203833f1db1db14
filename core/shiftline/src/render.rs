//! Plain-text output for the board and for offline classification.

use std::fmt::Write;

use chrono::NaiveDate;
use shift_core::board::{date_rows, shifts_by_date};
use shift_core::time::{duration_hours, round_hours};
use shift_core::{BoardState, CorrectionDirective, Segment, Shift};

const NO_DATE: &str = "----------";

fn status_text(shift: &Shift) -> &'static str {
    shift.status.map(|s| s.as_str()).unwrap_or("UNKNOWN")
}

fn segments_text(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "no segments".to_string();
    }
    segments
        .iter()
        .map(|s| {
            format!(
                "{}-{}",
                s.start_time.as_deref().unwrap_or("?"),
                s.end_time.as_deref().unwrap_or("…")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn shift_line(shift: &Shift) -> String {
    let date = shift
        .shift_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_DATE.to_string());
    format!(
        "{}  {:<14} {:<10} {:>6.2}h  {}  [{}]",
        date,
        shift.shift_id,
        status_text(shift),
        shift.total_duration,
        segments_text(&shift.segments),
        shift.shift_type
    )
}

/// The shift list, or every date in the window when `calendar` is set.
pub fn board(state: &BoardState, calendar: Option<NaiveDate>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.message);

    match calendar {
        Some(today) => {
            let by_date = shifts_by_date(&state.shifts);
            for row in date_rows(today) {
                match by_date.get(&row.date) {
                    Some(shift) => {
                        let _ = writeln!(out, "{} {}", row.day_name, shift_line(shift));
                    }
                    None => {
                        let _ = writeln!(out, "{} {}  -", row.day_name, row.date.format("%Y-%m-%d"));
                    }
                }
            }
        }
        None => {
            for shift in &state.shifts {
                let _ = writeln!(out, "{}", shift_line(shift));
            }
        }
    }
    out
}

/// One shift's segments, numbered, with per-segment hours.
pub fn segments(shift: &Shift) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", shift_line(shift));
    if shift.segments.is_empty() {
        let _ = writeln!(out, "  no segments");
    }
    for (index, segment) in shift.segments.iter().enumerate() {
        let start = segment.start_time.as_deref().unwrap_or("?");
        match segment.end_time.as_deref() {
            Some(end) => {
                let hours = round_hours(duration_hours(start, end));
                let _ = writeln!(out, "  {}. {} - {}  {:.2}h", index + 1, start, end, hours);
            }
            None => {
                let _ = writeln!(out, "  {}. {} - open", index + 1, start);
            }
        }
    }
    out
}

pub fn classifications(reports: &[(&Shift, CorrectionDirective)]) -> String {
    let mut out = String::new();
    for (shift, directive) in reports {
        let marker = if directive.needs_correction { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<14} {:<10} -> {:<10} {}",
            marker,
            shift.shift_id,
            status_text(shift),
            directive.corrected_status.as_str(),
            directive.reason
        );
    }
    let pending = reports.iter().filter(|(_, d)| d.needs_correction).count();
    let _ = writeln!(out, "{} of {} shifts need correction", pending, reports.len());
    out
}
