//! Compares the smart status with the stored one.

use chrono::NaiveDateTime;

use super::classifier::classify;
use crate::types::{CorrectionDirective, Shift};

pub fn detect(shift: &Shift, now: NaiveDateTime) -> CorrectionDirective {
    let classification = classify(shift.shift_date, &shift.segments, now);

    CorrectionDirective {
        needs_correction: shift.status != Some(classification.status),
        corrected_status: classification.status,
        reason: classification.rule.reason().to_string(),
        original_status: shift.status,
    }
}

/// Reason text sent with the fallback sync call.
pub fn sync_reason(directive: &CorrectionDirective) -> String {
    let original = directive
        .original_status
        .map(|s| s.as_str())
        .unwrap_or("UNKNOWN");
    format!(
        "Smart status update: {} → {}",
        original, directive.corrected_status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Segment, StatusLabel};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn shift(status: Option<StatusLabel>) -> Shift {
        Shift {
            shift_id: "SH-1".to_string(),
            shift_date: NaiveDate::from_ymd_opt(2026, 10, 16),
            segments: vec![Segment::new("09:00", Some("17:00"))],
            status,
            ..Default::default()
        }
    }

    #[test]
    fn test_matching_status_needs_no_correction() {
        let directive = detect(&shift(Some(StatusLabel::Completed)), now());
        assert!(!directive.needs_correction);
        assert_eq!(directive.corrected_status, StatusLabel::Completed);
        assert_eq!(directive.original_status, Some(StatusLabel::Completed));
    }

    #[test]
    fn test_stale_status_needs_correction() {
        let directive = detect(&shift(Some(StatusLabel::Active)), now());
        assert!(directive.needs_correction);
        assert_eq!(directive.corrected_status, StatusLabel::Completed);
        assert_eq!(
            directive.reason,
            "Current time is past the last segment end"
        );
    }

    #[test]
    fn test_unknown_stored_status_always_needs_correction() {
        let directive = detect(&shift(None), now());
        assert!(directive.needs_correction);
        assert_eq!(directive.original_status, None);
    }

    #[test]
    fn test_detect_is_deterministic() {
        let s = shift(Some(StatusLabel::Draft));
        assert_eq!(detect(&s, now()), detect(&s, now()));
    }

    #[test]
    fn test_sync_reason_text() {
        let directive = detect(&shift(Some(StatusLabel::Active)), now());
        assert_eq!(
            sync_reason(&directive),
            "Smart status update: ACTIVE → COMPLETED"
        );
        let unknown = detect(&shift(None), now());
        assert_eq!(
            sync_reason(&unknown),
            "Smart status update: UNKNOWN → COMPLETED"
        );
    }
}
