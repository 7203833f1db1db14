//! Status reconciliation against the remote shift store.
//!
//! Every trigger (initial load, explicit refresh, visibility regained, forced
//! refresh) goes through [`Reconciler::handle`], which runs at most one pass at a
//! time. A trigger that arrives while a pass is in flight is skipped rather than
//! queued; the pass already running will present fresh data anyway.
//!
//! Within a pass, corrections are issued one shift at a time and each call is
//! awaited before the next starts. A failed correction is logged and the pass
//! moves on. There is no retry beyond the single fix → sync fallback, and no
//! re-validation of a shift after its correction within the same pass.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{ApiOutcome, Identity, ShiftApi};
use crate::board::EditPlan;
use crate::error::Result;
use crate::status::{detect, sync_reason};
use crate::types::{CorrectionDirective, Shift};

/// Reason sent with fallback syncs issued by the visibility pass.
pub const VISIBILITY_SYNC_REASON: &str = "Auto-corrected on tab switch";

pub const EMPTY_LOAD_MESSAGE: &str = "Ready to add shift times";

// ═══════════════════════════════════════════════════════════════════════════════
// Clock
// ═══════════════════════════════════════════════════════════════════════════════

/// Wall-clock source. Classification only ever sees local naive time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Current time in a fixed IANA zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Triggers and Outcomes
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// First load for an identity.
    Load,
    /// Explicit refresh (button, parent-driven refresh, poll tick).
    Refresh,
    /// The view became visible again; sweep every shift, then reload once.
    VisibilityRegained,
    /// Debug-console style forced refresh.
    Forced { detail: String },
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Load => "load",
            Trigger::Refresh => "refresh",
            Trigger::VisibilityRegained => "visibility_regained",
            Trigger::Forced { .. } => "forced",
        }
    }
}

/// What the caller should present after a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadOutcome {
    pub shifts: Vec<Shift>,
    pub corrections_applied: usize,
    /// Fetches issued by this pass, the initial one included.
    pub fetch_count: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PassOutcome {
    Completed(LoadOutcome),
    Skipped { trigger: Trigger },
}

/// Result of writing an edit back to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub write: ApiOutcome,
    pub created: bool,
    /// The refresh pass run after an accepted write. `None` when the write was
    /// rejected or the reload failed.
    pub refresh: Option<PassOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassKind {
    Load,
    Visibility,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Reconciler
// ═══════════════════════════════════════════════════════════════════════════════

pub struct Reconciler<A, C> {
    api: A,
    clock: C,
    identity: Identity,
    in_flight: AtomicBool,
}

impl<A: ShiftApi, C: Clock> Reconciler<A, C> {
    pub fn new(api: A, clock: C, identity: Identity) -> Self {
        Self {
            api,
            clock,
            identity,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Single entry point for every trigger.
    ///
    /// Fetch failures surface as `Err`; the caller clears its list and shows the message.
    pub async fn handle(&self, trigger: Trigger) -> Result<PassOutcome> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!(trigger = trigger.as_str(), "Reconciliation pass already in flight; skipping");
            return Ok(PassOutcome::Skipped { trigger });
        };

        info!(
            trigger = trigger.as_str(),
            employee_id = %self.identity.employee_id,
            "Reconciliation pass started"
        );

        let outcome = match trigger {
            Trigger::VisibilityRegained => self.visibility_pass().await?,
            Trigger::Load | Trigger::Refresh | Trigger::Forced { .. } => self.load_pass().await?,
        };

        info!(
            trigger = trigger.as_str(),
            shifts = outcome.shifts.len(),
            corrections = outcome.corrections_applied,
            fetches = outcome.fetch_count,
            "Reconciliation pass finished"
        );
        Ok(PassOutcome::Completed(outcome))
    }

    /// Writes a validated edit (create or update), then refreshes once.
    ///
    /// A write error propagates. A failed reload after an accepted write is only
    /// logged, since the write itself already landed.
    pub async fn save_edit(&self, plan: &EditPlan) -> Result<SaveOutcome> {
        let created = plan.is_new();
        let write = match plan.shift_id.as_deref() {
            Some(shift_id) => self.api.update_shift(&self.identity, shift_id, plan).await?,
            None => self.api.submit_shift(&self.identity, plan).await?,
        };

        if !write.success {
            warn!(
                shift_id = ?plan.shift_id,
                message = %write.message,
                "Store rejected shift edit"
            );
            return Ok(SaveOutcome {
                write,
                created,
                refresh: None,
            });
        }

        info!(
            shift_id = ?plan.shift_id,
            created,
            status = %plan.status,
            "Shift edit saved"
        );
        let refresh = match self.handle(Trigger::Refresh).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(error = %err, "Reload after edit failed");
                None
            }
        };
        Ok(SaveOutcome {
            write,
            created,
            refresh,
        })
    }

    /// Fetch → correct → re-fetch once if anything was corrected.
    async fn load_pass(&self) -> Result<LoadOutcome> {
        let now = self.clock.now();
        let shifts = self.fetch().await?;

        if shifts.is_empty() {
            return Ok(LoadOutcome {
                shifts,
                corrections_applied: 0,
                fetch_count: 1,
                message: EMPTY_LOAD_MESSAGE.to_string(),
            });
        }

        let applied = self
            .correct_all(shifts.iter().collect(), now, PassKind::Load)
            .await;
        if applied == 0 {
            return Ok(LoadOutcome {
                message: format!("Loaded {} shifts", shifts.len()),
                shifts,
                corrections_applied: 0,
                fetch_count: 1,
            });
        }

        debug!(corrections = applied, "Re-fetching after status corrections");
        let fresh = self.fetch().await?;
        Ok(LoadOutcome {
            message: format!(
                "Loaded {} shifts ({} status corrections applied)",
                fresh.len(),
                applied
            ),
            shifts: fresh,
            corrections_applied: applied,
            fetch_count: 2,
        })
    }

    /// Sweep every dated shift, then reload exactly once whatever happened.
    ///
    /// A failed sweep fetch is logged; the reload still runs.
    async fn visibility_pass(&self) -> Result<LoadOutcome> {
        let now = self.clock.now();

        let applied = match self.fetch().await {
            Ok(all) => {
                let dated: Vec<&Shift> = all
                    .iter()
                    .filter(|shift| shift.shift_date.is_some())
                    .collect();
                self.correct_all(dated, now, PassKind::Visibility).await
            }
            Err(err) => {
                warn!(error = %err, "Visibility sweep fetch failed; reloading anyway");
                0
            }
        };

        let shifts = self.fetch().await?;
        let message = if shifts.is_empty() {
            EMPTY_LOAD_MESSAGE.to_string()
        } else {
            format!("Loaded {} shifts", shifts.len())
        };
        Ok(LoadOutcome {
            shifts,
            corrections_applied: applied,
            fetch_count: 2,
            message,
        })
    }

    async fn fetch(&self) -> Result<Vec<Shift>> {
        let shifts = self.api.fetch_shifts(&self.identity, true).await?;
        debug!(count = shifts.len(), "Fetched shifts");
        Ok(shifts)
    }

    /// Sequential correction pass. Returns how many corrections the store accepted.
    async fn correct_all(&self, shifts: Vec<&Shift>, now: NaiveDateTime, kind: PassKind) -> usize {
        let mut applied = 0;

        for shift in shifts {
            let directive = detect(shift, now);
            if !directive.needs_correction {
                debug!(
                    shift_id = %shift.shift_id,
                    status = %directive.corrected_status,
                    "Shift status correct"
                );
                continue;
            }

            info!(
                shift_id = %shift.shift_id,
                from = ?directive.original_status,
                to = %directive.corrected_status,
                reason = %directive.reason,
                "Correcting shift status"
            );

            match self.correct_one(shift, &directive, kind).await {
                Ok(true) => applied += 1,
                Ok(false) => warn!(
                    shift_id = %shift.shift_id,
                    "Store rejected status correction"
                ),
                Err(err) => warn!(
                    shift_id = %shift.shift_id,
                    error = %err,
                    "Status correction failed; continuing with remaining shifts"
                ),
            }
        }

        applied
    }

    /// Direct fix, falling back to a sync with a reason when the store says no.
    /// An error from the fix call itself skips the fallback.
    async fn correct_one(
        &self,
        shift: &Shift,
        directive: &CorrectionDirective,
        kind: PassKind,
    ) -> Result<bool> {
        let fix = self
            .api
            .apply_status_fix(&shift.shift_id, directive.corrected_status)
            .await?;
        if fix.success {
            return Ok(true);
        }

        warn!(
            shift_id = %shift.shift_id,
            message = %fix.message,
            "Status fix rejected; falling back to sync"
        );
        let reason = match kind {
            PassKind::Load => sync_reason(directive),
            PassKind::Visibility => VISIBILITY_SYNC_REASON.to_string(),
        };
        let sync = self
            .api
            .apply_status_sync(&shift.shift_id, directive.corrected_status, &reason)
            .await?;
        Ok(sync.success)
    }
}

/// Holds the in-flight flag for the duration of one pass.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_guard_is_exclusive_until_dropped() {
        let flag = AtomicBool::new(false);
        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());
        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_fixed_clock() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }

    #[test]
    fn test_trigger_names() {
        assert_eq!(Trigger::VisibilityRegained.as_str(), "visibility_regained");
        assert_eq!(
            Trigger::Forced {
                detail: "console".to_string()
            }
            .as_str(),
            "forced"
        );
    }
}
