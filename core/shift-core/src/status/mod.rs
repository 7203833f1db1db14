//! Smart Shift Status
//!
//! Derives what a shift's status *should* be from its date, its segments and the
//! current wall-clock time, and compares that with what the sheet has stored.
//!
//! ```text
//! Sheet row → Shift → classify() → Classification → detect() → CorrectionDirective
//!                        (pure)                        (diff)        (drives writes)
//! ```
//!
//! Classification never looks at the stored status. It's recomputed from scratch
//! on every call, so "transition" only means which label the current call produces.
//! Ambiguous cases lean towards `ACTIVE`: a person finalizes a shift, the classifier
//! only calls it `COMPLETED` once the clock is unambiguously past the recorded end.
//!
//! # Module Structure
//!
//! - [`classifier`]: the ordered decision procedure
//! - [`correction`]: diff against the stored status

pub mod classifier;
pub mod correction;

pub use classifier::{classify, Classification, StatusRule};
pub use correction::{detect, sync_reason};
