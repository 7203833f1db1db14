//! # shift-core
//!
//! Core library for shiftline: keeps the status column of an employee's shift
//! sheet consistent with what the clock and the recorded segments say.
//!
//! ## Design Principles
//!
//! - **Pure classification**: the status rules take a date, segments and "now"; no I/O.
//! - **Malformed time is data, not an error**: bad cells read as zero minutes.
//! - **One pass at a time**: reconciliation triggers that overlap a running pass are skipped.
//! - **Transport-free**: the remote store is the [`ShiftApi`] trait; clients bring HTTP.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shift_core::{load_config, Reconciler, SystemClock, Trigger};
//!
//! let config = load_config(None)?;
//! let reconciler = Reconciler::new(api, SystemClock::new(config.tz()?), config.identity()?);
//! let outcome = reconciler.handle(Trigger::Load).await?;
//! ```

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod patterns;
pub mod reconcile;
pub mod status;
pub mod time;
pub mod types;
pub mod wheel;

// Re-export commonly used items at crate root
pub use api::{ApiOutcome, Identity, ShiftApi};
pub use board::{reduce, BoardAction, BoardState, EditError, EditForm, EditPlan};
pub use config::*;
pub use error::{Result, ShiftError};
pub use reconcile::{
    Clock, FixedClock, LoadOutcome, PassOutcome, Reconciler, SaveOutcome, SystemClock, Trigger,
};
pub use status::{classify, detect, sync_reason, Classification, StatusRule};
pub use types::*;
pub use wheel::{TimePicker, WheelModel};
