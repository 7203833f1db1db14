//! The remote shift store, as seen by the reconciliation loop.
//!
//! Request/response shapes belong to the store; implementations translate them
//! into [`Shift`]s and [`ApiOutcome`]s. The HTTP implementation lives in the
//! shiftline CLI so this crate stays free of a transport.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftline_protocol::Response;

use crate::board::EditPlan;
use crate::error::Result;
use crate::types::{Shift, StatusLabel};

/// Whose shifts are being reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
}

impl Identity {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: None,
        }
    }

    /// Name to record on writes; the id when no name is configured.
    pub fn display_name(&self) -> &str {
        self.employee_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.employee_id)
    }
}

/// What a write call reported. `success == false` is a normal answer, not an error;
/// transport or decoding failures come back as `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOutcome {
    pub success: bool,
    pub message: String,
}

impl ApiOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<&Response> for ApiOutcome {
    fn from(response: &Response) -> Self {
        let fallback = if response.success { "ok" } else { "Unknown error" };
        Self {
            success: response.success,
            message: response.message_or(fallback),
        }
    }
}

#[async_trait]
pub trait ShiftApi: Send + Sync {
    /// All shifts for `identity`. `force_refresh` asks the store to skip its cache.
    async fn fetch_shifts(&self, identity: &Identity, force_refresh: bool) -> Result<Vec<Shift>>;

    /// Direct status overwrite.
    async fn apply_status_fix(&self, shift_id: &str, status: StatusLabel) -> Result<ApiOutcome>;

    /// Fallback write that also records why the status changed.
    async fn apply_status_sync(
        &self,
        shift_id: &str,
        status: StatusLabel,
        reason: &str,
    ) -> Result<ApiOutcome>;

    async fn delete_shift(&self, shift_id: &str) -> Result<ApiOutcome>;

    /// Creates a shift from a validated edit for a date that has none.
    async fn submit_shift(&self, identity: &Identity, plan: &EditPlan) -> Result<ApiOutcome>;

    /// Replaces an existing shift's segments from a validated edit, recording
    /// `identity` as the editor.
    async fn update_shift(
        &self,
        identity: &Identity,
        shift_id: &str,
        plan: &EditPlan,
    ) -> Result<ApiOutcome>;

    /// Explicit finalization by the employee.
    async fn complete_shift(
        &self,
        shift_id: &str,
        identity: &Identity,
        date: Option<NaiveDate>,
    ) -> Result<ApiOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_failed_response_without_message() {
        let response = Response::default();
        let outcome = ApiOutcome::from(&response);
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Unknown error");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut identity = Identity::new("EMP-1");
        assert_eq!(identity.display_name(), "EMP-1");
        identity.employee_name = Some("Asha".to_string());
        assert_eq!(identity.display_name(), "Asha");
    }

    #[test]
    fn test_outcome_keeps_store_message() {
        let response = Response::failure("Shift not found");
        assert_eq!(ApiOutcome::from(&response), ApiOutcome::failed("Shift not found"));
    }
}
