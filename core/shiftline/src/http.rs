//! HTTP transport for the shift sheet web app.
//!
//! Every call is a JSON `POST` of a [`Request`] to the configured endpoint; the
//! reply is the `{ success, message, data }` envelope.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use shift_core::{
    ApiOutcome, EditPlan, Identity, Result, Shift, ShiftApi, ShiftError, StatusLabel,
};
use shiftline_protocol::{Request, Response, MAX_RESPONSE_BYTES};
use tracing::debug;

pub struct HttpShiftApi {
    client: reqwest::Client,
    url: String,
    tz: Tz,
}

impl HttpShiftApi {
    pub fn new(url: &str, timeout: Duration, tz: Tz) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShiftError::remote("client", e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            tz,
        })
    }

    async fn call(&self, request: Request) -> Result<Response> {
        request.validate()?;
        let action = request.action_name();
        debug!(action, "Calling shift API");

        let resp = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ShiftError::remote(action, format!("request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(ShiftError::remote(action, format!("HTTP {}: {}", status, text)));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ShiftError::remote(action, format!("reading body failed: {}", e)))?;
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(ShiftError::remote(
                action,
                format!("response too large ({} bytes)", body.len()),
            ));
        }

        serde_json::from_slice::<Response>(&body).map_err(|source| ShiftError::Json {
            context: format!("{} response", action),
            source,
        })
    }

    async fn write(&self, request: Request) -> Result<ApiOutcome> {
        let response = self.call(request).await?;
        Ok(ApiOutcome::from(&response))
    }
}

/// Turns a `getShifts` reply into shifts. Rows without an id are dropped.
pub fn shifts_from_response(response: &Response, tz: Tz) -> Result<Vec<Shift>> {
    if !response.success {
        return Err(ShiftError::Fetch(response.message_or("Unknown error")));
    }
    let rows = response.shift_rows().map_err(|source| ShiftError::Json {
        context: "shift rows".to_string(),
        source,
    })?;
    Ok(rows.iter().filter_map(|row| Shift::from_row(row, tz)).collect())
}

/// A new shift as `submitTimeSegments`.
pub fn submit_request(identity: &Identity, plan: &EditPlan) -> Request {
    Request::SubmitTimeSegments {
        segments: plan.segment_payloads(),
        employee_name: identity.display_name().to_string(),
        employee_id: identity.employee_id.clone(),
        date: plan.date_string(),
        shift_type: plan.shift_type.clone(),
    }
}

/// An employee edit of `shift_id` as `updateShiftWithEditTracking`.
pub fn update_request(identity: &Identity, shift_id: &str, plan: &EditPlan) -> Request {
    Request::UpdateShiftWithEditTracking {
        shift_id: shift_id.to_string(),
        employee_name: identity.display_name().to_string(),
        employee_id: identity.employee_id.clone(),
        shift_date: plan.date_string(),
        shift_type: plan.shift_type.clone(),
        segments: plan.segment_payloads(),
        first_start_time: plan.first_start_time().to_string(),
        last_end_time: plan.last_end_time().to_string(),
        total_duration: plan.total_duration,
        schedule_status: plan.status.as_str().to_string(),
        is_update: true,
        is_employee_edit: true,
        edited_by: identity.display_name().to_string(),
        edited_by_id: identity.employee_id.clone(),
    }
}

#[async_trait]
impl ShiftApi for HttpShiftApi {
    async fn fetch_shifts(&self, identity: &Identity, force_refresh: bool) -> Result<Vec<Shift>> {
        let response = self
            .call(Request::GetShifts {
                employee_id: identity.employee_id.clone(),
                force_refresh,
            })
            .await?;
        shifts_from_response(&response, self.tz)
    }

    async fn apply_status_fix(&self, shift_id: &str, status: StatusLabel) -> Result<ApiOutcome> {
        self.write(Request::FixShiftStatus {
            shift_id: shift_id.to_string(),
            correct_status: status.as_str().to_string(),
        })
        .await
    }

    async fn apply_status_sync(
        &self,
        shift_id: &str,
        status: StatusLabel,
        reason: &str,
    ) -> Result<ApiOutcome> {
        self.write(Request::SyncStatusToSheet {
            shift_id: shift_id.to_string(),
            status: status.as_str().to_string(),
            reason: reason.to_string(),
        })
        .await
    }

    async fn delete_shift(&self, shift_id: &str) -> Result<ApiOutcome> {
        self.write(Request::DeleteShift {
            shift_id: shift_id.to_string(),
        })
        .await
    }

    async fn submit_shift(&self, identity: &Identity, plan: &EditPlan) -> Result<ApiOutcome> {
        self.write(submit_request(identity, plan)).await
    }

    async fn update_shift(
        &self,
        identity: &Identity,
        shift_id: &str,
        plan: &EditPlan,
    ) -> Result<ApiOutcome> {
        self.write(update_request(identity, shift_id, plan)).await
    }

    async fn complete_shift(
        &self,
        shift_id: &str,
        identity: &Identity,
        date: Option<NaiveDate>,
    ) -> Result<ApiOutcome> {
        self.write(Request::CompleteShift {
            shift_id: shift_id.to_string(),
            employee_id: identity.employee_id.clone(),
            completed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            date: date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use shift_core::EditForm;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    #[test]
    fn test_rows_become_shifts() {
        let response = Response::ok(json!([
            {
                "shiftId": "SH-1",
                "shiftDate": "2026-10-16",
                "status": "active",
                "timeSegments": "[{\"startTime\":\"09:00\",\"endTime\":\"17:00\"}]",
                "totalDuration": "8"
            },
            { "status": "DRAFT" }
        ]));

        let shifts = shifts_from_response(&response, TZ).unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].shift_id, "SH-1");
        assert_eq!(shifts[0].status, Some(StatusLabel::Active));
        assert_eq!(shifts[0].segments.len(), 1);
        assert_eq!(shifts[0].total_duration, 8.0);
    }

    #[test]
    fn test_failed_fetch_is_an_error() {
        let response = Response::failure("Employee not found");
        match shifts_from_response(&response, TZ) {
            Err(ShiftError::Fetch(message)) => assert_eq!(message, "Employee not found"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_payload_is_empty_list() {
        let response = Response {
            success: true,
            ..Default::default()
        };
        assert!(shifts_from_response(&response, TZ).unwrap().is_empty());
    }

    fn plan(shift_id: Option<&str>) -> EditPlan {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut form = EditForm::for_new(date);
        form.shift_id = shift_id.map(str::to_string);
        form.first_start_time = "9:00".to_string();
        form.last_end_time = "17:30".to_string();
        form.plan(date.and_hms_opt(18, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_update_request_tracks_editor() {
        let identity = Identity {
            employee_id: "EMP-7".to_string(),
            employee_name: Some("Asha Rao".to_string()),
        };
        let json = serde_json::to_value(update_request(&identity, "SH-1", &plan(Some("SH-1")))).unwrap();

        assert_eq!(json["action"], "updateShiftWithEditTracking");
        assert_eq!(json["shiftId"], "SH-1");
        assert_eq!(json["shiftDate"], "2026-10-16");
        assert_eq!(json["firstStartTime"], "09:00");
        assert_eq!(json["lastEndTime"], "17:30");
        assert_eq!(json["totalDuration"], 8.5);
        assert_eq!(json["scheduleStatus"], "COMPLETED");
        assert_eq!(json["editedBy"], "Asha Rao");
        assert_eq!(json["editedById"], "EMP-7");
        assert_eq!(json["isEmployeeEdit"], true);
        assert_eq!(json["segments"][0]["segmentId"], 1);
    }

    #[test]
    fn test_submit_request_names_employee_by_id_without_name() {
        let request = submit_request(&Identity::new("EMP-7"), &plan(None));
        match request {
            Request::SubmitTimeSegments {
                employee_name,
                date,
                segments,
                shift_type,
                ..
            } => {
                assert_eq!(employee_name, "EMP-7");
                assert_eq!(date, "2026-10-16");
                assert_eq!(segments.len(), 1);
                assert_eq!(shift_type, "Regular");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_sending() {
        let api = HttpShiftApi::new("http://127.0.0.1:9/exec", Duration::from_secs(1), TZ).unwrap();
        let result = api.delete_shift("  ").await;
        assert!(matches!(result, Err(ShiftError::InvalidRequest { .. })));
    }
}
