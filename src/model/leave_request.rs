use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use super::employee::Employee;
use crate::error::AppError;

#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    #[default]
    Paid,
    Sick,
    Unpaid,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    fn target(self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "7b0d3c1e-5a4f-4b7e-9d3c-2f1a6e8b9c01",
    "employee_id": 2,
    "employee_name": "Sarah Ellis",
    "leave_type": "paid",
    "start_date": "2026-01-15",
    "end_date": "2026-01-17",
    "reason": "Wedding anniversary trip",
    "status": "pending",
    "created_at": "2026-01-02"
}))]
pub struct LeaveRequest {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub employee_id: u64,
    pub employee_name: String,
    pub leave_type: LeaveType,
    #[schema(value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date")]
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[schema(value_type = String, format = "date")]
    pub created_at: NaiveDate,
}

impl LeaveRequest {
    /// Moves a pending request to its terminal state. Decided requests are
    /// left untouched.
    pub fn decide(&mut self, decision: LeaveDecision) -> Result<(), AppError> {
        if self.status != LeaveStatus::Pending {
            return Err(AppError::Conflict("Leave request already processed"));
        }
        self.status = decision.target();
        Ok(())
    }
}

/// Leave application as submitted by an employee. Every field is optional so
/// that missing input surfaces as one "missing information" outcome.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateLeave {
    #[serde(default)]
    pub leave_type: LeaveType,
    #[serde(default, deserialize_with = "blank_date")]
    #[schema(example = "2026-02-02", format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date")]
    #[schema(example = "2026-02-03", format = "date", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "Doctor appointment")]
    pub reason: Option<String>,
    #[schema(example = "medical-certificate.pdf")]
    pub document: Option<String>,
}

/// Form fields left blank arrive as `""`; treat them like absent ones.
fn blank_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(day) => NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl CreateLeave {
    /// Builds a pending request owned by `applicant`.
    pub fn into_request(self, applicant: &Employee, today: NaiveDate) -> Result<LeaveRequest, AppError> {
        let reason = self
            .reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let (Some(start_date), Some(end_date), Some(reason)) = (self.start_date, self.end_date, reason)
        else {
            return Err(AppError::MissingInformation);
        };

        if start_date > end_date {
            return Err(AppError::InvalidDateRange);
        }

        Ok(LeaveRequest {
            id: Uuid::new_v4(),
            employee_id: applicant.id,
            employee_name: applicant.full_name(),
            leave_type: self.leave_type,
            start_date,
            end_date,
            reason,
            status: LeaveStatus::Pending,
            document: self.document.filter(|d| !d.trim().is_empty()),
            created_at: today,
        })
    }
}
