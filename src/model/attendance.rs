use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 2)]
    pub employee_id: u64,
    #[schema(example = "2026-01-03", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", value_type = Option<String>)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "18:30:00", value_type = Option<String>)]
    pub check_out: Option<NaiveTime>,
    pub status: AttendanceStatus,
    #[schema(example = 9.5)]
    pub work_hours: f64,
    #[schema(example = 1.5)]
    pub extra_hours: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    HalfDay,
}

/// Per-employee roll-up of attendance records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
    pub half_day: u32,
    pub work_hours: f64,
    pub extra_hours: f64,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                match record.status {
                    AttendanceStatus::Present => summary.present += 1,
                    AttendanceStatus::Absent => summary.absent += 1,
                    AttendanceStatus::Leave => summary.leave += 1,
                    AttendanceStatus::HalfDay => summary.half_day += 1,
                }
                summary.work_hours += record.work_hours;
                summary.extra_hours += record.extra_hours;
                summary
            })
    }
}
