use crate::{
    auth::{auth::AuthUser, session::ShiftClock},
    db::{Db, RecordScope},
    error::AppError,
    model::{
        attendance::{AttendanceRecord, AttendanceSummary},
        role::Capability,
    },
};
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Only records for this day
    #[schema(example = "2026-01-03", format = "date", value_type = Option<String>)]
    #[param(value_type = Option<String>, example = "2026-01-03")]
    pub date: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceRow {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    /// Resolved from the roster; absent when the employee is unknown
    #[schema(example = "Sarah Ellis")]
    pub employee_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ShiftResponse {
    #[schema(example = "Checked in successfully")]
    pub message: &'static str,
    pub shift: ShiftClock,
}

/// Attendance records visible to the caller
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceRow>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    db: web::Data<Db>,
    query: web::Query<AttendanceQuery>,
) -> HttpResponse {
    let scope = auth.scope(Capability::ViewAllAttendance);

    let rows: Vec<AttendanceRow> = db
        .attendance(scope, query.date)
        .into_iter()
        .map(|record| AttendanceRow {
            employee_name: db.employee(record.employee_id).map(|e| e.full_name()),
            record: record.clone(),
        })
        .collect();

    HttpResponse::Ok().json(rows)
}

/// Totals over the caller's own attendance records
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    responses(
        (status = 200, description = "Attendance summary", body = AttendanceSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(auth: AuthUser, db: web::Data<Db>) -> HttpResponse {
    let own = db.attendance(RecordScope::Employee(auth.user.id), None);
    HttpResponse::Ok().json(AttendanceSummary::from_records(own))
}

/// Current shift state of the session
#[utoipa::path(
    get,
    path = "/api/attendance/shift",
    responses(
        (status = 200, description = "Shift state", body = ShiftClock),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn shift_status(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.shift())
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = ShiftResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Already checked in", body = Object, example = json!({
            "message": "Already checked in"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(auth: AuthUser) -> Result<HttpResponse, AppError> {
    let shift = auth.check_in(Local::now().time())?;
    info!(employee_id = auth.user.id, at = ?shift.check_in_time, "Checked in");

    Ok(HttpResponse::Ok().json(ShiftResponse {
        message: "Checked in successfully",
        shift,
    }))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = ShiftResponse),
        (status = 400, description = "No active check-in found", body = Object, example = json!({
            "message": "No active check-in found"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(auth: AuthUser) -> Result<HttpResponse, AppError> {
    let shift = auth.check_out(Local::now().time())?;
    info!(employee_id = auth.user.id, at = ?shift.check_out_time, "Checked out");

    Ok(HttpResponse::Ok().json(ShiftResponse {
        message: "Checked out successfully",
        shift,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call, get, login_token, post, test_app};
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::Value;

    fn employee_ids(body: &Value) -> Vec<u64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|r| r["employee_id"].as_u64().unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn admin_filters_by_date() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFJD20230001", "admin123").await;

        let (status, body) = call(&app, get("/api/attendance?date=2026-01-03", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(employee_ids(&body), vec![2, 4, 6, 7, 8, 10]);
        assert_eq!(body[0]["employee_name"], "Sarah Ellis");

        let (_, body) = call(&app, get("/api/attendance", &token)).await;
        assert_eq!(body.as_array().map(Vec::len), Some(8));
    }

    #[actix_web::test]
    async fn employee_sees_only_own_records() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFEP20230004", "secret-enough").await;

        let (status, body) = call(&app, get("/api/attendance", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(employee_ids(&body), vec![4]);
    }

    #[actix_web::test]
    async fn employee_date_filter_narrows_own_records() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFSE20230002", "employee123").await;

        let (_, all) = call(&app, get("/api/attendance", &token)).await;
        assert_eq!(all.as_array().map(Vec::len), Some(3));

        let (status, body) = call(&app, get("/api/attendance?date=2026-01-01", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(employee_ids(&body), vec![2]);
        assert_eq!(body[0]["status"], "absent");

        // Five other employees also have records on this day.
        let (_, body) = call(&app, get("/api/attendance?date=2026-01-03", &token)).await;
        assert_eq!(employee_ids(&body), vec![2]);
    }

    #[actix_web::test]
    async fn summary_rolls_up_own_records() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFSE20230002", "employee123").await;

        let (status, body) = call(&app, get("/api/attendance/summary", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["present"], 2);
        assert_eq!(body["absent"], 1);
        assert_eq!(body["work_hours"], Value::from(18.5));
        assert_eq!(body["extra_hours"], Value::from(2.5));
    }

    #[actix_web::test]
    async fn check_in_then_out_is_session_scoped() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFSE20230002", "employee123").await;

        let (status, _) = call(&app, post("/api/attendance/check-out", &token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&app, post("/api/attendance/check-in", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shift"]["checked_in"], true);

        let (status, _) = call(&app, post("/api/attendance/check-in", &token)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, shift) = call(&app, get("/api/attendance/shift", &token)).await;
        assert_eq!(shift["checked_in"], true);

        // Nothing is written to the attendance history.
        let (_, records) = call(&app, get("/api/attendance", &token)).await;
        assert_eq!(records.as_array().map(Vec::len), Some(3));

        let (status, body) = call(&app, post("/api/attendance/check-out", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["shift"]["checked_in"], false);
    }
}
