use crate::{
    auth::auth::AuthUser,
    db::Db,
    error::AppError,
    model::{
        leave_request::{CreateLeave, LeaveDecision, LeaveRequest, LeaveStatus},
        role::Capability,
    },
};
use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: usize,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<LeaveStatus>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u32>,
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveActionResponse {
    #[schema(example = "Leave approved")]
    pub message: &'static str,
    pub request: LeaveRequest,
}

/* =========================
Create leave request
========================= */
/// Swagger doc for create_leave endpoint
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveActionResponse),
        (status = 400, description = "Missing information or invalid date range", body = Object, example = json!({
            "message": "Please fill in all required fields."
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip_all, fields(employee_id = auth.user.id))]
pub async fn create_leave(
    auth: AuthUser,
    db: web::Data<Db>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, AppError> {
    let request = payload
        .into_inner()
        .into_request(&auth.user, Local::now().date_naive())?;
    let request = db.insert_leave_request(request);

    info!(leave_id = %request.id, leave_type = %request.leave_type, "Leave request submitted");

    Ok(HttpResponse::Created().json(LeaveActionResponse {
        message: "Leave request submitted",
        request,
    }))
}

async fn decide(
    auth: AuthUser,
    db: web::Data<Db>,
    leave_id: Uuid,
    decision: LeaveDecision,
) -> Result<LeaveRequest, AppError> {
    auth.require(Capability::DecideLeave)?;

    let request = db.decide_leave(leave_id, decision)?;
    info!(
        %leave_id,
        decided_by = auth.user.id,
        status = %request.status,
        "Leave request decided"
    );
    Ok(request)
}

/* =========================
Approve leave (Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = LeaveActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    db: web::Data<Db>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = decide(auth, db, path.into_inner(), LeaveDecision::Approve).await?;

    Ok(HttpResponse::Ok().json(LeaveActionResponse {
        message: "Leave approved",
        request,
    }))
}

/* =========================
Reject leave (Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = LeaveActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Leave request already processed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    db: web::Data<Db>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let request = decide(auth, db, path.into_inner(), LeaveDecision::Reject).await?;

    Ok(HttpResponse::Ok().json(LeaveActionResponse {
        message: "Leave rejected",
        request,
    }))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    db: web::Data<Db>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let scope = auth.scope(Capability::ViewAllLeave);

    let request = db
        .leave_request(scope, path.into_inner())
        .ok_or(AppError::NotFound("Leave request not found"))?;

    Ok(HttpResponse::Ok().json(request))
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list, newest first", body = LeaveListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    db: web::Data<Db>,
    query: web::Query<LeaveFilter>,
) -> HttpResponse {
    let scope = auth.scope(Capability::ViewAllLeave);

    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page as usize - 1) * per_page as usize;

    let matching = db.leave_requests(scope, query.status);
    let total = matching.len();
    let data = matching
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    HttpResponse::Ok().json(LeaveListResponse {
        data,
        page,
        per_page,
        total,
    })
}
