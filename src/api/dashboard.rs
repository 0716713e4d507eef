use crate::{
    auth::auth::AuthUser,
    db::{Db, RecordScope},
    model::{
        employee::{DailyStatus, LeaveBalance},
        leave_request::{LeaveRequest, LeaveStatus},
        role::Capability,
    },
};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct AdminOverview {
    #[schema(example = "admin")]
    pub view: &'static str,
    #[schema(example = 10)]
    pub total_employees: usize,
    #[schema(example = 7)]
    pub present_today: usize,
    #[schema(example = 1)]
    pub absent_today: usize,
    #[schema(example = 2)]
    pub on_leave_today: usize,
    #[schema(example = 2)]
    pub pending_requests: usize,
    pub pending: Vec<LeaveRequest>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeOverview {
    #[schema(example = "employee")]
    pub view: &'static str,
    pub leave_balance: LeaveBalance,
    pub status_today: DailyStatus,
    #[schema(example = 1)]
    pub pending_requests: usize,
}

/// Dashboard payload; the shape depends on the caller's capabilities.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum Dashboard {
    Admin(AdminOverview),
    Employee(EmployeeOverview),
}

/// Dashboard endpoint
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = Dashboard),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(auth: AuthUser, db: web::Data<Db>) -> HttpResponse {
    let view = match auth.scope(Capability::ViewAllLeave) {
        RecordScope::All => {
            let counts = db.roster_counts();
            let pending = db.leave_requests(RecordScope::All, Some(LeaveStatus::Pending));
            Dashboard::Admin(AdminOverview {
                view: "admin",
                total_employees: counts.total,
                present_today: counts.present,
                absent_today: counts.absent,
                on_leave_today: counts.on_leave,
                pending_requests: pending.len(),
                pending,
            })
        }
        own @ RecordScope::Employee(_) => Dashboard::Employee(EmployeeOverview {
            view: "employee",
            leave_balance: auth.user.leave_balance,
            status_today: auth.user.status,
            pending_requests: db.pending_leave_count(own),
        }),
    };

    HttpResponse::Ok().json(view)
}
