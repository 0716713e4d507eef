use crate::api::attendance::{AttendanceRow, ShiftResponse};
use crate::api::dashboard::{AdminOverview, Dashboard, EmployeeOverview};
use crate::api::employee::{EmployeeDetail, EmployeeListResponse};
use crate::api::leave_request::{LeaveActionResponse, LeaveFilter, LeaveListResponse};
use crate::auth::handlers::SessionView;
use crate::auth::session::ShiftClock;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::model::employee::{DailyStatus, Employee, LeaveBalance, Salary, SalaryTotals, WageType};
use crate::model::leave_request::{CreateLeave, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::{Capabilities, Role};
use crate::models::{LoginReqDto, LoginResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dayflow HRM API",
        version = "1.0.0",
        description = r#"
## Dayflow Human Resource Management

Back end for a small HR dashboard: employees sign in, see their own
attendance, leave and salary, and apply for time off. Administrators
browse the directory, review everyone's attendance and decide leave
requests.

### 🔹 Key Features
- **Session**
  - Log in with a login ID, log out, inspect the current session
- **Employee Directory**
  - Search by name, email or login ID; filter by department
- **Attendance**
  - Daily records, per-employee summary, check-in and check-out
- **Leave Management**
  - Apply for leave, approve/reject requests, and view leave history
- **Profile & Dashboard**
  - Salary breakdown, leave balances, role-specific overview

### 🔐 Security
Everything under `/api` needs a **JWT Bearer** token from `/auth/login`.
Directory, company-wide attendance and leave decisions are **Admin** only.

### 📦 Response Format
- JSON bodies; errors are `{ "message": "..." }`
- Pagination on the leave list

---
Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,

        crate::api::dashboard::dashboard,
        crate::api::profile::profile,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::list_departments,

        crate::api::attendance::list_attendance,
        crate::api::attendance::attendance_summary,
        crate::api::attendance::shift_status,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            SessionView,
            Capabilities,
            Role,
            Employee,
            DailyStatus,
            Salary,
            SalaryTotals,
            WageType,
            LeaveBalance,
            EmployeeListResponse,
            EmployeeDetail,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceSummary,
            AttendanceRow,
            ShiftClock,
            ShiftResponse,
            LeaveRequest,
            LeaveType,
            LeaveStatus,
            CreateLeave,
            LeaveFilter,
            LeaveListResponse,
            LeaveActionResponse,
            Dashboard,
            AdminOverview,
            EmployeeOverview
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session APIs"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "Profile", description = "Own profile APIs"),
        (name = "Dashboard", description = "Overview APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
