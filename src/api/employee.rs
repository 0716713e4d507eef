use crate::{
    auth::auth::AuthUser,
    db::{ALL_DEPARTMENTS, Db, EmployeeFilter},
    error::AppError,
    model::{
        employee::{Employee, SalaryTotals},
        role::Capability,
    },
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Case-insensitive match on first name, last name, email or login ID
    #[schema(example = "sarah")]
    pub search: Option<String>,
    /// Exact department name; `All` disables the filter
    #[schema(example = "Engineering")]
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    /// Number of matches
    #[schema(example = 3)]
    pub total: usize,
    /// Number of employees on the roster
    #[schema(example = 10)]
    pub roster_size: usize,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeDetail {
    pub employee: Employee,
    pub salary_totals: SalaryTotals,
}

impl From<&Employee> for EmployeeDetail {
    fn from(employee: &Employee) -> Self {
        Self {
            employee: employee.clone(),
            salary_totals: employee.salary.totals(),
        }
    }
}

/// Employee directory
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Matching employees in roster order", body = EmployeeListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    auth: AuthUser,
    db: web::Data<Db>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewDirectory)?;

    let query = query.into_inner();
    debug!(search = ?query.search, department = ?query.department, "Searching employees");

    let filter = EmployeeFilter {
        search: query.search,
        department: query.department,
    };
    let data: Vec<Employee> = db.search_employees(&filter).into_iter().cloned().collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        total: data.len(),
        roster_size: db.roster_counts().total,
        data,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDetail),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    auth: AuthUser,
    db: web::Data<Db>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    auth.require(Capability::ViewDirectory)?;

    let employee_id = path.into_inner();
    let employee = db
        .employee(employee_id)
        .ok_or(AppError::NotFound("Employee not found"))?;

    Ok(HttpResponse::Ok().json(EmployeeDetail::from(employee)))
}

/// Department names usable as a directory filter, `All` first
#[utoipa::path(
    get,
    path = "/api/departments",
    responses(
        (status = 200, description = "Department list", body = Vec<String>, example = json!(["All", "Human Resources", "Engineering"]))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_departments(_auth: AuthUser, db: web::Data<Db>) -> HttpResponse {
    let departments: Vec<&str> = std::iter::once(ALL_DEPARTMENTS)
        .chain(db.departments().iter().map(String::as_str))
        .collect();

    HttpResponse::Ok().json(departments)
}
