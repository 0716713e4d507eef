use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::{
    attendance::AttendanceRecord,
    employee::{DailyStatus, Employee},
    leave_request::{LeaveDecision, LeaveRequest, LeaveStatus},
    user::Credential,
};
use crate::seed::Seed;

/// Department filter value that disables department matching.
pub const ALL_DEPARTMENTS: &str = "All";

/// In-memory store shared by every worker.
///
/// The roster, credentials and attendance history are fixed at start-up;
/// only leave requests change afterwards.
pub struct Db {
    departments: Vec<String>,
    employees: Vec<Employee>,
    credentials: HashMap<String, Credential>,
    attendance: Vec<AttendanceRecord>,
    leave_requests: RwLock<Vec<LeaveRequest>>,
}

/// Which owner's records a query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    All,
    Employee(u64),
}

impl RecordScope {
    fn admits(self, employee_id: u64) -> bool {
        match self {
            RecordScope::All => true,
            RecordScope::Employee(id) => id == employee_id,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RosterCounts {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub on_leave: usize,
}

pub fn init_db(seed: Seed) -> Db {
    Db {
        departments: seed.departments,
        employees: seed.employees,
        credentials: seed.credentials,
        attendance: seed.attendance,
        leave_requests: RwLock::new(seed.leave_requests),
    }
}

impl Db {
    fn leaves(&self) -> RwLockReadGuard<'_, Vec<LeaveRequest>> {
        self.leave_requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn leaves_mut(&self) -> RwLockWriteGuard<'_, Vec<LeaveRequest>> {
        self.leave_requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /* =========================
    Employees
    ========================= */

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn login_ids(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().map(|e| e.login_id.as_str())
    }

    pub fn employee(&self, id: u64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn employee_by_login_id(&self, login_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.login_id == login_id)
    }

    pub fn credential(&self, login_id: &str) -> Option<&Credential> {
        self.credentials.get(login_id)
    }

    /// Case-insensitive search over names, email and login ID, combined with
    /// an exact department match. Roster order is preserved.
    pub fn search_employees(&self, filter: &EmployeeFilter) -> Vec<&Employee> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let department = filter
            .department
            .as_deref()
            .filter(|d| !d.is_empty() && *d != ALL_DEPARTMENTS);

        self.employees
            .iter()
            .filter(|e| needle.as_deref().is_none_or(|n| e.matches_search(n)))
            .filter(|e| department.is_none_or(|d| e.department == d))
            .collect()
    }

    pub fn roster_counts(&self) -> RosterCounts {
        let count = |status: DailyStatus| self.employees.iter().filter(|e| e.status == status).count();
        RosterCounts {
            total: self.employees.len(),
            present: count(DailyStatus::Present),
            absent: count(DailyStatus::Absent),
            on_leave: count(DailyStatus::Leave),
        }
    }

    /* =========================
    Attendance
    ========================= */

    pub fn attendance(&self, scope: RecordScope, date: Option<NaiveDate>) -> Vec<&AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| scope.admits(r.employee_id))
            .filter(|r| date.is_none_or(|d| r.date == d))
            .collect()
    }

    /* =========================
    Leave requests
    ========================= */

    pub fn leave_requests(&self, scope: RecordScope, status: Option<LeaveStatus>) -> Vec<LeaveRequest> {
        self.leaves()
            .iter()
            .filter(|r| scope.admits(r.employee_id))
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect()
    }

    pub fn leave_request(&self, scope: RecordScope, id: Uuid) -> Option<LeaveRequest> {
        self.leaves()
            .iter()
            .find(|r| r.id == id && scope.admits(r.employee_id))
            .cloned()
    }

    pub fn pending_leave_count(&self, scope: RecordScope) -> usize {
        self.leaves()
            .iter()
            .filter(|r| scope.admits(r.employee_id) && r.status == LeaveStatus::Pending)
            .count()
    }

    /// Prepends, so listings stay newest first.
    pub fn insert_leave_request(&self, request: LeaveRequest) -> LeaveRequest {
        self.leaves_mut().insert(0, request.clone());
        request
    }

    pub fn decide_leave(&self, id: Uuid, decision: LeaveDecision) -> Result<LeaveRequest, AppError> {
        let mut leaves = self.leaves_mut();
        let request = leaves
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound("Leave request not found"))?;

        request.decide(decision)?;
        Ok(request.clone())
    }
}
