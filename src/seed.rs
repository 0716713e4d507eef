use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::model::{
    attendance::AttendanceRecord, employee::Employee, leave_request::LeaveRequest,
    user::Credential,
};

const DEMO_SEED: &str = include_str!("../data/demo_seed.json");
const SEED_VERSION: u32 = 1;

#[derive(Deserialize)]
struct SeedFile {
    version: u32,
    departments: Vec<String>,
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    leave_requests: Vec<LeaveRequest>,
    fixed_credentials: Vec<FixedCredential>,
}

#[derive(Deserialize)]
struct FixedCredential {
    login_id: String,
    password: String,
}

/// Everything the store starts with.
#[derive(Debug, Clone)]
pub struct Seed {
    pub departments: Vec<String>,
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub leave_requests: Vec<LeaveRequest>,
    pub credentials: HashMap<String, Credential>,
}

/// The bundled demo roster, with the demo passwords hashed.
pub fn demo_seed() -> Result<Seed> {
    from_json(DEMO_SEED)
}

pub fn from_json(json: &str) -> Result<Seed> {
    let file: SeedFile = serde_json::from_str(json).context("seed file is not valid JSON")?;
    ensure!(
        file.version == SEED_VERSION,
        "unsupported seed version {} (expected {SEED_VERSION})",
        file.version
    );

    let roster: HashSet<u64> = file.employees.iter().map(|e| e.id).collect();
    ensure!(
        roster.len() == file.employees.len(),
        "seed contains duplicate employee ids"
    );

    // Attendance and leave rows are trusted to reference the roster.
    let dangling = file
        .attendance
        .iter()
        .map(|r| r.employee_id)
        .chain(file.leave_requests.iter().map(|r| r.employee_id))
        .filter(|id| !roster.contains(id))
        .count();
    if dangling > 0 {
        warn!(dangling, "Seed rows reference unknown employees");
    }

    let mut credentials: HashMap<String, Credential> = file
        .employees
        .iter()
        .map(|e| (e.login_id.clone(), Credential::Provisional))
        .collect();

    for fixed in file.fixed_credentials {
        let Some(slot) = credentials.get_mut(&fixed.login_id) else {
            bail!("credential for unknown login ID {}", fixed.login_id);
        };
        let password_hash = hash_password(&fixed.password)
            .map_err(|e| anyhow::anyhow!("failed to hash seed password: {e}"))?;
        *slot = Credential::Fixed { password_hash };
    }

    info!(
        employees = file.employees.len(),
        attendance = file.attendance.len(),
        leave_requests = file.leave_requests.len(),
        "Seed loaded"
    );

    Ok(Seed {
        departments: file.departments,
        employees: file.employees,
        attendance: file.attendance,
        leave_requests: file.leave_requests,
        credentials,
    })
}
