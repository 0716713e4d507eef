use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::role::Role;

/// Roster entry. Also serves as the identity carried by a session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 2,
        "login_id": "DFSE20230002",
        "first_name": "Sarah",
        "last_name": "Ellis",
        "email": "sarah.ellis@dayflow.com",
        "phone": "+1 (555) 234-5678",
        "department": "Engineering",
        "position": "Senior Developer",
        "role": "employee",
        "join_date": "2023-03-20",
        "status": "present"
    })
)]
pub struct Employee {
    #[schema(example = 2)]
    pub id: u64,

    #[schema(example = "DFSE20230002")]
    pub login_id: String,

    #[schema(example = "Sarah")]
    pub first_name: String,

    #[schema(example = "Ellis")]
    pub last_name: String,

    #[schema(example = "sarah.ellis@dayflow.com")]
    pub email: String,

    #[schema(example = "+1 (555) 234-5678")]
    pub phone: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "Senior Developer")]
    pub position: String,

    pub role: Role,

    #[serde(default)]
    pub avatar: String,

    #[schema(example = "2023-03-20", value_type = String, format = "date")]
    pub join_date: NaiveDate,

    pub status: DailyStatus,

    pub salary: Salary,

    pub leave_balance: LeaveBalance,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.first_name, &self.last_name, &self.email, &self.login_id]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DailyStatus {
    Present,
    Absent,
    Leave,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WageType {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Salary {
    pub wage_type: WageType,
    #[schema(example = 95000.0)]
    pub wage: f64,
    #[schema(example = 47500.0)]
    pub basic: f64,
    #[schema(example = 19000.0)]
    pub hra: f64,
    #[schema(example = 9500.0)]
    pub allowance: f64,
    #[schema(example = 8000.0)]
    pub bonus: f64,
    #[schema(example = 6000.0)]
    pub lta: f64,
    #[schema(example = 5700.0)]
    pub pf: f64,
    #[schema(example = 2400.0)]
    pub professional_tax: f64,
}

/// Earnings, deductions and net pay derived from a [`Salary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SalaryTotals {
    pub gross: f64,
    pub deductions: f64,
    pub net: f64,
}

impl Salary {
    pub fn totals(&self) -> SalaryTotals {
        let gross = self.basic + self.hra + self.allowance + self.bonus + self.lta;
        let deductions = self.pf + self.professional_tax;
        SalaryTotals {
            gross,
            deductions,
            net: gross - deductions,
        }
    }
}

/// Remaining leave days per type.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    pub paid: u32,
    pub sick: u32,
    pub unpaid: u32,
}
