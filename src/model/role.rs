use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// A single permission a handler can ask the session for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    ViewDirectory,
    ViewAllAttendance,
    ViewAllLeave,
    DecideLeave,
}

/// Permissions resolved once when a session is created.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, ToSchema)]
pub struct Capabilities {
    pub view_directory: bool,
    pub view_all_attendance: bool,
    pub view_all_leave: bool,
    pub decide_leave: bool,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self {
                view_directory: true,
                view_all_attendance: true,
                view_all_leave: true,
                decide_leave: true,
            },
            Role::Employee => Self::default(),
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewDirectory => self.view_directory,
            Capability::ViewAllAttendance => self.view_all_attendance,
            Capability::ViewAllLeave => self.view_all_leave,
            Capability::DecideLeave => self.decide_leave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn admin_holds_every_capability() {
        let caps = Capabilities::for_role(Role::Admin);
        for cap in [
            Capability::ViewDirectory,
            Capability::ViewAllAttendance,
            Capability::ViewAllLeave,
            Capability::DecideLeave,
        ] {
            assert!(caps.allows(cap), "admin should hold {cap}");
        }
    }

    #[test]
    fn employee_holds_none() {
        assert_eq!(Capabilities::for_role(Role::Employee), Capabilities::default());
        assert!(!Capabilities::for_role(Role::Employee).allows(Capability::DecideLeave));
    }

    #[test]
    fn role_parses_lowercase() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::Employee.to_string(), "employee");
        assert_eq!(Capability::DecideLeave.to_string(), "decide_leave");
    }
}
