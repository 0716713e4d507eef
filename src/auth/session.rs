use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::auth::password::verify_password;
use crate::config::AuthMode;
use crate::db::{Db, RecordScope};
use crate::error::AppError;
use crate::model::{
    employee::Employee,
    role::{Capabilities, Capability, Role},
    user::Credential,
};
use crate::utils::login_id_filter::LoginIdFilter;

/// Shortest secret a provisional account accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// An authenticated user. Created by login, dropped by logout or expiry.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub user: Employee,
    pub capabilities: Capabilities,
    pub created_at: DateTime<Utc>,
    shift: Mutex<ShiftClock>,
}

/// Check-in state for the current session. Never written to attendance.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct ShiftClock {
    pub checked_in: bool,
    #[schema(example = "09:02")]
    pub check_in_time: Option<String>,
    #[schema(example = "18:10")]
    pub check_out_time: Option<String>,
}

fn display_time(at: NaiveTime) -> String {
    at.format("%H:%M").to_string()
}

impl Session {
    pub fn new(id: String, user: Employee) -> Self {
        let capabilities = Capabilities::for_role(user.role);
        Self {
            id,
            user,
            capabilities,
            created_at: Utc::now(),
            shift: Mutex::new(ShiftClock::default()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.capabilities.allows(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden(capability))
        }
    }

    /// `All` when the session holds `capability`, otherwise the caller's own records.
    pub fn scope(&self, capability: Capability) -> RecordScope {
        if self.capabilities.allows(capability) {
            RecordScope::All
        } else {
            RecordScope::Employee(self.user.id)
        }
    }

    pub fn shift(&self) -> ShiftClock {
        self.shift
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn check_in(&self, at: NaiveTime) -> Result<ShiftClock, AppError> {
        let mut shift = self.shift.lock().unwrap_or_else(PoisonError::into_inner);
        if shift.checked_in {
            return Err(AppError::Conflict("Already checked in"));
        }
        shift.checked_in = true;
        shift.check_in_time = Some(display_time(at));
        shift.check_out_time = None;
        Ok(shift.clone())
    }

    pub fn check_out(&self, at: NaiveTime) -> Result<ShiftClock, AppError> {
        let mut shift = self.shift.lock().unwrap_or_else(PoisonError::into_inner);
        if !shift.checked_in {
            return Err(AppError::BadRequest("No active check-in found"));
        }
        shift.checked_in = false;
        shift.check_out_time = Some(display_time(at));
        Ok(shift.clone())
    }
}

/// Resolves a login ID and secret to a roster entry.
///
/// Accounts with a stored hash are verified against it and never fall back
/// to the provisional rule.
pub fn authenticate<'a>(
    db: &'a Db,
    filter: &LoginIdFilter,
    mode: AuthMode,
    login_id: &str,
    secret: &str,
) -> Result<&'a Employee, AppError> {
    if !filter.might_exist(login_id) {
        debug!("Login ID rejected by prefilter");
        return Err(AppError::InvalidLoginId);
    }

    let (Some(user), Some(credential)) = (db.employee_by_login_id(login_id), db.credential(login_id))
    else {
        info!("Invalid credentials: login ID not found");
        return Err(AppError::InvalidLoginId);
    };

    match credential {
        Credential::Fixed { password_hash } => match verify_password(secret, password_hash) {
            Ok(()) => {}
            Err(argon2::password_hash::Error::Password) => {
                info!("Invalid credentials: password mismatch");
                return Err(AppError::WrongPassword);
            }
            Err(e) => return Err(AppError::Internal(format!("stored hash unusable: {e}"))),
        },
        Credential::Provisional => {
            if secret.chars().count() < MIN_PASSWORD_LEN {
                info!("Invalid credentials: password too short");
                return Err(AppError::PasswordTooShort);
            }
            if mode == AuthMode::Strict {
                info!("Invalid credentials: no password set for account");
                return Err(AppError::WrongPassword);
            }
        }
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seeded_db, warmed_filter};
    use rstest::rstest;

    fn login(mode: AuthMode, login_id: &str, secret: &str) -> Result<Role, AppError> {
        let db = seeded_db();
        let filter = warmed_filter(&db);
        authenticate(&db, &filter, mode, login_id, secret).map(|u| u.role)
    }

    #[test]
    fn admin_demo_account_logs_in() {
        assert_eq!(login(AuthMode::Demo, "DFJD20230001", "admin123").unwrap(), Role::Admin);
    }

    #[rstest]
    #[case("wrong")]
    #[case("wrongpassword")]
    #[case("")]
    fn fixed_account_never_falls_through(#[case] secret: &str) {
        let err = login(AuthMode::Demo, "DFJD20230001", secret).unwrap_err();
        assert!(matches!(err, AppError::WrongPassword));
    }

    #[rstest]
    #[case("DFMC20230003", "12345", false)]
    #[case("DFMC20230003", "123456", true)]
    #[case("DFNG20240010", "a", false)]
    #[case("DFNG20240010", "longer secret", true)]
    fn provisional_accounts_need_six_characters(
        #[case] login_id: &str,
        #[case] secret: &str,
        #[case] accepted: bool,
    ) {
        match login(AuthMode::Demo, login_id, secret) {
            Ok(role) => {
                assert!(accepted);
                assert_eq!(role, Role::Employee);
            }
            Err(err) => {
                assert!(!accepted);
                assert!(matches!(err, AppError::PasswordTooShort));
            }
        }
    }

    #[rstest]
    #[case("admin123")]
    #[case("x")]
    #[case("")]
    fn unknown_login_id_always_fails(#[case] secret: &str) {
        let err = login(AuthMode::Demo, "DFXX99999999", secret).unwrap_err();
        assert!(matches!(err, AppError::InvalidLoginId));
    }

    #[test]
    fn strict_mode_refuses_provisional_accounts() {
        let err = login(AuthMode::Strict, "DFMC20230003", "123456").unwrap_err();
        assert!(matches!(err, AppError::WrongPassword));
        assert!(login(AuthMode::Strict, "DFSE20230002", "employee123").is_ok());
    }

    #[test]
    fn shift_toggles_and_guards() {
        let db = seeded_db();
        let session = Session::new("s".into(), db.employee(2).unwrap().clone());
        let nine = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        let six = NaiveTime::from_hms_opt(18, 0, 0).unwrap();

        assert!(matches!(session.check_out(six), Err(AppError::BadRequest(_))));
        let shift = session.check_in(nine).unwrap();
        assert_eq!(shift.check_in_time.as_deref(), Some("09:05"));
        assert!(matches!(session.check_in(nine), Err(AppError::Conflict(_))));

        let shift = session.check_out(six).unwrap();
        assert!(!shift.checked_in);
        assert_eq!(shift.check_out_time.as_deref(), Some("18:00"));
    }

    #[test]
    fn scope_follows_capabilities() {
        let db = seeded_db();
        let admin = Session::new("a".into(), db.employee(1).unwrap().clone());
        let employee = Session::new("e".into(), db.employee(2).unwrap().clone());

        assert!(admin.is_admin());
        assert_eq!(admin.scope(Capability::ViewAllLeave), RecordScope::All);
        assert_eq!(employee.scope(Capability::ViewAllLeave), RecordScope::Employee(2));
        assert!(matches!(
            employee.require(Capability::DecideLeave),
            Err(AppError::Forbidden(Capability::DecideLeave))
        ));
    }
}
