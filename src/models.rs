use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    employee::Employee,
    role::{Capabilities, Role},
};

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "DFJD20230001")]
    pub login_id: String,
    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: &'static str,
    /// Seconds until the session expires.
    #[schema(example = 28800)]
    pub expires_in: usize,
    pub user: Employee,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Login ID
    pub sub: String,
    pub employee_id: u64,
    pub role: Role,
    pub exp: usize,
    /// Session id; keys the server-side session cache.
    pub jti: String,
}
