use crate::{
    auth::{
        auth::{AuthUser, bearer_token},
        jwt::{generate_session_token, verify_token},
        session::{Session, ShiftClock, authenticate},
    },
    config::Config,
    db::Db,
    error::AppError,
    model::{employee::Employee, role::Capabilities},
    models::{LoginReqDto, LoginResponse},
    utils::{login_id_filter::LoginIdFilter, session_cache::SessionCache},
};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

/// Session details for the caller
#[derive(Serialize, ToSchema)]
pub struct SessionView {
    pub user: Employee,
    pub is_admin: bool,
    pub capabilities: Capabilities,
    pub shift: ShiftClock,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Log in endpoint
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Session created", body = LoginResponse),
        (status = 400, description = "Login ID missing"),
        (status = 401, description = "Invalid login ID or password", body = Object, example = json!({
            "message": "Invalid login ID. Please check your credentials."
        })),
        (status = 429, description = "Too many login attempts")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(db, config, sessions, filter, user),
    fields(login_id = %user.login_id)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    db: web::Data<Db>,
    config: web::Data<Config>,
    sessions: web::Data<SessionCache>,
    filter: web::Data<LoginIdFilter>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if config.login_delay_ms > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(config.login_delay_ms)).await;
    }

    // 1️⃣ Basic validation
    // The secret is judged by the credential policy, even when empty
    let login_id = user.login_id.trim();
    if login_id.is_empty() {
        info!("Validation failed: empty login ID");
        return Err(AppError::BadRequest("Login ID is required"));
    }

    // 2️⃣ Verify credentials
    let employee = authenticate(&db, &filter, config.auth_mode, login_id, &user.password)?;
    debug!(employee_id = employee.id, "Credentials verified");

    // 3️⃣ Issue token and open session
    let session_id = Uuid::new_v4().to_string();
    let (token, _) =
        generate_session_token(employee, &session_id, &config.jwt_secret, config.session_ttl)
            .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))?;

    let session = Arc::new(Session::new(session_id, employee.clone()));
    sessions.insert(session.clone()).await;

    info!(employee_id = employee.id, role = %employee.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: config.session_ttl,
        user: session.user.clone(),
        capabilities: session.capabilities,
    }))
}

/// Log out endpoint. Always answers 204, even for unknown tokens.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session closed")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    config: web::Data<Config>,
    sessions: web::Data<SessionCache>,
) -> HttpResponse {
    let Some(token) = bearer_token(req.headers()) else {
        return HttpResponse::NoContent().finish();
    };

    let Ok(claims) = verify_token(token, &config.jwt_secret) else {
        return HttpResponse::NoContent().finish();
    };

    if let Some(session) = sessions.remove(&claims.jti).await {
        info!(employee_id = session.user.id, "Session closed");
    }

    HttpResponse::NoContent().finish()
}

/// Current session endpoint
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current session", body = SessionView),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn me(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(SessionView {
        user: auth.user.clone(),
        is_admin: auth.is_admin(),
        capabilities: auth.capabilities,
        shift: auth.shift(),
        created_at: auth.created_at,
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call, get, login_token, post, post_json, test_app};
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::json;

    #[actix_web::test]
    async fn fixed_account_logs_in_with_admin_capabilities() {
        let app = actix_test::init_service(test_app()).await;
        let payload = json!({ "login_id": "DFJD20230001", "password": "admin123" });

        let (status, body) = call(&app, post_json("/auth/login", "", &payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "Bearer");
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["capabilities"]["decide_leave"], true);
    }

    #[actix_web::test]
    async fn login_failures_carry_distinct_messages() {
        let app = actix_test::init_service(test_app()).await;
        let cases = [
            ("DFJD20230001", "wrong-password", "Invalid password. Please check your credentials."),
            ("NOPE0000", "whatever", "Invalid login ID. Please check your credentials."),
            (
                "DFRK20230007",
                "abc",
                "Invalid password. Password must be at least 6 characters.",
            ),
            ("DFXX99999999", "", "Invalid login ID. Please check your credentials."),
            (
                "DFMC20230003",
                "",
                "Invalid password. Password must be at least 6 characters.",
            ),
            ("DFJD20230001", "", "Invalid password. Please check your credentials."),
        ];

        for (login_id, password, message) in cases {
            let payload = json!({ "login_id": login_id, "password": password });
            let (status, body) = call(&app, post_json("/auth/login", "", &payload)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{login_id}");
            assert_eq!(body["message"], message);
        }
    }

    #[actix_web::test]
    async fn empty_login_id_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let payload = json!({ "login_id": "  ", "password": "employee123" });

        let (status, body) = call(&app, post_json("/auth/login", "", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Login ID is required");
    }

    #[actix_web::test]
    async fn logout_ends_the_session() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFSE20230002", "employee123").await;

        let (status, body) = call(&app, get("/api/me", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["login_id"], "DFSE20230002");
        assert_eq!(body["is_admin"], false);
        assert_eq!(body["shift"]["checked_in"], false);

        let (status, _) = call(&app, post("/auth/logout", &token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = call(&app, get("/api/me", &token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Session expired or logged out");

        // A second logout is still accepted.
        let (status, _) = call(&app, post("/auth/logout", &token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn protected_routes_need_a_token() {
        let app = actix_test::init_service(test_app()).await;

        let (status, body) = call(&app, get("/api/me", "")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing bearer token");

        let (status, _) = call(&app, get("/api/me", "not-a-jwt")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
