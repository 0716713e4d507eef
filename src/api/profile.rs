use crate::{api::employee::EmployeeDetail, auth::auth::AuthUser};
use actix_web::HttpResponse;

/// The caller's own record, salary breakdown included
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Own profile", body = EmployeeDetail),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Profile"
)]
pub async fn profile(auth: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(EmployeeDetail::from(&auth.user))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{call, get, login_token, test_app};
    use actix_web::{http::StatusCode, test as actix_test};

    #[actix_web::test]
    async fn profile_is_the_session_identity() {
        let app = actix_test::init_service(test_app()).await;
        let token = login_token(&app, "DFRK20230007", "robert-pass").await;

        let (status, body) = call(&app, get("/api/profile", &token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["employee"]["login_id"], "DFRK20230007");
        assert_eq!(body["employee"]["leave_balance"]["paid"], 12);
        assert!(body["salary_totals"]["gross"].as_f64().unwrap() > 0.0);
    }
}
