use crate::auth::auth::{AuthUser, bearer_token};
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::utils::session_cache::SessionCache;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

fn unauthorized(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    let resp = HttpResponse::Unauthorized().json(json!({ "message": message }));
    req.into_response(resp.map_into_boxed_body())
}

/// Resolves the bearer token to a live session and stores it as [`AuthUser`].
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;
    let sessions = req
        .app_data::<Data<SessionCache>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Session cache missing"))?;

    let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
        return Ok(unauthorized(req, "Missing bearer token"));
    };

    let claims = match verify_token(&token, &config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "Token rejected");
            return Ok(unauthorized(req, "Invalid or expired token"));
        }
    };

    let Some(session) = sessions.get(&claims.jti).await else {
        return Ok(unauthorized(req, "Session expired or logged out"));
    };

    req.extensions_mut().insert(AuthUser(session));

    next.call(req).await
}
