//! Shared fixtures for unit and HTTP tests.

use std::{net::SocketAddr, sync::OnceLock, time::Duration};

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse},
    http::{StatusCode, header},
    test::{self as actix_test, TestRequest},
    web::Data,
};
use serde_json::{Value, json};

use crate::{
    config::{AuthMode, Config},
    db::{Db, init_db},
    routes::{self, Limiters},
    seed::{self, Seed},
    utils::{login_id_filter::LoginIdFilter, session_cache::SessionCache},
};

// Hashing the demo passwords is slow; do it once per test binary.
static SEED: OnceLock<Seed> = OnceLock::new();

/// A fresh store built from the bundled demo roster.
pub fn seeded_db() -> Db {
    let seed = SEED.get_or_init(|| seed::demo_seed().expect("bundled seed loads"));
    init_db(seed.clone())
}

pub fn warmed_filter(db: &Db) -> LoginIdFilter {
    let filter = LoginIdFilter::new();
    filter.warmup(db.login_ids());
    filter
}

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        jwt_secret: "test-secret".into(),
        session_ttl: 3600,
        auth_mode: AuthMode::Demo,
        login_delay_ms: 0,
        rate_login_per_min: 10_000,
        rate_protected_per_min: 10_000,
        api_prefix: "/api".into(),
    }
}

/// The full application over a fresh store, without the Swagger UI.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = test_config();
    let limiters = Limiters::from_config(&config).expect("test rate limits are valid");
    let db = seeded_db();
    let filter = warmed_filter(&db);

    App::new()
        .app_data(Data::new(db))
        .app_data(Data::new(config.clone()))
        .app_data(Data::new(SessionCache::new(Duration::from_secs(
            config.session_ttl as u64,
        ))))
        .app_data(Data::new(filter))
        .configure(|cfg| routes::configure(cfg, &config, &limiters))
}

fn peer() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 40_000))
}

fn with_token(req: TestRequest, token: &str) -> TestRequest {
    let req = req.peer_addr(peer());
    if token.is_empty() {
        req
    } else {
        req.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
    }
}

pub fn get(uri: &str, token: &str) -> TestRequest {
    with_token(TestRequest::get().uri(uri), token)
}

pub fn post(uri: &str, token: &str) -> TestRequest {
    with_token(TestRequest::post().uri(uri), token)
}

pub fn put(uri: &str, token: &str) -> TestRequest {
    with_token(TestRequest::put().uri(uri), token)
}

pub fn post_json(uri: &str, token: &str, body: &Value) -> TestRequest {
    post(uri, token).set_json(body)
}

/// Sends the request and decodes the JSON body; empty bodies come back as `Null`.
pub async fn call<S, B>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = actix_test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let bytes = actix_test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

pub async fn login_token<S, B>(app: &S, login_id: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let payload = json!({ "login_id": login_id, "password": password });
    let (status, body) = call(app, post_json("/auth/login", "", &payload)).await;
    assert_eq!(status, StatusCode::OK, "login failed for {login_id}: {body}");
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
