//! Portal HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! The landing page is served at `/`; JSON routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. `Cache-Control: no-store` → 2. Access log → 3. Panic catcher →
//! 4. Body size limit

use std::any::Any;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the portal router over a shared `CoreState`.
pub fn portal_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    let max_body_bytes = ctx.core.max_body_bytes;

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/specializations/", get(endpoints::doctors::specializations))
        .route("/register-patient/", post(endpoints::patients::register))
        .route("/login-patient/", post(endpoints::patients::login))
        .route("/patient-files/:aadhar/", get(endpoints::patients::files))
        .route("/verify-patient/:aadhar/", get(endpoints::patients::verify))
        .route("/register-doctor/", post(endpoints::doctors::register))
        .route("/login-doctor/", post(endpoints::doctors::login))
        .route("/register-worker/", post(endpoints::workers::register))
        .route("/login-worker/", post(endpoints::workers::login))
        .route("/upload-file/", post(endpoints::files::upload))
        .route("/book-appointment/", post(endpoints::appointments::book));

    let routes = Router::new()
        .route("/", get(endpoints::index::page))
        .nest("/api", api)
        .with_state(ctx);

    with_middleware(routes, max_body_bytes)
}

/// Wrap routes in the shared middleware stack (innermost first).
fn with_middleware(routes: Router, max_body_bytes: usize) -> Router {
    routes
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn(middleware::access_log::log_request))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Render a handler panic as the generic failure body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{self, EntityKind};

    /// Router backed by a file database in a temp directory.
    fn test_app(max_body_bytes: usize) -> (Router, Arc<CoreState>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let core = Arc::new(CoreState::new(dir.path().join("portal.db"), max_body_bytes));
        (portal_router(core.clone()), core, dir)
    }

    async fn send(app: &Router, req: Request<Body>) -> (Response, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (Response::from_parts(parts, Body::empty()), json)
    }

    async fn post(app: &Router, uri: &str, body: Value) -> Value {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (response, json) = send(app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        json
    }

    async fn get_json(app: &Router, uri: &str) -> Value {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (response, json) = send(app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        json
    }

    fn asha() -> Value {
        json!({"name": "Asha", "phone": "9876543210", "aadhar": "123456789012"})
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _core, _dir) = test_app(1024);
        let json = get_json(&app, "/api/health").await;
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");
    }

    #[tokio::test]
    async fn register_then_login_returns_same_patient() {
        let (app, _core, _dir) = test_app(1 << 20);

        let json = post(&app, "/api/register-patient/", asha()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["patient_data"]["aadhar"], "123456789012");
        assert_eq!(json["patient_data"]["email"], "");

        let json = post(
            &app,
            "/api/login-patient/",
            json!({"name": "Asha", "phone": "9876543210"}),
        )
        .await;
        assert_eq!(json["success"], true);
        assert_eq!(json["patient_data"]["aadhar"], "123456789012");
        assert_eq!(json["patient_data"]["name"], "Asha");
    }

    #[tokio::test]
    async fn duplicate_patient_is_rejected() {
        let (app, _core, _dir) = test_app(1 << 20);
        post(&app, "/api/register-patient/", asha()).await;

        let json = post(
            &app,
            "/api/register-patient/",
            json!({"name": "Other", "phone": "9999999999", "aadhar": "123456789012"}),
        )
        .await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Patient with this Aadhar already exists");

        let json = get_json(&app, "/api/verify-patient/123456789012/").await;
        assert_eq!(json["patient_data"]["name"], "Asha");
    }

    #[tokio::test]
    async fn invalid_phone_message() {
        let (app, _core, _dir) = test_app(1 << 20);
        let json = post(
            &app,
            "/api/register-patient/",
            json!({"name": "Asha", "phone": "12345", "aadhar": "123456789012"}),
        )
        .await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Phone must be 10 digits");
    }

    #[tokio::test]
    async fn invalid_json_uses_failure_envelope() {
        let (app, _core, _dir) = test_app(1 << 20);
        let req = Request::builder()
            .method("POST")
            .uri("/api/register-patient/")
            .body(Body::from("{not json"))
            .unwrap();
        let (response, json) = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json, json!({"success": false, "error": "Invalid JSON data"}));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let (app, _core, _dir) = test_app(64);
        let json = post(
            &app,
            "/api/upload-file/",
            json!({"file_data": "A".repeat(512)}),
        )
        .await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Request body too large");
    }

    #[tokio::test]
    async fn doctor_register_and_login() {
        let (app, _core, _dir) = test_app(1 << 20);
        let json = post(
            &app,
            "/api/register-doctor/",
            json!({"name": "Dr. Rao", "hospital": "City Hospital"}),
        )
        .await;
        assert_eq!(json["success"], true);
        let doctor_id = json["doctor_id"].as_str().unwrap().to_string();
        assert!(doctor_id.starts_with("DOC"));
        assert_eq!(
            json["message"],
            format!("Doctor registered successfully! ID: {doctor_id}")
        );
        assert_eq!(json["doctor_data"]["specialization"], "General");

        let json = post(&app, "/api/login-doctor/", json!({"doctor_id": doctor_id})).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["doctor_data"]["hospital"], "City Hospital");

        let json = post(&app, "/api/login-doctor/", json!({"doctor_id": "DOC0000"})).await;
        assert_eq!(json["error"], "Invalid Doctor ID");
    }

    #[tokio::test]
    async fn worker_register_and_login() {
        let (app, _core, _dir) = test_app(1 << 20);
        let json = post(
            &app,
            "/api/register-worker/",
            json!({"name": "Meena", "phone": "9123456780"}),
        )
        .await;
        assert_eq!(json["success"], true);
        let worker_id = json["worker_id"].as_str().unwrap().to_string();
        assert!(worker_id.starts_with("WRK"));

        let json = post(&app, "/api/login-worker/", json!({"worker_id": worker_id})).await;
        assert_eq!(json["worker_data"]["phone"], "9123456780");

        let json = post(&app, "/api/login-worker/", json!({})).await;
        assert_eq!(json["error"], "Worker ID is required");
    }

    #[tokio::test]
    async fn booking_without_date_issues_no_code() {
        let (app, core, _dir) = test_app(1 << 20);
        post(&app, "/api/register-patient/", asha()).await;

        let json = post(
            &app,
            "/api/book-appointment/",
            json!({
                "patient_aadhar": "123456789012",
                "hospital": "City Hospital",
                "doctor_name": "Dr. Rao",
                "appointment_time": "10:30 AM"
            }),
        )
        .await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "All fields are required");
        assert!(json.get("appointment_code").is_none());

        let conn = core.open_db().unwrap();
        assert_eq!(db::count(&conn, EntityKind::Appointment).unwrap(), 0);
    }

    #[tokio::test]
    async fn booking_for_unknown_patient_writes_nothing() {
        let (app, core, _dir) = test_app(1 << 20);
        let json = post(
            &app,
            "/api/book-appointment/",
            json!({
                "patient_aadhar": "999999999999",
                "hospital": "City Hospital",
                "doctor_name": "Dr. Rao",
                "appointment_date": "2024-05-20",
                "appointment_time": "10:30 AM"
            }),
        )
        .await;
        assert_eq!(json["error"], "Patient not found");

        let conn = core.open_db().unwrap();
        assert_eq!(db::count(&conn, EntityKind::Appointment).unwrap(), 0);
    }

    #[tokio::test]
    async fn booking_returns_code_and_data() {
        let (app, _core, _dir) = test_app(1 << 20);
        post(&app, "/api/register-patient/", asha()).await;

        let json = post(
            &app,
            "/api/book-appointment/",
            json!({
                "patient_aadhar": "123456789012",
                "hospital": "City Hospital",
                "doctor_name": "Dr. Rao",
                "appointment_date": "2024-05-20",
                "appointment_time": "10:30 AM"
            }),
        )
        .await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Appointment booked successfully");
        let code = json["appointment_code"].as_str().unwrap();
        assert!(code.starts_with("APT") && code.len() == 9);
        assert_eq!(json["appointment_data"]["code"], code);
        assert_eq!(json["appointment_data"]["date"], "2024-05-20");
        assert_eq!(json["appointment_data"]["doctor"], "Dr. Rao");
    }

    #[tokio::test]
    async fn files_are_listed_newest_first() {
        let (app, _core, _dir) = test_app(1 << 20);
        post(&app, "/api/register-patient/", asha()).await;

        let json = get_json(&app, "/api/patient-files/123456789012/").await;
        assert_eq!(json["files"], json!([]));

        for name in ["first.txt", "second.txt"] {
            let json = post(
                &app,
                "/api/upload-file/",
                json!({
                    "patient_aadhar": "123456789012",
                    "file_name": name,
                    "file_data": "data:text/plain;base64,aGVsbG8=",
                    "uploader_type": "worker",
                    "uploader_id": "WRK1234"
                }),
            )
            .await;
            assert_eq!(json["success"], true);
            assert_eq!(json["message"], "File uploaded successfully");
        }

        let json = get_json(&app, "/api/patient-files/123456789012/").await;
        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["name"], "second.txt");
        assert_eq!(files[1]["name"], "first.txt");
        assert_eq!(files[0]["type"], "text/plain");
        assert_eq!(files[0]["size"], 5);
        assert_eq!(files[0]["uploader"], "worker-WRK1234");
        assert_eq!(files[0]["data_url"], "data:text/plain;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn unknown_patient_lookups_fail() {
        let (app, _core, _dir) = test_app(1 << 20);
        let json = get_json(&app, "/api/patient-files/000000000000/").await;
        assert_eq!(json["error"], "Patient not found");
        let json = get_json(&app, "/api/verify-patient/000000000000/").await;
        assert_eq!(json["error"], "Patient not found");
    }

    #[tokio::test]
    async fn specializations_are_listed() {
        let (app, _core, _dir) = test_app(1024);
        let json = get_json(&app, "/api/specializations/").await;
        let list = json["specializations"].as_array().unwrap();
        assert_eq!(list[0], "General");
        assert!(list.contains(&json!("Cardiology")));
    }

    #[tokio::test]
    async fn responses_carry_no_store() {
        let (app, _core, _dir) = test_app(1024);
        let req = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let (response, _) = send(&app, req).await;
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }

    #[tokio::test]
    async fn landing_page_is_html() {
        let (app, _core, _dir) = test_app(1024);
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (app, _core, _dir) = test_app(1024);
        let req = Request::builder().uri("/api/nope/").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn handler_panic_becomes_generic_failure() {
        async fn boom() -> &'static str {
            panic!("boom")
        }
        let app = with_middleware(Router::new().route("/boom", get(boom)), 1024);

        let req = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let (response, json) = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(json, json!({"success": false, "error": "An internal error occurred"}));
    }
}
