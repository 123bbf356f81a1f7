use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::controllers::paste;
use crate::error::ApiError;
use crate::store::{AnyStore, PasteStore};
use crate::types::api::{CreatePaste, CreatedPaste, PasteContent, PasteStatus};
use crate::App;

/// The manual for the program in man page form.
const MAN_PAGE: &str = include_str!("../../assets/man.txt");

/// Header that pins the request clock when `test_mode` is enabled.
const TEST_NOW_HEADER: &str = "x-test-now-ms";

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], app.config.port));

    let app = Router::new()
        .route("/", get(index))
        .route("/api/healthz", get(healthz))
        .route("/api/pastes", post(create_paste))
        .route("/api/pastes/:id", get(consume_paste))
        .route("/api/pastes/:id/status", get(paste_status))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(
            app.config.limits.max_content_length,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

async fn index() -> &'static str {
    MAN_PAGE
}

async fn healthz(State(mut store): State<AnyStore>) -> crate::ApiResult<Json<serde_json::Value>> {
    store.ping().await?;
    Ok(Json(json!({ "ok": true })))
}

async fn create_paste(
    State(mut app): State<App>,
    headers: HeaderMap,
    Json(request): Json<CreatePaste>,
) -> crate::ApiResult<impl IntoResponse> {
    let now = resolve_now(app.config.test_mode, &headers)?;

    let paste = paste::create(
        &mut app,
        &request.content,
        request.ttl_seconds,
        request.max_views,
        now,
    )
    .await?;

    let path = format!("/api/pastes/{id}", id = paste.id);
    let url = format!("{base_url}{path}", base_url = app.config.base_url);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, path)],
        Json(CreatedPaste { id: paste.id, url }),
    ))
}

async fn consume_paste(
    State(mut app): State<App>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> crate::ApiResult<Json<PasteContent>> {
    let now = resolve_now(app.config.test_mode, &headers)?;
    let viewed = paste::consume_view(&mut app, &id, now).await?;
    Ok(Json(viewed))
}

async fn paste_status(
    State(mut app): State<App>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> crate::ApiResult<Json<PasteStatus>> {
    let now = resolve_now(app.config.test_mode, &headers)?;
    let status = paste::inspect(&mut app, &id, now).await?;
    Ok(Json(status))
}

/// The clock every lifecycle decision on this request will use: wall time,
/// unless test mode lets the caller pin it.
fn resolve_now(test_mode: bool, headers: &HeaderMap) -> crate::ApiResult<DateTime<Utc>> {
    if !test_mode {
        return Ok(Utc::now());
    }

    let Some(value) = headers.get(TEST_NOW_HEADER) else {
        return Ok(Utc::now());
    };

    value
        .to_str()
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        .ok_or(ApiError::Validation {
            field: "x-test-now-ms",
            reason: "must be a unix timestamp in milliseconds",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(TEST_NOW_HEADER, value.parse().unwrap());
        headers
    }

    #[test]
    fn header_is_ignored_outside_test_mode() {
        let now = resolve_now(false, &headers("12345")).unwrap();
        assert_ne!(now.timestamp_millis(), 12345);
    }

    #[test]
    fn header_pins_the_clock_in_test_mode() {
        let now = resolve_now(true, &headers("12345")).unwrap();
        assert_eq!(now.timestamp_millis(), 12345);
    }

    #[test]
    fn garbage_header_is_a_validation_error() {
        assert!(matches!(
            resolve_now(true, &headers("not-a-number")),
            Err(ApiError::Validation {
                field: "x-test-now-ms",
                ..
            })
        ));
    }

    #[test]
    fn missing_header_falls_back_to_wall_time() {
        assert!(resolve_now(true, &HeaderMap::new()).is_ok());
    }
}
