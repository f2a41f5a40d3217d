//! Purpose: Provide the HTTP/JSON conversion server for numerus.
//! Exports: `ServeConfig`, `serve`.
//! Role: Axum-based server mapping query parameters onto the conversion core.
//! Invariants: Error envelopes carry stable machine-readable codes.
//! Invariants: Loopback-only unless explicitly allowed.
//! Invariants: Handlers hold no shared mutable state; every request is independent.

use axum::extract::Query;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use time::format_description::well_known::Rfc3339;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use numerus::api::{Conversion, Error, ErrorKind, arabic_from_query, roman_from_query};

#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub bind: SocketAddr,
    pub cors_allowed_origins: Vec<String>,
    pub allow_non_loopback: bool,
}

pub async fn serve(config: ServeConfig) -> Result<(), Error> {
    validate_config(&config)?;

    init_tracing();

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/r2a", get(roman_to_arabic))
        .route("/a2r", get(arabic_to_roman))
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors_layer(&config)? {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to bind server")
                .with_source(err)
        })?;
    tracing::info!(bind = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("server failed")
                .with_source(err)
        })
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(addr) => addr.is_loopback(),
        IpAddr::V6(addr) => addr.is_loopback(),
    }
}

fn validate_config(config: &ServeConfig) -> Result<(), Error> {
    if !is_loopback(config.bind.ip()) && !config.allow_non_loopback {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("non-loopback bind requires explicit opt-in")
            .with_hint("Re-run with --allow-non-loopback or use a loopback address."));
    }
    for origin in &config.cors_allowed_origins {
        if origin.trim().is_empty() || HeaderValue::from_str(origin).is_err() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("invalid CORS origin")
                .with_detail(format!("{origin:?} is not a valid origin value"))
                .with_hint("Use a full origin like https://example.com."));
        }
    }
    Ok(())
}

fn cors_layer(config: &ServeConfig) -> Result<Option<CorsLayer>, Error> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(None);
    }
    let mut origins = Vec::with_capacity(config.cors_allowed_origins.len());
    for origin in &config.cors_allowed_origins {
        let value = HeaderValue::from_str(origin).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message("invalid CORS origin")
                .with_detail(format!("{origin:?} is not a valid origin value"))
                .with_source(err)
        })?;
        origins.push(value);
    }
    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST]),
    ))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("install SIGTERM handler");
        signal.recv().await;
    };
    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    #[cfg(not(unix))]
    ctrl_c.await;
}

#[derive(Debug, Deserialize)]
struct RomanQuery {
    roman: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArabicQuery {
    arabic: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

async fn health() -> Response {
    let time = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    json_response(json!({ "status": "ok", "time": time }))
}

async fn roman_to_arabic(Query(query): Query<RomanQuery>) -> Response {
    match roman_from_query(query.roman.as_deref()) {
        Ok(conversion) => conversion_response(conversion),
        Err(err) => error_response(err),
    }
}

async fn arabic_to_roman(Query(query): Query<ArabicQuery>) -> Response {
    match arabic_from_query(query.arabic.as_deref()) {
        Ok(conversion) => conversion_response(conversion),
        Err(err) => error_response(err),
    }
}

fn conversion_response(conversion: Conversion) -> Response {
    Json(conversion).into_response()
}

fn json_response(payload: serde_json::Value) -> Response {
    Json(payload).into_response()
}

fn error_response(err: Error) -> Response {
    let status = match err.kind() {
        ErrorKind::Usage
        | ErrorKind::MissingParam
        | ErrorKind::EmptyParam
        | ErrorKind::InvalidParamType
        | ErrorKind::InvalidNumber
        | ErrorKind::InvalidRange
        | ErrorKind::InvalidRoman => StatusCode::BAD_REQUEST,
        ErrorKind::Io | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorEnvelope {
        error: ErrorBody {
            code: err.kind().code(),
            message: err.message().unwrap_or("error").to_string(),
            detail: err.detail().map(str::to_string),
        },
    };
    (status, Json(body)).into_response()
}
