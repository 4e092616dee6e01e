use axum::{
    Router,
    body::Bytes,
    extract::Json,
    http::{HeaderValue, Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::config::{ConfigError, ServerConfig};
use crate::core::{
    CalculationError, CalculationInput, DEFAULT_YEAR, ParameterTable, calculate_pension,
};

mod request_log;

pub use request_log::client_ip;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct YearsResponse {
    years: Vec<i64>,
    default_year: i64,
}

pub async fn run_http_server(config: &ServerConfig) -> Result<(), ServerError> {
    config.validate()?;
    let addr = config.socket_addr()?;
    let app = build_router(cors_layer(config.cors_origin_values()?));

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "pension calculator API listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    info!("server stopped");
    Ok(())
}

pub fn build_router(cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/years", get(years_handler))
        .route("/api/calculate", post(calculate_handler))
        .fallback(not_found_handler)
        .layer(middleware::from_fn(request_log::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);
    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn years_handler() -> Response {
    json_response(
        StatusCode::OK,
        YearsResponse {
            years: ParameterTable::standard().supported_years(),
            default_year: DEFAULT_YEAR,
        },
    )
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_handler(body: Bytes) -> Response {
    let input = match calculation_input_from_body(&body) {
        Ok(input) => input,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    match calculate_pension(input) {
        Ok(result) => {
            debug!(
                year = input.year,
                years = input.years,
                early_days = input.early_days,
                pension_monthly = result.results.pension_monthly,
                "pension calculated"
            );
            json_response(StatusCode::OK, result)
        }
        Err(e) => {
            debug!(error = %e, "calculation rejected");
            let field = match &e {
                CalculationError::Validation(v) => Some(v.field()),
                CalculationError::Configuration(_) => Some("year"),
            };
            json_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: e.to_string(),
                    field,
                },
            )
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            field: None,
        },
    )
}

/// Reads the calculation fields from a request body.
///
/// A body that is not a JSON object counts as empty, so every field takes its
/// default. Numbers may arrive as JSON numbers, numeric strings or booleans
/// (`true` is 1).
fn calculation_input_from_body(body: &[u8]) -> Result<CalculationInput, String> {
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    };

    Ok(CalculationInput {
        assessment_base: float_field(&fields, "ovz_monthly", 0.0)?,
        years: int_field(&fields, "years", 0)?,
        year: int_field(&fields, "year", DEFAULT_YEAR)?,
        early_days: int_field(&fields, "early_days", 0)?,
    })
}

fn float_field(fields: &Map<String, Value>, name: &str, default: f64) -> Result<f64, String> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("{name} must be a number")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{name} must be a number, got {s:?}")),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(_) => Err(format!("{name} must be a number")),
    }
}

/// Integer fields accept whole strings and truncate fractional numbers toward zero.
fn int_field(fields: &Map<String, Value>, name: &str, default: i64) -> Result<i64, String> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_i64() {
                return Ok(v);
            }
            match n.as_f64() {
                Some(v) if v.is_finite() && v.abs() < i64::MAX as f64 => Ok(v.trunc() as i64),
                _ => Err(format!("{name} must be an integer")),
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("{name} must be an integer, got {s:?}")),
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(_) => Err(format!("{name} must be an integer")),
    }
}
