//! CORS handling
//!
//! Preflight requests are answered before routing, so an `OPTIONS` to any
//! path (matched or not) gets a 204 with the allow-list headers. Disallowed
//! origins are not an error: they receive the first configured origin
//! instead of their own.

use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// CORS allow-list configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to have their `Origin` reflected back
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "https://bluetrails.pages.dev".to_string(),
            ],
        }
    }
}

impl CorsConfig {
    /// Build from a comma-separated origin list
    pub fn from_comma_separated(origins: &str) -> Self {
        let allowed_origins: Vec<String> = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if allowed_origins.is_empty() {
            return Self::default();
        }
        Self { allowed_origins }
    }

    /// The `Access-Control-Allow-Origin` value for a request origin:
    /// the origin itself when allow-listed (or the list holds `*`),
    /// otherwise the first configured origin
    pub fn resolve_origin(&self, origin: Option<&str>) -> String {
        if let Some(origin) = origin {
            let allowed = self
                .allowed_origins
                .iter()
                .any(|o| o == origin || o == "*");
            if allowed {
                return origin.to_string();
            }
        }
        self.allowed_origins
            .first()
            .cloned()
            .unwrap_or_else(|| "*".to_string())
    }
}

/// Middleware adding CORS headers to every response and short-circuiting
/// `OPTIONS` preflights to 204 before routing
pub async fn cors_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(&mut response, &state.cors, origin.as_deref());
        return response;
    }

    let mut response = next.run(req).await;
    apply_cors_headers(&mut response, &state.cors, origin.as_deref());
    response
}

fn apply_cors_headers(response: &mut Response, config: &CorsConfig, origin: Option<&str>) {
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&config.resolve_origin(origin)) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
}
