//! Origin gating for browser callers.
//!
//! Requests without an `Origin` header come from non-browser tooling and are
//! always let through. Browser origins must be on the configured allow-list
//! in production, or one of the local dev servers otherwise.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::{header, request::Parts, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsMode {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Not allowed by CORS")]
pub struct OriginDenied {
    pub origin: String,
}

/// Shared, mutable set of production origins.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    origins: Arc<RwLock<BTreeSet<String>>>,
}

impl AllowList {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            origins: Arc::new(RwLock::new(origins.into_iter().map(Into::into).collect())),
        }
    }

    pub fn contains(&self, origin: &str) -> bool {
        match self.origins.read() {
            Ok(guard) => guard.contains(origin),
            Err(poisoned) => poisoned.into_inner().contains(origin),
        }
    }

    pub fn insert(&self, origin: impl Into<String>) {
        let origin = origin.into();
        match self.origins.write() {
            Ok(mut guard) => guard.insert(origin),
            Err(poisoned) => poisoned.into_inner().insert(origin),
        };
    }

    /// Swap in a fresh set, e.g. after reloading configuration.
    pub fn replace<I, S>(&self, origins: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fresh: BTreeSet<String> = origins.into_iter().map(Into::into).collect();
        match self.origins.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }
}

impl From<&CorsConfig> for AllowList {
    fn from(config: &CorsConfig) -> Self {
        Self::new(config.allowed_origins.iter().cloned())
    }
}

/// Decides whether a request origin may call the API.
#[derive(Debug, Clone)]
pub struct OriginGate {
    mode: CorsMode,
    allow_list: AllowList,
}

impl OriginGate {
    pub fn new(mode: CorsMode, allow_list: AllowList) -> Self {
        Self { mode, allow_list }
    }

    pub fn mode(&self) -> CorsMode {
        self.mode
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn decide(&self, origin: Option<&str>) -> Result<(), OriginDenied> {
        let Some(origin) = origin else {
            return Ok(());
        };

        let allowed = match self.mode {
            CorsMode::Production => self.allow_list.contains(origin),
            CorsMode::Development => DEV_ORIGINS.contains(&origin),
        };

        if allowed {
            Ok(())
        } else {
            Err(OriginDenied {
                origin: origin.to_string(),
            })
        }
    }

    fn permits(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.decide(Some(origin)).is_ok())
            .unwrap_or(false)
    }
}

/// Response headers for permitted origins.
pub fn cors_layer(gate: OriginGate) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| gate.permits(origin),
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Middleware rejecting denied origins before they reach a handler.
pub async fn enforce_origin(
    State(gate): State<OriginGate>,
    request: Request,
    next: Next,
) -> Response {
    let verdict = match request.headers().get(header::ORIGIN) {
        None => Ok(()),
        Some(value) => match value.to_str() {
            Ok(origin) => gate.decide(Some(origin)),
            Err(_) => Err(OriginDenied {
                origin: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            }),
        },
    };

    match verdict {
        Ok(()) => next.run(request).await,
        Err(denied) => {
            warn!(origin = %denied.origin, method = %request.method(), "origin rejected");
            (StatusCode::FORBIDDEN, denied.to_string()).into_response()
        }
    }
}
