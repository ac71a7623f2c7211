use std::{sync::Arc, time::Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        HeaderMap, HeaderName, HeaderValue, Request, StatusCode,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, LINK, LOCATION, REFERRER_POLICY, USER_AGENT,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{
    application::error::ErrorReport,
    config::EdgeSettings,
    infra::{
        error::InfraError,
        telemetry::{METRIC_HTTP_CRAWLER_HINT_TOTAL, METRIC_HTTP_REDIRECT_TOTAL},
    },
};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");

const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
style-src 'self' 'unsafe-inline' https://fonts.googleapis.com; \
font-src 'self' https://fonts.gstatic.com; \
img-src 'self' data: https:; \
connect-src 'self' https:";

const SECURITY_HEADERS: [(HeaderName, &str); 6] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (
        PERMISSIONS_POLICY,
        "camera=(), microphone=(), geolocation=(), interest-cohort=()",
    ),
    (CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY_VALUE),
];

const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";
const PAGE_CACHE: &str = "public, s-maxage=3600, stale-while-revalidate=86400";

const KNOWN_CRAWLERS: [&str; 12] = [
    "GPTBot",
    "ChatGPT",
    "ClaudeBot",
    "Claude-Web",
    "anthropic-ai",
    "PerplexityBot",
    "Google-Extended",
    "Googlebot",
    "Bingbot",
    "Meta-ExternalAgent",
    "Applebot",
    "OAI-SearchBot",
];

/// What the edge layer does with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    /// Answer with `301` to `location` without running the handler.
    Redirect { location: String },
    /// Run the handler, then overwrite these headers on its response.
    Decorate(HeaderMap),
}

/// Stateless per-request header and redirect policy.
#[derive(Debug, Clone)]
pub struct EdgePolicy {
    static_prefixes: Vec<String>,
    /// Lowercased once so matching is a plain substring check.
    crawlers: Vec<String>,
    preload_hint: HeaderValue,
}

impl EdgePolicy {
    pub fn from_settings(settings: &EdgeSettings) -> Result<Self, InfraError> {
        let preload_hint = HeaderValue::from_str(&settings.preload_hint).map_err(|err| {
            InfraError::configuration(format!("edge.preload_hint is not a header value: {err}"))
        })?;

        Ok(Self {
            static_prefixes: settings.static_prefixes.clone(),
            crawlers: KNOWN_CRAWLERS
                .iter()
                .map(|name| name.to_ascii_lowercase())
                .collect(),
            preload_hint,
        })
    }

    pub fn evaluate(
        &self,
        path: &str,
        query: Option<&str>,
        user_agent: Option<&str>,
    ) -> EdgeDecision {
        if let Some(location) = redirect_location(path, query) {
            return EdgeDecision::Redirect { location };
        }

        let mut headers = security_headers();
        let cache = if self.is_static(path) {
            IMMUTABLE_CACHE
        } else {
            PAGE_CACHE
        };
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));

        if user_agent.is_some_and(|agent| self.is_known_crawler(agent)) {
            headers.insert(LINK, self.preload_hint.clone());
        }

        EdgeDecision::Decorate(headers)
    }

    fn is_static(&self, path: &str) -> bool {
        self.static_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_known_crawler(&self, user_agent: &str) -> bool {
        let agent = user_agent.to_ascii_lowercase();
        self.crawlers.iter().any(|name| agent.contains(name.as_str()))
    }
}

fn security_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(SECURITY_HEADERS.len() + 2);
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
}

/// `None` for the root and for paths without a trailing slash.
///
/// The target always starts with exactly one `/`: a leading `//` or `/\`
/// would be read by browsers as a protocol-relative URL to another host.
fn redirect_location(path: &str, query: Option<&str>) -> Option<String> {
    if path == "/" || !path.ends_with('/') {
        return None;
    }

    let trimmed = path
        .trim_end_matches('/')
        .trim_start_matches(['/', '\\']);
    let mut location = format!("/{trimmed}");

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }
    Some(location)
}

/// Apply the [`EdgePolicy`] decision to every request.
pub async fn edge_headers(
    State(policy): State<Arc<EdgePolicy>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok());
    let decision = policy.evaluate(request.uri().path(), request.uri().query(), user_agent);

    match decision {
        EdgeDecision::Redirect { location } => {
            debug!(
                target = "folio::http::edge",
                path = %request.uri().path(),
                location = %location,
                "trailing slash redirect"
            );
            counter!(METRIC_HTTP_REDIRECT_TOTAL).increment(1);
            redirect_response(&location)
        }
        EdgeDecision::Decorate(headers) => {
            if headers.contains_key(LINK) {
                counter!(METRIC_HTTP_CRAWLER_HINT_TOTAL).increment(1);
            }
            let mut response = next.run(request).await;
            response.headers_mut().extend(headers);
            response
        }
    }
}

fn redirect_response(location: &str) -> Response {
    let Ok(value) = HeaderValue::from_str(location) else {
        let mut response = StatusCode::BAD_REQUEST.into_response();
        ErrorReport::from_message(
            "infra::http::middleware::edge_headers",
            StatusCode::BAD_REQUEST,
            format!("redirect target `{location}` is not a header value"),
        )
        .attach(&mut response);
        response.headers_mut().extend(security_headers());
        return response;
    };

    let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
    let headers = response.headers_mut();
    headers.extend(security_headers());
    headers.insert(LOCATION, value);
    response
}

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "folio::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "request failed",
            );
        } else {
            warn!(
                target = "folio::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                query = uri.query().unwrap_or(""),
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "client request error",
            );
        }
    }

    response
}
