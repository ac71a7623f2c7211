use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    application::render::RenderError, domain::error::DomainError, infra::error::InfraError,
};

/// Diagnostic chain carried in response extensions so the logging layer can
/// report why a request failed without leaking detail to the client.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<RenderError> for HttpError {
    fn from(error: RenderError) -> Self {
        HttpError::from_error(
            "application::render",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to render content",
            &error,
        )
    }
}

/// Fatal errors surfaced by `main` while starting the server or exporting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_collects_the_source_chain() {
        let io = std::io::Error::other("disk full");
        let error = InfraError::write("/tmp/feed.xml", io);
        let report = ErrorReport::from_error("test", StatusCode::INTERNAL_SERVER_ERROR, &error);

        assert_eq!(report.messages.len(), 2);
        assert!(report.messages[0].contains("/tmp/feed.xml"));
        assert_eq!(report.messages[1], "disk full");
    }

    #[test]
    fn render_failure_becomes_a_server_error() {
        let response = HttpError::from(RenderError::Decoration {
            message: "no theme".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(report.source, "application::render");
        assert!(report.messages[0].contains("no theme"));
    }

    #[test]
    fn fixture_errors_display_transparently() {
        let error = AppError::from(DomainError::DuplicateSlug {
            slug: "a".to_string(),
        });
        assert_eq!(error.to_string(), "duplicate post slug `a`");
        assert!(matches!(error, AppError::Domain(DomainError::DuplicateSlug { .. })));
    }
}
