//! Markdown rendering for post bodies.
//!
//! The pipeline is pure: markdown in, sanitised and decorated HTML out. Callers
//! decide what to do with failures.

mod service;
mod types;

pub use service::{ComrakRenderService, MarkupKind, render_service};
pub use types::{RenderError, RenderOutput, RenderRequest, RenderService, RenderTarget};
