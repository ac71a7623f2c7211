use thiserror::Error;

/// Identifies what is being rendered so diagnostics can name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Full markdown body of a blog post.
    PostBody { slug: String },
}

impl RenderTarget {
    /// Slug of the post the target belongs to, used in render diagnostics.
    pub fn slug(&self) -> &str {
        match self {
            RenderTarget::PostBody { slug } => slug.as_str(),
        }
    }
}

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub target: RenderTarget,
    pub markdown: String,
    /// Public origin used to tell same-site links from external ones.
    pub public_site_url: Option<String>,
}

impl RenderRequest {
    pub fn new(target: RenderTarget, markdown: impl Into<String>) -> Self {
        Self {
            target,
            markdown: markdown.into(),
            public_site_url: None,
        }
    }

    pub fn with_public_site_url(mut self, public_site_url: impl Into<String>) -> Self {
        let url = public_site_url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.public_site_url = Some(trimmed.to_string());
        }
        self
    }
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Sanitised, decorated HTML ready to embed in a page.
    pub html: String,
    /// Whether any fenced code block was rendered.
    pub contains_code: bool,
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown parsing failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
    #[error("sanitisation rejected content: {message}")]
    Sanitisation { message: String },
    #[error("markup decoration failed: {message}")]
    Decoration { message: String },
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError>;
}
