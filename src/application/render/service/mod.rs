mod config;
mod decorate;
mod highlight;
mod rewrite;

use std::sync::Arc;

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use once_cell::sync::Lazy;
use syntect::{html::ClassStyle, parsing::SyntaxSet};
use tracing::debug;

use crate::application::render::types::{
    RenderError, RenderOutput, RenderRequest, RenderService,
};

pub use decorate::MarkupKind;

use config::{build_post_sanitizer, default_options};
use decorate::decorate_markup;
use rewrite::rewrite_ast;

/// Comrak-based rendering pipeline with Syntect highlighting, Ammonia
/// sanitisation and a lol_html decoration pass.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    syntax_set: SyntaxSet,
    class_style: ClassStyle,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakRenderService {
    fn new() -> Self {
        Self {
            options: default_options(),
            syntax_set: SyntaxSet::load_defaults_newlines(),
            class_style: ClassStyle::SpacedPrefixed { prefix: "syntax-" },
            sanitizer: build_post_sanitizer(),
        }
    }
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::new()
    }
}

static RENDER_SERVICE: Lazy<Arc<ComrakRenderService>> =
    Lazy::new(|| Arc::new(ComrakRenderService::new()));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<ComrakRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl RenderService for ComrakRenderService {
    fn render(&self, request: &RenderRequest) -> Result<RenderOutput, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, &request.markdown, &self.options);

        let rewrite_outcome = rewrite_ast(root, &self.syntax_set, &self.class_style)?;
        let rendered_html = render_html_stage(root, &self.options)?;
        let sanitized_html = sanitize_stage(&rendered_html, &self.sanitizer)?;
        let html = decorate_markup(&sanitized_html, request.public_site_url.as_deref())?;

        debug!(
            target = "folio::render",
            slug = request.target.slug(),
            code_blocks = rewrite_outcome.code_blocks,
            bytes = html.len(),
            "markdown rendered"
        );

        Ok(RenderOutput {
            html,
            contains_code: rewrite_outcome.contains_code,
        })
    }
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::Markdown {
        message: err.to_string(),
    })?;
    Ok(html)
}

fn sanitize_stage(html: &str, sanitizer: &ammonia::Builder<'static>) -> Result<String, RenderError> {
    let cleaned = sanitizer.clean(html).to_string();
    if cleaned.trim().is_empty() && !html.trim().is_empty() {
        return Err(RenderError::Sanitisation {
            message: "all markup was removed".to_string(),
        });
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::types::RenderTarget;

    fn render(markdown: &str) -> RenderOutput {
        let request = RenderRequest::new(
            RenderTarget::PostBody {
                slug: "sample".to_string(),
            },
            markdown,
        )
        .with_public_site_url("https://folio.example/");
        ComrakRenderService::default()
            .render(&request)
            .expect("render succeeds")
    }

    #[test]
    fn headings_and_paragraphs_are_decorated() {
        let output = render("# Title\n\n## Section\n\nSome **bold** and *soft* text.\n");
        assert!(output.html.contains("<h1 class=\"prose-h1\">Title</h1>"));
        assert!(output.html.contains("<h2 class=\"prose-h2\">Section</h2>"));
        assert!(output.html.contains("<strong class=\"prose-strong\">bold</strong>"));
        assert!(output.html.contains("<em class=\"prose-em\">soft</em>"));
        assert!(output.html.contains("<p class=\"prose-p\">"));
        assert!(!output.contains_code);
    }

    #[test]
    fn external_links_open_in_new_tab() {
        let output = render("[out](https://elsewhere.example/page) and [home](https://folio.example/blog)\n");
        assert!(output.html.contains("href=\"https://elsewhere.example/page\""));
        assert!(output.html.contains("rel=\"noopener noreferrer\""));
        assert!(output.html.contains("target=\"_blank\""));
        assert_eq!(output.html.matches("target=\"_blank\"").count(), 1);
    }

    #[test]
    fn fenced_code_is_highlighted_and_flagged() {
        let output = render("Run:\n\n```rust\nfn main() {}\n```\n\nand `inline` too.\n");
        assert!(output.contains_code);
        assert!(output.html.contains("data-language=\"rust\""));
        assert!(output.html.contains("prose-pre"));
        assert!(output.html.contains("<code class=\"prose-code\">inline</code>"));
    }

    #[test]
    fn raw_scripts_are_stripped() {
        let output = render("Hello <script>alert(1)</script> world\n");
        assert!(!output.html.contains("<script"));
        assert!(output.html.contains("Hello"));
    }

    #[test]
    fn builtin_posts_render() {
        let registry = crate::domain::posts::PostRegistry::builtin().expect("valid registry");
        for post in registry.all() {
            let output = render(&post.content);
            assert!(!output.html.is_empty(), "{} rendered empty", post.slug);
        }
    }
}
