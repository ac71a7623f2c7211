use crate::application::{
    error::{ErrorReport, HttpError},
    metadata::PageMeta,
};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(chrome, content);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: String,
    pub href: String,
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
    pub feed_href: String,
}

/// Head metadata for one page plus the JSON-LD blocks it embeds.
#[derive(Clone)]
pub struct PageMetaView {
    pub page: PageMeta,
    /// Already escaped with `embed_json_ld`.
    pub json_ld: Vec<String>,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub language: String,
    /// Site-wide graph, escaped for inline embedding.
    pub knowledge_graph: String,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub language: String,
    pub knowledge_graph: String,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            language: chrome.language,
            knowledge_graph: chrome.knowledge_graph,
            content,
        }
    }
}

#[derive(Clone)]
pub struct TagBadge {
    pub label: String,
}

pub fn build_tag_badges<'a, T>(tags: T) -> Vec<TagBadge>
where
    T: IntoIterator<Item = &'a String>,
{
    tags.into_iter()
        .map(|tag| TagBadge {
            label: format!("#{tag}"),
        })
        .collect()
}

#[derive(Clone)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub published: String,
    pub read_time: String,
    pub badges: Vec<TagBadge>,
}

#[derive(Clone)]
pub struct ProjectCard {
    pub name: String,
    pub summary: String,
    pub url: String,
}

#[derive(Clone)]
pub struct SocialLinkView {
    pub label: String,
    pub url: String,
}

pub struct HomeView {
    pub headline: String,
    pub tagline: String,
    pub intro: String,
    pub featured: Vec<ProjectCard>,
    pub recent_posts: Vec<PostCard>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct AboutView {
    pub name: String,
    pub job_title: String,
    pub location: String,
    pub paragraphs: Vec<String>,
    pub featured: Vec<ProjectCard>,
    pub social_links: Vec<SocialLinkView>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutView>,
}

pub struct ContactView {
    pub email: String,
    pub location: String,
    pub social_links: Vec<SocialLinkView>,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactView>,
}

pub struct GalleryView {
    pub projects: Vec<ProjectCard>,
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub view: LayoutContext<GalleryView>,
}

pub struct BlogIndexView {
    pub posts: Vec<PostCard>,
    pub has_posts: bool,
}

#[derive(Template)]
#[template(path = "blog_index.html")]
pub struct BlogIndexTemplate {
    pub view: LayoutContext<BlogIndexView>,
}

pub struct PostDetailContext {
    pub slug: String,
    pub title: String,
    pub published: String,
    pub read_time: String,
    pub excerpt: String,
    pub tags: Vec<TagBadge>,
    pub body_html: String,
    pub has_code_blocks: bool,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to continue exploring.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
