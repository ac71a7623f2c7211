use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use time::OffsetDateTime;

use crate::{
    application::{
        blog::BlogService, chrome::ChromeService, error::HttpError, page::PageService,
        sitemap::SitemapService, syndication::SyndicationService,
    },
    infra::assets::serve_static,
    presentation::views::{
        AboutTemplate, BlogIndexTemplate, ContactTemplate, GalleryTemplate, IndexTemplate,
        PostTemplate, render_not_found_response, render_template_response,
    },
};

use super::middleware::{EdgePolicy, edge_headers, log_responses, set_request_context};

const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");
const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
    pub pages: Arc<PageService>,
    pub chrome: Arc<ChromeService>,
    pub syndication: Arc<SyndicationService>,
    pub sitemap: Arc<SitemapService>,
    pub edge: Arc<EdgePolicy>,
}

pub fn build_router(state: HttpState) -> Router {
    let edge = Arc::clone(&state.edge);

    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/gallery", get(gallery))
        .route("/blog", get(blog_index))
        .route("/blog/{slug}", get(post_detail))
        .route("/feed.xml", get(rss_feed))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots_txt))
        .route("/llms.txt", get(llms_txt))
        .route("/static/{*path}", get(serve_static))
        .route("/_health", get(health))
        .fallback(fallback_router)
        .with_state(state)
        .layer(middleware::from_fn_with_state(edge, edge_headers))
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    let view = state.pages.home();
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn about(State(state): State<HttpState>) -> Response {
    let view = state.pages.about();
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

async fn contact(State(state): State<HttpState>) -> Response {
    let view = state.pages.contact();
    render_template_response(ContactTemplate { view }, StatusCode::OK)
}

async fn gallery(State(state): State<HttpState>) -> Response {
    let view = state.pages.gallery();
    render_template_response(GalleryTemplate { view }, StatusCode::OK)
}

async fn blog_index(State(state): State<HttpState>) -> Response {
    let view = state.blog.index();
    render_template_response(BlogIndexTemplate { view }, StatusCode::OK)
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.blog.post_page(&slug) {
        Ok(Some(view)) => render_template_response(PostTemplate { view }, StatusCode::OK),
        Ok(None) => render_not_found_response(state.chrome.not_found_chrome()),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn fallback_router(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome.not_found_chrome())
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn rss_feed(State(state): State<HttpState>) -> Response {
    let body = state.syndication.rss_feed(OffsetDateTime::now_utc());
    let mut response = xml_response(body, XML_CONTENT_TYPE);
    response
        .headers_mut()
        .insert(X_ROBOTS_TAG, HeaderValue::from_static("all"));
    response
}

async fn sitemap(State(state): State<HttpState>) -> Response {
    let body = state.sitemap.sitemap_xml(OffsetDateTime::now_utc());
    xml_response(body, XML_CONTENT_TYPE)
}

async fn robots_txt(State(state): State<HttpState>) -> Response {
    plain_response(state.sitemap.robots_txt())
}

async fn llms_txt(State(state): State<HttpState>) -> Response {
    plain_response(state.sitemap.llms_txt())
}

fn xml_response(body: String, content_type: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn plain_response(body: String) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
