#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::USER_AGENT},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio::{
    application::{
        blog::BlogService, chrome::ChromeService, page::PageService, render::render_service,
        site::SiteProfile, sitemap::SitemapService, syndication::SyndicationService,
    },
    config::{EdgeSettings, SiteSettings},
    domain::posts::PostRegistry,
    infra::http::{EdgePolicy, HttpState, build_router},
};

pub fn registry() -> Arc<PostRegistry> {
    Arc::new(PostRegistry::builtin().expect("builtin posts are valid"))
}

pub fn state() -> HttpState {
    let posts = registry();
    let site = Arc::new(SiteProfile::new(SiteSettings::default()));
    let chrome = ChromeService::new(Arc::clone(&site));
    let blog = BlogService::new(Arc::clone(&posts), render_service(), chrome.clone());
    let pages = PageService::new(chrome.clone(), blog.clone());
    let edge = EdgePolicy::from_settings(&EdgeSettings::default()).expect("default edge policy");

    HttpState {
        sitemap: Arc::new(SitemapService::new(Arc::clone(&posts), Arc::clone(&site))),
        syndication: Arc::new(SyndicationService::new(posts, site)),
        chrome: Arc::new(chrome),
        blog: Arc::new(blog),
        pages: Arc::new(pages),
        edge: Arc::new(edge),
    }
}

pub fn app() -> Router {
    build_router(state())
}

pub async fn get(app: &Router, uri: &str, user_agent: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(agent) = user_agent {
        builder = builder.header(USER_AGENT, agent);
    }
    let request = builder.body(Body::empty()).expect("request should build");
    app.clone()
        .oneshot(request)
        .await
        .expect("router should respond")
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.expect("collect body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
