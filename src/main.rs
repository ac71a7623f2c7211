use std::{future::IntoFuture, path::Path, process, sync::Arc};

use folio::{
    application::{
        blog::BlogService,
        chrome::ChromeService,
        error::AppError,
        page::PageService,
        render::render_service,
        site::{self, SiteProfile},
        sitemap::SitemapService,
        syndication::SyndicationService,
    },
    config,
    domain::posts::PostRegistry,
    infra::{
        error::InfraError,
        http::{self, EdgePolicy, HttpState},
        telemetry,
    },
};
use time::OffsetDateTime;
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let services = SiteServices::build(&settings)?;
    info!(
        target = "folio::startup",
        posts = services.posts.len(),
        site = %settings.site.url,
        "post registry loaded"
    );

    match command {
        config::Command::Serve(_) => run_serve(settings, services).await,
        config::Command::Export(args) => run_export(services, &args.directory).await,
    }
}

/// Everything the HTTP surface and the exporter share.
struct SiteServices {
    posts: Arc<PostRegistry>,
    chrome: Arc<ChromeService>,
    blog: Arc<BlogService>,
    pages: Arc<PageService>,
    sitemap: Arc<SitemapService>,
    syndication: Arc<SyndicationService>,
}

impl SiteServices {
    fn build(settings: &config::Settings) -> Result<Self, AppError> {
        let posts = Arc::new(PostRegistry::builtin()?);
        let site = Arc::new(SiteProfile::new(settings.site.clone()));

        let chrome = ChromeService::new(Arc::clone(&site));
        let blog = BlogService::new(Arc::clone(&posts), render_service(), chrome.clone());
        let pages = PageService::new(chrome.clone(), blog.clone());

        Ok(Self {
            sitemap: Arc::new(SitemapService::new(Arc::clone(&posts), Arc::clone(&site))),
            syndication: Arc::new(SyndicationService::new(Arc::clone(&posts), site)),
            chrome: Arc::new(chrome),
            blog: Arc::new(blog),
            pages: Arc::new(pages),
            posts,
        })
    }
}

async fn run_serve(settings: config::Settings, services: SiteServices) -> Result<(), AppError> {
    let edge = EdgePolicy::from_settings(&settings.edge)?;
    let state = HttpState {
        blog: services.blog,
        pages: services.pages,
        chrome: services.chrome,
        syndication: services.syndication,
        sitemap: services.sitemap,
        edge: Arc::new(edge),
    };
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "folio::serve",
        addr = %settings.server.addr,
        "listening"
    );

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown({
            let shutdown = Arc::clone(&shutdown);
            async move { shutdown.notified().await }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::from(InfraError::from(err)));
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|err| AppError::from(InfraError::from(err)))?;
        }
    }

    let grace = settings.server.graceful_shutdown;
    info!(
        target = "folio::serve",
        grace_ms = grace.as_millis() as u64,
        "shutdown requested, draining connections"
    );
    shutdown.notify_one();

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => result.map_err(|err| AppError::from(InfraError::from(err)))?,
        Err(_) => warn!(
            target = "folio::serve",
            "graceful shutdown deadline elapsed; dropping open connections"
        ),
    }

    info!(target = "folio::serve", "server stopped");
    Ok(())
}

async fn run_export(services: SiteServices, directory: &Path) -> Result<(), AppError> {
    info!(
        target = "folio::export",
        path = %directory.display(),
        "Starting export"
    );

    let written = site::export_site(
        &services.sitemap,
        &services.syndication,
        directory,
        OffsetDateTime::now_utc(),
    )
    .await?;

    info!(
        target = "folio::export",
        files = written.len(),
        "Export completed"
    );
    Ok(())
}
