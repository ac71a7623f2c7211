//! Site identity shared by every generator, plus the export of generated artifacts.

use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::info;

use crate::{
    application::{error::AppError, sitemap::SitemapService, syndication::SyndicationService},
    config::SiteSettings,
    infra::error::InfraError,
};

/// Owner identity and public origin, resolved from configuration once at start-up.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub identity: SiteSettings,
}

impl SiteProfile {
    pub fn new(identity: SiteSettings) -> Self {
        Self { identity }
    }

    /// Origin with a trailing slash, e.g. `https://example.com/`.
    pub fn home_url(&self) -> String {
        normalize_public_site_url(&self.identity.url)
    }

    /// Absolute URL for a site-relative path.
    pub fn url_for(&self, path: &str) -> String {
        canonical_url(&self.home_url(), path)
    }

    /// Leaves absolute `http(s)` URLs alone and resolves everything else against the origin.
    pub fn absolute(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            self.url_for(href)
        }
    }

    /// `email (Full Name)`, the form RSS expects for people.
    pub fn author_mailbox(&self) -> String {
        format!(
            "{} ({})",
            self.identity.email, self.identity.author_full_name
        )
    }
}

pub(crate) fn normalize_public_site_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    format!("{}/", trimmed.trim_end_matches('/'))
}

pub(crate) fn canonical_url(base: &str, path: &str) -> String {
    let relative = path.trim_start_matches('/');
    if relative.is_empty() {
        base.to_string()
    } else {
        format!("{base}{relative}")
    }
}

/// Files written by `folio export`, in write order.
pub const EXPORTED_FILES: [&str; 4] = ["sitemap.xml", "feed.xml", "robots.txt", "llms.txt"];

/// Write the generated discovery artifacts into `directory`, creating it when missing.
pub async fn export_site(
    sitemap: &SitemapService,
    syndication: &SyndicationService,
    directory: &Path,
    now: OffsetDateTime,
) -> Result<Vec<PathBuf>, AppError> {
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|err| InfraError::write(directory, err))?;

    let contents = [
        sitemap.sitemap_xml(now),
        syndication.rss_feed(now),
        sitemap.robots_txt(),
        sitemap.llms_txt(),
    ];

    let mut written = Vec::with_capacity(EXPORTED_FILES.len());
    for (name, body) in EXPORTED_FILES.iter().zip(contents) {
        let path = directory.join(name);
        tokio::fs::write(&path, body.as_bytes())
            .await
            .map_err(|err| InfraError::write(&path, err))?;
        info!(
            target = "folio::export",
            path = %path.display(),
            bytes = body.len(),
            "artifact written"
        );
        written.push(path);
    }

    Ok(written)
}
