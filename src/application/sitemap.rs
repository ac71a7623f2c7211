//! Discovery artifacts: sitemap.xml, robots.txt and llms.txt.

use std::{fmt, sync::Arc};

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    application::{
        site::SiteProfile,
        syndication::{publication_instant, xml_escape},
    },
    domain::posts::PostRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: OffsetDateTime,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Static routes in sitemap order with their crawl policy.
const STATIC_ROUTES: [(&str, f32, ChangeFrequency); 5] = [
    ("/", 1.0, ChangeFrequency::Weekly),
    ("/gallery", 0.9, ChangeFrequency::Weekly),
    ("/about", 0.9, ChangeFrequency::Monthly),
    ("/contact", 0.8, ChangeFrequency::Monthly),
    ("/blog", 0.8, ChangeFrequency::Weekly),
];
const POST_PRIORITY: f32 = 0.7;
const POST_FREQUENCY: ChangeFrequency = ChangeFrequency::Monthly;

/// Paths every crawler may fetch even though they are not pages.
const PUBLIC_DISCOVERY_PATHS: [&str; 4] = ["/", "/llms.txt", "/feed.xml", "/sitemap.xml"];
const DISALLOWED_PATHS: [&str; 4] = ["/api/", "/_next/", "/admin/", "/private/"];

/// Search and answer-engine crawlers that are explicitly welcomed, one group per vendor.
const CRAWLER_GROUPS: [&[&str]; 14] = [
    &["GPTBot"],
    &["ChatGPT-User"],
    &["OAI-SearchBot"],
    &["ClaudeBot", "Claude-Web", "anthropic-ai"],
    &["PerplexityBot", "Perplexity-User"],
    &["Google-Extended"],
    &["Googlebot"],
    &["Googlebot-Image"],
    &["Meta-ExternalAgent", "Meta-ExternalFetcher", "FacebookBot"],
    &["Applebot", "Applebot-Extended"],
    &["Bingbot", "BingPreview"],
    &["Amazonbot"],
    &["cohere-ai"],
    &["YouBot"],
];

#[derive(Clone)]
pub struct SitemapService {
    posts: Arc<PostRegistry>,
    site: Arc<SiteProfile>,
}

impl SitemapService {
    pub fn new(posts: Arc<PostRegistry>, site: Arc<SiteProfile>) -> Self {
        Self { posts, site }
    }

    /// Static routes first, then one entry per post in registry order.
    pub fn entries(&self, now: OffsetDateTime) -> Vec<SitemapEntry> {
        let static_entries = STATIC_ROUTES
            .iter()
            .map(|&(path, priority, change_frequency)| SitemapEntry {
                url: self.site.url_for(path),
                last_modified: now,
                change_frequency,
                priority,
            });

        let post_entries = self.posts.all().iter().map(|post| SitemapEntry {
            url: self.site.url_for(&post.path()),
            last_modified: publication_instant(&post.date, now),
            change_frequency: POST_FREQUENCY,
            priority: POST_PRIORITY,
        });

        static_entries.chain(post_entries).collect()
    }

    pub fn sitemap_xml(&self, now: OffsetDateTime) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in self.entries(now) {
            let lastmod = entry
                .last_modified
                .format(&Rfc3339)
                .unwrap_or_else(|_| entry.last_modified.to_string());
            xml.push_str(&format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
                xml_escape(&entry.url),
                lastmod,
                entry.change_frequency,
                entry.priority,
            ));
        }
        xml.push_str("</urlset>\n");
        xml
    }

    pub fn robots_txt(&self) -> String {
        let mut body = String::from("User-agent: *\n");
        for path in PUBLIC_DISCOVERY_PATHS {
            body.push_str(&format!("Allow: {path}\n"));
        }
        for path in DISALLOWED_PATHS {
            body.push_str(&format!("Disallow: {path}\n"));
        }

        for group in CRAWLER_GROUPS {
            body.push('\n');
            for agent in group {
                body.push_str(&format!("User-agent: {agent}\n"));
            }
            body.push_str("Allow: /\n");
        }

        body.push_str(&format!("\nHost: {}\n", self.site.identity.url));
        body.push_str(&format!("Sitemap: {}\n", self.site.url_for("/sitemap.xml")));
        body.push_str(&format!("Sitemap: {}\n", self.site.url_for("/feed.xml")));
        body
    }

    /// Plain-text digest of the site for answer engines.
    pub fn llms_txt(&self) -> String {
        let identity = &self.site.identity;
        let mut body = format!("# {}\n\n> {}\n\n", identity.name, identity.description);

        body.push_str("## Pages\n\n");
        for (label, path) in [
            ("Home", "/"),
            ("About", "/about"),
            ("Gallery", "/gallery"),
            ("Blog", "/blog"),
            ("Contact", "/contact"),
        ] {
            body.push_str(&format!("- [{label}]({})\n", self.site.url_for(path)));
        }

        body.push_str("\n## Posts\n\n");
        for post in self.posts.all() {
            body.push_str(&format!(
                "- [{}]({}): {}\n",
                post.title,
                self.site.url_for(&post.path()),
                post.excerpt
            ));
        }

        body.push_str(&format!(
            "\n## Contact\n\n- Email: {}\n- Feed: {}\n",
            identity.email,
            self.site.url_for("/feed.xml")
        ));
        body
    }
}
