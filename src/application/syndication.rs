//! RSS 2.0 feed generation over the post registry.

use std::sync::Arc;

use metrics::counter;
use time::{OffsetDateTime, format_description::well_known::Rfc2822};
use tracing::warn;

use crate::{
    application::site::SiteProfile,
    domain::{dates::parse_listing_date, posts::PostRegistry},
    infra::telemetry::METRIC_LISTING_DATE_FALLBACK_TOTAL,
};

const FEED_TTL_MINUTES: u32 = 3600;
const FEED_IMAGE_SIZE: u32 = 144;
const RFC2822_MIN_YEAR: i32 = 1900;

/// Builds the blog feed. Item order is registry order.
#[derive(Clone)]
pub struct SyndicationService {
    posts: Arc<PostRegistry>,
    site: Arc<SiteProfile>,
}

impl SyndicationService {
    pub fn new(posts: Arc<PostRegistry>, site: Arc<SiteProfile>) -> Self {
        Self { posts, site }
    }

    /// Render the RSS 2.0 document with Atom self link, `content:encoded`
    /// bodies and Dublin Core creators.
    ///
    /// `lastBuildDate` is taken from the first post in the registry, so the
    /// registry must be kept newest first for it to mean "latest".
    pub fn rss_feed(&self, now: OffsetDateTime) -> String {
        let identity = &self.site.identity;
        let posts = self.posts.all();
        let blog_url = self.site.url_for("/blog");
        let feed_url = self.site.url_for("/feed.xml");
        let mailbox = xml_escape(&self.site.author_mailbox());

        let last_build = posts
            .first()
            .map(|post| publication_instant(&post.date, now))
            .unwrap_or(now);

        let mut items = String::new();
        for post in posts {
            let link = self.site.url_for(&post.path());
            let body = if post.content.trim().is_empty() {
                post.excerpt.as_str()
            } else {
                post.content.as_str()
            };
            let categories: String = post
                .tags
                .iter()
                .map(|tag| format!("      <category>{}</category>\n", xml_escape(tag)))
                .collect();

            items.push_str(&format!(
                "    <item>\n      <title>{title}</title>\n      <link>{link}</link>\n      <guid isPermaLink=\"true\">{link}</guid>\n      <description>{description}</description>\n      <content:encoded>{content}</content:encoded>\n      <pubDate>{published}</pubDate>\n      <dc:creator>{creator}</dc:creator>\n      <author>{mailbox}</author>\n{categories}    </item>\n",
                title = xml_escape(&post.title),
                link = xml_escape(&link),
                description = xml_escape(&post.excerpt),
                content = cdata(body),
                published = rfc2822(publication_instant(&post.date, now)),
                creator = xml_escape(&identity.author_full_name),
            ));
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n  <channel>\n    <title>{title}</title>\n    <link>{blog_url}</link>\n    <description>{description}</description>\n    <language>{language}</language>\n    <lastBuildDate>{last_build}</lastBuildDate>\n    <pubDate>{pub_date}</pubDate>\n    <ttl>{FEED_TTL_MINUTES}</ttl>\n    <atom:link href=\"{feed_url}\" rel=\"self\" type=\"application/rss+xml\"/>\n    <managingEditor>{mailbox}</managingEditor>\n    <webMaster>{mailbox}</webMaster>\n    <copyright>Copyright {year} {owner}. All rights reserved.</copyright>\n    <image>\n      <url>{image}</url>\n      <title>{name}</title>\n      <link>{home}</link>\n      <width>{FEED_IMAGE_SIZE}</width>\n      <height>{FEED_IMAGE_SIZE}</height>\n    </image>\n{items}  </channel>\n</rss>\n",
            title = xml_escape(&format!("{} - Blog", identity.name)),
            blog_url = xml_escape(&blog_url),
            description = xml_escape(&identity.description),
            language = xml_escape(&identity.language),
            last_build = rfc2822(last_build),
            pub_date = rfc2822(now),
            feed_url = xml_escape(&feed_url),
            year = now.year(),
            owner = xml_escape(&identity.author_full_name),
            image = xml_escape(&self.site.absolute(&identity.og_image)),
            name = xml_escape(&identity.name),
            home = xml_escape(&self.site.home_url()),
        )
    }
}

/// Midnight UTC on the first of the month named by `listing_date`, or `now`
/// when the string carries no recognisable month and year.
pub fn publication_instant(listing_date: &str, now: OffsetDateTime) -> OffsetDateTime {
    // RFC 2822 cannot express years before 1900.
    match parse_listing_date(listing_date).filter(|date| date.year() >= RFC2822_MIN_YEAR) {
        Some(date) => date.midnight().assume_utc(),
        None => {
            warn!(
                target = "folio::syndication",
                listing_date,
                "listing date not recognised; using current time"
            );
            counter!(METRIC_LISTING_DATE_FALLBACK_TOTAL).increment(1);
            now
        }
    }
}

fn rfc2822(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc2822)
        .unwrap_or_else(|_| instant.to_string())
}

pub(crate) fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap `input` in CDATA, splitting any literal `]]>` across two sections.
fn cdata(input: &str) -> String {
    format!("<![CDATA[{}]]>", input.replace("]]>", "]]]]><![CDATA[>"))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::{config::SiteSettings, domain::posts::Post};

    const NOW: OffsetDateTime = datetime!(2025-03-15 12:00 UTC);

    fn post(slug: &str, title: &str, date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: format!("About {title}"),
            date: date.to_string(),
            read_time: "3 min".to_string(),
            tags: vec!["Rust".to_string(), "R&D".to_string()],
            content: format!("# {title}\n\nBody."),
        }
    }

    fn service(posts: Vec<Post>) -> SyndicationService {
        let site = SiteProfile::new(SiteSettings {
            url: "https://folio.example".to_string(),
            ..SiteSettings::default()
        });
        SyndicationService::new(
            Arc::new(PostRegistry::new(posts).expect("valid registry")),
            Arc::new(site),
        )
    }

    #[test]
    fn one_item_per_post_in_registry_order() {
        let feed = service(vec![post("b", "Second", "Nov 2024"), post("a", "First", "Oct 2024")])
            .rss_feed(NOW);

        assert_eq!(feed.matches("<item>").count(), 2);
        let second = feed.find("https://folio.example/blog/b").expect("b present");
        let first = feed.find("https://folio.example/blog/a").expect("a present");
        assert!(second < first);
        assert!(feed.contains("<guid isPermaLink=\"true\">https://folio.example/blog/a</guid>"));
        assert!(feed.contains("<category>R&amp;D</category>"));
    }

    #[test]
    fn titles_are_escaped() {
        let feed = service(vec![post("a", "Tom & <Jerry> \"quoted\" it's", "Dec 2024")])
            .rss_feed(NOW);
        assert!(feed.contains(
            "<title>Tom &amp; &lt;Jerry&gt; &quot;quoted&quot; it&apos;s</title>"
        ));

        for tag in ["title", "description"] {
            for text in element_texts(&feed, tag) {
                assert!(!text.contains('<') && !text.contains('>'), "raw markup in <{tag}>: {text}");
                for (index, _) in text.match_indices('&') {
                    let rest = &text[index..];
                    assert!(
                        ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]
                            .iter()
                            .any(|entity| rest.starts_with(entity)),
                        "bare ampersand in <{tag}>: {text}"
                    );
                }
            }
        }

        // Bodies travel verbatim inside CDATA.
        assert!(feed.contains("<![CDATA[# Tom & <Jerry>"));
    }

    #[test]
    fn pre_1900_dates_fall_back_to_now() {
        assert_eq!(publication_instant("Jan 0999", NOW), NOW);
        assert_eq!(
            publication_instant("Jan 1900", NOW),
            datetime!(1900-01-01 00:00 UTC)
        );

        let feed = service(vec![post("a", "Ancient", "Jan 0999")]).rss_feed(NOW);
        let dates = element_texts(&feed, "pubDate");
        assert!(dates.iter().all(|date| *date == "Sat, 15 Mar 2025 12:00:00 +0000"));
    }

    /// Text of every `<tag>...</tag>` element in document order.
    fn element_texts<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
        let open = format!("<{tag}>");
        let close = format!("</{tag}>");
        let mut texts = Vec::new();
        let mut rest = xml;
        while let Some(start) = rest.find(&open) {
            let after = &rest[start + open.len()..];
            let Some(end) = after.find(&close) else {
                break;
            };
            texts.push(&after[..end]);
            rest = &after[end + close.len()..];
        }
        texts
    }

    #[test]
    fn last_build_date_follows_the_first_post() {
        let feed = service(vec![post("old", "Old", "Jan 2020"), post("new", "New", "Dec 2024")])
            .rss_feed(NOW);
        assert!(feed.contains("<lastBuildDate>Wed, 01 Jan 2020 00:00:00 +0000</lastBuildDate>"));
        assert!(feed.contains("<pubDate>Sat, 15 Mar 2025 12:00:00 +0000</pubDate>"));
    }

    #[test]
    fn empty_registry_builds_at_now() {
        let feed = service(Vec::new()).rss_feed(NOW);
        assert_eq!(feed.matches("<item>").count(), 0);
        assert!(feed.contains("<lastBuildDate>Sat, 15 Mar 2025 12:00:00 +0000</lastBuildDate>"));
        assert!(feed.contains("<copyright>Copyright 2025 Nabil Salim Thange."));
    }

    #[test]
    fn channel_advertises_itself() {
        let feed = service(vec![post("a", "A", "Dec 2024")]).rss_feed(NOW);
        assert!(feed.contains(
            "<atom:link href=\"https://folio.example/feed.xml\" rel=\"self\" type=\"application/rss+xml\"/>"
        ));
        assert!(feed.contains("<ttl>3600</ttl>"));
        assert!(feed.contains("<url>https://folio.example/og-image.png</url>"));
        assert!(feed.contains("<title>Nabil Thange - Blog</title>"));
        assert!(feed.contains("<language>en-IN</language>"));
    }

    #[test]
    fn content_is_wrapped_in_cdata() {
        let mut tricky = post("a", "A", "Dec 2024");
        tricky.content = "look ]]> here".to_string();
        let feed = service(vec![tricky]).rss_feed(NOW);
        assert!(feed.contains("<content:encoded><![CDATA[look ]]]]><![CDATA[> here]]></content:encoded>"));
    }

    #[test]
    fn blank_body_falls_back_to_excerpt() {
        let mut empty = post("a", "A", "Dec 2024");
        empty.content = "  ".to_string();
        let feed = service(vec![empty]).rss_feed(NOW);
        assert!(feed.contains("<![CDATA[About A]]>"));
    }

    #[test]
    fn publication_instant_parses_or_falls_back() {
        assert_eq!(
            publication_instant("Dec 2024", NOW),
            datetime!(2024-12-01 0:00 UTC)
        );
        assert_eq!(publication_instant("unknown", NOW), NOW);
    }
}
