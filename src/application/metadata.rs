//! Page metadata (title, canonical, Open Graph, Twitter card) and schema.org JSON-LD.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::{
    application::site::SiteProfile,
    domain::{posts::Post, projects::Project},
};

const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;
const TWITTER_CARD: &str = "summary_large_image";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenGraphKind {
    Website,
    Article,
    Profile,
}

impl OpenGraphKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpenGraphKind::Website => "website",
            OpenGraphKind::Article => "article",
            OpenGraphKind::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenGraph {
    pub kind: OpenGraphKind,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub image: String,
    pub image_width: u32,
    pub image_height: u32,
    pub image_alt: String,
    /// Listing date of an article, as authored.
    pub published_time: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub creator: String,
    pub image: String,
}

#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

impl PageMeta {
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Builds metadata and structured data for every page from the site identity.
#[derive(Clone)]
pub struct MetadataBuilder {
    site: Arc<SiteProfile>,
}

impl MetadataBuilder {
    pub fn new(site: Arc<SiteProfile>) -> Self {
        Self { site }
    }

    fn page_meta(
        &self,
        title: String,
        description: String,
        path: &str,
        kind: OpenGraphKind,
        keywords: Vec<String>,
    ) -> PageMeta {
        let identity = &self.site.identity;
        let canonical = self.site.url_for(path);
        let image = self.site.absolute(&identity.og_image);

        PageMeta {
            open_graph: OpenGraph {
                kind,
                title: title.clone(),
                description: description.clone(),
                url: canonical.clone(),
                site_name: format!("{} Portfolio", identity.name),
                locale: identity.locale.clone(),
                image: image.clone(),
                image_width: OG_IMAGE_WIDTH,
                image_height: OG_IMAGE_HEIGHT,
                image_alt: title.clone(),
                published_time: None,
                tags: Vec::new(),
            },
            twitter: TwitterCard {
                card: TWITTER_CARD,
                title: title.clone(),
                description: description.clone(),
                creator: identity.twitter_handle.clone(),
                image,
            },
            title,
            description,
            keywords,
            canonical,
        }
    }

    /// Home page metadata; other pages fall back to it.
    pub fn site_meta(&self) -> PageMeta {
        let identity = &self.site.identity;
        self.page_meta(
            identity.title.clone(),
            identity.description.clone(),
            "/",
            OpenGraphKind::Website,
            identity.keywords.clone(),
        )
    }

    pub fn about_meta(&self) -> PageMeta {
        let identity = &self.site.identity;
        self.page_meta(
            format!(
                "About {} — {} from {}",
                identity.author_full_name, identity.job_title, identity.city
            ),
            format!(
                "{} is a {} based in {}, {}. {}",
                identity.author_full_name,
                identity.job_title,
                identity.city,
                identity.country,
                identity.description
            ),
            "/about",
            OpenGraphKind::Profile,
            identity.keywords.clone(),
        )
    }

    pub fn contact_meta(&self) -> PageMeta {
        let identity = &self.site.identity;
        self.page_meta(
            format!(
                "Contact {} | Web Developer from {}, {}",
                identity.name, identity.city, identity.country
            ),
            format!(
                "Connect with {}, a developer based in {}, {}. Get in touch for projects, collaborations, and opportunities.",
                identity.name, identity.city, identity.country
            ),
            "/contact",
            OpenGraphKind::Website,
            identity.keywords.clone(),
        )
    }

    pub fn gallery_meta(&self) -> PageMeta {
        let identity = &self.site.identity;
        self.page_meta(
            format!("Gallery — Projects by {}", identity.name),
            format!(
                "Explore selected work by {}: interactive, AI-powered, and web experiences.",
                identity.name
            ),
            "/gallery",
            OpenGraphKind::Website,
            identity.keywords.clone(),
        )
    }

    pub fn blog_index_meta(&self) -> PageMeta {
        let identity = &self.site.identity;
        self.page_meta(
            format!("Blog — Recent Thoughts by {}", identity.name),
            format!(
                "Read recent thoughts from {}, {} based in {}, {}. Articles on AI, product development, hackathons, and learning.",
                identity.name, identity.job_title, identity.city, identity.country
            ),
            "/blog",
            OpenGraphKind::Website,
            identity.blog_keywords.clone(),
        )
    }

    pub fn not_found_meta(&self) -> PageMeta {
        let mut meta = self.site_meta();
        meta.title = "Page Not Found".to_string();
        meta
    }

    /// Keywords are the post's tags followed by the configured blog keywords.
    pub fn post_meta(&self, post: &Post) -> PageMeta {
        let keywords = post
            .tags
            .iter()
            .chain(self.site.identity.blog_keywords.iter())
            .cloned()
            .collect();
        let mut meta = self.page_meta(
            post.title.clone(),
            post.excerpt.clone(),
            &post.path(),
            OpenGraphKind::Article,
            keywords,
        );
        meta.open_graph.published_time = Some(post.date.clone());
        meta.open_graph.tags = post.tags.clone();
        meta
    }

    pub fn person(&self) -> Value {
        let identity = &self.site.identity;
        json!({
            "@type": "Person",
            "name": identity.author_full_name,
            "alternateName": identity.author_name,
            "url": self.site.home_url(),
            "image": self.site.url_for("/profile.png"),
            "jobTitle": identity.job_title,
            "description": identity.description,
            "email": identity.email,
            "address": self.postal_address(),
            "sameAs": identity.social_links,
        })
    }

    /// Site-wide graph embedded on every page: the owner and the website.
    pub fn knowledge_graph(&self) -> Value {
        let identity = &self.site.identity;
        json!({
            "@context": "https://schema.org",
            "@graph": [
                self.person(),
                {
                    "@type": "WebSite",
                    "name": identity.name,
                    "url": self.site.home_url(),
                    "description": identity.description,
                    "inLanguage": identity.language,
                },
            ],
        })
    }

    pub fn blog_posting(&self, post: &Post) -> Value {
        let author = self.author_reference();
        json!({
            "@context": "https://schema.org",
            "@type": "BlogPosting",
            "headline": post.title,
            "description": post.excerpt,
            "url": self.site.url_for(&post.path()),
            "datePublished": post.date,
            "author": author,
            "publisher": author,
            "keywords": post.tags.join(", "),
            "articleBody": post.content,
        })
    }

    /// Positions are 1-based in the order given.
    pub fn breadcrumb_list(&self, trail: &[(&str, &str)]) -> Value {
        let items: Vec<Value> = trail
            .iter()
            .enumerate()
            .map(|(index, (name, path))| {
                json!({
                    "@type": "ListItem",
                    "position": index + 1,
                    "name": name,
                    "item": self.site.url_for(path),
                })
            })
            .collect();

        json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": items,
        })
    }

    pub fn web_page(&self, meta: &PageMeta) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": meta.title,
            "description": meta.description,
            "url": meta.canonical,
            "author": self.author_reference(),
        })
    }

    pub fn contact_page(&self) -> Value {
        let identity = &self.site.identity;
        json!({
            "@context": "https://schema.org",
            "@type": "ContactPage",
            "name": format!("Contact {}", identity.name),
            "description": format!(
                "Get in touch with {} for web development projects and collaborations",
                identity.name
            ),
            "url": self.site.url_for("/contact"),
            "mainEntity": {
                "@type": "Person",
                "name": identity.author_full_name,
                "email": identity.email,
                "address": self.postal_address(),
            },
        })
    }

    pub fn image_gallery(&self, projects: &[Project]) -> Value {
        let identity = &self.site.identity;
        let works: Vec<Value> = projects
            .iter()
            .map(|project| {
                json!({
                    "@type": "CreativeWork",
                    "name": project.name,
                    "description": project.summary,
                    "url": project.url,
                })
            })
            .collect();

        json!({
            "@context": "https://schema.org",
            "@type": "ImageGallery",
            "name": format!("Portfolio Gallery — {}", identity.name),
            "url": self.site.url_for("/gallery"),
            "locationCreated": {
                "@type": "Place",
                "name": format!("{}, {}", identity.city, identity.country),
                "address": self.postal_address(),
            },
            "hasPart": works,
        })
    }

    fn author_reference(&self) -> Value {
        json!({
            "@type": "Person",
            "name": self.site.identity.author_name,
            "url": self.site.home_url(),
        })
    }

    fn postal_address(&self) -> Value {
        let identity = &self.site.identity;
        json!({
            "@type": "PostalAddress",
            "addressLocality": identity.city,
            "addressRegion": identity.region,
            "addressCountry": identity.country,
        })
    }
}

/// Compact JSON safe to inline in `<script type="application/ld+json">`.
pub fn embed_json_ld(value: &Value) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SiteSettings, domain::projects};

    fn builder() -> MetadataBuilder {
        MetadataBuilder::new(Arc::new(SiteProfile::new(SiteSettings {
            url: "https://folio.example".to_string(),
            ..SiteSettings::default()
        })))
    }

    fn post() -> Post {
        Post {
            slug: "hello".to_string(),
            title: "Hello </script>".to_string(),
            excerpt: "Greeting".to_string(),
            date: "Dec 2024".to_string(),
            read_time: "1 min".to_string(),
            tags: vec!["Rust".to_string(), "Web".to_string()],
            content: "Body".to_string(),
        }
    }

    #[test]
    fn post_meta_describes_an_article() {
        let meta = builder().post_meta(&post());
        assert_eq!(meta.title, "Hello </script>");
        assert_eq!(meta.description, "Greeting");
        assert_eq!(meta.canonical, "https://folio.example/blog/hello");
        assert_eq!(meta.open_graph.kind, OpenGraphKind::Article);
        assert_eq!(meta.open_graph.published_time.as_deref(), Some("Dec 2024"));
        assert_eq!(meta.open_graph.image, "https://folio.example/og-image.png");
        assert_eq!(meta.open_graph.locale, "en_IN");
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.creator, "@THEONLYNABIL");
        assert_eq!(
            meta.keywords,
            vec!["Rust", "Web", "Nabil Thange", "Blog", "Web Development"]
        );
    }

    #[test]
    fn blog_posting_joins_tags() {
        let value = builder().blog_posting(&post());
        assert_eq!(value["@type"], "BlogPosting");
        assert_eq!(value["keywords"], "Rust, Web");
        assert_eq!(value["datePublished"], "Dec 2024");
        assert_eq!(value["author"]["@type"], "Person");
        assert_eq!(value["url"], "https://folio.example/blog/hello");
    }

    #[test]
    fn breadcrumbs_are_one_based() {
        let value = builder().breadcrumb_list(&[("Home", "/"), ("Blog", "/blog"), ("Hello", "/blog/hello")]);
        let items = value["itemListElement"].as_array().expect("array");
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[0]["item"], "https://folio.example/");
        assert_eq!(items[2]["position"], 3);
        assert_eq!(items[2]["name"], "Hello");
    }

    #[test]
    fn embedded_json_cannot_close_the_script_tag() {
        let embedded = embed_json_ld(&builder().blog_posting(&post()));
        assert!(!embedded.contains('<'));
        assert!(embedded.contains("Hello \\u003c/script>"));
        let decoded: Value = serde_json::from_str(&embedded).expect("still valid json");
        assert_eq!(decoded["headline"], "Hello </script>");
    }

    #[test]
    fn knowledge_graph_holds_person_and_website() {
        let graph = builder().knowledge_graph();
        let nodes = graph["@graph"].as_array().expect("graph array");
        assert_eq!(nodes[0]["@type"], "Person");
        assert_eq!(nodes[1]["@type"], "WebSite");
        assert_eq!(nodes[0]["sameAs"].as_array().map(Vec::len), Some(8));
    }

    #[test]
    fn contact_and_gallery_carry_the_address() {
        let b = builder();
        let contact = b.contact_page();
        assert_eq!(contact["@type"], "ContactPage");
        assert_eq!(contact["mainEntity"]["address"]["addressLocality"], "Mumbai");

        let gallery = b.image_gallery(projects::all());
        assert_eq!(gallery["@type"], "ImageGallery");
        assert_eq!(gallery["locationCreated"]["name"], "Mumbai, India");
        assert_eq!(
            gallery["hasPart"].as_array().map(Vec::len),
            Some(projects::all().len())
        );
    }
}
