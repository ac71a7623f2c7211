use std::sync::Arc;

use serde_json::Value;

use crate::application::{
    metadata::{MetadataBuilder, PageMeta, embed_json_ld},
    site::SiteProfile,
};
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const NAVIGATION: [(&str, &str); 5] = [
    ("Home", "/"),
    ("About", "/about"),
    ("Gallery", "/gallery"),
    ("Blog", "/blog"),
    ("Contact", "/contact"),
];

/// Assembles the shared layout around each page's metadata.
#[derive(Clone)]
pub struct ChromeService {
    site: Arc<SiteProfile>,
    metadata: MetadataBuilder,
}

impl ChromeService {
    pub fn new(site: Arc<SiteProfile>) -> Self {
        let metadata = MetadataBuilder::new(Arc::clone(&site));
        Self { site, metadata }
    }

    pub fn metadata(&self) -> &MetadataBuilder {
        &self.metadata
    }

    pub fn site(&self) -> &SiteProfile {
        &self.site
    }

    pub fn chrome(&self, page: PageMeta, json_ld: &[Value]) -> LayoutChrome {
        let identity = &self.site.identity;
        let entries = NAVIGATION
            .iter()
            .map(|(label, href)| NavigationLinkView {
                label: (*label).to_string(),
                href: (*href).to_string(),
            })
            .collect();

        LayoutChrome {
            brand: BrandView {
                title: identity.name.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: format!("{} · {}, {}", identity.author_full_name, identity.city, identity.country),
                feed_href: "/feed.xml".to_string(),
            },
            meta: PageMetaView {
                page,
                json_ld: json_ld.iter().map(embed_json_ld).collect(),
            },
            language: identity.language.clone(),
            knowledge_graph: embed_json_ld(&self.metadata.knowledge_graph()),
        }
    }

    pub fn not_found_chrome(&self) -> LayoutChrome {
        self.chrome(self.metadata.not_found_meta(), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSettings;

    #[test]
    fn chrome_embeds_escaped_json_ld() {
        let service = ChromeService::new(Arc::new(SiteProfile::new(SiteSettings::default())));
        let meta = service.metadata().site_meta();
        let chrome = service.chrome(meta, &[serde_json::json!({"name": "<b>"})]);

        assert_eq!(chrome.navigation.entries.len(), NAVIGATION.len());
        assert_eq!(chrome.meta.json_ld, vec!["{\"name\":\"\\u003cb>\"}".to_string()]);
        assert!(chrome.knowledge_graph.contains("\"@graph\""));
        assert!(!chrome.knowledge_graph.contains('<'));
    }
}
