//! Static marketing pages: home, about, contact, gallery.

use url::Url;

use crate::{
    application::{blog::BlogService, chrome::ChromeService},
    domain::projects::{self, Project},
    presentation::views::{
        AboutView, ContactView, GalleryView, HomeView, LayoutContext, ProjectCard, SocialLinkView,
    },
};

const FEATURED_PROJECTS: usize = 4;
const RECENT_POSTS: usize = 3;

const ABOUT_PARAGRAPHS: [&str; 3] = [
    "My path into software started in commerce, not computer science. Teaching myself to code turned a side interest into the thing I build every day.",
    "Coming from business studies gives me a product-first view of engineering: I care about who uses a tool and why before I care about how it is built.",
    "Most of my work lives at the intersection of modern web frameworks and applied AI, shipped fast at hackathons and then polished in the open.",
];

#[derive(Clone)]
pub struct PageService {
    chrome: ChromeService,
    blog: BlogService,
}

impl PageService {
    pub fn new(chrome: ChromeService, blog: BlogService) -> Self {
        Self { chrome, blog }
    }

    pub fn home(&self) -> LayoutContext<HomeView> {
        let identity = &self.chrome.site().identity;
        let meta = self.chrome.metadata().site_meta();
        let content = HomeView {
            headline: identity.name.clone(),
            tagline: identity.job_title.clone(),
            intro: identity.description.clone(),
            featured: project_cards(projects::all().iter().take(FEATURED_PROJECTS)),
            recent_posts: self.blog.cards(Some(RECENT_POSTS)),
        };
        LayoutContext::new(self.chrome.chrome(meta, &[]), content)
    }

    pub fn about(&self) -> LayoutContext<AboutView> {
        let identity = &self.chrome.site().identity;
        let metadata = self.chrome.metadata();
        let json_ld = [
            metadata.person(),
            metadata.breadcrumb_list(&[("Home", "/"), ("About", "/about")]),
        ];
        let content = AboutView {
            name: identity.author_full_name.clone(),
            job_title: identity.job_title.clone(),
            location: self.location(),
            paragraphs: ABOUT_PARAGRAPHS.iter().map(|p| p.to_string()).collect(),
            featured: project_cards(projects::all().iter().take(FEATURED_PROJECTS)),
            social_links: social_links(&identity.social_links),
        };
        LayoutContext::new(self.chrome.chrome(metadata.about_meta(), &json_ld), content)
    }

    pub fn contact(&self) -> LayoutContext<ContactView> {
        let identity = &self.chrome.site().identity;
        let metadata = self.chrome.metadata();
        let json_ld = [metadata.contact_page()];
        let content = ContactView {
            email: identity.email.clone(),
            location: self.location(),
            social_links: social_links(&identity.social_links),
        };
        LayoutContext::new(self.chrome.chrome(metadata.contact_meta(), &json_ld), content)
    }

    pub fn gallery(&self) -> LayoutContext<GalleryView> {
        let metadata = self.chrome.metadata();
        let json_ld = [metadata.image_gallery(projects::all())];
        let content = GalleryView {
            projects: project_cards(projects::all().iter()),
        };
        LayoutContext::new(self.chrome.chrome(metadata.gallery_meta(), &json_ld), content)
    }

    fn location(&self) -> String {
        let identity = &self.chrome.site().identity;
        format!("{}, {}", identity.city, identity.country)
    }
}

fn project_cards<'a>(projects: impl Iterator<Item = &'a Project>) -> Vec<ProjectCard> {
    projects
        .map(|project| ProjectCard {
            name: project.name.to_string(),
            summary: project.summary.to_string(),
            url: project.url.to_string(),
        })
        .collect()
}

/// Label each profile link with its host, minus any `www.` prefix.
fn social_links(urls: &[String]) -> Vec<SocialLinkView> {
    urls.iter()
        .map(|url| {
            let label = Url::parse(url)
                .ok()
                .and_then(|parsed| parsed.host_str().map(|host| host.trim_start_matches("www.").to_string()))
                .unwrap_or_else(|| url.clone());
            SocialLinkView {
                label,
                url: url.clone(),
            }
        })
        .collect()
}
