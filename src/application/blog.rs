//! Blog listing and post pages over the immutable post registry.

use std::sync::Arc;

use metrics::counter;
use tracing::debug;

use crate::{
    application::{
        chrome::ChromeService,
        render::{RenderError, RenderRequest, RenderService, RenderTarget},
    },
    domain::posts::{Post, PostRegistry},
    infra::telemetry::METRIC_POST_NOT_FOUND_TOTAL,
    presentation::views::{
        BlogIndexView, LayoutContext, PostCard, PostDetailContext, build_tag_badges,
    },
};

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<PostRegistry>,
    renderer: Arc<dyn RenderService>,
    chrome: ChromeService,
}

impl BlogService {
    pub fn new(
        posts: Arc<PostRegistry>,
        renderer: Arc<dyn RenderService>,
        chrome: ChromeService,
    ) -> Self {
        Self {
            posts,
            renderer,
            chrome,
        }
    }

    /// Every post in authored order.
    pub fn all_posts(&self) -> &[Post] {
        self.posts.all()
    }

    /// Exact slug lookup; `None` is the not-found state, never an error.
    pub fn find_post(&self, slug: &str) -> Option<&Post> {
        self.posts.find_by_slug(slug)
    }

    pub fn cards(&self, limit: Option<usize>) -> Vec<PostCard> {
        let posts = self.posts.all();
        let take = limit.unwrap_or(posts.len());
        posts.iter().take(take).map(post_card).collect()
    }

    pub fn index(&self) -> LayoutContext<BlogIndexView> {
        let metadata = self.chrome.metadata();
        let meta = metadata.blog_index_meta();
        let json_ld = [
            metadata.web_page(&meta),
            metadata.breadcrumb_list(&[("Home", "/"), ("Blog", "/blog")]),
        ];
        let posts = self.cards(None);
        let content = BlogIndexView {
            has_posts: !posts.is_empty(),
            posts,
        };
        LayoutContext::new(self.chrome.chrome(meta, &json_ld), content)
    }

    /// Render a post page. `Ok(None)` when no post carries `slug`.
    pub fn post_page(
        &self,
        slug: &str,
    ) -> Result<Option<LayoutContext<PostDetailContext>>, RenderError> {
        let Some(post) = self.find_post(slug) else {
            debug!(target = "folio::blog", slug, "no post for slug");
            counter!(METRIC_POST_NOT_FOUND_TOTAL).increment(1);
            return Ok(None);
        };

        let request = RenderRequest::new(
            RenderTarget::PostBody {
                slug: post.slug.clone(),
            },
            post.content.as_str(),
        )
        .with_public_site_url(self.chrome.site().identity.url.as_str());
        let rendered = self.renderer.render(&request)?;

        let metadata = self.chrome.metadata();
        let path = post.path();
        let json_ld = [
            metadata.blog_posting(post),
            metadata.breadcrumb_list(&[("Home", "/"), ("Blog", "/blog"), (post.title.as_str(), path.as_str())]),
        ];
        let content = PostDetailContext {
            slug: post.slug.clone(),
            title: post.title.clone(),
            published: post.date.clone(),
            read_time: post.read_time.clone(),
            excerpt: post.excerpt.clone(),
            tags: build_tag_badges(&post.tags),
            body_html: rendered.html,
            has_code_blocks: rendered.contains_code,
        };

        Ok(Some(LayoutContext::new(
            self.chrome.chrome(metadata.post_meta(post), &json_ld),
            content,
        )))
    }
}

fn post_card(post: &Post) -> PostCard {
    PostCard {
        href: post.path(),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        published: post.date.clone(),
        read_time: post.read_time.clone(),
        badges: build_tag_badges(&post.tags),
    }
}
