mod data;

use std::collections::HashSet;

use time::Date;

use super::{dates::parse_listing_date, error::DomainError};

/// A single blog post as authored in the source listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Free-form listing date such as `Dec 2024`.
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
    /// Markdown body.
    pub content: String,
}

impl Post {
    /// First day of the month named by [`Post::date`], when it can be recognised.
    pub fn published_on(&self) -> Option<Date> {
        parse_listing_date(&self.date)
    }

    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

/// Immutable, ordered collection of posts built once at start-up.
///
/// Order is the authored order and doubles as display and feed order; nothing
/// downstream re-sorts by date.
#[derive(Debug, Clone, Default)]
pub struct PostRegistry {
    posts: Vec<Post>,
}

impl PostRegistry {
    pub fn new(posts: Vec<Post>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(posts.len());

        for post in &posts {
            validate_slug(&post.slug)?;
            if post.title.trim().is_empty() {
                return Err(DomainError::missing_field(&post.slug, "title"));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(DomainError::DuplicateSlug {
                    slug: post.slug.clone(),
                });
            }
        }

        Ok(Self { posts })
    }

    /// Registry backed by the posts compiled into the binary.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::new(data::builtin_posts())
    }

    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Exact, case-sensitive lookup. Returns the first match.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::invalid_slug(slug, "slug must not be empty"));
    }
    if slug::slugify(slug) != slug {
        return Err(DomainError::invalid_slug(
            slug,
            "slug must be lowercase ascii words separated by single hyphens",
        ));
    }
    Ok(())
}
