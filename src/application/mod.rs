//! Services over the post registry and site identity.

pub mod blog;
pub mod chrome;
pub mod error;
pub mod metadata;
pub mod page;
pub mod render;
pub mod site;
pub mod sitemap;
pub mod syndication;
