use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid post slug `{slug}`: {reason}")]
    InvalidSlug { slug: String, reason: &'static str },
    #[error("duplicate post slug `{slug}`")]
    DuplicateSlug { slug: String },
    #[error("post `{slug}` has an empty {field}")]
    MissingField { slug: String, field: &'static str },
}

impl DomainError {
    pub fn invalid_slug(slug: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSlug {
            slug: slug.into(),
            reason,
        }
    }

    pub fn missing_field(slug: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            slug: slug.into(),
            field,
        }
    }
}
