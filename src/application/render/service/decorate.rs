use std::collections::BTreeSet;

use lol_html::{HandlerResult, RewriteStrSettings, element, html_content::Element, rewrite_str};
use url::Url;

use crate::application::render::types::RenderError;

/// Every element kind the post stylesheet knows about. Each variant owns the
/// selector it applies to and the class it adds; links additionally get the
/// external-link treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    Link,
    UnorderedList,
    OrderedList,
    ListItem,
    BlockQuote,
    InlineCode,
    CodeBlock,
    Strong,
    Emphasis,
    Rule,
}

impl MarkupKind {
    pub const ALL: [MarkupKind; 14] = [
        MarkupKind::Heading1,
        MarkupKind::Heading2,
        MarkupKind::Heading3,
        MarkupKind::Paragraph,
        MarkupKind::Link,
        MarkupKind::UnorderedList,
        MarkupKind::OrderedList,
        MarkupKind::ListItem,
        MarkupKind::BlockQuote,
        MarkupKind::InlineCode,
        MarkupKind::CodeBlock,
        MarkupKind::Strong,
        MarkupKind::Emphasis,
        MarkupKind::Rule,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            MarkupKind::Heading1 => "h1",
            MarkupKind::Heading2 => "h2",
            MarkupKind::Heading3 => "h3",
            MarkupKind::Paragraph => "p",
            MarkupKind::Link => "a[href]",
            MarkupKind::UnorderedList => "ul",
            MarkupKind::OrderedList => "ol",
            MarkupKind::ListItem => "li",
            MarkupKind::BlockQuote => "blockquote",
            MarkupKind::InlineCode => "code",
            MarkupKind::CodeBlock => "pre",
            MarkupKind::Strong => "strong",
            MarkupKind::Emphasis => "em",
            MarkupKind::Rule => "hr",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            MarkupKind::Heading1 => "prose-h1",
            MarkupKind::Heading2 => "prose-h2",
            MarkupKind::Heading3 => "prose-h3",
            MarkupKind::Paragraph => "prose-p",
            MarkupKind::Link => "prose-link",
            MarkupKind::UnorderedList => "prose-ul",
            MarkupKind::OrderedList => "prose-ol",
            MarkupKind::ListItem => "prose-li",
            MarkupKind::BlockQuote => "prose-quote",
            MarkupKind::InlineCode => "prose-code",
            MarkupKind::CodeBlock => "prose-pre",
            MarkupKind::Strong => "prose-strong",
            MarkupKind::Emphasis => "prose-em",
            MarkupKind::Rule => "prose-hr",
        }
    }

    fn decorate(self, el: &mut Element<'_, '_>, site_origin: Option<&Url>) -> HandlerResult {
        match self {
            // Highlighted blocks already carry `syntax-code`; only inline code is styled here.
            MarkupKind::InlineCode => {
                if has_class(el, "syntax-code") {
                    return Ok(());
                }
            }
            MarkupKind::Link => {
                if let Some(href) = el.get_attribute("href")
                    && is_external(&href, site_origin)
                {
                    let rel = merge_rel(el.get_attribute("rel"), &["noopener", "noreferrer"]);
                    el.set_attribute("rel", &rel)?;
                    el.set_attribute("target", "_blank")?;
                }
            }
            _ => {}
        }
        add_class(el, self.class())?;
        Ok(())
    }
}

/// Apply the per-kind decoration to sanitised post HTML.
pub(crate) fn decorate_markup(html: &str, public_site_url: Option<&str>) -> Result<String, RenderError> {
    let site_origin = public_site_url.and_then(|url| Url::parse(url).ok());

    let handlers = MarkupKind::ALL
        .iter()
        .map(|&kind| {
            let origin = site_origin.clone();
            element!(kind.selector(), move |el| kind.decorate(el, origin.as_ref()))
        })
        .collect();

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| RenderError::Decoration {
        message: err.to_string(),
    })
}

fn is_external(href: &str, site_origin: Option<&Url>) -> bool {
    if !(href.starts_with("http://") || href.starts_with("https://")) {
        return false;
    }
    let Ok(target) = Url::parse(href) else {
        return false;
    };
    match site_origin {
        Some(origin) => target.host_str() != origin.host_str(),
        None => true,
    }
}

fn has_class(el: &Element<'_, '_>, class: &str) -> bool {
    el.get_attribute("class")
        .is_some_and(|value| value.split_whitespace().any(|token| token == class))
}

fn add_class(el: &mut Element<'_, '_>, class: &str) -> HandlerResult {
    let merged = match el.get_attribute("class") {
        Some(existing) if existing.split_whitespace().any(|token| token == class) => return Ok(()),
        Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
        _ => class.to_string(),
    };
    el.set_attribute("class", &merged)?;
    Ok(())
}

fn merge_rel(existing: Option<String>, required: &[&str]) -> String {
    let mut tokens: BTreeSet<String> = existing
        .unwrap_or_default()
        .split_whitespace()
        .map(|token| token.to_string())
        .collect();
    for &token in required {
        tokens.insert(token.to_string());
    }
    tokens.into_iter().collect::<Vec<_>>().join(" ")
}
