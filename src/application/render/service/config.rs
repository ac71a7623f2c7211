use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Allow-list for post bodies. `rel` and `target` on links are added after
/// sanitisation by the decoration pass.
pub(crate) fn build_post_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "blockquote",
        "br",
        "code",
        "del",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "img",
        "input",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "span",
        "strong",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class", "id", "title", "lang"]);
    builder.generic_attributes(generic);

    builder.link_rel(None);
    builder.add_tag_attributes("img", &["alt", "width", "height", "loading"]);
    builder.add_tag_attributes("code", &["data-language"]);
    builder.add_tag_attributes("pre", &["data-language"]);
    builder.add_tag_attributes("th", &["align"]);
    builder.add_tag_attributes("td", &["align"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);

    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.r#unsafe = true;
}
