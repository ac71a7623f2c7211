use syntect::{
    html::{ClassStyle, ClassedHTMLGenerator},
    parsing::{SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::application::render::types::RenderError;

const PLAIN_LANGUAGE: &str = "text";

/// Highlight a fenced block into `<pre data-language><code>` markup with
/// `syntax-` prefixed span classes. Unknown languages fall back to plain text.
pub(crate) fn highlight_code(
    language: Option<&str>,
    code: &str,
    syntax_set: &SyntaxSet,
    class_style: &ClassStyle,
) -> Result<String, RenderError> {
    let token = language
        .map(sanitize_language)
        .filter(|token| !token.is_empty())
        .unwrap_or_else(|| PLAIN_LANGUAGE.to_string());
    let syntax =
        find_syntax(syntax_set, &token).unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, *class_style);

    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|err| RenderError::Highlighting {
                language: token.clone(),
                message: err.to_string(),
            })?;
    }
    if !code.is_empty() && !code.ends_with('\n') {
        generator
            .parse_html_for_line_which_includes_newline("\n")
            .map_err(|err| RenderError::Highlighting {
                language: token.clone(),
                message: err.to_string(),
            })?;
    }

    let highlighted = generator.finalize();
    Ok(format!(
        "<pre class=\"syntax-highlight\" data-language=\"{token}\"><code class=\"language-{token} syntax-code\">{highlighted}</code></pre>"
    ))
}

/// Info strings are author input; keep only characters that are safe inside
/// an attribute and a class name.
fn sanitize_language(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
        .collect::<String>()
        .to_ascii_lowercase()
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    syntax_set
        .find_syntax_by_token(token)
        .or_else(|| syntax_set.find_syntax_by_name(token))
        .or_else(|| syntax_set.find_syntax_by_extension(token))
}
