use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use syntect::{html::ClassStyle, parsing::SyntaxSet};

use crate::application::render::types::RenderError;

use super::highlight;

#[derive(Debug, Default)]
pub(crate) struct RewriteOutcome {
    pub(crate) contains_code: bool,
    pub(crate) code_blocks: usize,
}

/// Replace fenced and indented code blocks with pre-highlighted HTML blocks.
pub(crate) fn rewrite_ast<'a>(
    root: &'a AstNode<'a>,
    syntax_set: &SyntaxSet,
    class_style: &ClassStyle,
) -> Result<RewriteOutcome, RenderError> {
    let mut outcome = RewriteOutcome::default();
    visit_nodes(root, syntax_set, class_style, &mut outcome)?;
    Ok(outcome)
}

fn visit_nodes(
    node: &AstNode<'_>,
    syntax_set: &SyntaxSet,
    class_style: &ClassStyle,
    outcome: &mut RewriteOutcome,
) -> Result<(), RenderError> {
    if let Some((info, literal)) = extract_code_block(node) {
        let language = info.split_whitespace().next();
        let html = highlight::highlight_code(language, &literal, syntax_set, class_style)?;
        outcome.contains_code = true;
        outcome.code_blocks += 1;

        let mut data = node.data.borrow_mut();
        data.value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: html,
        });
        return Ok(());
    }

    let mut child = node.first_child();
    while let Some(next) = child {
        visit_nodes(next, syntax_set, class_style, outcome)?;
        child = next.next_sibling();
    }

    Ok(())
}

fn extract_code_block(node: &AstNode<'_>) -> Option<(String, String)> {
    let data = node.data.borrow();
    if let NodeValue::CodeBlock(block) = &data.value {
        Some((block.info.trim().to_string(), block.literal.clone()))
    } else {
        None
    }
}
