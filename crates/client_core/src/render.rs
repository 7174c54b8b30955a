//! Flattens summary Markdown into blocks a front-end can draw directly.

use anyhow::{anyhow, Result};
use markdown::{mdast::Node, ParseOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph(String),
    ListItem {
        depth: usize,
        number: Option<u32>,
        text: String,
    },
    Code {
        language: Option<String>,
        text: String,
    },
    Quote(String),
    TableRow(Vec<String>),
    Rule,
}

impl SummaryBlock {
    /// Plain-text form, used by terminal output and tests.
    pub fn plain_text(&self) -> String {
        match self {
            SummaryBlock::Heading { level, text } => {
                format!("{} {text}", "#".repeat(usize::from(*level)))
            }
            SummaryBlock::Paragraph(text) => text.clone(),
            SummaryBlock::ListItem {
                depth,
                number,
                text,
            } => {
                let indent = "  ".repeat(*depth);
                match number {
                    Some(number) => format!("{indent}{number}. {text}"),
                    None => format!("{indent}- {text}"),
                }
            }
            SummaryBlock::Code { text, .. } => text.clone(),
            SummaryBlock::Quote(text) => format!("> {text}"),
            SummaryBlock::TableRow(cells) => format!("| {} |", cells.join(" | ")),
            SummaryBlock::Rule => "---".to_string(),
        }
    }
}

pub fn summary_blocks(markdown: &str) -> Result<Vec<SummaryBlock>> {
    let root = markdown::to_mdast(markdown, &ParseOptions::gfm())
        .map_err(|err| anyhow!("failed to parse summary markdown: {err}"))?;
    let mut blocks = Vec::new();
    if let Some(children) = root.children() {
        for node in children {
            push_block(node, 0, &mut blocks);
        }
    }
    Ok(blocks)
}

fn push_block(node: &Node, depth: usize, blocks: &mut Vec<SummaryBlock>) {
    match node {
        Node::Heading(heading) => blocks.push(SummaryBlock::Heading {
            level: heading.depth,
            text: inline_text(&heading.children),
        }),
        Node::Paragraph(paragraph) => {
            let text = inline_text(&paragraph.children);
            if !text.trim().is_empty() {
                blocks.push(SummaryBlock::Paragraph(text));
            }
        }
        Node::List(list) => {
            let mut number = list.start;
            for item in &list.children {
                let Node::ListItem(item) = item else {
                    continue;
                };
                let mut nested = Vec::new();
                let mut text = Vec::new();
                for child in &item.children {
                    match child {
                        Node::Paragraph(paragraph) => text.push(inline_text(&paragraph.children)),
                        other => nested.push(other),
                    }
                }
                blocks.push(SummaryBlock::ListItem {
                    depth,
                    number: if list.ordered { number } else { None },
                    text: text.join(" "),
                });
                number = number.map(|n| n + 1);
                for child in nested {
                    push_block(child, depth + 1, blocks);
                }
            }
        }
        Node::Code(code) => blocks.push(SummaryBlock::Code {
            language: code.lang.clone(),
            text: code.value.clone(),
        }),
        Node::Blockquote(quote) => {
            let text = quote
                .children
                .iter()
                .map(|child| inline_text(std::slice::from_ref(child)))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(SummaryBlock::Quote(text));
        }
        Node::Table(table) => {
            for row in &table.children {
                if let Some(cells) = row.children() {
                    blocks.push(SummaryBlock::TableRow(
                        cells
                            .iter()
                            .map(|cell| inline_text(std::slice::from_ref(cell)))
                            .collect(),
                    ));
                }
            }
        }
        Node::ThematicBreak(_) => blocks.push(SummaryBlock::Rule),
        Node::Html(html) => blocks.push(SummaryBlock::Paragraph(html.value.clone())),
        other => {
            let text = inline_text(std::slice::from_ref(other));
            if !text.trim().is_empty() {
                blocks.push(SummaryBlock::Paragraph(text));
            }
        }
    }
}

fn inline_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_inline(node, &mut out);
    }
    out
}

fn push_inline(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        Node::Html(html) => out.push_str(&html.value),
        Node::Break(_) => out.push('\n'),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    push_inline(child, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_lists_and_mermaid_fences() {
        let blocks = summary_blocks(
            "## Summary\n\nCompany X announced **record** results.\n\n- first\n- second\n\n```mermaid\ngraph TD; A-->B\n```\n",
        )
        .expect("render");

        assert_eq!(
            blocks,
            vec![
                SummaryBlock::Heading {
                    level: 2,
                    text: "Summary".to_string()
                },
                SummaryBlock::Paragraph("Company X announced record results.".to_string()),
                SummaryBlock::ListItem {
                    depth: 0,
                    number: None,
                    text: "first".to_string()
                },
                SummaryBlock::ListItem {
                    depth: 0,
                    number: None,
                    text: "second".to_string()
                },
                SummaryBlock::Code {
                    language: Some("mermaid".to_string()),
                    text: "graph TD; A-->B".to_string()
                },
            ]
        );
    }

    #[test]
    fn numbers_ordered_lists_and_nests_sublists() {
        let blocks = summary_blocks("3. alpha\n   - inner\n4. beta\n").expect("render");
        assert_eq!(
            blocks,
            vec![
                SummaryBlock::ListItem {
                    depth: 0,
                    number: Some(3),
                    text: "alpha".to_string()
                },
                SummaryBlock::ListItem {
                    depth: 1,
                    number: None,
                    text: "inner".to_string()
                },
                SummaryBlock::ListItem {
                    depth: 0,
                    number: Some(4),
                    text: "beta".to_string()
                },
            ]
        );
    }

    #[test]
    fn plain_text_keeps_heading_markers() {
        let heading = SummaryBlock::Heading {
            level: 1,
            text: "Title".to_string(),
        };
        assert_eq!(heading.plain_text(), "# Title");
        assert_eq!(SummaryBlock::Rule.plain_text(), "---");
    }
}
