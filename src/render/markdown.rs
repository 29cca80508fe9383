//! Lightweight Markdown rendering of bot responses
//!
//! Bot results are semi-structured text. This parser splits a raw response
//! into display blocks; fenced code regions become distinct blocks so each
//! one can be copied independently. It is a line-based pass, not a full
//! Markdown implementation.

/// One display block of a rendered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`-prefixed heading with its level (1-6)
    Heading { level: u8, text: String },
    /// Run of plain lines between blank lines
    Paragraph(String),
    /// Run of `-`/`*` bullet items
    Bullets(Vec<String>),
    /// Fenced code region; an unclosed fence runs to the end of input
    CodeFence {
        language: Option<String>,
        code: String,
    },
}

/// A parsed response, ready for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// The contents of every fenced code block, in order
    pub fn code_blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::CodeFence { code, .. } => Some(code.as_str()),
            _ => None,
        })
    }

    /// Check if the document has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Parse raw response text into display blocks
pub fn render(raw: &str) -> Document {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut bullets: Vec<String> = Vec::new();
    let mut fence: Option<(Option<String>, Vec<&str>)> = None;

    fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<&str>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join(" ")));
            paragraph.clear();
        }
    }

    fn flush_bullets(blocks: &mut Vec<Block>, bullets: &mut Vec<String>) {
        if !bullets.is_empty() {
            blocks.push(Block::Bullets(std::mem::take(bullets)));
        }
    }

    for line in raw.lines() {
        let trimmed = line.trim_end();

        if let Some((language, mut code_lines)) = fence.take() {
            if trimmed.trim_start() == "```" {
                blocks.push(Block::CodeFence {
                    language,
                    code: code_lines.join("\n"),
                });
            } else {
                code_lines.push(line);
                fence = Some((language, code_lines));
            }
            continue;
        }

        if let Some(rest) = trimmed.trim_start().strip_prefix("```") {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_bullets(&mut blocks, &mut bullets);
            let language = rest.trim();
            let language = (!language.is_empty()).then(|| language.to_string());
            fence = Some((language, Vec::new()));
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_bullets(&mut blocks, &mut bullets);
            continue;
        }

        if let Some(heading) = parse_heading(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_bullets(&mut blocks, &mut bullets);
            blocks.push(heading);
            continue;
        }

        let stripped = trimmed.trim_start();
        if let Some(item) = stripped.strip_prefix("- ").or_else(|| stripped.strip_prefix("* ")) {
            flush_paragraph(&mut blocks, &mut paragraph);
            bullets.push(item.trim().to_string());
            continue;
        }

        flush_bullets(&mut blocks, &mut bullets);
        paragraph.push(trimmed.trim_start());
    }

    // Trailing state: open paragraph, bullet run, or unclosed fence.
    flush_paragraph(&mut blocks, &mut paragraph);
    flush_bullets(&mut blocks, &mut bullets);
    if let Some((language, code_lines)) = fence {
        blocks.push(Block::CodeFence {
            language,
            code: code_lines.join("\n"),
        });
    }

    Document { blocks }
}

/// Parse a `#`-heading line; more than six hashes is not a heading
fn parse_heading(line: &str) -> Option<Block> {
    let stripped = line.trim_start();
    let level = stripped.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let text = stripped[level..].trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::Heading {
        level: level as u8,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_input() {
        let doc = render("");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_render_single_paragraph() {
        let doc = render("The sample size required is 278 respondents.");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph(
                "The sample size required is 278 respondents.".to_string()
            )]
        );
    }

    #[test]
    fn test_render_joins_wrapped_paragraph_lines() {
        let doc = render("First line\nsecond line\n\nNext paragraph");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph("First line second line".to_string()),
                Block::Paragraph("Next paragraph".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_headings() {
        let doc = render("# Title\n\n## Findings\n\nBody");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Heading {
                    level: 2,
                    text: "Findings".to_string()
                },
                Block::Paragraph("Body".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_seven_hashes_is_not_a_heading() {
        let doc = render("####### not a heading");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph("####### not a heading".to_string())]
        );
    }

    #[test]
    fn test_render_bullets() {
        let doc = render("- first\n- second\n* third");
        assert_eq!(
            doc.blocks,
            vec![Block::Bullets(vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string()
            ])]
        );
    }

    #[test]
    fn test_render_code_fence_with_language() {
        let doc = render("Before\n\n```python\nprint(1)\nprint(2)\n```\n\nAfter");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph("Before".to_string()),
                Block::CodeFence {
                    language: Some("python".to_string()),
                    code: "print(1)\nprint(2)".to_string(),
                },
                Block::Paragraph("After".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_code_fence_without_language() {
        let doc = render("```\nraw\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeFence {
                language: None,
                code: "raw".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_fence_preserves_blank_and_marker_lines() {
        let doc = render("```\nline one\n\n- not a bullet\n# not a heading\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeFence {
                language: None,
                code: "line one\n\n- not a bullet\n# not a heading".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_unclosed_fence_runs_to_end() {
        let doc = render("Intro\n\n```sql\nSELECT 1;");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Paragraph("Intro".to_string()),
                Block::CodeFence {
                    language: Some("sql".to_string()),
                    code: "SELECT 1;".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_code_blocks_iterator() {
        let doc = render("```\nfirst\n```\n\ntext\n\n```js\nsecond\n```");
        let code: Vec<&str> = doc.code_blocks().collect();
        assert_eq!(code, vec!["first", "second"]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let raw = "# T\n\n- a\n- b\n\n```\nx\n```";
        assert_eq!(render(raw), render(raw));
    }

    #[test]
    fn test_render_mixed_response() {
        let raw = "## Sample Size Result\n\nFor a population of 1200:\n\n- Confidence: 95%\n- Margin: 5%\n\n```\nn = 291\n```\n\nSubsequent runs will be faster.";
        let doc = render(raw);

        assert_eq!(doc.blocks.len(), 5);
        assert!(matches!(doc.blocks[0], Block::Heading { level: 2, .. }));
        assert!(matches!(doc.blocks[1], Block::Paragraph(_)));
        assert!(matches!(doc.blocks[2], Block::Bullets(ref items) if items.len() == 2));
        assert!(matches!(doc.blocks[3], Block::CodeFence { .. }));
        assert!(matches!(doc.blocks[4], Block::Paragraph(_)));
    }
}
