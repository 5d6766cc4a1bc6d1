//! Core document tree → Markdown rendering.
//!
//! This module provides pure rendering logic that transforms one section
//! tree into a Markdown string. No I/O is performed here; extracted images
//! are collected in an [`ImageExtractor`] owned by the caller.

use crate::error::{Error, Result};
use crate::ir::{DocTree, NodeId, NodeKind};

use super::config::MarkdownConfig;
use super::equation::render_equation;
use super::image::ImageExtractor;
use super::inline::resolve_formatting;

/// Placeholder emitted for a table of contents.
const TOC_PLACEHOLDER: &str = "[[TOC]]";

/// Sibling context of the level currently being walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingFrame {
    /// Number of children of the parent.
    pub count: usize,
    /// Next sibling of the node being walked, if any.
    pub next: Option<NodeId>,
}

/// Mutable state threaded through the walk of one section.
///
/// A fresh state is created per section; only the image extractor is
/// shared, so numbering and the image list carry over between sections.
pub struct TraversalState<'a> {
    /// Set while inside a fenced code block.
    pub in_source_block: bool,
    /// Image numbering and collected images.
    pub images: &'a mut ImageExtractor,
    /// One frame per container level currently being walked.
    frames: Vec<SiblingFrame>,
}

impl<'a> TraversalState<'a> {
    pub fn new(images: &'a mut ImageExtractor) -> Self {
        Self {
            in_source_block: false,
            images,
            frames: Vec::new(),
        }
    }

    /// Nesting depth of the walk.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Sibling context of the node currently being walked.
    pub fn siblings(&self) -> Option<&SiblingFrame> {
        self.frames.last()
    }
}

/// Context for rendering one section (pure string accumulation, no I/O).
pub struct RenderContext<'a> {
    pub(super) tree: &'a DocTree,
    pub(super) config: &'a MarkdownConfig,
    pub(super) state: TraversalState<'a>,
    pub(super) output: String,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context for a section tree.
    pub fn new(
        tree: &'a DocTree,
        config: &'a MarkdownConfig,
        images: &'a mut ImageExtractor,
    ) -> Self {
        Self {
            tree,
            config,
            state: TraversalState::new(images),
            output: String::new(),
        }
    }

    /// Render the section, consuming the context.
    pub fn render(mut self) -> Result<String> {
        let root = self.tree.root();
        self.walk_node(root)?;
        Ok(self.output)
    }

    fn walk_node(&mut self, id: NodeId) -> Result<()> {
        let tree = self.tree;
        let Some(node) = tree.node(id) else {
            return Err(Error::InvalidNode(id));
        };

        match node.kind {
            NodeKind::Document => {}

            NodeKind::HeaderSection | NodeKind::BodySection | NodeKind::FooterSection => {
                self.walk_children(id)?;
            }

            NodeKind::Paragraph => {
                let level = tree.attributes.heading(id) as usize;
                if level > 0 {
                    self.output.push_str(&"#".repeat(level));
                    self.output.push(' ');
                }

                self.walk_children(id)?;

                // No break after the last element on this level.
                if self.next_sibling().is_none() {
                    return Ok(());
                }
                if self.state.in_source_block {
                    self.output.push('\n');
                } else {
                    self.output.push_str("\n\n");
                }
            }

            NodeKind::ListItem => {
                self.render_list_item(id)?;
                self.output.push('\n');

                // A blank line closes a run of consecutive list items.
                if let Some(next) = self.next_sibling()
                    && tree.node(next).map(|n| n.kind) != Some(NodeKind::ListItem)
                {
                    self.output.push('\n');
                }
            }

            NodeKind::Footnote => {
                self.output.push_str(" (NOTE: ");
                self.walk_children(id)?;
                self.output.push(')');
            }

            NodeKind::HorizontalRule => {
                self.output.push_str("---\n");
            }

            NodeKind::TableOfContents => {
                self.output.push_str(TOC_PLACEHOLDER);
            }

            NodeKind::Table => {
                self.render_table(id)?;
            }

            NodeKind::Text => {
                let text = resolve_formatting(
                    tree.text(node.text),
                    tree.attributes.runs(id),
                    self.state.in_source_block,
                    self.config,
                );

                if is_fence_open(&text) {
                    self.state.in_source_block = true;
                }
                if text == "```" {
                    self.state.in_source_block = false;
                }

                self.output.push_str(&text);
            }

            NodeKind::InlineImage => {
                let reference = match tree.attributes.image(id) {
                    Some(blob) => self.state.images.extract(blob)?,
                    None => return Err(Error::UnsupportedImageType(String::new())),
                };
                self.output.push_str(&reference);
            }

            NodeKind::InlineDrawing | NodeKind::PageBreak => {
                log::trace!("skipping {:?} node {id:?}", node.kind);
            }

            NodeKind::Equation => {
                let latex = render_equation(tree, id);

                // A lone equation in its paragraph is display math.
                let wrap = match self.state.siblings() {
                    Some(frame) if frame.count != 1 => "$",
                    _ => "$$",
                };
                self.output.push_str(wrap);
                self.output.push_str(latex.trim());
                self.output.push_str(wrap);
            }

            kind @ (NodeKind::TableRow
            | NodeKind::TableCell
            | NodeKind::EquationFunction
            | NodeKind::EquationSymbol
            | NodeKind::EquationArgumentSeparator
            | NodeKind::FootnoteSection
            | NodeKind::CommentSection
            | NodeKind::Unsupported) => {
                return Err(Error::UnsupportedNodeKind(kind));
            }
        }

        Ok(())
    }

    /// Walk all children of `id`, keeping the sibling frame up to date.
    pub(super) fn walk_children(&mut self, id: NodeId) -> Result<()> {
        let tree = self.tree;
        let children: Vec<NodeId> = tree.children(id).collect();

        self.state.frames.push(SiblingFrame {
            count: children.len(),
            next: None,
        });

        let mut result = Ok(());
        for (i, &child) in children.iter().enumerate() {
            if let Some(frame) = self.state.frames.last_mut() {
                frame.next = children.get(i + 1).copied();
            }
            result = self.walk_node(child);
            if result.is_err() {
                break;
            }
        }

        self.state.frames.pop();
        result
    }

    /// Render the children of `id` into a separate string.
    pub(super) fn render_children_to_string(&mut self, id: NodeId) -> Result<String> {
        let saved = std::mem::take(&mut self.output);
        let result = self.walk_children(id);
        let rendered = std::mem::replace(&mut self.output, saved);
        result.map(|()| rendered)
    }

    fn next_sibling(&self) -> Option<NodeId> {
        self.state.siblings().and_then(|frame| frame.next)
    }
}

/// Whether a rendered text run opens a fenced code block: three backticks
/// followed by an info string on a single line.
fn is_fence_open(text: &str) -> bool {
    text.strip_prefix("```")
        .is_some_and(|rest| !rest.is_empty() && !rest.contains(['\n', '\r']))
}

/// Render a single section tree to Markdown.
///
/// This is the main entry point for section rendering. Images found in the
/// section are appended to `images`.
pub fn render_section(
    tree: &DocTree,
    config: &MarkdownConfig,
    images: &mut ImageExtractor,
) -> Result<String> {
    let result = RenderContext::new(tree, config, images).render()?;
    log::debug!(
        "rendered {:?} section: {} nodes, {} bytes",
        tree.node(tree.root()).map(|n| n.kind),
        tree.node_count(),
        result.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AttributeRun, GlyphType};

    fn render_to_string(tree: &DocTree) -> String {
        let mut images = ImageExtractor::default();
        render_section(tree, &MarkdownConfig::default(), &mut images).unwrap()
    }

    #[test]
    fn test_simple_paragraph() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_text(para, "Hello, World!");

        assert_eq!(render_to_string(&tree), "Hello, World!");
    }

    #[test]
    fn test_paragraph_breaks_except_last() {
        let mut tree = DocTree::default();
        let root = tree.root();
        for text in ["one", "two", "three"] {
            let para = tree.add_paragraph(root, 0);
            tree.add_text(para, text);
        }

        assert_eq!(render_to_string(&tree), "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_heading_prefixes() {
        let mut tree = DocTree::default();
        let root = tree.root();
        let h3 = tree.add_paragraph(root, 3);
        tree.add_text(h3, "Section");
        let body = tree.add_paragraph(root, 0);
        tree.add_text(body, "Text");

        assert_eq!(render_to_string(&tree), "### Section\n\nText");
    }

    #[test]
    fn test_document_root_is_silent() {
        let mut tree = DocTree::new(NodeKind::Document);
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_text(para, "hidden");

        assert_eq!(render_to_string(&tree), "");
    }

    #[test]
    fn test_list_run_ends_with_blank_line() {
        let mut tree = DocTree::default();
        let root = tree.root();
        let a = tree.add_list_item(root, 0, GlyphType::Bullet);
        tree.add_text(a, "a");
        let b = tree.add_list_item(root, 1, GlyphType::Number);
        tree.add_text(b, "b");
        let para = tree.add_paragraph(root, 0);
        tree.add_text(para, "after");

        assert_eq!(render_to_string(&tree), "- a\n  1. b\n\nafter");
    }

    #[test]
    fn test_last_list_item_single_newline() {
        let mut tree = DocTree::default();
        let item = tree.add_list_item(tree.root(), 0, GlyphType::SquareBullet);
        tree.add_text(item, "only");

        assert_eq!(render_to_string(&tree), "- only\n");
    }

    #[test]
    fn test_footnote() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_text(para, "Claim");
        let note = tree.add(para, NodeKind::Footnote);
        let note_para = tree.add_paragraph(note, 0);
        tree.add_text(note_para, "source");

        assert_eq!(render_to_string(&tree), "Claim (NOTE: source)");
    }

    #[test]
    fn test_breaks_follow_siblings_of_each_level() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_text(para, "Claim");
        let note = tree.add(para, NodeKind::Footnote);
        for text in ["one", "two"] {
            let note_para = tree.add_paragraph(note, 0);
            tree.add_text(note_para, text);
        }

        assert_eq!(render_to_string(&tree), "Claim (NOTE: one\n\ntwo)");
    }

    #[test]
    fn test_rule_and_toc() {
        let mut tree = DocTree::default();
        let root = tree.root();
        tree.add(root, NodeKind::TableOfContents);
        tree.add(root, NodeKind::HorizontalRule);

        assert_eq!(render_to_string(&tree), "[[TOC]]---\n");
    }

    #[test]
    fn test_drawing_and_page_break_are_silent() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add(para, NodeKind::InlineDrawing);
        tree.add(para, NodeKind::PageBreak);

        assert_eq!(render_to_string(&tree), "");
    }

    #[test]
    fn test_code_fence_collapses_breaks() {
        let mut tree = DocTree::default();
        let root = tree.root();
        for line in ["```rust", "let x = 1;", "```", "done"] {
            let para = tree.add_paragraph(root, 0);
            tree.add_text(para, line);
        }

        assert_eq!(
            render_to_string(&tree),
            "```rust\nlet x = 1;\n```\n\ndone"
        );
    }

    #[test]
    fn test_code_font_inside_fence_not_wrapped() {
        let mut tree = DocTree::default();
        let root = tree.root();
        let open = tree.add_paragraph(root, 0);
        tree.add_text(open, "```sh");
        let code = tree.add_paragraph(root, 0);
        tree.add_styled_text(code, "ls", vec![AttributeRun::new(0).font("Courier New")]);
        let close = tree.add_paragraph(root, 0);
        tree.add_text(close, "```");
        let after = tree.add_paragraph(root, 0);
        tree.add_styled_text(after, "ls", vec![AttributeRun::new(0).font("Courier New")]);

        assert_eq!(render_to_string(&tree), "```sh\nls\n```\n\n`ls`");
    }

    #[test]
    fn test_fence_detection() {
        assert!(is_fence_open("```rust"));
        assert!(!is_fence_open("```"));
        assert!(!is_fence_open("``rust"));
        assert!(!is_fence_open("```a\nb"));
    }

    #[test]
    fn test_single_equation_is_display_math() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        let eq = tree.add(para, NodeKind::Equation);
        tree.add_text(eq, "E = mc^2");

        assert_eq!(render_to_string(&tree), "$$E = mc^2$$");
    }

    #[test]
    fn test_sibling_equations_are_inline() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        let first = tree.add(para, NodeKind::Equation);
        tree.add_text(first, "a");
        let second = tree.add(para, NodeKind::Equation);
        tree.add_text(second, "b");

        assert_eq!(render_to_string(&tree), "$a$$b$");
    }

    #[test]
    fn test_images_numbered_in_order() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_image(para, "image/png", vec![1]);
        tree.add_text(para, " and ");
        tree.add_image(para, "image/gif", vec![2]);

        let mut images = ImageExtractor::default();
        let text = render_section(&tree, &MarkdownConfig::default(), &mut images).unwrap();

        assert_eq!(
            text,
            "![image alt text](img_0.png) and ![image alt text](img_1.gif)"
        );
        assert_eq!(images.count(), 2);
    }

    #[test]
    fn test_unsupported_image_is_fatal() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_image(para, "application/pdf", vec![]);

        let mut images = ImageExtractor::default();
        let err = render_section(&tree, &MarkdownConfig::default(), &mut images).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImageType(t) if t == "application/pdf"));
    }

    #[test]
    fn test_unsupported_kind_is_fatal() {
        let mut tree = DocTree::default();
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add(para, NodeKind::CommentSection);

        let mut images = ImageExtractor::default();
        let err = render_section(&tree, &MarkdownConfig::default(), &mut images).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedNodeKind(NodeKind::CommentSection)
        ));
    }

    #[test]
    fn test_stray_table_row_is_fatal() {
        let mut tree = DocTree::default();
        tree.add(tree.root(), NodeKind::TableRow);

        let mut images = ImageExtractor::default();
        let err = render_section(&tree, &MarkdownConfig::default(), &mut images).unwrap_err();
        assert!(matches!(err, Error::UnsupportedNodeKind(NodeKind::TableRow)));
    }

    #[test]
    fn test_traversal_state_frames() {
        let mut images = ImageExtractor::default();
        let state = TraversalState::new(&mut images);
        assert_eq!(state.depth(), 0);
        assert!(state.siblings().is_none());
        assert!(!state.in_source_block);
    }
}
