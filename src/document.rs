//! Whole-document conversion.
//!
//! A [`Document`] is a body section plus optional header and footer
//! sections. Each section is walked with its own traversal state, while one
//! [`ImageExtractor`] is shared across them so image numbering runs from the
//! header through the body to the footer.

use crate::error::Result;
use crate::ir::DocTree;
use crate::markdown::{
    ImageExtractor, ImageRecord, MarkdownConfig, render_section, replace_smart_quotes,
};

/// Separator placed between the header or footer and the body.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// A document split into its header, body and footer sections.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub header: Option<DocTree>,
    pub body: DocTree,
    pub footer: Option<DocTree>,
}

impl Document {
    /// Create a document with only a body section.
    pub fn new(body: DocTree) -> Self {
        Self {
            header: None,
            body,
            footer: None,
        }
    }

    pub fn with_header(mut self, header: DocTree) -> Self {
        self.header = Some(header);
        self
    }

    pub fn with_footer(mut self, footer: DocTree) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Convert the document to Markdown with default configuration.
    pub fn to_markdown(&self) -> Result<Converted> {
        self.to_markdown_with_config(&MarkdownConfig::default())
    }

    pub fn to_markdown_with_config(&self, config: &MarkdownConfig) -> Result<Converted> {
        convert(
            self.header.as_ref(),
            &self.body,
            self.footer.as_ref(),
            config,
        )
    }
}

/// Result of a conversion: Markdown text plus the extracted images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted {
    pub text: String,
    /// Images in document order, header first.
    pub images: Vec<ImageRecord>,
}

/// A file ready to be attached to a message or written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl Converted {
    /// The Markdown file (`<doc_name>.md`, `text/plain`) followed by one
    /// attachment per extracted image.
    pub fn attachments(&self, doc_name: &str) -> Vec<Attachment> {
        let mut attachments = Vec::with_capacity(self.images.len() + 1);
        attachments.push(Attachment {
            file_name: format!("{doc_name}.md"),
            mime_type: "text/plain".to_string(),
            content: self.text.clone().into_bytes(),
        });
        attachments.extend(self.images.iter().map(|image| Attachment {
            file_name: image.filename.clone(),
            mime_type: image.content_type.clone(),
            content: image.bytes.clone(),
        }));
        attachments
    }

    /// File name used when exporting the Markdown next to the source.
    pub fn export_file_name(doc_name: &str) -> String {
        format!("{doc_name}-exported.md")
    }
}

/// Convert header, body and footer sections to one Markdown text.
///
/// Header and footer are optional; an empty one (rendering to no text) is
/// left out together with its `---` separator. Smart quotes are replaced
/// according to `config` after the sections are joined.
///
/// Fails on the first unsupported node kind or image type; there is no
/// partial result.
///
/// # Examples
///
/// ```
/// use mdmaker::{MarkdownConfig, convert};
/// use mdmaker::ir::{DocTree, NodeKind};
///
/// let mut header = DocTree::new(NodeKind::HeaderSection);
/// let para = header.add_paragraph(header.root(), 0);
/// header.add_text(para, "Draft");
///
/// let mut body = DocTree::new(NodeKind::BodySection);
/// let para = body.add_paragraph(body.root(), 1);
/// body.add_text(para, "Title");
///
/// let converted = convert(Some(&header), &body, None, &MarkdownConfig::default())?;
/// assert_eq!(converted.text, "Draft\n\n---\n\n# Title");
/// # Ok::<(), mdmaker::Error>(())
/// ```
pub fn convert(
    header: Option<&DocTree>,
    body: &DocTree,
    footer: Option<&DocTree>,
    config: &MarkdownConfig,
) -> Result<Converted> {
    let mut images = ImageExtractor::new(config.image_prefix.as_str());
    let mut text = String::new();

    if let Some(header) = header {
        let rendered = render_section(header, config, &mut images)?;
        if !rendered.is_empty() {
            text.push_str(&rendered);
            text.push_str(SECTION_SEPARATOR);
        }
    }

    text.push_str(&render_section(body, config, &mut images)?);

    if let Some(footer) = footer {
        let rendered = render_section(footer, config, &mut images)?;
        if !rendered.is_empty() {
            text.push_str(SECTION_SEPARATOR);
            text.push_str(&rendered);
        }
    }

    let text = replace_smart_quotes(&text, config.smart_quotes).into_owned();
    log::debug!(
        "converted document: {} bytes, {} images",
        text.len(),
        images.count()
    );

    Ok(Converted {
        text,
        images: images.into_images(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeKind;

    fn section(kind: NodeKind, text: &str) -> DocTree {
        let mut tree = DocTree::new(kind);
        let para = tree.add_paragraph(tree.root(), 0);
        tree.add_text(para, text);
        tree
    }

    #[test]
    fn test_body_only() {
        let doc = Document::new(section(NodeKind::BodySection, "Body"));
        assert_eq!(doc.to_markdown().unwrap().text, "Body");
    }

    #[test]
    fn test_empty_sections_add_no_separator() {
        let doc = Document::new(section(NodeKind::BodySection, "Body"))
            .with_header(DocTree::new(NodeKind::HeaderSection))
            .with_footer(DocTree::new(NodeKind::FooterSection));

        let text = doc.to_markdown().unwrap().text;
        assert_eq!(text, "Body");
        assert!(!text.contains("---"));
    }

    #[test]
    fn test_header_and_footer_separators() {
        let doc = Document::new(section(NodeKind::BodySection, "Body"))
            .with_header(section(NodeKind::HeaderSection, "Head"))
            .with_footer(section(NodeKind::FooterSection, "Foot"));

        assert_eq!(
            doc.to_markdown().unwrap().text,
            "Head\n\n---\n\nBody\n\n---\n\nFoot"
        );
    }

    #[test]
    fn test_open_fence_does_not_leak_into_body() {
        let header = section(NodeKind::HeaderSection, "```sh");

        let mut body = DocTree::new(NodeKind::BodySection);
        for text in ["a", "b"] {
            let para = body.add_paragraph(body.root(), 0);
            body.add_text(para, text);
        }

        let doc = Document::new(body).with_header(header);
        assert_eq!(doc.to_markdown().unwrap().text, "```sh\n\n---\n\na\n\nb");
    }

    #[test]
    fn test_images_numbered_across_sections() {
        let mut header = DocTree::new(NodeKind::HeaderSection);
        let p = header.add_paragraph(header.root(), 0);
        header.add_image(p, "image/png", vec![1]);

        let mut body = DocTree::new(NodeKind::BodySection);
        let p = body.add_paragraph(body.root(), 0);
        body.add_image(p, "image/jpeg", vec![2]);

        let mut footer = DocTree::new(NodeKind::FooterSection);
        let p = footer.add_paragraph(footer.root(), 0);
        footer.add_image(p, "image/gif", vec![3]);

        let converted = convert(
            Some(&header),
            &body,
            Some(&footer),
            &MarkdownConfig::default(),
        )
        .unwrap();

        let names: Vec<_> = converted.images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["img_0.png", "img_1.jpg", "img_2.gif"]);
        assert!(converted.text.contains("](img_1.jpg)"));
    }

    #[test]
    fn test_footer_error_aborts_conversion() {
        let mut footer = DocTree::new(NodeKind::FooterSection);
        let p = footer.add_paragraph(footer.root(), 0);
        footer.add_image(p, "image/tiff", vec![]);

        let doc = Document::new(section(NodeKind::BodySection, "Body")).with_footer(footer);
        assert!(matches!(
            doc.to_markdown(),
            Err(crate::Error::UnsupportedImageType(_))
        ));
    }

    #[test]
    fn test_smart_quotes_modes() {
        let body = section(NodeKind::BodySection, "\u{201c}a\u{201d} \u{201c}b\u{201d}");
        let doc = Document::new(body);

        let all = doc.to_markdown().unwrap().text;
        assert_eq!(all, "\"a\" \"b\"");

        let config = MarkdownConfig::new().with_smart_quotes(crate::SmartQuotes::FirstOnly);
        let first = doc.to_markdown_with_config(&config).unwrap().text;
        assert_eq!(first, "\"a\" \u{201c}b\u{201d}");
    }

    #[test]
    fn test_attachments() {
        let converted = Converted {
            text: "# Notes".to_string(),
            images: vec![ImageRecord {
                filename: "img_0.png".to_string(),
                bytes: vec![7, 8],
                content_type: "image/png".to_string(),
            }],
        };

        let attachments = converted.attachments("Notes");
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].file_name, "Notes.md");
        assert_eq!(attachments[0].mime_type, "text/plain");
        assert_eq!(attachments[0].content, b"# Notes".to_vec());
        assert_eq!(attachments[1].file_name, "img_0.png");
        assert_eq!(attachments[1].content, vec![7, 8]);
        assert_eq!(Converted::export_file_name("Notes"), "Notes-exported.md");
    }
}
