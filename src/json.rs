//! Loading documents from a JSON export of the document tree.
//!
//! The format mirrors the tree model directly:
//!
//! ```json
//! {
//!   "header": null,
//!   "body": {
//!     "type": "body_section",
//!     "children": [
//!       { "type": "paragraph", "heading": 1, "children": [
//!         { "type": "text", "text": "Title" }
//!       ] }
//!     ]
//!   },
//!   "footer": null
//! }
//! ```
//!
//! Kind-specific fields are optional and ignored on other kinds: `heading`
//! (paragraph), `nesting` and `glyph` (list item), `text` and `runs` (text),
//! `code` (equation function or symbol), `content_type` and base64 `data`
//! (inline image).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::document::Document;
use crate::error::Result;
use crate::ir::{AttributeRun, DocTree, GlyphType, NodeId, NodeKind, RunStyle};

#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    header: Option<JsonNode>,
    body: JsonNode,
    #[serde(default)]
    footer: Option<JsonNode>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    children: Vec<JsonNode>,
    #[serde(default)]
    heading: u8,
    #[serde(default)]
    nesting: u32,
    #[serde(default)]
    glyph: GlyphType,
    #[serde(default)]
    text: String,
    #[serde(default)]
    runs: Vec<JsonRun>,
    #[serde(default)]
    code: String,
    #[serde(default)]
    content_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Deserialize)]
struct JsonRun {
    offset: usize,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    font: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl From<JsonRun> for AttributeRun {
    fn from(run: JsonRun) -> Self {
        AttributeRun {
            offset: run.offset,
            style: RunStyle {
                bold: run.bold,
                italic: run.italic,
                font: run.font,
                link: run.link,
            },
        }
    }
}

/// Parse a document from a JSON string.
///
/// # Examples
///
/// ```
/// let doc = mdmaker::document_from_json(
///     r#"{"body": {"type": "body_section", "children": [
///         {"type": "paragraph", "heading": 2, "children": [
///             {"type": "text", "text": "Setup"}
///         ]}
///     ]}}"#,
/// )?;
/// assert_eq!(doc.to_markdown()?.text, "## Setup");
/// # Ok::<(), mdmaker::Error>(())
/// ```
pub fn document_from_json(json: &str) -> Result<Document> {
    let parsed: JsonDocument = serde_json::from_str(json)?;
    build_document(parsed)
}

/// Parse a document from a reader producing JSON.
pub fn document_from_reader<R: Read>(reader: R) -> Result<Document> {
    let parsed: JsonDocument = serde_json::from_reader(reader)?;
    build_document(parsed)
}

/// Read a document from a JSON file.
pub fn document_from_path<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = File::open(path.as_ref())?;
    document_from_reader(BufReader::new(file))
}

fn build_document(parsed: JsonDocument) -> Result<Document> {
    let header = parsed.header.map(build_tree).transpose()?;
    let body = build_tree(parsed.body)?;
    let footer = parsed.footer.map(build_tree).transpose()?;

    log::debug!(
        "loaded document: header {}, body {} nodes, footer {}",
        header.as_ref().map_or(0, DocTree::node_count),
        body.node_count(),
        footer.as_ref().map_or(0, DocTree::node_count)
    );

    Ok(Document {
        header,
        body,
        footer,
    })
}

fn build_tree(root: JsonNode) -> Result<DocTree> {
    let mut tree = DocTree::new(root.kind);
    let parent = tree.root();
    for child in root.children {
        add_node(&mut tree, parent, child)?;
    }
    Ok(tree)
}

fn add_node(tree: &mut DocTree, parent: NodeId, node: JsonNode) -> Result<()> {
    let id = match node.kind {
        NodeKind::Paragraph => tree.add_paragraph(parent, node.heading),
        NodeKind::ListItem => tree.add_list_item(parent, node.nesting, node.glyph),
        NodeKind::Text => {
            let runs = node.runs.into_iter().map(AttributeRun::from).collect();
            tree.add_styled_text(parent, &node.text, runs)
        }
        NodeKind::InlineImage => {
            let bytes = STANDARD.decode(node.data.as_bytes())?;
            tree.add_image(parent, &node.content_type, bytes)
        }
        NodeKind::EquationFunction | NodeKind::EquationSymbol => {
            tree.add_equation_part(parent, node.kind, &node.code)
        }
        kind => tree.add(parent, kind),
    };

    for child in node.children {
        add_node(tree, id, child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_sections() {
        let doc = document_from_json(
            r#"{
                "header": {"type": "header_section", "children": [
                    {"type": "paragraph", "children": [{"type": "text", "text": "Head"}]}
                ]},
                "body": {"type": "body_section", "children": [
                    {"type": "paragraph", "children": [{"type": "text", "text": "Body"}]}
                ]},
                "footer": null
            }"#,
        )
        .unwrap();

        assert!(doc.header.is_some());
        assert!(doc.footer.is_none());
        assert_eq!(doc.to_markdown().unwrap().text, "Head\n\n---\n\nBody");
    }

    #[test]
    fn test_runs_and_lists() {
        let doc = document_from_json(
            r#"{"body": {"type": "body_section", "children": [
                {"type": "list_item", "nesting": 1, "glyph": "number", "children": [
                    {"type": "text", "text": "run it", "runs": [
                        {"offset": 0},
                        {"offset": 4, "font": "Courier New"}
                    ]}
                ]}
            ]}}"#,
        )
        .unwrap();

        let item = doc.body.children(doc.body.root()).next().unwrap();
        assert_eq!(doc.body.attributes.list(item).glyph, GlyphType::Number);
        assert_eq!(doc.to_markdown().unwrap().text, "  1. run `it`\n");
    }

    #[test]
    fn test_image_data_decoded() {
        let doc = document_from_json(
            r#"{"body": {"type": "body_section", "children": [
                {"type": "paragraph", "children": [
                    {"type": "inline_image", "content_type": "image/png", "data": "iVBORw=="}
                ]}
            ]}}"#,
        )
        .unwrap();

        let converted = doc.to_markdown().unwrap();
        assert_eq!(converted.text, "![image alt text](img_0.png)");
        assert_eq!(converted.images[0].bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_equation_parts() {
        let doc = document_from_json(
            r#"{"body": {"type": "body_section", "children": [
                {"type": "paragraph", "children": [
                    {"type": "equation", "children": [
                        {"type": "equation_function", "code": "\\sqrt", "children": [
                            {"type": "text", "text": "x"}
                        ]}
                    ]}
                ]}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(doc.to_markdown().unwrap().text, "$$\\sqrt{x}$$");
    }

    #[test]
    fn test_bad_base64() {
        let err = document_from_json(
            r#"{"body": {"type": "body_section", "children": [
                {"type": "inline_image", "content_type": "image/png", "data": "***"}
            ]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Base64(_)));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = document_from_json(r#"{"body": {"type": "sidebar"}}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"body": {"type": "body_section"}}"#).unwrap();

        assert!(document_from_path(&path).unwrap().body.is_empty());
        assert!(matches!(
            document_from_path(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_reader() {
        let json = br#"{"body": {"type": "body_section"}}"#;
        let doc = document_from_reader(&json[..]).unwrap();
        assert!(doc.body.is_empty());
    }
}
