//! Sparse per-node attributes.
//!
//! Most nodes carry nothing beyond their kind. Heading levels, list glyphs,
//! equation codes, image payloads and formatting runs are kept in maps keyed
//! by [`NodeId`] instead of as `Option` fields on every node.
//!
//! Equation codes are stored in a single contiguous buffer with
//! [`TextRange`] references, the same way node text is.

use std::collections::HashMap;

use super::node::{GlyphType, NodeId, TextRange};

/// Formatting active from an [`AttributeRun`]'s offset onwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    /// Font family name, if the source reports one.
    pub font: Option<String>,
    /// Hyperlink target, if the run is linked.
    pub link: Option<String>,
}

/// An attribute change index: formatting that starts at `offset` and lasts
/// until the next run (or the end of the text).
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRun {
    pub offset: usize,
    pub style: RunStyle,
}

impl AttributeRun {
    /// A plain run starting at `offset`.
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            style: RunStyle::default(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.style.font = Some(font.into());
        self
    }

    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.style.link = Some(url.into());
        self
    }
}

/// List placement of a list item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListInfo {
    /// Nesting level, 0 for top-level items.
    pub nesting: u32,
    pub glyph: GlyphType,
}

/// Raw payload of an inline image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageBlob {
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Sparse map of node attributes.
#[derive(Debug, Default, Clone)]
pub struct Attributes {
    /// Contiguous buffer for equation codes.
    buffer: String,
    /// Heading level for paragraphs (1-6).
    heading: HashMap<NodeId, u8>,
    /// Nesting level and glyph for list items.
    list: HashMap<NodeId, ListInfo>,
    /// Operator/symbol code for equation functions and symbols.
    code: HashMap<NodeId, TextRange>,
    /// Image payloads for inline images.
    image: HashMap<NodeId, ImageBlob>,
    /// Attribute change indices for text nodes, sorted by offset.
    runs: HashMap<NodeId, Vec<AttributeRun>>,
}

impl Attributes {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    // --- heading ---

    /// Set the heading level of a paragraph. Level 0 clears it and levels
    /// above 6 are clamped.
    pub fn set_heading(&mut self, node: NodeId, level: u8) {
        if level == 0 {
            self.heading.remove(&node);
        } else {
            self.heading.insert(node, level.min(6));
        }
    }

    /// Heading level of a paragraph, 0 for body text.
    pub fn heading(&self, node: NodeId) -> u8 {
        self.heading.get(&node).copied().unwrap_or(0)
    }

    // --- list ---

    pub fn set_list(&mut self, node: NodeId, info: ListInfo) {
        self.list.insert(node, info);
    }

    /// List placement of a node, top-level bullet if unset.
    pub fn list(&self, node: NodeId) -> ListInfo {
        self.list.get(&node).copied().unwrap_or_default()
    }

    // --- code ---

    pub fn set_code(&mut self, node: NodeId, code: &str) {
        if !code.is_empty() {
            let start = self.buffer.len() as u32;
            self.buffer.push_str(code);
            self.code
                .insert(node, TextRange::new(start, code.len() as u32));
        }
    }

    pub fn code(&self, node: NodeId) -> Option<&str> {
        self.code.get(&node).map(|range| {
            let start = range.start as usize;
            &self.buffer[start..range.end() as usize]
        })
    }

    // --- image ---

    pub fn set_image(&mut self, node: NodeId, blob: ImageBlob) {
        self.image.insert(node, blob);
    }

    pub fn image(&self, node: NodeId) -> Option<&ImageBlob> {
        self.image.get(&node)
    }

    // --- runs ---

    /// Set the attribute runs of a text node. Runs are kept sorted by offset.
    pub fn set_runs(&mut self, node: NodeId, mut runs: Vec<AttributeRun>) {
        if runs.is_empty() {
            self.runs.remove(&node);
            return;
        }
        runs.sort_by_key(|run| run.offset);
        self.runs.insert(node, runs);
    }

    pub fn runs(&self, node: NodeId) -> &[AttributeRun] {
        self.runs.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}
