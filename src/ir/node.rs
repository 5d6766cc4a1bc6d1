//! Document tree node types and kinds.

/// Unique identifier for a node within a [`DocTree`](super::DocTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Structural kind of a node, as reported by the source editor.
///
/// Kind-specific data (heading level, list glyph, equation code, image
/// bytes, formatting runs) lives in [`Attributes`](super::Attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// Whole-document container. Produces no output when walked.
    Document,
    /// Page header section.
    HeaderSection,
    /// Main body section.
    #[default]
    BodySection,
    /// Page footer section.
    FooterSection,
    /// Block of inline content; may carry a heading level.
    Paragraph,
    /// List entry with nesting level and glyph.
    ListItem,
    /// Leaf text run with formatting attribute runs.
    Text,
    Table,
    TableRow,
    TableCell,
    /// Footnote reference; its children are the footnote contents.
    Footnote,
    HorizontalRule,
    TableOfContents,
    /// Embedded raster image.
    InlineImage,
    /// Embedded drawing. There is no export path for these.
    InlineDrawing,
    PageBreak,
    /// Top-level math expression.
    Equation,
    /// Math function such as `\frac`; arguments are split by separators.
    EquationFunction,
    /// Math symbol such as `\alpha`.
    EquationSymbol,
    /// Boundary between two arguments of an [`NodeKind::EquationFunction`].
    EquationArgumentSeparator,
    /// Container of all footnote bodies. Not walked directly.
    FootnoteSection,
    /// Comment thread container. Not walked directly.
    CommentSection,
    /// Element the source editor could not classify.
    Unsupported,
}

/// Bullet or numbering glyph of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum GlyphType {
    #[default]
    Bullet,
    HollowBullet,
    SquareBullet,
    Number,
    LatinUpper,
    LatinLower,
    RomanUpper,
    RomanLower,
}

impl GlyphType {
    /// Markdown list marker for this glyph.
    ///
    /// Only plain numbering maps to an ordered marker, always `1.`; Markdown
    /// renderers number the items themselves.
    pub fn marker(self) -> &'static str {
        match self {
            GlyphType::Number => "1. ",
            _ => "- ",
        }
    }
}

/// Range into the tree's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into the text buffer.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Structural kind.
    pub kind: NodeKind,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node, for O(1) appends.
    pub last_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
    /// Text content range (only for Text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            text: range,
            ..Self::new(NodeKind::Text)
        }
    }
}
