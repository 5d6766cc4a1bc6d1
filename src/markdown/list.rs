//! List item rendering.

use crate::error::Result;
use crate::ir::{ListInfo, NodeId};

use super::render::RenderContext;

/// Marker prefix for a list item: two spaces per nesting level, then the
/// glyph's marker.
///
/// # Examples
///
/// ```
/// use mdmaker::ir::{GlyphType, ListInfo};
/// use mdmaker::markdown::list_prefix;
///
/// let nested = ListInfo { nesting: 2, glyph: GlyphType::Number };
/// assert_eq!(list_prefix(nested), "    1. ");
/// ```
pub fn list_prefix(info: ListInfo) -> String {
    let marker = info.glyph.marker();
    let mut prefix = String::with_capacity(info.nesting as usize * 2 + marker.len());
    for _ in 0..info.nesting {
        prefix.push_str("  ");
    }
    prefix.push_str(marker);
    prefix
}

impl RenderContext<'_> {
    /// Render a list item line without its trailing newline.
    pub(super) fn render_list_item(&mut self, id: NodeId) -> Result<()> {
        let info = self.tree.attributes.list(id);
        log::trace!("list item {id:?}: glyph {:?}, level {}", info.glyph, info.nesting);

        self.output.push_str(&list_prefix(info));
        self.walk_children(id)
    }
}
