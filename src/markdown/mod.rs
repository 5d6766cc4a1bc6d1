//! Pure Markdown generation from document trees.
//!
//! This module renders section trees to Markdown. The design separates pure
//! rendering logic from I/O:
//!
//! - [`inline`]: attribute runs → nested inline markup (links, code, emphasis)
//! - [`equation`]: equation trees → LaTeX
//! - [`image`]: image numbering and payload collection
//! - [`list`] and [`table`]: block-level layout helpers
//! - [`render`]: the tree walker dispatching on node kind
//! - [`escape`]: character substitutions
//!
//! The assembler ([`crate::document`]) walks header, body and footer through
//! [`render_section`] and joins the results.
//!
//! ## Design Notes
//!
//! - **Right-to-left inline markup**: attribute runs are processed from the
//!   end of the text so earlier offsets stay valid while markers are inserted
//! - **Fence tracking**: a text run of three backticks plus an info string
//!   opens a code block; inside it paragraphs end with a single newline and
//!   code fonts are not wrapped in backticks
//! - **Display math**: an equation that is the only child of its paragraph
//!   renders as `$$…$$`, otherwise as `$…$`
//! - **Shared image numbering**: one [`ImageExtractor`] serves every section
//!   of a conversion

mod config;
mod equation;
mod escape;
mod image;
mod inline;
mod list;
mod render;
mod table;

pub use config::{MarkdownConfig, SmartQuotes};
pub use equation::{equation_at, render_equation};
pub use escape::{latex_sanitize, replace_smart_quotes, strip_line_breaks};
pub use image::{ImageExtractor, ImageRecord, image_extension};
pub use inline::resolve_formatting;
pub use list::list_prefix;
pub use render::{RenderContext, SiblingFrame, TraversalState, render_section};
pub use table::layout_table;
