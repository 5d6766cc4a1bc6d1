//! # mdmaker
//!
//! Convert word-processor documents to Markdown, extracting embedded images.
//!
//! ## Features
//!
//! - Headings, paragraphs, nested lists, tables and footnotes
//! - Inline links, code fonts, bold and italic from attribute runs
//! - Equations rendered as LaTeX (`$…$` inline, `$$…$$` display)
//! - Images extracted as `img_N.png|gif|jpg` with Markdown references
//! - Header and footer sections separated from the body by `---`
//!
//! ## Quick Start
//!
//! ```
//! use mdmaker::{Document, MarkdownConfig};
//! use mdmaker::ir::{AttributeRun, DocTree};
//!
//! let mut body = DocTree::default();
//! let title = body.add_paragraph(body.root(), 1);
//! body.add_text(title, "Notes");
//! let para = body.add_paragraph(body.root(), 0);
//! body.add_styled_text(
//!     para,
//!     "see docs",
//!     vec![
//!         AttributeRun::new(0),
//!         AttributeRun::new(4).link("https://example.com"),
//!     ],
//! );
//!
//! let converted = Document::new(body).to_markdown_with_config(&MarkdownConfig::default())?;
//! assert_eq!(converted.text, "# Notes\n\nsee [docs](https://example.com)");
//! # Ok::<(), mdmaker::Error>(())
//! ```
//!
//! ## Loading Documents
//!
//! With the `json` feature, documents can be read from a JSON export of the
//! document tree; see [`json`].

pub mod document;
pub mod error;
pub mod ir;
#[cfg(feature = "json")]
pub mod json;
pub mod markdown;

pub use document::{Attachment, Converted, Document, convert};
pub use error::{Error, Result};
pub use markdown::{ImageRecord, MarkdownConfig, SmartQuotes};

#[cfg(feature = "json")]
pub use json::{document_from_json, document_from_path, document_from_reader};
