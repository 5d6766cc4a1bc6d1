//! Configuration for Markdown conversion.

/// How typographic double quotes (U+201C, U+201D) are handled in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmartQuotes {
    /// Replace every smart quote with `"`.
    #[default]
    All,
    /// Replace only the first occurrence of each smart quote character.
    ///
    /// Kept for output compatibility with older exports.
    FirstOnly,
    /// Leave smart quotes untouched.
    Keep,
}

/// Configuration for Markdown conversion.
///
/// # Examples
///
/// ```
/// use mdmaker::{MarkdownConfig, SmartQuotes};
///
/// let config = MarkdownConfig::new()
///     .with_code_font("Consolas")
///     .with_smart_quotes(SmartQuotes::FirstOnly);
/// assert!(config.is_code_font("Courier New"));
/// assert!(config.is_code_font("Consolas"));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Font families rendered as inline code.
    pub code_fonts: Vec<String>,
    /// Smart quote substitution applied to the final text.
    pub smart_quotes: SmartQuotes,
    /// Filename prefix for extracted images.
    pub image_prefix: String,
    /// Minimum column width of rendered tables.
    pub min_table_width: usize,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            code_fonts: vec!["Courier New".to_string()],
            smart_quotes: SmartQuotes::All,
            image_prefix: "img_".to_string(),
            min_table_width: 10,
        }
    }
}

impl MarkdownConfig {
    /// Create a new `MarkdownConfig` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat an additional font family as code font.
    pub fn with_code_font(mut self, font: impl Into<String>) -> Self {
        self.code_fonts.push(font.into());
        self
    }

    #[inline]
    pub fn with_smart_quotes(mut self, mode: SmartQuotes) -> Self {
        self.smart_quotes = mode;
        self
    }

    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_min_table_width(mut self, width: usize) -> Self {
        self.min_table_width = width;
        self
    }

    /// Whether `font` is one of the configured code fonts.
    pub fn is_code_font(&self, font: &str) -> bool {
        self.code_fonts.iter().any(|f| f == font)
    }
}
