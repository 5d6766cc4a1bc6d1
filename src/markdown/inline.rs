//! Inline formatting reconstruction.
//!
//! Text runs arrive as a flat string plus attribute change indices. The
//! resolver walks those indices from the end of the string towards the
//! start and wraps each span in Markdown markup. Working right-to-left
//! keeps every not-yet-processed offset valid: markup is only ever inserted
//! at or after the start of the span being handled.

use crate::ir::{AttributeRun, RunStyle};

use super::config::MarkdownConfig;

/// Rebuild Markdown inline markup for `text` from its attribute runs.
///
/// `runs` must be sorted by offset; offsets count characters. Per span, in
/// priority order:
///
/// 1. a hyperlink becomes `[span](url)`, merged with preceding runs that
///    link to the same URL;
/// 2. a code font becomes `` `span` ``, merged with preceding runs in the
///    same font, unless `in_source_block` is set;
/// 3. bold becomes `**span**`, or `**_span_**` when also italic;
/// 4. italic alone becomes `*span*`.
///
/// Emphasis and code markers get a separating space when the character on
/// the outer side is not already a space.
///
/// # Examples
///
/// ```
/// use mdmaker::MarkdownConfig;
/// use mdmaker::ir::AttributeRun;
/// use mdmaker::markdown::resolve_formatting;
///
/// let config = MarkdownConfig::default();
/// let runs = [AttributeRun::new(0), AttributeRun::new(6).bold()];
/// assert_eq!(
///     resolve_formatting("Hello world", &runs, false, &config),
///     "Hello **world**"
/// );
/// ```
pub fn resolve_formatting(
    text: &str,
    runs: &[AttributeRun],
    in_source_block: bool,
    config: &MarkdownConfig,
) -> String {
    if runs.is_empty() {
        return text.to_string();
    }

    // Byte position of every character offset, plus one for the end.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = boundaries.len() - 1;
    let byte_at = |offset: usize| boundaries[offset.min(char_len)];

    let mut formatted = text.to_string();
    let mut last_index = char_len;
    let mut i = runs.len();

    while i > 0 {
        i -= 1;
        let style = &runs[i].style;

        if let Some(url) = style.link.as_deref() {
            while i > 0 && runs[i - 1].style.link.as_deref() == Some(url) {
                i -= 1;
            }
            let index = runs[i].offset.min(last_index);
            if index < last_index {
                wrap_link(&mut formatted, byte_at(index), byte_at(last_index), url);
            }
            last_index = index;
            continue;
        }

        if let Some(font) = code_font(style, in_source_block, config) {
            // A linked run is never folded into a code span.
            while i > 0
                && runs[i - 1].style.font.as_deref() == Some(font)
                && runs[i - 1].style.link.is_none()
            {
                i -= 1;
            }
            let index = runs[i].offset.min(last_index);
            if index < last_index {
                wrap_padded(&mut formatted, byte_at(index), byte_at(last_index), "`", "`");
            }
            last_index = index;
            continue;
        }

        let index = runs[i].offset.min(last_index);
        if index < last_index {
            let markers = match (style.bold, style.italic) {
                (true, true) => Some(("**_", "_**")),
                (true, false) => Some(("**", "**")),
                (false, true) => Some(("*", "*")),
                (false, false) => None,
            };
            if let Some((open, close)) = markers {
                wrap_padded(&mut formatted, byte_at(index), byte_at(last_index), open, close);
            }
        }
        last_index = index;
    }

    formatted
}

/// The run's font, if it is a code font that should become inline code.
fn code_font<'s>(
    style: &'s RunStyle,
    in_source_block: bool,
    config: &MarkdownConfig,
) -> Option<&'s str> {
    if in_source_block {
        return None;
    }
    style.font.as_deref().filter(|font| config.is_code_font(font))
}

fn wrap_link(formatted: &mut String, left: usize, right: usize, url: &str) {
    formatted.insert_str(right, &format!("]({url})"));
    formatted.insert(left, '[');
}

/// Wrap `formatted[left..right]` in `open`/`close`, adding a space on the
/// outer side of a marker whose neighbour is not a space.
fn wrap_padded(formatted: &mut String, left: usize, right: usize, open: &str, close: &str) {
    // Right side first so `left` stays valid.
    let mut closing = close.to_string();
    if right < formatted.len() && !formatted[right..].starts_with(' ') {
        closing.push(' ');
    }
    formatted.insert_str(right, &closing);

    let mut opening = String::with_capacity(open.len() + 1);
    if left > 0 && !formatted[..left].ends_with(' ') {
        opening.push(' ');
    }
    opening.push_str(open);
    formatted.insert_str(left, &opening);
}
