//! Pure string substitution utilities.
//!
//! These handle the character-level rewrites applied while rendering:
//! LaTeX escaping inside equations, line-break removal inside table cells,
//! and smart quote replacement on the finished document.

use std::borrow::Cow;

use super::config::SmartQuotes;

const LEFT_DOUBLE_QUOTE: char = '\u{201c}';
const RIGHT_DOUBLE_QUOTE: char = '\u{201d}';

/// Escape characters with a special meaning in LaTeX.
///
/// Backslashes are doubled and percent signs are escaped.
///
/// # Examples
///
/// ```
/// use mdmaker::markdown::latex_sanitize;
///
/// assert_eq!(latex_sanitize("50%"), "50\\%");
/// assert_eq!(latex_sanitize("a\\b"), "a\\\\b");
/// ```
pub fn latex_sanitize(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '%']) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '%' => result.push_str("\\%"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Remove `\r\n`, `\n` and `\r` line breaks.
///
/// Markdown table cells cannot contain literal line breaks.
///
/// # Examples
///
/// ```
/// use mdmaker::markdown::strip_line_breaks;
///
/// assert_eq!(strip_line_breaks("one\n\ntwo\r\n"), "onetwo");
/// ```
pub fn strip_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r']) {
        Cow::Owned(text.chars().filter(|&c| c != '\n' && c != '\r').collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Replace typographic double quotes with ASCII `"` according to `mode`.
///
/// # Examples
///
/// ```
/// use mdmaker::SmartQuotes;
/// use mdmaker::markdown::replace_smart_quotes;
///
/// let text = "\u{201c}a\u{201d} \u{201c}b\u{201d}";
/// assert_eq!(replace_smart_quotes(text, SmartQuotes::All), "\"a\" \"b\"");
/// assert_eq!(
///     replace_smart_quotes(text, SmartQuotes::FirstOnly),
///     "\"a\" \u{201c}b\u{201d}"
/// );
/// ```
pub fn replace_smart_quotes(text: &str, mode: SmartQuotes) -> Cow<'_, str> {
    match mode {
        SmartQuotes::Keep => Cow::Borrowed(text),
        SmartQuotes::All => {
            if text.contains([LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE]) {
                Cow::Owned(text.replace([LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE], "\""))
            } else {
                Cow::Borrowed(text)
            }
        }
        SmartQuotes::FirstOnly => {
            if text.contains([LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE]) {
                Cow::Owned(
                    text.replacen(RIGHT_DOUBLE_QUOTE, "\"", 1)
                        .replacen(LEFT_DOUBLE_QUOTE, "\"", 1),
                )
            } else {
                Cow::Borrowed(text)
            }
        }
    }
}
