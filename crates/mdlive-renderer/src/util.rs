//! Shared escaping helpers.

/// Escape the five HTML-special characters.
///
/// `&` is replaced first so the entities produced for the other characters
/// are never escaped a second time.
///
/// # Examples
///
/// ```
/// use mdlive_renderer::escape_html;
///
/// assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#039;x&#039;&gt;");
/// assert_eq!(escape_html("&lt;"), "&amp;lt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Reverse [`escape_html`].
///
/// `&amp;` is decoded last so `&amp;lt;` comes back as `&lt;`.
pub(crate) fn unescape_html(text: &str) -> String {
    text.replace("&#039;", "'")
        .replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

/// Escape literal text left in the buffer after code spans are stashed.
///
/// Only `&`, `<` and `>` are touched; quotes stay as written.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Make already text-escaped content safe inside a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}
