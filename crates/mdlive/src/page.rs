//! Standalone HTML page around a rendered fragment.
//!
//! The fragment goes into a `#preview` container and, when highlighting is
//! enabled, highlight.js runs over every `pre code` element once the
//! document has loaded.

use std::fmt::Write;

use mdlive_config::Config;
use mdlive_renderer::escape_html;

/// Render a complete HTML document for `fragment`.
pub(crate) fn render_page(fragment: &str, config: &Config) -> String {
    let mut html = String::with_capacity(fragment.len() + 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&config.page.title));

    if config.highlight.enabled {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(&config.highlight.stylesheet_url())
        );
        let _ = writeln!(
            html,
            "<script src=\"{}\"></script>",
            escape_html(&config.highlight.script_url())
        );
    }

    html.push_str("</head>\n<body>\n<div id=\"preview\">\n");
    html.push_str(fragment);
    html.push_str("\n</div>\n");

    if config.highlight.enabled {
        html.push_str("<script>\n");
        html.push_str("document.addEventListener('DOMContentLoaded', () => {\n");
        html.push_str("  document.querySelectorAll('pre code').forEach((block) => {\n");
        html.push_str("    hljs.highlightElement(block);\n");
        html.push_str("  });\n");
        html.push_str("});\n");
        html.push_str("</script>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
