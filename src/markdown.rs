//! Markdown-to-HTML conversion for templated content. Only files whose
//! source extension is a markdown extension are converted; every other
//! templated file keeps its body as written.

use pulldown_cmark::{html, Options, Parser};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mkd", "mdown"];

/// Reports whether `ext` (without the leading dot) names a markdown file.
pub fn is_markdown(ext: &str) -> bool {
    MARKDOWN_EXTENSIONS.contains(&ext)
}

/// Converts markdown source to HTML.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

/// Converts `body` according to `ext`: markdown extensions are rendered to
/// HTML, anything else passes through untouched.
pub fn transform(ext: &str, body: &str) -> String {
    if is_markdown(ext) {
        to_html(body)
    } else {
        body.to_owned()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_markdown_extensions() {
        assert!(is_markdown("md"));
        assert!(is_markdown("markdown"));
        assert!(!is_markdown("html"));
        assert!(!is_markdown("txt"));
        assert!(!is_markdown("md~"));
    }

    #[test]
    fn test_markdown_is_converted() {
        assert_eq!("<h1>Hello</h1>\n", transform("md", "# Hello"));
    }

    #[test]
    fn test_other_content_passes_through() {
        assert_eq!("<p>as written</p>", transform("html", "<p>as written</p>"));
    }
}
