//! Markdown to HTML rendering.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown text to an HTML fragment.
///
/// Pure best-effort conversion: malformed markdown still produces HTML.
pub fn render(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings() {
        let html = render("# Ruby is...");
        assert!(html.contains("<h1>Ruby is...</h1>"));
    }

    #[test]
    fn renders_emphasis_and_lists() {
        let html = render("- one\n- *two*\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<em>two</em>"));
    }

    #[test]
    fn empty_input_renders_empty_output() {
        assert_eq!(render(""), "");
    }
}
