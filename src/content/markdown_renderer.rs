use markdown::{CompileOptions, Options};

/// Renders a markdown body to HTML.
///
/// Content is authored by the site owner, so raw HTML in the source is
/// passed through untouched. Unclosed constructs render as literal text.
pub fn render_markdown(md_text: &str) -> Result<String, String> {
    let options = Options {
        compile: CompileOptions {
            allow_dangerous_html: true,
            ..CompileOptions::gfm()
        },
        ..Options::gfm()
    };

    markdown::to_html_with_options(md_text, &options).map_err(|e| e.reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let html = render_markdown("## Getting Started\n\nHello *there*.").unwrap();
        assert_eq!(html, "<h2>Getting Started</h2>\n<p>Hello <em>there</em>.</p>");
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = render_markdown("<div class=\"callout\">Careful</div>\n").unwrap();
        assert_eq!(html.trim_end(), "<div class=\"callout\">Careful</div>");

        let html = render_markdown("Inline <span>html</span> too").unwrap();
        assert_eq!(html, "<p>Inline <span>html</span> too</p>");
    }

    #[test]
    fn test_unclosed_constructs_are_literal() {
        let html = render_markdown("*not closed and [no link").unwrap();
        assert_eq!(html, "<p>*not closed and [no link</p>");
    }

    #[test]
    fn test_gfm_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
