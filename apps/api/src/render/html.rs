//! HTML renderer for parsed program blocks.
//!
//! Class conventions match the display stylesheet: sized gray headings,
//! `list-disc` containers, `mb-4` paragraphs, and one dashed callout style
//! per tag (📸 blue, 🖼️ green, 📊 yellow).

use crate::render::parser::{parse, Block, CalloutKind};

/// Converts generated markdown straight to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    render_blocks(&parse(markdown))
}

/// Renders parsed blocks to an HTML fragment.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                let (tag, class) = match level {
                    1 => ("h1", "text-3xl font-bold mb-4 text-gray-800"),
                    2 => ("h2", "text-2xl font-semibold mb-3 text-gray-700"),
                    _ => ("h3", "text-xl font-medium mb-2 text-gray-600"),
                };
                html.push_str(&format!(
                    "<{tag} class=\"{class}\">{}</{tag}>",
                    render_inline(text)
                ));
            }
            Block::Paragraph(text) => {
                html.push_str(&format!(
                    "<p class=\"mb-4\">{}</p>",
                    render_inline(text)
                ));
            }
            Block::List(items) => {
                html.push_str("<ul class=\"list-disc list-inside mb-4 space-y-1\">");
                for item in items {
                    html.push_str(&format!(
                        "<li class=\"mb-1\">{}</li>",
                        render_inline(item)
                    ));
                }
                html.push_str("</ul>");
            }
            Block::Callout { kind, text } => {
                let (class, label) = match kind {
                    CalloutKind::Illustration => (
                        "bg-blue-50 border-2 border-dashed border-blue-300 p-4 mb-4 rounded-lg text-center text-blue-700",
                        "📸 Illustration :",
                    ),
                    CalloutKind::Image => (
                        "bg-green-50 border-2 border-dashed border-green-300 p-3 mb-3 rounded text-center text-green-700",
                        "🖼️ Image :",
                    ),
                    CalloutKind::Schema => (
                        "bg-yellow-50 border-2 border-dashed border-yellow-300 p-3 mb-3 rounded text-center text-yellow-700",
                        "📊 Schéma :",
                    ),
                };
                html.push_str(&format!(
                    "<div class=\"{class}\"><strong>{label}</strong> {}</div>",
                    escape_html(text)
                ));
            }
        }
    }
    html
}

/// Wraps a rendered fragment in a minimal printable page shell.
pub fn wrap_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Converts `**bold**` spans, then `*italic*` spans inside the remaining
/// segments. Markers only pair up; an unpaired marker stays literal.
fn render_inline(text: &str) -> String {
    let parts: Vec<&str> = text.split("**").collect();
    // Odd part count means every "**" was paired.
    let paired = parts.len() % 2 == 1;
    let last = parts.len() - 1;

    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 && (paired || i < last) {
            out.push_str("<strong class=\"font-semibold\">");
            out.push_str(&render_italic(part));
            out.push_str("</strong>");
        } else {
            if i % 2 == 1 {
                // Unpaired trailing opener stays literal.
                out.push_str("**");
            }
            out.push_str(&render_italic(part));
        }
    }
    out
}

fn render_italic(text: &str) -> String {
    let parts: Vec<&str> = text.split('*').collect();
    let paired = parts.len() % 2 == 1;
    let last = parts.len() - 1;

    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 && (paired || i < last) {
            out.push_str("<em class=\"italic\">");
            out.push_str(&escape_html(part));
            out.push_str("</em>");
        } else {
            if i % 2 == 1 {
                out.push('*');
            }
            out.push_str(&escape_html(part));
        }
    }
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_round_trip() {
        // The canonical subset sample: bold, italic, a two-item list, a callout.
        let html = markdown_to_html(
            "**bold** and *italic*\n\n- item one\n- item two\n\n[Image : a cat]",
        );
        assert!(html.contains("<strong class=\"font-semibold\">bold</strong>"));
        assert!(html.contains("<em class=\"italic\">italic</em>"));
        assert!(html.contains("<ul class=\"list-disc list-inside mb-4 space-y-1\">"));
        assert_eq!(html.matches("<li class=\"mb-1\">").count(), 2);
        assert!(html.contains("bg-green-50"));
        assert!(html.contains("a cat"));
    }

    #[test]
    fn test_heading_classes() {
        let html = markdown_to_html("# Programme\n## Jour 1\n### Lecture");
        assert!(html.contains("<h1 class=\"text-3xl font-bold mb-4 text-gray-800\">Programme</h1>"));
        assert!(html.contains("<h2 class=\"text-2xl font-semibold mb-3 text-gray-700\">Jour 1</h2>"));
        assert!(html.contains("<h3 class=\"text-xl font-medium mb-2 text-gray-600\">Lecture</h3>"));
    }

    #[test]
    fn test_callout_styles_are_distinct() {
        let html = markdown_to_html(
            "[Illustration : une ferme]\n\n[Image : un chat]\n\n[Schéma : la dizaine]",
        );
        assert!(html.contains("bg-blue-50") && html.contains("📸 Illustration :"));
        assert!(html.contains("bg-green-50") && html.contains("🖼️ Image :"));
        assert!(html.contains("bg-yellow-50") && html.contains("📊 Schéma :"));
    }

    #[test]
    fn test_no_empty_paragraphs_emitted() {
        let html = markdown_to_html("un\n\n\n\n\ndeux");
        assert!(!html.contains("<p class=\"mb-4\"></p>"));
        assert_eq!(html.matches("<p class=\"mb-4\">").count(), 2);
    }

    #[test]
    fn test_bold_inside_list_item() {
        let html = markdown_to_html("- **important** point");
        assert!(html
            .contains("<li class=\"mb-1\"><strong class=\"font-semibold\">important</strong> point</li>"));
    }

    #[test]
    fn test_unpaired_markers_stay_literal() {
        let html = markdown_to_html("a**b and c*d");
        assert!(!html.contains("<strong"));
        assert!(!html.contains("<em"));
        assert!(html.contains("a**b and c*d"));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let html = markdown_to_html("1 < 2 & 3 > 2");
        assert!(html.contains("1 &lt; 2 &amp; 3 &gt; 2"));
    }

    #[test]
    fn test_wrap_document_contains_fragment() {
        let page = wrap_document("Programme CP", "<p class=\"mb-4\">ok</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Programme CP</title>"));
        assert!(page.contains("<p class=\"mb-4\">ok</p>"));
    }
}
