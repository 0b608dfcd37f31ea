//! HTML to plain-text rendering.
//!
//! A [`Renderer`] parses the markup, walks the tree once with a fresh
//! [`FormattingVisitor`], and returns the text it accumulated. The visitor
//! makes its decisions on the way into a node (line breaks, indentation,
//! bullets) and on the way out (link targets, rules, cell separators), so the
//! text of descendants lands between the two without any lookahead.

mod accumulator;
mod visitor;

pub use accumulator::TextAccumulator;
pub use visitor::{FormattingVisitor, Tag};

use crate::config::RendererConfig;
use crate::dom::{self, Document, NodeId};

/// Converts HTML to the plain-text alternative of a mail body.
///
/// A renderer only holds its configuration; every call starts from scratch,
/// so one renderer can serve any number of threads.
///
/// ```
/// use mailtext::{Renderer, RendererConfig};
///
/// let config = RendererConfig::builder()
///     .line_ending("\n")
///     .include_hyperlink_urls(true)
///     .build()
///     .unwrap();
/// let renderer = Renderer::new(config);
///
/// let text = renderer.render(r#"<a href="mailto:x@y.com">Send mail!</a>"#);
/// assert_eq!(text, "Send mail! <mailto:x@y.com>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render an HTML string.
    pub fn render(&self, html: &str) -> String {
        tracing::debug!(bytes = html.len(), "parsing html");
        let doc = dom::parse(html);
        self.render_document(&doc)
    }

    /// Render raw bytes of unknown charset.
    ///
    /// See [`decode_html`](crate::util::decode_html) for how the charset is
    /// chosen.
    pub fn render_bytes(&self, html: &[u8]) -> String {
        let html = crate::util::decode_html(html);
        self.render(&html)
    }

    /// Render an already parsed document.
    pub fn render_document(&self, doc: &Document) -> String {
        self.render_node(doc, doc.root())
    }

    /// Render the subtree rooted at `root`.
    pub fn render_node(&self, doc: &Document, root: NodeId) -> String {
        let mut visitor = FormattingVisitor::new(&self.config);
        dom::traverse(doc, root, &mut visitor);
        let text = visitor.into_text();
        tracing::debug!(nodes = doc.len(), chars = text.len(), "rendered document");
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(RendererConfig::builder().line_ending("\n").build().unwrap())
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(renderer().render(""), "");
    }

    #[test]
    fn test_render_node_limits_output_to_subtree() {
        let doc = dom::parse("<p>skip</p><div id=\"x\"><b>keep</b> this</div>");
        let div = doc.find_by_tag("div").unwrap();

        assert_eq!(renderer().render_node(&doc, div), "keep this");
    }

    #[test]
    fn test_render_bytes_decodes_latin1() {
        assert_eq!(renderer().render_bytes(b"<p>caf\xE9</p>"), "\ncaf\u{e9}\n");
    }

    #[test]
    fn test_renders_are_independent() {
        let renderer = renderer();
        let first = renderer.render("<ol><li>a</li></ol>");
        let second = renderer.render("<ol><li>a</li></ol>");
        assert_eq!(first, second);
        assert_eq!(first, "\n1. a");
    }

    #[test]
    fn test_renderer_is_shareable_across_threads() {
        let renderer = std::sync::Arc::new(renderer());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let renderer = renderer.clone();
                std::thread::spawn(move || renderer.render(&format!("<p>thread {i}</p>")))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("\nthread {i}\n"));
        }
    }
}
