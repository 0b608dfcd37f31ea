//! Document tree, HTML parsing, and the depth-first walk the renderer rides on.
//!
//! # Example
//!
//! ```
//! use mailtext::dom::parse;
//!
//! let doc = parse("<p>Hello, <b>World</b>!</p>");
//! let html = doc.children(doc.root()).next().unwrap();
//! let body = doc.children(html).nth(1).unwrap();
//! let p = doc.children(body).next().unwrap();
//! assert_eq!(doc.element_name(p).map(|n| n.as_ref()), Some("p"));
//! assert_eq!(doc.children(p).count(), 3);
//! ```

mod arena;
mod traverse;
mod tree_sink;

pub use arena::{Attribute, Children, Document, Node, NodeData, NodeId};
pub use traverse::{NodeVisitor, traverse};
pub use tree_sink::{DocumentSink, SinkHandle};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

/// Parse an HTML document.
///
/// Parsing never fails: malformed markup is recovered per the HTML parsing
/// algorithm, and fragments get an implied `html`/`head`/`body` skeleton.
pub fn parse(html: &str) -> Document {
    let sink = DocumentSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_document()
}
