//! Arena-allocated document tree.
//!
//! Nodes live in one contiguous vector and refer to each other by index, so
//! the tree can be walked in document order without recursion or reference
//! counting.

use html5ever::{LocalName, QualName};
use url::Url;

/// Index of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Payload of a node.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with its qualified name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Character data.
    Text(String),
    /// Comment, kept so the tree mirrors the source.
    Comment(String),
    /// `<!DOCTYPE ...>`.
    Doctype { name: String },
}

/// Element attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node and its links to the rest of the tree.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A parsed HTML document.
///
/// Build one with [`parse`](super::parse), or node by node through the
/// `create_*` and [`Document::append`] methods.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId::NONE,
        };
        doc.root = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        self.alloc(Node::new(NodeData::Element { name, attrs }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text.into())))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text.into())))
    }

    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype { name: name.into() }))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = last_child;
            node.next_sibling = NodeId::NONE;
        }

        if let Some(last) = self.get_mut(last_child) {
            last.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append character data to `parent`, extending its last child when that
    /// is already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// Unlink `id` from its parent and siblings. The node stays allocated.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Number of allocated nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        Children {
            doc: self,
            current: first,
        }
    }

    /// Parent of `id`, or `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_some)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node, in document order.
pub struct Children<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Element and text accessors.
impl Document {
    /// Local name of an element (`"p"`, `"li"`, ...).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }


    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Resolve a URL-valued attribute to an absolute URL.
    ///
    /// With a `base`, the value is joined against it. Without one, the value
    /// is returned as written if it is already absolute. Relative values that
    /// cannot be resolved yield `None`, as does a missing attribute.
    pub fn abs_url(&self, id: NodeId, attr_name: &str, base: Option<&Url>) -> Option<String> {
        let value = self.attr(id, attr_name)?.trim();
        match base {
            Some(base) => base.join(value).ok().map(String::from),
            None => Url::parse(value).ok().map(|_| value.to_string()),
        }
    }
}

/// Lookup helpers for tests.
#[cfg(test)]
impl Document {
    /// First element named `tag` in document order.
    pub(crate) fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|n| n.as_ref() == tag) {
                return Some(id);
            }
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use html5ever::ns;

    use super::*;

    fn qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    fn anchor(doc: &mut Document, href: &str) -> NodeId {
        let a = doc.create_element(
            qname("a"),
            vec![Attribute {
                name: qname("href"),
                value: href.to_string(),
            }],
        );
        doc.append(doc.root(), a);
        a
    }

    #[test]
    fn test_append_children() {
        let mut doc = Document::new();

        let ul = doc.create_element(qname("ul"), vec![]);
        let first = doc.create_element(qname("li"), vec![]);
        let second = doc.create_element(qname("li"), vec![]);

        doc.append(doc.root(), ul);
        doc.append(ul, first);
        doc.append(ul, second);

        let children: Vec<_> = doc.children(ul).collect();
        assert_eq!(children, vec![first, second]);
        assert_eq!(doc.parent(second), Some(ul));
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_text_merging() {
        let mut doc = Document::new();

        let p = doc.create_element(qname("p"), vec![]);
        doc.append(doc.root(), p);

        doc.append_text(p, "Hello, ");
        doc.append_text(p, "World!");

        let children: Vec<_> = doc.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.text(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_insert_before_and_detach() {
        let mut doc = Document::new();

        let p = doc.create_element(qname("p"), vec![]);
        doc.append(doc.root(), p);
        let b = doc.create_text("b");
        doc.append(p, b);
        let a = doc.create_text("a");
        doc.insert_before(b, a);

        let texts: Vec<_> = doc.children(p).filter_map(|c| doc.text(c)).collect();
        assert_eq!(texts, vec!["a", "b"]);

        doc.detach(a);
        let texts: Vec<_> = doc.children(p).filter_map(|c| doc.text(c)).collect();
        assert_eq!(texts, vec!["b"]);
        assert_eq!(doc.parent(a), None);
    }

    #[test]
    fn test_abs_url_without_base() {
        let mut doc = Document::new();
        let mail = anchor(&mut doc, "mailto:x@y.com");
        let relative = anchor(&mut doc, "/about");

        assert_eq!(
            doc.abs_url(mail, "href", None).as_deref(),
            Some("mailto:x@y.com")
        );
        assert_eq!(doc.abs_url(relative, "href", None), None);
        assert_eq!(doc.abs_url(relative, "src", None), None);
    }

    #[test]
    fn test_abs_url_with_base() {
        let mut doc = Document::new();
        let relative = anchor(&mut doc, "../about");
        let base = Url::parse("https://example.com/news/today.html").unwrap();

        assert_eq!(
            doc.abs_url(relative, "href", Some(&base)).as_deref(),
            Some("https://example.com/about")
        );
    }
}
