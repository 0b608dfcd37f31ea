//! html5ever `TreeSink` that builds a [`Document`].

use std::borrow::Cow;
use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{Attribute, Document, NodeData, NodeId};

/// Handle the tree builder uses to refer to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkHandle(pub NodeId);

impl Default for SinkHandle {
    fn default() -> Self {
        SinkHandle(NodeId::NONE)
    }
}

/// Builds a [`Document`] while html5ever tokenizes.
///
/// `TreeSink` methods take `&self`, so the document sits behind a `RefCell`.
pub struct DocumentSink {
    doc: RefCell<Document>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for DocumentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSink {
    pub fn new() -> Self {
        Self {
            doc: RefCell::new(Document::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    pub fn into_document(self) -> Document {
        self.doc.into_inner()
    }

    fn append_to(&self, parent: NodeId, child: NodeOrText<SinkHandle>) {
        let mut doc = self.doc.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => doc.append(parent, node.0),
            NodeOrText::AppendText(text) => doc.append_text(parent, &text),
        }
    }
}

impl TreeSink for DocumentSink {
    type Handle = SinkHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // Markup errors are recovered the way browsers recover them.
    }

    fn get_document(&self) -> Self::Handle {
        SinkHandle(self.doc.borrow().root())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let doc = self.doc.borrow();
        match doc.get(target.0).map(|n| &n.data) {
            // SAFETY: the name lives in the document owned by `self`, and the
            // tree builder drops the reference before the next mutation.
            Some(NodeData::Element { name, .. }) => unsafe {
                std::mem::transmute::<&QualName, &'a QualName>(name)
            },
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        SinkHandle(self.doc.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        SinkHandle(self.doc.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        SinkHandle(self.doc.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.append_to(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.doc.borrow().parent(element.0);
        match parent {
            Some(parent) => self.append_to(parent, child),
            None => self.append_to(prev_element.0, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut doc = self.doc.borrow_mut();
        let root = doc.root();
        let doctype = doc.create_doctype(name.to_string());
        doc.append(root, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents stay inline; they render like any other subtree.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut doc = self.doc.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => doc.insert_before(sibling.0, node.0),
            NodeOrText::AppendText(text) => {
                let text_node = doc.create_text(text.to_string());
                doc.insert_before(sibling.0, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.get_mut(target.0)
            && let NodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(Attribute {
                        name: attr.name,
                        value: attr.value.to_string(),
                    });
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.doc.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let children: Vec<_> = self.doc.borrow().children(node.0).collect();
        let mut doc = self.doc.borrow_mut();
        for child in children {
            doc.detach(child);
            doc.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    #[test]
    fn test_basic_parse() {
        let doc = parse("<html><body><p>Hello</p></body></html>");

        let p = doc.find_by_tag("p").expect("should find p");
        let text = doc.children(p).next().expect("p should have child");
        assert_eq!(doc.text(text), Some("Hello"));
    }

    #[test]
    fn test_fragment_gets_implied_structure() {
        let doc = parse("plain <b>bold</b>");

        assert!(doc.find_by_tag("html").is_some());
        let body = doc.find_by_tag("body").expect("body is implied");
        let first = doc.children(body).next().expect("body has content");
        assert_eq!(doc.text(first), Some("plain "));
    }

    #[test]
    fn test_attributes() {
        let doc = parse(r#"<img src="s.gif" alt="Smiley face">"#);

        let img = doc.find_by_tag("img").expect("should find img");
        assert_eq!(doc.attr(img, "alt"), Some("Smiley face"));
        assert_eq!(doc.attr(img, "title"), None);
    }

    #[test]
    fn test_stray_void_end_tag_is_dropped() {
        let doc = parse("BEFORE HR <HR>IN HR</HR> AFTER HR");

        let hr = doc.find_by_tag("hr").expect("should find hr");
        assert!(doc.children(hr).next().is_none());
        let after = doc.get(hr).map(|n| n.next_sibling).expect("hr exists");
        assert_eq!(doc.text(after), Some("IN HR AFTER HR"));
    }

    #[test]
    fn test_list_items_share_parent() {
        let doc = parse("<ol><li>one<li>two</ol>");

        let ol = doc.find_by_tag("ol").expect("should find ol");
        let items: Vec<_> = doc
            .children(ol)
            .filter(|&c| doc.element_name(c).is_some_and(|n| n.as_ref() == "li"))
            .collect();
        assert_eq!(items.len(), 2);
    }
}
