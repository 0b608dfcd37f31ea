//! Depth-first document walk.

use super::arena::{Document, NodeId};

/// Callbacks for [`traverse`].
///
/// `enter` runs before a node's children are visited, `exit` after.
/// `depth` counts edges from the node the walk started at.
pub trait NodeVisitor {
    fn enter(&mut self, doc: &Document, id: NodeId, depth: usize);
    fn exit(&mut self, doc: &Document, id: NodeId, depth: usize);
}

/// Walk the subtree rooted at `root` in document order.
///
/// Iterative, so arbitrarily deep trees do not grow the call stack. Every node
/// of the subtree is entered and exited exactly once.
pub fn traverse<V: NodeVisitor>(doc: &Document, root: NodeId, visitor: &mut V) {
    if doc.get(root).is_none() {
        return;
    }

    let mut node = root;
    let mut depth = 0usize;

    loop {
        visitor.enter(doc, node, depth);

        let first_child = doc.get(node).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        if first_child.is_some() {
            node = first_child;
            depth += 1;
            continue;
        }

        // Climb until a node with a next sibling is found, exiting as we go.
        loop {
            visitor.exit(doc, node, depth);
            if node == root {
                return;
            }
            let (next, parent) = match doc.get(node) {
                Some(n) => (n.next_sibling, n.parent),
                None => return,
            };
            if next.is_some() {
                node = next;
                break;
            }
            if parent.is_none() {
                return;
            }
            node = parent;
            depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn label(doc: &Document, id: NodeId) -> String {
            if let Some(name) = doc.element_name(id) {
                name.to_string()
            } else if let Some(text) = doc.text(id) {
                format!("'{text}'")
            } else {
                "#".to_string()
            }
        }
    }

    impl NodeVisitor for Recorder {
        fn enter(&mut self, doc: &Document, id: NodeId, depth: usize) {
            self.events.push(format!("+{}@{depth}", Self::label(doc, id)));
        }

        fn exit(&mut self, doc: &Document, id: NodeId, depth: usize) {
            self.events.push(format!("-{}@{depth}", Self::label(doc, id)));
        }
    }

    #[test]
    fn test_enter_exit_order() {
        let doc = parse("<ul><li>a</li><li>b</li></ul>");
        let ul = doc.find_by_tag("ul").unwrap();

        let mut recorder = Recorder::default();
        traverse(&doc, ul, &mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "+ul@0", "+li@1", "+'a'@2", "-'a'@2", "-li@1", "+li@1", "+'b'@2", "-'b'@2",
                "-li@1", "-ul@0",
            ]
        );
    }

    #[test]
    fn test_walk_stays_inside_subtree() {
        let doc = parse("<p>one</p><p>two</p>");
        let first = doc.find_by_tag("p").unwrap();

        let mut recorder = Recorder::default();
        traverse(&doc, first, &mut recorder);

        assert_eq!(recorder.events, vec!["+p@0", "+'one'@1", "-'one'@1", "-p@0"]);
    }

    #[test]
    fn test_every_node_visited_once() {
        let doc = parse("<div><p>x<b>y</b></p><hr><p>z</p></div>");

        let mut recorder = Recorder::default();
        traverse(&doc, doc.root(), &mut recorder);

        let enters = recorder.events.iter().filter(|e| e.starts_with('+')).count();
        let exits = recorder.events.iter().filter(|e| e.starts_with('-')).count();
        assert_eq!(enters, doc.len());
        assert_eq!(exits, doc.len());
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..100_000 {
            let div = doc.create_element(
                html5ever::QualName::new(None, html5ever::ns!(html), "div".into()),
                vec![],
            );
            doc.append(parent, div);
            parent = div;
        }

        let mut recorder = Recorder::default();
        traverse(&doc, doc.root(), &mut recorder);
        assert_eq!(recorder.events.len(), doc.len() * 2);
    }
}
