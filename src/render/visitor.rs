//! Tag dispatch: decides what each node contributes to the text.

use crate::config::RendererConfig;
use crate::dom::{Document, NodeId, NodeVisitor};

use super::accumulator::TextAccumulator;

/// Elements the formatter reacts to. Everything else is [`Tag::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Anchor,
    Image,
    OrderedList,
    UnorderedList,
    DefinitionList,
    ListItem,
    DefinitionTerm,
    DefinitionDescription,
    HorizontalRule,
    Blockquote,
    Paragraph,
    Heading,
    TableRow,
    TableCell,
    LineBreak,
    /// `script` and `style`: their text is data, not content.
    RawText,
    Other,
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        match name {
            "a" => Tag::Anchor,
            "img" => Tag::Image,
            "ol" => Tag::OrderedList,
            "ul" => Tag::UnorderedList,
            "dl" => Tag::DefinitionList,
            "li" => Tag::ListItem,
            "dt" => Tag::DefinitionTerm,
            "dd" => Tag::DefinitionDescription,
            "hr" => Tag::HorizontalRule,
            "blockquote" => Tag::Blockquote,
            "p" => Tag::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Tag::Heading,
            "tr" => Tag::TableRow,
            "th" | "td" => Tag::TableCell,
            "br" => Tag::LineBreak,
            "script" | "style" => Tag::RawText,
            _ => Tag::Other,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(
            self,
            Tag::OrderedList | Tag::UnorderedList | Tag::DefinitionList
        )
    }
}

/// What the formatter sees when it looks at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind<'d> {
    Text(&'d str),
    Element(Tag),
    Other,
}

fn classify(doc: &Document, id: NodeId) -> NodeKind<'_> {
    if let Some(text) = doc.text(id) {
        NodeKind::Text(text)
    } else if let Some(name) = doc.element_name(id) {
        NodeKind::Element(Tag::from_name(name))
    } else {
        NodeKind::Other
    }
}

fn tag_of(doc: &Document, id: Option<NodeId>) -> Tag {
    id.and_then(|id| doc.element_name(id))
        .map(|name| Tag::from_name(name))
        .unwrap_or(Tag::Other)
}

/// An open list container.
#[derive(Debug)]
struct OpenList {
    id: NodeId,
    items: usize,
}

/// Per-render formatting state.
///
/// Holds the output and the stack of open list containers; the stack's
/// height minus one is the list nesting depth, so the outermost list is at
/// depth 0. One instance serves exactly one render.
#[derive(Debug)]
pub struct FormattingVisitor<'c> {
    config: &'c RendererConfig,
    out: TextAccumulator<'c>,
    lists: Vec<OpenList>,
}

impl<'c> FormattingVisitor<'c> {
    pub fn new(config: &'c RendererConfig) -> Self {
        Self {
            config,
            out: TextAccumulator::new(config),
            lists: Vec::new(),
        }
    }

    pub fn into_text(self) -> String {
        self.out.into_string()
    }

    /// Current list nesting depth, `None` outside any list.
    fn list_depth(&self) -> Option<usize> {
        self.lists.len().checked_sub(1)
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.config.list_indent_size())
    }

    fn normalize_text(&self, text: &str) -> String {
        let mut normalized = String::with_capacity(text.len());
        let mut in_space = false;
        for c in text.chars() {
            let c = if c == '\u{a0}' && self.config.convert_non_breaking_spaces() {
                ' '
            } else {
                c
            };
            if c.is_ascii_whitespace() {
                if !in_space {
                    normalized.push(' ');
                }
                in_space = true;
            } else {
                normalized.push(c);
                in_space = false;
            }
        }
        normalized
    }

    fn enter_text(&mut self, doc: &Document, id: NodeId, text: &str) {
        if tag_of(doc, doc.parent(id)) == Tag::RawText {
            return;
        }
        let text = self.normalize_text(text);
        self.out.append(&text);
    }

    fn enter_list_item(&mut self, doc: &Document, id: NodeId) {
        self.out.line_break();

        let Some(parent) = doc.parent(id) else {
            return;
        };
        let Some(depth) = self.list_depth() else {
            return;
        };

        match tag_of(doc, Some(parent)) {
            Tag::UnorderedList => {
                let marker = format!("{}{} ", self.indent(depth), self.config.bullet(depth));
                self.out.append(&marker);
            }
            Tag::OrderedList => {
                let Some(list) = self.lists.iter_mut().rev().find(|l| l.id == parent) else {
                    return;
                };
                list.items += 1;
                let ordinal = list.items;
                let marker = format!("{}{ordinal}. ", self.indent(depth));
                self.out.append(&marker);
            }
            _ => {}
        }
    }

    /// Annotate only links that resolve; a missing or unresolvable `href`
    /// writes nothing rather than an empty ` <>`.
    fn exit_anchor(&mut self, doc: &Document, id: NodeId) {
        if !self.config.include_hyperlink_urls() {
            return;
        }
        if let Some(url) = doc.abs_url(id, "href", self.config.base_url()) {
            self.out.append(&format!(" <{url}>"));
        }
    }
}

impl NodeVisitor for FormattingVisitor<'_> {
    fn enter(&mut self, doc: &Document, id: NodeId, _depth: usize) {
        let tag = match classify(doc, id) {
            NodeKind::Text(text) => {
                self.enter_text(doc, id, text);
                return;
            }
            NodeKind::Element(tag) => tag,
            NodeKind::Other => return,
        };

        match tag {
            Tag::Image => {
                if self.config.include_alt_text()
                    && let Some(alt) = doc.attr(id, "alt")
                {
                    self.out.append(&format!("[{alt}]"));
                }
            }
            tag if tag.is_list() => self.lists.push(OpenList { id, items: 0 }),
            Tag::ListItem => self.enter_list_item(doc, id),
            Tag::DefinitionDescription => {
                if let Some(depth) = self.list_depth() {
                    let indent = self.indent(depth);
                    self.out.append(&indent);
                }
            }
            Tag::HorizontalRule
            | Tag::Blockquote
            | Tag::Paragraph
            | Tag::Heading
            | Tag::TableRow => self.out.line_break(),
            _ => {}
        }
    }

    fn exit(&mut self, doc: &Document, id: NodeId, _depth: usize) {
        let NodeKind::Element(tag) = classify(doc, id) else {
            return;
        };

        match tag {
            Tag::LineBreak
            | Tag::DefinitionDescription
            | Tag::DefinitionTerm
            | Tag::Paragraph
            | Tag::Heading => self.out.line_break(),
            tag if tag.is_list() => {
                self.lists.pop();
            }
            Tag::HorizontalRule => {
                let rule = "-".repeat(self.config.hr_line_length());
                self.out.append(&rule);
                self.out.line_break();
            }
            Tag::Anchor => self.exit_anchor(doc, id),
            Tag::TableCell => {
                let separator = self.config.table_cell_separator();
                self.out.append(separator);
            }
            _ => {}
        }
    }
}
