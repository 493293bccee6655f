// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

// Arena-backed element tree. Detached nodes stay in the arena until the
// document is dropped; ids remain valid but `contains` reports false.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.append_child(root, body);
        doc
    }

    pub fn from_body_fragment(html: &str) -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        doc.set_inner_html(body, html);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_owned()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, kind });
        id
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { .. } => None,
            NodeKind::Text(text) => Some(text),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text(_) => &[],
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            if let Some(entry) = attributes.iter_mut().find(|(key, _)| key == name) {
                entry.1 = value.to_owned();
            } else {
                attributes.push((name.to_owned(), value.to_owned()));
            }
        }
    }

    // Panics when `child` is `parent` or one of its ancestors, or when
    // `parent` is a text node. Ids from another document are a logic error.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            !self.is_ancestor(child, parent),
            "cannot append a node into its own subtree"
        );
        self.detach(child);
        match &mut self.nodes[parent.0].kind {
            NodeKind::Element { children, .. } => children.push(child),
            NodeKind::Text(_) => panic!("text nodes cannot have children"),
        }
        self.nodes[child.0].parent = Some(parent);
    }

    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
            children.retain(|child| *child != id);
        }
        self.nodes[id.0].parent = None;
    }

    pub fn clear_children(&mut self, id: NodeId) {
        let children = match &mut self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => std::mem::take(children),
            NodeKind::Text(_) => return,
        };
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.is_ancestor(self.root, id)
    }

    fn is_ancestor(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    // Preorder traversal of the subtree below `id`, in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }

    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&node| self.attribute(node, "id") == Some(id_value))
    }

    pub fn first_by_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id).find(|&node| self.tag(node) == Some(tag))
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text(id) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    // Tolerant, like browser innerHTML: malformed markup degrades to text
    // or implicit closes rather than failing.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        self.clear_children(id);
        for parsed in parser::parse(html) {
            let node = self.build_parsed(parsed);
            self.append_child(id, node);
        }
    }

    fn build_parsed(&mut self, parsed: parser::ParsedNode) -> NodeId {
        match parsed {
            parser::ParsedNode::Text(text) => self.create_text(&text),
            parser::ParsedNode::Element {
                tag,
                attributes,
                children,
            } => {
                let element = self.create_element(&tag);
                for (name, value) in attributes {
                    self.set_attribute(element, &name, &value);
                }
                for child in children {
                    let built = self.build_parsed(child);
                    self.append_child(element, built);
                }
                element
            }
        }
    }

    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if is_void_element(tag) && children.is_empty() {
                    return;
                }
                for child in children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for child in self.doc.children(id).iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}

pub(crate) fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
