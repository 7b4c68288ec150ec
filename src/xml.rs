//! Arena-based element/text tree with XML serialization.
//!
//! The speech builder composes into this generic tree; nothing in here knows
//! about SSML. Nodes are stored in a contiguous vector and referenced by
//! index, so child scopes can hold plain `NodeId` handles instead of shared
//! pointers into the tree.

use quick_xml::escape::escape;

/// Unique identifier for a node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Node payload: an element with attributes, or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        name: String,
        /// Attributes in insertion order. Setting an existing name replaces
        /// its value in place.
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    children: Vec<NodeId>,
}

/// An in-memory markup tree with a single root element.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document whose root element has the given name.
    pub fn new(root_name: &str) -> Self {
        let root = Node {
            data: NodeData::Element {
                name: root_name.to_string(),
                attrs: Vec::new(),
            },
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            children: Vec::new(),
        });
        id
    }

    /// Append a child element under `parent` and return its id.
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.alloc(NodeData::Element {
            name: name.to_string(),
            attrs: Vec::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Append a text node under `parent` and return its id.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeData::Text(text.to_string()));
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Set an attribute on an element, replacing any existing value.
    ///
    /// No-op on text nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[id.0 as usize].data {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Ordered child list of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].children.last().copied()
    }

    /// Element name, or `None` for text nodes.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0 as usize].data {
            NodeData::Element { name, .. } => Some(name),
            NodeData::Text(_) => None,
        }
    }

    /// Text content, or `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0 as usize].data {
            NodeData::Text(t) => Some(t),
            NodeData::Element { .. } => None,
        }
    }

    /// Serialize the tree to markup text.
    ///
    /// Elements without children are written self-closing. With `pretty`,
    /// element-only content is indented; mixed content (any text child)
    /// stays inline so rendered whitespace is unaffected.
    pub fn render(&self, pretty: bool) -> String {
        let mut out = String::new();
        self.write_node(self.root, 0, pretty, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, pretty: bool, out: &mut String) {
        let node = &self.nodes[id.0 as usize];
        match &node.data {
            NodeData::Text(t) => out.push_str(&escape(t.as_str())),
            NodeData::Element { name, attrs } => {
                out.push('<');
                out.push_str(name);
                for (attr, value) in attrs {
                    out.push(' ');
                    out.push_str(attr);
                    out.push_str("=\"");
                    out.push_str(&escape(value.as_str()));
                    out.push('"');
                }
                if node.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                let indent = pretty
                    && node
                        .children
                        .iter()
                        .all(|&c| matches!(self.nodes[c.0 as usize].data, NodeData::Element { .. }));
                if indent {
                    for &child in &node.children {
                        out.push('\n');
                        out.push_str(&"  ".repeat(depth + 1));
                        self.write_node(child, depth + 1, pretty, out);
                    }
                    out.push('\n');
                    out.push_str(&"  ".repeat(depth));
                } else {
                    for &child in &node.children {
                        self.write_node(child, depth, pretty, out);
                    }
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}
