//! Generic labeled XML tree and the read-only view the renderers work against.
//!
//! This module defines:
//! - [`XmlNode`]: the immutable interface every renderer is written against
//! - [`XmlTree`]: the owned tree produced by [`crate::feed::parse_feed`]
//! - [`find_child`] / [`first_child_label`]: direct-child lookups by tag name
//!
//! A node is either a *tag* (name, attributes, ordered children) or a *text*
//! node whose label is the literal text. Lookups compare labels only, so the
//! tag/text distinction matters to callers, not to [`find_child`].

/// Read-only access to a labeled tree node.
///
/// Renderers are generic over this trait so they never depend on how the
/// tree was built.
pub trait XmlNode {
    /// `true` for element nodes, `false` for text nodes.
    fn is_tag(&self) -> bool;

    /// Tag name for element nodes, the text itself for text nodes.
    fn label(&self) -> &str;

    /// Child at `index`, in document order.
    fn child(&self, index: usize) -> Option<&Self>;

    fn number_of_children(&self) -> usize;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute_value(name).is_some()
    }

    /// Value of the first attribute called `name`. Always `None` on text nodes.
    fn attribute_value(&self, name: &str) -> Option<&str>;

    /// Direct children in document order.
    fn children(&self) -> impl Iterator<Item = &Self> {
        (0..self.number_of_children()).filter_map(move |i| self.child(i))
    }
}

/// An owned XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlTree {
    Tag {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<XmlTree>,
    },
    Text(String),
}

impl XmlTree {
    /// An element with no attributes and no children.
    pub fn tag(name: impl Into<String>) -> Self {
        XmlTree::Tag {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        XmlTree::Text(text.into())
    }

    /// Shorthand for `<name>text</name>`.
    pub fn element(name: impl Into<String>, text: impl Into<String>) -> Self {
        XmlTree::tag(name).with_child(XmlTree::text(text))
    }

    /// Appends a child. Text nodes cannot hold children; the call is a no-op there.
    pub fn with_child(mut self, child: XmlTree) -> Self {
        if let XmlTree::Tag { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Appends an attribute. No-op on text nodes.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let XmlTree::Tag { attributes, .. } = &mut self {
            attributes.push((name.into(), value.into()));
        }
        self
    }
}

impl XmlNode for XmlTree {
    fn is_tag(&self) -> bool {
        matches!(self, XmlTree::Tag { .. })
    }

    fn label(&self) -> &str {
        match self {
            XmlTree::Tag { name, .. } => name,
            XmlTree::Text(text) => text,
        }
    }

    fn child(&self, index: usize) -> Option<&Self> {
        match self {
            XmlTree::Tag { children, .. } => children.get(index),
            XmlTree::Text(_) => None,
        }
    }

    fn number_of_children(&self) -> usize {
        match self {
            XmlTree::Tag { children, .. } => children.len(),
            XmlTree::Text(_) => 0,
        }
    }

    fn attribute_value(&self, name: &str) -> Option<&str> {
        match self {
            XmlTree::Tag { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            XmlTree::Text(_) => None,
        }
    }
}

/// Index of the first direct child of `node` labeled `tag`, or `None`.
///
/// Grandchildren are never examined. `node` must be a tag node.
pub fn find_child<N: XmlNode>(node: &N, tag: &str) -> Option<usize> {
    debug_assert!(node.is_tag(), "find_child called on a text node");
    node.children().position(|child| child.label() == tag)
}

/// Label of the first child of `node`, typically the element's text.
pub fn first_child_label<N: XmlNode>(node: &N) -> Option<&str> {
    node.child(0).map(XmlNode::label)
}
