use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// A generic XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name as written, including any namespace prefix.
    pub tag: String,
    /// Attributes keyed by their qualified name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Direct text content, `None` when the element has no non-blank text.
    pub text: Option<String>,
}

/// Strip a namespace prefix from a qualified name (`oc:system` -> `system`).
pub fn local_name(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map_or(qualified, |(_, local)| local)
}

impl XmlNode {
    /// Create a new element with no attributes, children, or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a leaf element holding `text`.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(tag);
        node.text = Some(text.into());
        node
    }

    /// Append a child and return `self`, for building trees inline.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Element name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.tag)
    }

    /// Return the first child whose local name is `tag`.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.local_name() == tag)
    }

    /// Return all children whose local name is `tag`.
    pub fn get_children(&self, tag: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.local_name() == tag)
            .collect()
    }

    /// Walk a nested child path and return the terminal node if found.
    pub fn get_path<'a>(&'a self, path: &[&str]) -> Option<&'a XmlNode> {
        let mut current = self;
        for segment in path {
            current = current.get_child(segment)?;
        }
        Some(current)
    }

    /// Depth-first search for the first element (self included) named `tag`.
    pub fn find_descendant(&self, tag: &str) -> Option<&XmlNode> {
        if self.local_name() == tag {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_descendant(tag))
    }

    /// Return the value of the first attribute whose local name is `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{value}\"")?;
        }

        if self.children.is_empty() && self.text.is_none() {
            return write!(f, "/>");
        }

        write!(f, ">")?;
        if let Some(text) = &self.text {
            write!(f, "{text}")?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{local_name, XmlNode};

    #[test]
    fn get_path_walks_nested_children() {
        let root = XmlNode::new("system")
            .with_child(XmlNode::new("clock").with_child(XmlNode::leaf("timezone-name", "UTC")));

        let tz = root.get_path(&["clock", "timezone-name"]).expect("timezone-name");
        assert_eq!(tz.text.as_deref(), Some("UTC"));
        assert!(root.get_path(&["clock", "missing"]).is_none());
    }

    #[test]
    fn lookups_ignore_namespace_prefix() {
        let root = XmlNode::new("nc:rpc").with_child(XmlNode::new("nc:get"));

        assert_eq!(root.local_name(), "rpc");
        assert!(root.get_child("get").is_some());
        assert_eq!(local_name("plain"), "plain");
    }

    #[test]
    fn find_descendant_searches_depth_first() {
        let root = XmlNode::new("rpc").with_child(
            XmlNode::new("edit-config")
                .with_child(XmlNode::new("target"))
                .with_child(XmlNode::new("config").with_child(XmlNode::new("system"))),
        );

        let config = root.find_descendant("config").expect("config");
        assert_eq!(config.children.len(), 1);
        assert!(root.find_descendant("absent").is_none());
    }

    #[test]
    fn attribute_matches_local_name() {
        let mut node = XmlNode::new("hostname");
        node.attributes
            .insert("xc:operation".to_string(), "merge".to_string());

        assert_eq!(node.attribute("operation"), Some("merge"));
        assert_eq!(node.to_string(), r#"<hostname xc:operation="merge"/>"#);
    }
}
