//! Get-filter synthesis from an applied edit.
//!
//! The filter is the edit's `<config>` content with edit-operation attributes
//! removed and every leaf value emptied, so the resulting `<get>` asks for
//! exactly the leaves that were written.

use netconf_xml::{parse, to_compact_string, ParseError, WriteError, XmlNode};
use thiserror::Error;

pub const NETCONF_BASE_NS: &str = "urn:ietf:params:xml:ns:netconf:base:1.0";

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("malformed edit document: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to render filter: {0}")]
    Write(#[from] WriteError),
}

/// The first `<config>` element of a document, if it has any content.
pub fn config_block(document: &XmlNode) -> Option<&XmlNode> {
    document
        .find_descendant("config")
        .filter(|config| !config.children.is_empty())
}

/// Build `<filter type="subtree">` from an edit document.
///
/// Returns `None` when the document has no `<config>` with content.
pub fn filter_from_document(document: &XmlNode) -> Option<XmlNode> {
    let config = config_block(document)?;
    let mut filter = XmlNode::new("filter");
    filter
        .attributes
        .insert("type".to_string(), "subtree".to_string());
    filter.children = config.children.iter().map(strip_values).collect();
    Some(filter)
}

fn strip_values(node: &XmlNode) -> XmlNode {
    XmlNode {
        tag: node.tag.clone(),
        attributes: node
            .attributes
            .iter()
            .filter(|(key, _)| netconf_xml::local_name(key) != "operation")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        children: node.children.iter().map(strip_values).collect(),
        text: None,
    }
}

/// Wrap a filter in `<rpc><get>…</get></rpc>`.
pub fn get_rpc(filter: XmlNode, message_id: Option<&str>) -> XmlNode {
    let mut rpc = XmlNode::new("rpc");
    rpc.attributes
        .insert("xmlns".to_string(), NETCONF_BASE_NS.to_string());
    if let Some(id) = message_id {
        rpc.attributes
            .insert("message-id".to_string(), id.to_string());
    }
    rpc.with_child(XmlNode::new("get").with_child(filter))
}

/// Parse an edit document and synthesize its filter.
pub fn synthesize_get_filter(xml: &str) -> Result<Option<XmlNode>, FilterError> {
    let document = parse(xml.as_bytes())?;
    Ok(filter_from_document(&document))
}

/// Synthesize the full `<get>` RPC for an edit document as compact XML text.
pub fn synthesize_get_rpc(xml: &str) -> Result<Option<String>, FilterError> {
    let document = parse(xml.as_bytes())?;
    let Some(filter) = filter_from_document(&document) else {
        return Ok(None);
    };
    let rpc = get_rpc(filter, document.attribute("message-id"));
    Ok(Some(to_compact_string(&rpc)?))
}
