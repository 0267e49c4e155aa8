use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while writing XML from an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize XML bytes.
    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Serialized bytes were not valid UTF-8.
    #[error("written XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize an [`XmlNode`] tree into indented XML bytes.
pub fn write(node: &XmlNode) -> Result<Vec<u8>, WriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_node(&mut writer, node)?;
    Ok(writer.into_inner())
}

/// Serialize an [`XmlNode`] tree on a single line with no added whitespace.
pub fn to_compact_string(node: &XmlNode) -> Result<String, WriteError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, node)?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(node.tag.as_str());

    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;

    if let Some(text) = &node.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }

    for child in &node.children {
        write_node(writer, child)?;
    }

    writer.write_event(Event::End(BytesEnd::new(node.tag.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::to_compact_string;
    use crate::XmlNode;

    #[test]
    fn compact_output_escapes_text_and_collapses_empty_leaves() {
        let node = XmlNode::new("system")
            .with_child(XmlNode::leaf("hostname", "a<b"))
            .with_child(XmlNode::new("clock"));

        assert_eq!(
            to_compact_string(&node).expect("write"),
            "<system><hostname>a&lt;b</hostname><clock/></system>"
        );
    }
}
