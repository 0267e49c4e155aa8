//! NETCONF `<rpc>` envelope parsing.
//!
//! Parsing is lenient: elements this crate does not understand are ignored,
//! and only malformed XML is an error.

use netconf_xml::{parse_fragments, ParseError, XmlNode};
use serde::Serialize;
use tracing::warn;

use crate::model::System;
use crate::selection::SystemSelection;

/// Configuration datastore named by `<target>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Datastore {
    #[default]
    Running,
    Candidate,
    Startup,
}

/// One parsed `<rpc>` message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcEnvelope {
    pub message_id: Option<String>,
    /// Operations in dispatch order: get, edit-config, delete-config.
    pub operations: Vec<RpcOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcOperation {
    Get(GetRequest),
    EditConfig(EditConfig),
    DeleteConfig(DeleteConfig),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetRequest {
    /// `type` attribute of `<filter>`, usually `subtree`.
    pub filter_type: Option<String>,
    pub selection: SystemSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditConfig {
    pub target: Datastore,
    /// `None` when `<config>` carries no `<system>` element.
    pub system: Option<System>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfig {
    pub target: Datastore,
}

impl RpcEnvelope {
    /// Build an envelope from an already parsed `<rpc>` element.
    pub fn from_node(root: &XmlNode) -> Self {
        if root.local_name() != "rpc" {
            warn!(root = %root.tag, "document root is not <rpc>; no operations read");
            return Self::default();
        }

        let mut operations = Vec::new();
        if let Some(get) = root.get_child("get") {
            operations.push(RpcOperation::Get(GetRequest::from_xml(get)));
        }
        if let Some(edit) = root.get_child("edit-config") {
            operations.push(RpcOperation::EditConfig(EditConfig::from_xml(edit)));
        }
        if let Some(delete) = root.get_child("delete-config") {
            operations.push(RpcOperation::DeleteConfig(DeleteConfig {
                target: target_of(delete),
            }));
        }

        Self {
            message_id: root.attribute("message-id").map(ToOwned::to_owned),
            operations,
        }
    }
}

impl GetRequest {
    fn from_xml(get: &XmlNode) -> Self {
        let Some(filter) = get.get_child("filter") else {
            return Self::default();
        };
        Self {
            filter_type: filter.attribute("type").map(ToOwned::to_owned),
            selection: SystemSelection::from_filter(filter),
        }
    }
}

impl EditConfig {
    fn from_xml(edit: &XmlNode) -> Self {
        Self {
            target: target_of(edit),
            system: edit
                .get_path(&["config", "system"])
                .map(System::from_xml),
        }
    }
}

fn target_of(operation: &XmlNode) -> Datastore {
    let Some(target) = operation.get_child("target") else {
        return Datastore::default();
    };
    match target.children.first().map(XmlNode::local_name) {
        Some("candidate") => Datastore::Candidate,
        Some("startup") => Datastore::Startup,
        Some("running") | None => Datastore::Running,
        Some(other) => {
            warn!(datastore = other, "unknown target datastore; using running");
            Datastore::Running
        }
    }
}

/// Split a document into its `<rpc>` messages, in document order.
///
/// `<rpc>` elements may be stacked at top level or wrapped in any container.
/// A document with no `<rpc>` element at all is returned as-is so the caller
/// can still report what it contains.
pub fn split_rpcs(xml: &str) -> Result<Vec<XmlNode>, ParseError> {
    let fragments = parse_fragments(xml.as_bytes())?;
    let mut rpcs = Vec::new();
    for fragment in &fragments {
        collect_rpcs(fragment, &mut rpcs);
    }
    if rpcs.is_empty() {
        return Ok(fragments);
    }
    Ok(rpcs)
}

fn collect_rpcs(node: &XmlNode, out: &mut Vec<XmlNode>) {
    if node.local_name() == "rpc" {
        out.push(node.clone());
        return;
    }
    for child in &node.children {
        collect_rpcs(child, out);
    }
}
