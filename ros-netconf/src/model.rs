//! Typed view of the OpenConfig `system` subtree.
//!
//! Every leaf is an `Option`: `None` means the element was not in the
//! document, `Some("")` means it was present but empty. Branches follow the
//! same rule, so `ntp: Some(Ntp::default())` is a present `<ntp/>` with no
//! leaves set.

use netconf_xml::XmlNode;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct System {
    pub hostname: Option<String>,
    pub clock: Option<Clock>,
    pub ntp: Option<Ntp>,
    pub dns: Option<Dns>,
    pub aaa: Option<Aaa>,
    pub logging: Option<Logging>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Clock {
    pub timezone_name: Option<String>,
    pub timezone_utc_offset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ntp {
    pub enabled: Option<bool>,
    pub servers: Vec<NtpServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NtpServer {
    pub address: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dns {
    pub servers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aaa {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Logging {
    pub console: Option<LoggingConsole>,
    pub remote_servers: Vec<RemoteServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoggingConsole {
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoteServer {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub severity: Option<String>,
}

impl System {
    /// Build the typed tree from a `<system>` element. Unknown children are
    /// ignored.
    pub fn from_xml(node: &XmlNode) -> Self {
        Self {
            hostname: leaf(node, "hostname"),
            clock: node.get_child("clock").map(Clock::from_xml),
            ntp: node.get_child("ntp").map(Ntp::from_xml),
            dns: node.get_child("dns").map(Dns::from_xml),
            aaa: node.get_child("aaa").map(Aaa::from_xml),
            logging: node.get_child("logging").map(Logging::from_xml),
        }
    }
}

impl Clock {
    fn from_xml(node: &XmlNode) -> Self {
        Self {
            timezone_name: leaf(node, "timezone-name"),
            timezone_utc_offset: leaf(node, "timezone-utc-offset"),
        }
    }
}

impl Ntp {
    fn from_xml(node: &XmlNode) -> Self {
        Self {
            enabled: bool_leaf(node, "enabled"),
            servers: list(node, "servers", "server")
                .map(|server| NtpServer {
                    address: leaf(server, "address"),
                    port: port_leaf(server, "port"),
                })
                .collect(),
        }
    }
}

impl Dns {
    fn from_xml(node: &XmlNode) -> Self {
        Self {
            servers: list(node, "servers", "server").map(text_of).collect(),
        }
    }
}

impl Aaa {
    fn from_xml(node: &XmlNode) -> Self {
        let users = node
            .get_path(&["authentication", "users"])
            .map(|users| {
                users
                    .get_children("user")
                    .into_iter()
                    .map(|user| User {
                        username: leaf(user, "username"),
                        password: leaf(user, "password"),
                        role: leaf(user, "role"),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { users }
    }
}

impl Logging {
    fn from_xml(node: &XmlNode) -> Self {
        Self {
            console: node.get_child("console").map(|console| LoggingConsole {
                severity: leaf(console, "severity"),
            }),
            remote_servers: list(node, "remote-servers", "remote-server")
                .map(|server| RemoteServer {
                    host: leaf(server, "host"),
                    port: port_leaf(server, "port"),
                    severity: leaf(server, "severity"),
                })
                .collect(),
        }
    }
}

/// Parse a boolean leaf token the way OpenConfig clients spell them.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn text_of(node: &XmlNode) -> String {
    node.text.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn leaf(node: &XmlNode, tag: &str) -> Option<String> {
    node.get_child(tag).map(text_of)
}

fn bool_leaf(node: &XmlNode, tag: &str) -> Option<bool> {
    let raw = leaf(node, tag)?;
    let parsed = parse_bool(&raw);
    if parsed.is_none() {
        warn!(leaf = tag, value = %raw, "ignoring non-boolean leaf value");
    }
    parsed
}

fn port_leaf(node: &XmlNode, tag: &str) -> Option<u16> {
    let raw = leaf(node, tag)?;
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(leaf = tag, value = %raw, "ignoring out-of-range port value");
            None
        }
    }
}

/// Iterate `<container><item/>...</container>` entries in document order.
fn list<'a>(
    node: &'a XmlNode,
    container: &str,
    item: &'a str,
) -> impl Iterator<Item = &'a XmlNode> + 'a {
    node.get_child(container)
        .into_iter()
        .flat_map(move |c| c.get_children(item))
}
