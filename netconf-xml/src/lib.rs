//! Generic XML tree, parsing and writing primitives for NETCONF documents.
//!
//! Element and attribute names are stored exactly as written (`nc:rpc`,
//! `xc:operation`); lookups on [`XmlNode`] match on the local name so callers
//! never have to care which prefix a client chose.

pub mod parser;
pub mod tree;
pub mod writer;

pub use parser::{parse, parse_fragments, ParseError};
pub use tree::{local_name, XmlNode};
pub use writer::{to_compact_string, write, WriteError};
