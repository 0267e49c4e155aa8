//! NETCONF / OpenConfig `system` RPCs translated into MikroTik RouterOS API
//! commands.
//!
//! A NETCONF client speaks in `<get>`, `<edit-config>` and `<delete-config>`
//! RPCs against the OpenConfig `system` model. RouterOS speaks in menu paths
//! with `key=value` arguments. This library bridges the two: it parses the
//! RPC envelope, hands each populated feature to its handler, and returns an
//! ordered list of commands that can be run over a RouterOS API session and
//! verified afterwards.
//!
//! # Architecture
//!
//! ## Translation
//!
//! - [`rpc`]: envelope parsing and multi-RPC document splitting
//! - [`model`] / [`selection`]: typed `system` tree and get-filter presence flags
//! - [`features`]: one handler per feature, registered through `inventory`
//! - [`registry`]: feature to handler dispatch table
//! - [`translate`]: envelope to command sequence, plus the schema hook
//! - [`command`]: command rendering, sentinel lines, tokenizing
//!
//! ## Device
//!
//! - [`session`]: the `DeviceSession` abstraction
//! - [`routeros`]: RouterOS API word codec and TCP session
//! - [`execute`]: strictly sequential execution, sentinels skipped
//!
//! ## Verification
//!
//! - [`verify`]: get-filter synthesis, value normalization, field comparison
//! - [`field_mappings`]: leaf name to device field table
//!
//! ## Reporting & configuration
//!
//! - [`report`]: colored terminal output and JSON shapes
//! - [`settings`]: `ros-netconf.toml` loading
//!
//! # Workflow
//!
//! 1. **Split** a document into its `<rpc>` messages
//! 2. **Translate** each into RouterOS commands
//! 3. **Execute** them in order over a session
//! 4. **Verify** the edit by reading back what it wrote
//!
//! # Examples
//!
//! ```ignore
//! use ros_netconf::translate::translate;
//!
//! let cmds = translate(r#"<rpc><edit-config><config><system>
//!     <hostname>router1</hostname>
//! </system></config></edit-config></rpc>"#)?;
//! assert_eq!(cmds[0].to_string(), r#"/system/identity/set name="router1""#);
//! ```
//!
//! # Built on netconf-xml
//!
//! XML parsing and writing live in `netconf-xml`; everything RouterOS- and
//! OpenConfig-specific is in this crate.

pub mod command;
pub mod execute;
pub mod features;
pub mod field_mappings;
pub mod model;
pub mod registry;
pub mod report;
pub mod routeros;
pub mod rpc;
pub mod selection;
pub mod session;
pub mod settings;
pub mod translate;
pub mod verify;
