//! Envelope -> command sequence translation.

use netconf_xml::{parse, ParseError, XmlNode};
use thiserror::Error;
use tracing::{debug, info};

use crate::command::Command;
use crate::features::Operation;
use crate::registry::Registry;
use crate::rpc::{RpcEnvelope, RpcOperation};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("malformed rpc document: {0}")]
    Parse(#[from] ParseError),
    #[error("schema validation failed: {0}")]
    Schema(String),
    #[error("no supported operations found in rpc")]
    NoSupportedOperations,
}

/// Hook run against the parsed document before it is interpreted.
pub trait SchemaValidator {
    fn validate(&self, rpc: &XmlNode) -> Result<(), String>;
}

/// Accepts every document.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopValidator;

impl SchemaValidator for NoopValidator {
    fn validate(&self, _rpc: &XmlNode) -> Result<(), String> {
        Ok(())
    }
}

/// Coarse wipe issued for any `<delete-config>`, whatever its target.
const DELETE_CONFIG_PATH: &str = "/ip/address/remove";

pub struct Translator {
    registry: Registry,
    validator: Box<dyn SchemaValidator>,
}

impl Translator {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            validator: Box::new(NoopValidator),
        }
    }

    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Parse and translate a whole `<rpc>` document.
    ///
    /// Fails on malformed XML or when no command at all could be derived.
    /// Unsupported mappings come back as sentinel commands, not errors.
    pub fn translate(&self, xml: &str) -> Result<Vec<Command>, TranslateError> {
        let root = parse(xml.as_bytes())?;
        self.translate_node(&root)
    }

    pub fn translate_node(&self, root: &XmlNode) -> Result<Vec<Command>, TranslateError> {
        self.validator
            .validate(root)
            .map_err(TranslateError::Schema)?;
        let envelope = RpcEnvelope::from_node(root);
        self.translate_envelope(&envelope)
    }

    pub fn translate_envelope(
        &self,
        envelope: &RpcEnvelope,
    ) -> Result<Vec<Command>, TranslateError> {
        let mut cmds = Vec::new();
        for operation in &envelope.operations {
            match operation {
                RpcOperation::Get(get) => {
                    cmds.extend(self.registry.commands_for(Operation::Get(&get.selection)));
                }
                RpcOperation::EditConfig(edit) => {
                    if let Some(system) = &edit.system {
                        cmds.extend(self.registry.commands_for(Operation::Set(system)));
                    }
                }
                RpcOperation::DeleteConfig(delete) => {
                    debug!(datastore = ?delete.target, "delete-config maps to a full address wipe");
                    cmds.push(Command::exec(DELETE_CONFIG_PATH).word("[find]").into());
                }
            }
        }

        if cmds.is_empty() {
            return Err(TranslateError::NoSupportedOperations);
        }
        for cmd in &cmds {
            debug!(command = %cmd, "generated");
        }
        info!(
            message_id = envelope.message_id.as_deref().unwrap_or("-"),
            count = cmds.len(),
            "rpc translated"
        );
        Ok(cmds)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Registry::builtin())
    }
}

/// Translate with the built-in handlers and no schema validation.
pub fn translate(xml: &str) -> Result<Vec<Command>, TranslateError> {
    Translator::default().translate(xml)
}
