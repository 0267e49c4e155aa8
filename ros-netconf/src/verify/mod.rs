//! Post-apply verification: read back what an edit wrote and compare.

pub mod compare;
pub mod filter;

use std::thread;
use std::time::Duration;

use netconf_xml::{parse, XmlNode};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::execute::{query, ExecuteError};
use crate::field_mappings::FieldMap;
use crate::session::{DeviceSession, Row};
use crate::translate::{TranslateError, Translator};

pub use compare::{compare, expected_values, normalize_value, FieldCheck, Outcome};
pub use filter::{
    config_block, filter_from_document, get_rpc, synthesize_get_filter, synthesize_get_rpc,
    FilterError,
};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("failed to translate verification query: {0}")]
    Translate(#[from] TranslateError),
    #[error("verification query failed: {0}")]
    Query(#[from] ExecuteError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "checks", rename_all = "lowercase")]
pub enum VerificationOutcome {
    /// Nothing in the edit could be read back.
    Skipped,
    Checked(Vec<FieldCheck>),
}

impl VerificationOutcome {
    pub fn checks(&self) -> &[FieldCheck] {
        match self {
            Self::Skipped => &[],
            Self::Checked(checks) => checks,
        }
    }

    /// Checks that did not match, missing fields included.
    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks()
            .iter()
            .filter(|check| check.outcome != Outcome::Match)
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);

pub struct Verifier {
    translator: Translator,
    fields: FieldMap,
    settle_delay: Duration,
}

impl Verifier {
    pub fn new(fields: FieldMap) -> Self {
        Self {
            translator: Translator::default(),
            fields,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Re-read the leaves written by `edit_xml` and compare them.
    ///
    /// Each executable read command runs once; the first row of every reply
    /// is merged, earlier commands winning on shared field names. A device
    /// that returns no rows leaves every expected field `Missing`.
    pub fn verify<S: DeviceSession + ?Sized>(
        &self,
        session: &mut S,
        edit_xml: &str,
    ) -> Result<VerificationOutcome, VerifyError> {
        let document = parse(edit_xml.as_bytes()).map_err(FilterError::from)?;
        self.verify_document(session, &document)
    }

    /// [`Verifier::verify`] for an already parsed edit document.
    pub fn verify_document<S: DeviceSession + ?Sized>(
        &self,
        session: &mut S,
        document: &XmlNode,
    ) -> Result<VerificationOutcome, VerifyError> {
        let Some(config) = config_block(document) else {
            debug!("edit has no config content; skipping verification");
            return Ok(VerificationOutcome::Skipped);
        };
        let Some(filter) = filter_from_document(document) else {
            return Ok(VerificationOutcome::Skipped);
        };

        let read = get_rpc(filter, document.attribute("message-id"));
        let commands = match self.translator.translate_node(&read) {
            Ok(commands) => commands,
            Err(TranslateError::NoSupportedOperations) => {
                debug!("edited features have no read command; skipping verification");
                return Ok(VerificationOutcome::Skipped);
            }
            Err(err) => return Err(err.into()),
        };

        if !self.settle_delay.is_zero() {
            debug!(delay_ms = self.settle_delay.as_millis() as u64, "waiting for device to settle");
            thread::sleep(self.settle_delay);
        }

        let mut actual = Row::new();
        for reply in query(session, &commands)? {
            if let Some(first) = reply.rows.into_iter().next() {
                for (key, value) in first {
                    actual.entry(key).or_insert(value);
                }
            }
        }

        let checks = compare(&expected_values(config), &actual, &self.fields);
        info!(
            checked = checks.len(),
            failed = checks.iter().filter(|c| c.outcome != Outcome::Match).count(),
            "verification complete"
        );
        Ok(VerificationOutcome::Checked(checks))
    }
}
