//! Per-feature OpenConfig `system` to RouterOS mappings.
//!
//! Each supported feature implements [`FeatureHandler`] and registers itself
//! with `inventory::submit!`, so adding a feature means adding a module here
//! and nothing else. Features known to the model but without a handler
//! (`aaa`, `logging`) are parsed and then ignored by the dispatcher.

use std::fmt::{self, Display, Formatter};

use crate::command::Command;
use crate::model::System;
use crate::selection::SystemSelection;

mod clock;
mod dns;
mod hostname;
mod ntp;

pub use clock::ClockHandler;
pub use dns::DnsHandler;
pub use hostname::HostnameHandler;
pub use ntp::NtpHandler;

/// Top-level configurable aspect under `system`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Hostname,
    Clock,
    Ntp,
    Dns,
    Aaa,
    Logging,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Hostname,
        Feature::Clock,
        Feature::Ntp,
        Feature::Dns,
        Feature::Aaa,
        Feature::Logging,
    ];

    /// OpenConfig element name.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Hostname => "hostname",
            Feature::Clock => "clock",
            Feature::Ntp => "ntp",
            Feature::Dns => "dns",
            Feature::Aaa => "aaa",
            Feature::Logging => "logging",
        }
    }

    /// Whether the feature's node is present in an edit tree.
    pub fn is_set_in(self, system: &System) -> bool {
        match self {
            Feature::Hostname => system.hostname.is_some(),
            Feature::Clock => system.clock.is_some(),
            Feature::Ntp => system.ntp.is_some(),
            Feature::Dns => system.dns.is_some(),
            Feature::Aaa => system.aaa.is_some(),
            Feature::Logging => system.logging.is_some(),
        }
    }

    /// Whether a get filter asks for the feature.
    pub fn is_selected_in(self, selection: &SystemSelection) -> bool {
        match self {
            Feature::Hostname => selection.hostname,
            Feature::Clock => selection.clock.is_some(),
            Feature::Ntp => selection.ntp.is_some(),
            Feature::Dns => selection.dns,
            Feature::Aaa => selection.aaa,
            Feature::Logging => selection.logging,
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a handler is asked to produce commands for.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    /// Read the feature's current state.
    Get(&'a SystemSelection),
    /// Apply the feature's values from an edit tree.
    Set(&'a System),
}

/// Maps one feature's subtree to RouterOS commands.
///
/// Handlers are pure: the same input always yields the same commands, in the
/// same order. The dispatcher only calls a handler when its feature is
/// present in the request.
pub trait FeatureHandler: Sync {
    fn feature(&self) -> Feature;

    fn handle(&self, op: Operation<'_>) -> Vec<Command>;
}

/// A handler submitted to the builtin registry.
pub struct FeatureRegistration {
    pub handler: &'static dyn FeatureHandler,
}

impl FeatureRegistration {
    pub const fn new(handler: &'static dyn FeatureHandler) -> Self {
        Self { handler }
    }
}

inventory::collect!(FeatureRegistration);
