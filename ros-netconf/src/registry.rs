use std::collections::BTreeMap;

use tracing::debug;

use crate::command::Command;
use crate::features::{Feature, FeatureHandler, FeatureRegistration, Operation};

/// Feature -> handler dispatch table.
///
/// Read-only once built. Iteration follows [`Feature`] order so output is
/// deterministic, but only the order of commands within one feature is part
/// of the contract.
pub struct Registry {
    handlers: BTreeMap<Feature, &'static dyn FeatureHandler>,
}

impl Registry {
    /// Every handler submitted through `inventory`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for registration in inventory::iter::<FeatureRegistration> {
            registry.register(registration.handler);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Add or replace the handler for its feature.
    pub fn register(&mut self, handler: &'static dyn FeatureHandler) {
        self.handlers.insert(handler.feature(), handler);
    }

    pub fn get(&self, feature: Feature) -> Option<&'static dyn FeatureHandler> {
        self.handlers.get(&feature).copied()
    }

    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.handlers.keys().copied()
    }

    /// Run every handler whose feature the operation touches.
    ///
    /// Features present in the request without a registered handler produce
    /// nothing.
    pub fn commands_for(&self, op: Operation<'_>) -> Vec<Command> {
        let mut cmds = Vec::new();
        for feature in Feature::ALL {
            let present = match op {
                Operation::Get(selection) => feature.is_selected_in(selection),
                Operation::Set(system) => feature.is_set_in(system),
            };
            if !present {
                continue;
            }
            let Some(handler) = self.get(feature) else {
                debug!(%feature, "no handler registered; skipping");
                continue;
            };
            let produced = handler.handle(op);
            debug!(%feature, count = produced.len(), "feature translated");
            cmds.extend(produced);
        }
        cmds
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
