use tracing::debug;

use crate::command::Command;
use crate::features::{Feature, FeatureHandler, FeatureRegistration, Operation};

/// `system/ntp` <-> `/system/ntp/client`.
pub struct NtpHandler;

impl FeatureHandler for NtpHandler {
    fn feature(&self) -> Feature {
        Feature::Ntp
    }

    fn handle(&self, op: Operation<'_>) -> Vec<Command> {
        match op {
            Operation::Get(_) => vec![Command::exec("/system/ntp/client/print").into()],
            Operation::Set(system) => {
                let Some(ntp) = &system.ntp else {
                    return Vec::new();
                };
                let mut cmds: Vec<Command> = Vec::new();

                // the client must be toggled before servers are added to it
                if let Some(enabled) = ntp.enabled {
                    cmds.push(
                        Command::exec("/system/ntp/client/set")
                            .arg("enabled", if enabled { "yes" } else { "no" })
                            .into(),
                    );
                }

                for server in &ntp.servers {
                    let Some(address) = server.address.as_deref().filter(|a| !a.is_empty())
                    else {
                        continue;
                    };
                    if let Some(port) = server.port {
                        debug!(address, port, "RouterOS NTP client has no per-server port; ignoring");
                    }
                    cmds.push(
                        Command::exec("/system/ntp/client/servers/add")
                            .arg("address", address)
                            .into(),
                    );
                }
                cmds
            }
        }
    }
}

inventory::submit! {
    FeatureRegistration::new(&NtpHandler)
}
