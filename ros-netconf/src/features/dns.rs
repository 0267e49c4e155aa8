use crate::command::Command;
use crate::features::{Feature, FeatureHandler, FeatureRegistration, Operation};

/// `system/dns` <-> `/ip/dns`.
pub struct DnsHandler;

impl FeatureHandler for DnsHandler {
    fn feature(&self) -> Feature {
        Feature::Dns
    }

    fn handle(&self, op: Operation<'_>) -> Vec<Command> {
        match op {
            Operation::Get(_) => vec![Command::exec("/ip/dns/print").into()],
            Operation::Set(system) => {
                let servers: Vec<&str> = system
                    .dns
                    .iter()
                    .flat_map(|dns| dns.servers.iter())
                    .map(String::as_str)
                    .filter(|server| !server.is_empty())
                    .collect();
                if servers.is_empty() {
                    return Vec::new();
                }
                vec![Command::exec("/ip/dns/set")
                    .arg("servers", servers.join(","))
                    .into()]
            }
        }
    }
}

inventory::submit! {
    FeatureRegistration::new(&DnsHandler)
}
