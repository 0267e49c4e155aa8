use crate::command::Command;
use crate::features::{Feature, FeatureHandler, FeatureRegistration, Operation};

/// `system/hostname` <-> `/system/identity`.
pub struct HostnameHandler;

impl FeatureHandler for HostnameHandler {
    fn feature(&self) -> Feature {
        Feature::Hostname
    }

    fn handle(&self, op: Operation<'_>) -> Vec<Command> {
        match op {
            Operation::Get(_) => vec![Command::exec("/system/identity/print").into()],
            Operation::Set(system) => system
                .hostname
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| {
                    Command::from(Command::exec("/system/identity/set").quoted_arg("name", name))
                })
                .into_iter()
                .collect(),
        }
    }
}

inventory::submit! {
    FeatureRegistration::new(&HostnameHandler)
}

#[cfg(test)]
mod tests {
    use super::HostnameHandler;
    use crate::features::{FeatureHandler, Operation};
    use crate::model::System;
    use crate::selection::SystemSelection;

    fn rendered(op: Operation<'_>) -> Vec<String> {
        HostnameHandler
            .handle(op)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn get_prints_identity() {
        let selection = SystemSelection {
            hostname: true,
            ..SystemSelection::default()
        };
        assert_eq!(
            rendered(Operation::Get(&selection)),
            vec!["/system/identity/print"]
        );
    }

    #[test]
    fn set_quotes_the_name() {
        let system = System {
            hostname: Some("router1".to_string()),
            ..System::default()
        };
        assert_eq!(
            rendered(Operation::Set(&system)),
            vec![r#"/system/identity/set name="router1""#]
        );
    }

    #[test]
    fn set_with_empty_name_is_a_no_op() {
        let system = System {
            hostname: Some(String::new()),
            ..System::default()
        };
        assert!(rendered(Operation::Set(&system)).is_empty());
    }
}
