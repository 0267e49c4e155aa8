use crate::command::Command;
use crate::features::{Feature, FeatureHandler, FeatureRegistration, Operation};

/// `system/clock` <-> `/system/clock`.
///
/// RouterOS only knows named time zones; a bare UTC offset cannot be applied
/// and is reported as unsupported.
pub struct ClockHandler;

impl FeatureHandler for ClockHandler {
    fn feature(&self) -> Feature {
        Feature::Clock
    }

    fn handle(&self, op: Operation<'_>) -> Vec<Command> {
        match op {
            // timezone-name and timezone-utc-offset are both read from the same menu
            Operation::Get(_) => vec![Command::exec("/system/clock/print").into()],
            Operation::Set(system) => {
                let Some(clock) = &system.clock else {
                    return Vec::new();
                };
                if let Some(name) = clock.timezone_name.as_deref().filter(|n| !n.is_empty()) {
                    return vec![Command::exec("/system/clock/set")
                        .quoted_arg("time-zone-name", name)
                        .into()];
                }
                if clock
                    .timezone_utc_offset
                    .as_deref()
                    .is_some_and(|offset| !offset.is_empty())
                {
                    return vec![Command::unsupported(
                        "system/clock/timezone-utc-offset set operation is not supported on RouterOS",
                    )];
                }
                Vec::new()
            }
        }
    }
}

inventory::submit! {
    FeatureRegistration::new(&ClockHandler)
}
