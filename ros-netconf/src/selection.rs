//! Presence flags read from a `<get>` subtree filter.
//!
//! In a subtree filter the value of an element is irrelevant; only whether it
//! appears. An empty branch such as `<clock/>` selects the whole branch.

use netconf_xml::XmlNode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemSelection {
    pub hostname: bool,
    pub clock: Option<ClockSelection>,
    pub ntp: Option<NtpSelection>,
    pub dns: bool,
    pub aaa: bool,
    pub logging: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockSelection {
    pub timezone_name: bool,
    pub timezone_utc_offset: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NtpSelection {
    pub enabled: bool,
    pub servers: bool,
}

impl SystemSelection {
    /// Read presence flags from the children of a `<filter>` element.
    ///
    /// Filters that do not mention `system` select nothing.
    pub fn from_filter(filter: &XmlNode) -> Self {
        filter
            .get_child("system")
            .map(Self::from_system)
            .unwrap_or_default()
    }

    fn from_system(system: &XmlNode) -> Self {
        Self {
            hostname: system.get_child("hostname").is_some(),
            clock: system.get_child("clock").map(|clock| ClockSelection {
                timezone_name: clock.get_child("timezone-name").is_some(),
                timezone_utc_offset: clock.get_child("timezone-utc-offset").is_some(),
            }),
            ntp: system.get_child("ntp").map(|ntp| NtpSelection {
                enabled: ntp.get_child("enabled").is_some(),
                servers: ntp.get_child("servers").is_some(),
            }),
            dns: system.get_child("dns").is_some(),
            aaa: system.get_child("aaa").is_some(),
            logging: system.get_child("logging").is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
