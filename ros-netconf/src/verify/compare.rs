//! Expected-vs-actual comparison of an applied edit against a device reply.

use netconf_xml::XmlNode;
use serde::Serialize;

use crate::field_mappings::FieldMap;
use crate::session::Row;

/// Canonical form used on both sides of a comparison.
///
/// Boolean spellings collapse to `"true"`/`"false"`; everything else,
/// surrounding whitespace included, is returned unchanged.
pub fn normalize_value(raw: &str) -> String {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => "true".to_string(),
        "false" | "no" | "0" => "false".to_string(),
        _ => raw.to_string(),
    }
}

/// Every element with non-blank text under `config`, as `(leaf, value)` in
/// document order. Values are trimmed the same way the translator trims
/// them. Repeated leaves are all kept.
pub fn expected_values(config: &XmlNode) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_leaves(config, &mut out);
    out
}

fn collect_leaves(node: &XmlNode, out: &mut Vec<(String, String)>) {
    for child in &node.children {
        if let Some(text) = child.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                out.push((child.local_name().to_string(), text.to_string()));
            }
        }
        collect_leaves(child, out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Match,
    Mismatch,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCheck {
    pub field: String,
    pub device_field: String,
    pub expected: String,
    pub actual: Option<String>,
    pub outcome: Outcome,
}

/// Compare every expected leaf against one device row.
pub fn compare(expected: &[(String, String)], actual: &Row, fields: &FieldMap) -> Vec<FieldCheck> {
    expected
        .iter()
        .map(|(field, value)| {
            let device_field = fields.device_field(field).to_string();
            let found = actual.get(&device_field).cloned();
            let outcome = match &found {
                None => Outcome::Missing,
                Some(got) if normalize_value(got) == normalize_value(value) => Outcome::Match,
                Some(_) => Outcome::Mismatch,
            };
            FieldCheck {
                field: field.clone(),
                device_field,
                expected: value.clone(),
                actual: found,
                outcome,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use netconf_xml::parse;
    use pretty_assertions::assert_eq;

    use super::{compare, expected_values, normalize_value, Outcome};
    use crate::field_mappings::FieldMap;
    use crate::session::Row;

    #[test]
    fn boolean_spellings_normalize() {
        for raw in ["true", "TRUE", "yes", "Yes", "1"] {
            assert_eq!(normalize_value(raw), "true", "{raw}");
        }
        for raw in ["false", "False", "no", "NO", "0"] {
            assert_eq!(normalize_value(raw), "false", "{raw}");
        }
        assert_eq!(normalize_value("router1"), "router1");
        assert_eq!(normalize_value("2"), "2");
        assert_eq!(normalize_value(" yes "), " yes ");
    }

    #[test]
    fn pretty_printed_leaves_are_trimmed() {
        let config = parse(
            b"<config><system>\n  <hostname>\n    router1\n  </hostname>\n  <clock><timezone-name>  </timezone-name></clock>\n</system></config>",
        )
        .expect("parse");

        assert_eq!(
            expected_values(&config),
            vec![("hostname".to_string(), "router1".to_string())]
        );
    }

    #[test]
    fn leaves_are_collected_in_document_order() {
        let config = parse(
            br#"<config><system>
                <hostname>r1</hostname>
                <ntp><servers>
                    <server><address>1.1.1.1</address></server>
                    <server><address>2.2.2.2</address></server>
                </servers></ntp>
            </system></config>"#,
        )
        .expect("parse");

        assert_eq!(
            expected_values(&config),
            vec![
                ("hostname".to_string(), "r1".to_string()),
                ("address".to_string(), "1.1.1.1".to_string()),
                ("address".to_string(), "2.2.2.2".to_string()),
            ]
        );
    }

    #[test]
    fn outcomes_cover_match_mismatch_and_missing() {
        let expected = vec![
            ("hostname".to_string(), "r1".to_string()),
            ("enabled".to_string(), "true".to_string()),
            ("timezone-name".to_string(), "UTC".to_string()),
        ];
        let row: Row = [("name", "r2"), ("enabled", "yes")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let checks = compare(&expected, &row, &FieldMap::default());
        let outcomes: Vec<Outcome> = checks.iter().map(|c| c.outcome).collect();
        assert_eq!(
            outcomes,
            vec![Outcome::Mismatch, Outcome::Match, Outcome::Missing]
        );
        assert_eq!(checks[0].device_field, "name");
        assert_eq!(checks[0].actual.as_deref(), Some("r2"));
        assert_eq!(checks[2].device_field, "time-zone-name");
        assert_eq!(checks[2].actual, None);
    }
}
