use netconf_xml::{parse, parse_fragments, to_compact_string, write};
use pretty_assertions::assert_eq;

#[test]
fn indented_output_parses_back_to_same_tree() {
    let input = br#"<rpc message-id="101"><edit-config><target><running/></target><config><system><hostname>r1</hostname><ntp><servers><server><address>1.1.1.1</address></server></servers></ntp></system></config></edit-config></rpc>"#;
    let original = parse(input).expect("parse original");

    let bytes = write(&original).expect("write");
    let reparsed = parse(&bytes).expect("parse written");

    assert_eq!(original, reparsed);
}

#[test]
fn compact_output_keeps_prefixes_and_attributes() {
    let input = br#"<oc-sys:system xmlns:oc-sys="http://openconfig.net/yang/system"><oc-sys:hostname xc:operation="replace">edge</oc-sys:hostname></oc-sys:system>"#;
    let node = parse(input).expect("parse");

    let text = to_compact_string(&node).expect("write");
    assert_eq!(text, std::str::from_utf8(input).expect("utf8"));
}

#[test]
fn fragments_round_trip_in_document_order() {
    let input = br#"<rpc message-id="1"><get/></rpc><rpc message-id="2"><delete-config/></rpc>"#;
    let roots = parse_fragments(input).expect("parse");

    let ids: Vec<&str> = roots
        .iter()
        .filter_map(|root| root.attribute("message-id"))
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}
