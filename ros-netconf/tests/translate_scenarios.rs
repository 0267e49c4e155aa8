use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use ros_netconf::command::Command;
use ros_netconf::rpc::split_rpcs;
use ros_netconf::translate::{translate, TranslateError, Translator};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn read(path: &str) -> String {
    fs::read_to_string(fixture(path)).expect("read fixture")
}

fn lines(cmds: &[Command]) -> Vec<String> {
    cmds.iter().map(ToString::to_string).collect()
}

#[test]
fn hostname_edit_sets_identity() {
    let cmds = translate(&read("fixtures/netconf/hostname.xml")).expect("translate");
    assert_eq!(lines(&cmds), vec![r#"/system/identity/set name="router1""#]);
}

#[test]
fn utc_offset_alone_yields_only_the_sentinel() {
    let cmds = translate(&read("fixtures/netconf/clock-offset.xml")).expect("translate");
    assert_eq!(cmds.len(), 1);
    assert!(cmds[0].is_unsupported());
    assert_eq!(
        cmds[0].to_string(),
        "UNSUPPORTED: system/clock/timezone-utc-offset set operation is not supported on RouterOS"
    );
    assert!(!lines(&cmds).iter().any(|l| l.starts_with("/system/clock/set")));
}

#[test]
fn ntp_edit_enables_then_adds_servers() {
    let cmds = translate(&read("fixtures/netconf/ntp.xml")).expect("translate");
    assert_eq!(
        lines(&cmds),
        vec![
            "/system/ntp/client/set enabled=yes",
            "/system/ntp/client/servers/add address=1.1.1.1",
            "/system/ntp/client/servers/add address=2.2.2.2",
        ]
    );
}

#[test]
fn clock_get_is_the_same_for_both_leaves() {
    let by_name = translate(&read("fixtures/netconf/get-clock.xml")).expect("translate");
    let by_offset = translate(
        r#"<rpc><get><filter type="subtree"><system><clock><timezone-utc-offset/></clock></system></filter></get></rpc>"#,
    )
    .expect("translate");
    let bare = translate(r#"<rpc><get><filter><system><clock/></system></filter></get></rpc>"#)
        .expect("translate");

    assert_eq!(lines(&by_name), vec!["/system/clock/print"]);
    assert_eq!(by_name, by_offset);
    assert_eq!(by_name, bare);
}

#[test]
fn unhandled_or_empty_config_is_not_supported() {
    for xml in [
        read("fixtures/netconf/aaa-only.xml"),
        "<rpc><edit-config><config/></edit-config></rpc>".to_string(),
        "<rpc><edit-config><config><system/></config></edit-config></rpc>".to_string(),
        "<rpc><edit-config><config><interfaces/></config></edit-config></rpc>".to_string(),
    ] {
        let err = translate(&xml).expect_err("nothing to translate");
        assert!(matches!(err, TranslateError::NoSupportedOperations), "{xml}: {err}");
    }
}

#[test]
fn absent_branch_produces_nothing_for_its_features() {
    let cmds = translate(
        r#"<rpc><edit-config><config><system><hostname>h</hostname></system></config></edit-config></rpc>"#,
    )
    .expect("translate");
    assert!(lines(&cmds)
        .iter()
        .all(|l| !l.starts_with("/system/ntp") && !l.starts_with("/system/clock")));
}

#[test]
fn translation_is_idempotent() {
    let xml = read("fixtures/netconf/ntp.xml");
    let translator = Translator::default();
    let first = translator.translate(&xml).expect("first");
    let second = translator.translate(&xml).expect("second");
    assert_eq!(first, second);
}

#[test]
fn rendered_commands_parse_back() {
    let cmds = translate(&read("fixtures/netconf/hostname.xml")).expect("translate");
    let reparsed: Vec<Command> = lines(&cmds)
        .iter()
        .filter_map(|line| Command::parse(line))
        .collect();
    assert_eq!(
        reparsed[0].as_exec().map(|c| c.api_words()),
        cmds[0].as_exec().map(|c| c.api_words())
    );
    assert_eq!(
        cmds[0].as_exec().expect("exec").api_words(),
        vec!["/system/identity/set", "=name=router1"]
    );
}

#[test]
fn multi_rpc_document_translates_each_message() {
    let rpcs = split_rpcs(&read("fixtures/netconf/session.xml")).expect("split");
    let translator = Translator::default();
    let per_rpc: Vec<Vec<String>> = rpcs
        .iter()
        .map(|rpc| lines(&translator.translate_node(rpc).expect("translate")))
        .collect();

    assert_eq!(
        per_rpc,
        vec![
            vec!["/system/identity/print", "/ip/dns/print"],
            vec![
                r#"/system/identity/set name="edge-01""#,
                r#"/system/clock/set time-zone-name="Europe/Riga""#,
                "/ip/dns/set servers=8.8.8.8,8.8.4.4",
            ],
            vec!["/ip/address/remove [find]"],
        ]
    );
}
