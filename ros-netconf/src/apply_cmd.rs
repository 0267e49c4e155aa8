use anyhow::{bail, Context, Result};
use ros_netconf::command::Command;
use ros_netconf::execute::execute;
use ros_netconf::field_mappings::load_field_map_with_source;
use ros_netconf::report::{render_execution, render_verification, AppliedRpc, ApplyReport};
use ros_netconf::routeros::{Credentials, RouterOsSession};
use ros_netconf::rpc::split_rpcs;
use ros_netconf::settings::load_settings;
use ros_netconf::translate::Translator;
use ros_netconf::verify::Verifier;
use tracing::{debug, info, warn};

use crate::cli::{ApplyArgs, OutputFormat};
use crate::read_input;

pub fn run_apply(args: ApplyArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    let raw = read_input(&args.file)?;
    let rpcs = split_rpcs(&raw)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    // translate everything before touching the device
    let translator = Translator::default();
    let mut plans: Vec<(Option<String>, Vec<Command>)> = Vec::with_capacity(rpcs.len());
    for rpc in &rpcs {
        let message_id = rpc.attribute("message-id").map(ToOwned::to_owned);
        let cmds = translator.translate_node(rpc).with_context(|| {
            format!(
                "failed to translate rpc message-id={}",
                message_id.as_deref().unwrap_or("-")
            )
        })?;
        plans.push((message_id, cmds));
    }

    let address = args.address.unwrap_or(settings.device.address);
    let credentials = Credentials {
        username: args.username.unwrap_or(settings.device.username),
        password: settings.device.password,
    };
    let mut session = RouterOsSession::connect(&address, &credentials)
        .with_context(|| format!("failed to open RouterOS session to {address}"))?;

    let mut applied = Vec::with_capacity(plans.len());
    for (message_id, cmds) in plans {
        let execution = execute(&mut session, &cmds).with_context(|| {
            format!(
                "rpc message-id={} partially applied",
                message_id.as_deref().unwrap_or("-")
            )
        })?;
        info!(executed = execution.executed.len(), "rpc applied");
        applied.push(AppliedRpc {
            message_id,
            execution,
        });
    }

    let verification = if args.verify {
        match rpcs.iter().find(|rpc| rpc.get_child("edit-config").is_some()) {
            Some(edit) => {
                let (fields, source) =
                    load_field_map_with_source(settings.verify.field_mappings.as_deref());
                debug!(%source, "field mappings loaded");
                let verifier = Verifier::new(fields).with_settle_delay(settings.verify.settle_delay());
                Some(
                    verifier
                        .verify_document(&mut session, edit)
                        .context("verification did not complete")?,
                )
            }
            None => {
                warn!("--verify given but the document has no edit-config");
                None
            }
        }
    } else {
        None
    };

    match args.format {
        OutputFormat::Text => {
            for rpc in &applied {
                println!("# rpc message-id={}", rpc.message_id.as_deref().unwrap_or("-"));
                println!("{}", render_execution(&rpc.execution));
            }
            if let Some(outcome) = &verification {
                println!();
                println!("Verification");
                println!("{}", render_verification(outcome));
            }
        }
        OutputFormat::Json => {
            let report = ApplyReport {
                rpcs: applied,
                verification: verification.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if let Some(outcome) = verification {
        let failed = outcome.failures().count();
        if failed > 0 {
            bail!("verification failed: {failed} field(s) did not match");
        }
    }
    Ok(())
}
