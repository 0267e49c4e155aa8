use anyhow::{Context, Result};
use ros_netconf::report::{render_commands, TranslationReport};
use ros_netconf::rpc::split_rpcs;
use ros_netconf::translate::Translator;

use crate::cli::{OutputFormat, TranslateArgs};
use crate::read_input;

pub fn run_translate(args: TranslateArgs) -> Result<()> {
    let raw = read_input(&args.file)?;
    let rpcs = split_rpcs(&raw)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let translator = Translator::default();
    let mut reports = Vec::with_capacity(rpcs.len());
    let mut rendered = Vec::with_capacity(rpcs.len());
    for rpc in &rpcs {
        let message_id = rpc.attribute("message-id").map(ToOwned::to_owned);
        let cmds = translator.translate_node(rpc).with_context(|| {
            format!(
                "failed to translate rpc message-id={}",
                message_id.as_deref().unwrap_or("-")
            )
        })?;
        rendered.push((message_id.clone(), render_commands(&cmds)));
        reports.push(TranslationReport::new(message_id, &cmds));
    }

    match args.format {
        OutputFormat::Text => {
            let multiple = rendered.len() > 1;
            for (message_id, text) in rendered {
                if multiple {
                    println!("# rpc message-id={}", message_id.as_deref().unwrap_or("-"));
                }
                println!("{text}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }
    Ok(())
}
