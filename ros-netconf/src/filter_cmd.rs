use anyhow::{bail, Context, Result};
use netconf_xml::write;
use ros_netconf::rpc::split_rpcs;
use ros_netconf::verify::{filter_from_document, get_rpc};

use crate::cli::FilterArgs;
use crate::read_input;

pub fn run_filter(args: FilterArgs) -> Result<()> {
    let raw = read_input(&args.file)?;
    let rpcs = split_rpcs(&raw)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    let Some((rpc, filter)) = rpcs
        .iter()
        .find_map(|rpc| filter_from_document(rpc).map(|filter| (rpc, filter)))
    else {
        bail!("no <config> content found in {}", args.file.display());
    };

    let get = get_rpc(filter, rpc.attribute("message-id"));
    let bytes = write(&get).context("failed to render get rpc")?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}
