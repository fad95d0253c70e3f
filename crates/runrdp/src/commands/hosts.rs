use clap::ArgMatches;
use tracing::info;

use runrdp_core::Configuration;
use runrdp_core::config::{GlobalField, Record};

use super::helpers::load_configuration;
use crate::table::{HostRow, TableFormatter};

fn host_rows(config: &Configuration) -> Vec<HostRow> {
    config
        .host_names()
        .into_iter()
        .filter_map(|name| config.host_entry(name).map(|entry| (name, entry)))
        .map(|(name, entry)| HostRow {
            name: name.to_string(),
            kind: entry.record.kind().to_string(),
            address: entry.globals.get(GlobalField::Address).to_string(),
            cred: entry.globals.get(GlobalField::Cred).to_string(),
            proxy: entry.globals.get(GlobalField::Proxy).to_string(),
            tunnel: entry.globals.get(GlobalField::Tunnel).to_string(),
            document: entry.document.clone(),
        })
        .collect()
}

pub(crate) fn handle_hosts_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.hosts_started", json_output = json_output);

    let config = load_configuration(matches)?;
    let rows = host_rows(&config);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No hosts configured.");
    } else {
        TableFormatter::new(&rows).print_table(&rows);
    }

    info!(event = "cli.hosts_completed", count = rows.len());
    Ok(())
}
