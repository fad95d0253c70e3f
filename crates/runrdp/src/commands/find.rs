use clap::ArgMatches;
use tracing::info;

use runrdp_core::Overrides;
use runrdp_core::secret_server::{OperatorPrompt, TerminalPrompt};

use super::connect::connect_to_host;
use super::helpers::load_configuration;

pub(crate) fn handle_find_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let pattern = matches
        .get_one::<String>("pattern")
        .ok_or("Pattern argument is required")?;
    let count = matches.get_one::<usize>("count").copied().unwrap_or(6);

    info!(
        event = "cli.find_started",
        pattern = pattern.as_str(),
        count = count
    );

    let config = load_configuration(matches)?;
    let found = config.find_by_pattern(pattern);

    info!(event = "cli.find_completed", matches = found.len());

    if found.is_empty() {
        println!("No hosts match '{}'.", pattern);
        return Ok(());
    }

    let listed: Vec<String> = found.into_iter().take(count).collect();
    let Some(host) = pick_host(&TerminalPrompt, &listed)? else {
        eprintln!("No host was chosen. Use -c <count> to list more hosts.");
        return Ok(());
    };

    info!(event = "cli.find_host_chosen", host = host.as_str());
    connect_to_host(&config, &host, &Overrides::default(), false, false)
}

/// Ask the operator to pick one of the listed host names.
fn pick_host(prompt: &dyn OperatorPrompt, listed: &[String]) -> std::io::Result<Option<String>> {
    let choice = prompt.choose("Matching hosts", listed)?;
    Ok(choice.and_then(|index| listed.get(index).cloned()))
}
