use clap::ArgMatches;
use tracing::error;

use runrdp_core::events;

pub mod helpers;

mod completions;
mod connect;
mod find;
mod hosts;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("connect", sub_matches)) => connect::handle_connect_command(sub_matches),
        Some(("find", sub_matches)) => find::handle_find_command(sub_matches),
        Some(("hosts", sub_matches)) => hosts::handle_hosts_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
