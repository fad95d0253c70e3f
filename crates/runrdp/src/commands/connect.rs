use clap::ArgMatches;
use tracing::{error, info};

use runrdp_core::events;
use runrdp_core::{Configuration, ConnectionDescriptor, Overrides, RunrdpError};

use super::helpers::{load_configuration, resolve_host_name};

fn overrides_from(matches: &ArgMatches) -> Overrides {
    Overrides {
        address: matches.get_one::<String>("address").cloned(),
        port: matches.get_one::<String>("port").cloned(),
        username: matches.get_one::<String>("username").cloned(),
        password: matches.get_one::<String>("password").cloned(),
        width: matches.get_one::<i64>("width").copied(),
        height: matches.get_one::<i64>("height").copied(),
        suppress_proxy: matches.get_flag("no-proxy"),
    }
}

pub(crate) fn handle_connect_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let requested = matches
        .get_one::<String>("host")
        .ok_or("Host argument is required")?;
    let json_output = matches.get_flag("json");
    let show_password = matches.get_flag("show-password");

    info!(
        event = "cli.connect_started",
        host = requested.as_str(),
        json_output = json_output
    );

    let config = load_configuration(matches)?;
    let host = resolve_host_name(&config, requested)?;

    connect_to_host(
        &config,
        &host,
        &overrides_from(matches),
        json_output,
        show_password,
    )
}

/// Resolve `host` and print its connection details.
pub(crate) fn connect_to_host(
    config: &Configuration,
    host: &str,
    overrides: &Overrides,
    json_output: bool,
    show_password: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match config.resolve_connection(host, overrides) {
        Ok(descriptor) => {
            let shown = if show_password {
                descriptor.clone()
            } else {
                descriptor.redacted()
            };

            if json_output {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print_descriptor(&shown);
            }

            info!(
                event = "cli.connect_completed",
                host = host,
                tunneled = descriptor.tunnel.is_some()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to resolve '{}': {}", host, e);

            error!(
                event = "cli.connect_failed",
                host = host,
                error = %e,
                error_code = e.error_code(),
                user_error = e.is_user_error()
            );

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn print_descriptor(descriptor: &ConnectionDescriptor) {
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    println!("Host:      {}", descriptor.host);
    println!("Address:   {}", or_dash(&descriptor.address));
    println!("Port:      {}", descriptor.port);
    println!("Username:  {}", or_dash(&descriptor.username));
    println!("Password:  {}", or_dash(&descriptor.password));

    let settings = &descriptor.settings;
    if settings.width != 0 || settings.height != 0 {
        println!("Display:   {}x{}", settings.width, settings.height);
    }
    if settings.scale != 0 {
        println!("Scale:     {}%", settings.scale);
    }

    if let Some(tunnel) = &descriptor.tunnel {
        println!();
        println!("Tunnel:    {} via {}", tunnel.name, or_dash(&tunnel.server));
        println!(
            "Forward:   localhost:{} -> {}:{}",
            tunnel.local_port, tunnel.remote_address, tunnel.remote_port
        );
        println!("Command:   {}", tunnel.ssh_command());
    }
}
