use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("runrdp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve remote desktop targets from layered TOML configuration")
        .long_about("runrdp reads host, credential, tunnel and display settings records from every TOML file in the configuration directory and resolves a configured host name into the address, port, credentials, SSH tunnel and display settings needed to open a remote desktop session.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config-root")
                .long("config-root")
                .help("Directory containing configuration documents (default: ~/.runrdp)")
                .global(true),
        )
        .arg(
            Arg::new("ssh-directory")
                .long("ssh-directory")
                .help("Directory searched for EC2 key pair files (default: ~/.ssh)")
                .global(true),
        )
        .arg(
            Arg::new("tag-separator")
                .long("tag-separator")
                .help("Separator between EC2 tag keys and values (default: ;)")
                .global(true),
        )
        .arg(
            Arg::new("thycotic-url")
                .long("thycotic-url")
                .help("Base URL of the Thycotic secret server")
                .global(true),
        )
        .arg(
            Arg::new("thycotic-domain")
                .long("thycotic-domain")
                .help("Login domain for the Thycotic secret server")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("connect")
                .visible_alias("resolve")
                .about("Resolve the connection details for a configured host")
                .arg(
                    Arg::new("host")
                        .help("Configured host name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("address")
                        .long("address")
                        .short('a')
                        .help("Connect to this address instead of the configured one")
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("Connect to this port instead of the configured one")
                )
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .help("Log in with this username instead of the configured one")
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Log in with this password instead of the configured one")
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .help("Display width in pixels (overrides settings)")
                        .value_parser(clap::value_parser!(i64))
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .help("Display height in pixels (overrides settings)")
                        .value_parser(clap::value_parser!(i64))
                )
                .arg(
                    Arg::new("no-proxy")
                        .long("no-proxy")
                        .help("Ignore the proxy configured for the host")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("show-password")
                        .long("show-password")
                        .help("Print the resolved password instead of redacting it")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("find")
                .about("Find configured hosts approximately matching a pattern")
                .arg(
                    Arg::new("pattern")
                        .help("Characters to look for, in order")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("count")
                        .long("count")
                        .short('c')
                        .help("Maximum number of matches to print")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("6")
                )
        )
        .subcommand(
            Command::new("hosts")
                .about("List every configured host")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}
