use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Target prefix shared by the CLI (`runrdp`) and the library (`runrdp_core`).
const LOG_TARGET: &str = "runrdp";

fn directive(quiet: bool) -> Directive {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::DEBUG
    };
    format!("{LOG_TARGET}={level}")
        .parse()
        .unwrap_or_else(|_| level.into())
}

/// Initialize JSON logging on stderr.
///
/// Quiet mode emits only errors; otherwise debug and above. `RUST_LOG`
/// directives for other targets still apply.
pub fn init_logging(quiet: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::from_default_env().add_directive(directive(quiet)))
        .init();
}
