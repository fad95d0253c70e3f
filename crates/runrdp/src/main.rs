use runrdp_core::init_logging;

mod app;
mod commands;
mod table;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v/--verbose was passed
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    commands::run_command(&matches)?;

    Ok(())
}
