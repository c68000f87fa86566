//! # Command Line Interface
//!
//! Dispatches subcommands to the `commands` module and maps errors onto the
//! exit codes spec.md §6 assigns them.

use msxdsk::commands;
use msxdsk::commands::CommandError;

mod cli;

/// This crate serializes every on-disk integer byte-at-a-time, so it has no
/// actual dependency on host endianness; the check is kept only because
/// spec.md §6 names exit code 255 as part of the CLI surface.
#[cfg(target_endian = "big")]
fn check_endian() -> Result<(), CommandError> {
    Err(CommandError::UnsupportedEndian)
}

#[cfg(not(target_endian = "big"))]
fn check_endian() -> Result<(), CommandError> {
    Ok(())
}

fn dispatch() -> Result<(), CommandError> {
    let main_cmd = cli::build_cli();
    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(cli::build_cli(), cmd);
    }

    let image_path = matches
        .get_one::<String>("IMAGE")
        .ok_or_else(|| CommandError::Usage("an image path is required".to_string()))?;

    let args_of = |cmd: &clap::ArgMatches| -> Vec<String> {
        cmd.get_many::<String>("args").map(|v| v.cloned().collect()).unwrap_or_default()
    };

    match matches.subcommand() {
        Some(("info", _)) => commands::info::run(image_path),
        Some(("ls", _)) => commands::ls::run(image_path),
        Some(("get", cmd)) => commands::get::run(image_path, &args_of(cmd)),
        Some(("put", cmd)) => commands::put::run(image_path, &args_of(cmd)),
        Some(("cat", cmd)) => commands::cat::run(image_path, cmd.get_one::<String>("FILE").unwrap()),
        Some(("rm", cmd)) => commands::rm::run(image_path, cmd.get_one::<String>("FILE").unwrap()),
        Some(("create", cmd)) => {
            let files: Vec<String> =
                cmd.get_many::<String>("files").map(|v| v.cloned().collect()).unwrap_or_default();
            commands::create::run(image_path, &files)
        }
        _ => Err(CommandError::Usage("no subcommand given, try `msxdsk --help`".to_string())),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = check_endian() {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }

    if let Err(e) = dispatch() {
        log::error!("{e}");
        std::process::exit(e.exit_code());
    }
}
