//! `mcms` - preview and check site menus from a snapshot file

mod commands;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::RenderOptions;
use mcms_site::SiteSnapshot;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let snapshot = Arg::new("snapshot")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Site snapshot (.toml, .json, .yaml)");
    let user = Arg::new("user")
        .long("user")
        .short('u')
        .default_value("guest")
        .help("Username to build the menu for");

    Command::new("mcms")
        .version(mcms_menu::VERSION)
        .about("Preview and check mcms site menus")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("render")
                .about("Print the menu of a user as JSON")
                .arg(snapshot.clone())
                .arg(user.clone())
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .help("Active language; unset shows every language"),
                )
                .arg(
                    Arg::new("flat")
                        .long("flat")
                        .action(ArgAction::SetTrue)
                        .help("Top-level entries only"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Single-line JSON"),
                ),
        )
        .subcommand(
            Command::new("targets")
                .about("List parent menu choices for pages")
                .arg(snapshot.clone())
                .arg(user),
        )
        .subcommand(
            Command::new("check")
                .about("Report broken links and duplicate identifiers in the menu definition")
                .arg(snapshot),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &ArgMatches) -> Result<SiteSnapshot> {
    let path = args
        .get_one::<PathBuf>("snapshot")
        .context("snapshot path is required")?;
    SiteSnapshot::load(path).with_context(|| format!("loading {}", path.display()))
}

fn user(args: &ArgMatches) -> String {
    args.get_one::<String>("user")
        .cloned()
        .unwrap_or_else(|| "guest".to_string())
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("render", args)) => {
            let options = RenderOptions {
                user: user(args),
                language: args.get_one::<String>("lang").cloned(),
                flat: args.get_flag("flat"),
                compact: args.get_flag("compact"),
            };
            print!("{}", commands::render(load(args)?, &options)?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("targets", args)) => {
            print!("{}", commands::targets(load(args)?, &user(args))?);
            Ok(ExitCode::SUCCESS)
        }
        Some(("check", args)) => {
            let report = commands::check(&load(args)?);
            print!("{}", report.to_text());
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
