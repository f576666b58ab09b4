//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads settings from the environment
//! - dispatches to single-file conversion, batch conversion or the weekly update
//! - prints progress and summaries

use clap::Parser;

use crate::cli::{Command, ConvertArgs, WeeklyArgs};
use crate::config::Settings;
use crate::domain::Period;
use crate::error::{AppError, EXIT_FAILURE};
use crate::io::artifact::{convert_json_to_js, default_js_path};
use crate::io::batch::convert_weekly_dir;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    run_from(std::env::args().collect())
}

/// Run with an explicit argv (first element is the program name).
pub fn run_from(argv: Vec<String>) -> Result<(), AppError> {
    run_with(argv, Settings::from_env())
}

/// Run with an explicit argv and settings instead of the process environment.
pub fn run_with(argv: Vec<String>, settings: Settings) -> Result<(), AppError> {
    crate::logging::init();

    // `sales` alone runs the weekly update and `sales a.json [a.js]` converts
    // a single file, like the standalone scripts this tool replaces.
    let argv = rewrite_args(argv);
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Convert(args) => handle_convert(args, &settings),
        Command::Weekly(args) => handle_weekly(args, &settings),
    }
}

fn handle_convert(args: ConvertArgs, settings: &Settings) -> Result<(), AppError> {
    let Some(json_path) = args.json_path else {
        return handle_batch(&args.variable_name, settings);
    };

    let js_path = args.js_path.unwrap_or_else(|| default_js_path(&json_path));
    println!("{}", crate::report::format_converting(&json_path, &js_path));
    let converted = convert_json_to_js(&json_path, &js_path, &args.variable_name)?;
    println!("{}", crate::report::format_converted(&converted));
    Ok(())
}

fn handle_batch(variable_name: &str, settings: &Settings) -> Result<(), AppError> {
    let layout = settings.layout();
    let outcome = convert_weekly_dir(
        &layout.weekly_json_dir(),
        &layout.dashboard_data_dir(),
        variable_name,
    )?;

    println!("{}", crate::report::format_batch_outcome(&outcome));

    let failed = outcome.failures().len();
    if failed > 0 {
        return Err(AppError::new(
            EXIT_FAILURE,
            format!("Error: {failed} file(s) failed to convert"),
        ));
    }
    Ok(())
}

fn handle_weekly(args: WeeklyArgs, settings: &Settings) -> Result<(), AppError> {
    let period = args.date.map(Period::from_date).unwrap_or_else(Period::current);

    println!("{}", crate::report::format_banner("Weekly data update"));
    println!("\nTarget period: {period}\n");

    let processor = settings.processor();
    let run = pipeline::run_weekly(&settings.layout(), period, &processor)?;

    println!("\n{}", crate::report::format_weekly_summary(&run));
    Ok(())
}

/// Rewrite argv so the bare invocations keep working.
///
/// Rules:
/// - `sales`                          -> `sales weekly`
/// - `sales a.json [a.js] ...`        -> `sales convert a.json [a.js] ...`
/// - `sales --date <day> ...`         -> `sales weekly --date <day> ...`
/// - `sales --var <name> ...`, other flags -> `sales convert --var <name> ...`
/// - `sales --help/--version/help`    -> unchanged (show top-level help/version)
/// - `sales <subcommand> ...`         -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("weekly".to_string());
        return argv;
    };

    let subcommand = match arg1.as_str() {
        "convert" | "weekly" | "help" | "-h" | "--help" | "-V" | "--version" => return argv,
        "--date" => "weekly",
        flag if flag.starts_with("--date=") => "weekly",
        // Anything else is a JSON path or a convert flag.
        _ => "convert",
    };
    argv.insert(1, subcommand.to_string());
    argv
}
