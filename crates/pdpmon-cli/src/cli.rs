//! Command-line parsing and dispatch for the settings console.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pdpmon_config::{SEED_ENV_VAR, SeedSource, SettingsView};
use pdpmon_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use tracing::debug;

use crate::commands::{handle_session, handle_show, handle_snapshot};
use crate::context::{AppContext, CliError, CliResult};

const BUILD_SHA: &str = match option_env!("PDPMON_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

/// Parses CLI arguments and executes the requested command. Returns the
/// process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn execute(cli: Cli) -> CliResult<()> {
    init_logging(&LoggingConfig {
        level: &cli.log_level,
        format: LogFormat::from_name(cli.log_format.as_deref()),
        build_sha: BUILD_SHA,
    })
    .map_err(CliError::failure)?;

    let command_name = command_label(&cli.command);
    let ctx = AppContext {
        seed: SeedSource::from_path(cli.seed),
        output: cli.output,
    };
    debug!(command = command_name, seed = ?ctx.seed, "dispatching command");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Show(args) => handle_show(&ctx, &args, &mut out),
        Command::Snapshot => handle_snapshot(&ctx, &mut out),
        Command::Session(args) => handle_session(&ctx, &args, &mut out),
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Show(_) => "show",
        Command::Snapshot => "snapshot",
        Command::Session(_) => "session",
    }
}

#[derive(Parser)]
#[command(name = "pdpmon", about = "Settings console for the PDP monitoring system")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = SEED_ENV_VAR,
        help = "JSON settings seed used to initialise the store"
    )]
    seed: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "PDPMON_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        env = "PDPMON_LOG_FORMAT",
        help = "Log format (json or pretty); inferred from the build when unset"
    )]
    log_format: Option<String>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the settings panel.
    Show(ShowArgs),
    /// Print the effective settings snapshot.
    Snapshot,
    /// Drive the settings panel from a script or standard input.
    Session(SessionArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ShowArgs {
    #[arg(long, value_parser = parse_view, help = "Settings view to open before rendering")]
    pub(crate) view: Option<SettingsView>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SessionArgs {
    #[arg(long, help = "File of session commands; standard input when omitted")]
    pub(crate) script: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn parse_view(value: &str) -> Result<SettingsView, String> {
    value
        .parse()
        .map_err(|_| format!("unknown settings view '{value}'"))
}
