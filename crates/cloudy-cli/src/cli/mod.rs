mod commands;
mod helpers;

use clap::Parser;
use cloudy_core::domain::GridError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let grid_error = error.as_grid_error();
            eprintln!("{}", grid_error.diagnostic_line());
            eprintln!("{}", grid_error.fatal_exit_line());
            grid_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "cloudy-grid",
    version,
    about = "Prepare, scan and post-process grids of Cloudy runs"
)]
struct Cli {
    /// Log per-point decisions (debug level) unless RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Create run directories and Cloudy input decks for every center
    Generate(commands::GenerateArgs),
    /// Count finished, broken, unstarted and excluded runs
    Scan(commands::ScanArgs),
    /// Integrate line emissivities and write the intensity table
    Integrate(commands::IntegrateArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Generate(args) => commands::run_generate_command(args),
        CliCommand::Scan(args) => commands::run_scan_command(args),
        CliCommand::Integrate(args) => commands::run_integrate_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(GridError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<GridError> for CliError {
    fn from(error: GridError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_grid_error(&self) -> GridError {
        match self {
            Self::Usage(message) => GridError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => GridError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
