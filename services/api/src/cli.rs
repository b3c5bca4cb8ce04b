use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use maturity_assessment::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Maturity Assessment Service",
    about = "Run the digital-maturity assessment service or generate reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute an assessment report from a flat answers JSON file
    Report(ReportArgs),
    /// Run an end-to-end CLI demo against the built-in template
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Assessment template file (JSON array or CSV) replacing the built-in one
    #[arg(long)]
    pub(crate) template: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
