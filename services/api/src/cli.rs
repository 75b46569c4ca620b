use crate::demo::{run_demo, run_presets, run_schedule, DemoArgs, ScheduleArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use holiday_hours::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Holiday Hours",
    about = "Serve and preview holiday hours pages for small businesses",
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
    /// Print a holiday schedule read from a JSON file
    Schedule(ScheduleArgs),
    /// List the preset holidays offered to new pages
    Presets,
    /// Walk through page creation with preset data and print the preview
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
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Schedule(args) => run_schedule(args),
        Command::Presets => {
            run_presets();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
