use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod household;
mod output;

#[derive(Parser)]
#[command(name = "pawpal", version, about = "PawPal pet-care planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through the built-in demo household
    Demo(commands::demo::DemoArgs),
    /// Plan a day for a household file
    Plan(commands::plan::PlanArgs),
    /// List a household's tasks ordered by due time
    Tasks(commands::tasks::TasksArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Demo(args) => commands::demo::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Tasks(args) => commands::tasks::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
