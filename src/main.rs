use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mfv::cli::ui;
use mfv::core::CalcError;
use mfv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported mutual funds
    Funds,
    /// Project the future value of an investment in a fund
    Calculate {
        /// Fund ticker, e.g. VFIAX
        ticker: String,
        /// Initial investment amount
        #[arg(allow_negative_numbers = true)]
        principal: f64,
        /// Investment horizon in years
        #[arg(allow_negative_numbers = true)]
        years: f64,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => mfv::cli::setup::setup(),
        Some(Commands::Funds) => {
            mfv::run_command(mfv::AppCommand::Funds, cli.config_path.as_deref()).await
        }
        Some(Commands::Calculate {
            ticker,
            principal,
            years,
            json,
        }) => {
            let command = mfv::AppCommand::Calculate {
                ticker,
                principal,
                years,
                json,
            };
            mfv::run_command(command, cli.config_path.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        if let Some(calc_error) = e.downcast_ref::<CalcError>() {
            eprintln!(
                "{}",
                ui::style_text(&calc_error.user_message(), ui::StyleType::Error)
            );
            std::process::exit(1);
        }
    }
    result
}
