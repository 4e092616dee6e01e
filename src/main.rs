use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pension::config::ServerConfig;
use pension::core::{CalculationInput, DEFAULT_YEAR, ParameterTable, calculate_pension};

#[derive(Parser, Debug)]
#[command(
    name = "pension",
    about = "Monthly pension estimator (tiered reduced base + early retirement penalty)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve(ServerConfig),
    /// Evaluate the formula once and print the breakdown as JSON.
    Calculate {
        #[arg(long, allow_negative_numbers = true, help = "Average monthly assessment base")]
        ovz_monthly: f64,
        #[arg(long, allow_negative_numbers = true, help = "Years of contribution")]
        years: i64,
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_YEAR)]
        year: i64,
        #[arg(
            long,
            allow_negative_numbers = true,
            default_value_t = 0,
            help = "Days of early retirement"
        )]
        early_days: i64,
    },
    /// List the legislative years with parameter records.
    Years,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(config) => {
            if let Err(e) = pension::api::run_http_server(&config).await {
                eprintln!("Server error: {e}");
                return ExitCode::FAILURE;
            }
        }
        Command::Calculate {
            ovz_monthly,
            years,
            year,
            early_days,
        } => {
            let input = CalculationInput {
                assessment_base: ovz_monthly,
                years,
                year,
                early_days,
            };
            let result = match calculate_pension(input) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: failed to serialize result: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::Years => {
            for year in ParameterTable::standard().supported_years() {
                println!("{year}");
            }
        }
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pension=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
