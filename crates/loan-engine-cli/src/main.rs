mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{CompareArgs, PaymentArgs, ScheduleArgs, YearlyArgs};

/// Loan amortization and accelerated-payoff calculations
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization and accelerated-payoff calculations",
    long_about = "A CLI for simulating loan amortization with decimal precision. \
                  Computes standard annuity payments, full period-by-period \
                  schedules, baseline vs. accelerated payoff comparisons, and \
                  per-calendar-year roll-ups for charting."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the fixed monthly payment for a fully amortizing loan
    Payment(PaymentArgs),
    /// Simulate the full period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Compare baseline vs. accelerated payoff with an extra monthly payment
    Compare(CompareArgs),
    /// Roll a schedule up into per-calendar-year principal/interest sums
    Yearly(YearlyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Yearly(args) => commands::loan::run_yearly(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
