use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use resumen_finance::{ImportOptions, MemoryStore, export_records_csv, import_statement};
use resumen_ingest::{StatementParser, StatementSummary};
use std::path::{Path, PathBuf};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "resumen",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("RESUMEN_BUILD_SHA"), ")"),
    about = "Mastercard Argentina statement parser"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a PDF statement and print header, transactions and totals
    Parse {
        pdf: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a PDF statement and import it into an in-memory ledger
    Import {
        pdf: PathBuf,

        /// Pesos per dollar (defaults to config import.exchange_rate)
        #[arg(long)]
        rate: Option<f64>,

        /// Book the taxes residual above this many pesos
        #[arg(long)]
        threshold: Option<f64>,

        /// Also write the imported rows to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Manage ~/.resumen/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cfg.logging.level))
        .init();

    match cli.command {
        Command::Parse { pdf, json } => {
            let summary = parse_pdf(&pdf)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary);
            }
        }

        Command::Import {
            pdf,
            rate,
            threshold,
            csv,
        } => {
            let summary = parse_pdf(&pdf)?;

            let filename = pdf
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| pdf.display().to_string());
            let options = ImportOptions::new(filename, chrono::Local::now().date_naive())
                .with_exchange_rate(rate.unwrap_or(cfg.import.exchange_rate))
                .with_materiality_threshold(threshold.unwrap_or(cfg.import.materiality_threshold));

            let mut store = MemoryStore::new();
            let report = import_statement(&mut store, &summary, &options)?;

            println!(
                "Created statement {} ({:02}/{}) with {} transactions",
                report.statement_id(),
                report.stored.statement.month,
                report.stored.statement.year,
                report.transactions_imported()
            );
            for t in &report.stored.transactions {
                println!(
                    "#{:<4} {} | {:35} | {:>4} {:>14.2} | {}",
                    t.id,
                    t.date,
                    truncate(&t.merchant, 35),
                    t.currency.symbol(),
                    t.amount,
                    t.category.label()
                );
            }
            println!(
                "\nTotal: ${:.2} pesos, U$S {:.2}{}",
                report.total_local,
                report.total_foreign,
                if report.taxes_booked { " (includes taxes row)" } else { "" }
            );

            if let Some(csv_path) = csv {
                export_records_csv(&csv_path, store.transactions())?;
                println!("Wrote {}", csv_path.display());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn parse_pdf(pdf: &Path) -> Result<StatementSummary> {
    if !pdf.exists() {
        bail!("PDF not found: {}", pdf.display());
    }
    let parser = StatementParser::new()?;
    parser
        .parse_pdf(pdf)
        .with_context(|| format!("parsing {}", pdf.display()))
}

fn print_summary(summary: &StatementSummary) {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    println!("ESTADO DE CUENTA AL:  {}", date(summary.statement_date()));
    println!("PROXIMO CIERRE:       {}", date(summary.next_closing_date()));
    println!("PROXIMO VENCIMIENTO:  {}", date(summary.next_due_date()));
    println!(
        "SALDO PENDIENTE:      ${:.2} | U$S {:.2}",
        summary.prior_balance().local,
        summary.prior_balance().foreign
    );
    println!(
        "SALDO ACTUAL:         ${:.2} | U$S {:.2}\n",
        summary.current_balance().local,
        summary.current_balance().foreign
    );

    for t in summary.transactions() {
        let pesos = if t.amount_local_currency() != 0.0 {
            format!("${:.2}", t.amount_local_currency())
        } else {
            String::new()
        };
        let dollars = if t.amount_foreign_currency() != 0.0 {
            format!("U$S {:.2}", t.amount_foreign_currency())
        } else {
            String::new()
        };
        println!(
            "{} | {:35} | {:>5} | {:>15} | {:>12}",
            t.date().format("%d-%m-%y"),
            truncate(t.merchant(), 35),
            t.coupon_reference().unwrap_or(""),
            pesos,
            dollars
        );
    }

    println!("\nTransactions: {}", summary.transactions().len());
    println!(
        "Sum of transactions: ${:.2} pesos, U$S {:.2}",
        summary.total_local(),
        summary.total_foreign()
    );
    println!(
        "Taxes and charges:   ${:.2} pesos, U$S {:.2}",
        summary.taxes_local(),
        summary.taxes_foreign()
    );
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
