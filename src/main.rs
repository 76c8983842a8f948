use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use rent_receipt::config::{config_dir, expand_path, init_config_dir, load_settings};
use rent_receipt::error::{ReceiptError, Result};
use rent_receipt::receipt::{check_month_limit, expand, generate_receipts, ReceiptRequest};
use rent_receipt::web::{self, AppState};

#[derive(Parser)]
#[command(name = "receipt")]
#[command(version, about = "Monthly rent receipt PDF generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: platform config dir for rent-receipt)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with settings and a sample receipt config
    Init,

    /// Generate one receipt per month from a JSON receipt config
    Generate {
        /// Receipt config file
        #[arg(default_value = "config.json")]
        config: PathBuf,

        /// Custom output file path (default: output dir/Rent_Receipts_<start>_to_<end>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Show the months and receipt dates a date range covers
    Months {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },

    /// Serve the interactive receipt form
    Serve {
        /// Address to listen on (default: from settings.toml)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.command);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(command: &Commands) {
    let default_level = match command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Generate {
            config,
            output,
            open,
        } => cmd_generate(&cfg_dir, &config, output, open),
        Commands::Months { from, to } => cmd_months(from, to),
        Commands::Serve { bind } => cmd_serve(&cfg_dir, bind),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized receipt config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Adjust output and log folders:  $EDITOR {}/settings.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Fill in tenant and owner:       $EDITOR {}/receipt.json",
        cfg_dir.display()
    );
    println!();
    println!("Then generate your receipts:");
    println!("  receipt generate {}/receipt.json", cfg_dir.display());

    Ok(())
}

/// Batch entry point
fn cmd_generate(
    cfg_dir: &Path,
    config: &Path,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let settings = load_settings(cfg_dir)?;
    let request = ReceiptRequest::load(config)?;

    let output_dir = expand_path(&settings.output.dir);
    let pdf_path = generate_receipts(&request, &output_dir, output)?;

    println!("Rent receipts saved as {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "RECEIPT DATE")]
    date: String,
}

/// Preview the receipts a range would produce
fn cmd_months(from: NaiveDate, to: NaiveDate) -> Result<()> {
    check_month_limit(from, to)?;
    let months = expand(from, to)?;

    let rows: Vec<MonthRow> = months
        .iter()
        .enumerate()
        .map(|(idx, month)| MonthRow {
            index: idx + 1,
            month: month.to_string(),
            date: month.display_date(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} receipt(s)", months.len());

    Ok(())
}

/// Interactive entry point
fn cmd_serve(cfg_dir: &Path, bind: Option<String>) -> Result<()> {
    let settings = load_settings(cfg_dir)?;
    let addr = bind.unwrap_or(settings.server.bind);
    let state = AppState::new(expand_path(&settings.logs.dir));

    println!("Serving receipt form on http://{addr}/");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(&addr, state))
}

fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReceiptError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReceiptError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(pdf_path)
            .spawn()
            .map_err(ReceiptError::Io)?;
    }
    Ok(())
}
