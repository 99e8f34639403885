use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::debug;
use vulnfix::{
    config::Config,
    logging::{self, LogConfig},
    model::Symbol,
    output::{format_report_to_string, print_report, OutputFormat},
    report, Catalog, FixStatus,
};

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const VULNERABLE: u8 = 3;
}

#[derive(Parser)]
#[command(name = "vulnfix")]
#[command(
    author,
    version,
    about = "Find the latest fixed version of vulnerable modules in OSV advisories"
)]
struct Cli {
    /// Enable debug logging with module targets
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the latest version fixing every advisory for a module
    Fixed {
        /// Module path (e.g. golang.org/x/text)
        #[arg(short, long)]
        module: String,

        /// OSV file or directory (defaults to the configured catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Print absent, unresolved, or the fixed version instead of a bare version
        #[arg(long)]
        status: bool,
    },

    /// Print the package path declaring a call-graph symbol
    PkgPath {
        /// Symbol as JSON, e.g. '{"recv_type": "*a.com/b.T", "name": "M"}'
        symbol: String,
    },

    /// Report advisories affecting a list of reachable symbols
    Scan {
        /// JSON file holding an array of symbols
        #[arg(short, long)]
        symbols: PathBuf,

        /// OSV file or directory (defaults to the configured catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Output format (table, json, text)
        #[arg(short, long)]
        format: Option<String>,

        /// Write output to file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with code 3 if any finding is reported
        #[arg(long)]
        fail: bool,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    logging::init(&LogConfig::from_cli(cli.verbose, &config.log_level));

    match cli.command {
        Commands::Fixed {
            module,
            catalog,
            status,
        } => {
            let catalog = load_catalog(catalog, &config)?;
            let fix = catalog.fix_status(&module);
            if status {
                match fix {
                    FixStatus::Absent => println!("absent"),
                    FixStatus::Unresolved => println!("unresolved"),
                    FixStatus::Fixed(v) => println!("fixed {}", v),
                }
            } else {
                println!("{}", fix.into_version());
            }
            Ok(exit_codes::SUCCESS)
        }
        Commands::PkgPath { symbol } => {
            let symbol: Symbol =
                serde_json::from_str(&symbol).context("Symbol must be a JSON object")?;
            println!("{}", vulnfix::package_path(&symbol));
            Ok(exit_codes::SUCCESS)
        }
        Commands::Scan {
            symbols,
            catalog,
            format,
            output,
            fail,
        } => run_scan(symbols, catalog, format, output, fail, &config),
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn load_catalog(flag: Option<PathBuf>, config: &Config) -> Result<Catalog> {
    let path = flag.or_else(|| config.catalog.clone()).context(
        "No catalog given. Pass --catalog or set `catalog` in the config file",
    )?;
    let catalog = Catalog::load(&path)?;
    debug!(path = %path.display(), entries = catalog.len(), "catalog ready");
    Ok(catalog)
}

fn run_scan(
    symbols_file: PathBuf,
    catalog: Option<PathBuf>,
    format: Option<String>,
    output_file: Option<PathBuf>,
    fail: bool,
    config: &Config,
) -> Result<u8> {
    let format = format.unwrap_or_else(|| config.default_format.clone());
    let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;

    let catalog = load_catalog(catalog, config)?;

    let content = std::fs::read_to_string(&symbols_file)
        .with_context(|| format!("Failed to read {}", symbols_file.display()))?;
    let symbols: Vec<Symbol> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid symbols file {}", symbols_file.display()))?;

    let report = report::scan(&catalog, &symbols, &config.ignore);

    if let Some(path) = output_file {
        std::fs::write(&path, format_report_to_string(&report, format)?)?;
        println!("Results written to: {}", path.display());
    } else {
        print_report(&report, format)?;
    }

    if fail && report.has_findings() {
        Ok(exit_codes::VULNERABLE)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'vulnfix config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
