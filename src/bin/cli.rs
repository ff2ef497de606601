use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use appaudit::config::Config;
use appaudit::error::AuditError;
use appaudit::output::OutputFormat;
use appaudit::rules::{Catalogue, Severity};
use appaudit::AuditOptions;

#[derive(Parser)]
#[command(
    name = "appaudit",
    about = "Best-practice auditor for App Service configuration snapshots",
    version,
    author
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a configuration snapshot
    Analyze {
        /// Path to the snapshot JSON file
        snapshot: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum severity to fail (low, medium, high, critical)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Evaluate resources in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List all built-in checks
    ListChecks {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .appaudit.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "appaudit=debug" } else { "appaudit=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            snapshot,
            config,
            format,
            fail_on,
            output,
            parallel,
        } => cmd_analyze(snapshot, config, format, fail_on, output, parallel),
        Commands::ListChecks { format } => cmd_list_checks(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_analyze(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
    parallel: bool,
) -> Result<i32, AuditError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let fail_on = fail_on_str.and_then(|s| {
        let sev = Severity::from_str_lenient(&s);
        if sev.is_none() {
            eprintln!("Warning: unknown severity '{}', using config default", s);
        }
        sev
    });

    let options = AuditOptions {
        config_path: config,
        fail_on_override: fail_on,
        parallel,
        analysis_date: None,
    };

    let run = appaudit::analyze(&snapshot, &options)?;
    let rendered = appaudit::render_report(&run, format)?;

    match output_path {
        Some(out) => {
            std::fs::write(&out, &rendered)?;
            eprintln!("Report written to {}", out.display());
        }
        None => print!("{}", rendered),
    }

    // 0 = pass, 1 = findings at or above threshold
    Ok(if run.verdict.pass { 0 } else { 1 })
}

fn cmd_list_checks(format_str: String) -> Result<i32, AuditError> {
    let config = Config::default();
    let catalogue = Catalogue::builtin(&config.thresholds)?;
    let checks = catalogue.list_checks();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&checks)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<11} {:<30} {:<10} CATEGORY",
                "ID", "NAME", "SEVERITY"
            );
            println!("{}", "-".repeat(72));
            for check in &checks {
                println!(
                    "{:<11} {:<30} {:<10} {}",
                    check.id,
                    check.name,
                    check.default_severity.to_string(),
                    check.category,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, AuditError> {
    let path = PathBuf::from(".appaudit.toml");

    if path.exists() && !force {
        eprintln!(".appaudit.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .appaudit.toml");

    Ok(0)
}
