use clap::{Parser, Subcommand};
use colored::Colorize;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dbtlink_core::{Config, TargetOutcome, ValidationReport, WarehouseType};
use dbtlink_jinja::ProfileRenderer;
use dbtlink_profiles::{resolve_profile_credentials, DbtProject, Profile, ProfileStore};
use dbtlink_warehouses::{warehouse_client_for_target, warehouse_client_from_credentials};

/// dbtlink - resolve dbt profiles.yml targets into warehouse connections
#[derive(Parser)]
#[command(name = "dbtlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing profiles.yml (default: ~/.dbt)
    #[arg(long, global = true, env = "DBT_PROFILES_DIR")]
    profiles_dir: Option<PathBuf>,

    /// dbt project directory, used to find dbt_project.yml
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Path to config file (default: dbtlink.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one target and show its credentials and client
    Debug {
        /// Profile name (default: the profile in dbt_project.yml)
        #[arg(short, long)]
        profile: Option<String>,

        /// Target name (default: the profile's default target)
        #[arg(short, long, env = "DBT_TARGET")]
        target: Option<String>,

        /// Print passwords, tokens and keys
        #[arg(long)]
        show_secrets: bool,

        /// Print canonical credentials as JSON only
        #[arg(long)]
        json: bool,
    },

    /// List profiles and their targets
    Targets,

    /// Resolve every target of every profile
    Validate {
        /// Output file for the validation report
        #[arg(short, long, default_value = "dbtlink-report.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // A missing .env is fine; env_var() then only sees the process environment
    if let Ok(path) = dotenvy::dotenv() {
        if cli.verbose {
            eprintln!("{} {}", "Loaded environment from".cyan(), path.display());
        }
    }

    let config = load_config(&cli)?;
    let profiles_dir = profiles_dir(&cli, &config);

    if cli.verbose {
        eprintln!("{} {}", "Using profiles from:".cyan(), profiles_dir.display());
    }

    let renderer = ProfileRenderer::from_process_env();
    let store = ProfileStore::from_dir(&profiles_dir, &renderer)?;

    match cli.command {
        Commands::Debug { profile, target, show_secrets, json } => {
            let profile = match profile.or_else(|| config.profile.clone()) {
                Some(profile) => profile,
                None => project_profile(&cli.project_dir)?,
            };
            let target = target.or_else(|| config.target.clone());
            let redact = config.redact_secrets && !show_secrets;

            debug_command(&store, &profile, target.as_deref(), redact, json)
        }
        Commands::Targets => targets_command(&store),
        Commands::Validate { output } => validate_command(&store, &output, cli.verbose),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        return Ok(Config::from_file(config_path)?);
    }

    let default_path = cli.project_dir.join(Config::FILE_NAME);
    if default_path.exists() {
        Ok(Config::from_file(&default_path)?)
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Ok(Config::default())
    }
}

/// `--profiles-dir`/`DBT_PROFILES_DIR`, then dbtlink.toml, then `~/.dbt`
fn profiles_dir(cli: &Cli, config: &Config) -> PathBuf {
    cli.profiles_dir
        .clone()
        .or_else(|| config.resolved_profiles_dir())
        .unwrap_or_else(|| home_dir().join(".dbt"))
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn project_profile(project_dir: &Path) -> Result<String> {
    let project = DbtProject::from_dir(project_dir)
        .context("No --profile given and dbt_project.yml could not be read")?;
    Ok(project.profile_name().to_string())
}

/// Debug command - run the whole pipeline for one target
fn debug_command(
    store: &ProfileStore,
    profile: &str,
    target: Option<&str>,
    redact: bool,
    json: bool,
) -> Result<()> {
    let resolved = resolve_profile_credentials(store, profile, target)?;

    let shown = if redact {
        resolved.credentials.redacted()
    } else {
        resolved.credentials.clone()
    };

    let client = warehouse_client_from_credentials(resolved.credentials)?;

    if json {
        println!("{}", shown.to_json()?);
        return Ok(());
    }

    println!("{} {}", "Profile:".bold(), resolved.profile);
    println!("{} {}", "Target: ".bold(), resolved.target_name);
    println!("{} {}", "Type:   ".bold(), client.warehouse_type());
    println!("{} {}", "Client: ".bold(), client.describe());
    println!();
    println!("{}", "Credentials:".bold());

    let value = serde_json::to_value(&shown)?;
    if let Some(fields) = value.as_object() {
        for (key, value) in fields {
            println!("  {}: {}", key.cyan(), value);
        }
    }

    println!();
    println!("{}", "✓ All checks passed".green());

    Ok(())
}

/// Targets command - list profiles, targets and their types
fn targets_command(store: &ProfileStore) -> Result<()> {
    if store.is_empty() {
        println!("{} {}", "No profiles found in".yellow(), store.path());
        return Ok(());
    }

    for (name, profile) in store.profiles() {
        println!("{}", name.bold());

        for target_name in profile.target_names() {
            let type_tag = profile
                .get_target(target_name)
                .and_then(|raw| raw.get("type"))
                .and_then(|value| value.as_str())
                .unwrap_or("?");

            let marker = if profile.default_target() == Some(target_name) {
                " (default)".green().to_string()
            } else {
                String::new()
            };

            println!("  {} [{}]{}", target_name, type_tag.cyan(), marker);
        }

        match profile.default_target() {
            Some(default) if profile.output(default).is_none() => {
                println!("  {} default target '{}' is not defined", "⚠".yellow(), default);
            }
            Some(_) => {}
            None => println!("  {} no default target", "⚠".yellow()),
        }
    }

    Ok(())
}

/// Validate command - resolve every target and write a report
fn validate_command(store: &ProfileStore, output: &Path, verbose: bool) -> Result<()> {
    let report = validate_store(store, verbose);

    report.save_to_file(output)?;

    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    print_report_summary(&report);

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve every target of every profile through to a client
fn validate_store(store: &ProfileStore, verbose: bool) -> ValidationReport {
    let mut report = ValidationReport::new(store.path());

    for (name, profile) in store.profiles() {
        for target_name in profile.target_names() {
            if verbose {
                eprintln!("  {} {}.{}...", "Checking".cyan(), name, target_name);
            }
            report.add_outcome(check_target(store, name, profile, target_name));
        }
    }

    report
}

fn check_target(store: &ProfileStore, name: &str, profile: &Profile, target_name: &str) -> TargetOutcome {
    let is_default = profile.default_target() == Some(target_name);

    match warehouse_client_for_target(store, name, Some(target_name)) {
        Ok(client) => TargetOutcome::valid(name, target_name, client.warehouse_type(), is_default),
        Err(error) => {
            let warehouse_type = profile
                .get_target(target_name)
                .and_then(|raw| raw.get("type"))
                .and_then(|value| value.as_str())
                .and_then(WarehouseType::from_tag);
            TargetOutcome::invalid(&error, warehouse_type, is_default)
        }
    }
}

fn print_report_summary(report: &ValidationReport) {
    println!();
    println!("{}", "Target Validation Report".bold());
    println!("{}", "========================".bold());
    println!();

    for outcome in &report.targets {
        let label = format!("{}.{}", outcome.profile, outcome.target);
        if outcome.is_valid() {
            let type_tag = outcome.warehouse_type.map(|w| w.as_str()).unwrap_or("?");
            println!("  {} {} [{}]", "✓".green(), label, type_tag);
        } else {
            let code = outcome.code.map(|c| c.as_str()).unwrap_or("UNKNOWN");
            println!("  {} {} {}", "✗".red(), label, code.red());
            if let Some(message) = &outcome.message {
                for line in message.lines() {
                    println!("      {}", line);
                }
            }
        }
    }

    println!();
    println!(
        "{} targets: {} valid, {} invalid",
        report.summary.total,
        report.summary.valid.to_string().green(),
        report.summary.invalid.to_string().red()
    );
}
