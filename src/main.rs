mod cli;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use vinelab::config::Config;
use vinelab::logic::reminders::days_since;
use vinelab::models::RawTestRecord;
use vinelab::{Analysis, LabEngine, Parameter, TestType};

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref()).context("Configuration error")?;
    let engine = LabEngine::with_tables(config.to_tables()?);

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Analyze { file, start, json } => {
            analyze(&engine, &file, start.unwrap_or(today), json)
        }
        Commands::Remind {
            soil_date,
            petiole_date,
            today: reference,
        } => {
            let reference = reference.unwrap_or(today);
            let age = |date: Option<NaiveDate>| date.map(|d| days_since(d, reference));
            let reminders = engine.check_test_reminders(age(soil_date), age(petiole_date));
            println!(
                "Soil test:    {}",
                if reminders.soil_test_needed { "due" } else { "up to date" }
            );
            println!(
                "Petiole test: {}",
                if reminders.petiole_test_needed { "due" } else { "up to date" }
            );
            Ok(())
        }
        Commands::Ranges { test_type } => {
            let test_type = TestType::from(test_type);
            println!("Plausible {} ranges:", test_type);
            for (parameter, range) in engine.tables().validation.ranges(test_type) {
                println!(
                    "  {:<16} {:>8} - {:<8} {}",
                    parameter.label(),
                    range.min,
                    range.max,
                    parameter.unit(test_type)
                );
            }
            Ok(())
        }
        Commands::Params => {
            println!("{:<16} {:<16} {:<8} {:<8}", "KEY", "NAME", "SOIL", "PETIOLE");
            for parameter in Parameter::all() {
                println!(
                    "{:<16} {:<16} {:<8} {:<8}",
                    parameter.key(),
                    parameter.label(),
                    parameter.unit(TestType::Soil),
                    parameter.unit(TestType::Petiole)
                );
            }
            Ok(())
        }
    }
}

fn analyze(engine: &LabEngine, path: &Path, start: NaiveDate, json: bool) -> Result<()> {
    let raw = read_record(path)?;
    let (record, report) = raw.into_record()?;

    if !report.unrecognized.is_empty() {
        tracing::warn!("Ignored unrecognized parameters: {}", report.unrecognized.join(", "));
    }
    if !report.dropped.is_empty() {
        tracing::warn!("Dropped non-numeric values for: {}", report.dropped.join(", "));
    }
    if !report.duplicates.is_empty() {
        tracing::warn!("Duplicate parameters (last value kept): {}", report.duplicates.join(", "));
    }
    if record.parameters.is_empty() {
        bail!("No usable parameters in {}", path.display());
    }

    let analysis = engine.analyze(&record, start);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&record.farm_id, record.test_type, record.date, &analysis);
    }
    Ok(())
}

fn read_record(path: &Path) -> Result<RawTestRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let record = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
    };
    Ok(record)
}

fn print_analysis(farm_id: &str, test_type: TestType, date: NaiveDate, analysis: &Analysis) {
    let farm = if farm_id.is_empty() { "-" } else { farm_id };
    println!("Farm {} | {} test of {}", farm, test_type, date);
    println!();

    println!("Recommendations");
    for rec in &analysis.recommendations {
        println!(
            "  {:<2} [{}] {}: {}",
            rec.priority.symbol(),
            rec.priority,
            rec.parameter,
            rec.simplified
        );
        println!("       {}", rec.technical);
    }

    if analysis.plan.is_empty() {
        println!();
        println!("No corrective applications needed.");
        return;
    }

    println!();
    println!("Fertilizer plan");
    for item in &analysis.plan {
        println!("  {} ({})", item.month, item.growth_stage);
        for app in &item.applications {
            println!(
                "    - {} at {} [{}] for {}",
                app.product,
                app.dosage,
                app.method.as_str(),
                app.purpose
            );
        }
        if !item.notes.is_empty() {
            println!("    {}", item.notes);
        }
    }
}
