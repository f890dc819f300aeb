use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fieldops_logistics::{
    config::{self, AppConfig},
    models::status::{
        normalize, normalized_label, normalized_str, CanonicalValue, Normalized, PartLocation,
        PartStatus, PurchaseOrderStatus, SourceType,
    },
    services::{
        adapters::{JobCard, PartRow, PurchaseOrderRow},
        compute_parts_status_at, incoming_purchase_orders,
        job_numbering::next_job_number,
        loading_bay_parts, logistics_jobs, logistics_summary_stats, LogisticsBucket,
    },
    LogisticsDataset, WarningRegistry,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fieldops-cli",
    version,
    about = "Parts readiness and logistics views over exported job data"
)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Evaluate overdue purchase orders as of this RFC 3339 time
    #[arg(long, global = true, value_parser = parse_timestamp)]
    now: Option<DateTime<Utc>>,

    /// Directory holding default.toml and per-environment overrides
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Required, ready, ordered and missing quantities plus PO counts
    Readiness(DatasetArgs),
    /// Purchase orders still on their way, newest first
    Incoming(DatasetArgs),
    /// Parts sitting in the loading bay
    LoadingBay(DatasetArgs),
    /// Logistics jobs grouped by status
    Jobs(DatasetArgs),
    /// Counts for the logistics board header
    Summary(DatasetArgs),
    /// Next free job number
    NextJobNumber(DatasetArgs),
    /// Normalize a raw status or location value
    Normalize(NormalizeArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// JSON document with `parts`, `purchase_orders` and `jobs` arrays
    dataset: PathBuf,
}

#[derive(Args)]
struct NormalizeArgs {
    #[arg(long, value_enum)]
    domain: Domain,

    /// Raw value as stored on the record
    value: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Domain {
    PartStatus,
    PartLocation,
    PoStatus,
    SourceType,
}

#[derive(Serialize)]
struct NormalizeOutput {
    input: String,
    value: String,
    label: String,
    recognized: bool,
    known_values: Vec<&'static str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = config::load_config_from(&cli.config_dir)
        .with_context(|| format!("failed to load config from {}", cli.config_dir.display()))?;
    config::init_tracing(app_config.log_level(), app_config.log_json);

    let now = cli.now.unwrap_or_else(Utc::now);
    debug!(%now, "evaluation time");

    match cli.command {
        Commands::Readiness(args) => handle_readiness(&app_config, args, now, cli.json)?,
        Commands::Incoming(args) => handle_incoming(&app_config, args, now, cli.json)?,
        Commands::LoadingBay(args) => handle_loading_bay(&app_config, args, cli.json)?,
        Commands::Jobs(args) => handle_jobs(&app_config, args, cli.json)?,
        Commands::Summary(args) => handle_summary(&app_config, args, cli.json)?,
        Commands::NextJobNumber(args) => handle_next_job_number(&app_config, args, cli.json)?,
        Commands::Normalize(args) => handle_normalize(args, cli.json)?,
    }

    Ok(())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", raw, e))
}

fn load_dataset(app_config: &AppConfig, args: &DatasetArgs) -> Result<LogisticsDataset> {
    let warnings = WarningRegistry::from_config(app_config);
    LogisticsDataset::load(&args.dataset, &warnings)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))
}

fn handle_readiness(
    app_config: &AppConfig,
    args: DatasetArgs,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let summary = compute_parts_status_at(&dataset.parts, &dataset.purchase_orders, now);

    if json {
        return print_json(&summary);
    }

    println!("Required:     {}", summary.required_count);
    println!("Ready:        {}", summary.ready_count);
    println!("Ordered:      {}", summary.ordered_count);
    println!("Missing:      {}", summary.missing_count);
    println!("Open POs:     {}", summary.open_po_count);
    println!("Overdue POs:  {}", summary.overdue_po_count);
    println!(
        "Parts ready:  {}",
        if summary.parts_ready { "yes" } else { "no" }
    );

    for part in &dataset.parts {
        let row = PartRow::from_part(part);
        println!(
            "  [{}] {} x{} ({}, {})",
            row.category, row.name, row.quantity_required, row.status_label, row.location_label
        );
    }
    Ok(())
}

fn handle_incoming(
    app_config: &AppConfig,
    args: DatasetArgs,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let rows: Vec<PurchaseOrderRow> = incoming_purchase_orders(&dataset.purchase_orders)
        .iter()
        .map(|po| PurchaseOrderRow::from_purchase_order(po, now))
        .collect();

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No incoming purchase orders");
    }
    for row in rows {
        let eta = row
            .eta
            .map(|eta| eta.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no ETA".to_string());
        let flag = if row.is_overdue { " OVERDUE" } else { "" };
        println!(
            "{}  {}  {}  {}{}",
            row.po_number, row.supplier, row.status_label, eta, flag
        );
    }
    Ok(())
}

fn handle_loading_bay(app_config: &AppConfig, args: DatasetArgs, json: bool) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let rows: Vec<PartRow> = loading_bay_parts(&dataset.parts)
        .iter()
        .map(PartRow::from_part)
        .collect();

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("Loading bay is empty");
    }
    for row in rows {
        println!("{} x{}", row.name, row.quantity_required);
    }
    Ok(())
}

fn handle_jobs(app_config: &AppConfig, args: DatasetArgs, json: bool) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let groups = logistics_jobs(&dataset.jobs);

    if json {
        return print_json(&groups);
    }

    for bucket in LogisticsBucket::iter() {
        let jobs = groups.bucket(bucket);
        println!("{} ({})", bucket, jobs.len());
        for job in jobs {
            let card = JobCard::from_job(job);
            println!("  {}  {}  {}", card.display_number, card.customer_name, card.address);
        }
    }
    Ok(())
}

fn handle_summary(app_config: &AppConfig, args: DatasetArgs, json: bool) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let stats = logistics_summary_stats(&dataset.purchase_orders, &dataset.jobs, &dataset.parts);

    if json {
        return print_json(&stats);
    }

    println!("Incoming POs:       {}", stats.incoming_po_count);
    println!("Logistics jobs:     {}", stats.logistics_job_count);
    println!("Loading bay parts:  {}", stats.loading_bay_part_count);
    Ok(())
}

fn handle_next_job_number(app_config: &AppConfig, args: DatasetArgs, json: bool) -> Result<()> {
    let dataset = load_dataset(app_config, &args)?;
    let next = next_job_number(&dataset.jobs, app_config.job_number_start);

    if json {
        return print_json(&serde_json::json!({ "next_job_number": next }));
    }
    println!("{}", next);
    Ok(())
}

fn handle_normalize(args: NormalizeArgs, json: bool) -> Result<()> {
    let output = match args.domain {
        Domain::PartStatus => describe::<PartStatus>(&args.value),
        Domain::PartLocation => describe::<PartLocation>(&args.value),
        Domain::PoStatus => describe::<PurchaseOrderStatus>(&args.value),
        Domain::SourceType => describe::<SourceType>(&args.value),
    };

    if json {
        return print_json(&output);
    }

    if output.recognized {
        println!("{} ({})", output.value, output.label);
    } else {
        println!(
            "unrecognized: '{}' (known values: {})",
            output.input,
            output.known_values.join(", ")
        );
    }
    Ok(())
}

fn describe<T: CanonicalValue>(raw: &str) -> NormalizeOutput {
    let normalized: Normalized<T> = normalize(Some(raw));
    NormalizeOutput {
        input: raw.to_string(),
        value: normalized_str(&normalized).to_string(),
        label: normalized_label(&normalized).to_string(),
        recognized: normalized.is_ok(),
        known_values: T::iter().map(CanonicalValue::as_str).collect(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}
