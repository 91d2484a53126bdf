//! Process command - extract an order record from a single saved email.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use clap::Args;
use console::style;
use tracing::{debug, info};

use ordex_core::models::config::OrdexConfig;
use ordex_core::models::order::OrderRecord;
use ordex_core::order::OrderParser;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (saved HTML email body)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Received date used as fallback when the body has no date
    /// (YYYY-MM-DD; default: file modification time)
    #[arg(long)]
    received: Option<NaiveDate>,

    /// Show per-field extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let html = fs::read_to_string(&args.input)?;
    let received = args.received.or_else(|| file_mtime_date(&args.input));
    debug!("fallback received date: {:?}", received);

    info!("Processing file: {}", args.input.display());

    let parser = OrderParser::with_config(config.extraction.clone());
    let Some(result) = parser.parse_html(&html, received) else {
        println!(
            "{} Not an order email (rejected or empty body).",
            style("ℹ").blue()
        );
        return Ok(());
    };

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_record(&result.record, args.format, &config.extraction.currency_symbol)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Load the config file, falling back to defaults when none is given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<OrdexConfig> {
    match config_path {
        Some(path) => Ok(OrdexConfig::from_file(Path::new(path))?),
        None => Ok(OrdexConfig::default()),
    }
}

/// Received-date fallback from the file's modification time.
pub fn file_mtime_date(path: &Path) -> Option<NaiveDate> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.date_naive())
}

pub fn format_record(
    record: &OrderRecord,
    format: OutputFormat,
    currency_symbol: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record, currency_symbol)),
    }
}

pub fn format_csv(record: &OrderRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "customer_name",
        "restaurant",
        "restaurant_address",
        "order_date",
        "amount",
        "items",
    ])?;

    wtr.write_record([
        &record.customer_name,
        &record.restaurant,
        &record.restaurant_address,
        &record.order_date_display(),
        &record
            .amount
            .map(|a| a.to_string())
            .unwrap_or_default(),
        &record.items.join("; "),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(record: &OrderRecord, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Restaurant: {}\n", record.restaurant));
    output.push_str(&format!("Address:    {}\n", record.restaurant_address));
    output.push_str(&format!("Customer:   {}\n", record.customer_name));
    output.push_str(&format!("Date:       {}\n", record.order_date_display()));
    output.push_str(&format!(
        "Amount:     {}\n",
        record.amount_display(currency_symbol)
    ));
    output.push_str("Items:\n");
    for item in &record.items {
        output.push_str(&format!("  - {}\n", item));
    }

    output
}
