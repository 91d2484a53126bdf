//! Batch processing command for multiple saved email files.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Datelike, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use ordex_core::models::order::{OrderRecord, UNKNOWN};
use ordex_core::order::OrderParser;

use super::process::{OutputFormat, file_mtime_date, format_csv, format_text, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-email records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each record
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Save the aggregate text summary to a file
    #[arg(long)]
    save_summary: Option<PathBuf>,

    /// Customer name recorded in the saved summary header
    #[arg(long)]
    name: Option<String>,

    /// Customer phone recorded in the saved summary header
    #[arg(long)]
    phone: Option<String>,
}

/// Outcome of processing a single file.
struct ProcessOutcome {
    path: PathBuf,
    record: Option<OrderRecord>,
    warnings: Vec<String>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "html" | "htm")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} saved emails to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} emails")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = OrderParser::with_config(config.extraction.clone());
    let mut outcomes = Vec::with_capacity(files.len());

    for path in files {
        let outcome = match fs::read_to_string(&path) {
            Ok(html) => {
                let received = file_mtime_date(&path);
                match parser.parse_html(&html, received) {
                    Some(result) => ProcessOutcome {
                        path: path.clone(),
                        record: Some(result.record),
                        warnings: result.warnings,
                        error: None,
                    },
                    None => {
                        debug!("rejected {}", path.display());
                        ProcessOutcome {
                            path: path.clone(),
                            record: None,
                            warnings: Vec::new(),
                            error: None,
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                ProcessOutcome {
                    path: path.clone(),
                    record: None,
                    warnings: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };

        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    // Per-email record outputs
    if let Some(ref output_dir) = args.output_dir {
        for (outcome, record) in outcomes
            .iter()
            .filter_map(|o| o.record.as_ref().map(|r| (o, r)))
        {
            let stem = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("order");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };

            let content = match args.format {
                OutputFormat::Json => serde_json::to_string(record)?,
                OutputFormat::Csv => format_csv(record)?,
                OutputFormat::Text => format_text(record, &config.extraction.currency_symbol),
            };

            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary_csv(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Aggregate statistics
    let stats = OrderStats::collect(&outcomes);
    let text_summary = stats.render(
        args.name.as_deref(),
        args.phone.as_deref(),
        &config.extraction.currency_symbol,
    );

    println!();
    print!("{}", text_summary);

    if let Some(ref path) = args.save_summary {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, &text_summary)?;
        println!(
            "{} Text summary saved to {}",
            style("✓").green(),
            path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} emails in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );

    Ok(())
}

/// Aggregate statistics over a batch of parsed orders.
struct OrderStats {
    total_emails: usize,
    parsed: usize,
    rejected: usize,
    read_errors: usize,
    no_amount: Vec<PathBuf>,
    total_spent: Decimal,
    highest: Option<(Decimal, String)>,
    lowest: Option<(Decimal, String)>,
    spend_by_year: BTreeMap<i32, Decimal>,
    top_items: Vec<(String, usize)>,
}

impl OrderStats {
    fn collect(outcomes: &[ProcessOutcome]) -> Self {
        let mut parsed = 0;
        let mut rejected = 0;
        let mut read_errors = 0;
        let mut no_amount = Vec::new();
        let mut total_spent = Decimal::ZERO;
        let mut highest: Option<(Decimal, String)> = None;
        let mut lowest: Option<(Decimal, String)> = None;
        let mut spend_by_year: BTreeMap<i32, Decimal> = BTreeMap::new();
        let mut item_counts: HashMap<String, usize> = HashMap::new();

        for outcome in outcomes {
            if outcome.error.is_some() {
                read_errors += 1;
                continue;
            }
            let Some(record) = &outcome.record else {
                rejected += 1;
                continue;
            };
            parsed += 1;

            match record.amount {
                Some(amount) => {
                    total_spent += amount;
                    if highest.as_ref().is_none_or(|(a, _)| amount > *a) {
                        highest = Some((amount, record.restaurant.clone()));
                    }
                    if lowest.as_ref().is_none_or(|(a, _)| amount < *a) {
                        lowest = Some((amount, record.restaurant.clone()));
                    }
                    if let Some(date) = record.order_date {
                        *spend_by_year.entry(date.year()).or_default() += amount;
                    }
                }
                None => no_amount.push(outcome.path.clone()),
            }

            for item in &record.items {
                if item != UNKNOWN {
                    *item_counts.entry(item.clone()).or_default() += 1;
                }
            }
        }

        let mut top_items: Vec<(String, usize)> = item_counts.into_iter().collect();
        top_items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_items.truncate(5);

        Self {
            total_emails: outcomes.len(),
            parsed,
            rejected,
            read_errors,
            no_amount,
            total_spent,
            highest,
            lowest,
            spend_by_year,
            top_items,
        }
    }

    fn render(&self, name: Option<&str>, phone: Option<&str>, currency: &str) -> String {
        let mut out = String::new();

        if let Some(name) = name {
            out.push_str(&format!("Name: {}\n", name));
        }
        if let Some(phone) = phone {
            out.push_str(&format!("Phone: {}\n", phone));
        }
        if name.is_some() || phone.is_some() {
            out.push_str(&format!(
                "Generated: {}\n\n",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            ));
        }

        out.push_str(&format!("Total emails:      {}\n", self.total_emails));
        out.push_str(&format!("Orders parsed:     {}\n", self.parsed));
        out.push_str(&format!("Rejected:          {}\n", self.rejected));
        if self.read_errors > 0 {
            out.push_str(&format!("Unreadable files:  {}\n", self.read_errors));
        }
        out.push_str(&format!(
            "Total spent:       {}{:.2}\n",
            currency, self.total_spent
        ));

        if let Some((amount, restaurant)) = &self.highest {
            out.push_str(&format!(
                "Highest order:     {}{:.2} at {}\n",
                currency, amount, restaurant
            ));
        }
        if let Some((amount, restaurant)) = &self.lowest {
            out.push_str(&format!(
                "Lowest order:      {}{:.2} at {}\n",
                currency, amount, restaurant
            ));
        }

        if !self.spend_by_year.is_empty() {
            out.push_str("\nSpend by year:\n");
            for (year, amount) in &self.spend_by_year {
                out.push_str(&format!("  {}: {}{:.2}\n", year, currency, amount));
            }
        }

        if !self.top_items.is_empty() {
            out.push_str("\nMost ordered items:\n");
            for (item, count) in &self.top_items {
                out.push_str(&format!("  {} x {}\n", item, count));
            }
        }

        if !self.no_amount.is_empty() {
            out.push_str("\nEmails without amounts:\n");
            for path in &self.no_amount {
                out.push_str(&format!("  - {}\n", path.display()));
            }
        }

        out
    }
}

fn write_summary_csv(path: &PathBuf, outcomes: &[ProcessOutcome]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "customer_name",
        "restaurant",
        "restaurant_address",
        "order_date",
        "amount",
        "items",
        "warnings",
        "error",
    ])?;

    for outcome in outcomes {
        let filename = outcome
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match (&outcome.record, &outcome.error) {
            (Some(record), _) => {
                wtr.write_record([
                    filename,
                    "parsed",
                    record.customer_name.as_str(),
                    record.restaurant.as_str(),
                    record.restaurant_address.as_str(),
                    record.order_date_display().as_str(),
                    record
                        .amount
                        .map(|a| a.to_string())
                        .unwrap_or_default()
                        .as_str(),
                    record.items.join("; ").as_str(),
                    outcome.warnings.join("; ").as_str(),
                    "",
                ])?;
            }
            (None, Some(error)) => {
                wtr.write_record([filename, "error", "", "", "", "", "", "", "", error.as_str()])?;
            }
            (None, None) => {
                wtr.write_record([filename, "rejected", "", "", "", "", "", "", "", ""])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
