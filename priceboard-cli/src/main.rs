//! PriceBoard CLI — import, inspect, and export forecast sources.
//!
//! Commands:
//! - `import` — ingest CSV uploads into the source store
//! - `list` — show stored sources with row counts and date spans
//! - `stats` — print the pooled summary statistics for a selection
//! - `export` — write the merged spreadsheet view as CSV
//! - `sample` — generate demo sources
//! - `remove` — delete a stored source

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use priceboard_core::config::Config;
use priceboard_core::domain::{parse_compact_date, DateRange, Selection};
use priceboard_core::sample::{generate, SampleSpec};
use priceboard_core::{align_rows, ingest, SourceStore, StatsSummary};

#[derive(Parser)]
#[command(
    name = "priceboard",
    about = "PriceBoard CLI — energy-price forecast dashboard data tool"
)]
struct Cli {
    /// Path to a priceboard.toml config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding the source store. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import CSV uploads. The source name is each file's base name;
    /// importing an existing name replaces it.
    Import {
        /// CSV files with date,time,price_fcst,actual_price columns.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List stored sources.
    List,
    /// Print pooled summary statistics for a selection.
    Stats {
        /// Source names, comma separated (e.g. model_a,model_b).
        #[arg(long, value_delimiter = ',', required = true)]
        sources: Vec<String>,

        /// Inclusive range start (YYYYMMDD).
        #[arg(long)]
        start: Option<String>,

        /// Inclusive range end (YYYYMMDD).
        #[arg(long)]
        end: Option<String>,
    },
    /// Export the merged spreadsheet view as CSV.
    Export {
        /// Source names, comma separated; column order follows this list.
        #[arg(long, value_delimiter = ',', required = true)]
        sources: Vec<String>,

        /// Inclusive range start (YYYYMMDD).
        #[arg(long)]
        start: Option<String>,

        /// Inclusive range end (YYYYMMDD).
        #[arg(long)]
        end: Option<String>,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,
    },
    /// Generate demo sources into the store.
    Sample {
        /// Number of model sources to generate.
        #[arg(long, default_value_t = 3)]
        sources: usize,

        /// Calendar days per source.
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// RNG seed; the same seed reproduces the same data.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Delete a stored source.
    Remove {
        /// Source name as shown by `list`.
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let store = SourceStore::new(data_dir);

    match cli.command {
        Commands::Import { files } => run_import(&store, &files),
        Commands::List => run_list(&store),
        Commands::Stats {
            sources,
            start,
            end,
        } => run_stats(&store, sources, start, end),
        Commands::Export {
            sources,
            start,
            end,
            out,
        } => run_export(&store, sources, start, end, &out),
        Commands::Sample {
            sources,
            days,
            seed,
        } => run_sample(&store, sources, days, seed),
        Commands::Remove { name } => run_remove(&store, &name),
    }
}

fn run_import(store: &SourceStore, files: &[PathBuf]) -> Result<()> {
    for path in files {
        let (name, observations) = ingest::read_csv_file(path)
            .with_context(|| format!("importing {}", path.display()))?;
        let meta = store
            .import(&name, &observations)
            .with_context(|| format!("storing source '{name}'"))?;
        println!(
            "imported {}: {} rows, {} .. {}",
            meta.name, meta.rows, meta.first_date, meta.last_date
        );
    }
    Ok(())
}

fn run_list(store: &SourceStore) -> Result<()> {
    let metas = store.list().context("listing sources")?;
    if metas.is_empty() {
        println!("no sources in {}", store.dir().display());
        return Ok(());
    }
    println!(
        "{:<20} {:>8}  {:<10} {:<10}  {}",
        "NAME", "ROWS", "FIRST", "LAST", "FINGERPRINT"
    );
    for meta in metas {
        println!(
            "{:<20} {:>8}  {:<10} {:<10}  {}",
            meta.name,
            meta.rows,
            meta.first_date,
            meta.last_date,
            meta.short_fingerprint()
        );
    }
    Ok(())
}

fn run_stats(
    store: &SourceStore,
    sources: Vec<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let selection = build_selection(sources, start, end)?;
    let collection = store
        .load_selection(&selection.sources)
        .context("loading selection")?
        .filtered(selection.range.as_ref());

    let summary = StatsSummary::compute(&selection, &collection);
    for (label, value) in summary.rows() {
        println!("{label:<18} {value}");
    }
    if summary.mape_excluded > 0 {
        eprintln!(
            "note: {} observation(s) with a zero actual price were excluded from MAPE",
            summary.mape_excluded
        );
    }
    Ok(())
}

fn run_export(
    store: &SourceStore,
    sources: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    out: &std::path::Path,
) -> Result<()> {
    let selection = build_selection(sources, start, end)?;
    let collection = store
        .load_selection(&selection.sources)
        .context("loading selection")?
        .filtered(selection.range.as_ref());

    let rows = align_rows(&selection, &collection);

    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("creating {}", out.display()))?;
    let mut header = vec!["date".to_string(), "time".to_string(), "actual_price".into()];
    header.extend(selection.sources.iter().cloned());
    wtr.write_record(&header)?;

    for row in &rows {
        let mut record = vec![
            row.date.format("%d-%m-%y").to_string(),
            row.time.format("%H:%M").to_string(),
            format!("{:.2}", row.actual_price),
        ];
        for cell in &row.forecasts {
            record.push(match cell {
                Some(value) => format!("{value:.2}"),
                None => "-".to_string(),
            });
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    println!("wrote {} rows to {}", rows.len(), out.display());
    Ok(())
}

fn run_sample(store: &SourceStore, sources: usize, days: u32, seed: u64) -> Result<()> {
    if sources == 0 || days == 0 {
        bail!("--sources and --days must be at least 1");
    }
    let spec = SampleSpec {
        sources,
        days,
        seed,
        ..SampleSpec::default()
    };
    for (name, observations) in generate(&spec) {
        let meta = store
            .import(&name, &observations)
            .with_context(|| format!("storing sample source '{name}'"))?;
        println!("generated {}: {} rows", meta.name, meta.rows);
    }
    Ok(())
}

fn run_remove(store: &SourceStore, name: &str) -> Result<()> {
    store
        .remove(name)
        .with_context(|| format!("removing '{name}'"))?;
    println!("removed {name}");
    Ok(())
}

fn build_selection(
    sources: Vec<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<Selection> {
    let mut selection = Selection::new(sources);
    selection.range = match (start, end) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(DateRange::new(
            parse_flag_date(&start)?,
            parse_flag_date(&end)?,
        )),
        _ => bail!("--start and --end must be given together"),
    };
    Ok(selection)
}

fn parse_flag_date(value: &str) -> Result<NaiveDate> {
    parse_compact_date(value)
        .with_context(|| format!("invalid date '{value}' (expected YYYYMMDD)"))
}
