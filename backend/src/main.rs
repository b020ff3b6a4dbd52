//! Oilboard CLI - query the oil-production dashboard engine
//!
//! # Main Commands
//!
//! ```bash
//! oilboard exports --top top10 --category 50      # Filtered exports table
//! oilboard producers --region "Medio Oriente" --sort reserves
//! oilboard dashboard --top top5                   # Every chart series as JSON
//! oilboard summary                                # Header statistics
//! ```
//!
//! # Lookup Commands
//!
//! ```bash
//! oilboard region Rusia            # Region of a country
//! oilboard regions                 # Region table
//! oilboard label 35                # Category label
//! oilboard categories              # Category table
//! oilboard fracking Argentina      # Fracking membership
//! oilboard validate oil_data.json  # Schema check
//! ```

use clap::{Args, Parser, Subcommand};
use oilboard::{
    build_dashboard, dataset, filter_exports, filter_producers, format_number,
    logs::{log_error, log_info, log_success, log_warning},
    export::{render, to_json, write_output},
    summarize, validation::validate_dataset,
    Catalog, Config, ExportSortKey, FilterCriteria, OilDataset, OutputFormat, ProducerSortKey,
    TopRange,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oilboard")]
#[command(about = "Filter, sort and rank global oil-production statistics", long_about = None)]
struct Cli {
    /// Dataset file (default: $OILBOARD_DATA or public/oil_data.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Catalog override file (default: $OILBOARD_CATALOG or built-in tables)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by every engine command.
#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Keep the top N after sorting: all, top5, top10, top20
    #[arg(short, long, default_value = "all")]
    top: TopRange,

    /// GDP oil category code (repeatable, exports only)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Region name (repeatable)
    #[arg(short, long = "region")]
    regions: Vec<String>,

    /// Country name (repeatable)
    #[arg(short, long = "country")]
    countries: Vec<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_top_range(self.top)
            .with_categories(self.categories.iter().cloned())
            .with_regions(self.regions.iter().cloned())
            .with_countries(self.countries.iter().cloned())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and rank the exports table
    Exports {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort key: daily-production, proven-reserves, population
        #[arg(short, long, default_value = "daily-production")]
        sort: ExportSortKey,

        /// Output format: json, csv
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Filter and rank the producers table
    Producers {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort key: daily-production, daily-production-thousands,
        /// years-of-production-remaining, proven-reserves, population
        #[arg(short, long, default_value = "daily-production")]
        sort: ProducerSortKey,

        /// Output format: json, csv
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute every chart series for one filter state
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show header statistics
    Summary,

    /// Show the region of a country
    Region {
        country: String,
    },

    /// List the region table
    Regions,

    /// Show the label of a GDP category code
    Label {
        code: String,
    },

    /// List GDP category codes and labels
    Categories,

    /// Check whether a country is in the fracking set
    Fracking {
        country: String,
    },

    /// Validate a dataset file against the schema
    Validate {
        /// Dataset JSON file
        input: PathBuf,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.data, cli.catalog);

    if let Err(e) = run(cli.command, &config) {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.load_catalog()?;

    match command {
        Commands::Exports { filters, sort, format, output } => {
            let dataset = dataset::load_or_empty(config.data_path());
            cmd_exports(&dataset, &catalog, &filters, sort, format, output.as_deref())
        }

        Commands::Producers { filters, sort, format, output } => {
            let dataset = dataset::load_or_empty(config.data_path());
            cmd_producers(&dataset, &catalog, &filters, sort, format, output.as_deref())
        }

        Commands::Dashboard { filters, output } => {
            let dataset = dataset::load_or_empty(config.data_path());
            let view = build_dashboard(&dataset, &filters.criteria(), &catalog);
            write_output(&to_json(&view)?, output.as_deref())?;
            Ok(())
        }

        Commands::Summary => {
            let dataset = dataset::load_or_empty(config.data_path());
            cmd_summary(&dataset)
        }

        Commands::Region { country } => {
            match catalog.region_of(&country) {
                Some(region) => println!("{}", region),
                None => {
                    log_warning(format!("{} is not in any region", country));
                    std::process::exit(1);
                }
            }
            Ok(())
        }

        Commands::Regions => {
            for region in catalog.regions() {
                println!("{} ({})", region.name, region.countries.len());
                println!("   {}", region.countries.join(", "));
            }
            for (country, regions) in catalog.overlapping_countries() {
                log_warning(format!("{} is listed in {}", country, regions.join(", ")));
            }
            Ok(())
        }

        Commands::Label { code } => {
            println!("{}", catalog.label_of(&code));
            Ok(())
        }

        Commands::Categories => {
            for entry in catalog.category_labels() {
                println!("{:>3}  {}", entry.code, entry.label);
            }
            Ok(())
        }

        Commands::Fracking { country } => {
            let fracking = catalog.is_fracking_country(&country);
            println!("{}", fracking);
            Ok(())
        }

        Commands::Validate { input } => cmd_validate(&input),
    }
}

fn cmd_exports(
    dataset: &OilDataset,
    catalog: &Catalog,
    filters: &FilterArgs,
    sort: ExportSortKey,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = filter_exports(&dataset.data.exports, &filters.criteria(), sort, catalog);
    log_success(format!(
        "{} of {} exports ({:?}, {})",
        records.len(),
        dataset.data.exports.len(),
        sort,
        filters.top
    ));

    write_output(&render(&records, format)?, output)?;
    Ok(())
}

fn cmd_producers(
    dataset: &OilDataset,
    catalog: &Catalog,
    filters: &FilterArgs,
    sort: ProducerSortKey,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !filters.categories.is_empty() {
        log_warning("--category applies to exports only; ignored for producers");
    }

    let records = filter_producers(&dataset.data.producers, &filters.criteria(), sort, catalog);
    log_success(format!(
        "{} of {} producers ({:?}, {})",
        records.len(),
        dataset.data.producers.len(),
        sort,
        filters.top
    ));

    write_output(&render(&records, format)?, output)?;
    Ok(())
}

fn cmd_summary(dataset: &OilDataset) -> Result<(), Box<dyn std::error::Error>> {
    let summary = summarize(dataset);

    match &summary.top_producer {
        Some(top) => println!(
            "Top producer:      {} ({} bbl/d)",
            top.country,
            format_number(top.daily_production)
        ),
        None => println!("Top producer:      N/A"),
    }
    println!(
        "Total production:  {:.1}M bbl/d",
        summary.total_production / 1_000_000.0
    );
    println!("Total reserves:    {:.0} MMM bbl", summary.total_reserves);
    println!("Countries:         {}", summary.country_count);
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("Validating: {}", input.display()));

    let content = fs::read_to_string(input)?;
    let document: Value = serde_json::from_str(&content)?;

    match validate_dataset(&document) {
        Ok(()) => {
            log_success("Dataset is valid");
            Ok(())
        }
        Err(errors) => {
            for err in errors.iter().take(10) {
                log_error(err.as_str());
            }
            log_warning(format!("{} schema errors", errors.len()));
            std::process::exit(1);
        }
    }
}
