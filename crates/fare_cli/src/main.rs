use std::error::Error;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use fare_core::comparison::{record_comparison, ComparisonRecord, ComparisonResult, ComparisonService};
use fare_core::config::{CompareConfig, MAPS_API_KEY_ENV};
use fare_core::counters::{CounterSnapshot, CounterStore};
use fare_core::location::{LocationPair, CURRENT_LOCATION};
use fare_core::places::suggest_places;
use fare_core::savings::{group_thousands, SavingsSummary};
use fare_core::views::{select, OfferView, ViewEntry};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "ridecompare",
    about = "Compare ride fares across Uber, Ola and Rapido",
    long_about = "Estimates a trip between two places, prices every ride tier,\n\
                  tags the cheapest, fastest and best-value options, and keeps\n\
                  a running tally of how much comparing has saved you."
)]
struct Cli {
    /// JSON config file; defaults apply when omitted
    #[arg(long, global = true, env = "RIDE_COMPARE_CONFIG")]
    config: Option<PathBuf>,
    /// Counter file, overriding the config
    #[arg(long, global = true)]
    counters: Option<PathBuf>,
    /// JSON route table used when no maps API key is set
    #[arg(long, global = true)]
    route_table: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare ride offers between two places
    Compare {
        /// Pickup location
        #[arg(long, default_value = CURRENT_LOCATION)]
        from: String,
        /// Destination
        #[arg(long)]
        to: String,
        /// Fixed RNG seed for reproducible fares
        #[arg(long)]
        seed: Option<u64>,
        /// Which offers to show: all, economy, premium or fastest
        #[arg(long, default_value_t = OfferView::All)]
        view: OfferView,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest places for a partially typed address
    Suggest {
        /// At least three characters of an address
        partial: String,
        /// Country restriction (ISO 3166-1 alpha-2), overriding the config
        #[arg(long)]
        country: Option<String>,
    },
    /// Show the savings tracker
    Stats,
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    // A second init only happens if something else installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<CompareConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => CompareConfig::from_file(path)?,
        None => CompareConfig::default(),
    }
    .with_env_overrides();
    if let Some(path) = &cli.counters {
        config = config.with_counters_path(path);
    }
    if let Some(path) = &cli.route_table {
        config = config.with_route_table(path);
    }
    Ok(config)
}

fn print_entry(entry: &ViewEntry<'_>) {
    let offer = entry.offer;
    let marker = if entry.highlighted { '*' } else { ' ' };
    let reason = entry
        .reason
        .map(|reason| format!("  [{reason}]"))
        .unwrap_or_default();
    println!(
        "{marker} {:<7} {:<12} ₹{:>5}  pickup {:>2} min  trip {:>3} min  ★{:.1}{reason}",
        offer.provider.to_string(),
        offer.tier_name,
        offer.fare,
        offer.eta_minutes,
        offer.travel_time_minutes,
        offer.rating,
    );
}

// ── Commands ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct CompareOutput<'a> {
    view: OfferView,
    lookup_configured: bool,
    result: &'a ComparisonResult,
    shown: Vec<ViewEntry<'a>>,
    record: ComparisonRecord,
}

fn run_compare(
    config: CompareConfig,
    pair: LocationPair,
    view: OfferView,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let service = ComparisonService::new(config.build_route_lookup(), config.pricing.clone());
    let mut rng = config.rng();
    let result = service.compare(&pair, &mut rng);
    let record = record_comparison(&config.counter_store(), &result)?;
    let shown = select(&result.offers, view);

    if json {
        let output = CompareOutput {
            view,
            lookup_configured: service.is_lookup_configured(),
            result: &result,
            shown,
            record,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} → {}", pair.pickup(), pair.destination());
    println!(
        "Distance: {}  Duration: {}",
        result.estimate.distance_text(),
        result.estimate.duration_text()
    );
    if !service.is_lookup_configured() {
        println!("Demo mode: distances are simulated. Set {MAPS_API_KEY_ENV} for live routes.");
    }
    println!();
    println!("Showing {view} rides:");
    if shown.is_empty() {
        println!("  No rides in this category.");
    }
    for entry in &shown {
        print_entry(entry);
    }
    println!();
    println!(
        "Picking the cheapest ride saves about ₹{} on this trip.",
        record.savings_added
    );
    if let Some(milestone) = record.milestone {
        println!("{}: {}", milestone.title(), milestone.description());
    }
    Ok(())
}

fn run_suggest(config: &CompareConfig, partial: &str, country: Option<String>) {
    let country = country.unwrap_or_else(|| config.country.clone());
    let suggester = config.build_place_suggester();
    let suggestions = suggest_places(suggester.as_ref(), partial, &country);
    if suggestions.is_empty() {
        eprintln!("No suggestions for '{partial}'.");
    }
    for suggestion in suggestions {
        println!("{suggestion}");
    }
}

fn run_stats(store: &dyn CounterStore) {
    let snapshot = CounterSnapshot::read(store);
    let summary = SavingsSummary::from(snapshot);
    if summary.is_fresh() {
        println!("Start Saving Today");
        println!("Compare rides to track how much you save on every trip.");
        return;
    }

    println!("Total saved: ₹{}", group_thousands(summary.total_savings));
    println!("Rides compared: {}", summary.rides_compared);
    if summary.has_super_saver_badge() {
        println!("Badge: Super Saver");
    }
    println!("{}", summary.fact_at(snapshot.comparisons_made as usize));
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(&cli)?;
    match cli.command {
        Commands::Compare {
            from,
            to,
            seed,
            view,
            json,
        } => {
            let pair = LocationPair::new(from, to)?;
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            run_compare(config, pair, view, json)
        }
        Commands::Suggest { partial, country } => {
            run_suggest(&config, &partial, country);
            Ok(())
        }
        Commands::Stats => {
            run_stats(&config.counter_store());
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    if let Err(error) = run(Cli::parse()) {
        eprintln!("error: {error}");
        exit(1);
    }
}
