use analytics::SelectionReport;
use anyhow::{Context, Result};
use catalog::Catalog;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use configuration::{RunSettings, load_config};
use core_types::{Budget, SelectionKey, StrategyId};
use indicatif::{ProgressBar, ProgressStyle};
use optimizer::{ExactOptimizer, GreedyOptimizer, SelectionStrategy, create_strategy};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the stock picker.
fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays machine-readable.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => handle_run(args),
        Commands::Exact(args) => handle_exact(args),
        Commands::Greedy(args) => handle_greedy(args),
        Commands::Compare(args) => handle_compare(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Picks the stocks that return the most money for a fixed budget.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run whichever strategy the configuration selects.
    Run(RunArgs),
    /// Search every combination for the best selection.
    Exact(ExactArgs),
    /// Fill the budget greedily by a sort key.
    Greedy(GreedyArgs),
    /// Run both strategies on the same dataset and show them side by side.
    Compare(CompareArgs),
}

/// Options shared by every command.
#[derive(Args)]
struct CommonArgs {
    /// Configuration file. Defaults to `config.toml` if it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV dataset with a header row: name, price, percentage benefit.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Total amount that may be invested.
    #[arg(long)]
    budget: Option<Decimal>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Override the configured strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyId>,
}

#[derive(Args)]
struct ExactArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Spread the search over several threads.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct GreedyArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// The key stocks are sorted by, highest first.
    #[arg(long, value_enum)]
    key: Option<SelectionKey>,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// The greedy sort key.
    #[arg(long, value_enum)]
    key: Option<SelectionKey>,

    /// Run the exact search on several threads.
    #[arg(long)]
    parallel: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_run(args: RunArgs) -> Result<()> {
    let mut settings = resolve_settings(&args.common)?;
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }
    let (catalog, budget) = prepare(&settings)?;

    let strategy = create_strategy(&settings);
    let report = execute(strategy.as_ref(), &catalog, budget)?;
    print_report(&report, args.common.json)
}

fn handle_exact(args: ExactArgs) -> Result<()> {
    let mut settings = resolve_settings(&args.common)?;
    settings.strategy = StrategyId::Exact;
    settings.parallel |= args.parallel;
    let (catalog, budget) = prepare(&settings)?;

    let strategy = create_strategy(&settings);
    let report = execute(strategy.as_ref(), &catalog, budget)?;
    print_report(&report, args.common.json)
}

fn handle_greedy(args: GreedyArgs) -> Result<()> {
    let mut settings = resolve_settings(&args.common)?;
    settings.strategy = StrategyId::Greedy;
    if let Some(key) = args.key {
        settings.greedy_key = key;
    }
    let (catalog, budget) = prepare(&settings)?;

    let strategy = create_strategy(&settings);
    let report = execute(strategy.as_ref(), &catalog, budget)?;
    print_report(&report, args.common.json)
}

fn handle_compare(args: CompareArgs) -> Result<()> {
    let mut settings = resolve_settings(&args.common)?;
    if let Some(key) = args.key {
        settings.greedy_key = key;
    }
    settings.parallel |= args.parallel;
    let (catalog, budget) = prepare(&settings)?;

    let exact = ExactOptimizer::new().with_parallel(settings.parallel);
    let greedy = GreedyOptimizer::new(settings.greedy_key);

    let exact_report = execute(&exact, &catalog, budget)?;
    let greedy_report = execute(&greedy, &catalog, budget)?;

    if args.common.json {
        let both = serde_json::json!({ "exact": exact_report, "greedy": greedy_report });
        println!("{}", serde_json::to_string_pretty(&both)?);
        return Ok(());
    }

    print_report(&exact_report, false)?;
    println!();
    print_report(&greedy_report, false)?;

    let gap = exact_report.total_profit - greedy_report.total_profit;
    println!();
    println!("Greedy ({}) falls short of the optimum by {:.2} euros", greedy.key(), gap);
    Ok(())
}

/// Layers command-line overrides on top of the loaded configuration.
fn resolve_settings(common: &CommonArgs) -> Result<RunSettings> {
    let config = load_config(common.config.as_deref()).context("Failed to load configuration")?;
    let mut settings = config.run;

    if let Some(dataset) = &common.dataset {
        settings.dataset = Some(dataset.clone());
    }
    if let Some(budget) = common.budget {
        settings.budget = budget;
    }
    Ok(settings)
}

/// Validates the budget and loads the catalog. Both happen before any search
/// starts, so a bad budget or dataset never produces a partial result.
fn prepare(settings: &RunSettings) -> Result<(Catalog, Budget)> {
    let budget = Budget::new(settings.budget).context("Invalid budget")?;
    let dataset = settings
        .dataset
        .as_ref()
        .context("No dataset given: pass --dataset or set run.dataset in the configuration")?;

    let catalog = catalog::load_csv(dataset)
        .with_context(|| format!("Failed to load dataset {}", dataset.display()))?;
    Ok((catalog, budget))
}

/// Runs one strategy and turns its selection into a report.
fn execute(
    strategy: &dyn SelectionStrategy,
    catalog: &Catalog,
    budget: Budget,
) -> Result<SelectionReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    spinner.set_message(format!("Running {} search over {} stocks...", strategy.id(), catalog.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let started = Instant::now();
    let selection = strategy.select(catalog, budget);
    spinner.finish_and_clear();
    let selection = selection.with_context(|| format!("The {} search failed", strategy.id()))?;

    tracing::info!(
        strategy = %strategy.id(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Search finished."
    );

    let report = analytics::report(&selection).context("Failed to build the report")?;
    Ok(report.with_strategy(strategy.id()))
}

fn print_report(report: &SelectionReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(strategy) = report.strategy {
        println!("Strategy: {}", strategy);
    }

    if report.lines.is_empty() {
        println!("No stock fits the budget.");
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Stock", "Price", "Benefit (%)", "Profit"]);
        for line in &report.lines {
            table.add_row(vec![
                line.name.clone(),
                format!("{:.2}", line.price),
                format!("{:.2}", line.percentage_benefit),
                format!("{:.2}", line.profit),
            ]);
        }
        for column in table.column_iter_mut().skip(1) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        println!("{table}");
    }

    println!("Total price  : {:.2} euros", report.total_price);
    println!("Total profit : {:.2} euros", report.total_profit);
    println!("Total return : {:.2} euros", report.total_return);
    Ok(())
}
