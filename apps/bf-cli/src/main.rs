use bf_results::{RunManifest, RunStore};
use bf_sim::{YearRecord, balance_envelope, mass_balance, simulate_trace};
use bf_spells::SpellCatalog;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod error;

use error::CliResult;

const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "Basinflow CLI - annual storage and delivery simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate run-configuration file syntax and structure
    Validate {
        /// Path to the run-configuration YAML file
        config_path: PathBuf,
    },
    /// Simulate the configured trace and store the results
    Run {
        /// Path to the run-configuration YAML file
        config_path: PathBuf,
        /// Re-run and overwrite an already-stored result
        #[arg(long)]
        force: bool,
    },
    /// Simulate every trace CSV in a directory under one configuration
    Ensemble {
        /// Path to the run-configuration YAML file
        config_path: PathBuf,
        /// Directory of trace CSV files
        trace_dir: PathBuf,
    },
    /// Characterize spells in one column of an emitted year table
    Spells {
        /// CSV file (e.g. a stored timeseries.csv)
        csv_path: PathBuf,
        /// Column to analyze (e.g. curtailment or spill)
        column: String,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run { config_path, force } => cmd_run(&config_path, force),
        Commands::Ensemble {
            config_path,
            trace_dir,
        } => cmd_ensemble(&config_path, &trace_dir),
        Commands::Spells {
            csv_path,
            column,
            output,
        } => cmd_spells(&csv_path, &column, output.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating run configuration: {}", config_path.display());
    let config = bf_project::load_yaml(config_path)?;
    println!("✓ Configuration '{}' is valid", config.name);
    Ok(())
}

fn cmd_run(config_path: &Path, force: bool) -> CliResult<()> {
    let config = bf_project::load_yaml(config_path)?;
    let trace = bf_project::load_trace(&resolve_trace(config_path, &config.trace))?;
    let store = open_store(config_path, &config)?;

    let run_id = bf_results::compute_run_id(&config.simulation, &trace, ENGINE_VERSION);
    if store.has_run(&run_id) && !force {
        println!("✓ Run already stored: {run_id}");
        return Ok(());
    }

    println!("Simulating '{}' ({} years)", config.name, trace.len());
    let records = simulate_trace(&trace, &config.simulation)?;

    let catalog = SpellCatalog::from_series(&column(&records, |r| r.curtailment));
    let intervals = bf_spells::calculate_intervals(
        records.iter().map(|r| (r.year, r.spill, r.curtailment)),
    );

    let manifest = RunManifest::new(
        run_id.clone(),
        &config.name,
        &config.trace.to_string_lossy(),
        ENGINE_VERSION,
        config.simulation.clone(),
    );
    let run_dir = store.save_run(&manifest, &records, &catalog, &intervals)?;

    println!("✓ Simulation completed: {run_id}");
    println!("  Stored in: {}", run_dir.display());
    print_run_summary(&records);
    Ok(())
}

fn cmd_ensemble(config_path: &Path, trace_dir: &Path) -> CliResult<()> {
    let config = bf_project::load_yaml(config_path)?;

    let mut trace_paths: Vec<PathBuf> = fs::read_dir(trace_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    trace_paths.sort();

    if trace_paths.is_empty() {
        println!("No trace CSV files found in {}", trace_dir.display());
        return Ok(());
    }
    println!(
        "Simulating {} traces under '{}'",
        trace_paths.len(),
        config.name
    );

    // Traces share no mutable state; each gets its own reservoir and
    // compliance window
    let summaries: Vec<CliResult<EnsembleRow>> = trace_paths
        .par_iter()
        .map(|path| {
            let trace = bf_project::load_trace(path)?;
            let records = simulate_trace(&trace, &config.simulation)?;
            Ok(EnsembleRow::from_records(path, &records))
        })
        .collect();

    let root = store_root(config_path, &config);
    fs::create_dir_all(&root)?;
    let summary_path = root.join("ensemble_summary.csv");
    let mut out = String::from(
        "trace,years,curtailment_years,total_curtailment,max_curtailment,spill_years,mass_balance\n",
    );
    let mut failures = 0usize;
    for summary in summaries {
        match summary {
            Ok(row) => out.push_str(&row.to_csv_line()),
            Err(e) => {
                failures += 1;
                tracing::warn!(error = %e, "trace failed");
            }
        }
    }
    fs::write(&summary_path, out)?;

    println!(
        "✓ Ensemble completed: {} traces, {} failed",
        trace_paths.len(),
        failures
    );
    println!("  Summary: {}", summary_path.display());
    Ok(())
}

fn cmd_spells(csv_path: &Path, column_name: &str, output: Option<&Path>) -> CliResult<()> {
    let file = fs::File::open(csv_path)?;
    let values = bf_results::read_column(file, column_name)?;
    let catalog = SpellCatalog::from_series(&values);

    let mut text = Vec::new();
    writeln!(
        text,
        "Spell information for {} ({column_name})",
        csv_path.display()
    )?;
    writeln!(text, "Discrete spell events")?;
    bf_results::write_spell_map(&mut text, &catalog.independent, None)?;
    writeln!(text, "Nested spells")?;
    bf_results::write_spell_map(&mut text, &catalog.nested, None)?;
    bf_results::write_spell_percentiles(
        &mut text,
        &catalog.nested,
        bf_results::DEFAULT_QUANTILES,
        Some("Nested spell percentiles"),
    )?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("✓ Spell summary written to {}", path.display());
    } else {
        io::stdout().write_all(&text)?;
    }
    Ok(())
}

fn print_run_summary(records: &[YearRecord]) {
    let curtailment_years = records.iter().filter(|r| r.curtailment > 0.0).count();
    let spill_years = records.iter().filter(|r| r.spill > 0.0).count();
    let total_curtailment: f64 = records.iter().map(|r| r.curtailment).sum();
    let balance = mass_balance(records);

    println!("  Years: {}", records.len());
    println!("  Curtailment years: {curtailment_years}");
    println!("  Total curtailment: {total_curtailment} af");
    println!("  Spill years: {spill_years}");
    println!("  Mass balance: {balance} af");
    if balance.abs() > balance_envelope(records.len()) {
        println!("  WARNING: mass balance outside rounding envelope");
    }
}

struct EnsembleRow {
    trace: String,
    years: usize,
    curtailment_years: usize,
    total_curtailment: f64,
    max_curtailment: f64,
    spill_years: usize,
    mass_balance: f64,
}

impl EnsembleRow {
    fn from_records(path: &Path, records: &[YearRecord]) -> Self {
        Self {
            trace: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            years: records.len(),
            curtailment_years: records.iter().filter(|r| r.curtailment > 0.0).count(),
            total_curtailment: records.iter().map(|r| r.curtailment).sum(),
            max_curtailment: records.iter().map(|r| r.curtailment).fold(0.0, f64::max),
            spill_years: records.iter().filter(|r| r.spill > 0.0).count(),
            mass_balance: mass_balance(records),
        }
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}\n",
            self.trace,
            self.years,
            self.curtailment_years,
            self.total_curtailment,
            self.max_curtailment,
            self.spill_years,
            self.mass_balance
        )
    }
}

fn column(records: &[YearRecord], f: impl Fn(&YearRecord) -> f64) -> Vec<f64> {
    records.iter().map(f).collect()
}

fn resolve_trace(config_path: &Path, trace: &Path) -> PathBuf {
    if trace.is_absolute() {
        trace.to_path_buf()
    } else {
        config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(trace)
    }
}

fn store_root(config_path: &Path, config: &bf_project::RunConfig) -> PathBuf {
    match &config.output_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(dir),
        None => config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("runs"),
    }
}

fn open_store(config_path: &Path, config: &bf_project::RunConfig) -> CliResult<RunStore> {
    Ok(RunStore::new(store_root(config_path, config))?)
}
