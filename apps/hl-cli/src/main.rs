mod error;
mod project;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use hl_assembly::{analyze_stack, estimate_r_value, u_factor};
use hl_catalog::{LoadCategory, MaterialLibrary, RBasis, filter_load_catalog};
use hl_core::SourceId;
use hl_gains::{CustomSourceDraft, source_heat_rate};
use hl_persist::{FileStore, PersistenceAdapter, SaveStatus};
use hl_scenario::{Comparison, ScenarioResult, SharedInputs, Slot};
use project::{ProjectFile, StackFile, load_estimate_inputs};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heatload")]
#[command(about = "Heatload - building heat-loss and internal-gains calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List insulation and structural materials
    Materials {
        /// Case-insensitive filter on id, name or alias
        #[arg(short, long)]
        query: Option<String>,
    },
    /// List catalog load sources
    Loads {
        /// Case-insensitive filter on id
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Compute scenario A (and B when present) from a project file
    Compare {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Directory holding saved scenario state
        #[arg(long)]
        state_dir: Option<PathBuf>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Also sweep heat loss across outdoor temperature
        #[arg(long)]
        curve: bool,
    },
    /// Analyze a layered wall stack
    Stack {
        /// Path to the stack YAML file
        stack_path: PathBuf,
    },
    /// Back out an R-value from a measured heat balance
    Estimate {
        /// Path to the measurements YAML file
        inputs_path: PathBuf,
    },
    /// Manage saved custom load sources
    #[command(subcommand)]
    Custom(CustomCommands),
}

#[derive(Subcommand)]
enum CustomCommands {
    /// List saved custom sources
    List {
        #[arg(long)]
        state_dir: PathBuf,
        #[arg(long, default_value = "a")]
        slot: Slot,
    },
    /// Add a custom source
    Add {
        #[arg(long)]
        state_dir: PathBuf,
        #[arg(long, default_value = "a")]
        slot: Slot,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        watts: Option<f64>,
        #[arg(long)]
        duty_hours: Option<f64>,
        #[arg(long)]
        quantity: Option<u32>,
    },
    /// Remove a custom source by the id shown in `custom list`
    Remove {
        #[arg(long)]
        state_dir: PathBuf,
        #[arg(long, default_value = "a")]
        slot: Slot,
        id: u32,
    },
    /// Delete the saved record for a scenario
    Clear {
        #[arg(long)]
        state_dir: PathBuf,
        #[arg(long, default_value = "a")]
        slot: Slot,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Materials { query } => cmd_materials(query.as_deref().unwrap_or("")),
        Commands::Loads { query } => cmd_loads(query.as_deref().unwrap_or("")),
        Commands::Compare {
            project_path,
            state_dir,
            json,
            curve,
        } => cmd_compare(&project_path, state_dir, json, curve),
        Commands::Stack { stack_path } => cmd_stack(&stack_path),
        Commands::Estimate { inputs_path } => cmd_estimate(&inputs_path),
        Commands::Custom(cmd) => match cmd {
            CustomCommands::List { state_dir, slot } => cmd_custom_list(state_dir, slot),
            CustomCommands::Add {
                state_dir,
                slot,
                name,
                watts,
                duty_hours,
                quantity,
            } => cmd_custom_add(
                state_dir,
                slot,
                CustomSourceDraft {
                    name,
                    watts,
                    duty_hours,
                    quantity,
                },
            ),
            CustomCommands::Remove {
                state_dir,
                slot,
                id,
            } => cmd_custom_remove(state_dir, slot, id),
            CustomCommands::Clear { state_dir, slot } => cmd_custom_clear(state_dir, slot),
        },
    }
}

fn cmd_materials(query: &str) -> CliResult<()> {
    let library = MaterialLibrary::standard();
    let materials = library.filter(query);
    if materials.is_empty() {
        println!("No materials match {query:?}");
        return Ok(());
    }

    println!("{:<28} {:<14} {:<24}", "ID", "CATEGORY", "R-VALUE");
    for material in materials {
        let rating = match material.r_basis {
            RBasis::PerInch(r) => format!("R-{r:.2}/in"),
            RBasis::Fixed { r, piece_in } => format!("R-{r:.1} per {piece_in} in board"),
        };
        let category = serde_json::to_value(material.category)?;
        println!(
            "{:<28} {:<14} {:<24}",
            material.id,
            category.as_str().unwrap_or_default(),
            rating
        );
    }
    Ok(())
}

fn cmd_loads(query: &str) -> CliResult<()> {
    let entries = filter_load_catalog(query);
    if entries.is_empty() {
        println!("No loads match {query:?}");
        return Ok(());
    }

    println!(
        "{:<24} {:<18} {:>8} {:>8} {:>5}",
        "ID", "CATEGORY", "WATTS", "HOURS", "QTY"
    );
    for entry in entries {
        println!(
            "{:<24} {:<18} {:>8.1} {:>8.2} {:>5}",
            entry.id,
            entry.category.label(),
            entry.watts,
            entry.duty_hours,
            entry.default_quantity
        );
    }
    Ok(())
}

fn cmd_compare(
    project_path: &Path,
    state_dir: Option<PathBuf>,
    json: bool,
    curve: bool,
) -> CliResult<()> {
    let project = ProjectFile::load(project_path)?;
    let mut comparison = project.into_comparison(MaterialLibrary::standard())?;
    info!(
        project = %project_path.display(),
        comparison = comparison.is_comparison_enabled(),
        "project loaded"
    );

    if let Some(dir) = state_dir {
        let mut adapter = PersistenceAdapter::new(FileStore::new(dir)?);
        for slot in comparison.restore(&mut adapter) {
            if !json {
                println!("✓ Restored saved wall and custom sources for scenario {slot}");
            }
        }
    }

    let results: Vec<(Slot, ScenarioResult)> = Slot::ALL
        .into_iter()
        .filter_map(|slot| comparison.result(slot).map(|r| (slot, *r)))
        .collect();

    let rows = if curve {
        curve_rows(&comparison)?
    } else {
        Vec::new()
    };

    if json {
        let by_slot: BTreeMap<&str, &ScenarioResult> =
            results.iter().map(|(slot, result)| (slot.id(), result)).collect();
        let mut output = serde_json::to_value(&by_slot)?;
        if curve {
            output["curve"] = serde_json::to_value(&rows)?;
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (slot, result) in &results {
        print_result(*slot, result);
    }
    if let [(_, a), (_, b)] = results.as_slice() {
        let delta = b.envelope.total - a.envelope.total;
        println!("\nB - A envelope loss: {delta:+.0} BTU/hr");
    }
    if curve {
        print_curve(&rows);
    }
    Ok(())
}

/// One outdoor temperature of the sweep, with B only while comparison is on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct CurveRow {
    outdoor_f: f64,
    a: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    b: Option<f64>,
}

fn curve_rows(comparison: &Comparison) -> CliResult<Vec<CurveRow>> {
    let a = comparison.loss_curve(Slot::A)?;
    let b = if comparison.is_active(Slot::B) {
        Some(comparison.loss_curve(Slot::B)?)
    } else {
        None
    };
    Ok(a
        .iter()
        .enumerate()
        .map(|(i, point)| CurveRow {
            outdoor_f: point.outdoor_f,
            a: point.total,
            b: b.as_ref().map(|points| points[i].total),
        })
        .collect())
}

fn print_curve(rows: &[CurveRow]) {
    println!("\nHeat loss vs outdoor temperature (BTU/hr)");
    println!("  {:>6} {:>10} {:>10}", "°F", "A", "B");
    for row in rows {
        let b = row.b.map(|b| format!("{b:.0}")).unwrap_or_default();
        println!("  {:>6.0} {:>10.0} {:>10}", row.outdoor_f, row.a, b);
    }
}

fn print_result(slot: Slot, result: &ScenarioResult) {
    let env = &result.envelope;
    println!("\nScenario {slot}");
    println!(
        "  Areas (ft²):   wall {:.0}  roof {:.0}  floor {:.0}",
        result.areas.wall, result.areas.roof, result.areas.floor
    );
    println!(
        "  Effective R:   wall {:.2}  roof {:.2}  floor {:.2}",
        result.wall_r, result.roof_r, result.floor_r
    );
    println!("  Envelope loss (BTU/hr):");
    println!("    Walls:        {:>9.0}", env.wall);
    println!("    Roof:         {:>9.0}", env.roof);
    println!("    Windows:      {:>9.0}", env.windows);
    println!("    Doors:        {:>9.0}", env.doors);
    println!("    Floor:        {:>9.0}", env.floor);
    println!("    Infiltration: {:>9.0}", env.infiltration);
    println!("    Total:        {:>9.0}", env.total);
    println!("  Internal gains (BTU/hr):");
    println!("    Occupants:    {:>9.1}", result.gains.occupants);
    println!("    Appliances:   {:>9.1}", result.gains.fixed_appliances);
    println!("    Custom:       {:>9.1}", result.gains.custom);
    println!("    Total:        {:>9.1}", result.gains.total);
}

fn cmd_stack(stack_path: &Path) -> CliResult<()> {
    let library = MaterialLibrary::standard();
    let assembly = StackFile::load(stack_path)?.into_assembly(&library)?;
    let analysis = analyze_stack(&assembly, &library)?;

    println!("{:<4} {:<28} {:>9} {:>9}", "#", "LAYER", "R WINTER", "R SUMMER");
    for (i, layer) in analysis.layers.iter().enumerate() {
        let note = match layer.radiant_active {
            Some(true) => "  (radiant, active)",
            Some(false) => "  (radiant, no air gap)",
            None => "",
        };
        println!(
            "{:<4} {:<28} {:>9.2} {:>9.2}{note}",
            i + 1,
            layer.material_id,
            layer.r_winter,
            layer.r_summer
        );
    }
    println!(
        "\nTotal R: winter {:.2} (U {:.3}), summer {:.2} (U {:.3})",
        analysis.r_winter,
        u_factor(analysis.r_winter),
        analysis.r_summer,
        u_factor(analysis.r_summer)
    );
    for warning in &analysis.warnings {
        println!("! {warning}");
    }
    Ok(())
}

fn cmd_estimate(inputs_path: &Path) -> CliResult<()> {
    let inputs = load_estimate_inputs(inputs_path)?;
    let estimate = estimate_r_value(&inputs)?;
    let balance = &estimate.balance;

    println!("Heat balance (W):");
    println!("  HVAC:         {:>9.1}", balance.hvac_w);
    println!("  Windows:      {:>9.1}", balance.windows_w);
    println!("  Other:        {:>9.1}", balance.other_w);
    println!("  Floor:        {:>9.1}", balance.floor_w);
    println!("  Infiltration: {:>9.1}", balance.infiltration_w);
    println!("  Target:       {:>9.1}", balance.target_w);
    println!(
        "\nOverall R: {:.3} m²K/W (R-{:.2})",
        estimate.r_si_overall, estimate.r_imperial_overall
    );
    if let (Some(si), Some(imperial)) = (estimate.r_si_material, estimate.r_imperial_material) {
        println!("Material R: {si:.3} m²K/W (R-{imperial:.2})");
    }
    Ok(())
}

/// A default comparison with the slot's saved state loaded.
fn open_state(state_dir: PathBuf) -> CliResult<(Comparison, PersistenceAdapter<FileStore>)> {
    let mut adapter = PersistenceAdapter::new(FileStore::new(state_dir)?);
    let mut comparison = Comparison::new(MaterialLibrary::standard(), SharedInputs::default())?;
    comparison.restore(&mut adapter);
    Ok((comparison, adapter))
}

fn save(
    comparison: &mut Comparison,
    adapter: &mut PersistenceAdapter<FileStore>,
) -> CliResult<()> {
    for (slot, status) in comparison.persist_dirty(adapter) {
        match status {
            SaveStatus::Saved => println!("✓ Saved scenario {slot}"),
            SaveStatus::Unavailable(reason) => return Err(CliError::NotSaved { slot, reason }),
        }
    }
    Ok(())
}

fn cmd_custom_list(state_dir: PathBuf, slot: Slot) -> CliResult<()> {
    let (comparison, _) = open_state(state_dir)?;
    let gains = &comparison.scenario(slot).gains;

    let mut any = false;
    println!(
        "{:<4} {:<24} {:>8} {:>8} {:>5} {:>10}",
        "ID", "NAME", "WATTS", "HOURS", "QTY", "BTU/HR"
    );
    for (id, source) in gains.custom_sources() {
        any = true;
        println!(
            "{:<4} {:<24} {:>8.1} {:>8.2} {:>5} {:>10.1}",
            id,
            source.name(),
            source.watts(),
            source.duty_hours(),
            source.quantity(),
            source_heat_rate(source)
        );
    }
    if !any {
        println!("(no custom sources in scenario {slot})");
    }
    println!(
        "\n{}: {:.1} BTU/hr",
        LoadCategory::Custom.label(),
        gains.summary().custom
    );
    Ok(())
}

fn cmd_custom_add(state_dir: PathBuf, slot: Slot, draft: CustomSourceDraft) -> CliResult<()> {
    let (mut comparison, mut adapter) = open_state(state_dir)?;
    let id = comparison.add_custom_source(slot, draft)?;
    let source = comparison.scenario(slot).gains.custom_source(id)?;
    println!(
        "✓ Added {:?} ({:.1} BTU/hr) as id {id}",
        source.name(),
        source_heat_rate(source)
    );
    save(&mut comparison, &mut adapter)
}

fn cmd_custom_remove(state_dir: PathBuf, slot: Slot, id: u32) -> CliResult<()> {
    let (mut comparison, mut adapter) = open_state(state_dir)?;
    let source_id = SourceId::from_index(id);
    let removed = comparison.remove_custom_source(slot, source_id)?;
    println!("✓ Removed {:?}", removed.name());
    save(&mut comparison, &mut adapter)
}

fn cmd_custom_clear(state_dir: PathBuf, slot: Slot) -> CliResult<()> {
    let mut adapter = PersistenceAdapter::new(FileStore::new(state_dir)?);
    adapter.clear(slot)?;
    println!("✓ Cleared saved state for scenario {slot}");
    Ok(())
}
