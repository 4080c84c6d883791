//! # Pile Cap CLI
//!
//! Command-line front end for `pilecap_core`.
//!
//! ```text
//! pilecap piles --nx 4 --sx 8 --ny 3 --sy 8
//! pilecap defaults
//! pilecap init bridge.pcap --engineer "J. Engineer" --job 25-014
//! pilecap design bridge.pcap [--cases reactions.json] [--json]
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `pilecap=info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pilecap_core::calculations::{design_pile_cap, PileCapInput, PileCapReport};
use pilecap_core::file_io::{load_load_cases, load_project_with_lock_check, save_project, FileLock};
use pilecap_core::loads::{InMemoryLoadCases, LoadCase, DEFAULT_LOAD_CASES};
use pilecap_core::{generate_piles, CalcError, CalcResult, LayoutMode, Project};

#[derive(Parser)]
#[command(name = "pilecap", version, about = "Rigid pile cap design: pile forces, flexure and shear")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a rectangular pile grid and print the coordinates
    Piles {
        /// Piles along x
        #[arg(long, default_value_t = 4)]
        nx: usize,
        /// Spacing along x (ft)
        #[arg(long, default_value_t = 8.0)]
        sx: f64,
        /// Piles along y
        #[arg(long, default_value_t = 3)]
        ny: usize,
        /// Spacing along y (ft)
        #[arg(long, default_value_t = 8.0)]
        sy: f64,
        #[arg(long, value_enum, default_value_t = Mode::Centered)]
        mode: Mode,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the published default load cases
    Defaults {
        #[arg(long)]
        json: bool,
    },
    /// Write a sample project file with one default pile cap
    Init {
        /// Project file to create (.pcap)
        path: PathBuf,
        #[arg(long, default_value = "")]
        engineer: String,
        #[arg(long, default_value = "")]
        job: String,
        #[arg(long, default_value = "")]
        client: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Design every pile cap in a project
    Design {
        /// Project file (.pcap)
        path: PathBuf,
        /// Load cases to use for items that carry none of their own
        #[arg(long)]
        cases: Option<PathBuf>,
        /// Print JSON reports instead of the summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Centered,
    Origin,
}

impl From<Mode> for LayoutMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Centered => LayoutMode::Centered,
            Mode::Origin => LayoutMode::Origin,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "pilecap=info,pilecap_core=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Piles { nx, sx, ny, sy, mode, json } => run_piles(nx, sx, ny, sy, mode.into(), json),
        Commands::Defaults { json } => run_defaults(json),
        Commands::Init {
            path,
            engineer,
            job,
            client,
            force,
        } => run_init(&path, &engineer, &job, &client, force),
        Commands::Design { path, cases, json } => run_design(&path, cases.as_deref(), json),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError { reason: e.to_string() })
}

// ============================================================================
// Commands
// ============================================================================

fn run_piles(nx: usize, sx: f64, ny: usize, sy: f64, mode: LayoutMode, json: bool) -> CalcResult<bool> {
    let piles = generate_piles(nx, sx, ny, sy, mode)?;
    if json {
        println!("{}", to_json(&piles)?);
        return Ok(true);
    }

    println!("{} piles, {}", piles.len(), mode.display_name());
    println!();
    println!("  {:>4}  {:>9}  {:>9}", "No.", "x (ft)", "y (ft)");
    for pile in &piles {
        println!("  {:>4}  {:>9.2}  {:>9.2}", pile.number, pile.x_ft, pile.y_ft);
    }
    Ok(true)
}

fn run_defaults(json: bool) -> CalcResult<bool> {
    let cases: &[LoadCase] = &DEFAULT_LOAD_CASES;
    if json {
        println!("{}", to_json(&cases)?);
        return Ok(true);
    }

    println!(
        "  {:<12} {:>5} {:>8} {:>8} {:>8} {:>9} {:>9}",
        "Load case", "DC", "Fx", "Fy", "Fz", "Mx", "My"
    );
    for c in cases {
        println!(
            "  {:<12} {:>5.2} {:>8.0} {:>8.0} {:>8.0} {:>9.0} {:>9.0}",
            c.name, c.dc_factor, c.fx, c.fy, c.fz, c.mx, c.my
        );
    }
    Ok(true)
}

fn run_init(path: &Path, engineer: &str, job: &str, client: &str, force: bool) -> CalcResult<bool> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "init",
            path.display().to_string(),
            "File already exists (use --force to overwrite)",
        ));
    }

    let lock = FileLock::acquire(path, user_id())?;
    let mut project = Project::new(engineer, job, client);
    let mut item = PileCapInput::new("PC-1");
    item.load_cases = DEFAULT_LOAD_CASES.clone();
    project.add_item(item);
    save_project(&project, path)?;
    drop(lock);

    tracing::info!(path = %path.display(), "wrote sample project");
    println!("Wrote {}", path.display());
    Ok(true)
}

fn run_design(path: &Path, cases: Option<&Path>, json: bool) -> CalcResult<bool> {
    let (project, lock) = load_project_with_lock_check(path)?;
    if let Some(lock) = lock {
        tracing::info!(user = %lock.user_id, machine = %lock.machine, "project is open elsewhere; reading only");
    }

    let fallback = match cases {
        Some(file) => InMemoryLoadCases::with_cases(load_load_cases(file)?),
        None => InMemoryLoadCases::new(),
    };

    let mut reports = Vec::with_capacity(project.item_count());
    for (id, item) in project.items_by_label() {
        let own = item.load_case_repository();
        let repository = if own.has_custom_cases() { &own } else { &fallback };
        tracing::info!(%id, label = %item.label, "designing pile cap");
        reports.push(design_pile_cap(item, repository, &project.settings)?);
    }

    if json {
        println!("{}", to_json(&reports)?);
    } else {
        println!("Project {} - {} ({})", project.meta.job_id, project.meta.client, project.settings.code);
        for report in &reports {
            print_report(report);
        }
    }

    Ok(reports.iter().all(PileCapReport::passes))
}

fn user_id() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

// ============================================================================
// Report Output
// ============================================================================

fn print_report(report: &PileCapReport) {
    println!();
    println!("═══════════════════════════════════════════════════════");
    println!("  PILE CAP: {}", report.label);
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!(
        "Footing:  {:.2} x {:.2} ft ({}), t = {:.2} ft",
        report.footing.plan.length_ft,
        report.footing.plan.width_ft,
        report.footing.plan.source.display_name(),
        report.footing.thickness_ft
    );
    println!(
        "          gross area {:.1} ft², depth to pile tip {:.2}",
        report.summary.gross_area_ft2, report.summary.depth_to_pile_tip_ft
    );
    println!("Loads:    {} cases", report.load_case_count);
    println!();
    println!("Pile Forces:");
    println!("  {:>4} {:>8} {:>8} {:>9}  {:<12} {:>9}  {:<12}", "No.", "x", "y", "Pmax", "case", "Pmin", "case");
    for entry in &report.piles {
        match &entry.forces {
            Some(f) => println!(
                "  {:>4} {:>8.2} {:>8.2} {:>9.2}  {:<12} {:>9.2}  {:<12}",
                entry.pile.number, entry.pile.x_ft, entry.pile.y_ft, f.max.value, f.max.load_case, f.min.value, f.min.load_case
            ),
            None => println!("  {:>4} {:>8.2} {:>8.2} {:>9}", entry.pile.number, entry.pile.x_ft, entry.pile.y_ft, "-"),
        }
    }
    println!();
    println!("Flexure ({}):", report.flexural.plan.source.display_name());
    for axis in [&report.flexural.x, &report.flexural.y] {
        println!(
            "  {}: Mu = {:.1} k-ft (pile {:.1}, self {:.1}, surcharge {:.1})",
            axis.axis, axis.ultimate_moment, axis.pile_moment, axis.footing_moment, axis.surcharge_moment
        );
    }
    println!("Reinforcement (de = {:.3} ft):", report.reinforcement.effective_depth_ft);
    for steel in [&report.reinforcement.x, &report.reinforcement.y] {
        println!(
            "  {}: Mu/ft = {:.2} k-ft/ft, As = {:.2}",
            steel.axis, steel.moment_per_ft, steel.required_steel_area
        );
    }
    println!();
    println!("Capacity Checks:");
    let one_way = &report.shear.one_way;
    println!(
        "  One-way shear:  φVc = {:.1} k, Vu = {:.1} k, ratio {:.2} {}",
        one_way.phi_vc,
        one_way.vu,
        one_way.ratio,
        status_icon(one_way.ratio > 1.0)
    );
    let punching = &report.shear.punching;
    println!(
        "  Punching:       φVn = {:.1} k, Vu = {:.1} k, D/C {:.2} {}",
        punching.design_capacity,
        punching.vu,
        punching.demand_capacity_ratio,
        status_icon(punching.status.passed())
    );
    let resistance = &report.resistance;
    println!(
        "  Compression:    {:.1} / {:.1} k {}",
        resistance.max_compression,
        resistance.factored_compression,
        status_icon(resistance.compression_ok)
    );
    println!(
        "  Uplift:         {:.1} / {:.1} k {}",
        resistance.max_uplift,
        resistance.factored_uplift,
        status_icon(resistance.uplift_ok)
    );
    if let Some(section) = report.critical_sections.governing_shear() {
        println!(
            "  Section shear:  {:.1} k ({} {} side)",
            section.shear,
            section.axis,
            section.side.label()
        );
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    println!();
    println!("═══════════════════════════════════════════════════════");
    println!("  RESULT: {}", if report.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
