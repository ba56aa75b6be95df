use clap::{Parser, Subcommand};
use pgc_app::{
    AppError, AppResult, DesignRequest, RunOptions, RunProgressEvent, RunRequest, RunStage,
    project_service, query, run_service, sweep_service,
};
use pgc_components::DeliveryChain;
use pgc_design::scenarios::default_temperatures;
use pgc_design::{
    DEFAULT_GAS_PRICES, DEFAULT_TARGETS_KW, DesignPoint, SWEEP_SCENARIOS, SWEEP_TEG_COUNTS, Sizing,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pgc-cli")]
#[command(about = "PGC CLI - gas-fired thermoelectric plant simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the reference plant to a new plant file
    Init {
        /// Path of the plant file to create (.yaml or .json)
        plant_path: PathBuf,
        /// Plant name
        #[arg(long, default_value = "Reference Plant")]
        name: String,
    },
    /// Validate a plant file
    Validate {
        /// Path to the plant file
        plant_path: PathBuf,
    },
    /// Run a transient plant simulation
    Run {
        /// Path to the plant file
        plant_path: PathBuf,
        #[command(flatten)]
        overrides: PlantOverrides,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Write every recorded variable to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List cached runs for a plant
    Runs {
        /// Path to the plant file
        plant_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the plant file
        plant_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export one variable of a cached run as CSV
    ExportSeries {
        /// Path to the plant file
        plant_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Variable name (e.g., net_power_w, soil_k, teg_hot_face_k)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Steady design point of one TEG array
    Design {
        #[command(flatten)]
        module: ModuleArgs,
        /// Number of TEG modules (rounded to whole 36-module boards)
        #[arg(long, default_value_t = 1620)]
        teg_count: usize,
        /// Fluid temperature change across each exchanger (C)
        #[arg(long, default_value_t = 10.0)]
        dt_fluid_c: f64,
    },
    /// Size the array and fuel feed for target net outputs
    Fuel {
        #[command(flatten)]
        module: ModuleArgs,
        /// Target net outputs (kW)
        #[arg(long = "target-kw", num_args = 1..)]
        target_kw: Vec<f64>,
        #[command(flatten)]
        fuel: FuelArgs,
    },
    /// Design points across module types and array sizes
    SweepDesign {
        /// Targets to report the closest array for (kW)
        #[arg(long = "target-kw", num_args = 1..)]
        target_kw: Vec<f64>,
        /// Array sizes to evaluate
        #[arg(long = "teg-counts", num_args = 1..)]
        teg_counts: Vec<usize>,
        #[command(flatten)]
        fuel: FuelArgs,
    },
    /// Transient runs of a plant file across array sizes
    SweepPlant {
        /// Path to the plant file
        plant_path: PathBuf,
        /// Array sizes to simulate
        #[arg(long = "teg-counts", num_args = 1.., required = true)]
        teg_counts: Vec<usize>,
        /// Simulated days (overrides the plant file)
        #[arg(long)]
        days: Option<f64>,
    },
}

/// Plant file values replaced for one run
#[derive(clap::Args)]
struct PlantOverrides {
    /// Time step in seconds
    #[arg(long)]
    dt_s: Option<f64>,
    /// Simulated days
    #[arg(long)]
    days: Option<f64>,
    /// Burner fuel feed (McF/day)
    #[arg(long)]
    fuel_mcf_per_day: Option<f64>,
    /// Number of TEG modules
    #[arg(long)]
    teg_count: Option<usize>,
    /// Number of boreholes (ground-loop plants)
    #[arg(long)]
    boreholes: Option<usize>,
    /// Burner outlet set point (K)
    #[arg(long)]
    hot_setpoint_k: Option<f64>,
}

impl PlantOverrides {
    fn options(&self, use_cache: bool) -> RunOptions {
        RunOptions {
            use_cache,
            dt_s: self.dt_s,
            duration_days: self.days,
            fuel_mcf_per_day: self.fuel_mcf_per_day,
            teg_count: self.teg_count,
            borehole_count: self.boreholes,
            hot_setpoint_k: self.hot_setpoint_k,
            ..RunOptions::default()
        }
    }
}

#[derive(clap::Args)]
struct ModuleArgs {
    /// TEG module type (marlow, thermonamic, alphabet)
    #[arg(long, default_value = "marlow")]
    teg_type: String,
    /// Hot loop inlet temperature (C); defaults by module type
    #[arg(long)]
    hot_temp_c: Option<f64>,
    /// Cold loop inlet temperature (C); defaults by module type
    #[arg(long)]
    cold_temp_c: Option<f64>,
}

impl ModuleArgs {
    fn request(&self, teg_count: usize, fluid_dt_c: f64) -> DesignRequest {
        let (hot, cold) = default_temperatures(&self.teg_type);
        DesignRequest {
            teg_key: self.teg_type.clone(),
            teg_count,
            hot_c: self.hot_temp_c.unwrap_or(hot),
            cold_c: self.cold_temp_c.unwrap_or(cold),
            fluid_dt_c,
        }
    }
}

#[derive(clap::Args)]
struct FuelArgs {
    /// Burner thermal efficiency
    #[arg(long, default_value_t = 0.88)]
    burner_eff: f64,
    /// Fraction of burner heat lost in piping
    #[arg(long, default_value_t = 0.05)]
    pipe_loss: f64,
    /// Gas prices ($/McF)
    #[arg(long = "gas-price", num_args = 1..)]
    gas_price: Vec<f64>,
}

impl FuelArgs {
    fn chain(&self) -> AppResult<DeliveryChain> {
        Ok(DeliveryChain::new(self.burner_eff, self.pipe_loss)?)
    }

    fn prices(&self) -> Vec<f64> {
        if self.gas_price.is_empty() {
            DEFAULT_GAS_PRICES.to_vec()
        } else {
            self.gas_price.clone()
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { plant_path, name } => cmd_init(&plant_path, &name),
        Commands::Validate { plant_path } => cmd_validate(&plant_path),
        Commands::Run {
            plant_path,
            overrides,
            no_cache,
            csv,
        } => cmd_run(&plant_path, overrides.options(!no_cache), csv.as_deref()),
        Commands::Runs { plant_path } => cmd_runs(&plant_path),
        Commands::ShowRun { plant_path, run_id } => cmd_show_run(&plant_path, &run_id),
        Commands::ExportSeries {
            plant_path,
            run_id,
            variable,
            output,
        } => cmd_export_series(&plant_path, &run_id, &variable, output.as_deref()),
        Commands::Design {
            module,
            teg_count,
            dt_fluid_c,
        } => cmd_design(&module.request(teg_count, dt_fluid_c)),
        Commands::Fuel {
            module,
            target_kw,
            fuel,
        } => cmd_fuel(&module, &target_kw, &fuel),
        Commands::SweepDesign {
            target_kw,
            teg_counts,
            fuel,
        } => cmd_sweep_design(&target_kw, &teg_counts, &fuel),
        Commands::SweepPlant {
            plant_path,
            teg_counts,
            days,
        } => cmd_sweep_plant(&plant_path, &teg_counts, days),
    }
}

fn cmd_init(plant_path: &Path, name: &str) -> AppResult<()> {
    project_service::init_plant(plant_path, name)?;
    println!("✓ Wrote reference plant to {}", plant_path.display());
    Ok(())
}

fn cmd_validate(plant_path: &Path) -> AppResult<()> {
    println!("Validating plant: {}", plant_path.display());
    let plant = project_service::load_plant(plant_path)?;
    project_service::validate_plant(&plant)?;
    let s = project_service::summarize_plant(&plant);
    println!("✓ Plant is valid");
    println!("  Name:      {}", s.name);
    println!("  Fuel:      {:.1} McF/day, set point {:.1} K", s.fuel_mcf_per_day, s.setpoint_k);
    println!("  TEGs:      {} x {}", s.teg_count, s.teg_module);
    println!("  Rejection: {}", s.rejection);
    println!("  Horizon:   {:.1} days at {:.0} s", s.duration_days, s.dt_s);
    Ok(())
}

fn cmd_run(plant_path: &Path, options: RunOptions, csv: Option<&Path>) -> AppResult<()> {
    println!("Running plant: {}", plant_path.display());

    let request = RunRequest {
        plant_path,
        options,
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let fraction = event
                .transient
                .as_ref()
                .map(|t| t.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);

    let (_manifest, records) = run_service::load_run(plant_path, &response.run_id)?;
    print_run_summary(&query::get_run_summary(&records)?);

    if let Some(path) = csv {
        std::fs::write(path, pgc_results::trace_csv(&records))?;
        println!("✓ Wrote {} records to {}", records.len(), path.display());
    }

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match event.stage {
        RunStage::RunningTransient => {
            if let Some(t) = &event.transient {
                let width = 28usize;
                let filled = ((t.fraction_complete * width as f64).round() as usize).min(width);
                let bar = format!(
                    "{}{}",
                    "#".repeat(filled),
                    "-".repeat(width.saturating_sub(filled))
                );
                print!(
                    "\r[{}] {:>6.2}%  day={:.1}/{:.1}  step={}/{}  elapsed={:.1}s",
                    bar,
                    t.fraction_complete * 100.0,
                    t.sim_time_s / 86_400.0,
                    t.t_end_s / 86_400.0,
                    t.step,
                    t.total_steps,
                    event.elapsed_wall_s
                );
                let _ = io::stdout().flush();
            }
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
            let _ = io::stdout().flush();
        }
    }
}

fn print_timing_summary(timing: &pgc_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let compile_pct = 100.0 * timing.compile_time_s / total;
    let solve_pct = 100.0 * timing.solve_time_s / total;
    let save_pct = 100.0 * timing.save_time_s / total;

    println!("\nTiming summary:");
    println!(
        "  Compile: {:.3}s ({:.1}%)",
        timing.compile_time_s, compile_pct
    );
    println!("  Solve:   {:.3}s ({:.1}%)", timing.solve_time_s, solve_pct);
    println!("  Save:    {:.3}s ({:.1}%)", timing.save_time_s, save_pct);
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
    if timing.transient_steps > 0 {
        println!("  Steps:   {}", timing.transient_steps);
        println!("  Newton iterations: {}", timing.newton_iterations);
    }
}

fn print_run_summary(summary: &query::RunSummary) {
    let days = (summary.time_range.1 - summary.time_range.0) / 86_400.0;
    println!("\nRun summary ({:.1} days, {} records):", days, summary.record_count);
    println!("  Net energy:      {:.1} kWh", summary.net_energy_kwh);
    println!(
        "  Net power:       mean {:.0} W, min {:.0} W, max {:.0} W",
        summary.mean_net_power_w, summary.min_net_power_w, summary.max_net_power_w
    );
    println!("  Heat rejected:   {:.0} kWh", summary.heat_rejected_kwh);
    println!(
        "  Soil:            {:.2} K -> {:.2} K ({:+.2} K)",
        summary.initial_soil_k,
        summary.final_soil_k,
        summary.soil_drift_k()
    );
    println!("  Peak hot face:   {:.1} K", summary.peak_hot_face_k);
    if summary.over_temperature_records > 0 {
        println!(
            "  ! Hot face above module rating in {} records",
            summary.over_temperature_records
        );
    }
}

fn cmd_runs(plant_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(plant_path)?;

    if runs.is_empty() {
        println!("No cached runs found for {}", plant_path.display());
    } else {
        println!("Cached runs for '{}':", plant_path.display());
        for manifest in runs {
            println!("  {} ({})", manifest.run_id, manifest.timestamp);
        }
    }
    Ok(())
}

fn cmd_show_run(plant_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(plant_path, run_id)?;
    println!("  Plant:  {}", manifest.plant_name);
    println!("  Solver: {}", manifest.solver_version);
    println!("  Saved:  {}", manifest.timestamp);
    print_run_summary(&query::get_run_summary(&records)?);

    println!("\nVariables:");
    for name in query::list_variables() {
        println!("  {}", name);
    }

    Ok(())
}

fn cmd_export_series(
    plant_path: &Path,
    run_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(plant_path, run_id)?;
    let series = query::extract_series(&records, variable)?;

    let mut csv = format!("time_s,{}\n", variable);
    for (t, val) in &series {
        csv.push_str(&format!("{},{}\n", t, val));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn print_design_point(p: &DesignPoint) {
    println!("{} x {}", p.teg_count, p.module_name);
    println!("  Fluids: hot {}, cold {}", p.hot_fluid_name, p.cold_fluid_name);

    let r = &p.resistances;
    println!("\nThermal resistance per TEG (K/W):");
    println!("  Hot convection: {:.4}", r.hot_conv);
    println!("  Hot TIM:        {:.4}", r.hot_tim);
    println!("  TEG:            {:.4}", r.teg);
    println!("  Cold TIM:       {:.4}", r.cold_tim);
    println!("  Cold convection:{:.4}", r.cold_conv);
    println!(
        "  Total:          {:.4} (TEG share {:.1}%)",
        r.total(),
        100.0 * r.teg_fraction()
    );

    let t = &p.temperatures;
    println!("\nTemperature profile (C):");
    println!("  Hot fluid   {:>7.1}", t.hot_fluid_avg_c);
    println!("  Hot fin     {:>7.1}", t.hot_fin_surface_c);
    println!("  TEG hot     {:>7.1}", t.teg_hot_c);
    println!("  TEG cold    {:>7.1}", t.teg_cold_c);
    println!("  Cold fin    {:>7.1}", t.cold_fin_surface_c);
    println!("  Cold fluid  {:>7.1}", t.cold_fluid_avg_c);

    println!("\nPer TEG:");
    println!("  dT {:.1} K, heat {:.2} W, power {:.3} W", p.dt_across_teg_c, p.heat_per_teg_w, p.power_per_teg_w);
    println!(
        "  {:.2} V, {:.2} A, efficiency {:.2}%",
        p.teg_voltage_v,
        p.teg_current_a,
        100.0 * p.teg_efficiency
    );

    let f = &p.flows;
    println!("\nFlow:");
    println!(
        "  Hot {:.2} GPM, {:.3} m/s, Re {:.0}, Nu {:.1}, h {:.0} W/m2K",
        f.hot_gpm, f.hot_channel_velocity_ms, f.hot_reynolds, f.hot_nusselt, f.hot_h_conv
    );
    println!("  Cold {:.2} GPM", f.cold_gpm);
    println!(
        "  Hot loop pressure drop {:.1} kPa, cold {:.1} kPa",
        p.pressure.hot_total_pa() / 1000.0,
        p.pressure.cold_total_pa / 1000.0
    );

    let x = &p.parasitics;
    println!("\nSystem:");
    println!("  Heat input      {:>9.2} kW", p.total_heat_input_w / 1000.0);
    println!("  Heat rejection  {:>9.2} kW", p.total_heat_rejection_w / 1000.0);
    println!("  Gross output    {:>9.3} kW", p.gross_electrical_w / 1000.0);
    println!(
        "  Parasitics      {:>9.3} kW (pumps {:.0} W, fans {:.0} W, electronics {:.0} W)",
        x.total_w() / 1000.0,
        x.pumps_w(),
        x.fan_w,
        x.electronics_w
    );
    println!(
        "  Net output      {:>9.3} kW ({:.1}% parasitic)",
        p.net_electrical_kw(),
        100.0 * p.parasitic_fraction
    );
}

fn cmd_design(request: &DesignRequest) -> AppResult<()> {
    let point = pgc_app::design_point(request)?;
    println!(
        "Design point: {:.0} C hot / {:.0} C cold",
        request.hot_c, request.cold_c
    );
    print_design_point(&point);
    Ok(())
}

fn print_sizing(s: &Sizing) {
    let b = &s.balance;
    let mark = if s.meets_target { "" } else { "  (target not reachable, peak shown)" };
    println!("\nTarget {:.1} kW net{}", s.target_kw, mark);
    println!("  TEGs:            {} ({} boards)", b.teg_count, b.teg_count / 36);
    println!("  Fuel:            {:.2} McF/day", b.mcf_per_day);
    println!("  Thermal input:   {:.1} kW", b.thermal_input_kw);
    println!("  HX delivery:     {:.1} kW ({:.1}%)", b.hx_delivery_kw, 100.0 * b.delivery_efficiency);
    println!("  Gross:           {:.2} kW (TEG {:.2}%)", b.gross_kw, 100.0 * b.teg_efficiency);
    println!("  Parasitic:       {:.2} kW", b.parasitic_kw);
    println!("  Net:             {:.2} kW (system {:.2}%)", b.net_kw, 100.0 * b.system_efficiency);
    println!("  Heat rejection:  {:.1} kW, {} boreholes", b.heat_rejection_kw, b.boreholes());
    for c in &b.costs {
        println!(
            "  @ ${:.2}/McF:     ${:.2}/day, ${:.0}/yr, ${:.3}/kWh",
            c.price_per_mcf,
            c.fuel_cost_per_day,
            c.yearly(),
            c.cost_per_kwh
        );
    }
}

fn cmd_fuel(module: &ModuleArgs, target_kw: &[f64], fuel: &FuelArgs) -> AppResult<()> {
    let targets = if target_kw.is_empty() {
        DEFAULT_TARGETS_KW.to_vec()
    } else {
        target_kw.to_vec()
    };
    let request = module.request(1620, 10.0);
    let chain = fuel.chain()?;
    println!(
        "Fuel sizing: {} at {:.0} C hot / {:.0} C cold, delivery {:.1}%",
        request.teg_key,
        request.hot_c,
        request.cold_c,
        100.0 * chain.delivery_efficiency()
    );
    let sized = pgc_app::size_targets(&request, &targets, &chain, &fuel.prices(), true)?;
    for s in &sized {
        print_sizing(s);
    }
    Ok(())
}

fn cmd_sweep_design(target_kw: &[f64], teg_counts: &[usize], fuel: &FuelArgs) -> AppResult<()> {
    let counts = if teg_counts.is_empty() {
        SWEEP_TEG_COUNTS.to_vec()
    } else {
        teg_counts.to_vec()
    };
    let targets = if target_kw.is_empty() {
        DEFAULT_TARGETS_KW.to_vec()
    } else {
        target_kw.to_vec()
    };
    let prices = fuel.prices();
    let rows =
        sweep_service::design_sweep(&SWEEP_SCENARIOS, &counts, &fuel.chain()?, &prices, true)?;

    for scenario in &SWEEP_SCENARIOS {
        println!("\n{}", scenario.label);
        print!(
            "  {:>6} {:>9} {:>9} {:>8} {:>7} {:>9} {:>5}",
            "TEGs", "gross kW", "net kW", "McF/d", "GPM", "reject kW", "bores"
        );
        for price in &prices {
            print!(" {:>9}", format!("${:.2}", price));
        }
        println!();
        for row in rows.iter().filter(|r| r.scenario == scenario.label) {
            print!(
                "  {:>6} {:>9.2} {:>9.2} {:>8.2} {:>7.2} {:>9.1} {:>5}",
                row.teg_count,
                row.gross_kw,
                row.net_kw,
                row.mcf_per_day,
                row.hot_gpm,
                row.heat_rejection_kw,
                row.boreholes
            );
            for cost in &row.cost_per_kwh {
                print!(" {:>9.3}", cost);
            }
            println!();
        }
        for &target in &targets {
            if let Some(best) = sweep_service::closest_to_target(&rows, scenario.label, target) {
                println!(
                    "  closest to {:.0} kW: {} TEGs -> {:.2} kW net, {:.2} McF/day",
                    target, best.teg_count, best.net_kw, best.mcf_per_day
                );
            }
        }
    }
    Ok(())
}

fn cmd_sweep_plant(plant_path: &Path, teg_counts: &[usize], days: Option<f64>) -> AppResult<()> {
    let mut plant = project_service::load_plant(plant_path)?;
    if let Some(days) = days {
        plant.simulation.duration_days = days;
    }
    project_service::validate_plant(&plant)?;
    if teg_counts.is_empty() {
        return Err(AppError::InvalidInput("no TEG counts given".to_string()));
    }

    println!(
        "Plant sweep: {} over {:.1} days",
        plant.name, plant.simulation.duration_days
    );
    let rows = sweep_service::plant_sweep(&plant, teg_counts, true)?;
    println!(
        "  {:>6} {:>12} {:>10} {:>10} {:>9} {:>10}",
        "TEGs", "net kWh", "mean W", "soil K", "drift K", "hot face K"
    );
    for row in &rows {
        println!(
            "  {:>6} {:>12.1} {:>10.0} {:>10.2} {:>+9.2} {:>10.1}",
            row.teg_count,
            row.net_energy_kwh,
            row.mean_net_power_w,
            row.final_soil_k,
            row.soil_drift_k,
            row.peak_hot_face_k
        );
    }
    Ok(())
}
