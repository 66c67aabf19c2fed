mod sandbox_app;
mod scenarios;

use clap::{Parser, Subcommand};
use phix_core::diagnostics::format_config_error;
use phix_core::{
    build_simulation_context, build_simulation_context_from_source, render_settings, run_frames,
    Arena, Settings, SimulationContext,
};
use sandbox_app::SandboxApp;
use scenarios::Scenario;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "phix")]
#[command(about = "phix - A 2D particle sandbox with solids, water and gas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless and print statistics
    Run {
        /// Path to a settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 600)]
        frames: usize,
        /// Built-in starting scene
        #[arg(long, value_enum, default_value_t = Scenario::Mixed)]
        scenario: Scenario,
    },
    /// Open the interactive sandbox window
    View {
        /// Path to a settings file, reloaded when it changes
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Built-in starting scene
        #[arg(long, value_enum)]
        scenario: Option<Scenario>,
    },
    /// Print a settings file holding the defaults
    Settings,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            settings,
            frames,
            scenario,
        } => run_headless(settings.as_deref(), frames, scenario),
        Commands::View { settings, scenario } => run_viewer(settings, scenario),
        Commands::Settings => {
            print!("{}", render_settings(&Settings::default(), &Arena::default()));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Build a context from an optional settings file, printing any warnings
fn load_context(path: Option<&Path>) -> Result<SimulationContext, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(build_simulation_context(Arena::default()));
    };

    let source = fs::read_to_string(path)?;
    match build_simulation_context_from_source(&source) {
        Ok((ctx, diagnostics)) => {
            for warning in diagnostics.warnings() {
                eprintln!("{}: {}", path.display(), warning);
            }
            Ok(ctx)
        }
        Err(e) => Err(format_config_error(&e, &source).into()),
    }
}

fn run_headless(
    settings: Option<&Path>,
    frames: usize,
    scenario: Scenario,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = load_context(settings)?;
    ctx.world.particles = scenario.build(&ctx.arena);
    log::info!(
        "running {:?} with {} particles for {} frames",
        scenario,
        ctx.world.len(),
        frames
    );

    run_frames(&mut ctx, frames);

    let stats = ctx.last_step();
    let counts = stats.counts;
    let mobile: Vec<f32> = ctx
        .particles()
        .iter()
        .filter(|p| !p.material.is_static())
        .map(|p| p.speed())
        .collect();
    let mean_speed = if mobile.is_empty() {
        0.0
    } else {
        mobile.iter().sum::<f32>() / mobile.len() as f32
    };

    println!("frames = {}", stats.frame);
    println!(
        "particles = {} (solid {}, water {}, gas {}, static {})",
        counts.total(),
        counts.solid,
        counts.water,
        counts.gas,
        counts.fixed
    );
    println!("mean_speed = {:.4}", mean_speed);
    println!(
        "collision = {} iterations, {} contacts in last sweep, converged: {}",
        stats.collision.iterations, stats.collision.resolved_last, stats.collision.converged
    );

    Ok(())
}

fn run_viewer(
    settings: Option<PathBuf>,
    scenario: Option<Scenario>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = load_context(settings.as_deref())?;
    if let Some(scenario) = scenario {
        ctx.world.particles = scenario.build(&ctx.arena);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([ctx.arena.width + 260.0, ctx.arena.height + 40.0]),
        ..Default::default()
    };

    eframe::run_native(
        "phix",
        options,
        Box::new(move |_cc| Ok(Box::new(SandboxApp::new(ctx, settings, scenario)))),
    )?;
    Ok(())
}
