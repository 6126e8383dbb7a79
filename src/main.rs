use clap::Parser;

use jam_sim::simulation::{consts, FrameTimer, WorldGenerator};

#[derive(Parser)]
#[command(name = "jam_sim")]
#[command(about = "Traffic jam simulation with optional UI")]
struct Cli {
    /// Run with the Bevy visualization
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds; defaults to 1/30
    #[arg(long)]
    delta: Option<f32>,

    /// Seed for reproducible world generation
    #[arg(long)]
    seed: Option<u64>,

    /// Pace headless ticks at the target frame rate with measured deltas
    #[arg(long)]
    realtime: bool,

    /// Display bounds for world generation
    #[arg(long, default_value = "800.0")]
    width: f32,

    #[arg(long, default_value = "600.0")]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(cli.seed);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    }

    env_logger::init();
    run_headless(&cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> anyhow::Result<()> {
    let delta = cli.delta.unwrap_or(1.0 / consts::TARGET_FPS);
    anyhow::ensure!(delta > 0.0, "--delta must be positive");

    log::info!(
        "running headless: {} ticks at {:.4}s per tick{}",
        cli.ticks,
        delta,
        cli.seed
            .map(|seed| format!(", seed {seed}"))
            .unwrap_or_default()
    );

    let mut generator = match cli.seed {
        Some(seed) => WorldGenerator::with_seed(seed),
        None => WorldGenerator::new(),
    };
    let mut world = generator.generate(cli.width, cli.height)?;

    println!("Initial state:");
    world.print_summary();
    println!();

    let ticks_per_summary = (1.0 / delta).ceil() as u32;
    let mut timer = FrameTimer::new(consts::TARGET_FPS);

    let mut tick = 0;
    while tick < cli.ticks {
        let batch = ticks_per_summary.min(cli.ticks - tick);
        for _ in 0..batch {
            tick += 1;
            if cli.realtime {
                std::thread::sleep(std::time::Duration::from_secs_f32(timer.target_delta()));
                let measured = timer.tick(std::time::Instant::now());
                world.step(measured);
            } else {
                world.step(delta);
            }
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * delta
        );
        if cli.realtime {
            println!("Measured rate: {:.0} fps", timer.fps());
        }
        world.print_summary();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(seed: Option<u64>) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use jam_sim::ui;

    println!("Starting Traffic Jam UI...");
    println!();
    println!("Controls:");
    println!("  Space  - Pause/resume");
    println!("  R      - Regenerate the world");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,jam_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Traffic Jam".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(ui::JamSimUiPlugin { seed })
        .run();
}
