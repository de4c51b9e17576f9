//! Edgewise - house-edge slot simulator
//!
//! Usage:
//!   edgewise play --spins 20 --bet 10     - Play a session and see the summary
//!   edgewise simulate --sessions 1000     - Batch-run seeded sessions
//!   edgewise zones --demo                 - Check a location against risk zones
//!   edgewise learn                        - How these games are built to win
//!   edgewise config                       - Print the default engine config

mod learn;
mod render;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ew_ab_sim::{BatchSimulator, SimConfig};
use ew_analytics::Session;
use ew_core::Chips;
use ew_slot_lab::{
    BackgroundSink, CancelToken, FlickerConfig, JsonLinesSink, SlotConfig, SlotEngine,
    SpinFlicker, render_line,
};
use ew_zones::{
    DEFAULT_LANDMARK_THRESHOLD_M, GeoPoint, NoResolver, ProvinceStatus, ZoneCatalog,
    demo_location,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Spin-log queue depth
const SINK_CAPACITY: usize = 1024;

#[derive(Parser)]
#[command(name = "edgewise", version, about = "Educational slot simulator that shows the house edge at work")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session and print the loss summary
    Play {
        /// Number of spins
        #[arg(short, long, default_value_t = 20)]
        spins: u32,
        /// Bet per spin
        #[arg(short, long, default_value_t = 10)]
        bet: Chips,
        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
        /// Engine config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Append every spin to a JSON-lines log
        #[arg(long)]
        log: Option<PathBuf>,
        /// Show the reel flicker before each spin
        #[arg(short, long)]
        animate: bool,
        /// Print the shareable poster after the summary
        #[arg(long)]
        share: bool,
    },
    /// Run many seeded sessions in parallel
    Simulate {
        #[arg(long, default_value_t = 1000)]
        sessions: usize,
        /// Spins per session
        #[arg(long, default_value_t = 100)]
        spins: usize,
        #[arg(short, long, default_value_t = 10)]
        bet: Chips,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Worker threads (0 = one per CPU)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,
        /// Engine config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a location against gambling risk zones
    Zones {
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        /// Use a random demo location
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        demo: bool,
        /// Seed for the demo pick
        #[arg(long)]
        seed: Option<u64>,
        /// Zone catalog (TOML) instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Province reported by your geocoder, if known
        #[arg(long)]
        province: Option<String>,
    },
    /// Lessons, quitting tips and where to get help
    Learn,
    /// Print the default engine config as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play {
            spins,
            bet,
            seed,
            config,
            log,
            animate,
            share,
        } => play(spins, bet, seed, config, log, animate, share),
        Commands::Simulate {
            sessions,
            spins,
            bet,
            seed,
            threads,
            config,
            json,
        } => simulate(sessions, spins, bet, seed, threads, config, json),
        Commands::Zones {
            lat,
            lon,
            demo,
            seed,
            catalog,
            province,
        } => zones(lat, lon, demo, seed, catalog, province),
        Commands::Learn => {
            print!("{}", learn::render());
            Ok(())
        }
        Commands::Config => {
            println!("{}", SlotConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<PathBuf>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(SlotConfig::default()),
    }
}

fn play(
    spins: u32,
    bet: Chips,
    seed: Option<u64>,
    config: Option<PathBuf>,
    log_path: Option<PathBuf>,
    animate: bool,
    share: bool,
) -> Result<()> {
    if bet <= 0 {
        bail!("Bet must be positive, got {bet}");
    }
    let config = load_config(config)?;
    let mut engine = match seed {
        Some(seed) => SlotEngine::seeded(config, seed)?,
        None => SlotEngine::from_entropy(config)?,
    };

    let background = match &log_path {
        Some(path) => {
            let file = JsonLinesSink::open(path)
                .with_context(|| format!("Failed to open spin log {}", path.display()))?;
            let sink = Arc::new(BackgroundSink::spawn(file, SINK_CAPACITY)?);
            engine = engine.with_sink(sink.clone());
            Some(sink)
        }
        None => None,
    };

    let mut session = Session::new(engine);
    let mut flicker = animate.then(|| SpinFlicker::new(FlickerConfig::default()));
    let cancel = CancelToken::new();

    println!("🎰 {}\n", session.status_line());

    for _ in 0..spins {
        if let Some(flicker) = flicker.as_mut() {
            let mut stdout = std::io::stdout();
            flicker.run(session.state(), &cancel, |frame| {
                if let Err(e) = show_frame(&mut stdout, &render_line(&frame)) {
                    log::debug!("Flicker stopped: {e}");
                    cancel.cancel();
                }
            });
            println!("\r");
        }
        let spin = session.spin(bet)?;
        println!("{}", spin.describe());
    }

    let initial = session.state().initial_balance();
    let stats = session.stats();
    println!("\n{}", session.status_line());
    println!(
        "Loss vs. starting balance: {}",
        render::ratio_bar(session.loss_ratio(initial as f64))
    );
    println!(
        "Cumulative loss: {}",
        render::sparkline(&session.cumulative_loss_series(), 40)
    );
    println!(
        "RTP: {:.1}% • Hit rate: {:.1}% • Near-miss rate: {:.1}% • Longest losing streak: {}\n",
        stats.rtp(),
        stats.hit_rate(),
        stats.near_miss_rate(),
        stats.longest_losing_streak
    );

    let summary = session.summary();
    print!("{}", summary.report());
    if share {
        println!("\n{}", summary.share_poster());
    }

    // Engine holds the other sink handle; drop it first so the worker drains
    drop(session);
    if let (Some(sink), Some(path)) = (background, log_path) {
        if let Ok(sink) = Arc::try_unwrap(sink) {
            sink.shutdown();
        }
        log::info!("Spin log written to {}", path.display());
    }
    Ok(())
}

/// Overwrite the current terminal line with one flicker frame
fn show_frame(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    write!(out, "\r{line}")?;
    out.flush()
}

fn simulate(
    sessions: usize,
    spins: usize,
    bet: Chips,
    seed: u64,
    threads: usize,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let slot = load_config(config)?;
    let config = SimConfig::default()
        .with_sessions(sessions)
        .with_spins(spins)
        .with_bet(bet)
        .with_seed(seed)
        .with_threads(threads)
        .with_slot(slot);

    let report = BatchSimulator::new(config)?.run()?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

fn zones(
    lat: Option<f64>,
    lon: Option<f64>,
    demo: bool,
    seed: Option<u64>,
    catalog: Option<PathBuf>,
    province: Option<String>,
) -> Result<()> {
    let point = match (lat, lon) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)?,
        _ if demo => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            demo_location(&mut rng)
        }
        _ => bail!("Pass --lat and --lon, or --demo"),
    };

    let catalog = match catalog {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read zone catalog {}", path.display()))?;
            ZoneCatalog::from_toml_str(&text)?
        }
        None => ZoneCatalog::builtin(),
    };

    println!("📍 {point}\n");

    match catalog.nearest_hit(point) {
        Some(hit) => println!("{}\n", hit.message()),
        None => println!("✅ Not inside any listed risk zone.\n"),
    }
    if let Some(landmark) = catalog.near_landmark(point, DEFAULT_LANDMARK_THRESHOLD_M) {
        println!("⚠️ Near {}\n", landmark.name);
    }

    let status = match province {
        Some(name) => ProvinceStatus::check(&move |_: GeoPoint| Some(name.clone()), point),
        None => ProvinceStatus::check(&NoResolver, point),
    };
    println!("{}", status.share_text());
    Ok(())
}
