//! Reel Bank Simulator
//!
//! Usage:
//!   reel-sim                          - One spin at NORMAL speed
//!   reel-sim --spins 10 --speed turbo - Ten turbo spins
//!   reel-sim --seed 42 --json         - Reproducible spins as JSON lines
//!   reel-sim --config bank.yaml       - Bank layout from JSON/YAML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use rf_reels::{
    BankEvent, RandomPicker, ReelBank, ReelBankConfig, ReelSet, SpeedProfile, Symbol, TweenClock,
};

#[derive(Parser)]
#[command(name = "reel-sim", about = "Run slot reel bank spins headlessly")]
struct Cli {
    /// Speed profile (slow, normal, turbo)
    #[arg(short, long)]
    speed: Option<SpeedProfile>,

    /// Number of bank-wide spins
    #[arg(short = 'n', long, default_value_t = 1)]
    spins: u32,

    /// RNG seed for reproducible stops
    #[arg(long)]
    seed: Option<u64>,

    /// Bank config file (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame interval (ms)
    #[arg(long, default_value_t = 16.0)]
    tick_ms: f64,

    /// Print one JSON object per spin
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SpinReport {
    spin: u32,
    speed: SpeedProfile,
    stops: Vec<Option<usize>>,
    duration_ms: f64,
    window: Vec<Vec<Symbol>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.tick_ms <= 0.0 {
        bail!("--tick-ms must be positive");
    }

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ReelBankConfig::default(),
    };
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }

    let picker = match cli.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::new(),
    };
    let mut bank = ReelBank::new(config, picker).context("Failed to build reel bank")?;
    bank.populate(&ReelSet::classic())
        .context("Failed to populate reels")?;
    log::info!("Starting {} spins at {}", cli.spins, bank.speed_profile());

    let mut clock = TweenClock::new();
    for spin in 1..=cli.spins {
        let started_ms = clock.now_ms();
        let Some(plan) = bank.trigger_spin(&mut clock) else {
            bail!("bank refused spin {}", spin);
        };

        let max_ticks = (plan.total_ms() / cli.tick_ms).ceil() as usize + 2;
        let events = bank.handle_all(clock.run_to_end(cli.tick_ms, max_ticks));
        if !events.iter().any(|e| matches!(e, BankEvent::SpinFinished { .. })) {
            bail!("spin {} did not finish", spin);
        }

        let report = SpinReport {
            spin,
            speed: bank.speed_profile(),
            stops: plan.stops,
            duration_ms: clock.now_ms() - started_ms,
            window: bank.window(),
        };
        print_report(&report, cli.json)?;
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ReelBankConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => ReelBankConfig::from_yaml(&text),
        _ => ReelBankConfig::from_json(&text),
    };
    config.with_context(|| format!("Invalid config {}", path.display()))
}

fn print_report(report: &SpinReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    println!(
        "spin {} [{}] landed in {:.0}ms, stops {:?}",
        report.spin, report.speed, report.duration_ms, report.stops
    );
    let rows = report.window.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        let line: Vec<String> = report
            .window
            .iter()
            .map(|column| {
                column
                    .get(row)
                    .map_or_else(|| "-".to_string(), Symbol::key)
            })
            .map(|key| format!("{:>8}", key))
            .collect();
        println!("{}", line.join(""));
    }
    Ok(())
}
