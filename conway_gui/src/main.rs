// main.rs - Windowed Conway's Game of Life on a torus
// Uses the conway crate for stepping and vertex batching, egui for the window

use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use conway::{Grid, LifeConfig, Simulation, patterns};
use eframe::egui;
use egui::Color32;
use tracing::info;

mod fps;  // Title-bar FPS counter
mod sink; // egui backend for the vertex batch
mod ui;   // eframe::App impl

use fps::FpsCounter;

#[derive(Parser)]
#[command(name = "conway_gui")]
#[command(version)]
#[command(about = "Conway's Game of Life on a torus, drawn in one batch per frame")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    init: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    columns: Option<usize>,

    /// Probability that a cell starts alive (0.0 - 1.0)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Target generations per second
    #[arg(long)]
    fps: Option<u32>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Row bands stepped concurrently
    #[arg(long)]
    bands: Option<usize>,

    /// Start from a named pattern (e.g. "Gosper Glider Gun")
    #[arg(short, long)]
    pattern: Option<String>,
}

impl Cli {
    /// File (or defaults) first, then any flag given on the command line.
    fn into_config(self) -> Result<LifeConfig> {
        let mut config = match &self.config {
            Some(path) => LifeConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => LifeConfig::default(),
        };
        if let Some(rows) = self.rows { config.rows = rows; }
        if let Some(columns) = self.columns { config.columns = columns; }
        if let Some(threshold) = self.threshold { config.threshold = threshold; }
        if let Some(fps) = self.fps { config.fps = fps; }
        if let Some(bands) = self.bands { config.bands = bands; }
        if self.seed.is_some() { config.seed = self.seed; }
        if self.pattern.is_some() { config.pattern = self.pattern; }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(path) = &cli.init {
        LifeConfig::default()
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "Wrote default configuration");
        return Ok(());
    }

    let config = cli.into_config()?;
    let app = LifeApp::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app.config.window.width as f32, app.config.window.height as f32 + 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window loop failed: {e}"))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Seed from the wall clock when none was configured.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

pub struct LifeApp {
    sim: Simulation,
    config: LifeConfig,

    pub is_running: bool,
    pub last_update: Instant,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub speed: f32,

    fps: FpsCounter,
    live_cells: usize,
}

impl LifeApp {
    fn new(config: LifeConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(clock_seed);
        info!(seed, "Starting simulation");

        let mut grid = Grid::new(config.rows, config.columns, config.threshold, seed)
            .context("cannot build grid")?;
        let mut selected_pattern = 0;
        if let Some(name) = &config.pattern {
            if let Some(i) = patterns::position(name) {
                patterns::PATTERNS[i].apply_centered(&mut grid);
                selected_pattern = i;
            }
        }

        let sim = Simulation::new(grid)
            .with_bands(config.bands)
            .context("cannot start band workers")?;

        Ok(Self {
            sim,
            speed: config.fps as f32,
            is_running: true,
            last_update: Instant::now(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(20, 20, 20),
            selected_pattern,
            fps: FpsCounter::new(Instant::now()),
            live_cells: 0,
            config,
        })
    }
}
