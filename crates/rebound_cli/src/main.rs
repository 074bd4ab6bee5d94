//! Rebound CLI
//!
//! Inspect the spring a damping/response pair produces, and replay drag
//! gestures headlessly to watch the release animation frame by frame.

mod config;
mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rebound_animation::{relative_velocity_vec, SpringParameters};
use rebound_core::Vec2;
use rebound_drag::{DragMode, SpringControls};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{ReboundConfig, CONFIG_FILE};
use crate::simulate::SimulationOptions;

/// Spring-based drag release playground
#[derive(Parser, Debug)]
#[command(name = "rebound")]
#[command(about = "Spring-based drag release playground")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the physical spring for a damping/response pair
    Params {
        /// Damping ratio, (0, 1]
        #[arg(long, default_value_t = 0.8)]
        damping: f32,

        /// Response time in seconds
        #[arg(long, default_value_t = 0.4)]
        response: f32,

        /// Release velocity "x,y" (units per second)
        #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
        velocity: Option<Vec2>,

        /// Displacement from rest at release "x,y"
        #[arg(
            long,
            value_parser = parse_vec2,
            default_value = "0,0",
            allow_hyphen_values = true
        )]
        translation: Vec2,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay a drag gesture and print every frame of the release
    Simulate {
        /// Config file or directory containing rebound.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON array of pointer samples; a built-in fling is used otherwise
        #[arg(short, long)]
        script: Option<PathBuf>,

        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Show the pointer marker and velocity readout
        #[arg(long)]
        debug: bool,

        #[arg(long)]
        damping: Option<f32>,

        #[arg(long)]
        response: Option<f32>,

        #[arg(long)]
        fps: Option<u32>,

        /// Print one JSON object per frame
        #[arg(long)]
        json: bool,
    },

    /// Write a default rebound.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Position,
    Transform,
}

impl From<ModeArg> for DragMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Position => DragMode::Position,
            ModeArg::Transform => DragMode::Transform,
        }
    }
}

fn parse_vec2(s: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{}\"", s))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Params {
            damping,
            response,
            velocity,
            translation,
            json,
        } => cmd_params(damping, response, velocity, translation, json),
        Command::Simulate {
            config,
            script,
            mode,
            debug,
            damping,
            response,
            fps,
            json,
        } => {
            let mut config = match config {
                Some(path) => ReboundConfig::load(&path)?,
                None => ReboundConfig::default(),
            };
            if let Some(mode) = mode {
                config.drag.mode = mode.into();
            }
            config.drag.debug |= debug;
            if let Some(damping) = damping {
                config.spring.damping = damping;
            }
            if let Some(response) = response {
                config.spring.response = response;
            }
            if let Some(fps) = fps {
                config.simulation.fps = fps;
            }
            config.validate()?;

            cmd_simulate(&config, script, json)
        }
        Command::Init { path } => cmd_init(path),
    }
}

fn cmd_params(
    damping: f32,
    response: f32,
    velocity: Option<Vec2>,
    translation: Vec2,
    json: bool,
) -> Result<()> {
    let controls = SpringControls::new(damping, response);
    if let Err(e) = controls.validated() {
        tracing::warn!("{}", e);
    }

    // Displacement from rest, target is rest (zero)
    let relative = velocity
        .map(|v| relative_velocity_vec(v, translation, Vec2::ZERO))
        .unwrap_or_default();
    let parameters = SpringParameters::new(damping, response, relative);
    let spring = parameters.config();

    if json {
        let output = serde_json::json!({
            "parameters": parameters,
            "spring": spring,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("damping ratio:     {}", damping);
    println!("response:          {}s", response);
    println!("mass:              {}", spring.mass);
    println!("stiffness:         {:.4}", spring.stiffness);
    println!("damping:           {:.4}", spring.damping);
    if velocity.is_some() {
        println!(
            "relative velocity: ({:.4}, {:.4})",
            relative.x, relative.y
        );
    }

    Ok(())
}

fn cmd_simulate(config: &ReboundConfig, script: Option<PathBuf>, json: bool) -> Result<()> {
    let options = SimulationOptions {
        mode: config.drag.mode,
        debug: config.drag.debug,
        fps: config.simulation.fps,
        max_seconds: config.simulation.max_seconds,
        controls: config.spring,
        element: config.simulation.element.frame(),
    };

    let samples = match script {
        Some(path) => simulate::load_script(&path)?,
        None => simulate::default_script(&options.element),
    };

    tracing::info!(
        mode = ?options.mode,
        damping = options.controls.damping,
        response = options.controls.response,
        samples = samples.len(),
        "simulating drag release"
    );

    let frames = simulate::run(&options, &samples)?;

    for frame in &frames {
        if json {
            println!("{}", serde_json::to_string(frame)?);
        } else {
            println!(
                "{:>9.2}ms  {:<9} x={:>9.3} y={:>9.3}",
                frame.time_ms, frame.phase, frame.origin.x, frame.origin.y
            );
            if let Some(readout) = &frame.readout {
                tracing::debug!("{}", readout);
            }
        }
    }

    Ok(())
}

fn cmd_init(path: PathBuf) -> Result<()> {
    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let target = path.join(CONFIG_FILE);
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }

    fs::write(&target, ReboundConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    tracing::info!("Created {}", target.display());
    Ok(())
}
