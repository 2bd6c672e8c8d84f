//! # Level Preview
//!
//! Generates a level into an in-memory scene and prints it.
//!
//! ## Usage
//!
//! ```bash
//! level_preview --config level.toml --seed 42 --length 30 --extend 10
//! RUST_LOG=runway_procedural=debug level_preview
//! ```

use std::process::ExitCode;

use runway_procedural::{LevelConfig, LevelGenerator, LevelSeed};
use runway_rendering::{AsciiView, SceneBackend, SceneObjectKind};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<String>,
    seed: LevelSeed,
    length: Option<u32>,
    extend: u32,
}

fn print_help() {
    println!("Usage: level_preview [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>    TOML level configuration (default: built-in)");
    println!("  -s, --seed <SEED>      Level seed (default: 0)");
    println!("  -l, --length <LAYERS>  Layers to generate (default: preview_length)");
    println!("  -e, --extend <LAYERS>  Layers to append afterwards (default: 0)");
    println!("  -h, --help             Print this help");
}

/// Parses flags. Returns `None` when help was requested.
fn parse_args() -> Result<Option<Args>, String> {
    let mut args = Args {
        config: None,
        seed: LevelSeed::default(),
        length: None,
        extend: 0,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| iter.next().ok_or_else(|| format!("{name} needs a value"));
        match flag.as_str() {
            "--config" | "-c" => args.config = Some(value("--config")?),
            "--seed" | "-s" => {
                let raw = value("--seed")?;
                let seed = raw.parse().map_err(|_| format!("invalid seed: {raw}"))?;
                args.seed = LevelSeed::new(seed);
            }
            "--length" | "-l" => {
                let raw = value("--length")?;
                args.length = Some(raw.parse().map_err(|_| format!("invalid length: {raw}"))?);
            }
            "--extend" | "-e" => {
                let raw = value("--extend")?;
                args.extend = raw.parse().map_err(|_| format!("invalid extend: {raw}"))?;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(Some(args))
}

fn run(args: &Args) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => LevelConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => LevelConfig::default(),
    };
    let length = args.length.unwrap_or(config.preview_length);

    let mut generator = LevelGenerator::with_seed(config, SceneBackend::new(), args.seed);
    generator.generate(length, true).map_err(|e| e.to_string())?;
    if args.extend > 0 {
        generator.generate(args.extend, false).map_err(|e| e.to_string())?;
    }

    print!("{}", AsciiView::new(generator.grid()));
    println!();

    let scene = generator.backend();
    let count = |wanted: fn(&SceneObjectKind) -> bool| scene.objects().filter(|(_, o)| wanted(&o.kind)).count();
    println!("Seed:        {}", args.seed.value());
    println!("Layers:      {}", generator.cursor());
    println!("Ground:      {}", count(|k| matches!(k, SceneObjectKind::Ground)));
    println!("Ramps:       {}", count(|k| matches!(k, SceneObjectKind::Ramp)));
    println!("Obstacles:   {}", count(|k| matches!(k, SceneObjectKind::Obstacle(_))));
    println!("Death walls: {}", generator.grid().death_walls().len());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            print_help();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
