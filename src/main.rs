//! Command-line replay walker.
//!
//! Loads a replay, plays every step in the configured range by sampling a
//! fixed number of frames, and prints one JSON summary line per step with
//! the draw command counts of its final frame.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colony_anim::animation::GeneratorKind;
use colony_anim::error::ColonyError;
use colony_anim::options::Options;
use colony_anim::replay::{Replay, ReplayPlayer};
use colony_anim::scene::StepScene;
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "colony-anim", version, about = "Walk an ant-colony replay")]
struct Cli {
    /// Replay file (JSON array or {"data": {...}} object).
    replay: PathBuf,
    /// TOML options file.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Frames sampled per step.
    #[arg(long, default_value_t = 30)]
    frames: u32,
}

fn run(cli: &Cli) -> Result<(), ColonyError> {
    let options = match &cli.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let replay = Replay::load(&cli.replay)?;
    let mut player = ReplayPlayer::new(replay, options)?;
    let frames = cli.frames.max(1);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    while let Some(step) = player.current_step() {
        let mut draw_commands = 0;
        let mut visible_commands = 0;
        for frame in 1..=frames {
            player.set_progress(frame as f32 / frames as f32);
            let draw = player.scene().map(StepScene::draw_list).unwrap_or_default();
            draw_commands = draw.len();
            visible_commands = draw.iter().filter(|cmd| !cmd.is_invisible()).count();
        }

        let mut generators = Map::new();
        if let Some(scene) = player.scene() {
            for kind in GeneratorKind::ALL {
                let _ = generators
                    .insert(kind.name().to_owned(), Value::from(scene.scheduler().count(kind)));
            }
        }
        let line = json!({
            "step": step,
            "generators": generators,
            "draw_commands": draw_commands,
            "visible_commands": visible_commands,
        });
        writeln!(out, "{line}")?;

        let _ = player.skip_step()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
