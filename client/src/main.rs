use std::{env, fs, path::PathBuf, process::exit};

use anyhow::Context;
use colored::Colorize;
use liblife::{Simulation, SimulationConfig, board::Board, rule::Rule};

use canvas::Canvas;
use config::Config;
use sleeper::Sleeper;

mod canvas;
mod config;
mod render;
mod sleeper;

fn main() {
    let Some(config_path) = env::args().nth(1) else {
        eprintln!("Usage: glife <config.ini>");
        exit(2);
    };

    if let Err(e) = run(PathBuf::from(config_path)) {
        eprintln!("{} {e:?}", "!".red());
        exit(1);
    }
}

fn run(config_path: PathBuf) -> anyhow::Result<()> {
    let config = Config::load(&config_path)?;

    let seed_text = fs::read_to_string(&config.seed_file)
        .with_context(|| format!("Couldn't read seed file {}", config.seed_file.display()))?;
    let (board, alive_char) = Board::from_seed(&seed_text)?;

    let sim_config = SimulationConfig {
        rule: Rule::parse(&config.rules)?,
        max_generations: config.max_gen,
        fps: config.fps,
    };

    let mut canvas = if config.generate_image {
        fs::create_dir_all(&config.image_dir)
            .with_context(|| format!("Couldn't create {}", config.image_dir.display()))?;

        Some(Canvas::new(
            board.logical_width() as u32,
            board.logical_height() as u32,
            config.block_size,
        ))
    } else {
        None
    };

    if let Some(canvas) = &canvas {
        println!(
            "Exporting {}x{} frames to {}",
            canvas.width(),
            canvas.height(),
            config.image_dir.display(),
        );
    }

    let mut sim = Simulation::new(board, sim_config);
    let mut sleeper = Sleeper::new(sim.config().fps);

    let reason = sim.run(|board, generation| {
        render::print_frame(board, generation, alive_char);

        if let Some(canvas) = canvas.as_mut() {
            canvas.draw_board(board, config.alive_color, config.bkg_color);

            let path = config.image_dir.join(format!("gen_{generation}.png"));
            if let Err(e) = canvas.export_png(&path) {
                eprintln!("{} {e:#}", "! image export:".yellow());
            }
        }

        sleeper.pace();
    });

    render::print_halt_report(reason, sim.generation());

    Ok(())
}
