//! Billiards headless driver
//!
//! Builds a table, flicks the first ball across it and prints the final frame
//! as JSON. Usage: `billiards [config.json] [frames]`

use std::process::ExitCode;

use billiards::sim::{EventQueue, InputEvent, Simulation};
use billiards::{Result, SimConfig};

const DEFAULT_FRAMES: u64 = 600;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Billiards (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse().map_err(|_| {
            billiards::Error::InvalidConfig(format!("frame count must be an integer (got {n:?})"))
        })?,
        None => DEFAULT_FRAMES,
    };

    let mut sim = Simulation::new(&config)?;
    let mut queue = EventQueue::new();

    // Pull the first ball back toward the table center and let go
    if let Some(first) = sim.balls().iter().next() {
        let grab = first.pos;
        let center = sim.arena().size() / 2.0;
        let release = grab + (center - grab).normalize_or_zero() * 150.0;
        queue.push(InputEvent::PointerDown(grab));
        queue.tick();
        queue.push(InputEvent::PointerUp(release));
    }

    let mut collisions = 0;
    sim.pump(&mut queue);
    for _ in 0..frames {
        collisions += sim.tick();
    }
    log::info!(
        "Ran {} frames (seed {:?}), {} pair collisions",
        sim.frame(),
        sim.seed(),
        collisions
    );

    println!("{}", sim.snapshot().to_json()?);
    Ok(())
}

