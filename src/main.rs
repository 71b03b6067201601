//! Brickfall entry point
//!
//! Runs the simulation headless at the fixed tick rate with the autopilot
//! holding the paddle, which exercises the whole pipeline end to end:
//! modifier selection, collisions, modifiers, and the round-over flow.
//! A windowing/drawing layer would replace the autopilot with real input
//! and hand each tick's [`Scene`] to its renderer.

use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use brickfall::assets::Background;
use brickfall::config::GameConfig;
use brickfall::scene::Scene;
use brickfall::sim::{GameMode, GamePhase, GameSession, TickInput, tick};

/// Command line: `brickfall [width height] [--versus] [--seed N] [--ticks N]`
struct Args {
    field_width: Option<f32>,
    field_height: Option<f32>,
    versus: bool,
    seed: Option<u64>,
    /// Stop the demo after this many ticks (0 = run until the game ends)
    max_ticks: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        field_width: None,
        field_height: None,
        versus: false,
        seed: None,
        max_ticks: 20_000,
    };

    let mut positional = Vec::new();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--versus" => args.versus = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                args.max_ticks = value.parse().map_err(|_| format!("bad tick count: {value}"))?;
            }
            other if !other.starts_with('-') => positional.push(other.to_string()),
            other => return Err(format!("unknown flag: {other}")),
        }
    }

    match positional.len() {
        0 => {}
        2 => {
            args.field_width = Some(positional[0].parse().map_err(|_| "bad width")?);
            args.field_height = Some(positional[1].parse().map_err(|_| "bad height")?);
        }
        _ => return Err("expected either no field size or both width and height".into()),
    }

    Ok(args)
}

/// Fixed-rate frame clock: sleeps out the remainder of each tick period.
/// A late frame just starts the next period from now, no catch-up bursts.
struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / tick_rate.max(1),
            next: Instant::now(),
        }
    }

    fn wait_next(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: brickfall [width height] [--versus] [--seed N] [--ticks N]");
            return ExitCode::FAILURE;
        }
    };

    let mut config = GameConfig::load(Path::new(GameConfig::FILE_PATH));
    if args.versus {
        config.apply_mode(GameMode::Versus);
    }
    if let Some(width) = args.field_width {
        config.field_width = width;
    }
    if let Some(height) = args.field_height {
        config.field_height = height;
    }

    let background = Background::load(Path::new(Background::FILE_PATH));

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut session = GameSession::new(config, seed);
    let mut clock = FrameClock::new(session.config.tick_rate);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    log::info!(
        "running demo at {} Hz on a {}x{} field",
        session.config.tick_rate,
        session.config.field_width,
        session.config.field_height
    );

    while session.phase != GamePhase::Terminated {
        tick(&mut session, &input);

        // The render boundary: a drawing layer would consume this scene.
        // Headless, it only feeds the occasional heartbeat line.
        let scene = Scene::from_session(&session, background.as_ref());
        if session.time_ticks % (session.config.tick_rate as u64 * 10) == 0 {
            log::info!(
                "tick {}: score {}, {} blocks left",
                session.time_ticks,
                scene.score,
                scene.blocks.len()
            );
        }

        if args.max_ticks > 0 && session.time_ticks >= args.max_ticks {
            log::info!("demo tick limit ({}) reached, stopping", args.max_ticks);
            break;
        }

        clock.wait_next();
    }

    match session.winner {
        Some(winner) => log::info!("final result: {winner:?} wins"),
        None => log::info!("final score: {}", session.score),
    }

    ExitCode::SUCCESS
}
