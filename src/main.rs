//! Side Runner entry point
//!
//! Headless native runner: builds a level, drives the fixed-step loop with
//! the autopilot or a scripted key sequence, and prints a JSON run summary.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use side_runner::consts::MOUNT_TILE_NUM;
use side_runner::platform::{Assets, InputState};
use side_runner::renderer::Camera;
use side_runner::sim::{DeathCause, GameEvent, GameState, PlayerPhase, PointKind, TileKind, tick};
use side_runner::{ConfigError, Settings, column_of};

#[derive(Parser, Debug)]
#[command(name = "side-runner", about = "Headless side-scrolling platformer simulation")]
struct Args {
    /// Level seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Steps to simulate (overrides settings)
    #[arg(long)]
    steps: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Let the autopilot play
    #[arg(long, conflicts_with = "no_autoplay")]
    autoplay: bool,
    /// Use the scripted keys instead of the autopilot
    #[arg(long)]
    no_autoplay: bool,
    /// Write the effective settings to this file and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    goals: u32,
    deaths_by_fall: u32,
    deaths_by_enemy: u32,
    restarts: u32,
    furthest_x: i32,
    final_x: i32,
    final_phase: Option<PlayerPhase>,
    camera_x: f32,
    tiles: usize,
    pitfall_columns: usize,
    mountains: usize,
    pipes: usize,
    enemies: usize,
    drawables: usize,
}

impl RunSummary {
    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started { .. } => {}
            GameEvent::ReachedGoal { .. } => self.goals += 1,
            GameEvent::Died {
                cause: DeathCause::Fall,
                ..
            } => self.deaths_by_fall += 1,
            GameEvent::Died {
                cause: DeathCause::Enemy,
                ..
            } => self.deaths_by_enemy += 1,
            GameEvent::Restarted { .. } => self.restarts += 1,
        }
    }
}

fn effective_settings(args: &Args) -> Result<Settings, ConfigError> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    if let Some(steps) = args.steps {
        settings.max_steps = steps;
    }
    if args.autoplay {
        settings.autoplay = true;
    }
    if args.no_autoplay {
        settings.autoplay = false;
    }
    Ok(settings)
}

fn run(settings: &Settings) -> RunSummary {
    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut state = GameState::new(seed, &Assets::preloaded());
    let mut camera = Camera::default();
    let mut input = InputState::new();
    log::info!("Game initialized with seed: {}", seed);

    let points = state.level.points();
    let mut summary = RunSummary {
        seed,
        tiles: state.level.tiles().len(),
        pitfall_columns: points
            .iter(PointKind::Fall)
            .map(column_of)
            .collect::<BTreeSet<_>>()
            .len(),
        mountains: state.level.count(TileKind::Mountain) / MOUNT_TILE_NUM as usize,
        pipes: state.level.count(TileKind::Pipe),
        enemies: state.enemies.len(),
        ..Default::default()
    };

    for step in 1..=settings.max_steps {
        input.update(&settings.held_at(step));
        let mut tick_input = input.tick_input();
        tick_input.idle_mode = settings.autoplay;

        tick(&mut state, &tick_input);

        for msg in state.take_camera_messages() {
            camera.apply(msg);
        }
        summary.furthest_x = summary.furthest_x.max(state.player.pos.x);

        let mut reached_goal = false;
        for event in state.drain_events() {
            reached_goal |= matches!(event, GameEvent::ReachedGoal { .. });
            summary.record(event);
        }
        if reached_goal && settings.stop_on_goal {
            break;
        }
    }

    summary.ticks = state.time_ticks;
    summary.final_x = state.player.pos.x;
    summary.final_phase = Some(state.player_phase());
    summary.camera_x = camera.center.x;
    summary.drawables = state.render.len();
    summary
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Side Runner (headless) starting...");

    let args = Args::parse();
    let settings = match effective_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.write_settings {
        return match settings.save(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("{}", err);
                ExitCode::FAILURE
            }
        };
    }

    let summary = run(&settings);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to encode summary: {}", err);
            ExitCode::FAILURE
        }
    }
}
