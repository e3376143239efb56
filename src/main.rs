//! Bullet Hell headless runner
//!
//! Drives the simulation without a window: a simple autopilot plays from the
//! title menu until the run ends or the frame limit is reached.
//!
//! Usage:
//!   RUST_LOG=info cargo run -- --seed 7 --difficulty hard --frames 7200
//!   cargo run -- --settings settings.json --json

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use bullet_hell::consts::*;
use bullet_hell::settings::parse_difficulty;
use bullet_hell::sim::{
    GamePhase, GameState, MenuAction, MoveIntent, RenderSnapshot, TickInput, UpgradeKind,
    advance_frame,
};
use bullet_hell::{Difficulty, Settings};

#[derive(Parser)]
#[command(name = "bullet-hell")]
#[command(about = "Run the bullet hell simulation headless with an autopilot")]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Difficulty (easy, normal, hard); overrides the settings file
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
    /// Maximum frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Wall-clock seconds fed per frame (clamped by the simulation)
    #[arg(long, default_value_t = DEFAULT_FRAME_DT)]
    dt: f32,
    /// JSON settings file
    #[arg(long)]
    settings: Option<String>,
    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

/// Session plus the bookkeeping the runner needs between frames
struct Game {
    state: GameState,
    input: TickInput,
    last_phase: GamePhase,
    frames: u32,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        let state = GameState::new(seed, settings);
        let last_phase = state.phase;
        Self {
            state,
            input: TickInput::default(),
            last_phase,
            frames: 0,
        }
    }

    /// Run one frame, returning its snapshot
    fn update(&mut self, dt: f32) -> RenderSnapshot {
        self.autopilot();
        let snapshot = advance_frame(&mut self.state, &self.input, dt);
        self.input.clear_events();
        self.frames += 1;

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!(
                "Frame {}: {:?} -> {:?} (level {}, HP {}/{})",
                self.frames,
                self.last_phase,
                phase,
                self.state.level,
                self.state.player.hp,
                self.state.player.max_hp
            );
            self.last_phase = phase;
        }
        snapshot
    }

    fn finished(&self) -> bool {
        self.state.quit_requested
            || matches!(self.state.phase, GamePhase::GameOver | GamePhase::Win)
    }

    /// Fill in this frame's input from the current state
    fn autopilot(&mut self) {
        match self.state.phase {
            GamePhase::Menu => self.input.actions.push(MenuAction::Play),
            GamePhase::Options => self.input.actions.push(MenuAction::Back),
            GamePhase::Paused => self.input.pause = true,
            GamePhase::Upgrade => {
                let choices = &self.state.upgrade_choices;
                let pick = choices
                    .iter()
                    .position(|&u| u == UpgradeKind::MaxHealth)
                    .unwrap_or(0);
                self.input.actions.push(MenuAction::SelectUpgrade(pick));
            }
            GamePhase::Playing => {
                self.input.fire = true;
                self.input.super_shot = self.state.player.can_super();
                self.input.movement = self.steer();
            }
            GamePhase::GameOver | GamePhase::Win => {}
        }
    }

    /// Back away from nearby bullets, otherwise line up under the boss
    fn steer(&self) -> MoveIntent {
        let player = self.state.player.pos;
        let threat: Vec2 = self
            .state
            .enemy_bullets
            .iter()
            .map(|b| player - b.pos)
            .filter(|away| away.length_squared() < 70.0 * 70.0)
            .map(|away| away / away.length_squared().max(1.0))
            .sum();

        let push = if threat.length_squared() > 0.0 {
            threat
        } else {
            Vec2::new(self.state.boss.pos.x - player.x, 0.0)
        };

        MoveIntent {
            left: push.x < -2.0e-3,
            right: push.x > 2.0e-3,
            up: push.y < -2.0e-3,
            down: push.y > 2.0e-3,
            slow: threat.length_squared() == 0.0,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => {
            Settings::load(path).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }

    log::info!(
        "Bullet Hell (headless) starting: seed {}, difficulty {}, {} frames",
        args.seed,
        settings.difficulty,
        args.frames
    );

    let mut game = Game::new(args.seed, settings);
    let mut last = RenderSnapshot::capture(&game.state);
    while game.frames < args.frames && !game.finished() {
        last = game.update(args.dt);
    }

    println!(
        "Seed {}: {:?} after {} frames: level {}, player HP {}/{}, boss HP {}/{}",
        game.state.seed,
        last.phase,
        game.frames,
        last.level,
        last.player.hp,
        last.player.max_hp,
        last.boss.hp,
        last.boss.max_hp
    );

    if args.json {
        println!("{}", last.to_json().context("serializing final frame")?);
    }

    Ok(())
}
