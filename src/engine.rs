//! The orchestrator: frame loop, status state machine, stage timing, and scoring.
//!
//! Invalid transitions (pausing from the menu, advancing mid-stage, ...) are
//! silently ignored rather than reported.

use rand::RngCore;

use crate::bullet::{Bullet, BulletSpawner};
use crate::clock::Clock;
use crate::collision::{self, Collision};
use crate::entities::{Direction, GameState, GameStatus, PlayerState, INVINCIBLE_DURATION};
use crate::error::ConfigError;
use crate::listeners::{Listeners, Subscription};
use crate::player::Player;
use crate::scheduler::FrameScheduler;
use crate::scores::HighScoreStore;
use crate::stages::{validate_stages, StageConfig};

/// Survival time (ms) worth one point before multipliers.
pub const SCORE_INTERVAL_MS: f64 = 100.0;
pub const STAGE_CLEAR_BONUS: u32 = 1000;

/// Everything the engine talks to but does not own the behavior of.
pub struct Collaborators {
    pub clock: Box<dyn Clock>,
    pub scheduler: Box<dyn FrameScheduler>,
    pub high_scores: Box<dyn HighScoreStore>,
    pub rng: Box<dyn RngCore>,
}

pub struct Engine {
    stages: Vec<StageConfig>,
    player: Player,
    spawner: BulletSpawner,
    state: GameState,
    listeners: Listeners,

    clock: Box<dyn Clock>,
    scheduler: Box<dyn FrameScheduler>,
    high_scores: Box<dyn HighScoreStore>,

    last_time: f64,
    stage_start_time: f64,
    stage_elapsed: f64,
    progress: f64,
    score_accumulator: f64,
    running: bool,
    destroyed: bool,
}

impl Engine {
    /// Build an engine in the `Menu` state. The stage table is validated
    /// here so no later transition can hit an unusable stage.
    pub fn new(stages: Vec<StageConfig>, collaborators: Collaborators) -> Result<Self, ConfigError> {
        validate_stages(&stages)?;

        let Collaborators {
            clock,
            scheduler,
            high_scores,
            rng,
        } = collaborators;

        let high_score = high_scores.get();
        log::debug!("loaded high score {}", high_score);

        Ok(Self {
            stages,
            player: Player::new(),
            spawner: BulletSpawner::new(rng),
            state: GameState {
                high_score,
                ..GameState::default()
            },
            listeners: Listeners::default(),
            clock,
            scheduler,
            high_scores,
            last_time: 0.0,
            stage_start_time: 0.0,
            stage_elapsed: 0.0,
            progress: 0.0,
            score_accumulator: 0.0,
            running: false,
            destroyed: false,
        })
    }

    // ── Snapshots ────────────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player_state(&self) -> PlayerState {
        *self.player.state()
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.spawner.bullets()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn stage_elapsed(&self) -> f64 {
        self.stage_elapsed
    }

    pub fn stages(&self) -> &[StageConfig] {
        &self.stages
    }

    pub fn current_stage(&self) -> &StageConfig {
        &self.stages[self.state.current_stage]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── Subscriptions ────────────────────────────────────────────────────────

    pub fn on_state_change(&mut self, f: impl FnMut(&GameState) + 'static) -> Subscription {
        self.listeners.on_game_state(f)
    }

    pub fn on_player_change(&mut self, f: impl FnMut(&PlayerState) + 'static) -> Subscription {
        self.listeners.on_player(f)
    }

    pub fn on_stage_progress(&mut self, f: impl FnMut(&f64) + 'static) -> Subscription {
        self.listeners.on_progress(f)
    }

    pub fn unsubscribe(&mut self, sub: Subscription) -> bool {
        self.listeners.unsubscribe(sub)
    }

    // ── Commands ─────────────────────────────────────────────────────────────

    pub fn set_direction(&mut self, direction: Direction, pressed: bool) {
        if self.destroyed {
            return;
        }
        self.player.set_direction(direction, pressed);
    }

    /// Begin a fresh run from stage 0. Ignored while already playing.
    pub fn start_game(&mut self) {
        if self.destroyed || self.state.status == GameStatus::Playing {
            return;
        }

        self.stop_game_loop();

        self.state.status = GameStatus::Playing;
        self.state.current_stage = 0;
        self.state.score = 0;
        self.score_accumulator = 0.0;

        let now = self.clock.now();
        self.last_time = now;
        self.stage_start_time = now;

        self.player.reset();
        self.spawner.reset(now);
        self.setup_stage();
        self.player.grant_invincibility(INVINCIBLE_DURATION);

        log::info!("game started");
        self.notify_state_change();
        self.running = true;
        self.frame();
    }

    /// Advance past a cleared stage, or finish the run after the last one.
    /// Ignored unless the status is `StageComplete`.
    pub fn next_stage(&mut self) {
        if self.destroyed || self.state.status != GameStatus::StageComplete {
            return;
        }

        self.stop_game_loop();

        if self.state.current_stage + 1 < self.stages.len() {
            self.state.current_stage += 1;
            self.state.status = GameStatus::Playing;

            let now = self.clock.now();
            self.last_time = now;
            self.stage_start_time = now;

            self.spawner.reset(now);
            self.setup_stage();
            self.player.grant_invincibility(INVINCIBLE_DURATION);

            log::info!("stage {} started", self.state.current_stage);
            self.notify_state_change();
            self.running = true;
            self.frame();
        } else {
            self.state.status = GameStatus::Victory;
            self.save_high_score();
            log::info!("all stages cleared, final score {}", self.state.score);
            self.notify_state_change();
        }
    }

    /// Freeze the run. Timers are kept as they are.
    pub fn pause(&mut self) {
        if self.destroyed || self.state.status != GameStatus::Playing {
            return;
        }
        self.stop_game_loop();
        self.state.status = GameStatus::Paused;
        log::info!("paused at {:.0} ms into stage {}", self.stage_elapsed, self.state.current_stage);
        self.notify_state_change();
    }

    /// Continue a paused run. Stage timing is re-anchored so the time spent
    /// paused does not count, and the frame delta restarts from now.
    pub fn resume(&mut self) {
        if self.destroyed || self.state.status != GameStatus::Paused {
            return;
        }
        self.state.status = GameStatus::Playing;

        let now = self.clock.now();
        self.last_time = now;
        self.stage_start_time = now - self.stage_elapsed;

        log::info!("resumed");
        self.notify_state_change();
        self.running = true;
        self.frame();
    }

    /// Stop the loop and drop every listener. Idempotent; nothing fires
    /// after it returns and every later command is ignored.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.stop_game_loop();
        self.listeners.clear();
        self.player.release_inputs();
        self.destroyed = true;
        log::info!("engine torn down");
    }

    // ── Frame loop ───────────────────────────────────────────────────────────

    /// Run one scheduled frame. Stale calls after a stop are ignored.
    pub fn frame(&mut self) {
        if !self.running || self.state.status != GameStatus::Playing {
            self.running = false;
            return;
        }

        let now = self.clock.now();
        let delta = now - self.last_time;
        self.last_time = now;

        self.update(delta, now);

        if self.running && self.state.status == GameStatus::Playing {
            self.scheduler.schedule_next_frame();
        }
    }

    fn update(&mut self, delta: f64, now: f64) {
        if self.state.status != GameStatus::Playing {
            return;
        }

        self.player.update(delta);
        self.listeners.emit_player(self.player.state());

        self.spawner.update(now, self.player.center_x());

        // Collisions come before the stage-clear check: a fatal hit on the
        // last frame of a stage is still a game over.
        if collision::resolve(&mut self.player, &mut self.spawner) == Collision::Fatal {
            self.game_over();
            return;
        }

        let duration = self.stages[self.state.current_stage].duration;
        self.stage_elapsed = now - self.stage_start_time;
        self.progress = (self.stage_elapsed / duration).min(1.0);
        self.listeners.emit_progress(self.progress);

        if self.stage_elapsed >= duration {
            self.stage_complete();
            return;
        }

        // x1 at stage start up to x3 at stage end, plus 30% per stage index.
        let progress_multiplier = 1.0 + self.progress * 2.0;
        let stage_multiplier = 1.0 + self.state.current_stage as f64 * 0.3;

        self.score_accumulator += delta;
        if self.score_accumulator >= SCORE_INTERVAL_MS {
            let points = (self.score_accumulator / SCORE_INTERVAL_MS).floor();
            let gained = (points * progress_multiplier * stage_multiplier).floor() as u32;
            self.state.score = self.state.score.saturating_add(gained);
            self.score_accumulator %= SCORE_INTERVAL_MS;
        }

        self.notify_state_change();
    }

    fn setup_stage(&mut self) {
        let stage = &self.stages[self.state.current_stage];
        if let Err(err) = self.spawner.set_bullet_config(
            stage.bullet_speed,
            stage.bullet_frequency,
            &stage.bullet_patterns,
        ) {
            log::warn!("stage {}: {}", self.state.current_stage, err);
        }
        log::debug!(
            "stage {} (day {}): speed {}, every {} ms, patterns {:?}",
            self.state.current_stage,
            stage.day,
            stage.bullet_speed,
            stage.bullet_frequency,
            stage.bullet_patterns,
        );
        self.stage_elapsed = 0.0;
        self.progress = 0.0;
    }

    fn stage_complete(&mut self) {
        self.stop_game_loop();
        self.state.status = GameStatus::StageComplete;
        let bonus = STAGE_CLEAR_BONUS * (self.state.current_stage as u32 + 1);
        self.state.score = self.state.score.saturating_add(bonus);
        self.save_high_score();
        log::info!("stage {} complete, score {}", self.state.current_stage, self.state.score);
        self.notify_state_change();
    }

    fn game_over(&mut self) {
        self.stop_game_loop();
        self.state.status = GameStatus::GameOver;
        self.save_high_score();
        log::info!("game over on stage {}, score {}", self.state.current_stage, self.state.score);
        self.notify_state_change();
    }

    fn save_high_score(&mut self) {
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
            self.high_scores.set(self.state.high_score);
            log::debug!("new high score {}", self.state.high_score);
        }
    }

    fn stop_game_loop(&mut self) {
        self.running = false;
        self.scheduler.cancel_scheduled();
    }

    fn notify_state_change(&mut self) {
        let state = self.state;
        self.listeners.emit_game_state(&state);
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.destroy();
    }
}
