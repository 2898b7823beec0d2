/// All engine entity types — pure data, no logic beyond simple geometry.

use serde::{Deserialize, Serialize};

// ── Logical resolution & sizing ──────────────────────────────────────────────

/// Width of the logical play field. All position math assumes this space.
pub const CANVAS_WIDTH: f32 = 400.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const PLAYER_WIDTH: f32 = 43.0;
pub const PLAYER_HEIGHT: f32 = 55.0;
/// Horizontal distance covered per `Player::update` call while a direction is held.
pub const PLAYER_SPEED: f32 = 6.0;
/// Gap between the bottom of the player sprite and the bottom edge.
pub const PLAYER_BOTTOM_OFFSET: f32 = 20.0;
pub const START_LIVES: u32 = 3;

pub const BULLET_SIZE: f32 = 10.0;

/// Invincibility granted after a non-fatal hit and at every stage start (ms).
pub const INVINCIBLE_DURATION: f64 = 2000.0;

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Shape shared by the player and every bullet.
///
/// Velocity is applied once per update call, not scaled by elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entity {
    pub position: Vec2,
    pub size: Size,
    pub velocity: Vec2,
    /// `false` marks the entity for removal.
    pub is_active: bool,
}

impl Entity {
    pub fn center_x(&self) -> f32 {
        self.position.x + self.size.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Snapshot of the player published every frame while playing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub entity: Entity,
    pub lives: u32,
    pub is_invincible: bool,
    /// Remaining invincibility in milliseconds, never negative.
    pub invincible_timer: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Classification of a bullet. Only decides colour; physics come from the
/// velocity chosen at spawn time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BulletKind {
    #[default]
    Normal,
    Fast,
    Wave,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl BulletKind {
    pub fn color(self) -> Rgb {
        match self {
            BulletKind::Normal => Rgb(0xff, 0x44, 0x44),
            BulletKind::Fast => Rgb(0xff, 0x88, 0x00),
            BulletKind::Wave => Rgb(0xaa, 0x44, 0xff),
            BulletKind::Boss => Rgb(0xff, 0x00, 0x66),
        }
    }
}

/// Procedural spawn pattern, picked uniformly per burst among a stage's set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletPattern {
    Random,
    Aimed,
    Wave,
    Burst,
    Spiral,
}

// ── Game state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    StageComplete,
    Victory,
}

/// Orchestrator-owned run state. Copies of it are what listeners receive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub status: GameStatus,
    /// Index into the stage table.
    pub current_stage: usize,
    pub score: u32,
    pub high_score: u32,
}
