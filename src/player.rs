/// The player ship: horizontal movement, lives, and the invincibility window.

use crate::entities::{
    Direction, Entity, PlayerState, Size, Vec2, CANVAS_HEIGHT, CANVAS_WIDTH, INVINCIBLE_DURATION,
    PLAYER_BOTTOM_OFFSET, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH, START_LIVES,
};

/// Directions currently held down by the input source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct HeldInputs {
    left: bool,
    right: bool,
}

#[derive(Clone, Debug)]
pub struct Player {
    state: PlayerState,
    held: HeldInputs,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            state: initial_state(),
            held: HeldInputs::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn center_x(&self) -> f32 {
        self.state.entity.center_x()
    }

    pub fn is_invincible(&self) -> bool {
        self.state.is_invincible
    }

    /// Record a press or release. Read at the start of the next `update`.
    pub fn set_direction(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.held.left = pressed,
            Direction::Right => self.held.right = pressed,
        }
    }

    pub fn release_inputs(&mut self) {
        self.held = HeldInputs::default();
    }

    /// Move by the held direction and tick the invincibility timer.
    ///
    /// With both directions held, right wins.
    pub fn update(&mut self, delta_ms: f64) {
        let move_x = if self.held.right {
            PLAYER_SPEED
        } else if self.held.left {
            -PLAYER_SPEED
        } else {
            0.0
        };

        let entity = &mut self.state.entity;
        let max_x = CANVAS_WIDTH - entity.size.width;
        entity.position.x = (entity.position.x + move_x).clamp(0.0, max_x);

        if self.state.is_invincible {
            self.state.invincible_timer -= delta_ms;
            if self.state.invincible_timer <= 0.0 {
                self.state.is_invincible = false;
                self.state.invincible_timer = 0.0;
            }
        }
    }

    /// Take a hit. Returns `true` when this hit was fatal.
    ///
    /// Ignored entirely while invincible. A surviving hit grants a fresh
    /// invincibility window.
    pub fn hit(&mut self) -> bool {
        if self.state.is_invincible {
            return false;
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        if self.state.lives > 0 {
            self.grant_invincibility(INVINCIBLE_DURATION);
        }
        self.state.lives == 0
    }

    pub fn grant_invincibility(&mut self, duration_ms: f64) {
        self.state.is_invincible = true;
        self.state.invincible_timer = duration_ms;
    }

    pub fn reset(&mut self) {
        self.state = initial_state();
        self.held = HeldInputs::default();
    }
}

fn initial_state() -> PlayerState {
    PlayerState {
        entity: Entity {
            position: Vec2::new(
                CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                CANVAS_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_OFFSET,
            ),
            size: Size {
                width: PLAYER_WIDTH,
                height: PLAYER_HEIGHT,
            },
            velocity: Vec2::default(),
            is_active: true,
        },
        lives: START_LIVES,
        is_invincible: false,
        invincible_timer: 0.0,
    }
}
