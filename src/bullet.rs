//! Bullets and the spawner that schedules them.

use std::f32::consts::PI;

use rand::{Rng, RngCore};

use crate::entities::{
    BulletKind, BulletPattern, Entity, Rgb, Size, Vec2, BULLET_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH,
};
use crate::error::SpawnError;

/// How far past any canvas edge a bullet may travel before it is retired.
pub const OFFSCREEN_MARGIN: f32 = 20.0;

pub const BULLETS_PER_SPAWN: usize = 2;

const WAVE_BULLETS: usize = 4;
const BURST_BULLETS: usize = 8;
const SPIRAL_STEP: f32 = 0.3;
const SPIRAL_RADIUS: f32 = 100.0;

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
    pub kind: BulletKind,
    color: Rgb,
}

impl Bullet {
    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, kind: BulletKind) -> Self {
        Self {
            entity: Entity {
                position: Vec2::new(x, y),
                size: Size {
                    width: BULLET_SIZE,
                    height: BULLET_SIZE,
                },
                velocity: Vec2::new(velocity_x, velocity_y),
                is_active: true,
            },
            kind,
            color: kind.color(),
        }
    }

    /// Fixed at construction from the bullet kind.
    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_active(&self) -> bool {
        self.entity.is_active
    }

    /// Integrate one step and retire the bullet once it leaves the canvas
    /// by more than `OFFSCREEN_MARGIN` on any side.
    pub fn update(&mut self) {
        let e = &mut self.entity;
        e.position.x += e.velocity.x;
        e.position.y += e.velocity.y;

        if e.position.y > CANVAS_HEIGHT + OFFSCREEN_MARGIN
            || e.position.y < -OFFSCREEN_MARGIN
            || e.position.x < -OFFSCREEN_MARGIN
            || e.position.x > CANVAS_WIDTH + OFFSCREEN_MARGIN
        {
            e.is_active = false;
        }
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Owns every live bullet. All randomness (pattern choice, random x) comes
/// through the injected RNG so callers control determinism.
pub struct BulletSpawner {
    bullets: Vec<Bullet>,
    last_spawn_time: f64,
    spawn_interval: f64,
    bullet_speed: f32,
    patterns: Vec<BulletPattern>,
    spiral_angle: f32,
    rng: Box<dyn RngCore>,
}

impl BulletSpawner {
    pub fn new(rng: Box<dyn RngCore>) -> Self {
        Self {
            bullets: Vec::new(),
            last_spawn_time: 0.0,
            spawn_interval: 800.0,
            bullet_speed: 3.0,
            patterns: vec![BulletPattern::Random],
            spiral_angle: 0.0,
            rng,
        }
    }

    /// Takes effect on the next spawn decision; bullets in flight keep
    /// their velocities. An empty pattern set is rejected and the previous
    /// configuration is kept.
    pub fn set_bullet_config(
        &mut self,
        speed: f32,
        interval_ms: f64,
        patterns: &[BulletPattern],
    ) -> Result<(), SpawnError> {
        if patterns.is_empty() {
            return Err(SpawnError::EmptyPatternSet);
        }
        self.bullet_speed = speed;
        self.spawn_interval = interval_ms;
        self.patterns = patterns.to_vec();
        Ok(())
    }

    /// Spawn a burst when the interval has elapsed, then advance every
    /// bullet and drop the inactive ones.
    pub fn update(&mut self, current_time: f64, player_center_x: f32) {
        if current_time - self.last_spawn_time >= self.spawn_interval {
            self.spawn_burst(player_center_x);
            self.last_spawn_time = current_time;
        }

        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(Bullet::is_active);
    }

    /// Clear all bullets. The next burst comes one full interval after
    /// `current_time`.
    pub fn reset(&mut self, current_time: f64) {
        self.bullets.clear();
        self.last_spawn_time = current_time;
        self.spiral_angle = 0.0;
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Retire the bullet at `index` (consumed by a hit). Pruned on the next update.
    pub fn deactivate(&mut self, index: usize) {
        if let Some(bullet) = self.bullets.get_mut(index) {
            bullet.entity.is_active = false;
        }
    }

    pub fn last_spawn_time(&self) -> f64 {
        self.last_spawn_time
    }

    pub fn spiral_angle(&self) -> f32 {
        self.spiral_angle
    }

    fn spawn_burst(&mut self, player_center_x: f32) {
        for _ in 0..BULLETS_PER_SPAWN {
            let pattern = self.patterns[self.rng.gen_range(0..self.patterns.len())];
            log::trace!("spawning {:?} pattern", pattern);
            self.spawn_pattern(pattern, player_center_x);
        }
    }

    /// Emit the bullets for one pattern at the current speed.
    pub fn spawn_pattern(&mut self, pattern: BulletPattern, player_center_x: f32) {
        let speed = self.bullet_speed;
        let top = -BULLET_SIZE;

        match pattern {
            BulletPattern::Random => {
                let x = self.random_x();
                self.bullets.push(Bullet::new(x, top, 0.0, speed, BulletKind::Normal));
            }
            BulletPattern::Aimed => {
                let x = self.random_x();
                let dx = player_center_x - x;
                let dy = CANVAS_HEIGHT;
                let distance = (dx * dx + dy * dy).sqrt();
                let vx = dx / distance * speed;
                let vy = dy / distance * speed;
                self.bullets.push(Bullet::new(x, top, vx, vy, BulletKind::Fast));
            }
            BulletPattern::Wave => {
                let segment = CANVAS_WIDTH / (WAVE_BULLETS + 1) as f32;
                for i in 0..WAVE_BULLETS {
                    let x = segment * (i + 1) as f32;
                    self.bullets.push(Bullet::new(x, top, 0.0, speed, BulletKind::Wave));
                }
            }
            BulletPattern::Burst => {
                let center_x = CANVAS_WIDTH / 2.0;
                for i in 0..BURST_BULLETS {
                    let angle = PI / BURST_BULLETS as f32 * i as f32 + PI / 2.0;
                    let vx = angle.cos() * speed * 0.5;
                    let vy = angle.sin() * speed;
                    self.bullets.push(Bullet::new(center_x, top, vx, vy, BulletKind::Normal));
                }
            }
            BulletPattern::Spiral => {
                self.spiral_angle += SPIRAL_STEP;
                let x = CANVAS_WIDTH / 2.0 + self.spiral_angle.cos() * SPIRAL_RADIUS;
                let vx = self.spiral_angle.sin() * speed * 0.3;
                self.bullets.push(Bullet::new(x, top, vx, speed, BulletKind::Wave));
            }
        }
    }

    fn random_x(&mut self) -> f32 {
        self.rng.gen_range(0.0..CANVAS_WIDTH - BULLET_SIZE)
    }
}
