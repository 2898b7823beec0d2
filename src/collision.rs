/// AABB collision between the player and the live bullets.

use crate::bullet::{Bullet, BulletSpawner};
use crate::entities::Entity;
use crate::player::Player;

/// Player hitbox inset on the left, top, and right edges.
pub const PLAYER_HITBOX_PADDING: f32 = 12.0;
pub const PLAYER_HITBOX_BOTTOM_PADDING: f32 = 8.0;
pub const BULLET_HITBOX_PADDING: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

pub fn player_hitbox(entity: &Entity) -> Bounds {
    Bounds {
        left: entity.position.x + PLAYER_HITBOX_PADDING,
        right: entity.right() - PLAYER_HITBOX_PADDING,
        top: entity.position.y + PLAYER_HITBOX_PADDING,
        bottom: entity.bottom() - PLAYER_HITBOX_BOTTOM_PADDING,
    }
}

pub fn bullet_hitbox(entity: &Entity) -> Bounds {
    Bounds {
        left: entity.position.x + BULLET_HITBOX_PADDING,
        right: entity.right() - BULLET_HITBOX_PADDING,
        top: entity.position.y + BULLET_HITBOX_PADDING,
        bottom: entity.bottom() - BULLET_HITBOX_PADDING,
    }
}

/// Index of the first active bullet overlapping the player, in bullet order.
/// Always `None` while the player is invincible.
pub fn first_hit(player: &Player, bullets: &[Bullet]) -> Option<usize> {
    if player.is_invincible() {
        return None;
    }
    let hitbox = player_hitbox(&player.state().entity);
    bullets
        .iter()
        .position(|b| b.is_active() && hitbox.overlaps(&bullet_hitbox(&b.entity)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    None,
    /// A bullet struck and the player survived.
    Hit,
    /// A bullet struck and took the last life.
    Fatal,
}

/// Apply at most one hit: the struck bullet is consumed and the player takes it.
pub fn resolve(player: &mut Player, spawner: &mut BulletSpawner) -> Collision {
    let Some(index) = first_hit(player, spawner.bullets()) else {
        return Collision::None;
    };

    spawner.deactivate(index);
    if player.hit() {
        Collision::Fatal
    } else {
        Collision::Hit
    }
}
