use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bullet_dodge::bullet::*;
use bullet_dodge::entities::*;
use bullet_dodge::error::SpawnError;

fn spawner() -> BulletSpawner {
    BulletSpawner::new(Box::new(StdRng::seed_from_u64(42)))
}

fn configured(speed: f32, interval: f64, patterns: &[BulletPattern]) -> BulletSpawner {
    let mut s = spawner();
    s.set_bullet_config(speed, interval, patterns).unwrap();
    s.reset(0.0);
    s
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_takes_color_from_kind() {
    let b = Bullet::new(0.0, 0.0, 0.0, 1.0, BulletKind::Wave);
    assert_eq!(b.color(), BulletKind::Wave.color());
    assert!(b.is_active());
    assert_eq!(b.entity.size.width, BULLET_SIZE);
}

#[test]
fn bullet_moves_by_velocity_per_update() {
    let mut b = Bullet::new(100.0, 50.0, -1.5, 4.0, BulletKind::Normal);
    b.update();
    b.update();
    assert_eq!(b.entity.position, Vec2::new(97.0, 58.0));
}

#[test]
fn bullet_retired_only_past_bottom_margin() {
    let mut b = Bullet::new(100.0, 615.0, 0.0, 5.0, BulletKind::Normal);
    b.update(); // y = 620, exactly on the margin
    assert!(b.is_active());
    b.update(); // y = 625
    assert!(!b.is_active());
}

#[test]
fn bullet_retired_past_side_margins() {
    let mut left = Bullet::new(-19.0, 100.0, -1.0, 0.0, BulletKind::Fast);
    left.update();
    assert!(left.is_active()); // x = -20
    left.update();
    assert!(!left.is_active());

    let mut right = Bullet::new(CANVAS_WIDTH + 19.0, 100.0, 1.0, 0.0, BulletKind::Fast);
    right.update();
    assert!(right.is_active());
    right.update();
    assert!(!right.is_active());
}

#[test]
fn bullet_retired_past_top_margin() {
    let mut b = Bullet::new(100.0, -15.0, 0.0, -5.0, BulletKind::Normal);
    b.update(); // y = -20
    assert!(b.is_active());
    b.update();
    assert!(!b.is_active());
}

#[test]
fn freshly_spawned_bullet_above_canvas_stays_active() {
    let mut b = Bullet::new(100.0, -BULLET_SIZE, 0.0, 3.0, BulletKind::Normal);
    b.update();
    assert!(b.is_active());
}

// ── Spawner timing ────────────────────────────────────────────────────────────

#[test]
fn no_spawn_before_interval() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Random]);
    s.update(599.0, 200.0);
    assert!(s.bullets().is_empty());
}

#[test]
fn spawns_burst_at_interval_and_advances_it() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Random]);
    s.update(600.0, 200.0);
    assert_eq!(s.bullets().len(), BULLETS_PER_SPAWN);
    assert_eq!(s.last_spawn_time(), 600.0);
    for b in s.bullets() {
        // spawned at -size, then advanced once in the same call
        assert_eq!(b.entity.position.y, -BULLET_SIZE + 3.0);
        assert!(b.entity.position.x >= 0.0 && b.entity.position.x < CANVAS_WIDTH - BULLET_SIZE);
        assert_eq!(b.kind, BulletKind::Normal);
    }

    s.update(1199.0, 200.0);
    assert_eq!(s.bullets().len(), BULLETS_PER_SPAWN);
    s.update(1200.0, 200.0);
    assert_eq!(s.bullets().len(), 2 * BULLETS_PER_SPAWN);
}

#[test]
fn update_prunes_bullets_that_leave() {
    let mut s = configured(50.0, 100.0, &[BulletPattern::Random]);
    s.update(100.0, 200.0);
    assert_eq!(s.bullets().len(), 2);
    // 50 px per update: gone after crossing y = 620
    for _ in 0..13 {
        s.update(100.0, 200.0);
    }
    assert!(s.bullets().is_empty());
}

#[test]
fn deactivated_bullet_is_pruned_on_next_update() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Wave]);
    s.spawn_pattern(BulletPattern::Wave, 200.0);
    s.deactivate(0);
    assert_eq!(s.bullets().len(), 4);
    s.update(1.0, 200.0);
    assert_eq!(s.bullets().len(), 3);
}

#[test]
fn reset_clears_bullets_and_reanchors() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Spiral]);
    s.update(600.0, 200.0);
    assert!(!s.bullets().is_empty());
    assert!(s.spiral_angle() > 0.0);

    s.reset(5000.0);
    assert!(s.bullets().is_empty());
    assert_eq!(s.spiral_angle(), 0.0);
    s.update(5599.0, 200.0);
    assert!(s.bullets().is_empty());
    s.update(5600.0, 200.0);
    assert!(!s.bullets().is_empty());
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn empty_pattern_set_rejected_and_previous_config_kept() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Wave]);
    assert_eq!(s.set_bullet_config(9.0, 10.0, &[]), Err(SpawnError::EmptyPatternSet));

    s.update(599.0, 200.0);
    assert!(s.bullets().is_empty());
    s.update(600.0, 200.0);
    assert_eq!(s.bullets().len(), 2 * 4);
    assert!(s.bullets().iter().all(|b| b.entity.velocity.y == 3.0));
}

#[test]
fn reconfigure_leaves_bullets_in_flight_alone() {
    let mut s = configured(3.0, 600.0, &[BulletPattern::Random]);
    s.update(600.0, 200.0);
    s.set_bullet_config(8.0, 600.0, &[BulletPattern::Random]).unwrap();
    assert!(s.bullets().iter().all(|b| b.entity.velocity.y == 3.0));
}

// ── Patterns ──────────────────────────────────────────────────────────────────

#[test]
fn wave_spawns_four_evenly_spaced() {
    let mut s = configured(3.5, 600.0, &[BulletPattern::Wave]);
    s.spawn_pattern(BulletPattern::Wave, 200.0);
    let xs: Vec<f32> = s.bullets().iter().map(|b| b.entity.position.x).collect();
    assert_eq!(xs, vec![80.0, 160.0, 240.0, 320.0]);
    for b in s.bullets() {
        assert_eq!(b.entity.velocity, Vec2::new(0.0, 3.5));
        assert_eq!(b.entity.position.y, -BULLET_SIZE);
        assert_eq!(b.kind, BulletKind::Wave);
    }
}

#[test]
fn burst_fans_eight_from_center() {
    let speed = 4.0;
    let mut s = configured(speed, 600.0, &[BulletPattern::Burst]);
    s.spawn_pattern(BulletPattern::Burst, 0.0);
    let bullets = s.bullets();
    assert_eq!(bullets.len(), 8);

    for (i, b) in bullets.iter().enumerate() {
        let angle = std::f32::consts::PI / 8.0 * i as f32 + std::f32::consts::PI / 2.0;
        assert_eq!(b.entity.position.x, CANVAS_WIDTH / 2.0);
        assert_relative_eq!(b.entity.velocity.x, angle.cos() * speed * 0.5, epsilon = 1e-5);
        assert_relative_eq!(b.entity.velocity.y, angle.sin() * speed, epsilon = 1e-5);
        assert!(b.entity.velocity.x <= 1e-5);
    }
    // first bullet falls straight down at full speed
    assert_relative_eq!(bullets[0].entity.velocity.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(bullets[0].entity.velocity.y, speed, epsilon = 1e-5);
}

#[test]
fn aimed_heads_for_player_at_stage_speed() {
    let speed = 3.3;
    let mut s = configured(speed, 600.0, &[BulletPattern::Aimed]);
    for target in [0.0_f32, 120.0, 200.0, 390.0] {
        s.reset(0.0);
        s.spawn_pattern(BulletPattern::Aimed, target);
        let b = &s.bullets()[0];
        let v = b.entity.velocity;
        assert_eq!(b.kind, BulletKind::Fast);
        assert_relative_eq!((v.x * v.x + v.y * v.y).sqrt(), speed, epsilon = 1e-4);
        assert!(v.y > 0.0);

        let dx = target - b.entity.position.x;
        assert_relative_eq!(v.x / v.y, dx / CANVAS_HEIGHT, epsilon = 1e-4);
    }
}

#[test]
fn spiral_weaves_around_center() {
    let speed = 4.0;
    let mut s = configured(speed, 600.0, &[BulletPattern::Spiral]);
    for n in 1..=3 {
        s.spawn_pattern(BulletPattern::Spiral, 0.0);
        let angle = 0.3 * n as f32;
        assert_relative_eq!(s.spiral_angle(), angle, epsilon = 1e-5);

        let b = s.bullets().last().unwrap();
        assert_relative_eq!(b.entity.position.x, 200.0 + angle.cos() * 100.0, epsilon = 1e-3);
        assert_relative_eq!(b.entity.velocity.x, angle.sin() * speed * 0.3, epsilon = 1e-5);
        assert_eq!(b.entity.velocity.y, speed);
        assert_eq!(b.kind, BulletKind::Wave);
    }
}

#[test]
fn random_pattern_falls_straight() {
    let mut s = configured(2.0, 600.0, &[BulletPattern::Random]);
    for _ in 0..50 {
        s.spawn_pattern(BulletPattern::Random, 0.0);
    }
    for b in s.bullets() {
        assert_eq!(b.entity.velocity, Vec2::new(0.0, 2.0));
        assert!(b.entity.position.x >= 0.0 && b.entity.position.x < CANVAS_WIDTH - BULLET_SIZE);
    }
}

#[test]
fn pattern_choice_only_from_allowed_set() {
    let mut s = configured(3.0, 10.0, &[BulletPattern::Wave]);
    let mut t = 0.0;
    for _ in 0..20 {
        t += 10.0;
        s.update(t, 200.0);
    }
    assert!(s.bullets().iter().all(|b| b.kind == BulletKind::Wave));
}
