use rand::rngs::StdRng;
use rand::SeedableRng;

use bullet_dodge::clock::ManualClock;
use bullet_dodge::display::{render, Screen};
use bullet_dodge::engine::{Collaborators, Engine};
use bullet_dodge::entities::Vec2;
use bullet_dodge::scheduler::PendingFrame;
use bullet_dodge::scores::MemoryHighScoreStore;
use bullet_dodge::stages::default_stages;

fn engine(high_score: u32) -> Engine {
    Engine::new(
        default_stages(),
        Collaborators {
            clock: Box::new(ManualClock::new(0.0)),
            scheduler: Box::new(PendingFrame::new()),
            high_scores: Box::new(MemoryHighScoreStore::new(high_score)),
            rng: Box::new(StdRng::seed_from_u64(3)),
        },
    )
    .unwrap()
}

#[test]
fn to_cell_scales_into_play_field() {
    // 40 columns x 60 rows inside the border
    let screen = Screen { width: 42, height: 64 };
    assert_eq!(screen.to_cell(Vec2::new(0.0, 0.0)), Some((1, 2)));
    assert_eq!(screen.to_cell(Vec2::new(200.0, 300.0)), Some((21, 32)));
    assert_eq!(screen.to_cell(Vec2::new(399.9, 599.9)), Some((40, 61)));
}

#[test]
fn to_cell_drops_off_field_positions() {
    let screen = Screen { width: 42, height: 64 };
    assert_eq!(screen.to_cell(Vec2::new(-1.0, 10.0)), None);
    assert_eq!(screen.to_cell(Vec2::new(10.0, -10.0)), None);
    assert_eq!(screen.to_cell(Vec2::new(400.0, 10.0)), None);
    assert_eq!(screen.to_cell(Vec2::new(10.0, 600.0)), None);
}

#[test]
fn to_cell_on_tiny_terminal() {
    let screen = Screen { width: 2, height: 4 };
    assert_eq!(screen.to_cell(Vec2::new(10.0, 10.0)), None);
}

#[test]
fn menu_frame_shows_title_and_best_score() {
    let engine = engine(777);
    let mut out = Vec::new();
    render(&mut out, &engine, Screen { width: 60, height: 40 }).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("TILL NEW YEAR"));
    assert!(text.contains("Best Score: 777"));
}

#[test]
fn playing_frame_shows_hud() {
    let mut engine = engine(0);
    engine.start_game();
    let mut out = Vec::new();
    render(&mut out, &engine, Screen { width: 60, height: 40 }).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Dec 26"));
    assert!(text.contains("Lives:♥♥♥"));
}
