//! Stage-based bullet-dodge survival engine.
//!
//! The library holds the whole simulation: player, bullet patterns,
//! collision, and the status state machine in [`engine::Engine`]. Clocks,
//! frame scheduling, high-score storage, and randomness are injected so the
//! same engine runs under the terminal host and under a virtual clock in tests.

pub mod bullet;
pub mod clock;
pub mod collision;
pub mod config;
pub mod display;
pub mod engine;
pub mod entities;
pub mod error;
pub mod listeners;
pub mod player;
pub mod scheduler;
pub mod scores;
pub mod stages;
