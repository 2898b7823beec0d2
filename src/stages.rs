/// The fixed, ordered stage table and its validation.

use serde::{Deserialize, Serialize};

use crate::entities::BulletPattern;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Calendar day shown on the HUD (the run counts down to the new year).
    pub day: u32,
    pub name: String,
    /// Pixels per update for freshly spawned bullets.
    pub bullet_speed: f32,
    /// Milliseconds between spawn bursts.
    pub bullet_frequency: f64,
    pub bullet_patterns: Vec<BulletPattern>,
    /// Milliseconds the stage must be survived.
    pub duration: f64,
    #[serde(default)]
    pub has_boss: bool,
}

fn stage(
    day: u32,
    name: &str,
    bullet_speed: f32,
    bullet_frequency: f64,
    bullet_patterns: &[BulletPattern],
    duration: f64,
    has_boss: bool,
) -> StageConfig {
    StageConfig {
        day,
        name: name.to_string(),
        bullet_speed,
        bullet_frequency,
        bullet_patterns: bullet_patterns.to_vec(),
        duration,
        has_boss,
    }
}

/// Built-in six-stage run, December 26 through 31.
pub fn default_stages() -> Vec<StageConfig> {
    use BulletPattern::*;

    vec![
        stage(26, "December 26 is slipping away", 3.3, 600.0, &[Random, Aimed], 30_000.0, false),
        stage(27, "December 27 is slipping away", 3.6, 550.0, &[Random, Aimed], 33_000.0, false),
        stage(28, "December 28 is slipping away", 3.5, 600.0, &[Random, Aimed, Wave], 35_000.0, false),
        stage(29, "December 29 is slipping away", 3.6, 600.0, &[Random, Aimed, Wave], 38_000.0, false),
        stage(30, "December 30 is slipping away", 3.5, 650.0, &[Random, Aimed, Wave, Burst], 42_000.0, false),
        stage(
            31,
            "December 31... the new year is almost here!",
            4.0,
            550.0,
            &[Random, Aimed, Wave, Burst, Spiral],
            45_000.0,
            true,
        ),
    ]
}

/// Reject tables the engine cannot run: no stages, a stage with no
/// patterns, or a non-positive speed, interval, or duration.
pub fn validate_stages(stages: &[StageConfig]) -> Result<(), ConfigError> {
    if stages.is_empty() {
        return Err(ConfigError::NoStages);
    }
    for (index, stage) in stages.iter().enumerate() {
        if stage.bullet_patterns.is_empty() {
            return Err(ConfigError::EmptyPatterns { index });
        }
        // Written as `!(x > 0)` so NaN is rejected too.
        if !(stage.bullet_speed > 0.0) {
            return Err(ConfigError::NonPositive { index, field: "bullet_speed" });
        }
        if !(stage.bullet_frequency > 0.0) {
            return Err(ConfigError::NonPositive { index, field: "bullet_frequency" });
        }
        if !(stage.duration > 0.0) {
            return Err(ConfigError::NonPositive { index, field: "duration" });
        }
    }
    Ok(())
}
