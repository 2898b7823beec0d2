use bullet_dodge::config::GameConfig;
use bullet_dodge::entities::BulletPattern;
use bullet_dodge::error::ConfigError;

#[test]
fn empty_file_gives_defaults() {
    let config = GameConfig::from_toml("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.frame_ms, 16);
    assert_eq!(config.stage_table().len(), 6);
    assert!(config.high_score_path().ends_with(".bullet_dodge_score"));
}

#[test]
fn parses_paths_and_stage_override() {
    let config = GameConfig::from_toml(
        r#"
        frame_ms = 33
        high_score_path = "/tmp/dodge.score"
        log_file = "/tmp/dodge.log"

        [[stages]]
        day = 1
        name = "Warm-up"
        bullet_speed = 2.5
        bullet_frequency = 700
        bullet_patterns = ["random", "wave"]
        duration = 20000

        [[stages]]
        day = 2
        name = "Finale"
        bullet_speed = 4.0
        bullet_frequency = 500.0
        bullet_patterns = ["burst", "spiral", "aimed"]
        duration = 25000.0
        has_boss = true
        "#,
    )
    .unwrap();

    assert_eq!(config.frame_ms, 33);
    assert_eq!(config.high_score_path().to_str(), Some("/tmp/dodge.score"));
    assert_eq!(config.log_file.as_deref().and_then(|p| p.to_str()), Some("/tmp/dodge.log"));

    let stages = config.stage_table();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].bullet_patterns, vec![BulletPattern::Random, BulletPattern::Wave]);
    assert_eq!(stages[0].bullet_frequency, 700.0);
    assert!(!stages[0].has_boss);
    assert_eq!(
        stages[1].bullet_patterns,
        vec![BulletPattern::Burst, BulletPattern::Spiral, BulletPattern::Aimed]
    );
    assert!(stages[1].has_boss);
}

#[test]
fn unknown_pattern_is_a_parse_error() {
    let err = GameConfig::from_toml(
        r#"
        [[stages]]
        day = 1
        name = "bad"
        bullet_speed = 3.0
        bullet_frequency = 600
        bullet_patterns = ["laser"]
        duration = 1000
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn empty_pattern_list_is_rejected() {
    let err = GameConfig::from_toml(
        r#"
        [[stages]]
        day = 1
        name = "empty"
        bullet_speed = 3.0
        bullet_frequency = 600
        bullet_patterns = []
        duration = 1000
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPatterns { index: 0 }));
}

#[test]
fn empty_stage_list_is_rejected() {
    let err = GameConfig::from_toml("stages = []").unwrap_err();
    assert!(matches!(err, ConfigError::NoStages));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load_from_file("/nonexistent/bullet_dodge.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
