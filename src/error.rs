use thiserror::Error;

/// Errors raised while loading the configuration file or validating a stage table.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("stage table is empty")]
    NoStages,

    #[error("stage {index} has no bullet patterns")]
    EmptyPatterns { index: usize },

    #[error("stage {index}: {field} must be positive")]
    NonPositive { index: usize, field: &'static str },
}

/// Rejected spawner reconfiguration. The spawner keeps its previous settings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    #[error("bullet pattern set is empty")]
    EmptyPatternSet,
}
