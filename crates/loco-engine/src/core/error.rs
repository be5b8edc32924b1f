use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Only `InvalidLevelConfig` and `Manifest` are fatal (a session must not
/// start). `AssetUnavailable` is recoverable: callers fall back to a
/// placeholder sprite or drop the sound cue. `SchedulerLeak` marks a defect in
/// session teardown and is logged by the runner.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid level config: {0}")]
    InvalidLevelConfig(String),

    #[error("{kind} asset unavailable: {name}")]
    AssetUnavailable { kind: &'static str, name: String },

    #[error("{count} periodic system(s) still scheduled after teardown")]
    SchedulerLeak { count: usize },

    #[error("manifest parse error: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl EngineError {
    pub fn invalid_level(reason: impl Into<String>) -> Self {
        EngineError::InvalidLevelConfig(reason.into())
    }

    /// Whether this error must stop the session from starting.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidLevelConfig(_) | EngineError::Manifest(_)
        )
    }
}
