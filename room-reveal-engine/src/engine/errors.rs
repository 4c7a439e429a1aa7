use thiserror::Error;

/// Startup problems that stop the reveal experience from running.
///
/// Per-frame work never fails: missing entities, materials or the compositor
/// simply skip their writes.
#[derive(Debug, Error)]
pub enum RevealSetupError {
    #[error("no surface detection subsystem registered, surface reveal disabled")]
    MissingDetectionSubsystem,

    #[error("invalid reveal configuration: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl RevealSetupError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
