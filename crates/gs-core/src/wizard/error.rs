/// Rejected navigation request.
///
/// Guard errors are ordinary results: the host re-prompts the user or treats
/// the request as a no-op. The wizard state is never modified when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum GuardError {
    #[error("step `{step}` is not complete")]
    StepIncomplete { step: String },
    #[error("step `{step}` is the terminal step")]
    AlreadyTerminal { step: String },
    #[error("no previous step to return to")]
    NoHistory,
    #[error("step `{target}` is not reachable from the current position")]
    InvalidTarget { target: String },
}

/// Malformed step table. Fatal at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("step table is empty")]
    Empty,
    #[error("steps `{first}` and `{second}` share order {order}")]
    DuplicateOrder {
        order: u32,
        first: String,
        second: String,
    },
    #[error("step `{id}` is defined more than once")]
    DuplicateStepId { id: String },
    #[error("step `{id}` has progress {percent}%, expected 0-100")]
    ProgressOutOfRange { id: String, percent: u8 },
}
