/// Errors surfaced by the treemap engine.
///
/// Degenerate geometry (zero weights, empty rectangles, sub-threshold
/// children) is never an error; it simply produces no tiles.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreemapError {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },
}

impl TreemapError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = TreemapError> = std::result::Result<T, E>;
