//! Rejections returned by advisory checkpoints

/// Why a drop was refused.
///
/// The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Items with different tags of a non-mixable category
    #[error("{message}")]
    MixedTags { category: String, message: String },

    /// A capacity limit would be exceeded and nothing could be swapped out
    #[error("{message}")]
    Capacity { category: String, message: String },
}

impl Rejection {
    pub fn category(&self) -> &str {
        match self {
            Rejection::MixedTags { category, .. } | Rejection::Capacity { category, .. } => {
                category
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rejection::MixedTags { message, .. } | Rejection::Capacity { message, .. } => message,
        }
    }
}
