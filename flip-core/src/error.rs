//! Error types for the flip engine.
//!
//! Illegal moves are not errors: the validator answers `false` and the
//! session leaves state untouched. Errors only cover level data that cannot
//! be loaded and level lookups that cannot be honoured.

/// Errors surfaced to the caller of the engine.
#[derive(Debug, thiserror::Error)]
pub enum FlipError {
    /// Level text parsed but violates the level schema
    #[error("Invalid level format: {reason}")]
    InvalidLevelFormat { reason: String },

    /// Level text is not valid JSON or does not match the field types
    #[error("Invalid level format: {0}")]
    Json(#[from] serde_json::Error),

    /// No level at the requested index
    #[error("Level {index} does not exist")]
    LevelNotFound { index: usize },

    /// Previous level has not been cleared yet
    #[error("Level {index} is locked")]
    LevelLocked { index: usize },

    /// Two levels in one pack share an id
    #[error("Duplicate level id: {id}")]
    DuplicateLevelId { id: String },
}

impl FlipError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FlipError::InvalidLevelFormat {
            reason: reason.into(),
        }
    }

    /// True for both flavours of malformed level data.
    pub fn is_invalid_level(&self) -> bool {
        matches!(
            self,
            FlipError::InvalidLevelFormat { .. } | FlipError::Json(_)
        )
    }
}

/// Result type alias for engine operations
pub type FlipResult<T> = Result<T, FlipError>;
