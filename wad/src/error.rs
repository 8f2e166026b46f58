use thiserror::Error;

pub type Result<T, E = WadError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WadError {
    /// Not a WAD container, or its header/directory points outside the file.
    #[error("not a WAD container: {0}")]
    Format(String),

    /// One level's geometry is unusable. Sibling levels are unaffected.
    #[error("level {level} is corrupt: {reason}")]
    LevelCorrupt { level: String, reason: String },

    #[error("no level named {0}")]
    MissingLevel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WadError {
    pub(crate) fn corrupt(level: &str, reason: impl Into<String>) -> Self {
        WadError::LevelCorrupt {
            level: level.to_string(),
            reason: reason.into(),
        }
    }
}
