use std::fmt;

/// Typed failures produced by the diff engine and script validation.
///
/// Rendering failures (writer errors, formatting) are reported through
/// `anyhow` at the renderer boundary; this enum covers the conditions
/// that have a defined meaning for callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The edit distance between the inputs exceeded the configured
    /// ceiling (`DiffOptions::max_edit_distance`).
    TooLarge {
        /// Edit distance reached when the computation was abandoned.
        distance: usize,
        /// The configured ceiling that was exceeded.
        limit: usize,
    },
    /// An externally constructed edit script violates the reconstruction
    /// invariant (source/target runs do not reproduce the inputs).
    MalformedScript(String),
}

impl DiffError {
    /// Get a short description of the error type
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "Diff Too Large",
            Self::MalformedScript(_) => "Malformed Edit Script",
        }
    }

    /// Check whether this error indicates the input-size ceiling was hit.
    ///
    /// Retrying with identical inputs never helps; callers should either
    /// raise the ceiling or fall back to a coarser presentation.
    #[must_use]
    pub const fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { distance, limit } => write!(
                f,
                "diff abandoned: edit distance reached {distance}, configured ceiling is {limit}"
            ),
            Self::MalformedScript(msg) => write!(f, "malformed edit script: {msg}"),
        }
    }
}

impl std::error::Error for DiffError {}
