use camino::Utf8PathBuf;
use std::io;

/// A categorized problem met while processing one file (or one stage).
///
/// Stages never bail out on these; they are collected into a [`StageReport`](crate::report::StageReport)
/// and the stage moves on to the next file.
#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    #[error("failed to read tags from '{file}': {reason}")]
    UnreadableTag { file: String, reason: String },

    #[error("no usable track number in '{file}' (raw value: {raw:?})")]
    MissingTrackNumber { file: String, raw: Option<String> },

    #[error("cannot rename '{from}' to '{to}': target already exists")]
    RenameCollision { from: String, to: String },

    #[error("could not find artwork to extract")]
    ArtworkNotFound,

    #[error("failed to convert '{file}': {reason}")]
    ConversionFailure { file: String, reason: String },

    #[error("expected track #{expected}, got track #{found}; playlist truncated")]
    PlaylistGapMismatch { expected: u32, found: u32 },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScrubError {
    pub fn io<P: Into<Utf8PathBuf>>(path: P, source: io::Error) -> Self {
        ScrubError::Io { path: path.into(), source }
    }

    /// Whether the error means some work could not be carried out at all, as opposed to a file
    /// being skipped because of its (bad) metadata.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScrubError::ConversionFailure { .. } | ScrubError::Io { .. })
    }
}
