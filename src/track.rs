use crate::error::ScrubError;
use crate::scan::DirEntry;
use crate::tags::{Artwork, TagReader, TechInfo};
use camino::Utf8Path;

/// An audio file in the album directory, together with the metadata used for ordering, naming
/// and reporting.
///
/// Tracks are cheap snapshots: they are loaded when a stage needs them and dropped when the stage
/// ends, since the next stage may find the directory renamed or converted under it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// The file name (not path) at load time.
    pub filename: String,
    /// The extension part of `filename`, as found on disk.
    pub ext: String,
    /// The track number as stored in the tag.
    pub raw_track_number: String,
    /// The numerator of `raw_track_number`.
    pub track_number: u32,
    /// Empty if the tag has no title.
    pub title: String,
    pub artwork: Option<Artwork>,
    pub tech: TechInfo,
}

impl Track {
    /// Loads the file behind `entry` (relative to `dir`) through `reader`.
    pub fn load<R: TagReader + ?Sized>(dir: &Utf8Path, entry: &DirEntry, reader: &R) -> Result<Self, ScrubError> {
        let filename = entry.file_name();
        let tags = match reader.load(&dir.join(&filename)) {
            Ok(tags) => tags,
            Err(reason) => return Err(ScrubError::UnreadableTag { file: filename, reason }),
        };

        let raw = match tags.track_number {
            Some(raw) => raw,
            None => return Err(ScrubError::MissingTrackNumber { file: filename, raw: None }),
        };
        let track_number = match parse_track_number(&raw) {
            Some(n) => n,
            None => return Err(ScrubError::MissingTrackNumber { file: filename, raw: Some(raw) }),
        };

        Ok(Track {
            filename,
            ext: entry.ext.clone(),
            raw_track_number: raw,
            track_number,
            title: tags.title.unwrap_or_default(),
            artwork: tags.artwork,
            tech: tags.tech,
        })
    }
}

/// Parses a track number of the form `"N"` or `"N/M"`, returning `N`.
///
/// Surrounding whitespace is tolerated and leading zeros are dropped; anything else that is not a
/// non-negative integer numerator yields `None`.
pub fn parse_track_number(raw: &str) -> Option<u32> {
    let numerator = match raw.split_once('/') {
        Some((n, _)) => n,
        None => raw,
    };
    numerator.trim().parse::<u32>().ok()
}
