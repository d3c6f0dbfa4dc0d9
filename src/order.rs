use crate::config::Config;
use crate::error::ScrubError;
use crate::scan::{scan_audio, DirEntry};
use crate::tags::TagReader;
use crate::track::Track;
use camino::Utf8Path;

/// The result of loading every recognized file in a directory. Files that failed to load are
/// kept out of `tracks` and show up in `errors` instead.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tracks: Vec<Track>,
    pub errors: Vec<ScrubError>,
}

/// Loads all `entries`, keeping their order.
pub fn load_tracks<R: TagReader + ?Sized>(dir: &Utf8Path, entries: &[DirEntry], reader: &R) -> Loaded {
    let mut loaded = Loaded::default();
    for entry in entries {
        match Track::load(dir, entry, reader) {
            Ok(track) => loaded.tracks.push(track),
            Err(e) => loaded.errors.push(e),
        }
    }
    loaded
}

/// Sorts tracks by ascending track number.
///
/// The sort is stable: tracks sharing a number keep the order they came in, which for freshly
/// scanned tracks is the directory listing order. Nothing tries to be clever about such ties.
pub fn order_tracks(tracks: &mut [Track]) {
    tracks.sort_by_key(|x| x.track_number);
}

/// Scans the configured directory and returns its tracks in album order.
pub fn load_ordered<R: TagReader + ?Sized>(cfg: &Config, reader: &R) -> Result<Loaded, ScrubError> {
    let entries = scan_audio(&cfg.dir, &cfg.audio_extensions)?;
    let mut loaded = load_tracks(&cfg.dir, &entries, reader);
    order_tracks(&mut loaded.tracks);
    Ok(loaded)
}
