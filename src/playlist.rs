use crate::config::Config;
use crate::error::ScrubError;
use crate::order::load_ordered;
use crate::report::{Stage, StageReport};
use crate::tags::TagReader;
use crate::track::Track;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};

/// An m3u playlist: one file name per line, relative to the album directory.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Playlist {
    path: Utf8PathBuf,
    entries: Vec<String>,
}

impl Playlist {
    pub fn new<T: AsRef<Utf8Path>>(path: T, entries: Vec<String>) -> Self {
        Self {
            path: Utf8PathBuf::from(path.as_ref()),
            entries,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Truncates the file and writes every entry followed by `\n`.
    pub fn write(&self) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(&self.path)?);
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()
    }
}

/// Drops tracks that are shadowed by a converted copy.
///
/// When several recognized files share a stem and one of them has the output extension, only
/// that one stays. Other duplicates are kept as they are.
pub fn prefer_output_format<'a>(tracks: &'a [Track], cfg: &Config) -> Vec<&'a Track> {
    let converted: HashSet<&str> = tracks.iter()
        .filter(|x| cfg.is_output_extension(&x.ext))
        .map(stem_of)
        .collect();
    tracks.iter()
        .filter(|x| cfg.is_output_extension(&x.ext) || !converted.contains(stem_of(x)))
        .collect()
}

fn stem_of(track: &Track) -> &str {
    track.filename
        .strip_suffix(track.ext.as_str())
        .and_then(|x| x.strip_suffix('.'))
        .unwrap_or(&track.filename)
}

/// Keeps the leading run of tracks numbered 1, 2, 3, ... and reports where it broke off.
pub fn contiguous_prefix<'a>(tracks: &[&'a Track]) -> (Vec<&'a Track>, Option<ScrubError>) {
    let mut kept = Vec::with_capacity(tracks.len());
    for (i, &track) in tracks.iter().enumerate() {
        let expected = i as u32 + 1;
        if track.track_number != expected {
            let gap = ScrubError::PlaylistGapMismatch { expected, found: track.track_number };
            return (kept, Some(gap));
        }
        kept.push(track);
    }
    (kept, None)
}

/// Writes the album playlist from a fresh scan of the directory, in track order.
pub fn generate_playlist<R: TagReader + ?Sized>(cfg: &Config, reader: &R) -> StageReport {
    let mut report = StageReport::new(Stage::GeneratePlaylist);
    let loaded = match load_ordered(cfg, reader) {
        Ok(loaded) => loaded,
        Err(e) => {
            report.push_error(e);
            return report;
        },
    };
    report.extend_errors(loaded.errors);

    let mut tracks = prefer_output_format(&loaded.tracks, cfg);
    if cfg.strict_playlist {
        let (kept, gap) = contiguous_prefix(&tracks);
        tracks = kept;
        if let Some(e) = gap {
            report.push_error(e);
        }
    }

    let playlist = Playlist::new(
        cfg.playlist_path(),
        tracks.iter().map(|x| x.filename.clone()).collect(),
    );
    report.changed = playlist.entries().len();

    if cfg.pretend {
        println!("generate_playlist: would write out {} tracks to '{}'", report.changed, playlist.path());
        for entry in playlist.entries() {
            println!("  {}", entry);
        }
        return report;
    }

    match playlist.write() {
        Ok(()) => println!("generate_playlist: wrote out {} tracks", report.changed),
        Err(e) => {
            report.changed = 0;
            report.push_error(ScrubError::io(playlist.path(), e));
        },
    }
    report
}
