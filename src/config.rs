use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeSet;
use std::fmt;

/// Extensions recognized as audio when no other set is given.
pub const DEFAULT_AUDIO_EXTENSIONS: [&str; 10] =
    ["aac", "aiff", "dsf", "flac", "m4a", "mp3", "ogg", "opus", "wav", "wv"];

/// Verbosity passed to the transcoder.
#[derive(Debug, Clone, Copy, Eq, PartialEq, clap::ValueEnum)]
pub enum FfmpegLogLevel {
    Quiet,
    Warning,
    Info,
}

impl FfmpegLogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FfmpegLogLevel::Quiet => "quiet",
            FfmpegLogLevel::Warning => "warning",
            FfmpegLogLevel::Info => "info",
        }
    }
}

impl fmt::Display for FfmpegLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of extensions treated as audio. Matching is ASCII case-insensitive.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AudioExtensions {
    exts: BTreeSet<String>,
}

impl AudioExtensions {
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts = exts.into_iter()
            .map(|x| normalize_extension(x.as_ref()))
            .filter(|x| !x.is_empty())
            .collect();
        Self { exts }
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.exts.contains(&ext.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }
}

impl Default for AudioExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_EXTENSIONS)
    }
}

/// Trims whitespace and a leading dot, and lowercases.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Options for a single run. Built once at startup and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// The album directory to process.
    pub dir: Utf8PathBuf,
    pub audio_extensions: AudioExtensions,

    pub normalize_names: bool,

    pub extract_art: bool,
    pub overwrite_art: bool,
    /// File stem of the extracted artwork; the extension comes from the image format.
    pub art_file_base_name: String,

    pub convert_audio: bool,
    pub output_extension: String,
    pub delete_after_convert: bool,
    pub ffmpeg_log_level: FfmpegLogLevel,

    pub generate_playlist: bool,
    /// Playlist location. Relative paths are resolved against `dir`.
    pub playlist_file_name: Utf8PathBuf,
    /// Stop the playlist at the first track whose number does not match its position.
    pub strict_playlist: bool,

    pub report_track_info: bool,

    /// Report what would be done without touching the filesystem.
    pub pretend: bool,
}

impl Config {
    /// Resolves a file name against the album directory.
    pub fn path_of<T: AsRef<Utf8Path>>(&self, name: T) -> Utf8PathBuf {
        self.dir.join(name)
    }

    pub fn playlist_path(&self) -> Utf8PathBuf {
        if self.playlist_file_name.is_absolute() {
            self.playlist_file_name.clone()
        } else {
            self.dir.join(&self.playlist_file_name)
        }
    }

    /// Whether `ext` is the configured conversion target.
    pub fn is_output_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(&self.output_extension)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: Utf8PathBuf::from("."),
            audio_extensions: AudioExtensions::default(),
            normalize_names: true,
            extract_art: true,
            overwrite_art: false,
            art_file_base_name: String::from("folder"),
            convert_audio: true,
            output_extension: String::from("flac"),
            delete_after_convert: true,
            ffmpeg_log_level: FfmpegLogLevel::Warning,
            generate_playlist: true,
            playlist_file_name: Utf8PathBuf::from("playlist.m3u"),
            strict_playlist: false,
            report_track_info: false,
            pretend: false,
        }
    }
}
