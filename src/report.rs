use crate::error::ScrubError;
use crate::track::Track;
use colored::Colorize;
use log::{error, warn};
use std::fmt;
use std::time::Duration;

/// One processing pass over the album directory.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    TrackInfo,
    NormalizeNames,
    ExtractArt,
    ConvertAudio,
    GeneratePlaylist,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::TrackInfo => "track_info",
            Stage::NormalizeNames => "normalize_names",
            Stage::ExtractArt => "extract_art",
            Stage::ConvertAudio => "convert_audio",
            Stage::GeneratePlaylist => "generate_playlist",
        }
    }

    /// The banner printed before the stage runs.
    pub fn header(&self) -> &'static str {
        match self {
            Stage::TrackInfo => "-- TRACK INFO --",
            Stage::NormalizeNames => "-- NORMALIZE NAMES --",
            Stage::ExtractArt => "-- EXTRACT ART --",
            Stage::ConvertAudio => "-- CONVERT AUDIO --",
            Stage::GeneratePlaylist => "-- GENERATE PLAYLIST --",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a stage did: how many files it changed (renamed, extracted, converted, listed) and the
/// problems it ran into along the way.
#[derive(Debug)]
pub struct StageReport {
    pub stage: Stage,
    pub changed: usize,
    pub errors: Vec<ScrubError>,
    pub elapsed: Duration,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            changed: 0,
            errors: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Logs `e` and records it.
    pub fn push_error(&mut self, e: ScrubError) {
        if e.is_fatal() {
            error!("{}: {}", self.stage, e);
        } else {
            warn!("{}: {}", self.stage, e);
        }
        self.errors.push(e);
    }

    pub fn extend_errors<I: IntoIterator<Item = ScrubError>>(&mut self, errors: I) {
        errors.into_iter().for_each(|e| self.push_error(e));
    }

    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(ScrubError::is_fatal)
    }
}

/// All stage reports of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn has_fatal(&self) -> bool {
        self.stages.iter().any(StageReport::has_fatal)
    }

    pub fn error_count(&self) -> usize {
        self.stages.iter().map(|x| x.errors.len()).sum()
    }

    pub fn print(&self) {
        println!("\n{}", "-- SUMMARY --".bold());
        for report in &self.stages {
            let errors = match report.errors.len() {
                0 => "no errors".green(),
                n if report.has_fatal() => format!("{n} errors").red(),
                n => format!("{n} warnings").yellow(),
            };
            println!("{:<18} {:>4} changed, {}, took {}",
                report.stage.as_str(),
                report.changed,
                errors,
                format_elapsed(report.elapsed));
        }
        println!("{}", format!("Total time: {}", format_elapsed(self.elapsed)).bold());
    }
}

pub fn format_elapsed(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

/// `m:ss`, or `?` when unknown.
pub fn format_duration(d: Option<Duration>) -> String {
    match d {
        Some(d) => {
            let secs = d.as_secs();
            format!("{}:{:02}", secs / 60, secs % 60)
        },
        None => String::from("?"),
    }
}

fn or_unknown<T: fmt::Display>(value: Option<T>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => String::from("?"),
    }
}

/// One human-readable line describing a track's metadata and stream properties.
pub fn format_track_info(track: &Track) -> String {
    let tech = &track.tech;
    format!("#{} \"{}\" [{}] {} | {} | {} ch, {}, {}, {}",
        track.track_number,
        track.title,
        track.filename,
        format_duration(tech.duration),
        tech.codec.as_deref().unwrap_or("?"),
        or_unknown(tech.channels, ""),
        or_unknown(tech.bit_depth, " bit"),
        or_unknown(tech.sample_rate, " Hz"),
        or_unknown(tech.bitrate, " kbps"))
}
