use crate::artwork::extract_art;
use crate::config::Config;
use crate::convert::{convert_audio, Transcoder};
use crate::normalize::normalize_names;
use crate::order::load_ordered;
use crate::playlist::generate_playlist;
use crate::report::{format_track_info, RunSummary, Stage, StageReport};
use crate::tags::TagReader;
use colored::Colorize;
use std::time::Instant;

/// Prints one line per track, in album order.
pub fn report_track_info<R: TagReader + ?Sized>(cfg: &Config, reader: &R) -> StageReport {
    let mut report = StageReport::new(Stage::TrackInfo);
    let loaded = match load_ordered(cfg, reader) {
        Ok(loaded) => loaded,
        Err(e) => {
            report.push_error(e);
            return report;
        },
    };
    report.extend_errors(loaded.errors);
    for track in &loaded.tracks {
        println!("{}", format_track_info(track));
    }
    if loaded.tracks.is_empty() {
        println!("No tracks found.");
    }
    report
}

fn timed<F: FnOnce() -> StageReport>(stage: Stage, f: F) -> StageReport {
    println!("\n{}", stage.header().bold());
    let start = Instant::now();
    let mut report = f();
    report.elapsed = start.elapsed();
    report
}

/// Runs the enabled stages one after another: track info, normalize names, extract art, convert
/// audio, generate playlist.
///
/// Every stage looks at the directory afresh, so it sees whatever the previous ones left behind.
/// Errors in one stage never prevent the next from running.
pub fn run<R, T>(cfg: &Config, reader: &R, transcoder: &T) -> RunSummary
where
    R: TagReader + ?Sized,
    T: Transcoder + ?Sized,
{
    let start = Instant::now();
    let mut summary = RunSummary::default();

    if cfg.report_track_info {
        summary.stages.push(timed(Stage::TrackInfo, || report_track_info(cfg, reader)));
    }
    if cfg.normalize_names {
        summary.stages.push(timed(Stage::NormalizeNames, || normalize_names(cfg, reader)));
    }
    if cfg.extract_art {
        summary.stages.push(timed(Stage::ExtractArt, || extract_art(cfg, reader)));
    }
    if cfg.convert_audio {
        summary.stages.push(timed(Stage::ConvertAudio, || convert_audio(cfg, transcoder)));
    }
    if cfg.generate_playlist {
        summary.stages.push(timed(Stage::GeneratePlaylist, || generate_playlist(cfg, reader)));
    }

    summary.elapsed = start.elapsed();
    summary
}
