use crate::config::Config;
use crate::error::ScrubError;
use crate::order::load_ordered;
use crate::report::{Stage, StageReport};
use crate::tags::TagReader;
use crate::track::Track;
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

/// Replaces each of `<>:"/\|?*` with `_`.
pub fn sanitize_title(title: &str) -> String {
    fn re_illegal() -> &'static Regex {
        static RE_ILLEGAL: OnceLock<Regex> = OnceLock::new();
        RE_ILLEGAL.get_or_init(|| {
            Regex::new(r#"[<>:"/\\|?*]"#).expect("Failed to compile RE_ILLEGAL regex")
        })
    }
    re_illegal().replace_all(title, "_").into_owned()
}

/// `"{number} - {sanitized title}.{ext}"`, keeping the extension found on disk.
pub fn canonical_name(track: &Track) -> String {
    format!("{} - {}.{}", track.track_number, sanitize_title(&track.title), track.ext)
}

/// Renames every track in the directory to its canonical name.
///
/// Tracks already named canonically are left alone, so a second run is a no-op. A rename whose
/// target already exists is refused and reported; the remaining tracks are still processed.
pub fn normalize_names<R: TagReader + ?Sized>(cfg: &Config, reader: &R) -> StageReport {
    let mut report = StageReport::new(Stage::NormalizeNames);
    let loaded = match load_ordered(cfg, reader) {
        Ok(loaded) => loaded,
        Err(e) => {
            report.push_error(e);
            return report;
        },
    };
    report.extend_errors(loaded.errors);

    for track in &loaded.tracks {
        let normal_name = canonical_name(track);
        if normal_name == track.filename {
            println!("normalize_names: '{}' OK as-is", normal_name);
            continue;
        }

        let from = cfg.path_of(&track.filename);
        let to = cfg.path_of(&normal_name);
        if to.exists() {
            report.push_error(ScrubError::RenameCollision {
                from: track.filename.clone(),
                to: normal_name,
            });
            continue;
        }

        if cfg.pretend {
            println!("normalize_names: would rename '{}' => '{}'", track.filename, normal_name);
            report.changed += 1;
            continue;
        }

        match fs::rename(&from, &to) {
            Ok(()) => {
                println!("normalize_names: '{}' => '{}'", track.filename, normal_name);
                report.changed += 1;
            },
            Err(e) => report.push_error(ScrubError::io(from, e)),
        }
    }
    report
}
