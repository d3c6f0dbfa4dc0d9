use crate::config::Config;
use crate::error::ScrubError;
use crate::report::{Stage, StageReport};
use crate::scan::scan_dir;
use crate::tags::TagReader;
use log::debug;
use std::fs;

/// Writes the first embedded artwork found to `{art_file_base_name}.{format}`.
///
/// Files are visited in directory listing order, not track order. Unless overwriting is enabled,
/// nothing happens when any file named `{art_file_base_name}.*` exists already.
pub fn extract_art<R: TagReader + ?Sized>(cfg: &Config, reader: &R) -> StageReport {
    let mut report = StageReport::new(Stage::ExtractArt);
    let entries = match scan_dir(&cfg.dir) {
        Ok(entries) => entries,
        Err(e) => {
            report.push_error(e);
            return report;
        },
    };

    if !cfg.overwrite_art {
        if let Some(existing) = entries.iter().find(|x| !x.ext.is_empty() && x.stem == cfg.art_file_base_name) {
            println!("extract_art: '{}' exists, skipping", existing.file_name());
            return report;
        }
    }

    for entry in entries.iter().filter(|x| x.is_audio(&cfg.audio_extensions)) {
        // Only the artwork matters here; files without a usable track number still count.
        let art = match reader.load(&cfg.path_of(entry.file_name())) {
            Ok(tags) => tags.artwork,
            Err(reason) => {
                report.push_error(ScrubError::UnreadableTag { file: entry.file_name(), reason });
                continue;
            },
        };
        let art = match art {
            Some(art) => art,
            None => {
                debug!("extract_art: no artwork in '{}'", entry.file_name());
                continue;
            },
        };

        let art_name = format!("{}.{}", cfg.art_file_base_name, art.format);
        if cfg.pretend {
            println!("extract_art: would extract '{}' from '{}'", art_name, entry.file_name());
            report.changed += 1;
            return report;
        }

        let art_path = cfg.path_of(&art_name);
        match fs::write(&art_path, &art.data) {
            Ok(()) => {
                println!("extract_art: extracted '{}' from '{}'", art_name, entry.file_name());
                report.changed += 1;
            },
            Err(e) => report.push_error(ScrubError::io(art_path, e)),
        }
        return report;
    }

    report.push_error(ScrubError::ArtworkNotFound);
    report
}

