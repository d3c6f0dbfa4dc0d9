use crate::config::{Config, FfmpegLogLevel};
use crate::error::ScrubError;
use crate::report::{Stage, StageReport};
use crate::scan::{scan_audio, DirEntry};
use camino::Utf8Path;
use log::{debug, warn};
use std::fs;
use std::process::{Command, Stdio};

/// FLAC's highest compression level; other encoders ignore it.
pub const COMPRESSION_LEVEL: u32 = 12;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ConvertOptions {
    pub compression_level: u32,
    /// Whether the transcoder may duplicate or drop frames to keep a constant frame rate.
    pub resync: bool,
    pub log_level: FfmpegLogLevel,
}

impl ConvertOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            compression_level: COMPRESSION_LEVEL,
            resync: false,
            log_level: cfg.ffmpeg_log_level,
        }
    }
}

/// Converts one audio file into another format. Blocks until done.
pub trait Transcoder {
    /// Verifies that the transcoder is usable at all.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    fn convert(&self, input: &Utf8Path, output: &Utf8Path, opts: &ConvertOptions) -> Result<(), String>;
}

/// Runs the `ffmpeg` executable.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: String,
}

impl FfmpegTranscoder {
    pub fn new<T: Into<String>>(program: T) -> Self {
        Self { program: program.into() }
    }

    fn args(input: &Utf8Path, output: &Utf8Path, opts: &ConvertOptions) -> Vec<String> {
        vec![
            String::from("-nostdin"),
            // Never overwrite; existing outputs are handled by the caller.
            String::from("-n"),
            String::from("-loglevel"), opts.log_level.as_str().to_owned(),
            String::from("-i"), input.to_string(),
            String::from("-compression_level"), opts.compression_level.to_string(),
            String::from("-vsync"), String::from(if opts.resync { "1" } else { "0" }),
            output.to_string(),
        ]
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder for FfmpegTranscoder {
    fn check(&self) -> Result<(), String> {
        match Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(format!("'{} -version' exited with {}", self.program, status)),
            Err(e) => Err(format!("failed to run '{}': {}", self.program, e)),
        }
    }

    fn convert(&self, input: &Utf8Path, output: &Utf8Path, opts: &ConvertOptions) -> Result<(), String> {
        let args = Self::args(input, output, opts);
        debug!("running {} {:?}", self.program, args);
        match Command::new(&self.program).args(&args).stdin(Stdio::null()).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(format!("{} exited with {}", self.program, status)),
            Err(e) => Err(format!("failed to run '{}': {}", self.program, e)),
        }
    }
}

/// The recognized files that are not in the output format yet, in directory listing order.
pub fn pending_conversions(cfg: &Config) -> Result<Vec<DirEntry>, ScrubError> {
    Ok(scan_audio(&cfg.dir, &cfg.audio_extensions)?
        .into_iter()
        .filter(|x| !cfg.is_output_extension(&x.ext))
        .collect())
}

/// Converts every recognized file to `{stem}.{output_extension}`.
///
/// The source is only deleted (when configured) after the transcoder reported success and the
/// output file exists. Files whose output already exists are skipped and kept, and the
/// transcoder is only checked when something is left to convert.
pub fn convert_audio<T: Transcoder + ?Sized>(cfg: &Config, transcoder: &T) -> StageReport {
    let mut report = StageReport::new(Stage::ConvertAudio);
    let pending = match pending_conversions(cfg) {
        Ok(pending) => pending,
        Err(e) => {
            report.push_error(e);
            return report;
        },
    };
    let pending: Vec<DirEntry> = pending.into_iter()
        .filter(|x| {
            let new_file = format!("{}.{}", x.stem, cfg.output_extension);
            if cfg.path_of(&new_file).exists() {
                warn!("convert_audio: '{}' already exists, leaving '{}' alone", new_file, x.file_name());
                return false;
            }
            true
        })
        .collect();
    if pending.is_empty() {
        println!("convert_audio: nothing to convert");
        return report;
    }

    if !cfg.pretend {
        if let Err(reason) = transcoder.check() {
            report.push_error(ScrubError::ConversionFailure { file: String::from("*"), reason });
            return report;
        }
    }

    let opts = ConvertOptions::from_config(cfg);
    for entry in &pending {
        let old_file = entry.file_name();
        let new_file = format!("{}.{}", entry.stem, cfg.output_extension);
        let old_path = cfg.path_of(&old_file);
        let new_path = cfg.path_of(&new_file);

        if cfg.pretend {
            println!("convert_audio: would convert '{}' => '{}'", old_file, new_file);
            report.changed += 1;
            continue;
        }

        if let Err(reason) = transcoder.convert(&old_path, &new_path, &opts) {
            report.push_error(ScrubError::ConversionFailure { file: old_file, reason });
            continue;
        }
        if !new_path.is_file() {
            report.push_error(ScrubError::ConversionFailure {
                file: old_file,
                reason: format!("transcoder succeeded but '{}' is missing", new_file),
            });
            continue;
        }
        report.changed += 1;

        if cfg.delete_after_convert {
            if let Err(e) = fs::remove_file(&old_path) {
                report.push_error(ScrubError::io(old_path, e));
            }
        }
        println!("convert_audio: '{}' => '{}'", old_file, new_file);
    }
    report
}
