use album_scrub::{
    config::{normalize_extension, AudioExtensions, Config, FfmpegLogLevel, DEFAULT_AUDIO_EXTENSIONS},
    convert::FfmpegTranscoder,
    tags::LoftyReader,
};
use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use log::{error, warn};
use std::process::ExitCode;

#[derive(Parser)]
#[command(about = "Normalize names, extract artwork, convert audio and write a playlist for one album directory")]
struct Cli {
    /// The album directory
    #[arg(default_value = ".")]
    dir: Utf8PathBuf,

    #[arg(short, long, value_delimiter = ',', help = "Comma-separated audio extensions to process")]
    extensions: Option<Vec<String>>,

    #[arg(long, help = "Do not rename files after their tags")]
    no_normalize: bool,

    #[arg(long, help = "Do not extract cover artwork")]
    no_art: bool,

    #[arg(long, help = "Extract artwork even if an artwork file exists")]
    overwrite_art: bool,

    #[arg(long, default_value = "folder", help = "File name (without extension) of the extracted artwork")]
    art_name: String,

    #[arg(long, help = "Do not transcode audio")]
    no_convert: bool,

    #[arg(short, long, default_value = "flac", help = "Extension (and format) to transcode to")]
    output_ext: String,

    #[arg(long, help = "Keep source files after a successful conversion")]
    keep_source: bool,

    #[arg(long, value_enum, default_value_t = FfmpegLogLevel::Warning, help = "ffmpeg log level")]
    ffmpeg_log_level: FfmpegLogLevel,

    #[arg(long, default_value = "ffmpeg", help = "The ffmpeg executable to run")]
    ffmpeg: String,

    #[arg(long, help = "Do not write a playlist")]
    no_playlist: bool,

    #[arg(long, default_value = "playlist.m3u", help = "Playlist path, relative to DIR unless absolute")]
    playlist: Utf8PathBuf,

    #[arg(long, help = "Stop the playlist at the first missing or repeated track number")]
    strict_playlist: bool,

    #[arg(short, long, help = "Print technical info about every track before processing")]
    report: bool,

    #[arg(short, long, help = "Show what would be done, but do not apply any changes")]
    pretend: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More log output (repeatable)")]
    verbose: u8,

    #[arg(short, long, help = "Only log errors")]
    quiet: bool,
}

impl Cli {
    fn to_config(&self) -> Result<Config> {
        if !self.dir.is_dir() {
            return Err(anyhow!("'{}' is not a directory", self.dir));
        }
        let output_extension = normalize_extension(&self.output_ext);
        if output_extension.is_empty() {
            return Err(anyhow!("The output extension cannot be empty"));
        }
        if self.art_name.is_empty() {
            return Err(anyhow!("The artwork file name cannot be empty"));
        }
        let audio_extensions = match &self.extensions {
            Some(exts) => AudioExtensions::new(exts),
            None => AudioExtensions::new(DEFAULT_AUDIO_EXTENSIONS),
        };

        Ok(Config {
            dir: self.dir.clone(),
            audio_extensions,
            normalize_names: !self.no_normalize,
            extract_art: !self.no_art,
            overwrite_art: self.overwrite_art,
            art_file_base_name: self.art_name.clone(),
            convert_audio: !self.no_convert,
            output_extension,
            delete_after_convert: !self.keep_source,
            ffmpeg_log_level: self.ffmpeg_log_level,
            generate_playlist: !self.no_playlist,
            playlist_file_name: self.playlist.clone(),
            strict_playlist: self.strict_playlist,
            report_track_info: self.report,
            pretend: self.pretend,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("album_scrub")
        .verbosity(if cli.quiet { 0 } else { 1 + cli.verbose as usize })
        .init()
        .unwrap();

    let cfg = match cli.to_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        },
    };

    if cfg.convert_audio && !cfg.audio_extensions.contains(&cfg.output_extension) {
        warn!("'{}' is not among the audio extensions, converted files will be ignored by later stages",
            cfg.output_extension);
    }

    let summary = album_scrub::run(&cfg, &LoftyReader, &FfmpegTranscoder::new(&cli.ffmpeg));
    summary.print();

    if summary.has_fatal() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
