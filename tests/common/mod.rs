#![allow(dead_code)]

use album_scrub::config::Config;
use album_scrub::convert::{ConvertOptions, Transcoder};
use album_scrub::tags::{Artwork, TagHandle, TagReader};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Reads "tags" from plain text files:
///
/// ```text
/// #tags
/// tracknumber=1/2
/// title=Some Title
/// art=png:raw image bytes
/// ```
///
/// Anything not starting with `#tags` is unreadable.
pub struct TextTags;

impl TagReader for TextTags {
    fn load(&self, path: &Utf8Path) -> Result<TagHandle, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut lines = content.lines();
        if lines.next() != Some("#tags") {
            return Err(String::from("not an audio file"));
        }
        let mut tags = TagHandle::default();
        for line in lines {
            let Some((key, value)) = line.split_once('=') else { continue };
            match key {
                "tracknumber" => tags.track_number = Some(value.to_owned()),
                "title" => tags.title = Some(value.to_owned()),
                "art" => {
                    if let Some((format, data)) = value.split_once(':') {
                        tags.artwork = Some(Artwork {
                            format: format.to_owned(),
                            data: data.as_bytes().to_vec(),
                        });
                    }
                },
                _ => (),
            }
        }
        Ok(tags)
    }
}

/// "Transcodes" by copying the file, tags included.
pub struct CopyTranscoder;

impl Transcoder for CopyTranscoder {
    fn convert(&self, input: &Utf8Path, output: &Utf8Path, _opts: &ConvertOptions) -> Result<(), String> {
        fs::copy(input, output).map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Always fails, without producing output.
pub struct BrokenTranscoder;

impl Transcoder for BrokenTranscoder {
    fn convert(&self, _input: &Utf8Path, _output: &Utf8Path, _opts: &ConvertOptions) -> Result<(), String> {
        Err(String::from("exit status: 1"))
    }
}

/// Claims success but never writes anything.
pub struct LyingTranscoder;

impl Transcoder for LyingTranscoder {
    fn convert(&self, _input: &Utf8Path, _output: &Utf8Path, _opts: &ConvertOptions) -> Result<(), String> {
        Ok(())
    }
}

/// Fails the preflight check, as if ffmpeg were not installed.
pub struct MissingTranscoder;

impl Transcoder for MissingTranscoder {
    fn check(&self) -> Result<(), String> {
        Err(String::from("ffmpeg not found"))
    }

    fn convert(&self, _input: &Utf8Path, _output: &Utf8Path, _opts: &ConvertOptions) -> Result<(), String> {
        Err(String::from("ffmpeg not found"))
    }
}

pub struct Album {
    _tmp: TempDir,
    pub dir: Utf8PathBuf,
}

impl Album {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        Self { _tmp: tmp, dir }
    }

    pub fn config(&self) -> Config {
        Config { dir: self.dir.clone(), ..Config::default() }
    }

    /// Adds an audio file with the given tags.
    pub fn track(&self, name: &str, tracknumber: &str, title: &str) -> &Self {
        self.write(name, &format!("#tags\ntracknumber={tracknumber}\ntitle={title}\n"))
    }

    pub fn track_with_art(&self, name: &str, tracknumber: &str, title: &str, format: &str, data: &str) -> &Self {
        self.write(name, &format!("#tags\ntracknumber={tracknumber}\ntitle={title}\nart={format}:{data}\n"))
    }

    pub fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.dir.join(name), content).unwrap();
        self
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.join(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.join(name).exists()
    }

    /// File names in the directory, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.dir).unwrap()
            .map(|x| x.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }
}
