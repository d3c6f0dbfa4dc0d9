use camino::Utf8Path;
use lofty::picture::Picture;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};
use log::debug;
use std::time::Duration;

/// An embedded image, as it appeared in the tag.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Artwork {
    /// Image format, usable as a file extension (`png`, `jpeg`, ...).
    pub format: String,
    pub data: Vec<u8>,
}

/// Technical stream properties, only used for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TechInfo {
    pub codec: Option<String>,
    pub duration: Option<Duration>,
    pub channels: Option<u8>,
    pub bit_depth: Option<u8>,
    pub sample_rate: Option<u32>,
    /// Kilobits per second.
    pub bitrate: Option<u32>,
}

/// The parts of a file's metadata this tool cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagHandle {
    /// The track number exactly as stored, e.g. `"3"` or `"3/12"`.
    pub track_number: Option<String>,
    pub title: Option<String>,
    pub artwork: Option<Artwork>,
    pub tech: TechInfo,
}

/// Loads tags from an audio file.
///
/// Implementations should only fail when the file cannot be parsed at all. Missing fields are
/// reported as `None`, and artwork that cannot be made sense of is dropped rather than treated
/// as an error.
pub trait TagReader {
    fn load(&self, path: &Utf8Path) -> Result<TagHandle, String>;
}

/// Reads tags with `lofty`, which handles ID3v2, Vorbis comments, MP4 atoms, APE and friends.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl TagReader for LoftyReader {
    fn load(&self, path: &Utf8Path) -> Result<TagHandle, String> {
        let tagged = Probe::open(path)
            .and_then(|x| x.read())
            .map_err(|e| e.to_string())?;

        let props = tagged.properties();
        let tech = TechInfo {
            codec: Some(format!("{:?}", tagged.file_type())),
            duration: Some(props.duration()),
            channels: props.channels(),
            bit_depth: props.bit_depth(),
            sample_rate: props.sample_rate(),
            bitrate: props.audio_bitrate().or_else(|| props.overall_bitrate()),
        };

        let tag = match tagged.primary_tag().or_else(|| tagged.first_tag()) {
            Some(tag) => tag,
            None => {
                debug!("No tags found in '{}'", path);
                return Ok(TagHandle { tech, ..TagHandle::default() });
            },
        };

        Ok(TagHandle {
            track_number: raw_track_number(tag),
            title: tag.title().map(|x| x.into_owned()),
            artwork: tag.pictures().iter().find_map(artwork_from_picture),
            tech,
        })
    }
}

/// Prefers the textual item so `"N/M"` values survive; falls back to the parsed number.
fn raw_track_number(tag: &Tag) -> Option<String> {
    tag.items()
        .find(|x| matches!(x.key(), ItemKey::TrackNumber))
        .and_then(|x| x.value().text())
        .map(str::to_owned)
        .or_else(|| tag.track().map(|x| x.to_string()))
}

fn artwork_from_picture(pic: &Picture) -> Option<Artwork> {
    let data = pic.data();
    if data.is_empty() {
        return None;
    }
    let format = artwork_format(pic.mime_type().map(|x| x.as_str()), data)?;
    Some(Artwork { format, data: data.to_vec() })
}

/// The declared MIME type wins when it is usable; otherwise the image bytes decide.
fn artwork_format(mime: Option<&str>, data: &[u8]) -> Option<String> {
    mime.and_then(format_from_mime).or_else(|| sniff_format(data))
}

/// `"image/jpeg"` -> `"jpeg"`. Anything that is not an image MIME type, or whose subtype is not
/// safe to use as a file extension, yields `None`.
pub fn format_from_mime(mime: &str) -> Option<String> {
    let sub = mime.trim().strip_prefix("image/")?;
    let sub = sub.split(';').next().unwrap_or(sub).trim().to_ascii_lowercase();
    if !sub.bytes().all(|x| x.is_ascii_alphanumeric() || x == b'+' || x == b'-') {
        return None;
    }
    match sub.as_str() {
        "" => None,
        "jpg" => Some(String::from("jpeg")),
        _ => Some(sub),
    }
}

/// Recognizes an image format from its magic bytes.
pub fn sniff_format(data: &[u8]) -> Option<String> {
    let format = if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpeg"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.starts_with(b"BM") {
        "bmp"
    } else {
        return None;
    };
    Some(format.to_owned())
}
