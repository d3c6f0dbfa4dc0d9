use crate::config::AudioExtensions;
use crate::error::ScrubError;
use camino::Utf8Path;
use log::warn;
use std::fs;

/// A regular file in the album directory, split at the last dot.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DirEntry {
    pub stem: String,
    pub ext: String,
}

impl DirEntry {
    /// Splits a file name at its last `.`. Names without a dot have an empty extension.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((stem, ext)) => Self { stem: stem.to_owned(), ext: ext.to_owned() },
            None => Self { stem: name.to_owned(), ext: String::new() },
        }
    }

    /// Reassembles the on-disk file name.
    pub fn file_name(&self) -> String {
        if self.ext.is_empty() {
            self.stem.clone()
        } else {
            format!("{}.{}", self.stem, self.ext)
        }
    }

    pub fn is_audio(&self, exts: &AudioExtensions) -> bool {
        exts.contains(&self.ext)
    }
}

/// Lists the regular files in `dir`, in whatever order the OS returns them.
///
/// Subdirectories and other non-regular entries are left out, symlinks are followed. Names that
/// are not valid UTF-8 and dangling symlinks are skipped with a warning.
pub fn scan_dir(dir: &Utf8Path) -> Result<Vec<DirEntry>, ScrubError> {
    let mut entries = Vec::new();
    let read_dir = match fs::read_dir(dir) {
        Ok(it) => it,
        Err(e) => return Err(ScrubError::io(dir, e)),
    };
    for result in read_dir {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Unexpected error when listing the '{}' directory: {}, skipping", dir, e);
                continue;
            },
        };
        // Symlinks count when they point at a regular file.
        let is_file = entry.file_type().and_then(|t| {
            if t.is_symlink() {
                fs::metadata(entry.path()).map(|m| m.is_file())
            } else {
                Ok(t.is_file())
            }
        });
        match is_file {
            Ok(true) => (),
            Ok(false) => continue,
            Err(e) => {
                warn!("Failed to stat {:?}: {}, skipping", entry.path(), e);
                continue;
            },
        }
        let name = entry.file_name();
        let name = match name.to_str() {
            Some(str) => str,
            None => {
                warn!("Skipping {:?}: file name is not valid UTF-8", entry.path());
                continue;
            },
        };
        entries.push(DirEntry::from_file_name(name));
    }
    Ok(entries)
}

/// Like [`scan_dir`], keeping only files with a recognized audio extension.
pub fn scan_audio(dir: &Utf8Path, exts: &AudioExtensions) -> Result<Vec<DirEntry>, ScrubError> {
    Ok(scan_dir(dir)?
        .into_iter()
        .filter(|x| x.is_audio(exts))
        .collect())
}
