mod common;

use album_scrub::artwork::extract_art;
use album_scrub::convert::convert_audio;
use album_scrub::normalize::normalize_names;
use album_scrub::order::load_ordered;
use album_scrub::playlist::generate_playlist;
use album_scrub::scan::scan_audio;
use album_scrub::{Config, ScrubError};
use common::{Album, BrokenTranscoder, CopyTranscoder, LyingTranscoder, MissingTranscoder, TextTags};

#[test]
fn canonical_names_need_no_renames_and_playlist_follows_track_order() {
    let album = Album::new();
    album.track("2 - B.mp3", "2/2", "B").track("1 - A.mp3", "1/2", "A");
    let cfg = album.config();

    let report = normalize_names(&cfg, &TextTags);
    assert_eq!(report.changed, 0);
    assert!(report.errors.is_empty());
    assert_eq!(album.files(), vec!["1 - A.mp3", "2 - B.mp3"]);

    let report = generate_playlist(&cfg, &TextTags);
    assert_eq!(report.changed, 2);
    assert_eq!(album.read("playlist.m3u"), "1 - A.mp3\n2 - B.mp3\n");
}

#[test]
fn normalization_sanitizes_titles_and_is_idempotent() {
    let album = Album::new();
    album
        .track("01 live.flac", "01/10", "AC/DC: Live")
        .track("track two.mp3", "2", "What?")
        .write("notes.txt", "not audio");
    let cfg = album.config();

    let report = normalize_names(&cfg, &TextTags);
    assert_eq!(report.changed, 2);
    assert!(report.errors.is_empty());
    assert_eq!(album.files(), vec!["1 - AC_DC_ Live.flac", "2 - What_.mp3", "notes.txt"]);

    let report = normalize_names(&cfg, &TextTags);
    assert_eq!(report.changed, 0);
    assert_eq!(album.files(), vec!["1 - AC_DC_ Live.flac", "2 - What_.mp3", "notes.txt"]);
}

#[test]
fn rename_onto_an_existing_file_is_refused() {
    let album = Album::new();
    album.track("x.mp3", "1", "A").track("y.mp3", "1", "A");
    let cfg = album.config();

    let report = normalize_names(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(matches!(report.errors[0], ScrubError::RenameCollision { ref to, .. } if to == "1 - A.mp3"));
    assert!(!report.has_fatal());

    let files = album.files();
    assert_eq!(files.len(), 2);
    assert!(files.contains(&String::from("1 - A.mp3")));
}

#[test]
fn bad_tags_are_reported_and_excluded() {
    let album = Album::new();
    album
        .track("1 - A.mp3", "1", "A")
        .write("broken.mp3", "garbage")
        .track("nonumber.mp3", "", "N")
        .track("words.mp3", "three/10", "W");
    let cfg = album.config();

    let loaded = load_ordered(&cfg, &TextTags).unwrap();
    assert_eq!(loaded.tracks.len(), 1);
    assert_eq!(loaded.errors.len(), 3);
    assert_eq!(loaded.errors.iter().filter(|x| matches!(x, ScrubError::UnreadableTag { .. })).count(), 1);
    assert_eq!(loaded.errors.iter().filter(|x| matches!(x, ScrubError::MissingTrackNumber { .. })).count(), 2);

    let report = normalize_names(&cfg, &TextTags);
    assert_eq!(report.errors.len(), 3);
    assert!(album.exists("broken.mp3"));
    assert!(album.exists("nonumber.mp3"));

    let report = generate_playlist(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert_eq!(album.read("playlist.m3u"), "1 - A.mp3\n");
}

#[test]
fn missing_artwork_is_a_soft_error() {
    let album = Album::new();
    album.track("1 - A.mp3", "1", "A");
    let cfg = album.config();

    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 0);
    assert!(matches!(report.errors[..], [ScrubError::ArtworkNotFound]));
    assert!(!report.has_fatal());
    assert_eq!(album.files(), vec!["1 - A.mp3"]);
}

#[test]
fn first_artwork_is_written_with_its_format() {
    let album = Album::new();
    album
        .track("1 - A.mp3", "1", "A")
        .track_with_art("2 - B.mp3", "2", "B", "png", "PNGDATA");
    let cfg = album.config();

    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert!(report.errors.is_empty());
    assert_eq!(album.read("folder.png"), "PNGDATA");
}

#[test]
fn artwork_comes_from_the_first_file_listed_not_the_first_track() {
    let album = Album::new();
    album.write("a.mp3", "").write("b.mp3", "");
    let cfg = album.config();

    let listed = scan_audio(&cfg.dir, &cfg.audio_extensions).unwrap();
    let (first, second) = (listed[0].file_name(), listed[1].file_name());
    album
        .track_with_art(&first, "2", "Second", "png", "FIRST")
        .track_with_art(&second, "1", "First", "jpeg", "SECOND");

    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert!(report.errors.is_empty());
    assert_eq!(album.read("folder.png"), "FIRST");
    assert!(!album.exists("folder.jpeg"));
}

#[test]
fn bare_file_named_like_the_artwork_does_not_block_extraction() {
    let album = Album::new();
    album
        .track_with_art("1 - A.mp3", "1", "A", "png", "IMG")
        .write("folder", "not artwork");
    let cfg = album.config();

    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert_eq!(album.read("folder.png"), "IMG");
    assert_eq!(album.read("folder"), "not artwork");
}

#[test]
fn existing_artwork_is_kept_unless_overwriting() {
    let album = Album::new();
    album
        .track_with_art("1 - A.mp3", "1", "A", "png", "NEW")
        .write("folder.jpeg", "OLD");
    let mut cfg = album.config();

    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 0);
    assert!(report.errors.is_empty());
    assert!(!album.exists("folder.png"));

    cfg.overwrite_art = true;
    let report = extract_art(&cfg, &TextTags);
    assert_eq!(report.changed, 1);
    assert_eq!(album.read("folder.png"), "NEW");
    assert_eq!(album.read("folder.jpeg"), "OLD");
}

#[test]
fn conversion_replaces_sources_with_output_format() {
    let album = Album::new();
    album.track("1 - A.mp3", "1", "A").track("2 - B.flac", "2", "B");
    let cfg = album.config();

    let report = convert_audio(&cfg, &CopyTranscoder);
    assert_eq!(report.changed, 1);
    assert!(report.errors.is_empty());
    assert_eq!(album.files(), vec!["1 - A.flac", "2 - B.flac"]);
}

#[test]
fn kept_sources_are_shadowed_in_the_playlist() {
    let album = Album::new();
    album.track("1 - A.mp3", "1", "A").track("2 - B.wav", "2", "B");
    let cfg = Config { delete_after_convert: false, ..album.config() };

    let report = convert_audio(&cfg, &CopyTranscoder);
    assert_eq!(report.changed, 2);
    assert_eq!(album.files(), vec!["1 - A.flac", "1 - A.mp3", "2 - B.flac", "2 - B.wav"]);

    generate_playlist(&cfg, &TextTags);
    assert_eq!(album.read("playlist.m3u"), "1 - A.flac\n2 - B.flac\n");

    // A rerun finds the outputs in place and leaves everything alone.
    let report = convert_audio(&cfg, &CopyTranscoder);
    assert_eq!(report.changed, 0);
    assert!(report.errors.is_empty());
    assert_eq!(album.files().len(), 5);
}

#[test]
fn rerun_with_outputs_in_place_skips_the_transcoder_check() {
    let album = Album::new();
    album.track("1 - A.mp3", "1", "A");
    let cfg = Config { delete_after_convert: false, ..album.config() };

    let report = convert_audio(&cfg, &CopyTranscoder);
    assert_eq!(report.changed, 1);

    let report = convert_audio(&cfg, &MissingTranscoder);
    assert_eq!(report.changed, 0);
    assert!(report.errors.is_empty());
    assert!(!report.has_fatal());
    assert_eq!(album.files(), vec!["1 - A.flac", "1 - A.mp3"]);

    // With real work left, the failing check is fatal.
    album.track("2 - B.wav", "2", "B");
    let report = convert_audio(&cfg, &MissingTranscoder);
    assert!(matches!(report.errors[..], [ScrubError::ConversionFailure { .. }]));
    assert!(report.has_fatal());
    assert!(!album.exists("2 - B.flac"));
}

#[test]
fn failed_conversion_keeps_the_source() {
    let album = Album::new();
    album.track("1 - A.mp3", "1", "A");
    let cfg = album.config();

    let report = convert_audio(&cfg, &BrokenTranscoder);
    assert_eq!(report.changed, 0);
    assert!(matches!(report.errors[..], [ScrubError::ConversionFailure { .. }]));
    assert!(report.has_fatal());
    assert_eq!(album.files(), vec!["1 - A.mp3"]);

    let report = convert_audio(&cfg, &LyingTranscoder);
    assert!(matches!(report.errors[..], [ScrubError::ConversionFailure { .. }]));
    assert_eq!(album.files(), vec!["1 - A.mp3"]);
}

#[test]
fn empty_directory_yields_an_empty_playlist() {
    let album = Album::new();
    let cfg = album.config();

    let report = generate_playlist(&cfg, &TextTags);
    assert_eq!(report.changed, 0);
    assert!(report.errors.is_empty());
    assert_eq!(album.read("playlist.m3u"), "");
}

#[test]
fn strict_playlist_stops_at_the_first_gap() {
    let album = Album::new();
    album
        .track("1 - A.mp3", "1", "A")
        .track("2 - B.mp3", "2", "B")
        .track("4 - D.mp3", "4", "D");
    let mut cfg = album.config();

    generate_playlist(&cfg, &TextTags);
    assert_eq!(album.read("playlist.m3u"), "1 - A.mp3\n2 - B.mp3\n4 - D.mp3\n");

    cfg.strict_playlist = true;
    let report = generate_playlist(&cfg, &TextTags);
    assert_eq!(report.changed, 2);
    assert!(matches!(report.errors[..], [ScrubError::PlaylistGapMismatch { expected: 3, found: 4 }]));
    assert_eq!(album.read("playlist.m3u"), "1 - A.mp3\n2 - B.mp3\n");
}

#[test]
fn pretend_mode_touches_nothing() {
    let album = Album::new();
    album
        .track_with_art("a.mp3", "2", "B", "png", "IMG")
        .track("b.wav", "1", "A");
    let cfg = Config { pretend: true, ..album.config() };

    assert_eq!(normalize_names(&cfg, &TextTags).changed, 2);
    assert_eq!(extract_art(&cfg, &TextTags).changed, 1);
    assert_eq!(convert_audio(&cfg, &BrokenTranscoder).changed, 2);
    assert_eq!(generate_playlist(&cfg, &TextTags).changed, 2);

    assert_eq!(album.files(), vec!["a.mp3", "b.wav"]);
}
