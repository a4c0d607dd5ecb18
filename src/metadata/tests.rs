use super::model::UNKNOWN_TITLE;
use super::*;
use crate::audio::{LoadId, Signal};
use crate::config::MetadataSettings;
use crate::selection::TrackResource;
use lofty::config::WriteOptions;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::prelude::*;
use lofty::tag::{Tag, TagType};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::tempdir;

/// 0.1s of 8 kHz mono 16-bit silence.
fn write_silent_wav(path: &Path) {
    let data_len: u32 = 1600;
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);
    std::fs::write(path, bytes).unwrap();
}

fn resolver() -> LoftyResolver {
    LoftyResolver::new(&MetadataSettings::default())
}

#[test]
fn fallback_uses_display_name_and_placeholders() {
    let m = Metadata::fallback("track01.mp3");
    assert_eq!(m.title, "track01.mp3");
    assert_eq!(m.artist, UNKNOWN_ARTIST);
    assert!(m.cover.is_default());
}

#[test]
fn from_tags_substitutes_missing_or_blank_fields() {
    let m = Metadata::from_tags(None, Some("   "), CoverImage::Default);
    assert_eq!(m.title, UNKNOWN_TITLE);
    assert_eq!(m.artist, UNKNOWN_ARTIST);

    let m = Metadata::from_tags(Some(" Song "), Some("Band"), CoverImage::Default);
    assert_eq!(m.title, "Song");
    assert_eq!(m.artist, "Band");
}

#[test]
fn embedded_cover_renders_as_data_uri() {
    let cover = CoverImage::Embedded {
        data: b"abc".to_vec(),
        mime_type: "image/png".to_string(),
    };
    assert_eq!(
        cover.to_data_uri().as_deref(),
        Some("data:image/png;base64,YWJj")
    );
    assert_eq!(cover.source("default-cover.png"), "data:image/png;base64,YWJj");
}

#[test]
fn default_cover_renders_as_configured_source() {
    let cover = CoverImage::Default;
    assert_eq!(cover.to_data_uri(), None);
    assert_eq!(cover.source("default-cover.png"), "default-cover.png");
}

#[test]
fn missing_file_resolves_to_fallback() {
    let dir = tempdir().unwrap();
    let resource = TrackResource::new(dir.path().join("gone.mp3"));

    let m = resolver().resolve(&resource);
    assert_eq!(m, Metadata::fallback("gone.mp3"));
}

#[test]
fn unparseable_file_resolves_to_fallback() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noise.xyz");
    std::fs::write(&path, b"definitely not an audio container").unwrap();

    let m = resolver().resolve(&TrackResource::new(&path));
    assert_eq!(m.title, "noise.xyz");
    assert_eq!(m.artist, UNKNOWN_ARTIST);
    assert_eq!(m.cover, CoverImage::Default);
}

#[test]
fn untagged_file_shows_its_file_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("My Song.wav");
    write_silent_wav(&path);

    let m = resolver().resolve(&TrackResource::new(&path));
    assert_eq!(m, Metadata::fallback("My Song.wav"));
}

#[test]
fn tag_without_title_gets_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist-only.wav");
    write_silent_wav(&path);

    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_artist("Nobody".to_string());
    tag.save_to_path(&path, WriteOptions::default()).unwrap();

    let m = resolver().resolve(&TrackResource::new(&path));
    assert_eq!(m.title, UNKNOWN_TITLE);
    assert_eq!(m.artist, "Nobody");
}

fn write_wav_with_cover(path: &Path, cover: &[u8]) {
    write_silent_wav(path);
    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_title("Pictured".to_string());
    tag.push_picture(
        Picture::unchecked(cover.to_vec())
            .pic_type(PictureType::CoverFront)
            .mime_type(MimeType::Png)
            .build(),
    );
    tag.save_to_path(path, WriteOptions::default()).unwrap();
}

#[test]
fn embedded_cover_is_kept_untouched_by_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pictured.wav");
    let cover = vec![7u8; 64 * 1024];
    write_wav_with_cover(&path, &cover);

    let m = resolver().resolve(&TrackResource::new(&path));
    assert_eq!(
        m.cover,
        CoverImage::Embedded {
            data: cover,
            mime_type: "image/png".to_string(),
        }
    );
}

#[test]
fn configured_cover_limit_drops_large_pictures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pictured.wav");
    write_wav_with_cover(&path, &[7u8; 2048]);

    let limited = LoftyResolver::new(&MetadataSettings {
        max_cover_bytes: Some(1024),
    });
    let m = limited.resolve(&TrackResource::new(&path));
    assert_eq!(m.title, "Pictured");
    assert!(m.cover.is_default());
}

#[test]
fn tagged_file_reports_title_and_artist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tagged.wav");
    write_silent_wav(&path);

    let mut tag = Tag::new(TagType::Id3v2);
    tag.set_title("Quiet".to_string());
    tag.set_artist("Nobody".to_string());
    tag.save_to_path(&path, WriteOptions::default()).unwrap();

    let m = resolver().resolve(&TrackResource::new(&path));
    assert_eq!(m.title, "Quiet");
    assert_eq!(m.artist, "Nobody");
    assert!(m.cover.is_default());
}

struct EchoResolver;

impl MetadataResolver for EchoResolver {
    fn resolve(&self, resource: &TrackResource) -> Metadata {
        Metadata::from_tags(
            Some(resource.display_name().as_str()),
            Some("Echo"),
            CoverImage::Default,
        )
    }
}

#[test]
fn worker_reports_results_tagged_with_the_request_load() {
    let (tx, rx) = mpsc::channel();
    let mut worker = spawn_worker(EchoResolver, tx);

    let load = LoadId::default().next();
    worker.request(load, 3, TrackResource::new("/music/x.flac"));

    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        Signal::MetadataResolved {
            load: got,
            index,
            metadata,
        } => {
            assert_eq!(got, load);
            assert_eq!(index, 3);
            assert_eq!(metadata.title, "x.flac");
            assert_eq!(metadata.artist, "Echo");
        }
        other => panic!("unexpected signal: {other:?}"),
    }

    worker.shutdown();
    // Requests after shutdown are dropped silently.
    worker.request(load, 4, TrackResource::new("/music/y.flac"));
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
}

/// Blocks inside `resolve` until the test lets it continue.
struct GatedResolver {
    started: mpsc::Sender<usize>,
    gate: mpsc::Receiver<()>,
}

impl MetadataResolver for GatedResolver {
    fn resolve(&self, resource: &TrackResource) -> Metadata {
        let _ = self.started.send(0);
        let _ = self.gate.recv();
        Metadata::fallback(resource.display_name())
    }
}

#[test]
fn worker_skips_requests_superseded_while_busy() {
    let (tx, rx) = mpsc::channel();
    let (started_tx, started_rx) = mpsc::channel();
    let (gate_tx, gate_rx) = mpsc::channel();
    let worker = spawn_worker(
        GatedResolver {
            started: started_tx,
            gate: gate_rx,
        },
        tx,
    );

    let mut load = LoadId::default();
    load = load.next();
    worker.request(load, 0, TrackResource::new("/music/0.flac"));
    started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    // Queued while the first read is in progress.
    for i in 1..=3 {
        load = load.next();
        worker.request(load, i, TrackResource::new(format!("/music/{i}.flac")));
    }
    gate_tx.send(()).unwrap();
    gate_tx.send(()).unwrap();

    let indices: Vec<usize> = (0..2)
        .map(|_| match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Signal::MetadataResolved { index, .. } => index,
            other => panic!("unexpected signal: {other:?}"),
        })
        .collect();
    assert_eq!(indices, vec![0, 3]);
    assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
}
