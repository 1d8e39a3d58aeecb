//! End-to-end runs over a real directory of symlinked JPEGs.
//!
//! Caption drawing needs a system font, so the stamping assertions skip
//! on hosts where no candidate font exists.

#![cfg(unix)]

use image::{ImageFormat, Rgb, RgbImage};
use photostamp::annotate_directory;
use photostamp::operations::locate_font::locate_font;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BACKDROP: Rgb<u8> = Rgb([8, 8, 8]);

/// JPEG content regardless of the path's extension.
fn write_jpeg(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, BACKDROP)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

/// A scan directory plus a `store/` subdirectory for link targets, so the
/// depth-one scan only ever sees the links themselves.
fn scan_dir_with_store() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    fs::create_dir(&store).unwrap();
    (dir, store)
}

/// Whether any pixel is in the caption color's neighborhood. JPEG encoding
/// shifts exact values, so this matches a band around RGB(238, 161, 6).
fn has_caption_ink(image: &RgbImage) -> bool {
    image.pixels().any(|pixel| {
        let [r, g, b] = pixel.0;
        r > 180 && (80..=220).contains(&g) && b < 90
    })
}

#[test]
fn stamps_linked_images_and_tolerates_bad_items() {
    let Some(_) = locate_font() else {
        eprintln!("skipping: no caption font on this host");
        return;
    };

    let (dir, store) = scan_dir_with_store();

    // A well-formed capture: link -> target with a trailing epoch token
    let target = store.join("2017_6_9_8_1496995329075.jpg");
    write_jpeg(&target, 640, 480);
    symlink(&target, dir.path().join("cam0.jpg")).unwrap();

    // A link whose target name has no epoch token
    let bad_target = store.join("noepochhere.jpg");
    write_jpeg(&bad_target, 64, 64);
    symlink(&bad_target, dir.path().join("cam1.jpg")).unwrap();

    // A link with a parseable token but no file behind it
    let gone_target = store.join("gone_1496995329075.jpg");
    symlink(&gone_target, dir.path().join("cam2.jpg")).unwrap();

    // A decodable target whose extension no encoder claims
    let weird_target = store.join("2017_6_9_8_1496995329075.zzz");
    write_jpeg(&weird_target, 64, 64);
    let weird_before = fs::read(&weird_target).unwrap();
    symlink(&weird_target, dir.path().join("cam3.jpg")).unwrap();

    // A plain file that matches the suffix but is no symlink
    write_jpeg(&dir.path().join("plain.jpg"), 32, 32);

    // Unrelated files are never queued
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let summary = annotate_directory(dir.path()).unwrap();

    assert_eq!(summary.queued, 5);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 4);

    let stamped = image::open(&target).unwrap().into_rgb8();
    assert!(has_caption_ink(&stamped), "no caption drawn on the target");

    let untouched = image::open(&bad_target).unwrap().into_rgb8();
    assert!(!has_caption_ink(&untouched), "failed item was modified");

    assert!(!gone_target.exists(), "a failed open materialized its target");
    assert_eq!(
        fs::read(&weird_target).unwrap(),
        weird_before,
        "a failed save modified its target"
    );
}

#[test]
fn overwrites_the_target_not_the_link() {
    let Some(_) = locate_font() else {
        eprintln!("skipping: no caption font on this host");
        return;
    };

    let (dir, store) = scan_dir_with_store();
    let target = store.join("2017_6_9_8_1496995329075.jpg");
    write_jpeg(&target, 512, 512);
    let link = dir.path().join("cam0.jpg");
    symlink(&target, &link).unwrap();

    let summary = annotate_directory(dir.path()).unwrap();
    assert_eq!(summary.processed, 1);

    // The link must still be a link, pointing where it pointed before
    let metadata = fs::symlink_metadata(&link).unwrap();
    assert!(metadata.file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), target);

    let stamped = image::open(&target).unwrap().into_rgb8();
    assert!(has_caption_ink(&stamped), "no caption drawn on the target");
}

#[test]
fn empty_directory_completes_with_zero_counts() {
    let dir = tempfile::tempdir().unwrap();

    match locate_font() {
        Some(_) => {
            let summary = annotate_directory(dir.path()).unwrap();
            assert_eq!(summary.queued, 0);
            assert_eq!(summary.processed, 0);
            assert_eq!(summary.failed, 0);
        }
        // Workers load fonts before draining, so a fontless host fails
        // the launch even with nothing to do
        None => {
            assert!(annotate_directory(dir.path()).is_err());
        }
    }
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("never-created");

    assert!(annotate_directory(&gone).is_err());
}
