mod common;

use std::fs;
use std::path::Path;

use common::*;
use docpix_core::config::ExtractConfig;
use docpix_core::container::{Archive, OrderStrategy};
use docpix_core::error::{DocpixError, ErrorKind, Severity};
use docpix_core::io::extract::{extract_from_archive, extract_images, SkipReason};
use docpix_core::io::sniff::{sniff_file, SniffedFormat};

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_extract_names_follow_reading_order() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "report.docx", &reversed_docx());
    let out = tmp.path().join("out");

    let report = extract_images(&docx, &out, &ExtractConfig::default(), |_, _| {}).unwrap();

    assert_eq!(report.strategy, Some(OrderStrategy::StructuredWalk));
    assert_eq!(report.count(), 2);
    assert_eq!(file_names(&out), vec!["001.png", "002.png"]);
    // 001 is the image shown first (blue), not the one stored first (red)
    let first = image::open(out.join("001.png")).unwrap().to_rgb8();
    assert_eq!(first.get_pixel(0, 0).0, [0, 0, 255]);
    assert_eq!(report.written[0].member, "word/media/image2.png");
}

#[test]
fn test_extension_comes_from_content() {
    let body = document_xml(&[drawing("rId1"), drawing("rId2")]);
    let data = build_docx(
        &body,
        &[("rId1", "media/image1.png"), ("rId2", "media/image2.emf")],
        &[
            // jpeg bytes under a png name
            ("word/media/image1.png", jpeg_bytes([50, 50, 50])),
            ("word/media/image2.emf", png_bytes([1, 1, 1])),
        ],
    );
    let tmp = tempfile::tempdir().unwrap();
    let mut archive = Archive::from_bytes(data).unwrap();

    let report =
        extract_from_archive(&mut archive, tmp.path(), &ExtractConfig::default(), |_, _| {})
            .unwrap();

    assert_eq!(file_names(tmp.path()), vec!["001.jpg", "002.png"]);
    assert_eq!(report.written[0].format, SniffedFormat::Jpeg);
    assert_eq!(
        sniff_file(&tmp.path().join("001.jpg")).unwrap(),
        SniffedFormat::Jpeg
    );
}

#[test]
fn test_non_image_members_skipped_with_gap() {
    let body = document_xml(&[drawing("rId1"), drawing("rId2"), drawing("rId3")]);
    let data = build_docx(
        &body,
        &[
            ("rId1", "media/image1.png"),
            ("rId2", "media/image2.wmf"),
            ("rId3", "media/image3.png"),
        ],
        &[
            ("word/media/image1.png", png_bytes([1, 0, 0])),
            ("word/media/image2.wmf", b"\x01\x00\x09\x00not-raster".to_vec()),
            ("word/media/image3.png", png_bytes([0, 1, 0])),
        ],
    );
    let tmp = tempfile::tempdir().unwrap();
    let mut archive = Archive::from_bytes(data).unwrap();

    let report =
        extract_from_archive(&mut archive, tmp.path(), &ExtractConfig::default(), |_, _| {})
            .unwrap();

    assert_eq!(file_names(tmp.path()), vec!["001.png", "003.png"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].ordinal, 2);
    assert_eq!(report.skipped[0].reason, SkipReason::NotAnImage);
}

#[test]
fn test_missing_manifest_extracts_in_media_name_order() {
    let body = document_xml(&[drawing("rId1"), drawing("rId2")]);
    let img10 = png_bytes([10, 10, 10]);
    let img2 = png_bytes([2, 2, 2]);
    // stored img10 first, no word/_rels/document.xml.rels
    let data = build_zip(&[
        ("word/document.xml", body.as_bytes()),
        ("word/media/img10.png", img10.as_slice()),
        ("word/media/img2.png", img2.as_slice()),
    ]);
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "norels.docx", &data);
    let out = tmp.path().join("out");

    let report = extract_images(&docx, &out, &ExtractConfig::default(), |_, _| {}).unwrap();

    assert_eq!(report.strategy, Some(OrderStrategy::MediaFilename));
    assert_eq!(file_names(&out), vec!["001.png", "002.png"]);
    assert_eq!(fs::read(out.join("001.png")).unwrap(), img2);
    assert_eq!(fs::read(out.join("002.png")).unwrap(), img10);
    assert_eq!(report.written[0].member, "word/media/img2.png");
}

#[test]
fn test_malformed_body_extracts_through_text_scan() {
    // mismatched end tag breaks the XML walk, the embed ids survive in the text
    let body = format!(
        "{}{}{}",
        drawing("rId3"),
        drawing("rId1").replace("</w:drawing>", "</w:drawingX>"),
        drawing("rId2")
    );
    let first = png_bytes([3, 3, 3]);
    let data = build_docx(
        &body,
        &[
            ("rId1", "media/image1.png"),
            ("rId2", "media/image2.png"),
            ("rId3", "media/image3.png"),
        ],
        &[
            ("word/media/image1.png", png_bytes([1, 1, 1])),
            ("word/media/image2.png", png_bytes([2, 2, 2])),
            ("word/media/image3.png", first.clone()),
        ],
    );
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "broken_body.docx", &data);
    let out = tmp.path().join("out");

    let report = extract_images(&docx, &out, &ExtractConfig::default(), |_, _| {}).unwrap();

    assert_eq!(report.strategy, Some(OrderStrategy::TextScan));
    assert_eq!(report.count(), 3);
    assert_eq!(file_names(&out), vec!["001.png", "002.png", "003.png"]);
    assert_eq!(fs::read(out.join("001.png")).unwrap(), first);
    let members: Vec<&str> = report.written.iter().map(|f| f.member.as_str()).collect();
    assert_eq!(
        members,
        vec![
            "word/media/image3.png",
            "word/media/image1.png",
            "word/media/image2.png",
        ]
    );
}

#[test]
fn test_destination_cleared_but_subdirectories_kept() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "doc.docx", &reversed_docx());
    let out = tmp.path().join("out");
    fs::create_dir_all(out.join("keep")).unwrap();
    write_file(&out, "stale.png", b"old");
    write_file(&out, "009.png", b"old");

    extract_images(&docx, &out, &ExtractConfig::default(), |_, _| {}).unwrap();

    assert_eq!(file_names(&out), vec!["001.png", "002.png", "keep"]);
}

#[test]
fn test_keep_existing_refuses_to_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "doc.docx", &reversed_docx());
    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    write_file(&out, "001.png", b"mine");

    let config = ExtractConfig {
        clear_destination: false,
        ..Default::default()
    };
    let err = extract_images(&docx, &out, &config, |_, _| {}).unwrap_err();

    assert!(matches!(err, DocpixError::NameCollision(_)));
    assert_eq!(err.kind(), ErrorKind::NameCollision);
    assert_eq!(fs::read(out.join("001.png")).unwrap(), b"mine");
}

#[test]
fn test_ordinal_width_is_configurable() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "doc.docx", &reversed_docx());
    let config = ExtractConfig {
        ordinal_width: 5,
        ..Default::default()
    };
    extract_images(&docx, tmp.path().join("out").as_path(), &config, |_, _| {}).unwrap();
    assert_eq!(
        file_names(&tmp.path().join("out")),
        vec!["00001.png", "00002.png"]
    );
}

#[test]
fn test_progress_reports_every_reference() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "doc.docx", &reversed_docx());
    let mut calls = Vec::new();
    extract_images(
        &docx,
        &tmp.path().join("out"),
        &ExtractConfig::default(),
        |done, total| calls.push((done, total)),
    )
    .unwrap();
    assert_eq!(calls, vec![(1, 2), (2, 2)]);
}

#[test]
fn test_document_without_images_is_a_warning() {
    let body = document_xml(&["<w:r><w:t>text only</w:t></w:r>".to_string()]);
    let data = build_docx(&body, &[], &[]);
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "plain.docx", &data);

    let err = extract_images(&docx, &tmp.path().join("out"), &ExtractConfig::default(), |_, _| {})
        .unwrap_err();

    assert!(matches!(err, DocpixError::NoImagesFound));
    assert_eq!(err.severity(), Severity::Warning);
}

#[test]
fn test_not_a_zip_is_format_invalid() {
    let tmp = tempfile::tempdir().unwrap();
    let docx = write_file(tmp.path(), "broken.docx", b"this is not a zip file");

    let err = extract_images(&docx, &tmp.path().join("out"), &ExtractConfig::default(), |_, _| {})
        .unwrap_err();

    assert!(matches!(err, DocpixError::InvalidContainer(_)));
    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
    assert_eq!(err.severity(), Severity::Error);
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_missing_body_part_is_format_invalid() {
    let data = build_zip(&[("word/media/image1.png", png_bytes([0, 0, 0]).as_slice())]);
    let tmp = tempfile::tempdir().unwrap();
    let mut archive = Archive::from_bytes(data).unwrap();

    let err = extract_from_archive(&mut archive, tmp.path(), &ExtractConfig::default(), |_, _| {})
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FormatInvalid);
}

#[test]
fn test_empty_paths_are_input_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let err = extract_images(Path::new(""), tmp.path(), &ExtractConfig::default(), |_, _| {})
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputMissing);

    let docx = write_file(tmp.path(), "doc.docx", &reversed_docx());
    let err = extract_images(&docx, Path::new(""), &ExtractConfig::default(), |_, _| {})
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputMissing);
}
