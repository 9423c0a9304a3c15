#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Encode a small solid-colour image in `format`.
pub fn encoded_image(format: ImageFormat, width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png_bytes(rgb: [u8; 3]) -> Vec<u8> {
    encoded_image(ImageFormat::Png, 4, 4, rgb)
}

pub fn jpeg_bytes(rgb: [u8; 3]) -> Vec<u8> {
    encoded_image(ImageFormat::Jpeg, 8, 8, rgb)
}

/// Zip `members` in the given storage order.
pub fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, data) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Relationship manifest with one internal image relationship per
/// `(id, target)` pair.
pub fn relationships_xml(rels: &[(&str, &str)]) -> String {
    let mut xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="{RELS_NS}">"#);
    for (id, target) in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="{IMAGE_REL_TYPE}" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Inline DrawingML picture referencing `id`.
pub fn drawing(id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{id}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
    )
}

/// Legacy VML picture referencing `id`.
pub fn vml_picture(id: &str) -> String {
    format!(
        r#"<w:r><w:pict><v:shape><v:imagedata r:id="{id}" o:title=""/></v:shape></w:pict></w:r>"#
    )
}

/// Body markup with the given run fragments, one paragraph each.
pub fn document_xml(runs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office"><w:body>"#,
    );
    for run in runs {
        xml.push_str("<w:p>");
        xml.push_str(run);
        xml.push_str("</w:p>");
    }
    xml.push_str("</w:body></w:document>");
    xml
}

/// Assemble a document container from body markup, relationships and media.
pub fn build_docx(body: &str, rels: &[(&str, &str)], media: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let rels_xml = relationships_xml(rels);
    let mut members: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", b"<Types/>".as_slice()),
        ("word/document.xml", body.as_bytes()),
        ("word/_rels/document.xml.rels", rels_xml.as_bytes()),
    ];
    for (name, data) in media {
        members.push((*name, data.as_slice()));
    }
    build_zip(&members)
}

/// Two images whose storage order is the reverse of their reading order:
/// `image1.png` (red) is stored first but the body shows `image2.png`
/// (blue) first.
pub fn reversed_docx() -> Vec<u8> {
    let body = document_xml(&[drawing("rId8"), drawing("rId7")]);
    build_docx(
        &body,
        &[("rId7", "media/image1.png"), ("rId8", "media/image2.png")],
        &[
            ("word/media/image1.png", png_bytes([255, 0, 0])),
            ("word/media/image2.png", png_bytes([0, 0, 255])),
        ],
    )
}

pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
