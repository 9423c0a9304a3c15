use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::consts::{DOCUMENT_ROOT, MEDIA_PREFIX, MEDIA_TARGET_PREFIX};

/// Relationship id (e.g. `rId7`) to archive path of a media part
/// (e.g. `word/media/image1.png`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipMap {
    targets: HashMap<String, String>,
}

impl RelationshipMap {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    pub fn insert(&mut self, id: impl Into<String>, path: impl Into<String>) {
        self.targets.insert(id.into(), path.into());
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Parse a relationship manifest, keeping only internal media targets.
///
/// Never fails: a malformed manifest yields an empty map so order resolution
/// can fall back to the next strategy.
pub fn parse_relationships(xml: &[u8]) -> RelationshipMap {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut map = RelationshipMap::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let Some((id, path)) = media_relationship(&e) {
                    map.insert(id, path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(
                    position = reader.buffer_position(),
                    "malformed relationship manifest: {e}"
                );
                return RelationshipMap::default();
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(count = map.len(), "parsed media relationships");
    map
}

fn media_relationship(e: &BytesStart) -> Option<(String, String)> {
    let mut id = None;
    let mut target = None;
    let mut external = false;

    for attr in e.attributes().flatten() {
        let value = attr
            .unescape_value()
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        match attr.key.as_ref() {
            b"Id" => id = Some(value),
            b"Target" => target = Some(value),
            b"TargetMode" => external = value.eq_ignore_ascii_case("External"),
            _ => {}
        }
    }

    if external {
        return None;
    }
    let path = media_path_for_target(&target?)?;
    Some((id?, path))
}

/// Root a relationship target in the document namespace, or `None` when it
/// does not point at a media part.
fn media_path_for_target(target: &str) -> Option<String> {
    let target = target.trim_start_matches("./");
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute
            .starts_with(MEDIA_PREFIX)
            .then(|| absolute.to_string());
    }
    target
        .starts_with(MEDIA_TARGET_PREFIX)
        .then(|| format!("{DOCUMENT_ROOT}{target}"))
}
