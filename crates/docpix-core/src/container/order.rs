use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use tracing::debug;

use super::relationships::RelationshipMap;
use super::PackageParts;

/// An in-markup pointer from body content to a media part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbedRef {
    /// DrawingML picture: `<w:drawing> … <a:blip r:embed="rIdN"/>`.
    Structured(String),
    /// VML picture: `<w:pict> … <v:imagedata r:id="rIdN"/>`.
    Legacy(String),
}

impl EmbedRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Structured(id) | Self::Legacy(id) => id,
        }
    }
}

/// One tier of the order-resolution fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStrategy {
    /// Depth-first XML walk of the body collecting both embedding shapes.
    StructuredWalk,
    /// Regex scan of the raw body text for embed-id attributes.
    TextScan,
    /// Media members sorted by the first number in their file name.
    MediaFilename,
}

/// Tiers tried in order until one yields at least one media path.
pub const DEFAULT_CHAIN: &[OrderStrategy] = &[
    OrderStrategy::StructuredWalk,
    OrderStrategy::TextScan,
    OrderStrategy::MediaFilename,
];

impl fmt::Display for OrderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuredWalk => write!(f, "structured walk"),
            Self::TextScan => write!(f, "text scan"),
            Self::MediaFilename => write!(f, "media filename"),
        }
    }
}

impl OrderStrategy {
    /// Run this tier alone. `None` means the tier could not run at all
    /// (no body markup, malformed XML).
    pub fn resolve(&self, parts: &PackageParts) -> Option<Vec<String>> {
        match self {
            Self::StructuredWalk => {
                let body = parts.body.as_deref()?;
                let refs = match collect_embed_refs(body) {
                    Ok(refs) => refs,
                    Err(e) => {
                        debug!("structured walk failed: {e}");
                        return None;
                    }
                };
                Some(resolve_ids(
                    refs.iter().map(EmbedRef::id),
                    &parts.relationships,
                ))
            }
            Self::TextScan => {
                let body = parts.body.as_deref()?;
                Some(resolve_ids(scan_embed_ids(body), &parts.relationships))
            }
            Self::MediaFilename => Some(sort_by_first_number(&parts.media)),
        }
    }
}

/// The winning tier and the ordered, deduplicated media paths it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOrder {
    /// `None` when every tier came back empty.
    pub strategy: Option<OrderStrategy>,
    pub paths: Vec<String>,
}

/// Resolve image reading order with [`DEFAULT_CHAIN`].
pub fn resolve_order(parts: &PackageParts) -> ResolvedOrder {
    resolve_order_with(parts, DEFAULT_CHAIN)
}

/// Resolve image reading order, taking the first non-empty tier of `chain`.
/// Tiers are never merged.
pub fn resolve_order_with(parts: &PackageParts, chain: &[OrderStrategy]) -> ResolvedOrder {
    for strategy in chain {
        match strategy.resolve(parts) {
            Some(paths) if !paths.is_empty() => {
                debug!(%strategy, count = paths.len(), "image order resolved");
                return ResolvedOrder {
                    strategy: Some(*strategy),
                    paths,
                };
            }
            _ => debug!(%strategy, "tier yielded nothing, falling through"),
        }
    }
    ResolvedOrder {
        strategy: None,
        paths: Vec::new(),
    }
}

/// Walk body markup in document order, collecting image references from
/// DrawingML `blip` elements inside `drawing` and VML `imagedata` elements
/// inside `pict`/`object`. Each id is kept at its first position only.
pub fn collect_embed_refs(body: &str) -> Result<Vec<EmbedRef>, quick_xml::Error> {
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut refs = Vec::new();
    let mut seen = HashSet::new();
    let mut drawing_depth = 0usize;
    let mut pict_depth = 0usize;

    loop {
        let (element, is_empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(e) => {
                match e.local_name().as_ref() {
                    b"drawing" => drawing_depth = drawing_depth.saturating_sub(1),
                    b"pict" | b"object" => pict_depth = pict_depth.saturating_sub(1),
                    _ => {}
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let found = match element.local_name().as_ref() {
            b"drawing" => {
                if !is_empty {
                    drawing_depth += 1;
                }
                None
            }
            b"pict" | b"object" => {
                if !is_empty {
                    pict_depth += 1;
                }
                None
            }
            b"blip" if drawing_depth > 0 => {
                prefixed_attr(&element, b"embed").map(EmbedRef::Structured)
            }
            b"imagedata" if pict_depth > 0 => prefixed_attr(&element, b"id").map(EmbedRef::Legacy),
            _ => None,
        };

        if let Some(embed) = found {
            if seen.insert(embed.id().to_string()) {
                refs.push(embed);
            }
        }
    }

    Ok(refs)
}

/// Value of a namespaced attribute (`r:embed`, `r:id`) by local name.
/// Unprefixed attributes of the same local name are ignored.
fn prefixed_attr(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.prefix().is_some() && a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
        .filter(|v| !v.is_empty())
}

static EMBED_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\br:embed\s*=\s*(?:"([^"]+)"|'([^']+)')"#).expect("valid embed regex")
});

/// Text-level scan for embed ids, in order of appearance. Works on markup
/// that is not well-formed XML.
pub fn scan_embed_ids(body: &str) -> Vec<String> {
    EMBED_ATTR
        .captures_iter(body)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Map ids to media paths, dropping unresolved ids and repeated paths.
fn resolve_ids<S: AsRef<str>>(
    ids: impl IntoIterator<Item = S>,
    relationships: &RelationshipMap,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    for id in ids {
        let id = id.as_ref();
        match relationships.get(id) {
            Some(path) => {
                if seen.insert(path) {
                    paths.push(path.to_string());
                }
            }
            None => debug!(id, "reference does not resolve to a media part"),
        }
    }
    paths
}

/// First run of ASCII digits in the final path component, or 0 if none.
pub fn first_number(path: &str) -> u64 {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

/// Sort by [`first_number`], ties broken by the full path.
pub fn sort_by_first_number(paths: &[String]) -> Vec<String> {
    let mut sorted = paths.to_vec();
    sorted.sort_by(|a, b| first_number(a).cmp(&first_number(b)).then_with(|| a.cmp(b)));
    sorted.dedup();
    sorted
}
