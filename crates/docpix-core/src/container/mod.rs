//! Zip-packaged document containers: archive access, relationship
//! manifests and recovery of image reading order.

pub mod archive;
pub mod order;
pub mod relationships;

pub use archive::Archive;
pub use order::{resolve_order, resolve_order_with, EmbedRef, OrderStrategy, ResolvedOrder};
pub use relationships::{parse_relationships, RelationshipMap};

/// Everything order resolution reads from a container, lifted out once.
#[derive(Clone, Debug, Default)]
pub struct PackageParts {
    /// Main body markup, if the part exists.
    pub body: Option<String>,
    pub relationships: RelationshipMap,
    /// Media member paths in storage order.
    pub media: Vec<String>,
}
