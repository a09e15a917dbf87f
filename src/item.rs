use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Stable unique identifier of an [`Item`].
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One entry of the user's collection, as supplied by the item source.
///
/// Items are immutable once received and shared between tiles and the reserve
/// pool as `Arc<Item>`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Item {
    /// Stable unique identifier.
    pub id: ItemId,
    /// Displayable image reference (usually a URL).
    pub image: String,
    /// Opaque metadata carried through to the render output.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub meta: serde_json::Value,
}

impl Item {
    /// Build an item without metadata.
    pub fn new(id: impl Into<ItemId>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            meta: serde_json::Value::Null,
        }
    }
}

/// Share items, dropping every repeated id after its first occurrence.
///
/// Returns the unique items in input order and the number of dropped duplicates.
pub fn dedup_items(items: impl IntoIterator<Item = Item>) -> (Vec<Arc<Item>>, usize) {
    let mut seen = HashSet::<ItemId>::new();
    let mut out = Vec::new();
    let mut dropped = 0usize;
    for item in items {
        if seen.insert(item.id.clone()) {
            out.push(Arc::new(item));
        } else {
            dropped += 1;
        }
    }
    (out, dropped)
}
