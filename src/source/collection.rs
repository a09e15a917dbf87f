//! Bangumi collection listing: request URLs and response decoding.
//!
//! Fetching is left to the caller; this module only builds the URL for one page
//! and turns the JSON body of a response into wall [`Item`]s.

use std::collections::HashSet;

use url::Url;

use crate::foundation::error::{WallError, WallResult};
use crate::item::{Item, ItemId};

const API_BASE: &str = "https://api.bgm.tv/v0/users";
const SUBJECT_BASE: &str = "https://bgm.tv/subject";

/// Page size used when the query does not set one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Subject category filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    #[default]
    All,
    Book,
    Anime,
    Music,
    Game,
    Real,
}

impl SubjectType {
    /// Parse a hash value; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "book" => Some(Self::Book),
            "anime" => Some(Self::Anime),
            "music" => Some(Self::Music),
            "game" => Some(Self::Game),
            "real" => Some(Self::Real),
            _ => None,
        }
    }

    /// API code, `None` for [`SubjectType::All`] (no filter).
    pub fn code(self) -> Option<u8> {
        match self {
            Self::All => None,
            Self::Book => Some(1),
            Self::Anime => Some(2),
            Self::Music => Some(3),
            Self::Game => Some(4),
            Self::Real => Some(6),
        }
    }
}

/// Collection state filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionType {
    #[default]
    All,
    Wish,
    Collect,
    Do,
    OnHold,
    Dropped,
}

impl CollectionType {
    /// Parse a hash value; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "wish" => Some(Self::Wish),
            "collect" => Some(Self::Collect),
            "do" => Some(Self::Do),
            "on_hold" => Some(Self::OnHold),
            "dropped" => Some(Self::Dropped),
            _ => None,
        }
    }

    /// API code, `None` for [`CollectionType::All`] (no filter).
    pub fn code(self) -> Option<u8> {
        match self {
            Self::All => None,
            Self::Wish => Some(1),
            Self::Collect => Some(2),
            Self::Do => Some(3),
            Self::OnHold => Some(4),
            Self::Dropped => Some(5),
        }
    }
}

/// One page request against a user's collection.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollectionQuery {
    pub username: String,
    #[serde(default)]
    pub subject_type: SubjectType,
    #[serde(default)]
    pub collection_type: CollectionType,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl CollectionQuery {
    /// Listing URL for this page.
    pub fn api_url(&self) -> WallResult<Url> {
        let mut url = base_url(API_BASE)?;
        url.path_segments_mut()
            .map_err(|()| WallError::collection(format!("'{API_BASE}' cannot take a path")))?
            .push(&self.username)
            .push("collections");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("limit", &self.limit.unwrap_or(DEFAULT_LIMIT).to_string())
                .append_pair("offset", &self.offset.unwrap_or(0).to_string());
            if let Some(code) = self.subject_type.code() {
                query.append_pair("subject_type", &code.to_string());
            }
            if let Some(code) = self.collection_type.code() {
                query.append_pair("type", &code.to_string());
            }
        }
        Ok(url)
    }
}

/// Decoded response page.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionPage {
    /// Total entries in the collection (all pages).
    pub total: u64,
    /// Unique items of this page, in response order.
    pub items: Vec<Item>,
}

#[derive(serde::Deserialize)]
struct RawPage {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    data: Vec<RawEntry>,
}

#[derive(serde::Deserialize)]
struct RawEntry {
    #[serde(default)]
    subject: serde_json::Value,
}

/// Decode a collection listing body.
///
/// Entries without an id or a usable image are skipped; repeated subject ids keep
/// their first occurrence. The full subject object is kept as item metadata.
pub fn parse_collection_response(json: &str) -> WallResult<CollectionPage> {
    let raw: RawPage = serde_json::from_str(json)
        .map_err(|e| WallError::collection(format!("decode collection response: {e}")))?;

    let mut seen = HashSet::<ItemId>::new();
    let mut items = Vec::with_capacity(raw.data.len());
    let mut skipped = 0usize;
    for entry in raw.data {
        let Some(item) = subject_to_item(entry.subject) else {
            skipped += 1;
            continue;
        };
        if seen.insert(item.id.clone()) {
            items.push(item);
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "collection entries without id or image were skipped");
    }

    Ok(CollectionPage {
        total: raw.total,
        items,
    })
}

/// Decode either a plain JSON array of items or a collection listing body.
pub fn parse_item_list(json: &str) -> WallResult<Vec<Item>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    if value.get("data").is_some() {
        return Ok(parse_collection_response(json)?.items);
    }
    Err(WallError::validation(
        "item list must be a JSON array of items or a collection response",
    ))
}

/// Detail page a rendered tile links to.
pub fn subject_url(id: &ItemId) -> WallResult<Url> {
    let mut url = base_url(SUBJECT_BASE)?;
    url.path_segments_mut()
        .map_err(|()| WallError::collection(format!("'{SUBJECT_BASE}' cannot take a path")))?
        .push(id.as_str());
    Ok(url)
}

fn base_url(base: &str) -> WallResult<Url> {
    Url::parse(base).map_err(|e| WallError::collection(format!("parse base url '{base}': {e}")))
}

fn subject_to_item(subject: serde_json::Value) -> Option<Item> {
    let id = match subject.get("id")? {
        serde_json::Value::String(s) if !s.is_empty() => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let images = subject.get("images")?;
    let image = ["common", "large", "medium"]
        .iter()
        .find_map(|k| images.get(*k).and_then(|v| v.as_str()).filter(|s| !s.is_empty()))?
        .to_owned();
    Some(Item {
        id: ItemId(id),
        image,
        meta: subject,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/collection.rs"]
mod tests;
