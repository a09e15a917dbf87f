use std::borrow::Cow;

use url::form_urlencoded;

use crate::layout::calc::MAX_GRID_AXIS;
use crate::source::collection::{CollectionQuery, CollectionType, SubjectType};

const DEFAULT_USERNAME: &str = "sai";

/// Parameters carried in the page's URL hash (`#username=..&subject=..&aspect=2/3`).
///
/// Layout fields are optional overrides for [`crate::WallConfig`]; the rest
/// identifies which collection the wall shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WallParams {
    pub username: String,
    pub subject_type: SubjectType,
    pub collection_type: CollectionType,
    pub aspect_ratio: Option<f64>,
    pub rows: Option<u32>,
    pub padding: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Default for WallParams {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_owned(),
            subject_type: SubjectType::All,
            collection_type: CollectionType::All,
            aspect_ratio: None,
            rows: None,
            padding: None,
            limit: None,
            offset: None,
        }
    }
}

impl WallParams {
    /// Parse a hash fragment, with or without the leading `#`.
    ///
    /// The fragment is read as `application/x-www-form-urlencoded`; the first
    /// occurrence of a key wins. Unknown keys are ignored. Values that do not parse
    /// fall back to the defaults, never to an error.
    pub fn from_hash(hash: &str) -> Self {
        let hash = hash.strip_prefix('#').unwrap_or(hash);
        let pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> =
            form_urlencoded::parse(hash.as_bytes()).collect();
        let get = |key: &str| first_value(&pairs, key);

        let defaults = Self::default();
        Self {
            username: get("username")
                .filter(|v| !v.is_empty())
                .map_or(defaults.username, str::to_owned),
            subject_type: get("subject")
                .and_then(SubjectType::from_name)
                .unwrap_or_default(),
            collection_type: get("collection")
                .and_then(CollectionType::from_name)
                .unwrap_or_default(),
            aspect_ratio: get("aspect")
                .and_then(parse_number)
                .filter(|v| *v > 0.0),
            rows: get("rows")
                .and_then(parse_number)
                .and_then(|v| to_count(v, 1, MAX_GRID_AXIS)),
            padding: get("padding")
                .and_then(parse_number)
                .and_then(|v| to_count(v, 0, u32::MAX)),
            limit: get("limit")
                .and_then(parse_number)
                .and_then(|v| to_count(v, 1, u32::MAX)),
            offset: get("offset")
                .and_then(parse_number)
                .and_then(|v| to_count(v, 0, u32::MAX)),
        }
    }

    /// Collection page the wall should show.
    pub fn query(&self) -> CollectionQuery {
        CollectionQuery {
            username: self.username.clone(),
            subject_type: self.subject_type,
            collection_type: self.collection_type,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Parse a plain number or an `a/b` fraction. Zero denominators and non-finite
/// results are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse().ok()?,
    };
    parsed.is_finite().then_some(parsed)
}

fn first_value<'a>(pairs: &'a [(Cow<'_, str>, Cow<'_, str>)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| &**k == key)
        .map(|(_, v)| &**v)
}

fn to_count(v: f64, min: u32, max: u32) -> Option<u32> {
    let v = v.trunc();
    if v < f64::from(min) || v > f64::from(max) {
        return None;
    }
    Some(v as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/config/params.rs"]
mod tests;
