use reqwest::header::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::client::StoreApiClient;
use crate::error::{Result, StoreApiError};

const NAVIGATION_PATH: &str = "navigation/main-navigation/main-navigation";
const NAVIGATION_DEPTH: u32 = 2;

/// A category as the menu wants it: named, with pruned children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// Translated name when there is one. Empty only for a nameless node that
    /// survived because it still has children.
    pub name: String,
    pub children: Vec<Category>,
    pub has_children: bool,
}

impl Category {
    /// Depth-first lookup of a category by id, including `self`
    pub fn find(&self, id: &str) -> Option<&Category> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Category node exactly as the navigation endpoint returns it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_name")]
    pub name: Option<String>,
    /// `{ "name": ... }` normally, but the backend also sends `[]` or `null`
    #[serde(default)]
    pub translated: Option<Value>,
    /// Entries that aren't category objects come through as `None`
    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Option<Vec<Option<RawCategory>>>,
}

impl RawCategory {
    /// Translated name first, then the base name. Empty strings don't count.
    pub fn display_name(&self) -> Option<&str> {
        let translated = self
            .translated
            .as_ref()
            .and_then(|t| t.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty());

        translated.or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
    }
}

// Ids are hex strings in practice; tolerate numbers and null too.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "category id must be a string or number, got {}",
            other
        ))),
    }
}

// Numeric names are shown as-is; anything else that isn't a string is no name.
fn deserialize_name<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_children<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<Option<RawCategory>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(decode_node).collect()),
        _ => None,
    })
}

/// Decode one tree entry; a bad entry is pruned instead of failing the tree
fn decode_node(value: Value) -> Option<RawCategory> {
    if !value.is_object() {
        if !value.is_null() {
            debug!("Dropping navigation entry that is not an object: {}", value);
        }
        return None;
    }

    match serde_json::from_value(value) {
        Ok(raw) => Some(raw),
        Err(e) => {
            debug!("Dropping undecodable navigation entry: {}", e);
            None
        }
    }
}

/// Normalize one node and everything below it
///
/// Returns `None` when the node has no usable name and no children survive
/// normalization. Null children are dropped; order is preserved.
pub fn normalize(raw: &RawCategory) -> Option<Category> {
    let children: Vec<Category> = raw
        .children
        .iter()
        .flatten()
        .flatten()
        .filter_map(normalize)
        .collect();

    let name = raw.display_name();
    if name.is_none() && children.is_empty() {
        return None;
    }

    Some(Category {
        id: raw.id.clone(),
        name: name.unwrap_or_default().to_string(),
        has_children: !children.is_empty(),
        children,
    })
}

/// Normalize a list of roots, dropping nulls and pruned nodes
pub fn normalize_roots(roots: &[Option<RawCategory>]) -> Vec<Category> {
    roots.iter().flatten().filter_map(normalize).collect()
}

/// Parse a navigation response body into normalized roots
///
/// A bare object is treated as a single root.
pub fn parse_navigation(body: &str) -> Result<Vec<Category>> {
    let data: Value = serde_json::from_str(body)?;

    let roots = match data {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(StoreApiError::BadFormat(
                "Invalid data format from the API".to_string(),
            ))
        }
    };

    let raw: Vec<Option<RawCategory>> = roots.into_iter().map(decode_node).collect();

    Ok(normalize_roots(&raw))
}

/// Fixed request body: depth 2, built as a tree, trimmed to what the menu uses
pub fn navigation_request_body() -> Value {
    json!({
        "depth": NAVIGATION_DEPTH,
        "buildTree": true,
        "includes": {
            "category": ["id", "name", "parent", "children", "translated"],
            "media": ["url"]
        }
    })
}

impl StoreApiClient {
    /// Fetch the main navigation tree and normalize it
    pub async fn fetch_navigation(&self) -> Result<Vec<Category>> {
        let result = async {
            let body = self
                .post_json(NAVIGATION_PATH, &navigation_request_body(), HeaderMap::new())
                .await?;
            parse_navigation(&body)
        }
        .await;

        match &result {
            Ok(categories) => debug!("Loaded {} root categories", categories.len()),
            Err(e) => error!("Navigation fetch error: {}", e),
        }

        result
    }
}
