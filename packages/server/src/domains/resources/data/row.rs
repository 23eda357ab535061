//! Backend row shape for resources and the mapping to and from it

use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::lenient::{decode_row, lenient, parse_timestamp};
use crate::common::{CreatorId, ResourceId};
use crate::domains::resources::models::{Category, Resource};

/// A `resources` row as the backend returns it (snake_case)
#[derive(Debug, Default, Deserialize)]
pub struct ResourceRow {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ResourceId>,
    #[serde(default, deserialize_with = "lenient")]
    pub creator_id: Option<CreatorId>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    /// Written by manual inserts; only read when `created_at` is missing
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_hidden: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub health: Option<String>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        let date = row
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| row.date.as_deref().and_then(parse_timestamp));

        Resource {
            id: row.id.unwrap_or_else(|| ResourceId::new("")),
            creator_id: row.creator_id.unwrap_or_else(|| CreatorId::new("")),
            title: row.title.unwrap_or_default(),
            description: row.description,
            category: row.category.map(Category::from).unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
            thumbnail_url: row.thumbnail.unwrap_or_default(),
            date,
            url: row.url.unwrap_or_default(),
            is_hidden: row.is_hidden.unwrap_or(false),
            // Unknown workflow states stay out of public view
            status: row
                .status
                .and_then(|status| status.parse().ok())
                .unwrap_or_default(),
            health: row
                .health
                .and_then(|health| health.parse().ok())
                .unwrap_or_default(),
        }
    }
}

/// Map a raw backend row into a `Resource`; never fails
pub fn map_resource(raw: &Value) -> Resource {
    decode_row::<ResourceRow>(raw).into()
}

/// Insert payload for a new resource
///
/// The identifier is left to the store, and the timestamp goes out as
/// `date` because `created_at` belongs to the backend.
pub fn insert_record(resource: &Resource) -> Value {
    json!({
        "creator_id": resource.creator_id,
        "title": resource.title,
        "description": resource.description,
        "category": resource.category,
        "tags": resource.tags,
        "thumbnail": resource.thumbnail_url,
        "url": resource.url,
        "status": resource.status,
        "health": resource.health,
        "is_hidden": resource.is_hidden,
        "date": resource.date.map(|date| date.to_rfc3339()),
    })
}
