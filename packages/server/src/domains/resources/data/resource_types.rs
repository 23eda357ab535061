//! Input types for resource mutations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use typed_builder::TypedBuilder;

use crate::common::CreatorId;
use crate::domains::resources::models::{Category, Resource, ResourceHealth};

pub const DEFAULT_RESOURCE_TITLE: &str = "Untitled";
pub const DEFAULT_RESOURCE_THUMBNAIL: &str = "https://picsum.photos/600/400";
pub const DEFAULT_RESOURCE_URL: &str = "#";

fn default_title() -> String {
    DEFAULT_RESOURCE_TITLE.to_string()
}

fn default_thumbnail() -> String {
    DEFAULT_RESOURCE_THUMBNAIL.to_string()
}

fn default_url() -> String {
    DEFAULT_RESOURCE_URL.to_string()
}

/// Partial update of a resource's editable fields
///
/// Only fields that are `Some` are merged locally and sent to the backend.
/// Workflow fields (`status`, `is_hidden`) are absent; they only
/// change through the moderation machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub thumbnail_url: Option<String>,
    pub url: Option<String>,
    pub health: Option<ResourceHealth>,
}

impl ResourcePatch {
    /// Merge present fields into `resource`
    pub fn apply_to(&self, resource: &mut Resource) {
        if let Some(title) = &self.title {
            resource.title = title.clone();
        }
        if let Some(description) = &self.description {
            resource.description = Some(description.clone());
        }
        if let Some(category) = &self.category {
            resource.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            resource.tags = tags.clone();
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            resource.thumbnail_url = thumbnail_url.clone();
        }
        if let Some(url) = &self.url {
            resource.url = url.clone();
        }
        if let Some(health) = self.health {
            resource.health = health;
        }
    }

    /// Backend update payload containing only the present fields
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(title) = &self.title {
            fields.insert("title".into(), Value::from(title.clone()));
        }
        if let Some(description) = &self.description {
            fields.insert("description".into(), Value::from(description.clone()));
        }
        if let Some(category) = &self.category {
            fields.insert("category".into(), Value::from(category.label()));
        }
        if let Some(tags) = &self.tags {
            fields.insert("tags".into(), Value::from(tags.clone()));
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            fields.insert("thumbnail".into(), Value::from(thumbnail_url.clone()));
        }
        if let Some(url) = &self.url {
            fields.insert("url".into(), Value::from(url.clone()));
        }
        if let Some(health) = self.health {
            fields.insert("health".into(), Value::from(health.to_string()));
        }
        fields
    }
}

/// Fields for a resource created by an admin or by ingestion
#[derive(Debug, Clone, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[builder(field_defaults(setter(into)))]
pub struct NewResource {
    pub creator_id: CreatorId,
    #[serde(default = "default_title")]
    #[builder(default = default_title())]
    pub title: String,
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub description: Option<String>,
    #[serde(default)]
    #[builder(default)]
    pub category: Category,
    #[serde(default)]
    #[builder(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_thumbnail")]
    #[builder(default = default_thumbnail())]
    pub thumbnail_url: String,
    #[serde(default = "default_url")]
    #[builder(default = default_url())]
    pub url: String,
    /// Link health reported by the ingestion process
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    pub health: Option<ResourceHealth>,
}
