//! Resource model - a link to a tool or template owned by a creator
//!
//! `status` is the editorial workflow axis and `health` is the link-liveness
//! axis; the two never drive each other. A resource is shown to visitors only
//! when it is live and not ghost-hidden.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{CreatorId, ResourceId};

/// Editorial workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// Awaiting review
    #[default]
    Pending,
    Live,
    Broken,
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceStatus::Pending => write!(f, "pending"),
            ResourceStatus::Live => write!(f, "live"),
            ResourceStatus::Broken => write!(f, "broken"),
        }
    }
}

impl std::str::FromStr for ResourceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "pending" => Ok(ResourceStatus::Pending),
            "live" => Ok(ResourceStatus::Live),
            "broken" => Ok(ResourceStatus::Broken),
            _ => Err(anyhow::anyhow!("Invalid resource status: {}", s)),
        }
    }
}

/// Link liveness, maintained outside the moderation workflow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceHealth {
    #[default]
    Ok,
    Error,
}

impl std::fmt::Display for ResourceHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceHealth::Ok => write!(f, "ok"),
            ResourceHealth::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ResourceHealth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "ok" => Ok(ResourceHealth::Ok),
            "error" => Ok(ResourceHealth::Error),
            _ => Err(anyhow::anyhow!("Invalid resource health: {}", s)),
        }
    }
}

/// Resource category
///
/// Labels outside the known set are kept verbatim so malformed rows still
/// round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    AiTools,
    Coding,
    Design,
    Automation,
    Custom(String),
}

impl Category {
    /// Known categories, in display order
    pub const KNOWN: [Category; 4] = [
        Category::AiTools,
        Category::Coding,
        Category::Design,
        Category::Automation,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::AiTools => "AI Tools",
            Category::Coding => "Coding",
            Category::Design => "Design",
            Category::Automation => "Automation",
            Category::Custom(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "AI Tools" => Category::AiTools,
            "Coding" => Category::Coding,
            "Design" => Category::Design,
            "Automation" => Category::Automation,
            _ => Category::Custom(label),
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from(label.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Resource - canonical entity shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: ResourceId,
    pub creator_id: CreatorId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub tags: Vec<String>,
    pub thumbnail_url: String,
    /// Creation timestamp; absent when the backend row carried none
    pub date: Option<DateTime<Utc>>,
    pub url: String,
    pub is_hidden: bool,
    pub status: ResourceStatus,
    pub health: ResourceHealth,
}

impl Resource {
    /// Shown to visitors: live and not ghost-hidden
    pub fn is_visible(&self) -> bool {
        !self.is_hidden && self.status == ResourceStatus::Live
    }

    /// Link monitoring reported the destination as dead
    pub fn is_dead_link(&self) -> bool {
        self.health == ResourceHealth::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_labels_are_preserved() {
        let category = Category::from("Marketing");
        assert_eq!(category, Category::Custom("Marketing".to_string()));
        assert_eq!(category.label(), "Marketing");
        assert_eq!(Category::from("AI Tools"), Category::AiTools);
    }

    #[test]
    fn status_parses_wire_labels() {
        assert_eq!("live".parse::<ResourceStatus>().unwrap(), ResourceStatus::Live);
        assert!("LIVE".parse::<ResourceStatus>().is_err());
        assert_eq!(ResourceStatus::Broken.to_string(), "broken");
    }
}
