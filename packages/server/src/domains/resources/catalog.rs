//! Fixed discovery catalog and admin dashboard counters

use serde::Serialize;

use crate::domains::resources::models::{Resource, ResourceStatus};

/// Category labels offered by the browse filter, `All` first
pub const CATEGORY_FILTERS: [&str; 5] = ["All", "AI Tools", "Coding", "Design", "Automation"];

pub const TRENDING_TAGS: [&str; 6] = [
    "#AI",
    "#Productivity",
    "#Figma",
    "#Python",
    "#Automation",
    "#NoCode",
];

/// A canned search suggestion and the category it opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: &'static str,
    pub category: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 5] = [
    Suggestion { label: "AI Tools", category: "AI Tools" },
    Suggestion { label: "AI Agents", category: "AI Tools" },
    Suggestion { label: "Automation guides", category: "Automation" },
    Suggestion { label: "Python Scripts", category: "Coding" },
    Suggestion { label: "Figma Components", category: "Design" },
];

/// Suggestions whose label contains `term`, ignoring case
pub fn suggestions(term: &str) -> Vec<Suggestion> {
    let term = term.to_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|suggestion| suggestion.label.to_lowercase().contains(&term))
        .copied()
        .collect()
}

/// Headline numbers on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending: usize,
    /// Resources whose link monitor reported an error, in any status
    pub dead_links: usize,
    pub live: usize,
    pub prompts: usize,
}

impl DashboardStats {
    pub fn compute(resources: &[Resource], prompt_count: usize) -> Self {
        resources.iter().fold(
            DashboardStats {
                prompts: prompt_count,
                ..Default::default()
            },
            |mut stats, resource| {
                match resource.status {
                    ResourceStatus::Pending => stats.pending += 1,
                    ResourceStatus::Live => stats.live += 1,
                    ResourceStatus::Broken => {}
                }
                if resource.is_dead_link() {
                    stats.dead_links += 1;
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CreatorId, ResourceId};
    use crate::domains::resources::models::{Category, ResourceHealth};

    #[test]
    fn suggestions_match_label_substrings() {
        let labels: Vec<_> = suggestions("ai").iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["AI Tools", "AI Agents"]);
        assert_eq!(suggestions("").len(), SUGGESTIONS.len());
        assert!(suggestions("video").is_empty());
    }

    #[test]
    fn stats_count_each_axis_independently() {
        let base = Resource {
            id: ResourceId::from("1"),
            creator_id: CreatorId::from("c1"),
            title: String::new(),
            description: None,
            category: Category::AiTools,
            tags: vec![],
            thumbnail_url: String::new(),
            date: None,
            url: String::new(),
            is_hidden: false,
            status: ResourceStatus::Live,
            health: ResourceHealth::Ok,
        };
        let mut pending_dead = base.clone();
        pending_dead.status = ResourceStatus::Pending;
        pending_dead.health = ResourceHealth::Error;
        let mut hidden_live = base.clone();
        hidden_live.is_hidden = true;

        let stats = DashboardStats::compute(&[base, pending_dead, hidden_live], 4);
        assert_eq!(
            stats,
            DashboardStats {
                pending: 1,
                dead_links: 1,
                live: 2,
                prompts: 4
            }
        );
    }
}
