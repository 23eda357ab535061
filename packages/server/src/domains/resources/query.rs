//! Query engine - derives what a visitor or admin sees from the store
//!
//! Pure functions over borrowed slices. The same inputs always produce the
//! same output order, and nothing here touches the network or the store.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::common::CreatorId;
use crate::domains::creators::Creator;
use crate::domains::resources::models::{Category, Resource, ResourceStatus};

/// Category selector; `All` disables the filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category label
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => category.label() == label,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        if label.is_empty() || label == "All" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        CategoryFilter::from(label.to_string())
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Only(label) => label,
        }
    }
}

/// Display order of the visible list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    TitleAz,
    TitleZa,
    Category,
    /// Keep the store order
    Unsorted,
}

impl SortOrder {
    /// Parse a wire label; unknown labels leave the order untouched
    pub fn parse(label: &str) -> Self {
        match label {
            "newest" => SortOrder::Newest,
            "oldest" => SortOrder::Oldest,
            "title-az" => SortOrder::TitleAz,
            "title-za" => SortOrder::TitleZa,
            "category" => SortOrder::Category,
            _ => SortOrder::Unsorted,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::TitleAz => "title-az",
            SortOrder::TitleZa => "title-za",
            SortOrder::Category => "category",
            SortOrder::Unsorted => "unsorted",
        }
    }

    fn compare(&self, a: &Resource, b: &Resource) -> Ordering {
        match self {
            // Missing dates order as the oldest entries
            SortOrder::Newest => b.date.cmp(&a.date),
            SortOrder::Oldest => a.date.cmp(&b.date),
            SortOrder::TitleAz => compare_text(&a.title, &b.title),
            SortOrder::TitleZa => compare_text(&b.title, &a.title),
            SortOrder::Category => compare_text(a.category.label(), b.category.label()),
            SortOrder::Unsorted => Ordering::Equal,
        }
    }
}

impl From<String> for SortOrder {
    fn from(label: String) -> Self {
        SortOrder::parse(&label)
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.label().to_string()
    }
}

/// Case-insensitive first; on a tie lowercase sorts before uppercase
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Visitor-facing query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceQuery {
    pub category: CategoryFilter,
    pub tag: Option<String>,
    #[serde(rename = "q")]
    pub search_term: String,
    pub sort: SortOrder,
}

impl ResourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

/// Ordered result of a visitor query
///
/// Holds borrowed resources; `iter` can be called any number of times and
/// always yields the same sequence.
#[derive(Debug, Clone)]
pub struct VisibleResources<'a> {
    items: Vec<&'a Resource>,
}

impl<'a> VisibleResources<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Resource> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_owned_vec(&self) -> Vec<Resource> {
        self.iter().cloned().collect()
    }
}

fn creators_by_id(creators: &[Creator]) -> HashMap<&CreatorId, &Creator> {
    creators.iter().map(|creator| (&creator.id, creator)).collect()
}

/// Resources a visitor sees for `query`, in display order
pub fn visible_resources<'a>(
    resources: &'a [Resource],
    creators: &[Creator],
    query: &ResourceQuery,
) -> VisibleResources<'a> {
    let owners = creators_by_id(creators);
    let tag = query.tag.as_deref().filter(|tag| !tag.is_empty());
    let term = query.search_term.to_lowercase();

    let mut items: Vec<&Resource> = resources
        .iter()
        .filter(|resource| resource.is_visible())
        .filter(|resource| query.category.matches(&resource.category))
        .filter(|resource| tag.map_or(true, |tag| resource.tags.iter().any(|t| t == tag)))
        .filter(|resource| {
            term.is_empty() || matches_search(resource, owners.get(&resource.creator_id), &term)
        })
        .collect();

    // sort_by is stable, so ties keep store order
    items.sort_by(|a, b| query.sort.compare(a, b));

    VisibleResources { items }
}

fn matches_search(resource: &Resource, owner: Option<&&Creator>, term: &str) -> bool {
    resource.title.to_lowercase().contains(term)
        || resource
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(term))
        || owner.is_some_and(|creator| creator.display_name.to_lowercase().contains(term))
}

/// Admin moderation list
///
/// Hidden resources are included. `status` narrows to one workflow state and
/// a non-empty `term` matches the title or the owner's display name or
/// username.
pub fn admin_resources<'a>(
    resources: &'a [Resource],
    creators: &[Creator],
    status: Option<ResourceStatus>,
    term: &str,
) -> Vec<&'a Resource> {
    let owners = creators_by_id(creators);
    let term = term.to_lowercase();

    resources
        .iter()
        .filter(|resource| status.map_or(true, |status| resource.status == status))
        .filter(|resource| {
            if term.is_empty() {
                return true;
            }
            let owner = owners.get(&resource.creator_id);
            resource.title.to_lowercase().contains(&term)
                || owner.is_some_and(|creator| {
                    creator.display_name.to_lowercase().contains(&term)
                        || creator.username.to_lowercase().contains(&term)
                })
        })
        .collect()
}

/// Visible resources owned by one creator, in store order
pub fn creator_resources<'a>(resources: &'a [Resource], creator_id: &CreatorId) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|resource| &resource.creator_id == creator_id && resource.is_visible())
        .collect()
}

/// Creators shown to visitors
pub fn visible_creators(creators: &[Creator]) -> Vec<&Creator> {
    creators.iter().filter(|creator| !creator.is_hidden).collect()
}
