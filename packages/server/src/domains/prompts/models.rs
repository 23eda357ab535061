use serde::{Deserialize, Serialize};

use crate::common::PromptId;

/// Generation medium of a prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    #[default]
    Image,
    Video,
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptKind::Image => write!(f, "image"),
            PromptKind::Video => write!(f, "video"),
        }
    }
}

/// TrendingPrompt - canonical entity shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPrompt {
    pub id: PromptId,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub title: String,
    pub prompt: String,
    pub thumbnail_url: String,
    /// Free-form model label, e.g. "Midjourney v6"
    pub model: String,
}
