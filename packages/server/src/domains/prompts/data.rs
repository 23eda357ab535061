use serde::Deserialize;
use serde_json::{json, Value};
use typed_builder::TypedBuilder;

use super::models::{PromptKind, TrendingPrompt};
use crate::common::lenient::{decode_row, lenient};
use crate::common::PromptId;

/// A `trending_prompts` row as the backend returns it
#[derive(Debug, Default, Deserialize)]
pub struct PromptRow {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<PromptId>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<PromptKind>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
}

impl From<PromptRow> for TrendingPrompt {
    fn from(row: PromptRow) -> Self {
        TrendingPrompt {
            id: row.id.unwrap_or_else(|| PromptId::new("")),
            kind: row.kind.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            prompt: row.prompt.unwrap_or_default(),
            thumbnail_url: row.thumbnail.unwrap_or_default(),
            model: row.model.unwrap_or_default(),
        }
    }
}

/// Map a raw backend row into a `TrendingPrompt`; never fails
pub fn map_prompt(raw: &Value) -> TrendingPrompt {
    decode_row::<PromptRow>(raw).into()
}

/// Insert payload for a new prompt
pub fn insert_record(prompt: &TrendingPrompt) -> Value {
    json!({
        "type": prompt.kind,
        "title": prompt.title,
        "prompt": prompt.prompt,
        "thumbnail": prompt.thumbnail_url,
        "model": prompt.model,
    })
}

/// Fields for the admin "Add Prompt" form
#[derive(Debug, Clone, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[builder(field_defaults(setter(into)))]
pub struct NewPrompt {
    #[serde(default, rename = "type")]
    #[builder(default)]
    pub kind: PromptKind,
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    #[builder(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    #[builder(default)]
    pub model: String,
}

impl NewPrompt {
    pub(crate) fn into_prompt(self) -> TrendingPrompt {
        TrendingPrompt {
            id: PromptId::new(""),
            kind: self.kind,
            title: self.title,
            prompt: self.prompt,
            thumbnail_url: self.thumbnail_url,
            model: self.model,
        }
    }
}
