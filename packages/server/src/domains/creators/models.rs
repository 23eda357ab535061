//! Creator model - a content-publishing profile
//!
//! Creators are independent of login identities. The slug is the only
//! external routing key and must be unique across all creators.

use serde::{Deserialize, Serialize};

use crate::common::CreatorId;

/// Creator niche
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Niche {
    TechAi,
    Design,
    Fashion,
    Lifestyle,
    Education,
    #[default]
    Other,
    /// Label outside the known set, kept verbatim
    Custom(String),
}

impl Niche {
    pub fn label(&self) -> &str {
        match self {
            Niche::TechAi => "Tech/AI",
            Niche::Design => "Design",
            Niche::Fashion => "Fashion",
            Niche::Lifestyle => "Lifestyle",
            Niche::Education => "Education",
            Niche::Other => "Other",
            Niche::Custom(label) => label,
        }
    }
}

impl From<String> for Niche {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Tech/AI" => Niche::TechAi,
            "Design" => Niche::Design,
            "Fashion" => Niche::Fashion,
            "Lifestyle" => Niche::Lifestyle,
            "Education" => Niche::Education,
            "Other" => Niche::Other,
            _ => Niche::Custom(label),
        }
    }
}

impl From<&str> for Niche {
    fn from(label: &str) -> Self {
        Niche::from(label.to_string())
    }
}

impl From<Niche> for String {
    fn from(niche: Niche) -> Self {
        niche.label().to_string()
    }
}

impl std::fmt::Display for Niche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Social profile links; every platform is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

/// Creator - canonical entity shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: CreatorId,
    pub slug: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub profile_pic_url: String,
    pub niche: Niche,
    pub is_verified: bool,
    pub is_hidden: bool,
    pub followers_count: u64,
    pub socials: Socials,
}

/// Derive a profile slug from a display name
///
/// Lowercases the name and turns every whitespace run into a single `-`.
pub fn slugify(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(slugify("Sarah Design"), "sarah-design");
        assert_eq!(slugify("Devender   AI\tLabs"), "devender-ai-labs");
        assert_eq!(slugify("  "), "");
    }

    #[test]
    fn niche_labels_round_trip() {
        assert_eq!(Niche::from("Tech/AI"), Niche::TechAi);
        assert_eq!(String::from(Niche::TechAi), "Tech/AI");
        assert_eq!(Niche::from("Gaming"), Niche::Custom("Gaming".to_string()));
    }
}
