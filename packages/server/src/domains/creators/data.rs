//! Creator wire rows, mutation inputs and the mapping between them

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use typed_builder::TypedBuilder;

use super::models::{Creator, Niche, Socials};
use crate::common::lenient::{decode_row, lenient};
use crate::common::CreatorId;

/// A `creators` row as the backend returns it (snake_case)
#[derive(Debug, Default, Deserialize)]
pub struct CreatorRow {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<CreatorId>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub profile_pic: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub niche: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_verified: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_hidden: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub followers_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub socials: Option<Socials>,
}

impl From<CreatorRow> for Creator {
    fn from(row: CreatorRow) -> Self {
        Creator {
            id: row.id.unwrap_or_else(|| CreatorId::new("")),
            slug: row.slug.unwrap_or_default(),
            username: row.username.unwrap_or_default(),
            display_name: row.display_name.unwrap_or_default(),
            bio: row.bio.unwrap_or_default(),
            profile_pic_url: row.profile_pic.unwrap_or_default(),
            niche: row.niche.map(Niche::from).unwrap_or_default(),
            is_verified: row.is_verified.unwrap_or(false),
            is_hidden: row.is_hidden.unwrap_or(false),
            followers_count: row.followers_count.unwrap_or(0),
            socials: row.socials.unwrap_or_default(),
        }
    }
}

/// Map a raw backend row into a `Creator`; never fails
pub fn map_creator(raw: &Value) -> Creator {
    decode_row::<CreatorRow>(raw).into()
}

/// Insert payload for a new creator
pub fn insert_record(creator: &Creator) -> Value {
    json!({
        "slug": creator.slug,
        "username": creator.username,
        "display_name": creator.display_name,
        "niche": creator.niche,
        "profile_pic": creator.profile_pic_url,
        "bio": creator.bio,
        "is_verified": creator.is_verified,
        "is_hidden": creator.is_hidden,
        "followers_count": creator.followers_count,
        "socials": creator.socials,
    })
}

/// Fields for the admin "New Profile" form
#[derive(Debug, Clone, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[builder(field_defaults(setter(into)))]
pub struct NewCreator {
    pub username: String,
    pub display_name: String,
    #[serde(default = "default_niche")]
    #[builder(default = default_niche())]
    pub niche: Niche,
    #[serde(default)]
    #[builder(default)]
    pub bio: String,
    #[serde(default)]
    #[builder(default)]
    pub profile_pic_url: String,
}

fn default_niche() -> Niche {
    Niche::TechAi
}

/// Partial update of a creator
///
/// The slug is not editable: it is the routing key for the profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatorPatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub niche: Option<Niche>,
    pub bio: Option<String>,
    pub profile_pic_url: Option<String>,
    pub is_verified: Option<bool>,
    pub is_hidden: Option<bool>,
    pub followers_count: Option<u64>,
    pub socials: Option<Socials>,
}

impl CreatorPatch {
    pub fn is_empty(&self) -> bool {
        self.to_wire().is_empty()
    }

    /// Merge present fields into `creator`
    pub fn apply_to(&self, creator: &mut Creator) {
        if let Some(username) = &self.username {
            creator.username = username.clone();
        }
        if let Some(display_name) = &self.display_name {
            creator.display_name = display_name.clone();
        }
        if let Some(niche) = &self.niche {
            creator.niche = niche.clone();
        }
        if let Some(bio) = &self.bio {
            creator.bio = bio.clone();
        }
        if let Some(profile_pic_url) = &self.profile_pic_url {
            creator.profile_pic_url = profile_pic_url.clone();
        }
        if let Some(is_verified) = self.is_verified {
            creator.is_verified = is_verified;
        }
        if let Some(is_hidden) = self.is_hidden {
            creator.is_hidden = is_hidden;
        }
        if let Some(followers_count) = self.followers_count {
            creator.followers_count = followers_count;
        }
        if let Some(socials) = &self.socials {
            creator.socials = socials.clone();
        }
    }

    /// Backend update payload containing only the present fields
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(username) = &self.username {
            fields.insert("username".into(), json!(username));
        }
        if let Some(display_name) = &self.display_name {
            fields.insert("display_name".into(), json!(display_name));
        }
        if let Some(niche) = &self.niche {
            fields.insert("niche".into(), json!(niche.label()));
        }
        if let Some(bio) = &self.bio {
            fields.insert("bio".into(), json!(bio));
        }
        if let Some(profile_pic_url) = &self.profile_pic_url {
            fields.insert("profile_pic".into(), json!(profile_pic_url));
        }
        if let Some(is_verified) = self.is_verified {
            fields.insert("is_verified".into(), json!(is_verified));
        }
        if let Some(is_hidden) = self.is_hidden {
            fields.insert("is_hidden".into(), json!(is_hidden));
        }
        if let Some(followers_count) = self.followers_count {
            fields.insert("followers_count".into(), json!(followers_count));
        }
        if let Some(socials) = &self.socials {
            fields.insert("socials".into(), json!(socials));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_row_and_defaults_missing_socials() {
        let creator = map_creator(&json!({
            "id": "c1",
            "slug": "devender",
            "username": "devender",
            "display_name": "Devender AI",
            "profile_pic": "https://example.com/p.png",
            "is_verified": true,
            "niche": "Tech/AI",
            "followers_count": 14200
        }));

        assert_eq!(creator.display_name, "Devender AI");
        assert_eq!(creator.profile_pic_url, "https://example.com/p.png");
        assert!(creator.is_verified);
        assert!(!creator.is_hidden);
        assert_eq!(creator.niche, Niche::TechAi);
        assert_eq!(creator.followers_count, 14200);
        assert_eq!(creator.socials, Socials::default());
    }

    #[test]
    fn negative_follower_counts_default_to_zero() {
        let creator = map_creator(&json!({ "id": "c9", "followers_count": -5 }));
        assert_eq!(creator.followers_count, 0);
    }

    #[test]
    fn partial_socials_keep_present_platforms() {
        let creator = map_creator(&json!({
            "id": "c2",
            "socials": { "instagram": "https://instagram.com/sarah" }
        }));
        assert_eq!(
            creator.socials.instagram.as_deref(),
            Some("https://instagram.com/sarah")
        );
        assert_eq!(creator.socials.youtube, None);
    }

    #[test]
    fn patch_wire_uses_backend_names() {
        let patch = CreatorPatch {
            display_name: Some("Sarah D".to_string()),
            is_verified: Some(true),
            ..Default::default()
        };
        let wire = patch.to_wire();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire["display_name"], "Sarah D");
        assert_eq!(wire["is_verified"], true);
        assert!(!patch.is_empty());
        assert!(CreatorPatch::default().is_empty());
    }
}
