//! Raw backend rows for seeding the mock data store.
//!
//! Rows use the backend's snake_case wire names so every test also goes
//! through the data mapper.

use serde_json::{json, Value};

/// A visible, verified creator
pub fn creator_row(id: &str, display_name: &str) -> Value {
    json!({
        "id": id,
        "slug": display_name.to_lowercase().replace(' ', "-"),
        "username": format!("@{}", display_name.to_lowercase().replace(' ', "")),
        "display_name": display_name,
        "bio": "Builds things in public",
        "profile_pic": "https://cdn.example.com/avatars/a.png",
        "niche": "Tech/AI",
        "is_verified": true,
        "is_hidden": false,
        "followers_count": 1200,
        "socials": { "twitter": "https://twitter.com/example" }
    })
}

pub fn hidden_creator_row(id: &str, display_name: &str) -> Value {
    let mut row = creator_row(id, display_name);
    row["is_hidden"] = json!(true);
    row
}

/// A resource row in the given workflow state
pub fn resource_row(id: &str, creator_id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "creator_id": creator_id,
        "title": title,
        "description": format!("{} explained", title),
        "category": "AI Tools",
        "tags": ["#AI"],
        "thumbnail": "https://cdn.example.com/thumbnails/t.png",
        "url": "https://example.com/resource",
        "created_at": "2024-03-01T12:00:00+00:00",
        "is_hidden": false,
        "status": status,
        "health": "ok"
    })
}

pub fn prompt_row(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "type": "image",
        "title": title,
        "prompt": "a lighthouse at dusk, volumetric fog",
        "thumbnail": "https://cdn.example.com/thumbnails/p.png",
        "model": "Midjourney v6"
    })
}
