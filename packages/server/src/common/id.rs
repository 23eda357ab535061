//! Typed identifier wrappers for compile-time type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around the opaque string
//! identifiers the hosted backend assigns. It prevents accidentally mixing up
//! different ID types (e.g., passing a `CreatorId` where a `ResourceId` was
//! expected).
//!
//! Backend identifiers are opaque: some tables hand out integers, others UUIDs.
//! Both deserialize into the same wrapper, and both render back as strings.
//!
//! # Example
//!
//! ```rust
//! use directory_core::common::{CreatorId, ResourceId};
//!
//! let creator_id = CreatorId::from("c1");
//! let resource_id = ResourceId::temporary();
//!
//! assert!(resource_id.is_temporary());
//! assert!(!creator_id.is_temporary());
//!
//! // This would be a compile error:
//! // let wrong: ResourceId = creator_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix of identifiers generated locally for optimistic creates.
pub const TEMPORARY_ID_PREFIX: &str = "tmp-";

/// A typed wrapper around an opaque backend identifier.
///
/// The type parameter `T` represents the entity type this ID belongs to.
pub struct Id<T>(String, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Creates an `Id` from a raw identifier string.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into(), PhantomData)
    }

    /// Creates a locally-generated temporary identifier.
    ///
    /// Temporary identifiers are handed to optimistically created entities and
    /// replaced by the store-assigned identifier once the insert succeeds.
    pub fn temporary() -> Self {
        Self(
            format!("{}{}", TEMPORARY_ID_PREFIX, Uuid::new_v4().simple()),
            PhantomData,
        )
    }

    /// Returns `true` if this identifier was generated locally and has not been
    /// replaced by a store-assigned one yet.
    #[inline]
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMPORARY_ID_PREFIX)
    }

    /// Returns the raw identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the raw identifier.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> AsRef<str> for Id<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> From<String> for Id<T> {
    #[inline]
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<T> From<&str> for Id<T> {
    #[inline]
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::convert::Infallible;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Wire shapes an identifier may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(raw) => Self::new(raw),
            RawId::Integer(raw) => Self::new(raw.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;
    type WidgetId = Id<Widget>;

    #[test]
    fn temporary_ids_are_unique_and_flagged() {
        let a = WidgetId::temporary();
        let b = WidgetId::temporary();
        assert_ne!(a, b);
        assert!(a.is_temporary());
        assert!(a.as_str().starts_with(TEMPORARY_ID_PREFIX));
    }

    #[test]
    fn integer_and_string_ids_deserialize_alike() {
        let from_int: WidgetId = serde_json::from_str("42").unwrap();
        let from_text: WidgetId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_int, from_text);
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "\"42\"");
    }
}
