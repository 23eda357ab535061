use tokio::sync::RwLock;

use super::Entity;
use crate::common::Id;

/// One entity collection, newest first
///
/// Every method takes the lock for the duration of a single in-memory step;
/// callers never hold it across a backend call.
pub struct Collection<T> {
    pub(super) items: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn seed(&self, items: Vec<T>) {
        *self.items.write().await = items;
    }

    /// Owned copy of the current contents
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    pub async fn get(&self, id: &Id<T::Marker>) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub async fn find<P>(&self, predicate: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.items
            .read()
            .await
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    pub async fn contains(&self, id: &Id<T::Marker>) -> bool {
        self.items.read().await.iter().any(|item| item.id() == id)
    }

    pub async fn prepend(&self, item: T) {
        self.items.write().await.insert(0, item);
    }

    /// Swap an identifier in place, leaving every other field untouched
    pub async fn replace_id(&self, from: &Id<T::Marker>, to: Id<T::Marker>) -> bool {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|item| item.id() == from) {
            Some(item) => {
                item.set_id(to);
                true
            }
            None => false,
        }
    }

    /// Remove an entity, returning its position and value
    pub async fn remove(&self, id: &Id<T::Marker>) -> Option<(usize, T)> {
        let mut items = self.items.write().await;
        let index = items.iter().position(|item| item.id() == id)?;
        Some((index, items.remove(index)))
    }

    /// Put an entity back at `index`, clamped to the current length
    pub async fn restore(&self, index: usize, item: T) {
        let mut items = self.items.write().await;
        let index = index.min(items.len());
        items.insert(index, item);
    }

    /// Overwrite the entity with the same id; returns whether it was present
    pub async fn replace(&self, item: T) -> bool {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }
}
