use crate::domain::cart::Cart;
use crate::domain::ports::{CartSlot, CartStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory key-value store for carts.
///
/// Uses `Arc<RwLock<HashMap<String, String>>>` and keeps values JSON-encoded,
/// exactly as the persistent back ends do. Clones share the same map, so a
/// booking session and a later checkout session can be handed the same store.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCartStore {
    /// Creates a new, empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw JSON stored under `slot`, if any.
    pub async fn raw(&self, slot: CartSlot) -> Option<String> {
        self.entries.read().await.get(slot.key()).cloned()
    }

    /// Stores raw JSON under `slot` without validating it.
    pub async fn put_raw(&self, slot: CartSlot, json: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(slot.key().to_string(), json.into());
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, slot: CartSlot) -> Result<Option<Cart>> {
        let entries = self.entries.read().await;
        match entries.get(slot.key()) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, slot: CartSlot, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        let mut entries = self.entries.write().await;
        entries.insert(slot.key().to_string(), json);
        Ok(())
    }

    async fn remove(&self, slot: CartSlot) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(slot.key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_cart_store() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_or_merge("Movie X", 2, Some(dec!(10))).unwrap();

        store.save(CartSlot::Live, &cart).await.unwrap();
        let retrieved = store.load(CartSlot::Live).await.unwrap().unwrap();
        assert_eq!(retrieved, cart);

        assert!(store.load(CartSlot::Favorite).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_or_merge("Movie X", 1, Some(dec!(9))).unwrap();

        store.save(CartSlot::Live, &cart).await.unwrap();
        store.save(CartSlot::Favorite, &cart).await.unwrap();
        store.remove(CartSlot::Live).await.unwrap();

        assert!(store.load(CartSlot::Live).await.unwrap().is_none());
        assert_eq!(store.load(CartSlot::Favorite).await.unwrap(), Some(cart));
    }

    #[tokio::test]
    async fn test_values_are_json() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_or_merge("Movie X", 5, Some(dec!(10))).unwrap();
        store.save(CartSlot::Live, &cart).await.unwrap();

        let raw = store.raw(CartSlot::Live).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["movie"], "Movie X");
        assert_eq!(value[0]["seats"], 5);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let store = InMemoryCartStore::new();
        store.put_raw(CartSlot::Live, "not json").await;
        assert!(store.load(CartSlot::Live).await.is_err());
    }
}
