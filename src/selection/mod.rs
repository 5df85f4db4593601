use crate::catalog::{IdentityKey, Product};
use crate::error::StorageError;
use tracing::{debug, warn};

pub mod store;

use store::KeyValueStore;

pub const STORAGE_KEY: &str = "selectedProducts";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<Product>,
}

impl Selection {
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.position(key).is_some()
    }

    fn position(&self, key: &IdentityKey) -> Option<usize> {
        self.items.iter().position(|item| item.matches(key))
    }

    pub fn toggle(&mut self, product: &Product) -> bool {
        match self.position(&product.key()) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(product.clone());
                true
            }
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<Product> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.items)?;
        store.set(STORAGE_KEY, payload)
    }

    // Duplicate identity keys in stored data are dropped, first one wins.
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(STORAGE_KEY) else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => {
                let mut selection = Self::default();
                for product in products {
                    if !selection.contains(&product.key()) {
                        selection.items.push(product);
                    }
                }
                debug!("restored {} selected products", selection.len());
                selection
            }
            Err(err) => {
                warn!("discarding stored selection: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::store::MemoryStore;
    use super::*;
    use crate::catalog::fixtures::sample;

    #[test]
    fn toggling_twice_restores_original_sequence() {
        let products = sample();
        let mut selection = Selection::default();
        selection.toggle(&products[0]);
        selection.toggle(&products[2]);
        let before = selection.clone();

        assert!(selection.toggle(&products[1]));
        assert!(!selection.toggle(&products[1]));
        assert_eq!(selection, before);
    }

    #[test]
    fn toggle_appends_at_end_and_removes_by_identity() {
        let products = sample();
        let mut selection = Selection::default();
        selection.toggle(&products[0]);
        selection.toggle(&products[1]);
        selection.toggle(&products[2]);

        assert!(selection.toggle(&products[3]));
        assert_eq!(selection.len(), 4);
        assert_eq!(selection.items().last(), Some(&products[3]));

        assert!(!selection.toggle(&products[1]));
        assert_eq!(selection.len(), 3);
        assert!(!selection.contains(&products[1].key()));
        assert_eq!(
            selection.items(),
            &[products[0].clone(), products[2].clone(), products[3].clone()]
        );
    }

    #[test]
    fn toggle_matches_on_name_and_brand_only() {
        let products = sample();
        let mut selection = Selection::default();
        selection.toggle(&products[0]);

        let mut lookalike = products[0].clone();
        lookalike.image = "https://img.example/other.png".to_string();
        lookalike.description = None;
        assert!(!selection.toggle(&lookalike));
        assert!(selection.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let products = sample();
        let mut selection = Selection::default();
        selection.toggle(&products[0]);

        assert!(selection.remove(5).is_none());
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.remove(0), Some(products[0].clone()));
        assert!(selection.is_empty());
    }

    #[test]
    fn persist_then_restore_keeps_order() {
        let products = sample();
        let store = MemoryStore::new();
        let mut selection = Selection::default();
        selection.toggle(&products[3]);
        selection.toggle(&products[0]);
        selection.persist(&store).expect("persist should succeed");

        assert_eq!(Selection::restore(&store), selection);
    }

    #[test]
    fn restore_tolerates_malformed_payloads() {
        for payload in [
            "",
            "   ",
            "not json",
            "{\"name\": \"x\"}",
            "[1, 2, 3]",
            "[{\"name\": \"missing fields\"}]",
            "null",
            "\"[]\"",
        ] {
            let store = MemoryStore::with_entry(STORAGE_KEY, payload);
            assert!(
                Selection::restore(&store).is_empty(),
                "payload {payload:?} should restore empty"
            );
        }
    }

    #[test]
    fn restore_without_stored_value_is_empty() {
        assert!(Selection::restore(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn restore_drops_duplicate_identity_keys() {
        let products = sample();
        let payload = serde_json::to_string(&vec![
            products[0].clone(),
            products[1].clone(),
            products[0].clone(),
        ])
        .expect("fixture should serialize");
        let store = MemoryStore::with_entry(STORAGE_KEY, &payload);

        let selection = Selection::restore(&store);
        assert_eq!(selection.items(), &[products[0].clone(), products[1].clone()]);
    }
}
