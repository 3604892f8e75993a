//! Per-node context entries.
//!
//! Nodes typically hold zero to a handful of entries, so a small vector with
//! linear search beats hashing here. Insertion order is kept for `own_keys`.

use crate::types::{ContextKey, ContextValue};

/// Context entries registered at one node.
#[derive(Default)]
pub(crate) struct Entries {
    items: Vec<(ContextKey, ContextValue)>,
}

impl Entries {
    /// Bind `value` to `key`. Returns true when an earlier binding was replaced.
    pub(crate) fn insert(&mut self, key: ContextKey, value: ContextValue) -> bool {
        match self.items.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => {
                self.items.push((key, value));
                false
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&ContextValue> {
        self.items
            .iter()
            .find(|(existing, _)| existing.as_str() == key)
            .map(|(_, value)| value)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &ContextKey> {
        self.items.iter().map(|(key, _)| key)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn key(name: &str) -> ContextKey {
        ContextKey::new(name).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut entries = Entries::default();
        assert!(!entries.insert(key("a"), Rc::new(1u8)));
        assert!(entries.contains("a"));
        assert!(!entries.contains("b"));
        assert_eq!(entries.keys().count(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut entries = Entries::default();
        entries.insert(key("a"), Rc::new(1u8));
        assert!(entries.insert(key("a"), Rc::new(2u8)));
        assert_eq!(entries.keys().count(), 1);

        let value = entries.get("a").unwrap().clone();
        assert_eq!(*value.downcast::<u8>().unwrap(), 2);
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let mut entries = Entries::default();
        entries.insert(key("z"), Rc::new(()));
        entries.insert(key("a"), Rc::new(()));
        entries.insert(key("z"), Rc::new(()));

        let keys: Vec<&str> = entries.keys().map(ContextKey::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }
}
