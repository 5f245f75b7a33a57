//! Name lookup for mesh entities.
//!
//! Entities live in creation-ordered vectors; the index maps each unique name
//! to its ID so lookups are O(1) while iteration keeps creation order.

use std::collections::HashMap;

use hx_core::Id;

#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    ids: HashMap<String, Id>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Id> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Register `name`. Returns `false` (and changes nothing) if already taken.
    pub fn insert(&mut self, name: &str, id: Id) -> bool {
        if self.ids.contains_key(name) {
            return false;
        }
        self.ids.insert(name.to_owned(), id);
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_reuse() {
        let mut index = NameIndex::new();
        assert!(index.insert("A", Id::from_index(0)));
        assert!(!index.insert("A", Id::from_index(1)));
        assert_eq!(index.get("A"), Some(Id::from_index(0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn missing_name() {
        let index = NameIndex::new();
        assert!(index.is_empty());
        assert!(!index.contains("nope"));
        assert_eq!(index.get("nope"), None);
    }
}
