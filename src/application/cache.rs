//! Ordered in-memory copy of one remote collection.

use crate::domain::entities::Record;

/// Insertion order is display order; new records go to the front. Ids are
/// not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCache<T> {
    items: Vec<T>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> ListCache<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Id for a locally created record: `max(ids, 0) + 1`.
    pub fn next_id(&self) -> i64 {
        self.items.iter().map(Record::id).fold(0, i64::max) + 1
    }

    pub fn min_id(&self) -> Option<i64> {
        self.items.iter().map(Record::id).min()
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Apply `change` to every record with the given id; returns how many
    /// matched.
    pub fn update_where(&mut self, id: i64, mut change: impl FnMut(&mut T)) -> usize {
        let mut touched = 0;
        for item in self.items.iter_mut().filter(|item| item.id() == id) {
            change(item);
            touched += 1;
        }
        touched
    }

    /// Drop every record with the given id; returns how many were removed.
    pub fn remove(&mut self, id: i64) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        before - self.items.len()
    }
}
