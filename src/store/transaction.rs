//! Scoped all-or-nothing mutation

use std::ops::{Deref, DerefMut};

use tracing::debug;

use super::GeometryStore;

/// Exclusive, rollback-on-drop access to a store
///
/// Mutations go through the guard (it derefs to the store). Calling
/// [`Transaction::commit`] keeps them; [`Transaction::rollback`] or dropping
/// the guard by any other path, including `?` and panics, restores the
/// state captured when the transaction began.
pub struct Transaction<'a, S: GeometryStore> {
    store: &'a mut S,
    savepoint: Option<S::Savepoint>,
}

impl<'a, S: GeometryStore> Transaction<'a, S> {
    pub fn begin(store: &'a mut S) -> Self {
        let savepoint = store.savepoint();
        debug!("transaction opened");
        Self {
            store,
            savepoint: Some(savepoint),
        }
    }

    pub fn commit(mut self) {
        self.savepoint = None;
        debug!("transaction committed");
    }

    pub fn rollback(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(savepoint) = self.savepoint.take() {
            self.store.restore(savepoint);
            debug!("transaction rolled back");
        }
    }
}

impl<S: GeometryStore> Deref for Transaction<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: GeometryStore> DerefMut for Transaction<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.store
    }
}

impl<S: GeometryStore> Drop for Transaction<'_, S> {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::store::MemoryStore;

    #[test]
    fn test_commit_keeps_changes() {
        let mut store = MemoryStore::new();
        let mut tx = Transaction::begin(&mut store);
        tx.create_definition("Widget", Point3::origin()).unwrap();
        tx.commit();
        assert!(store.has_definition("Widget"));
    }

    #[test]
    fn test_drop_rolls_back() {
        let mut store = MemoryStore::new();
        {
            let mut tx = Transaction::begin(&mut store);
            tx.create_definition("Widget", Point3::origin()).unwrap();
        }
        assert!(!store.has_definition("Widget"));
    }

    #[test]
    fn test_explicit_rollback() {
        let mut store = MemoryStore::new();
        let before = store.clone();
        let mut tx = Transaction::begin(&mut store);
        tx.add_entity(
            "0",
            crate::geometry::Geometry::Text {
                position: Point3::origin(),
                content: "x".to_string(),
                height: 1.0,
            },
        );
        tx.rollback();
        assert_eq!(store, before);
    }
}
