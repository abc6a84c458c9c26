use crate::core::store::ListStore;
use crate::domain::model::{Reply, StoreStats};
use crate::domain::ports::{ConfigProvider, Persistence};
use crate::utils::error::Result;
use std::sync::{Mutex, MutexGuard};

/// Mutual-exclusion boundary around a [`ListStore`] for concurrent callers
/// (e.g. a bot runtime handling several chat updates). The lock is held for
/// the whole validate-mutate-persist span of each operation, so the
/// collection invariants and the on-disk state stay consistent under
/// interleaved calls.
pub struct SharedListStore<P: Persistence, C: ConfigProvider> {
    inner: Mutex<ListStore<P, C>>,
}

impl<P: Persistence, C: ConfigProvider> SharedListStore<P, C> {
    pub fn new(store: ListStore<P, C>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    // A poisoned lock still guards consistent data: operations only mutate
    // after validation, so a panicking thread cannot leave a half-applied
    // mutation behind.
    fn lock(&self) -> MutexGuard<'_, ListStore<P, C>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create_list(&self, name: &str) -> Result<Reply> {
        self.lock().create_list(name)
    }

    pub fn add_item(&self, list_name: &str, item: &str) -> Result<Reply> {
        self.lock().add_item(list_name, item)
    }

    pub fn add_items(&self, list_name: &str, raw_items: &str) -> Result<Reply> {
        self.lock().add_items(list_name, raw_items)
    }

    pub fn remove_item(&self, list_name: &str, item: &str) -> Result<Reply> {
        self.lock().remove_item(list_name, item)
    }

    pub fn delete_list(&self, name: &str) -> Result<Reply> {
        self.lock().delete_list(name)
    }

    pub fn show_list(&self, name: &str) -> Result<Reply> {
        self.lock().show_list(name)
    }

    pub fn show_all_lists(&self) -> Reply {
        self.lock().show_all_lists()
    }

    pub fn search(&self, term: &str) -> Result<Reply> {
        self.lock().search(term)
    }

    pub fn stats(&self) -> StoreStats {
        self.lock().stats()
    }

    pub fn into_inner(self) -> ListStore<P, C> {
        self.inner
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
