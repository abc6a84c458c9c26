use crate::domain::model::{BatchReport, ListCollection, Reply, SearchHit, StoreStats};
use crate::domain::ports::{ConfigProvider, Persistence};
use crate::utils::error::{ErrorKind, Result, StoreError};
use crate::utils::validation;

/// The list-storage-and-mutation engine.
///
/// Owns the in-memory collection, validates every operation against the
/// configured limits, and flushes to the persistence collaborator after each
/// mutation. Operations return a typed [`Reply`] or [`StoreError`]; rendering
/// to text happens at the caller's presentation boundary via `Display`.
pub struct ListStore<P: Persistence, C: ConfigProvider> {
    collection: ListCollection,
    persistence: P,
    config: C,
}

impl<P: Persistence, C: ConfigProvider> ListStore<P, C> {
    pub fn new(persistence: P, config: C) -> Self {
        let collection = persistence.load();
        Self {
            collection,
            persistence,
            config,
        }
    }

    pub fn collection(&self) -> &ListCollection {
        &self.collection
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn create_list(&mut self, name: &str) -> Result<Reply> {
        logged("create list", name, self.create_list_inner(name))
    }

    fn create_list_inner(&mut self, name: &str) -> Result<Reply> {
        let name = validation::validate_list_name(name, self.config.max_list_name_length())?;

        if self.collection.len() >= self.config.max_lists() {
            return Err(StoreError::TooManyLists {
                max_lists: self.config.max_lists(),
            });
        }

        if self.collection.resolve(name).is_some() {
            return Err(StoreError::ListExists {
                name: name.to_string(),
            });
        }

        self.collection.insert(name.to_string());
        self.persist()?;

        tracing::info!("Created list: {}", name);
        Ok(Reply::ListCreated {
            name: name.to_string(),
        })
    }

    pub fn add_item(&mut self, list_name: &str, item: &str) -> Result<Reply> {
        logged("add item to", list_name, self.add_item_inner(list_name, item))
    }

    fn add_item_inner(&mut self, list_name: &str, item: &str) -> Result<Reply> {
        let item = validation::validate_item(item, self.config.max_item_length())?;
        let max_items = self.config.max_items_per_list();

        let (stored, items) = self
            .collection
            .resolve_entry_mut(list_name)
            .ok_or_else(|| StoreError::ListNotFound {
                name: list_name.trim().to_string(),
            })?;
        let stored = stored.to_string();

        if items.len() >= max_items {
            return Err(StoreError::TooManyItems { max_items });
        }

        if items.iter().any(|existing| existing == item) {
            return Err(StoreError::ItemExists {
                list: stored,
                item: item.to_string(),
            });
        }

        items.push(item.to_string());
        self.persist()?;

        tracing::info!("Added '{}' to '{}'", item, stored);
        Ok(Reply::ItemAdded {
            list: stored,
            item: item.to_string(),
        })
    }

    /// Quick-add: a comma-separated batch in one pass, partitioned into
    /// added / skipped (duplicate) / failed (invalid) items.
    pub fn add_items(&mut self, list_name: &str, raw_items: &str) -> Result<Reply> {
        logged(
            "add items to",
            list_name,
            self.add_items_inner(list_name, raw_items),
        )
    }

    fn add_items_inner(&mut self, list_name: &str, raw_items: &str) -> Result<Reply> {
        let max_items = self.config.max_items_per_list();
        let max_item_len = self.config.max_item_length();

        let (stored, items) = self
            .collection
            .resolve_entry_mut(list_name)
            .ok_or_else(|| StoreError::ListNotFound {
                name: list_name.trim().to_string(),
            })?;
        let stored = stored.to_string();

        let candidates: Vec<&str> = raw_items
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();

        if candidates.is_empty() {
            return Err(StoreError::EmptyBatch);
        }

        // All-or-nothing capacity pre-check; invalid candidates still count.
        if items.len() + candidates.len() > max_items {
            return Err(StoreError::BatchTooLarge {
                count: candidates.len(),
                max_items,
            });
        }

        let mut report = BatchReport::default();
        for candidate in candidates {
            match validation::validate_item(candidate, max_item_len) {
                Err(_) => report.failed.push(candidate.to_string()),
                Ok(item) => {
                    if items.iter().any(|existing| existing == item) {
                        report.skipped.push(item.to_string());
                    } else {
                        items.push(item.to_string());
                        report.added.push(item.to_string());
                    }
                }
            }
        }

        if !report.added.is_empty() {
            self.persist()?;
            tracing::info!("Added {} items to '{}'", report.added.len(), stored);
        }

        Ok(Reply::BatchProcessed {
            list: stored,
            report,
        })
    }

    pub fn remove_item(&mut self, list_name: &str, item: &str) -> Result<Reply> {
        logged(
            "remove item from",
            list_name,
            self.remove_item_inner(list_name, item),
        )
    }

    fn remove_item_inner(&mut self, list_name: &str, item: &str) -> Result<Reply> {
        let item = item.trim();

        let (stored, items) = self
            .collection
            .resolve_entry_mut(list_name)
            .ok_or_else(|| StoreError::ListNotFound {
                name: list_name.trim().to_string(),
            })?;
        let stored = stored.to_string();

        let Some(position) = items.iter().position(|existing| existing == item) else {
            return Err(StoreError::ItemNotFound {
                list: stored,
                item: item.to_string(),
            });
        };

        items.remove(position);
        self.persist()?;

        tracing::info!("Removed '{}' from '{}'", item, stored);
        Ok(Reply::ItemRemoved {
            list: stored,
            item: item.to_string(),
        })
    }

    pub fn delete_list(&mut self, name: &str) -> Result<Reply> {
        logged("delete list", name, self.delete_list_inner(name))
    }

    fn delete_list_inner(&mut self, name: &str) -> Result<Reply> {
        let not_found = || StoreError::ListNotFound {
            name: name.trim().to_string(),
        };

        let stored = self
            .collection
            .resolve(name)
            .map(str::to_string)
            .ok_or_else(not_found)?;

        if !self.collection.remove(&stored) {
            return Err(not_found());
        }
        self.persist()?;

        tracing::info!("Deleted list: {}", stored);
        Ok(Reply::ListDeleted { name: stored })
    }

    pub fn show_list(&self, name: &str) -> Result<Reply> {
        let (stored, items) =
            self.collection
                .resolve_entry(name)
                .ok_or_else(|| StoreError::ListNotFound {
                    name: name.trim().to_string(),
                })?;

        Ok(Reply::ListContents {
            name: stored.to_string(),
            items: items.to_vec(),
        })
    }

    /// Every list with its item count, sorted by name for deterministic output.
    pub fn show_all_lists(&self) -> Reply {
        let mut summaries: Vec<(String, usize)> = self
            .collection
            .iter()
            .map(|(name, items)| (name.to_string(), items.len()))
            .collect();
        summaries.sort();

        Reply::AllLists { summaries }
    }

    /// Case-insensitive substring search across all items of all lists,
    /// in insertion order.
    pub fn search(&self, term: &str) -> Result<Reply> {
        let term = validation::validate_search_term(term)?;
        let needle = term.to_lowercase();

        let hits: Vec<SearchHit> = self
            .collection
            .iter()
            .flat_map(|(name, items)| {
                items
                    .iter()
                    .filter(|item| item.to_lowercase().contains(&needle))
                    .map(move |item| SearchHit {
                        list: name.to_string(),
                        item: item.clone(),
                    })
            })
            .collect();

        Ok(Reply::SearchResults {
            term: term.to_string(),
            hits,
        })
    }

    pub fn stats(&self) -> StoreStats {
        let total_lists = self.collection.len();
        let total_items: usize = self.collection.iter().map(|(_, items)| items.len()).sum();

        StoreStats {
            total_lists,
            total_items,
            average_items_per_list: if total_lists == 0 {
                0.0
            } else {
                total_items as f64 / total_lists as f64
            },
            largest_list_size: self
                .collection
                .iter()
                .map(|(_, items)| items.len())
                .max()
                .unwrap_or(0),
        }
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save(&self.collection)
    }
}

fn logged(op: &str, subject: &str, result: Result<Reply>) -> Result<Reply> {
    if let Err(e) = &result {
        if e.kind() == ErrorKind::Storage {
            tracing::error!("Storage failure during {} '{}': {}", op, subject, e);
        } else {
            tracing::warn!("Failed to {} '{}': {}", op, subject, e);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct MockPersistence {
        initial: RefCell<ListCollection>,
        saves: Cell<usize>,
        fail_saves: bool,
    }

    impl MockPersistence {
        fn new() -> Self {
            Self {
                initial: RefCell::new(ListCollection::new()),
                saves: Cell::new(0),
                fail_saves: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_saves: true,
                ..Self::new()
            }
        }
    }

    impl Persistence for MockPersistence {
        fn load(&self) -> ListCollection {
            self.initial.borrow().clone()
        }

        fn save(&self, _collection: &ListCollection) -> Result<()> {
            self.saves.set(self.saves.get() + 1);
            if self.fail_saves {
                Err(StoreError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }
    }

    struct MockConfig {
        max_list_name_length: usize,
        max_item_length: usize,
        max_lists: usize,
        max_items_per_list: usize,
    }

    impl Default for MockConfig {
        fn default() -> Self {
            Self {
                max_list_name_length: 50,
                max_item_length: 200,
                max_lists: 50,
                max_items_per_list: 100,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn data_file(&self) -> &str {
            "unused.json"
        }

        fn max_list_name_length(&self) -> usize {
            self.max_list_name_length
        }

        fn max_item_length(&self) -> usize {
            self.max_item_length
        }

        fn max_lists(&self) -> usize {
            self.max_lists
        }

        fn max_items_per_list(&self) -> usize {
            self.max_items_per_list
        }

        fn backup_enabled(&self) -> bool {
            false
        }
    }

    fn store() -> ListStore<MockPersistence, MockConfig> {
        ListStore::new(MockPersistence::new(), MockConfig::default())
    }

    fn store_with(config: MockConfig) -> ListStore<MockPersistence, MockConfig> {
        ListStore::new(MockPersistence::new(), config)
    }

    #[test]
    fn test_create_two_distinct_lists() {
        let mut store = store();
        store.create_list("Groceries").unwrap();
        store.create_list("Errands").unwrap();

        assert_eq!(store.collection().len(), 2);
        assert_eq!(store.collection().items("Groceries").unwrap(), &[] as &[String]);
        assert_eq!(store.collection().items("Errands").unwrap(), &[] as &[String]);
    }

    #[test]
    fn test_create_trims_and_preserves_case() {
        let mut store = store();
        let reply = store.create_list("  My List  ").unwrap();
        assert_eq!(
            reply,
            Reply::ListCreated {
                name: "My List".to_string()
            }
        );
        assert!(store.collection().items("My List").is_some());
    }

    #[test]
    fn test_create_duplicate_is_rejected_case_insensitively() {
        let mut store = store();
        store.create_list("milk").unwrap();

        let err = store.create_list("Milk").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.collection().len(), 1);

        let err = store.create_list("milk").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.collection().len(), 1);
    }

    #[test]
    fn test_create_rejects_empty_and_over_length_names() {
        let mut store = store_with(MockConfig {
            max_list_name_length: 5,
            ..MockConfig::default()
        });

        assert_eq!(
            store.create_list("   ").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            store.create_list("toolongname").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert!(store.collection().is_empty());
    }

    #[test]
    fn test_create_respects_list_cap() {
        let mut store = store_with(MockConfig {
            max_lists: 2,
            ..MockConfig::default()
        });
        store.create_list("one").unwrap();
        store.create_list("two").unwrap();

        let err = store.create_list("three").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert_eq!(store.collection().len(), 2);
    }

    #[test]
    fn test_add_item_resolves_name_case_insensitively() {
        let mut store = store();
        store.create_list("Groceries").unwrap();

        let reply = store.add_item("GROCERIES", " Milk ").unwrap();
        assert_eq!(
            reply,
            Reply::ItemAdded {
                list: "Groceries".to_string(),
                item: "Milk".to_string()
            }
        );
        assert_eq!(store.collection().items("Groceries").unwrap(), &["Milk"]);
    }

    #[test]
    fn test_add_item_duplicate_rejected_exact_match() {
        let mut store = store();
        store.create_list("Groceries").unwrap();
        store.add_item("Groceries", "Milk").unwrap();

        let err = store.add_item("Groceries", " Milk ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.collection().items("Groceries").unwrap().len(), 1);

        // different case is a different item
        store.add_item("Groceries", "milk").unwrap();
        assert_eq!(store.collection().items("Groceries").unwrap().len(), 2);
    }

    #[test]
    fn test_add_item_to_missing_list() {
        let mut store = store();
        let err = store.add_item("nope", "thing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_add_item_respects_item_cap() {
        let mut store = store_with(MockConfig {
            max_items_per_list: 3,
            ..MockConfig::default()
        });
        store.create_list("caps").unwrap();
        for item in ["a", "b", "c"] {
            store.add_item("caps", item).unwrap();
        }

        let err = store.add_item("caps", "d").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert_eq!(store.collection().items("caps").unwrap().len(), 3);
    }

    #[test]
    fn test_add_items_partitions_batch() {
        let mut store = store();
        store.create_list("Groceries").unwrap();

        let reply = store.add_items("Groceries", "a, b, a").unwrap();
        let Reply::BatchProcessed { list, report } = reply else {
            panic!("expected a batch reply");
        };
        assert_eq!(list, "Groceries");
        assert_eq!(report.added, vec!["a", "b"]);
        assert_eq!(report.skipped, vec!["a"]);
        assert!(report.failed.is_empty());
        assert_eq!(store.collection().items("Groceries").unwrap(), &["a", "b"]);
    }

    #[test]
    fn test_add_items_reports_invalid_candidates() {
        let mut store = store_with(MockConfig {
            max_item_length: 4,
            ..MockConfig::default()
        });
        store.create_list("short").unwrap();

        let reply = store.add_items("short", "ok, waytoolong, two").unwrap();
        let Reply::BatchProcessed { report, .. } = reply else {
            panic!("expected a batch reply");
        };
        assert_eq!(report.added, vec!["ok", "two"]);
        assert_eq!(report.failed, vec!["waytoolong"]);
    }

    #[test]
    fn test_add_items_capacity_precheck_is_all_or_nothing() {
        let mut store = store_with(MockConfig {
            max_items_per_list: 3,
            ..MockConfig::default()
        });
        store.create_list("caps").unwrap();
        store.add_item("caps", "a").unwrap();

        let err = store.add_items("caps", "b, c, d").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        // nothing was applied
        assert_eq!(store.collection().items("caps").unwrap(), &["a"]);
    }

    #[test]
    fn test_add_items_rejects_empty_input() {
        let mut store = store();
        store.create_list("Groceries").unwrap();

        let err = store.add_items("Groceries", " , ,, ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_add_items_fails_fast_on_missing_list() {
        let mut store = store();
        let err = store.add_items("nope", "a, b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_item() {
        let mut store = store();
        store.create_list("Groceries").unwrap();
        store.add_item("Groceries", "Milk").unwrap();

        store.remove_item("groceries", " Milk ").unwrap();
        assert!(store.collection().items("Groceries").unwrap().is_empty());

        let err = store.remove_item("Groceries", "Milk").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_list_then_show_fails() {
        let mut store = store();
        store.create_list("Groceries").unwrap();

        store.delete_list("GROCERIES").unwrap();
        let err = store.show_list("Groceries").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_show_all_sorted_by_name() {
        let mut store = store();
        store.create_list("zebra").unwrap();
        store.create_list("apple").unwrap();
        store.create_list("mango").unwrap();

        let Reply::AllLists { summaries } = store.show_all_lists() else {
            panic!("expected the all-lists reply");
        };
        let names: Vec<&str> = summaries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut store = store();
        store.create_list("Groceries").unwrap();
        store.add_item("Groceries", "Milk").unwrap();
        store.create_list("Hardware").unwrap();
        store.add_item("Hardware", "milling bit").unwrap();

        let Reply::SearchResults { hits, .. } = store.search("MIL").unwrap() else {
            panic!("expected search results");
        };
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].list, "Groceries");
        assert_eq!(hits[0].item, "Milk");
        assert_eq!(hits[1].list, "Hardware");

        let Reply::SearchResults { hits, .. } = store.search("bolt").unwrap() else {
            panic!("expected search results");
        };
        assert!(hits.is_empty());

        assert_eq!(
            store.search("   ").unwrap_err().kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_search_iterates_in_insertion_order() {
        let mut store = store();
        store.create_list("zzz").unwrap();
        store.add_item("zzz", "match one").unwrap();
        store.create_list("aaa").unwrap();
        store.add_item("aaa", "match two").unwrap();

        let Reply::SearchResults { hits, .. } = store.search("match").unwrap() else {
            panic!("expected search results");
        };
        // creation order, not alphabetical
        assert_eq!(hits[0].list, "zzz");
        assert_eq!(hits[1].list, "aaa");
    }

    #[test]
    fn test_stats() {
        let mut store = store();
        let empty = store.stats();
        assert_eq!(empty.total_lists, 0);
        assert_eq!(empty.total_items, 0);
        assert_eq!(empty.average_items_per_list, 0.0);
        assert_eq!(empty.largest_list_size, 0);

        store.create_list("A").unwrap();
        store.add_item("A", "x").unwrap();
        store.create_list("B").unwrap();
        store.add_item("B", "y").unwrap();
        store.add_item("B", "z").unwrap();

        let stats = store.stats();
        assert_eq!(stats.total_lists, 2);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.average_items_per_list, 1.5);
        assert_eq!(stats.largest_list_size, 2);
    }

    #[test]
    fn test_rejected_mutations_do_not_persist() {
        let mut store = store();
        store.create_list("Groceries").unwrap();
        let saves_after_create = store.persistence.saves.get();

        let _ = store.create_list("groceries");
        let _ = store.add_item("missing", "x");
        let _ = store.add_item("Groceries", "");
        let _ = store.remove_item("Groceries", "absent");
        let _ = store.delete_list("missing");

        assert_eq!(store.persistence.saves.get(), saves_after_create);
    }

    #[test]
    fn test_save_failure_surfaces_as_storage_error() {
        let mut store = ListStore::new(MockPersistence::failing(), MockConfig::default());

        let err = store.create_list("Groceries").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        // the in-memory mutation has already applied; callers may retry the save
        assert_eq!(store.collection().len(), 1);
    }

    #[test]
    fn test_store_loads_existing_collection() {
        let persistence = MockPersistence::new();
        {
            let mut initial = persistence.initial.borrow_mut();
            initial.insert("Carried".to_string());
        }

        let store = ListStore::new(persistence, MockConfig::default());
        assert_eq!(store.collection().len(), 1);
        assert!(store.collection().items("Carried").is_some());
    }
}
