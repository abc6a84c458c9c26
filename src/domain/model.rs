use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// All lists for the process, keyed by case-preserved name.
///
/// Insertion order matters (search iterates lists in the order they were
/// created), so the backing store is a Vec rather than a hash map. Key
/// uniqueness, including the at-most-one-case-insensitive-match invariant, is
/// enforced by the store before insertion, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCollection {
    lists: Vec<(String, Vec<String>)>,
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Stored key whose lowercased form equals the lowercased candidate.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        self.lists
            .iter()
            .map(|(stored, _)| stored.as_str())
            .find(|stored| stored.to_lowercase() == wanted)
    }

    /// Stored key and items for a case-insensitive match of `name`.
    pub fn resolve_entry(&self, name: &str) -> Option<(&str, &[String])> {
        let wanted = name.trim().to_lowercase();
        self.lists
            .iter()
            .find(|(stored, _)| stored.to_lowercase() == wanted)
            .map(|(stored, items)| (stored.as_str(), items.as_slice()))
    }

    /// Mutable variant of [`resolve_entry`](Self::resolve_entry).
    pub fn resolve_entry_mut(&mut self, name: &str) -> Option<(&str, &mut Vec<String>)> {
        let wanted = name.trim().to_lowercase();
        self.lists
            .iter_mut()
            .find(|(stored, _)| stored.to_lowercase() == wanted)
            .map(|(stored, items)| (stored.as_str(), items))
    }

    /// Items of the list stored under `name` (exact key).
    pub fn items(&self, name: &str) -> Option<&[String]> {
        self.lists
            .iter()
            .find(|(stored, _)| stored == name)
            .map(|(_, items)| items.as_slice())
    }

    pub fn items_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.lists
            .iter_mut()
            .find(|(stored, _)| stored == name)
            .map(|(_, items)| items)
    }

    /// Appends a new empty list. The caller has already checked uniqueness.
    pub fn insert(&mut self, name: String) {
        self.lists.push((name, Vec::new()));
    }

    /// Removes the list stored under `name` (exact key), preserving the order
    /// of the remaining lists.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.lists.iter().position(|(stored, _)| stored == name) {
            Some(idx) => {
                self.lists.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Lists in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.lists
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }
}

// The durable format is a plain JSON object of name -> [items], so the Vec
// backing serializes as a map. On load, a repeated key keeps the last
// occurrence, matching how the original data files were parsed.
impl Serialize for ListCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lists.len()))?;
        for (name, items) in &self.lists {
            map.serialize_entry(name, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ListCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = ListCollection;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of list name to a sequence of item strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut collection = ListCollection::new();
                while let Some((name, items)) = access.next_entry::<String, Vec<String>>()? {
                    let existing = collection
                        .lists
                        .iter()
                        .position(|(stored, _)| *stored == name);
                    match existing {
                        Some(idx) => collection.lists[idx].1 = items,
                        None => collection.lists.push((name, items)),
                    }
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

/// One search match: the list it came from and the matching item text.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub list: String,
    pub item: String,
}

/// Outcome of a quick-add batch, partitioned per candidate item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub total_lists: usize,
    pub total_items: usize,
    pub average_items_per_list: f64,
    pub largest_list_size: usize,
}

/// Typed success payload of a store operation. `Display` is the presentation
/// boundary; the CLI and any bot glue print it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    ListCreated { name: String },
    ItemAdded { list: String, item: String },
    BatchProcessed { list: String, report: BatchReport },
    ItemRemoved { list: String, item: String },
    ListContents { name: String, items: Vec<String> },
    AllLists { summaries: Vec<(String, usize)> },
    ListDeleted { name: String },
    SearchResults { term: String, hits: Vec<SearchHit> },
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::ListCreated { name } => write!(f, "✅ Created list '{}'", name),
            Reply::ItemAdded { list, item } => write!(f, "✅ Added '{}' to '{}'", item, list),
            Reply::ItemRemoved { list, item } => {
                write!(f, "✅ Removed '{}' from '{}'", item, list)
            }
            Reply::ListDeleted { name } => write!(f, "🗑️ Deleted list '{}'", name),
            Reply::ListContents { name, items } => {
                if items.is_empty() {
                    return write!(f, "📝 List '{}' is empty", name);
                }
                write!(f, "📋 **{}** ({} items):", name, items.len())?;
                for (i, item) in items.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, item)?;
                }
                Ok(())
            }
            Reply::AllLists { summaries } => {
                if summaries.is_empty() {
                    return write!(
                        f,
                        "📝 No lists created yet! Use 'create <list_name>' to create one."
                    );
                }
                write!(f, "📚 **All Lists:**")?;
                for (name, count) in summaries {
                    write!(f, "\n• {} ({} items)", name, count)?;
                }
                Ok(())
            }
            Reply::SearchResults { term, hits } => {
                if hits.is_empty() {
                    return write!(f, "❌ No items found containing '{}'", term);
                }
                write!(f, "🔍 **Search results for '{}':**", term)?;
                for hit in hits {
                    write!(f, "\n📋 {}: {}", hit.list, hit.item)?;
                }
                Ok(())
            }
            Reply::BatchProcessed { list, report } => {
                let mut sections = Vec::new();
                if !report.added.is_empty() {
                    let mut lines =
                        vec![format!("✅ Added {} items to '{}':", report.added.len(), list)];
                    lines.extend(report.added.iter().map(|item| format!("  • {}", item)));
                    sections.push(lines.join("\n"));
                }
                if !report.skipped.is_empty() {
                    let mut lines = vec![format!(
                        "⚠️ Skipped {} duplicate items:",
                        report.skipped.len()
                    )];
                    lines.extend(report.skipped.iter().map(|item| format!("  • {}", item)));
                    sections.push(lines.join("\n"));
                }
                if !report.failed.is_empty() {
                    let mut lines =
                        vec![format!("❌ Failed to add {} items:", report.failed.len())];
                    lines.extend(
                        report
                            .failed
                            .iter()
                            .map(|item| format!("  • {} (invalid)", item)),
                    );
                    sections.push(lines.join("\n"));
                }
                if sections.is_empty() {
                    return write!(f, "❌ No items were processed");
                }
                write!(f, "{}", sections.join("\n"))
            }
        }
    }
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "📊 **Statistics:**")?;
        write!(f, "\n• Total lists: {}", self.total_lists)?;
        write!(f, "\n• Total items: {}", self.total_items)?;
        if self.total_lists > 0 {
            write!(
                f,
                "\n• Average items per list: {:.1}",
                self.average_items_per_list
            )?;
            write!(f, "\n• Largest list size: {}", self.largest_list_size)?;
        }
        Ok(())
    }
}
