use crate::domain::model::ListCollection;
use crate::utils::error::Result;

/// Durable storage seam. `load` always succeeds with some collection: missing
/// or unreadable state degrades to an empty one rather than failing startup.
pub trait Persistence {
    fn load(&self) -> ListCollection;
    fn save(&self, collection: &ListCollection) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_file(&self) -> &str;
    fn max_list_name_length(&self) -> usize;
    fn max_item_length(&self) -> usize;
    fn max_lists(&self) -> usize;
    fn max_items_per_list(&self) -> usize;
    fn backup_enabled(&self) -> bool;
}
