pub mod shared;
pub mod store;

pub use crate::domain::model::{BatchReport, ListCollection, Reply, SearchHit, StoreStats};
pub use crate::domain::ports::{ConfigProvider, Persistence};
pub use crate::utils::error::Result;
