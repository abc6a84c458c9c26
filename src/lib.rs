pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::json_file::JsonFileStorage;
pub use crate::core::{shared::SharedListStore, store::ListStore};
pub use domain::model::{BatchReport, ListCollection, Reply, SearchHit, StoreStats};
pub use domain::ports::{ConfigProvider, Persistence};
pub use utils::error::{ErrorKind, Result, StoreError};
