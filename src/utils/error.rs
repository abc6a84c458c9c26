use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("❌ List name cannot be empty")]
    EmptyListName,

    #[error("❌ List name must be 1-{max_len} characters long")]
    ListNameTooLong { max_len: usize },

    #[error("❌ Item cannot be empty")]
    EmptyItem,

    #[error("❌ Item must be 1-{max_len} characters long")]
    ItemTooLong { max_len: usize },

    #[error("❌ Search term cannot be empty")]
    EmptySearchTerm,

    #[error("❌ No valid items found")]
    EmptyBatch,

    #[error("❌ List '{name}' not found!")]
    ListNotFound { name: String },

    #[error("❌ '{item}' not found in '{list}'")]
    ItemNotFound { list: String, item: String },

    #[error("❌ List '{name}' already exists!")]
    ListExists { name: String },

    #[error("⚠️ '{item}' is already in '{list}'")]
    ItemExists { list: String, item: String },

    #[error("❌ Maximum {max_lists} lists allowed")]
    TooManyLists { max_lists: usize },

    #[error("❌ Maximum {max_items} items per list allowed")]
    TooManyItems { max_items: usize },

    #[error("❌ Adding {count} items would exceed the limit of {max_items} items per list")]
    BatchTooLarge { count: usize, max_items: usize },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required config field: {field}")]
    MissingConfigValue { field: String },

    #[error("Config parsing error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The five failure categories callers branch on. Config-layer failures count
/// as validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyExists,
    LimitExceeded,
    Storage,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::EmptyListName
            | StoreError::ListNameTooLong { .. }
            | StoreError::EmptyItem
            | StoreError::ItemTooLong { .. }
            | StoreError::EmptySearchTerm
            | StoreError::EmptyBatch
            | StoreError::InvalidConfigValue { .. }
            | StoreError::MissingConfigValue { .. }
            | StoreError::ConfigParse { .. } => ErrorKind::Validation,

            StoreError::ListNotFound { .. } | StoreError::ItemNotFound { .. } => {
                ErrorKind::NotFound
            }

            StoreError::ListExists { .. } | StoreError::ItemExists { .. } => {
                ErrorKind::AlreadyExists
            }

            StoreError::TooManyLists { .. }
            | StoreError::TooManyItems { .. }
            | StoreError::BatchTooLarge { .. } => ErrorKind::LimitExceeded,

            StoreError::Io(_) | StoreError::Serialization(_) => ErrorKind::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
