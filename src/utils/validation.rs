use crate::utils::error::{Result, StoreError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Trimmed list name, or the validation error for empty/over-length input.
/// Length is counted in characters, not bytes.
pub fn validate_list_name(name: &str, max_len: usize) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyListName);
    }
    if name.chars().count() > max_len {
        return Err(StoreError::ListNameTooLong { max_len });
    }
    Ok(name)
}

/// Trimmed item text, or the validation error for empty/over-length input.
pub fn validate_item(item: &str, max_len: usize) -> Result<&str> {
    let item = item.trim();
    if item.is_empty() {
        return Err(StoreError::EmptyItem);
    }
    if item.chars().count() > max_len {
        return Err(StoreError::ItemTooLong { max_len });
    }
    Ok(item)
}

pub fn validate_search_term(term: &str) -> Result<&str> {
    let term = term.trim();
    if term.is_empty() {
        return Err(StoreError::EmptySearchTerm);
    }
    Ok(term)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
