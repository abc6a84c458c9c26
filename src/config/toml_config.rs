use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreSection,
    pub limits: Option<LimitsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub data_file: String,
    pub backup_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSection {
    pub max_list_name_length: Option<usize>,
    pub max_item_length: Option<usize>,
    pub max_lists: Option<usize>,
    pub max_items_per_list: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StoreError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| StoreError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("store.data_file", &self.store.data_file)?;

        validation::validate_positive_number(
            "limits.max_list_name_length",
            self.max_list_name_length(),
            1,
        )?;
        validation::validate_positive_number("limits.max_item_length", self.max_item_length(), 1)?;
        validation::validate_positive_number("limits.max_lists", self.max_lists(), 1)?;
        validation::validate_positive_number(
            "limits.max_items_per_list",
            self.max_items_per_list(),
            1,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> &str {
        &self.store.data_file
    }

    fn max_list_name_length(&self) -> usize {
        self.limits
            .as_ref()
            .and_then(|l| l.max_list_name_length)
            .unwrap_or(50)
    }

    fn max_item_length(&self) -> usize {
        self.limits
            .as_ref()
            .and_then(|l| l.max_item_length)
            .unwrap_or(200)
    }

    fn max_lists(&self) -> usize {
        self.limits.as_ref().and_then(|l| l.max_lists).unwrap_or(50)
    }

    fn max_items_per_list(&self) -> usize {
        self.limits
            .as_ref()
            .and_then(|l| l.max_items_per_list)
            .unwrap_or(100)
    }

    fn backup_enabled(&self) -> bool {
        self.store.backup_enabled.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
