pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "listkeeper")]
#[command(about = "Manage named lists of short text items with durable storage")]
pub struct CliConfig {
    #[arg(long, default_value = "lists_data.json")]
    pub data_file: String,

    #[arg(long, default_value = "50")]
    pub max_list_name_length: usize,

    #[arg(long, default_value = "200")]
    pub max_item_length: usize,

    #[arg(long, default_value = "50")]
    pub max_lists: usize,

    #[arg(long, default_value = "100")]
    pub max_items_per_list: usize,

    #[arg(long, help = "Disable the pre-save backup copy")]
    pub no_backup: bool,

    #[arg(long, help = "Load configuration from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_file(&self) -> &str {
        &self.data_file
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
        !self.no_backup
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_file", &self.data_file)?;
        validation::validate_positive_number(
            "max_list_name_length",
            self.max_list_name_length,
            1,
        )?;
        validation::validate_positive_number("max_item_length", self.max_item_length, 1)?;
        validation::validate_positive_number("max_lists", self.max_lists, 1)?;
        validation::validate_positive_number("max_items_per_list", self.max_items_per_list, 1)?;
        Ok(())
    }
}
