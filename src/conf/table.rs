use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default = "TableConfig::default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "TableConfig::default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl TableConfig {
    fn default_page_size() -> usize {
        25
    }

    fn default_page_size_options() -> Vec<usize> {
        vec![10, 25, 50, 100]
    }

    pub fn allows_page_size(&self, size: usize) -> bool {
        size > 0 && self.page_size_options.contains(&size)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: Self::default_page_size(),
            page_size_options: Self::default_page_size_options(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// JSON array of loads used to seed the in-memory source.
    #[serde(default)]
    pub loads_path: Option<PathBuf>,
}
