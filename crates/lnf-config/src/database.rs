//! Catalog database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    String::from("lnf.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file. `:memory:` opens a throwaway database.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "lnf.db");
        assert!(!config.is_in_memory());
    }
}
