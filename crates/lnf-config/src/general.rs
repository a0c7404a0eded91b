//! General listing configuration.

use serde::{Deserialize, Serialize};

const fn default_per_page() -> u32 {
    12
}

const fn default_max_per_page() -> u32 {
    100
}

fn default_unknown_owner_email() -> String {
    String::from("team@example.com")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size used when a listing request does not name one.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound on caller-requested page sizes.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,

    /// Email shown for items whose owner cannot be resolved.
    #[serde(default = "default_unknown_owner_email")]
    pub unknown_owner_email: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            unknown_owner_email: default_unknown_owner_email(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.per_page, 12);
        assert_eq!(config.max_per_page, 100);
        assert_eq!(config.unknown_owner_email, "team@example.com");
    }
}
