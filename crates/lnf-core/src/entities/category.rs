use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An item category. Items reference categories by name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub description: Option<String>,
}
