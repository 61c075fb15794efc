use serde::{Deserialize, Serialize};

/// Nesting depth the editor allows groups to reach
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Which representation the host owns and expects in change callbacks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    #[default]
    Flat,
    Nested,
}

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Deepest level a group may sit at (root-level items are level 1)
    pub max_depth: usize,
    /// Representation reported to the change callback
    pub output: Representation,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            output: Representation::Flat,
        }
    }
}
