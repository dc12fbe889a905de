use serde::Deserialize;
use std::collections::HashMap;

/// Configuration from tildo.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pre-fills the filename prompt
    #[serde(default)]
    pub default_file: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Capture the mouse for buttons and drag-to-reorder
    #[serde(default = "default_true")]
    pub mouse: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            mouse: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
