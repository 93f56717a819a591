use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin of the gallery, e.g. "https://photos.example.org"
    #[serde(default = "default_url")]
    pub url: String,
    /// Session cookie sent verbatim with every request (e.g. "EXAUTH=...")
    #[serde(default)]
    pub cookie: Option<String>,
    /// Timeout for admin actions and page loads
    #[serde(default = "default_server_timeout")]
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            url: default_url(),
            cookie: None,
            timeout_ms: default_server_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:6767".to_string()
}

fn default_server_timeout() -> u64 {
    30_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_lookup_timeout")]
    pub timeout_ms: u64,
    /// Minimum query length for `/ac/<category>` lookups
    #[serde(default = "default_min_len_category")]
    pub min_len_category: usize,
    /// Minimum query length for the unscoped `/ac` lookup
    #[serde(default = "default_min_len_search")]
    pub min_len_search: usize,
    /// Rows shown in the suggestion list before it scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            timeout_ms: default_lookup_timeout(),
            min_len_category: default_min_len_category(),
            min_len_search: default_min_len_search(),
            max_visible: default_max_visible(),
        }
    }
}

fn default_lookup_timeout() -> u64 {
    5_000
}

fn default_min_len_category() -> usize {
    1
}

fn default_min_len_search() -> usize {
    2
}

fn default_max_visible() -> usize {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Colors per reference kind, keyed by "tag", "person", "place"
    #[serde(default)]
    pub kind_colors: HashMap<String, String>,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = on (default).
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Marker step as a fraction of the visible map span
    #[serde(default = "default_step_fraction")]
    pub step_fraction: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            step_fraction: default_step_fraction(),
        }
    }
}

fn default_step_fraction() -> f64 {
    0.05
}
