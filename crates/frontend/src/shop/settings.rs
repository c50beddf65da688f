//! Page-level settings of the overlay.
//!
//! Defaults are embedded as TOML; the NUI page URL may override a subset of
//! them through its query string (`ui_page "html/index.html?currency_symbol=$"`).

use serde::Deserialize;

/// How overlapping catalog searches resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrdering {
    /// Every response is applied in arrival order
    #[default]
    LastResolved,
    /// Responses for searches older than the newest issued one are dropped
    LastIssued,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
    /// Base URL of item images, `{icon_base}/{name}.png`
    pub icon_base: String,
    pub currency_symbol: String,
    /// Delay before the search box takes focus after open
    pub focus_delay_ms: u32,
    /// Keys whose default browser action is suppressed while open
    pub blocked_keys: Vec<String>,
    pub search_ordering: SearchOrdering,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            icon_base: "nui://qb-inventory/html/images".to_string(),
            currency_symbol: "£".to_string(),
            focus_delay_ms: 50,
            blocked_keys: vec!["F5".to_string(), "F3".to_string(), "F12".to_string()],
            search_ordering: SearchOrdering::LastResolved,
        }
    }
}

/// Default settings embedded in the bundle
const DEFAULT_SETTINGS: &str = r#"
icon_base = "nui://qb-inventory/html/images"
currency_symbol = "£"
focus_delay_ms = 50
blocked_keys = ["F5", "F3", "F12"]
search_ordering = "last_resolved"
"#;

/// Query-string overrides, all optional
#[derive(Debug, Default, Deserialize)]
struct SettingsOverrides {
    icon_base: Option<String>,
    currency_symbol: Option<String>,
    focus_delay_ms: Option<u32>,
    search_ordering: Option<SearchOrdering>,
}

impl ShopSettings {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Apply `key=value` overrides from a query string (leading `?` allowed)
    pub fn with_query(mut self, query: &str) -> Result<Self, serde_qs::Error> {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return Ok(self);
        }
        let overrides: SettingsOverrides = serde_qs::from_str(query)?;
        if let Some(v) = overrides.icon_base {
            self.icon_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = overrides.currency_symbol {
            self.currency_symbol = v;
        }
        if let Some(v) = overrides.focus_delay_ms {
            self.focus_delay_ms = v;
        }
        if let Some(v) = overrides.search_ordering {
            self.search_ordering = v;
        }
        Ok(self)
    }

    pub fn icon_url(&self, item_name: &str) -> String {
        format!("{}/{}.png", self.icon_base, item_name)
    }

    pub fn is_blocked_key(&self, key: &str) -> bool {
        self.blocked_keys.iter().any(|k| k == key)
    }
}

/// Load settings: embedded defaults, then the page query string
pub fn load_settings() -> ShopSettings {
    let base = match ShopSettings::from_toml(DEFAULT_SETTINGS) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Embedded shop settings are invalid: {}", e);
            ShopSettings::default()
        }
    };

    let query = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();

    match base.clone().with_query(&query) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed settings query '{}': {}", query, e);
            base
        }
    }
}
