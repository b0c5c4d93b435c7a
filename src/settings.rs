//! Display settings
//!
//! The organisation and bot names shown in the chat overlays. On the web they
//! come from the page's query string (`?orgName=..&botName=..`).

use serde::{Deserialize, Serialize};

/// Names used in overlay text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Organisation talking to the bot
    pub org_name: String,
    /// Name of the player's bot
    pub bot_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org_name: "Headquarters".to_string(),
            bot_name: "bot".to_string(),
        }
    }
}

impl Settings {
    /// Build settings from optional parameters; empty values count as missing
    pub fn from_params(org_name: Option<String>, bot_name: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            org_name: org_name.filter(|s| !s.is_empty()).unwrap_or(defaults.org_name),
            bot_name: bot_name.filter(|s| !s.is_empty()).unwrap_or(defaults.bot_name),
        }
    }

    /// Read `orgName` / `botName` from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let params = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());

        match params {
            Some(params) => {
                let settings = Self::from_params(params.get("orgName"), params.get("botName"));
                log::info!(
                    "Display names: org={:?} bot={:?}",
                    settings.org_name,
                    settings.bot_name
                );
                settings
            }
            None => {
                log::warn!("Could not read query string, using default names");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_names_use_defaults() {
        let s = Settings::from_params(None, Some(String::new()));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_names_from_params() {
        let s = Settings::from_params(Some("Acme".into()), Some("Chatty".into()));
        assert_eq!(s.org_name, "Acme");
        assert_eq!(s.bot_name, "Chatty");
    }
}
