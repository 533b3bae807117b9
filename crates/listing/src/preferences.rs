//! UI preferences kept in a local string key-value store.

use std::collections::BTreeMap;

pub const VIEW_MODE_KEY: &str = "view_mode";
pub const OPEN_TABS_KEY: &str = "open_tabs";
pub const ACTIVE_TAB_KEY: &str = "active_tab";
pub const SOUND_EFFECT_KEY: &str = "sound_effect";

/// Minimal get/set store. No transactional guarantees are expected.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Table,
    Compact,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Compact => "compact",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "table" => Some(Self::Table),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Table => Self::Compact,
            Self::Compact => Self::Table,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiPreferences {
    pub view_mode: ViewMode,
    pub open_tabs: Vec<String>,
    pub active_tab: Option<String>,
    pub sound_effect: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            open_tabs: vec!["dashboard".to_string(), "expenses".to_string()],
            active_tab: None,
            sound_effect: true,
        }
    }
}

impl UiPreferences {
    /// Reads every preference; missing or unreadable values keep their default.
    pub fn load(store: &impl PreferenceStore) -> Self {
        let mut prefs = Self::default();

        if let Some(mode) = store.get(VIEW_MODE_KEY).as_deref().and_then(ViewMode::parse) {
            prefs.view_mode = mode;
        }
        if let Some(raw) = store.get(OPEN_TABS_KEY) {
            match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(tabs) => prefs.open_tabs = tabs,
                Err(err) => tracing::debug!("ignoring unreadable open tabs: {err}"),
            }
        }
        prefs.active_tab = store.get(ACTIVE_TAB_KEY).filter(|tab| !tab.is_empty());
        if let Some(sound) = store.get(SOUND_EFFECT_KEY).and_then(|raw| raw.parse().ok()) {
            prefs.sound_effect = sound;
        }

        prefs
    }

    pub fn save(&self, store: &mut impl PreferenceStore) {
        store.set(VIEW_MODE_KEY, self.view_mode.as_str().to_string());
        match serde_json::to_string(&self.open_tabs) {
            Ok(raw) => store.set(OPEN_TABS_KEY, raw),
            Err(err) => tracing::error!("failed to encode open tabs: {err}"),
        }
        store.set(ACTIVE_TAB_KEY, self.active_tab.clone().unwrap_or_default());
        store.set(SOUND_EFFECT_KEY, self.sound_effect.to_string());
    }
}
