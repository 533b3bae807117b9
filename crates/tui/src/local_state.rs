use std::{collections::BTreeMap, fs, path::Path};

use listing::preferences::PreferenceStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Preferences file: a flat JSON object of string values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalState {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }
}

impl PreferenceStore for LocalState {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
