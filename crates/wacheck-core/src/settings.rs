//! Notify-target persistence.
//!
//! A single `phoneNumber` key in a JSON object at a fixed path, read once at
//! startup and overwritten wholesale on update. The file is shared with the
//! interactive menu's "set personal number" option.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::Result;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct SettingsData {
    #[serde(rename = "phoneNumber", default)]
    phone_number: String,
}

/// Handle to the operator settings file.
///
/// Read-mostly: the reply sink reads the notify target per delivery, and only
/// the explicit set-number command writes.
pub struct SettingsStore {
    path: PathBuf,
    state: RwLock<SettingsData>,
}

impl SettingsStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = read_settings_file(&path)?;
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// The configured notify target, if any.
    pub async fn notify_target(&self) -> Option<String> {
        let st = self.state.read().await;
        if st.phone_number.trim().is_empty() {
            None
        } else {
            Some(st.phone_number.clone())
        }
    }

    /// Persist a new notify target, replacing the settings file wholesale.
    pub async fn set_notify_target(&self, number: &str) -> Result<()> {
        let mut st = self.state.write().await;
        st.phone_number = number.trim().to_string();
        let txt = serde_json::to_string(&*st)?;
        std::fs::write(&self.path, txt)?;
        Ok(())
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsData> {
    if !path.exists() {
        return Ok(SettingsData::default());
    }
    let txt = std::fs::read_to_string(path)?;
    if txt.trim().is_empty() {
        return Ok(SettingsData::default());
    }
    Ok(serde_json::from_str(&txt)?)
}
