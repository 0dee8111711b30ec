// ## 📂 File: `src/config.rs`

//! config.rs
//! Application / SDK identity carried into every signed request.
//!
//! Design:
//! - `Default` mirrors the shipping client build.
//! - `#[serde(default)]` lets a partial JSON profile override only what it names.
//! - Zero / empty values mean "use the default" (`normalized`).

use serde::{Deserialize, Serialize};

use crate::constants::app;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProfile {
    pub app_version: String,
    pub sdk_version_str: String,
    pub sdk_version: u32,
    pub call_type: u32,
    pub app_version_constant: u32,
    pub ms_app_id: String,
    pub license_id: String,
    pub gorgon_sdk_version: String,
    pub channel: String,
    pub rand26: u32,
}

impl Default for AppProfile {
    fn default() -> Self {
        Self {
            app_version: app::APP_VERSION.into(),
            sdk_version_str: app::SDK_VERSION_STR.into(),
            sdk_version: app::SDK_VERSION,
            call_type: app::CALL_TYPE,
            app_version_constant: app::APP_VERSION_CONSTANT,
            ms_app_id: app::MS_APP_ID.into(),
            license_id: app::LICENSE_ID.into(),
            gorgon_sdk_version: app::GORGON_SDK_VERSION.into(),
            channel: app::CHANNEL.into(),
            rand26: app::RAND26,
        }
    }
}

impl AppProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a (possibly partial) profile from JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(text).map(Self::normalized)
    }

    /// Replace empty strings and zero integers with the defaults.
    pub fn normalized(mut self) -> Self {
        let d = Self::default();
        fn fill_str(v: &mut String, d: String) {
            if v.is_empty() {
                *v = d;
            }
        }
        fn fill_u32(v: &mut u32, d: u32) {
            if *v == 0 {
                *v = d;
            }
        }
        fill_str(&mut self.app_version, d.app_version);
        fill_str(&mut self.sdk_version_str, d.sdk_version_str);
        fill_u32(&mut self.sdk_version, d.sdk_version);
        fill_u32(&mut self.call_type, d.call_type);
        fill_u32(&mut self.app_version_constant, d.app_version_constant);
        fill_str(&mut self.ms_app_id, d.ms_app_id);
        fill_str(&mut self.license_id, d.license_id);
        fill_str(&mut self.gorgon_sdk_version, d.gorgon_sdk_version);
        fill_str(&mut self.channel, d.channel);
        fill_u32(&mut self.rand26, d.rand26);
        self
    }

    pub fn rand26_bytes(&self) -> [u8; 4] {
        self.rand26.to_be_bytes()
    }
}
