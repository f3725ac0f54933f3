//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Settings applied when libvips starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Program name reported to libvips
    pub name: String,
    /// Worker threads per pipeline, 0 lets libvips decide
    pub concurrency: i32,
    /// Report leaked libvips objects at shutdown
    pub leak_check: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "vips-avg".to_string(),
            concurrency: 0,
            leak_check: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: RuntimeConfig = serde_json::from_str(r#"{"leakCheck": true}"#).unwrap();
        assert_eq!(
            config,
            RuntimeConfig {
                leak_check: true,
                ..RuntimeConfig::default()
            }
        );
    }
}
