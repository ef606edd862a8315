//! Settings for folding and its hosts
//!
//! Settings live under the `tidyfold` namespace. In a TOML file:
//!
//! ```toml
//! [tidyfold]
//! enableCustomFolding = true
//! foldParentBlocks = false
//! excludedFoldingElements = ["span", "table"]
//! highlightFoldableBlocks = false
//! showDebugLogs = false
//! ```
//!
//! Editors send the same record as JSON, either wrapped in a `tidyfold`
//! object or bare.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SettingsError};

/// Namespace key shared by TOML files and editor settings
pub const NAMESPACE: &str = "tidyfold";

/// Settings file names looked up in the working directory
pub const SETTINGS_FILES: &[&str] = &["tidyfold.toml", ".tidyfold.toml"];

/// Options read by a single folding scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingOptions {
    /// When false the scan returns no ranges
    pub custom_folding_enabled: bool,
    /// Fold `div` and `script` blocks and drop their default exclusion
    pub fold_parent_blocks: bool,
    /// Element names (without `<`) whose lines never open a fold
    pub excluded_element_names: Vec<String>,
}

impl Default for FoldingOptions {
    fn default() -> Self {
        Self {
            custom_folding_enabled: true,
            fold_parent_blocks: false,
            excluded_element_names: Vec::new(),
        }
    }
}

/// Top-level settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Provide folding ranges at all
    pub enable_custom_folding: bool,
    /// Fold generic containers (`div`, `script`)
    pub fold_parent_blocks: bool,
    /// Additional element names that never fold
    pub excluded_folding_elements: Vec<String>,
    /// Highlight foldable regions in the editor
    pub highlight_foldable_blocks: bool,
    /// Mirror debug output to the editor
    pub show_debug_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_custom_folding: true,
            fold_parent_blocks: false,
            excluded_folding_elements: Vec::new(),
            highlight_foldable_blocks: false,
            show_debug_logs: false,
        }
    }
}

#[derive(Serialize)]
struct NamespacedSettings<'a> {
    tidyfold: &'a Settings,
}

impl Settings {
    /// Parse settings from a TOML string.
    ///
    /// Keys may sit under a `[tidyfold]` table or at the top level.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(toml_str)?;
        let value = match table.remove(NAMESPACE) {
            Some(namespaced @ toml::Value::Table(_)) => namespaced,
            _ => toml::Value::Table(table),
        };
        let settings: Settings = value.try_into()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Render the settings as a namespaced TOML document
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(&NamespacedSettings { tidyfold: self })
    }

    /// Read settings from editor JSON.
    ///
    /// Never fails: missing or mistyped fields keep their defaults.
    pub fn from_json_value(value: &Value) -> Self {
        let record = match value.get(NAMESPACE) {
            Some(inner @ Value::Object(_)) => inner,
            _ => value,
        };
        let defaults = Self::default();

        let flag = |key: &str, default: bool| {
            record.get(key).and_then(Value::as_bool).unwrap_or(default)
        };

        let excluded = record
            .get("excludedFoldingElements")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.excluded_folding_elements);

        Self {
            enable_custom_folding: flag("enableCustomFolding", defaults.enable_custom_folding),
            fold_parent_blocks: flag("foldParentBlocks", defaults.fold_parent_blocks),
            excluded_folding_elements: excluded,
            highlight_foldable_blocks: flag(
                "highlightFoldableBlocks",
                defaults.highlight_foldable_blocks,
            ),
            show_debug_logs: flag("showDebugLogs", defaults.show_debug_logs),
        }
    }

    /// Project the settings onto the options a scan reads
    pub fn folding_options(&self) -> FoldingOptions {
        FoldingOptions {
            custom_folding_enabled: self.enable_custom_folding,
            fold_parent_blocks: self.fold_parent_blocks,
            excluded_element_names: self.excluded_folding_elements.clone(),
        }
    }
}
