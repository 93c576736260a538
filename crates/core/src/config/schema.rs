//! Configuration schema definitions
//!
//! Shared configuration types for all tools.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[general]`
    #[serde(default)]
    pub general: GeneralConfig,

    /// `[translations]`
    #[serde(default)]
    pub translations: TranslationsConfig,

    /// `[nine_patch]`
    #[serde(default)]
    pub nine_patch: NinePatchConfig,
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Android resource directory
    #[serde(default = "default_res_dir")]
    pub res_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            res_dir: default_res_dir(),
        }
    }
}

fn default_res_dir() -> String {
    "res".to_string()
}

/// What to do when a candidate file cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CandidateErrorPolicy {
    /// Stop the whole run at the first failing candidate
    #[default]
    Abort,
    /// Report the failure and move on to the next candidate
    Continue,
}

/// How to treat `<string>` elements without a `name` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnnamedEntryPolicy {
    /// Read the missing attribute as the empty key
    #[default]
    Permissive,
    /// Fail with a malformed entry error
    Reject,
}

/// Translation audit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsConfig {
    /// Default-language resource file
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Failure policy for unreadable candidates
    #[serde(default)]
    pub on_candidate_error: CandidateErrorPolicy,

    /// Reading of `<string>` elements without a name
    #[serde(default)]
    pub unnamed_entries: UnnamedEntryPolicy,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            baseline: default_baseline(),
            on_candidate_error: CandidateErrorPolicy::default(),
            unnamed_entries: UnnamedEntryPolicy::default(),
        }
    }
}

fn default_baseline() -> String {
    "res/values/strings.xml".to_string()
}

/// Nine-patch generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NinePatchConfig {
    /// Inkscape executable used for SVG export
    #[serde(default = "default_inkscape")]
    pub inkscape: String,
}

impl Default for NinePatchConfig {
    fn default() -> Self {
        Self {
            inkscape: default_inkscape(),
        }
    }
}

fn default_inkscape() -> String {
    "inkscape".to_string()
}
